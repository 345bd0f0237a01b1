use proptest::prelude::*;

use termcade::constants::{JEWELED_CASCADE_CAP, JEWELED_COLS, JEWELED_ROWS};
use termcade::game::jeweled::{find_matches, Board, ClickOutcome, Jeweled, Pos};
use termcade::settings::JeweledSettings;

/// First adjacent pair whose swap lines up a run, scanning row-major.
fn find_valid_swap(board: &Board) -> Option<(Pos, Pos)> {
    for r in 0..JEWELED_ROWS {
        for c in 0..JEWELED_COLS {
            let a = Pos::new(r, c);
            for b in [Pos::new(r, c + 1), Pos::new(r + 1, c)] {
                if b.row >= JEWELED_ROWS || b.col >= JEWELED_COLS {
                    continue;
                }
                let mut swapped = *board;
                swapped[a.row][a.col] = board[b.row][b.col];
                swapped[b.row][b.col] = board[a.row][a.col];
                if !find_matches(&swapped).is_empty() {
                    return Some((a, b));
                }
            }
        }
    }
    None
}

#[test]
fn clicking_a_far_gem_moves_the_selection() {
    let mut game = Jeweled::new(&JeweledSettings::default(), 4);
    assert_eq!(game.click(Pos::new(0, 0)), ClickOutcome::Selected);
    assert_eq!(game.click(Pos::new(5, 5)), ClickOutcome::Selected);
    assert_eq!(game.selected, Some(Pos::new(5, 5)));
    assert_eq!(game.click(Pos::new(5, 5)), ClickOutcome::Deselected);
    assert_eq!(game.selected, None);
}

proptest! {
    #[test]
    fn fresh_boards_have_no_matches(seed in any::<u64>()) {
        let game = Jeweled::new(&JeweledSettings::default(), seed);
        prop_assert!(find_matches(&game.board).is_empty());
        prop_assert!(game.board.iter().flatten().all(|&gem| gem != 0));
    }

    #[test]
    fn accepted_swaps_settle_the_board(seed in any::<u64>()) {
        let mut game = Jeweled::new(&JeweledSettings::default(), seed);
        let Some((a, b)) = find_valid_swap(&game.board) else {
            return Ok(());
        };

        game.click(a);
        let outcome = game.click(b);
        let ClickOutcome::Swapped { gained, cascades } = outcome else {
            return Err(TestCaseError::fail(format!("expected a swap, got {outcome:?}")));
        };

        prop_assert!(cascades >= 1 && cascades <= JEWELED_CASCADE_CAP);
        prop_assert!(gained >= 30);
        prop_assert_eq!(game.score, gained);
        if cascades < JEWELED_CASCADE_CAP {
            prop_assert!(find_matches(&game.board).is_empty());
        }
        prop_assert!(game.board.iter().flatten().all(|&gem| gem != 0));
        prop_assert_eq!(game.selected, None);
    }

    #[test]
    fn swaps_without_a_match_change_nothing(seed in any::<u64>(), r in 0usize..JEWELED_ROWS, c in 0usize..JEWELED_COLS - 1) {
        let mut game = Jeweled::new(&JeweledSettings::default(), seed);
        let before = game.board;
        let a = Pos::new(r, c);
        let b = Pos::new(r, c + 1);
        let mut swapped = before;
        swapped[r][c] = before[r][c + 1];
        swapped[r][c + 1] = before[r][c];
        prop_assume!(find_matches(&swapped).is_empty());

        prop_assert_eq!(game.try_swap(a, b), ClickOutcome::Rejected);
        prop_assert_eq!(game.board, before);
        prop_assert_eq!(game.message, Some("No match"));
    }
}
