use std::collections::HashSet;

use proptest::prelude::*;

use termcade::constants::SNAKE_FOOD_POINTS;
use termcade::game::snake::{Direction, Point, Snake, StepOutcome};
use termcade::settings::SnakeSettings;
use termcade::Simulation;

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

#[test]
fn eating_grows_by_one_and_keeps_the_tail() {
    let mut game = Snake::new(&SnakeSettings::default(), 1);
    game.set_body(
        &[Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
        Direction::Right,
    );
    game.set_food(Point::new(6, 5));

    assert_eq!(game.advance(), StepOutcome::Ate);
    assert_eq!(game.body.len(), 4);
    assert_eq!(game.body.back(), Some(&Point::new(3, 5)));
    assert_eq!(game.score(), SNAKE_FOOD_POINTS);
    assert!(game.food.is_some_and(|food| !game.contains(food)));
}

#[test]
fn chasing_the_tail_is_allowed() {
    let mut game = Snake::new(&SnakeSettings::default(), 1);
    // A 2x2 loop: the head moves into the cell the tail leaves.
    game.set_body(
        &[
            Point::new(5, 5),
            Point::new(5, 6),
            Point::new(6, 6),
            Point::new(6, 5),
        ],
        Direction::Up,
    );
    game.set_food(Point::new(0, 0));
    game.steer(Direction::Right);
    assert_eq!(game.advance(), StepOutcome::Moved);
    assert!(!game.is_over());
}

proptest! {
    #[test]
    fn body_stays_unique_while_alive(
        seed in any::<u64>(),
        turns in prop::collection::vec(0usize..4, 1..300),
    ) {
        let mut game = Snake::new(&SnakeSettings::default(), seed);
        for turn in turns {
            game.steer(DIRECTIONS[turn]);
            let outcome = game.advance();
            if game.is_over() {
                prop_assert!(outcome == StepOutcome::Crashed || game.food.is_none());
                break;
            }
            let cells: HashSet<Point> = game.body.iter().copied().collect();
            prop_assert_eq!(cells.len(), game.body.len());
            prop_assert_eq!(game.body.len() as u32, 3 + game.score() / SNAKE_FOOD_POINTS);
        }
    }

    #[test]
    fn reversing_is_always_refused(seed in any::<u64>(), turn in 0usize..4) {
        let mut game = Snake::new(&SnakeSettings::default(), seed);
        game.steer(DIRECTIONS[turn]);
        game.advance();
        prop_assume!(!game.is_over());
        let heading = game.direction;
        prop_assert!(!game.steer(heading.opposite()));
        prop_assert_eq!(game.pending_direction(), heading);
    }
}
