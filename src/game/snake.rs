use std::collections::VecDeque;
use std::time::Duration;

use crate::constants::{SNAKE_COLS, SNAKE_FOOD_POINTS, SNAKE_ROWS};
use crate::game::board::in_bounds;
use crate::game::Simulation;
use crate::rng::{self, GameRng};
use crate::settings::SnakeSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Idle,
    Moved,
    Ate,
    Crashed,
}

const START_BODY: [Point; 3] = [Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)];

pub struct Snake {
    /// Head first.
    pub body: VecDeque<Point>,
    /// Direction applied on the last tick.
    pub direction: Direction,
    pending: Direction,
    pub food: Option<Point>,
    pub score: u32,
    pub paused: bool,
    pub over: bool,
    interval: Duration,
    settings: SnakeSettings,
    rng: GameRng,
}

impl Snake {
    pub fn new(settings: &SnakeSettings, seed: u64) -> Self {
        let mut game = Self {
            body: VecDeque::new(),
            direction: Direction::Right,
            pending: Direction::Right,
            food: None,
            score: 0,
            paused: false,
            over: false,
            interval: Duration::from_millis(settings.interval_ms),
            settings: settings.clone(),
            rng: rng::seeded(seed),
        };
        game.reset();
        game
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn contains(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    /// Latch a direction for the next tick. Reversing onto the neck is refused.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.over || self.paused || direction == self.direction.opposite() {
            return false;
        }
        self.pending = direction;
        true
    }

    pub fn advance(&mut self) -> StepOutcome {
        if self.over || self.paused {
            return StepOutcome::Idle;
        }
        let Some(&head) = self.body.front() else {
            return StepOutcome::Idle;
        };

        let (dx, dy) = self.pending.delta();
        let new_head = Point::new(head.x + dx, head.y + dy);
        self.direction = self.pending;

        if !in_bounds::<SNAKE_COLS, SNAKE_ROWS>(new_head.x, new_head.y) {
            return self.crash();
        }

        let eating = self.food == Some(new_head);
        // The tail moves out of the way this tick unless the snake grows.
        let solid = if eating { self.body.len() } else { self.body.len() - 1 };
        if self.body.iter().take(solid).any(|&p| p == new_head) {
            return self.crash();
        }

        self.body.push_front(new_head);
        if !eating {
            self.body.pop_back();
            return StepOutcome::Moved;
        }

        self.score += SNAKE_FOOD_POINTS;
        self.maybe_speed_up();
        self.place_food();
        StepOutcome::Ate
    }

    fn crash(&mut self) -> StepOutcome {
        self.over = true;
        log::info!(
            "snake: game over with {} points, length {}",
            self.score,
            self.body.len()
        );
        StepOutcome::Crashed
    }

    fn maybe_speed_up(&mut self) {
        let every = self.settings.speedup_every;
        if every == 0 || self.score % every != 0 {
            return;
        }
        let faster = self.interval.saturating_sub(Duration::from_millis(self.settings.speedup_step_ms));
        self.interval = faster.max(Duration::from_millis(self.settings.min_interval_ms));
        log::debug!("snake: interval now {:?}", self.interval);
    }

    /// Put food on a random free cell. A full board ends the game.
    pub fn place_food(&mut self) {
        let mut free = Vec::with_capacity(SNAKE_COLS * SNAKE_ROWS);
        for y in 0..SNAKE_ROWS as i32 {
            for x in 0..SNAKE_COLS as i32 {
                let p = Point::new(x, y);
                if !self.contains(p) {
                    free.push(p);
                }
            }
        }
        self.food = rng::pick(&mut self.rng, &free);
        if self.food.is_none() {
            self.over = true;
            log::info!("snake: board filled with {} points", self.score);
        }
    }

    pub fn set_food(&mut self, food: Point) {
        self.food = Some(food);
    }

    /// Replace the body (head first) and heading, e.g. to set up a scenario.
    pub fn set_body(&mut self, body: &[Point], direction: Direction) {
        self.body = body.iter().copied().collect();
        self.direction = direction;
        self.pending = direction;
    }
}

impl Simulation for Snake {
    fn tick(&mut self) {
        self.advance();
    }

    fn tick_interval(&self) -> Option<Duration> {
        Some(self.interval)
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn toggle_pause(&mut self) {
        if !self.over {
            self.paused = !self.paused;
        }
    }

    fn is_over(&self) -> bool {
        self.over
    }

    fn reset(&mut self) {
        self.body = START_BODY.iter().copied().collect();
        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.paused = false;
        self.over = false;
        self.interval = Duration::from_millis(self.settings.interval_ms);
        self.place_food();
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Snake {
        Snake::new(&SnakeSettings::default(), 3)
    }

    #[test]
    fn starts_heading_right_with_three_segments() {
        let game = game();
        assert_eq!(game.body.len(), 3);
        assert_eq!(game.body[0], Point::new(10, 10));
        assert_eq!(game.direction, Direction::Right);
        let food = game.food.expect("food placed");
        assert!(!game.contains(food));
    }

    #[test]
    fn plain_move_keeps_length() {
        let mut game = game();
        game.set_food(Point::new(0, 0));
        assert_eq!(game.advance(), StepOutcome::Moved);
        assert_eq!(game.body.len(), 3);
        assert_eq!(game.body[0], Point::new(11, 10));
        assert_eq!(game.body[2], Point::new(9, 10));
    }

    #[test]
    fn eating_grows_by_one_and_keeps_tail() {
        let mut game = game();
        game.set_food(Point::new(11, 10));
        assert_eq!(game.advance(), StepOutcome::Ate);
        assert_eq!(game.body.len(), 4);
        assert_eq!(game.body[3], Point::new(8, 10));
        assert_eq!(game.score, 10);
        let food = game.food.expect("new food");
        assert!(!game.contains(food));
    }

    #[test]
    fn reversing_is_rejected() {
        let mut game = game();
        assert!(!game.steer(Direction::Left));
        assert!(game.steer(Direction::Up));
        assert_eq!(game.pending_direction(), Direction::Up);
        // Still heading right until the tick applies the turn.
        assert!(game.steer(Direction::Down));
    }

    #[test]
    fn two_quick_turns_cannot_reverse_into_the_neck() {
        let mut game = game();
        game.set_food(Point::new(0, 0));
        assert!(game.steer(Direction::Up));
        assert!(!game.steer(Direction::Left));
        game.advance();
        assert!(!game.over);
        assert_eq!(game.body[0], Point::new(10, 9));
    }

    #[test]
    fn wall_ends_the_game() {
        let mut game = game();
        game.set_body(&[Point::new(19, 5), Point::new(18, 5)], Direction::Right);
        game.set_food(Point::new(0, 0));
        assert_eq!(game.advance(), StepOutcome::Crashed);
        assert!(game.is_over());
        assert_eq!(game.advance(), StepOutcome::Idle);
    }

    #[test]
    fn running_into_the_body_ends_the_game() {
        let mut game = game();
        let body = [
            Point::new(5, 5),
            Point::new(6, 5),
            Point::new(6, 6),
            Point::new(5, 6),
            Point::new(4, 6),
        ];
        game.set_body(&body, Direction::Left);
        game.set_food(Point::new(0, 0));
        assert!(game.steer(Direction::Down));
        assert_eq!(game.advance(), StepOutcome::Crashed);
        assert!(game.is_over());
    }

    #[test]
    fn chasing_the_tail_is_allowed() {
        let mut game = game();
        // A 2x2 loop: the head moves into the cell the tail is leaving.
        let body = [
            Point::new(5, 5),
            Point::new(5, 6),
            Point::new(6, 6),
            Point::new(6, 5),
        ];
        game.set_body(&body, Direction::Up);
        game.set_food(Point::new(0, 0));
        game.steer(Direction::Right);
        assert_eq!(game.advance(), StepOutcome::Moved);
        assert_eq!(game.body[0], Point::new(6, 5));
    }

    #[test]
    fn speeds_up_every_fifty_points_down_to_the_floor() {
        let mut game = game();
        let start = game.tick_interval().expect("timed game");
        game.score = 40;
        game.set_food(Point::new(11, 10));
        game.advance();
        assert_eq!(game.score, 50);
        assert_eq!(game.tick_interval(), Some(start - Duration::from_millis(10)));

        game.interval = Duration::from_millis(75);
        game.score = 90;
        let head = game.body[0];
        game.set_food(Point::new(head.x + 1, head.y));
        game.advance();
        assert_eq!(game.tick_interval(), Some(Duration::from_millis(70)));
    }

    #[test]
    fn pause_freezes_and_reset_restores() {
        let mut game = game();
        game.toggle_pause();
        assert_eq!(game.advance(), StepOutcome::Idle);
        assert!(!game.steer(Direction::Up));
        game.over = true;
        game.reset();
        assert!(!game.is_over());
        assert!(!game.is_paused());
        assert_eq!(game.body.len(), 3);
        assert_eq!(game.score, 0);
    }
}
