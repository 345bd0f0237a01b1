//! Single-player Pong against an easing opponent.
//!
//! Unlike the grid games this one keeps continuous positions in field units
//! (640 x 400, y pointing down) and advances once per frame.

use std::time::Duration;

use rand::Rng;

use crate::constants::*;
use crate::game::Simulation;
use crate::rng::{self, GameRng};
use crate::settings::PongSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Ball {
    pub fn centered(vx: f32, vy: f32) -> Self {
        Self {
            x: PONG_WIDTH / 2.0,
            y: PONG_HEIGHT / 2.0,
            vx,
            vy,
        }
    }
}

/// Held keys for the player's paddle, latched between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

/// What happened during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub paddle_hit: Option<Side>,
    pub scored: Option<Side>,
}

const PADDLE_START_Y: f32 = PONG_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0;

pub struct Pong {
    /// Top edge of the player's paddle.
    pub left_y: f32,
    /// Top edge of the opponent's paddle.
    pub right_y: f32,
    pub ball: Ball,
    pub input: PaddleInput,
    pub score_left: u32,
    pub score_right: u32,
    pub paused: bool,
    pub over: bool,
    frame: Duration,
    winning_score: u32,
    rng: GameRng,
}

impl Pong {
    pub fn new(settings: &PongSettings, seed: u64) -> Self {
        Self {
            left_y: PADDLE_START_Y,
            right_y: PADDLE_START_Y,
            ball: Ball::centered(BALL_SPEED_X, 3.0),
            input: PaddleInput::default(),
            score_left: 0,
            score_right: 0,
            paused: false,
            over: false,
            frame: Duration::from_millis(settings.frame_ms),
            winning_score: settings.winning_score,
            rng: rng::seeded(seed),
        }
    }

    pub fn winning_score(&self) -> u32 {
        self.winning_score
    }

    pub fn winner(&self) -> Option<Side> {
        if !self.over {
            None
        } else if self.score_left >= self.winning_score {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    fn serve_vy(&mut self) -> f32 {
        let speed = self.rng.gen_range(2.0..4.0);
        if self.rng.gen_bool(0.5) {
            speed
        } else {
            -speed
        }
    }

    /// Vertical speed after a paddle hit, from how far off-center it landed.
    fn deflect(ball_y: f32, paddle_y: f32) -> f32 {
        let half = PADDLE_HEIGHT / 2.0;
        let offset = (ball_y - (paddle_y + half)) / half;
        BALL_SPIN * offset
    }

    pub fn update(&mut self) -> FrameReport {
        let mut report = FrameReport::default();
        if self.paused || self.over {
            return report;
        }

        if self.input.up {
            self.left_y = (self.left_y - PADDLE_SPEED).max(0.0);
        }
        if self.input.down {
            self.left_y = (self.left_y + PADDLE_SPEED).min(PONG_HEIGHT - PADDLE_HEIGHT);
        }

        let target = self.ball.y - PADDLE_HEIGHT / 2.0;
        self.right_y += (target - self.right_y) * AI_EASING;
        self.right_y = self.right_y.clamp(0.0, PONG_HEIGHT - PADDLE_HEIGHT);

        let ball = &mut self.ball;
        ball.x += ball.vx;
        ball.y += ball.vy;

        if ball.y - BALL_RADIUS < 0.0 {
            ball.y = BALL_RADIUS;
            ball.vy = ball.vy.abs();
        } else if ball.y + BALL_RADIUS > PONG_HEIGHT {
            ball.y = PONG_HEIGHT - BALL_RADIUS;
            ball.vy = -ball.vy.abs();
        }

        // Only a ball travelling toward a paddle can bounce off it.
        if ball.vx < 0.0
            && ball.x - BALL_RADIUS <= PADDLE_WIDTH
            && ball.y >= self.left_y
            && ball.y <= self.left_y + PADDLE_HEIGHT
        {
            ball.vx = -ball.vx;
            ball.vy = Self::deflect(ball.y, self.left_y);
            report.paddle_hit = Some(Side::Left);
        } else if ball.vx > 0.0
            && ball.x + BALL_RADIUS >= PONG_WIDTH - PADDLE_WIDTH
            && ball.y >= self.right_y
            && ball.y <= self.right_y + PADDLE_HEIGHT
        {
            ball.vx = -ball.vx;
            ball.vy = Self::deflect(ball.y, self.right_y);
            report.paddle_hit = Some(Side::Right);
        }

        if self.ball.x < 0.0 {
            self.score_right += 1;
            report.scored = Some(Side::Right);
            let vy = self.serve_vy();
            self.ball = Ball::centered(BALL_SPEED_X, vy);
        } else if self.ball.x > PONG_WIDTH {
            self.score_left += 1;
            report.scored = Some(Side::Left);
            let vy = self.serve_vy();
            self.ball = Ball::centered(-BALL_SPEED_X, vy);
        }

        if report.scored.is_some()
            && (self.score_left >= self.winning_score || self.score_right >= self.winning_score)
        {
            self.over = true;
            log::info!(
                "pong: match over {} : {}",
                self.score_left,
                self.score_right
            );
        }

        report
    }
}

impl Simulation for Pong {
    fn tick(&mut self) {
        self.update();
    }

    fn tick_interval(&self) -> Option<Duration> {
        Some(self.frame)
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
        self.left_y = PADDLE_START_Y;
        self.right_y = PADDLE_START_Y;
        let vx = if self.rng.gen_bool(0.5) {
            BALL_SPEED_X
        } else {
            -BALL_SPEED_X
        };
        let vy = self.serve_vy();
        self.ball = Ball::centered(vx, vy);
        self.score_left = 0;
        self.score_right = 0;
        self.paused = false;
        self.over = false;
    }

    fn score(&self) -> u32 {
        self.score_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Pong {
        Pong::new(&PongSettings::default(), 17)
    }

    #[test]
    fn ball_bounces_off_the_top() {
        let mut game = game();
        game.ball = Ball {
            x: 320.0,
            y: BALL_RADIUS + 1.0,
            vx: 4.0,
            vy: -3.0,
        };
        game.update();
        assert!(game.ball.vy > 0.0);
        assert!(game.ball.y >= BALL_RADIUS);
    }

    #[test]
    fn ball_bounces_off_the_bottom() {
        let mut game = game();
        game.ball = Ball {
            x: 320.0,
            y: PONG_HEIGHT - BALL_RADIUS - 1.0,
            vx: 4.0,
            vy: 3.0,
        };
        game.update();
        assert!(game.ball.vy < 0.0);
    }

    #[test]
    fn paddle_contact_flips_once() {
        let mut game = game();
        game.left_y = 165.0;
        game.ball = Ball {
            x: PADDLE_WIDTH + BALL_RADIUS + 2.0,
            y: 200.0,
            vx: -4.0,
            vy: 0.0,
        };
        let report = game.update();
        assert_eq!(report.paddle_hit, Some(Side::Left));
        assert_eq!(game.ball.vx, 4.0);

        // Still overlapping the paddle next frame, but moving away now.
        let report = game.update();
        assert_eq!(report.paddle_hit, None);
        assert_eq!(game.ball.vx, 4.0);
    }

    #[test]
    fn hit_offset_sets_vertical_speed() {
        let mut game = game();
        game.left_y = 100.0;
        game.ball = Ball {
            x: PADDLE_WIDTH + BALL_RADIUS + 2.0,
            y: 100.0 + PADDLE_HEIGHT,
            vx: -4.0,
            vy: 0.0,
        };
        game.update();
        assert!((game.ball.vy - BALL_SPIN).abs() < 1e-4);
    }

    #[test]
    fn missing_the_ball_scores_for_the_opponent() {
        let mut game = game();
        game.left_y = 0.0;
        game.ball = Ball {
            x: 5.0,
            y: 300.0,
            vx: -4.0,
            vy: 0.0,
        };
        let report = game.update();
        assert_eq!(report.scored, None);
        assert_eq!(game.score_right, 0);

        let report = game.update();
        assert_eq!(report.scored, Some(Side::Right));
        assert_eq!(game.score_right, 1);
        assert_eq!(game.ball.x, PONG_WIDTH / 2.0);
        assert_eq!(game.ball.vx, BALL_SPEED_X);
        assert!(game.ball.vy.abs() >= 2.0 && game.ball.vy.abs() <= 4.0);
    }

    #[test]
    fn passing_the_opponent_scores_for_the_player() {
        let mut game = game();
        game.right_y = 0.0;
        game.ball = Ball {
            x: PONG_WIDTH - 1.0,
            y: 390.0,
            vx: 4.0,
            vy: 0.0,
        };
        let report = game.update();
        assert_eq!(report.scored, Some(Side::Left));
        assert_eq!(game.score_left, 1);
        assert_eq!(game.ball.vx, -BALL_SPEED_X);
    }

    #[test]
    fn reaching_the_threshold_freezes_the_match() {
        let mut game = game();
        game.score_right = PONG_WINNING_SCORE - 1;
        game.left_y = 0.0;
        game.ball = Ball {
            x: 1.0,
            y: 300.0,
            vx: -4.0,
            vy: 0.0,
        };
        game.update();
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Side::Right));

        let frozen = game.ball;
        assert_eq!(game.update(), FrameReport::default());
        assert_eq!(game.ball, frozen);
    }

    #[test]
    fn player_paddle_stays_on_the_field() {
        let mut game = game();
        game.left_y = 2.0;
        game.input.up = true;
        game.update();
        assert_eq!(game.left_y, 0.0);

        game.input = PaddleInput { up: false, down: true };
        game.left_y = PONG_HEIGHT - PADDLE_HEIGHT - 1.0;
        game.update();
        assert_eq!(game.left_y, PONG_HEIGHT - PADDLE_HEIGHT);
    }

    #[test]
    fn opponent_eases_toward_the_ball() {
        let mut game = game();
        game.right_y = 0.0;
        game.ball = Ball {
            x: 320.0,
            y: 300.0,
            vx: 4.0,
            vy: 0.0,
        };
        game.update();
        let target = 300.0 - PADDLE_HEIGHT / 2.0;
        assert!((game.right_y - target * AI_EASING).abs() < 1e-3);
    }

    #[test]
    fn reset_restarts_the_match() {
        let mut game = game();
        game.score_left = 3;
        game.over = true;
        game.reset();
        assert!(!game.is_over());
        assert_eq!((game.score_left, game.score_right), (0, 0));
        assert_eq!(game.ball.x, PONG_WIDTH / 2.0);
        assert_eq!(game.ball.vx.abs(), BALL_SPEED_X);
    }
}
