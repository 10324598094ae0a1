//! Single-paddle Pong on a 480x320 field
//!
//! The player defends the left edge; the ball bounces off the other three
//! walls. Each paddle return scores a point and speeds the ball up. One
//! `tick` is one 60 Hz frame; velocities are in pixels per frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::platform::Command;

pub const FIELD_WIDTH: f32 = 480.0;
pub const FIELD_HEIGHT: f32 = 320.0;
pub const PADDLE_WIDTH: f32 = 10.0;
pub const PADDLE_HEIGHT: f32 = 60.0;
/// Drawn ball radius; collisions use the ball centre
pub const BALL_RADIUS: f32 = 8.0;
/// Per-axis ball speed at serve (pixels per frame)
pub const INITIAL_BALL_SPEED: f32 = 3.0;
/// Added to the per-axis speed on every paddle return
pub const SPEED_INCREASE: f32 = 0.075;

/// Current phase of a Pong round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PongPhase {
    Paused,
    Playing,
    GameOver,
}

/// Something the UI should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PongEvent {
    PaddleHit,
    WallBounce,
    /// Ball got past the paddle
    Missed,
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct PongInput {
    /// Pointer y relative to the canvas top (pixels)
    pub pointer_y: Option<f32>,
    /// Space / pause button
    pub toggle_pause: bool,
    /// Restart button
    pub restart: bool,
}

impl PongInput {
    /// Drop everything a tick has consumed. The paddle only moves again on
    /// fresh pointer movement.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Queue a restart. A pointer position from the old round is discarded.
    pub fn request_restart(&mut self) {
        self.restart = true;
        self.pointer_y = None;
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    fn serve(rng: &mut Pcg32) -> Self {
        let dy = if rng.random::<bool>() {
            INITIAL_BALL_SPEED
        } else {
            -INITIAL_BALL_SPEED
        };
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            vel: Vec2::new(INITIAL_BALL_SPEED, dy),
        }
    }
}

/// Complete Pong game state
#[derive(Debug, Clone)]
pub struct PongState {
    pub ball: Ball,
    /// Top edge of the paddle
    pub paddle_y: f32,
    /// Current per-axis ball speed
    pub speed: f32,
    pub score: u32,
    pub phase: PongPhase,
    rng: Pcg32,
}

impl PongState {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        Self {
            ball: Ball::serve(&mut rng),
            paddle_y: centered_paddle(),
            speed: INITIAL_BALL_SPEED,
            score: 0,
            phase: PongPhase::Paused,
            rng,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            PongPhase::Playing => PongPhase::Paused,
            PongPhase::Paused => PongPhase::Playing,
            PongPhase::GameOver => PongPhase::GameOver,
        };
    }

    /// New serve, paused
    pub fn restart(&mut self) {
        self.ball = Ball::serve(&mut self.rng);
        self.paddle_y = centered_paddle();
        self.speed = INITIAL_BALL_SPEED;
        self.score = 0;
        self.phase = PongPhase::Paused;
    }

    /// Apply a keyboard command
    pub fn handle(&mut self, command: Command) {
        if command != Command::Space {
            return;
        }
        if self.phase == PongPhase::GameOver {
            self.restart();
        } else {
            self.toggle_pause();
        }
    }

    /// Place the paddle top at `y`, kept inside the field.
    /// Pointer movement is ignored unless the game is running.
    pub fn move_paddle(&mut self, y: f32) {
        if self.phase != PongPhase::Playing {
            return;
        }
        self.paddle_y = y.clamp(0.0, FIELD_HEIGHT - PADDLE_HEIGHT);
    }

    fn paddle_covers(&self, y: f32) -> bool {
        y >= self.paddle_y && y <= self.paddle_y + PADDLE_HEIGHT
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &PongInput) -> Vec<PongEvent> {
        let mut events = Vec::new();

        if input.restart {
            self.restart();
            return events;
        }
        if input.toggle_pause {
            self.handle(Command::Space);
        }
        if let Some(y) = input.pointer_y {
            self.move_paddle(y);
        }
        if self.phase != PongPhase::Playing {
            return events;
        }

        let ball = &mut self.ball;
        ball.pos += ball.vel;

        // Top and bottom walls
        if ball.pos.y <= 0.0 {
            ball.pos.y = 0.0;
            ball.vel.y = ball.vel.y.abs();
            events.push(PongEvent::WallBounce);
        } else if ball.pos.y >= FIELD_HEIGHT {
            ball.pos.y = FIELD_HEIGHT;
            ball.vel.y = -ball.vel.y.abs();
            events.push(PongEvent::WallBounce);
        }

        // Paddle
        let ball_y = self.ball.pos.y;
        if self.ball.pos.x <= PADDLE_WIDTH && self.paddle_covers(ball_y) {
            self.ball.vel.x = self.ball.vel.x.abs();
            self.ball.pos.x = PADDLE_WIDTH;
            self.speed += SPEED_INCREASE;
            self.score += 1;
            events.push(PongEvent::PaddleHit);
        }

        // Right wall
        let ball = &mut self.ball;
        if ball.pos.x >= FIELD_WIDTH {
            ball.pos.x = FIELD_WIDTH;
            ball.vel.x = -ball.vel.x.abs();
            events.push(PongEvent::WallBounce);
        }

        if ball.pos.x < 0.0 {
            self.phase = PongPhase::GameOver;
            events.push(PongEvent::Missed);
            return events;
        }

        ball.vel = Vec2::new(
            ball.vel.x.signum() * self.speed,
            ball.vel.y.signum() * self.speed,
        );
        events
    }

    /// Player-facing hint under the canvas
    pub fn instructions(&self) -> &'static str {
        match self.phase {
            PongPhase::Paused => {
                "Move the mouse up and down to control the paddle. Press Space to start/pause."
            }
            PongPhase::Playing => "",
            PongPhase::GameOver => "Game Over!",
        }
    }

    /// Label for the start/pause button
    pub fn pause_label(&self) -> &'static str {
        if self.phase == PongPhase::Playing {
            "Pause"
        } else {
            "Start"
        }
    }
}

fn centered_paddle() -> f32 {
    FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn playing(seed: u64) -> PongState {
        let mut state = PongState::new(seed);
        state.phase = PongPhase::Playing;
        state
    }

    #[test]
    fn test_new_serve() {
        let state = PongState::new(42);
        assert_eq!(state.phase, PongPhase::Paused);
        assert_eq!(state.ball.pos, Vec2::new(240.0, 160.0));
        assert_eq!(state.ball.vel.x, INITIAL_BALL_SPEED);
        assert_eq!(state.ball.vel.y.abs(), INITIAL_BALL_SPEED);
        assert_eq!(state.paddle_y, 130.0);
    }

    #[test]
    fn test_paused_does_not_move() {
        let mut state = PongState::new(1);
        let before = state.ball;
        assert!(state.tick(&PongInput::default()).is_empty());
        assert_eq!(state.ball, before);
    }

    #[test]
    fn test_space_toggles_and_restarts() {
        let mut state = PongState::new(1);
        state.handle(Command::Space);
        assert_eq!(state.phase, PongPhase::Playing);
        state.handle(Command::Space);
        assert_eq!(state.phase, PongPhase::Paused);

        state.phase = PongPhase::GameOver;
        state.score = 9;
        state.handle(Command::Space);
        assert_eq!(state.phase, PongPhase::Paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, INITIAL_BALL_SPEED);
    }

    #[test]
    fn test_paddle_clamped_and_ignored_when_paused() {
        let mut state = PongState::new(1);
        state.move_paddle(5.0);
        assert_eq!(state.paddle_y, 130.0);

        state.phase = PongPhase::Playing;
        state.move_paddle(-40.0);
        assert_eq!(state.paddle_y, 0.0);
        state.move_paddle(500.0);
        assert_eq!(state.paddle_y, FIELD_HEIGHT - PADDLE_HEIGHT);
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut state = playing(1);
        state.ball = Ball {
            pos: Vec2::new(200.0, 2.0),
            vel: Vec2::new(3.0, -3.0),
        };
        let events = state.tick(&PongInput::default());
        assert_eq!(events, vec![PongEvent::WallBounce]);
        assert!(state.ball.vel.y > 0.0);
        assert!(state.ball.pos.y >= 0.0);
    }

    #[test]
    fn test_bottom_wall_bounce() {
        let mut state = playing(1);
        state.ball = Ball {
            pos: Vec2::new(200.0, FIELD_HEIGHT - 1.0),
            vel: Vec2::new(3.0, 3.0),
        };
        let events = state.tick(&PongInput::default());
        assert_eq!(events, vec![PongEvent::WallBounce]);
        assert!(state.ball.vel.y < 0.0);
        assert_eq!(state.ball.pos.y, FIELD_HEIGHT);

        state.tick(&PongInput::default());
        assert!(state.ball.pos.y < FIELD_HEIGHT);
    }

    #[test]
    fn test_restart_forgets_old_pointer() {
        let mut state = playing(1);
        let mut input = PongInput {
            pointer_y: Some(0.0),
            ..Default::default()
        };
        state.tick(&input);
        assert_eq!(state.paddle_y, 0.0);
        input.clear();

        input.request_restart();
        state.tick(&input);
        input.clear();
        assert_eq!(state.paddle_y, centered_paddle());

        // Resume without moving the mouse
        input.toggle_pause = true;
        state.tick(&input);
        input.clear();
        assert_eq!(state.phase, PongPhase::Playing);
        assert_eq!(state.paddle_y, centered_paddle());
        state.tick(&input);
        assert_eq!(state.paddle_y, centered_paddle());
    }

    #[test]
    fn test_paddle_return_scores_and_speeds_up() {
        let mut state = playing(1);
        state.paddle_y = 100.0;
        state.ball = Ball {
            pos: Vec2::new(12.0, 130.0),
            vel: Vec2::new(-3.0, 3.0),
        };
        let events = state.tick(&PongInput::default());
        assert_eq!(events, vec![PongEvent::PaddleHit]);
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.pos.x, PADDLE_WIDTH);
        let speed = INITIAL_BALL_SPEED + SPEED_INCREASE;
        assert!((state.speed - speed).abs() < 1e-6);
        assert!((state.ball.vel.x - speed).abs() < 1e-6);
        assert!((state.ball.vel.y - speed).abs() < 1e-6);
    }

    #[test]
    fn test_miss_ends_game() {
        let mut state = playing(1);
        state.paddle_y = 0.0;
        state.ball = Ball {
            pos: Vec2::new(2.0, 300.0),
            vel: Vec2::new(-3.0, 3.0),
        };
        let events = state.tick(&PongInput::default());
        assert_eq!(events, vec![PongEvent::Missed]);
        assert_eq!(state.phase, PongPhase::GameOver);

        // Frozen until restarted
        let before = state.ball;
        state.tick(&PongInput::default());
        assert_eq!(state.ball, before);

        state.tick(&PongInput {
            restart: true,
            ..Default::default()
        });
        assert_eq!(state.phase, PongPhase::Paused);
        assert_eq!(state.ball.pos, Vec2::new(240.0, 160.0));
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut state = playing(1);
        state.ball = Ball {
            pos: Vec2::new(478.0, 100.0),
            vel: Vec2::new(3.0, 3.0),
        };
        let events = state.tick(&PongInput::default());
        assert_eq!(events, vec![PongEvent::WallBounce]);
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(99);
        let mut b = playing(99);
        for i in 0..500 {
            let input = PongInput {
                pointer_y: Some((i % 260) as f32),
                ..Default::default()
            };
            assert_eq!(a.tick(&input), b.tick(&input));
        }
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.score, b.score);
    }

    proptest! {
        #[test]
        fn prop_velocity_matches_speed(seed in any::<u64>(), ys in proptest::collection::vec(-50.0f32..400.0, 1..300)) {
            let mut state = playing(seed);
            let mut last_score = state.score;
            for y in ys {
                state.tick(&PongInput { pointer_y: Some(y), ..Default::default() });
                prop_assert!(state.score >= last_score);
                last_score = state.score;
                prop_assert!(state.paddle_y >= 0.0);
                prop_assert!(state.paddle_y <= FIELD_HEIGHT - PADDLE_HEIGHT);
                if state.phase != PongPhase::Playing {
                    break;
                }
                prop_assert!((state.ball.vel.x.abs() - state.speed).abs() < 1e-4);
                prop_assert!((state.ball.vel.y.abs() - state.speed).abs() < 1e-4);
                prop_assert!(state.ball.pos.y >= 0.0 && state.ball.pos.y <= FIELD_HEIGHT);
            }
        }
    }
}
