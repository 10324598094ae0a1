//! Procedural sound effects
//!
//! Every effect is a short list of oscillator tones, so no sample files are
//! shipped. The recipes are plain data; `web::AudioManager` plays them through
//! the Web Audio API in the browser build.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Snake eats food
    SnakeEat,
    /// Snake hits a wall or itself
    SnakeGameOver,
    /// Ball returned by the paddle
    PongPaddleHit,
    /// Ball bounces off a wall
    PongWallBounce,
    /// Ball got past the paddle
    PongGameOver,
    /// Finished round beat the stored best
    NewHighScore,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One oscillator note with an exponential decay envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// Start frequency (Hz)
    pub freq: f32,
    /// Glide target (Hz), reached at `decay`
    pub freq_end: Option<f32>,
    /// Peak gain before volume scaling
    pub gain: f32,
    /// Offset from the trigger time (s)
    pub delay: f64,
    /// Time for the gain ramp to fall to silence (s)
    pub decay: f64,
    /// Oscillator stop time after its start (s)
    pub stop: f64,
}

impl Tone {
    const fn note(waveform: Waveform, freq: f32, gain: f32, delay: f64, decay: f64) -> Self {
        Self {
            waveform,
            freq,
            freq_end: None,
            gain,
            delay,
            decay,
            stop: decay + 0.05,
        }
    }

    const fn glide(waveform: Waveform, freq: f32, freq_end: f32, gain: f32, decay: f64) -> Self {
        Self {
            waveform,
            freq,
            freq_end: Some(freq_end),
            gain,
            delay: 0.0,
            decay,
            stop: decay + 0.05,
        }
    }
}

/// Gain floor for exponential ramps (can't ramp to zero)
pub const SILENCE: f32 = 0.01;

const SNAKE_EAT: &[Tone] = &[
    Tone::note(Waveform::Sine, 600.0, 0.25, 0.0, 0.12),
    Tone::note(Waveform::Sine, 900.0, 0.25, 0.06, 0.12),
];

const SNAKE_GAME_OVER: &[Tone] = &[
    Tone::note(Waveform::Sine, 400.0, 0.3, 0.0, 0.3),
    Tone::note(Waveform::Sine, 350.0, 0.3, 0.2, 0.3),
    Tone::note(Waveform::Sine, 300.0, 0.3, 0.4, 0.3),
    Tone::note(Waveform::Sine, 200.0, 0.3, 0.6, 0.3),
];

const PONG_PADDLE_HIT: &[Tone] = &[Tone::glide(Waveform::Sine, 150.0, 60.0, 0.6, 0.1)];

const PONG_WALL_BOUNCE: &[Tone] = &[Tone::note(Waveform::Sine, 400.0, 0.3, 0.0, 0.08)];

const PONG_GAME_OVER: &[Tone] = &[
    Tone::glide(Waveform::Triangle, 300.0, 40.0, 0.4, 0.6),
    Tone::note(Waveform::Sine, 200.0, 0.2, 0.2, 0.4),
];

const NEW_HIGH_SCORE: &[Tone] = &[
    Tone::note(Waveform::Triangle, 500.0, 0.25, 0.0, 0.25),
    Tone::note(Waveform::Triangle, 600.0, 0.25, 0.08, 0.25),
    Tone::note(Waveform::Triangle, 700.0, 0.25, 0.16, 0.25),
    Tone::note(Waveform::Triangle, 800.0, 0.25, 0.24, 0.25),
    Tone::note(Waveform::Triangle, 1000.0, 0.25, 0.32, 0.25),
];

impl SoundEffect {
    /// The tones making up this effect
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::SnakeEat => SNAKE_EAT,
            SoundEffect::SnakeGameOver => SNAKE_GAME_OVER,
            SoundEffect::PongPaddleHit => PONG_PADDLE_HIT,
            SoundEffect::PongWallBounce => PONG_WALL_BOUNCE,
            SoundEffect::PongGameOver => PONG_GAME_OVER,
            SoundEffect::NewHighScore => NEW_HIGH_SCORE,
        }
    }

    /// Total length until the last oscillator stops (s)
    pub fn duration(&self) -> f64 {
        self.tones()
            .iter()
            .map(|t| t.delay + t.stop)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SoundEffect; 6] = [
        SoundEffect::SnakeEat,
        SoundEffect::SnakeGameOver,
        SoundEffect::PongPaddleHit,
        SoundEffect::PongWallBounce,
        SoundEffect::PongGameOver,
        SoundEffect::NewHighScore,
    ];

    #[test]
    fn test_recipes_are_well_formed() {
        for effect in ALL {
            let tones = effect.tones();
            assert!(!tones.is_empty(), "{effect:?} has no tones");
            for tone in tones {
                assert!(tone.freq > 0.0);
                assert!(tone.freq_end.is_none_or(|f| f > 0.0));
                assert!(tone.gain > SILENCE && tone.gain <= 1.0);
                assert!(tone.stop > tone.decay);
            }
        }
    }

    #[test]
    fn test_effects_stay_short() {
        for effect in ALL {
            assert!(effect.duration() < 1.5, "{effect:?} too long");
        }
        assert!(SoundEffect::PongWallBounce.duration() < SoundEffect::SnakeGameOver.duration());
    }
}
