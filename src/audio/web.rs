//! Audio playback using the Web Audio API

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{SILENCE, SoundEffect, Tone, Waveform};

impl From<Waveform> for OscillatorType {
    fn from(waveform: Waveform) -> Self {
        match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Triangle => OscillatorType::Triangle,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
        }
    }
}

/// Audio manager for the site
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    /// `volume` is the effective 0.0 - 1.0 level (0 when muted)
    pub fn new(volume: f32) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Resume a suspended context. Browsers only allow this after a user
    /// gesture.
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx
            && ctx.state() == web_sys::AudioContextState::Suspended
        {
            let _ = ctx.resume();
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        self.resume();
        let Some(ctx) = &self.ctx else { return };

        for tone in effect.tones() {
            self.play_tone(ctx, tone);
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
        let Some((osc, gain)) = self.create_osc(ctx, tone.freq, tone.waveform.into()) else {
            return;
        };
        let t = ctx.current_time() + tone.delay;

        gain.gain().set_value_at_time(self.volume * tone.gain, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(SILENCE, t + tone.decay)
            .ok();
        if let Some(freq_end) = tone.freq_end {
            osc.frequency().set_value_at_time(tone.freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(freq_end, t + tone.decay)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + tone.stop).ok();
    }
}
