//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Prey caught
    Capture,
    /// Session started
    Start,
    /// Pause toggled
    Pause,
    /// New best catch count
    HighScore,
}

/// Handles for the looping ambient pad while it plays
struct AmbientLoop {
    low: OscillatorNode,
    high: OscillatorNode,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    ambient: Option<AmbientLoop>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context; the game plays on without sound
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            ambient: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
        }
    }

    /// Whether the context exists and is allowed to produce sound
    pub fn is_ready(&self) -> bool {
        self.ctx
            .as_ref()
            .is_some_and(|ctx| ctx.state() == web_sys::AudioContextState::Running)
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(ambient) = &self.ambient {
            let target = if muted {
                0.0
            } else {
                self.master_volume * self.music_volume * 0.15
            };
            ambient.gain.gain().set_value(target);
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a one-shot sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Capture => self.play_capture(ctx, vol),
            SoundEffect::Start => self.play_start(ctx, vol),
            SoundEffect::Pause => self.play_pause_blip(ctx, vol),
            SoundEffect::HighScore => self.play_high_score(ctx, vol),
        }
    }

    /// Start the looping ambient pad, or un-duck it if already running
    pub fn ambient_play(&mut self) {
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let target = if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume * 0.15
        };

        if let Some(ambient) = &self.ambient {
            let t = ctx.current_time();
            ambient.gain.gain().set_value_at_time(0.001, t).ok();
            ambient
                .gain
                .gain()
                .exponential_ramp_to_value_at_time(target.max(0.001), t + 0.5)
                .ok();
            return;
        }

        // Two detuned sines make a slow airy pad
        let Some((low, gain)) = self.create_osc(ctx, 110.0, OscillatorType::Sine) else {
            return;
        };
        let Ok(high) = ctx.create_oscillator() else {
            return;
        };
        high.set_type(OscillatorType::Sine);
        high.frequency().set_value(165.5);
        if high.connect_with_audio_node(&gain).is_err() {
            return;
        }

        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.001, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(target.max(0.001), t + 1.5)
            .ok();

        low.start().ok();
        high.start().ok();
        self.ambient = Some(AmbientLoop { low, high, gain });
    }

    /// Duck the ambient pad to silence without tearing it down
    pub fn ambient_pause(&self) {
        let (Some(ctx), Some(ambient)) = (&self.ctx, &self.ambient) else {
            return;
        };
        let t = ctx.current_time();
        ambient.gain.gain().set_value_at_time(0.001, t + 0.3).ok();
    }

    /// Stop and release the ambient pad
    pub fn ambient_stop(&mut self) {
        if let Some(ambient) = self.ambient.take() {
            ambient.low.stop().ok();
            ambient.high.stop().ok();
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
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

    /// Capture - bright rising chirp with a sparkle on top
    fn play_capture(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 500.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(500.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(1200.0, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 1800.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(vol * 0.15, t + 0.08).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(1800.0, t + 0.08).ok();
            osc.frequency().set_value_at_time(2400.0, t + 0.12).ok();
            osc.start_with_when(t + 0.08).ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }

    /// Start - two-note upward cue
    fn play_start(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                .ok();
            osc.frequency().set_value_at_time(440.0, t).ok();
            osc.frequency().set_value_at_time(660.0, t + 0.15).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.4).ok();
        }
    }

    /// Pause - short muted blip
    fn play_pause_blip(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// New best score - little ascending fanfare
    fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let notes = [523.0_f32, 659.0, 784.0, 1047.0];

        for (i, freq) in notes.iter().enumerate() {
            let start = t + i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(vol * 0.3, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.2)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.25).ok();
            }
        }
    }
}
