//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Drops popped by a correct answer
    Pop,
    /// Golden drop cleared the board
    Jackpot,
    /// Answer matched nothing
    Penalty,
    /// A drop fell into the sea
    Splash,
    /// Sea reached the top
    GameOver,
    /// New best score
    BestScore,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
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
            SoundEffect::Pop => self.play_pop(ctx, vol),
            SoundEffect::Jackpot => self.play_jackpot(ctx, vol),
            SoundEffect::Penalty => self.play_penalty(ctx, vol),
            SoundEffect::Splash => self.play_splash(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
            SoundEffect::BestScore => self.play_best_score(ctx, vol),
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

    /// Pop - bright upward chirp
    fn play_pop(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(600.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Jackpot - ascending arpeggio
    fn play_jackpot(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [500.0, 650.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }

    /// Penalty - short downward buzz
    fn play_penalty(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.18)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Splash - dull sinking plunk
    fn play_splash(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.01, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.35, t + 0.03)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(80.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [380.0, 320.0, 260.0, 160.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Best score - celebratory run
    fn play_best_score(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [520.0, 620.0, 780.0, 1040.0].iter().enumerate() {
            let delay = i as f64 * 0.09;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }
}
