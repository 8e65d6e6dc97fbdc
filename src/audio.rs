//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is a single oscillator with an exponential gain envelope.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Food eaten
    Eat,
    /// Run ended
    GameOver,
    /// Direction changed
    Turn,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
}

/// Gain floor for exponential ramps (they can't reach zero)
pub const SILENCE: f32 = 0.0001;

/// One synthesized tone, times in seconds from the start of playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub freq: f32,
    /// Exponential pitch sweep target and its duration
    pub sweep: Option<(f32, f64)>,
    pub peak_gain: f32,
    /// Time to reach peak gain
    pub attack: f64,
    /// Time gain is back at `SILENCE`
    pub release: f64,
    /// Oscillator stop time
    pub stop: f64,
}

impl SoundEffect {
    /// Sound for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Ate { .. } => Some(SoundEffect::Eat),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::Turn { .. } => Some(SoundEffect::Turn),
            GameEvent::SpeedChanged { .. }
            | GameEvent::PauseChanged { .. }
            | GameEvent::Restarted => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            // Short bright blip
            SoundEffect::Eat => Tone {
                waveform: Waveform::Sine,
                freq: 800.0,
                sweep: None,
                peak_gain: 0.12,
                attack: 0.01,
                release: 0.15,
                stop: 0.16,
            },
            // Falling buzz
            SoundEffect::GameOver => Tone {
                waveform: Waveform::Sawtooth,
                freq: 300.0,
                sweep: Some((80.0, 0.5)),
                peak_gain: 0.18,
                attack: 0.02,
                release: 0.6,
                stop: 0.62,
            },
            // Tick
            SoundEffect::Turn => Tone {
                waveform: Waveform::Sine,
                freq: 1200.0,
                sweep: None,
                peak_gain: 0.06,
                attack: 0.005,
                release: 0.05,
                stop: 0.06,
            },
        }
    }
}

impl Tone {
    /// Peak gain at a given volume, never below the ramp floor
    pub fn scaled_peak(&self, volume: f32) -> f32 {
        (self.peak_gain * volume.clamp(0.0, 1.0)).max(SILENCE)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{SILENCE, SoundEffect, Tone, Waveform};
    use crate::game::EventListener;
    use crate::sim::GameEvent;

    /// Audio manager for the game. Clones share the context and unlock state.
    #[derive(Clone)]
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        unlocked: Rc<Cell<bool>>,
        volume: f32,
    }

    impl AudioManager {
        /// `volume` is fixed for the session (settings are read once)
        pub fn new(volume: f32) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                unlocked: Rc::new(Cell::new(false)),
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Resume the context on the first user gesture (browser autoplay rules)
        pub fn unlock(&self) {
            let Some(ctx) = &self.ctx else { return };
            if self.unlocked.get() {
                return;
            }
            if ctx.state() != AudioContextState::Suspended {
                self.unlocked.set(true);
                return;
            }
            match ctx.resume() {
                Ok(promise) => {
                    let unlocked = self.unlocked.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        if let Err(e) = JsFuture::from(promise).await {
                            log::debug!("AudioContext resume rejected: {:?}", e);
                        }
                        unlocked.set(true);
                    });
                }
                Err(e) => {
                    log::debug!("AudioContext resume failed: {:?}", e);
                    self.unlocked.set(true);
                }
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 || !self.unlocked.get() {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            if self.play_tone(ctx, &effect.tone()).is_none() {
                log::debug!("Failed to play {:?}", effect);
            }
        }

        /// Create an oscillator routed through a gain node
        fn create_osc(
            &self,
            ctx: &AudioContext,
            tone: &Tone,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            });
            osc.frequency().set_value(tone.freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone) -> Option<()> {
            let (osc, gain) = self.create_osc(ctx, tone)?;
            let t = ctx.current_time();

            if let Some((target, duration)) = tone.sweep {
                osc.frequency().set_value_at_time(tone.freq, t).ok()?;
                osc.frequency()
                    .exponential_ramp_to_value_at_time(target, t + duration)
                    .ok()?;
            }

            gain.gain().set_value_at_time(SILENCE, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(tone.scaled_peak(self.volume), t + tone.attack)
                .ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(SILENCE, t + tone.release)
                .ok()?;

            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + tone.stop).ok()?;
            Some(())
        }
    }

    impl EventListener for AudioManager {
        fn on_event(&mut self, event: &GameEvent) {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Cell, Direction, GameOverReason};

    #[test]
    fn test_event_sounds() {
        let ate = GameEvent::Ate {
            score: 3,
            at: Cell::new(1, 1),
        };
        let over = GameEvent::GameOver {
            score: 3,
            reason: GameOverReason::SelfCollision,
        };
        let turn = GameEvent::Turn {
            direction: Direction::Up,
        };
        assert_eq!(SoundEffect::for_event(&ate), Some(SoundEffect::Eat));
        assert_eq!(SoundEffect::for_event(&over), Some(SoundEffect::GameOver));
        assert_eq!(SoundEffect::for_event(&turn), Some(SoundEffect::Turn));
        assert_eq!(SoundEffect::for_event(&GameEvent::Restarted), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::SpeedChanged { interval_ms: 92 }),
            None
        );
    }

    #[test]
    fn test_envelopes_are_ordered() {
        for effect in [SoundEffect::Eat, SoundEffect::GameOver, SoundEffect::Turn] {
            let tone = effect.tone();
            assert!(tone.attack < tone.release, "{:?}", effect);
            assert!(tone.release < tone.stop, "{:?}", effect);
            if let Some((_, sweep)) = tone.sweep {
                assert!(sweep <= tone.stop);
            }
        }
    }

    #[test]
    fn test_scaled_peak() {
        let tone = SoundEffect::Eat.tone();
        assert!((tone.scaled_peak(1.0) - 0.12).abs() < 1e-6);
        assert!((tone.scaled_peak(0.5) - 0.06).abs() < 1e-6);
        assert_eq!(tone.scaled_peak(0.0), SILENCE);
    }
}
