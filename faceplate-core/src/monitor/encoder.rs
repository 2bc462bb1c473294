//! Rotary encoder decoding
//!
//! Decodes quadrature signals with a state machine for reliable decoding
//! with noise rejection, and reports accumulated detents once per
//! `process` call together with start/stop activity events.

use faceplate_hal::EncoderBackend;

use super::Elapsed;
use crate::channel::EventChannel;
use crate::config::EncoderMonitorConfig;
use crate::event::ControlId;

/// Quadrature decoder states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

#[derive(Debug, Clone, Copy)]
struct EncoderState {
    phase: Phase,
    levels: Option<(bool, bool)>,
    unchanged_for: u32,
    active: bool,
}

impl EncoderState {
    const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            levels: None,
            unchanged_for: 0,
            active: false,
        }
    }

    /// Advance the decoder with new channel levels
    ///
    /// Quadrature encoding:
    /// CW:  A leads B (A changes first when rotating clockwise)
    /// CCW: B leads A (B changes first when rotating counter-clockwise)
    ///
    /// CW:  Idle (1,1) -> CwStep1 (0,1) -> CwStep2 (0,0) -> +1 -> Idle
    /// CCW: Idle (1,1) -> CcwStep1 (1,0) -> CcwStep2 (0,0) -> -1 -> Idle
    fn decode(&mut self, a: bool, b: bool) -> i16 {
        match self.phase {
            Phase::Idle => {
                if !a && b {
                    self.phase = Phase::CwStep1;
                } else if a && !b {
                    self.phase = Phase::CcwStep1;
                }
                0
            }
            Phase::CwStep1 | Phase::CcwStep1 => {
                if !a && !b {
                    self.phase = if self.phase == Phase::CwStep1 {
                        Phase::CwStep2
                    } else {
                        Phase::CcwStep2
                    };
                } else if a && b {
                    // Bounce back to rest
                    self.phase = Phase::Idle;
                }
                0
            }
            Phase::CwStep2 if a || b => {
                self.phase = Phase::Idle;
                1
            }
            Phase::CcwStep2 if a || b => {
                self.phase = Phase::Idle;
                -1
            }
            Phase::CwStep2 | Phase::CcwStep2 => 0,
        }
    }
}

/// Decodes `N` quadrature encoders and posts turn and activity events
pub struct EncoderMonitor<'a, B, const N: usize> {
    channel: &'a EventChannel,
    backend: B,
    config: EncoderMonitorConfig,
    encoders: [EncoderState; N],
    elapsed: Elapsed,
}

impl<'a, B: EncoderBackend, const N: usize> EncoderMonitor<'a, B, N> {
    pub fn new(channel: &'a EventChannel, backend: B, config: EncoderMonitorConfig) -> Self {
        Self {
            channel,
            backend,
            config,
            encoders: [EncoderState::new(); N],
            elapsed: Elapsed::default(),
        }
    }

    /// Sample every encoder once
    ///
    /// Should be called every 1-5 ms; slower polling loses detents.
    pub fn process(&mut self, now: u32) {
        let elapsed = self.elapsed.advance(now);

        for index in 0..N {
            let id = index as ControlId;
            let (a, b) = self.backend.levels(id);
            let state = &mut self.encoders[index];

            let increments = match state.levels {
                Some(previous) if previous != (a, b) => state.decode(a, b),
                _ => 0,
            };
            state.levels = Some((a, b));

            if increments != 0 {
                state.unchanged_for = 0;
                if !state.active {
                    state.active = true;
                    self.channel.enqueue_encoder_activity(id, true);
                }
                self.channel
                    .enqueue_encoder_turned(id, increments, self.config.steps_per_revolution);
            } else if state.active {
                state.unchanged_for = state.unchanged_for.saturating_add(elapsed);
                if state.unchanged_for >= self.config.activity_timeout {
                    state.active = false;
                    self.channel.enqueue_encoder_activity(id, false);
                }
            }
        }
    }

    /// Check if encoder `id` is currently reported as turning
    pub fn is_active(&self, id: ControlId) -> bool {
        self.encoders
            .get(id as usize)
            .is_some_and(|state| state.active)
    }

    pub const fn num_controls(&self) -> usize {
        N
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
