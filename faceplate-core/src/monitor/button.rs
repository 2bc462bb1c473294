//! Button debouncing and multi-click detection
//!
//! Each button keeps a signed accumulator bounded to
//! `[-debounce_timeout, +debounce_timeout]`. The negative bound is the
//! settled released state, the positive bound the settled pressed state.
//! While the raw level disagrees with the settled level the accumulator
//! walks toward the opposite bound, starting from the midpoint on the first
//! disagreeing sample. A sample that agrees again snaps it back, so bounces
//! shorter than the timeout never produce an event.

use faceplate_hal::ButtonBackend;

use super::Elapsed;
use crate::channel::EventChannel;
use crate::config::{ButtonMonitorConfig, DebounceMode};
use crate::event::ControlId;

#[derive(Debug, Clone, Copy)]
struct ButtonState {
    accumulator: i32,
    pressed: bool,
    last_press: Option<u32>,
    presses: u8,
}

impl ButtonState {
    const fn released(timeout: i32) -> Self {
        Self {
            accumulator: -timeout,
            pressed: false,
            last_press: None,
            presses: 0,
        }
    }
}

/// Debounces `N` buttons and posts press/release events
pub struct ButtonMonitor<'a, B, const N: usize> {
    channel: &'a EventChannel,
    backend: B,
    config: ButtonMonitorConfig,
    buttons: [ButtonState; N],
    elapsed: Elapsed,
}

impl<'a, B: ButtonBackend, const N: usize> ButtonMonitor<'a, B, N> {
    /// Create a monitor with all buttons settled as released
    pub fn new(channel: &'a EventChannel, backend: B, config: ButtonMonitorConfig) -> Self {
        let timeout = i32::from(config.debounce_timeout);
        Self {
            channel,
            backend,
            config,
            buttons: [ButtonState::released(timeout); N],
            elapsed: Elapsed::default(),
        }
    }

    /// Sample every button once
    ///
    /// `now` is a monotonic tick count; it may wrap.
    pub fn process(&mut self, now: u32) {
        let elapsed = self.elapsed.advance(now);
        let step = match self.config.debounce_mode {
            DebounceMode::ElapsedTime => i32::try_from(elapsed).unwrap_or(i32::MAX),
            DebounceMode::CallCount => 1,
        };

        for index in 0..N {
            let raw = self.backend.is_pressed(index as ControlId);
            self.update(index, raw, step, now);
        }
    }

    fn update(&mut self, index: usize, raw: bool, step: i32, now: u32) {
        let timeout = i32::from(self.config.debounce_timeout);
        let state = &mut self.buttons[index];

        if raw == state.pressed {
            state.accumulator = if state.pressed { timeout } else { -timeout };
            return;
        }

        let on_settled_side = if state.pressed {
            state.accumulator > 0
        } else {
            state.accumulator < 0
        };

        state.accumulator = if on_settled_side {
            0
        } else if raw {
            state.accumulator.saturating_add(step).min(timeout)
        } else {
            state.accumulator.saturating_sub(step).max(-timeout)
        };

        let target = if raw { timeout } else { -timeout };
        if state.accumulator != target {
            return;
        }

        state.pressed = raw;
        let id = index as ControlId;
        if raw {
            state.presses = match state.last_press {
                Some(previous) if now.wrapping_sub(previous) <= self.config.double_click_timeout => {
                    state.presses.saturating_add(1)
                }
                _ => 1,
            };
            state.last_press = Some(now);
            self.channel.enqueue_button_pressed(id, state.presses);
        } else {
            self.channel.enqueue_button_released(id);
        }
    }

    /// Settled state of button `id`; false for ids out of range
    pub fn is_pressed(&self, id: ControlId) -> bool {
        self.buttons
            .get(id as usize)
            .is_some_and(|state| state.pressed)
    }

    pub const fn num_controls(&self) -> usize {
        N
    }

    pub fn config(&self) -> &ButtonMonitorConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
