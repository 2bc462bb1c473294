//! GPIO backed control sources
//!
//! Adapters that turn arrays of `embedded-hal` digital input pins into
//! button and encoder backends. A pin read error is reported as the
//! inactive level, so a flaky pin looks like a released button rather
//! than stalling the sampling loop.

use embedded_hal::digital::InputPin;

use crate::input::{ButtonBackend, EncoderBackend};

/// Electrical level that means "pressed"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pressed pulls the pin low (switch to ground, pull-up enabled)
    #[default]
    ActiveLow,
    /// Pressed drives the pin high
    ActiveHigh,
}

/// Button backend over a fixed set of input pins
///
/// Button `id` maps to `pins[id]`.
pub struct PinButtons<P, const N: usize> {
    pins: [P; N],
    polarity: Polarity,
}

impl<P: InputPin, const N: usize> PinButtons<P, N> {
    /// Wrap `pins` using the given polarity
    pub fn new(pins: [P; N], polarity: Polarity) -> Self {
        Self { pins, polarity }
    }

    /// Release the wrapped pins
    pub fn free(self) -> [P; N] {
        self.pins
    }
}

impl<P: InputPin, const N: usize> ButtonBackend for PinButtons<P, N> {
    fn is_pressed(&mut self, id: u16) -> bool {
        let Some(pin) = self.pins.get_mut(id as usize) else {
            return false;
        };
        let reading = match self.polarity {
            Polarity::ActiveLow => pin.is_low(),
            Polarity::ActiveHigh => pin.is_high(),
        };
        reading.unwrap_or(false)
    }
}

/// Encoder backend over pairs of quadrature input pins
///
/// Encoder `id` maps to `channels[id] = (a, b)`. Levels are reported as
/// read; the decoder in `faceplate-core` does not care about polarity.
pub struct PinEncoders<P, const N: usize> {
    channels: [(P, P); N],
}

impl<P: InputPin, const N: usize> PinEncoders<P, N> {
    /// Wrap `channels` as (A, B) pin pairs
    pub fn new(channels: [(P, P); N]) -> Self {
        Self { channels }
    }

    /// Release the wrapped pins
    pub fn free(self) -> [(P, P); N] {
        self.channels
    }
}

impl<P: InputPin, const N: usize> EncoderBackend for PinEncoders<P, N> {
    fn levels(&mut self, id: u16) -> (bool, bool) {
        match self.channels.get_mut(id as usize) {
            Some((a, b)) => (a.is_high().unwrap_or(true), b.is_high().unwrap_or(true)),
            None => (true, true),
        }
    }
}
