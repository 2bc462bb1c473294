//! Monitor configuration types
//!
//! All timing values are in ticks of whatever monotonic clock the
//! application passes to `process(now)`; with a millisecond clock they are
//! milliseconds.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    DEFAULT_DEBOUNCE_TIMEOUT, DEFAULT_DOUBLE_CLICK_TIMEOUT, DEFAULT_ENCODER_ACTIVITY_TIMEOUT,
    DEFAULT_POT_IDLE_TIMEOUT, DEFAULT_STEPS_PER_REVOLUTION,
};

/// How the button debounce accumulator advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DebounceMode {
    /// Advance by the ticks elapsed since the previous `process` call
    #[default]
    ElapsedTime,
    /// Advance by one per `process` call; the timeout counts samples
    CallCount,
}

/// Button monitor tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonMonitorConfig {
    /// Time a new level must be held before it is accepted (0 disables)
    pub debounce_timeout: u16,
    /// Maximum gap between presses that still counts as a multi-click
    pub double_click_timeout: u32,
    /// Unit of `debounce_timeout`
    pub debounce_mode: DebounceMode,
}

impl Default for ButtonMonitorConfig {
    fn default() -> Self {
        Self {
            debounce_timeout: DEFAULT_DEBOUNCE_TIMEOUT,
            double_click_timeout: DEFAULT_DOUBLE_CLICK_TIMEOUT,
            debounce_mode: DebounceMode::ElapsedTime,
        }
    }
}

/// Potentiometer monitor tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PotMonitorConfig {
    /// Time without movement after which a pot is reported idle
    pub idle_timeout: u32,
    /// Change needed to wake an idle pot
    pub dead_band_idle: f32,
    /// Change needed to report a new position while moving
    pub dead_band_moving: f32,
}

impl Default for PotMonitorConfig {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_POT_IDLE_TIMEOUT,
            dead_band_idle: 1.0 / 1024.0,
            dead_band_moving: 1.0 / 4096.0,
        }
    }
}

/// Rotary encoder monitor tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderMonitorConfig {
    /// Detents per full revolution, forwarded with every turn event
    pub steps_per_revolution: u16,
    /// Time without detents after which an encoder is reported inactive
    pub activity_timeout: u32,
}

impl Default for EncoderMonitorConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            activity_timeout: DEFAULT_ENCODER_ACTIVITY_TIMEOUT,
        }
    }
}
