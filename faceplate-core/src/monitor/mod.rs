//! Control monitors
//!
//! Each monitor samples its backend once per `process(now)` call, runs the
//! per-control detector and posts the resulting events into an
//! [`EventChannel`](crate::channel::EventChannel). `process` may run in
//! interrupt or timer context; it only touches the monitor itself, the
//! backend and the channel.

pub mod button;
pub mod encoder;
pub mod pot;

pub use button::ButtonMonitor;
pub use encoder::EncoderMonitor;
pub use pot::PotMonitor;

/// Tracks the time between successive `process` calls
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Elapsed {
    last: Option<u32>,
}

impl Elapsed {
    /// Ticks since the previous call, 0 on the first one
    pub(crate) fn advance(&mut self, now: u32) -> u32 {
        let elapsed = self.last.map_or(0, |last| now.wrapping_sub(last));
        self.last = Some(now);
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_first_call_is_zero() {
        let mut elapsed = Elapsed::default();
        assert_eq!(elapsed.advance(1234), 0);
        assert_eq!(elapsed.advance(1240), 6);
    }

    #[test]
    fn test_elapsed_wraps() {
        let mut elapsed = Elapsed::default();
        elapsed.advance(u32::MAX - 1);
        assert_eq!(elapsed.advance(3), 5);
    }
}
