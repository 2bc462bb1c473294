//! Potentiometer movement detection
//!
//! A pot is either idle or moving. An idle pot needs a larger change
//! (`dead_band_idle`) to wake up than a moving pot needs to report a new
//! position (`dead_band_moving`), which keeps ADC noise from producing a
//! stream of events while still tracking slow, deliberate turns. A pot
//! that reports nothing new for `idle_timeout` ticks goes back to idle.

use faceplate_hal::PotBackend;

use super::Elapsed;
use crate::channel::EventChannel;
use crate::config::PotMonitorConfig;
use crate::event::ControlId;

#[derive(Debug, Clone, Copy)]
struct PotState {
    last_value: f32,
    unchanged_for: u32,
}

/// Watches `N` pots and posts movement and activity events
pub struct PotMonitor<'a, B, const N: usize> {
    channel: &'a EventChannel,
    backend: B,
    config: PotMonitorConfig,
    pots: [PotState; N],
    elapsed: Elapsed,
}

fn exceeds(delta: f32, band: f32) -> bool {
    delta > band || delta < -band
}

impl<'a, B: PotBackend, const N: usize> PotMonitor<'a, B, N> {
    /// Create a monitor with every pot idle at position 0
    pub fn new(channel: &'a EventChannel, backend: B, config: PotMonitorConfig) -> Self {
        let idle = PotState {
            last_value: 0.0,
            unchanged_for: config.idle_timeout,
        };
        Self {
            channel,
            backend,
            config,
            pots: [idle; N],
            elapsed: Elapsed::default(),
        }
    }

    /// Sample every pot once
    pub fn process(&mut self, now: u32) {
        let elapsed = self.elapsed.advance(now);

        for index in 0..N {
            let id = index as ControlId;
            let value = self.backend.value(id);
            let idle_timeout = self.config.idle_timeout;
            let state = &mut self.pots[index];
            let delta = value - state.last_value;

            if state.unchanged_for < idle_timeout {
                if exceeds(delta, self.config.dead_band_moving) {
                    state.last_value = value;
                    state.unchanged_for = 0;
                    self.channel.enqueue_pot_moved(id, value);
                } else {
                    state.unchanged_for = state.unchanged_for.saturating_add(elapsed);
                    if state.unchanged_for >= idle_timeout {
                        self.channel.enqueue_pot_activity(id, false);
                    }
                }
            } else if exceeds(delta, self.config.dead_band_idle) {
                state.last_value = value;
                state.unchanged_for = 0;
                self.channel.enqueue_pot_activity(id, true);
                self.channel.enqueue_pot_moved(id, value);
            }
        }
    }

    /// Last reported position of pot `id`, or -1.0 for ids out of range
    pub fn current_value(&self, id: ControlId) -> f32 {
        self.pots
            .get(id as usize)
            .map_or(-1.0, |state| state.last_value)
    }

    /// Check if pot `id` is currently reported as moving
    pub fn is_moving(&self, id: ControlId) -> bool {
        self.pots
            .get(id as usize)
            .is_some_and(|state| state.unchanged_for < self.config.idle_timeout)
    }

    pub const fn num_controls(&self) -> usize {
        N
    }

    pub fn config(&self) -> &PotMonitorConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use proptest::prelude::*;

    struct Positions<const N: usize>([f32; N]);

    impl<const N: usize> PotBackend for Positions<N> {
        fn value(&mut self, id: u16) -> f32 {
            self.0[id as usize]
        }
    }

    fn config() -> PotMonitorConfig {
        PotMonitorConfig {
            idle_timeout: 100,
            dead_band_idle: 0.01,
            dead_band_moving: 0.001,
        }
    }

    fn monitor_for<const N: usize>(
        channel: &EventChannel,
        positions: [f32; N],
    ) -> PotMonitor<'_, Positions<N>, N> {
        PotMonitor::new(channel, Positions(positions), config())
    }

    #[test]
    fn test_starts_idle_at_zero() {
        let channel = EventChannel::new();
        let monitor = monitor_for(&channel, [0.0; 2]);
        assert!(!monitor.is_moving(0));
        assert_eq!(monitor.current_value(1), 0.0);
        assert_eq!(monitor.current_value(2), -1.0);
        assert_eq!(monitor.num_controls(), 2);
    }

    #[test]
    fn test_idle_dead_band() {
        let channel = EventChannel::new();
        let mut monitor = monitor_for(&channel, [0.005]);

        monitor.process(0);
        assert!(channel.is_empty());

        monitor.backend_mut().0[0] = 0.5;
        monitor.process(10);
        assert_eq!(
            channel.dequeue(),
            Some(Event::PotActivityChanged { id: 0, active: true })
        );
        assert_eq!(channel.dequeue(), Some(Event::PotMoved { id: 0, position: 0.5 }));
        assert!(monitor.is_moving(0));
        assert_eq!(monitor.current_value(0), 0.5);
    }

    #[test]
    fn test_moving_dead_band() {
        let channel = EventChannel::new();
        let mut monitor = monitor_for(&channel, [0.5]);
        monitor.process(0);
        channel.clear();

        // Below the moving band: ignored
        monitor.backend_mut().0[0] = 0.5005;
        monitor.process(1);
        assert!(channel.is_empty());

        // Above the moving band, below the idle band: reported
        monitor.backend_mut().0[0] = 0.505;
        monitor.process(2);
        assert_eq!(
            channel.dequeue(),
            Some(Event::PotMoved {
                id: 0,
                position: 0.505
            })
        );

        monitor.backend_mut().0[0] = 0.4;
        monitor.process(3);
        assert_eq!(channel.dequeue(), Some(Event::PotMoved { id: 0, position: 0.4 }));
    }

    #[test]
    fn test_single_idle_event() {
        let channel = EventChannel::new();
        let mut monitor = monitor_for(&channel, [0.7]);
        monitor.process(0);
        channel.clear();

        for now in (10..=90).step_by(10) {
            monitor.process(now);
        }
        assert!(channel.is_empty());
        assert!(monitor.is_moving(0));

        monitor.process(100);
        assert_eq!(
            channel.dequeue(),
            Some(Event::PotActivityChanged { id: 0, active: false })
        );
        assert!(!monitor.is_moving(0));

        for now in (110..500).step_by(10) {
            monitor.process(now);
        }
        assert!(channel.is_empty());
    }

    #[test]
    fn test_movement_resets_idle_timer() {
        let channel = EventChannel::new();
        let mut monitor = monitor_for(&channel, [0.2]);
        monitor.process(0);
        monitor.process(80);
        monitor.backend_mut().0[0] = 0.3;
        monitor.process(90);
        channel.clear();

        monitor.process(180);
        assert!(channel.is_empty());
        monitor.process(190);
        assert_eq!(
            channel.dequeue(),
            Some(Event::PotActivityChanged { id: 0, active: false })
        );
    }

    proptest! {
        #[test]
        fn prop_noise_inside_idle_band_is_silent(
            samples in proptest::collection::vec(-0.0099f32..0.0099, 1..50)
        ) {
            let channel = EventChannel::new();
            let mut monitor = monitor_for(&channel, [0.0]);

            for (now, sample) in samples.into_iter().enumerate() {
                monitor.backend_mut().0[0] = sample;
                monitor.process(now as u32 * 10);
            }

            prop_assert!(channel.is_empty());
            prop_assert!(!monitor.is_moving(0));
        }
    }
}
