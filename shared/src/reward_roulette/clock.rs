use rand::Rng;

use crate::constants::{MIN_FULL_TURNS, SPIN_DURATION_MS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinSettings {
    pub duration_ms: f64,
    /// Full rotations added before the random part of a spin.
    pub min_full_turns: u32,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            duration_ms: SPIN_DURATION_MS,
            min_full_turns: MIN_FULL_TURNS,
        }
    }
}

/// Random spin distance: `360·k + [0, 360)`.
pub fn draw_spin_angle<R: Rng + ?Sized>(rng: &mut R, settings: &SpinSettings) -> f64 {
    360.0 * settings.min_full_turns as f64 + rng.gen_range(0.0..360.0)
}

// Easing function for smooth deceleration
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Per-frame timing source. Yields a monotonic timestamp in milliseconds for
/// every frame, or `None` once the source is gone.
#[allow(async_fn_in_trait)]
pub trait FrameTicker {
    async fn next_frame(&mut self) -> Option<f64>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSample {
    pub elapsed_ms: f64,
    pub progress: f64,
    pub eased: f64,
}

/// Fixed-duration animation over a [`FrameTicker`].
///
/// The first frame marks the start. The last sample is clamped to the full
/// duration, so its `eased` value is exactly 1. A finished clock stays
/// finished; build a new one per spin.
pub struct AnimationClock<T> {
    ticker: T,
    duration_ms: f64,
    started_at: Option<f64>,
    last_elapsed: f64,
    finished: bool,
    completed: bool,
}

impl<T: FrameTicker> AnimationClock<T> {
    pub fn new(ticker: T, duration_ms: f64) -> Self {
        Self {
            ticker,
            duration_ms: duration_ms.max(0.0),
            started_at: None,
            last_elapsed: 0.0,
            finished: false,
            completed: false,
        }
    }

    pub async fn next_sample(&mut self) -> Option<ClockSample> {
        if self.finished {
            return None;
        }

        let Some(timestamp) = self.ticker.next_frame().await else {
            self.finished = true;
            return None;
        };

        let started_at = *self.started_at.get_or_insert(timestamp);
        let mut elapsed = (timestamp - started_at).max(self.last_elapsed);

        if elapsed >= self.duration_ms {
            elapsed = self.duration_ms;
            self.finished = true;
            self.completed = true;
        }
        self.last_elapsed = elapsed;

        let progress = if self.duration_ms > 0.0 {
            elapsed / self.duration_ms
        } else {
            1.0
        };

        Some(ClockSample {
            elapsed_ms: elapsed,
            progress,
            eased: ease_out_cubic(progress),
        })
    }

    /// True once the final, full-duration sample has been produced.
    pub fn is_complete(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward_roulette::test_support::ScriptedTicker;
    use futures::executor::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn drain<T: FrameTicker>(clock: &mut AnimationClock<T>) -> Vec<ClockSample> {
        block_on(async {
            let mut samples = Vec::new();
            while let Some(sample) = clock.next_sample().await {
                samples.push(sample);
            }
            samples
        })
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_samples_are_relative_and_clamped() {
        let ticker = ScriptedTicker::new(vec![1000.0, 1016.0, 2500.0, 5200.0, 6000.0]);
        let mut clock = AnimationClock::new(ticker, 4000.0);
        let samples = drain(&mut clock);

        let elapsed: Vec<_> = samples.iter().map(|s| s.elapsed_ms).collect();
        assert_eq!(elapsed, vec![0.0, 16.0, 1500.0, 4000.0]);
        assert_eq!(samples.last().map(|s| s.eased), Some(1.0));
        assert!(clock.is_complete());
        assert!(block_on(clock.next_sample()).is_none());
    }

    #[test]
    fn test_ticker_ending_early_leaves_clock_incomplete() {
        let ticker = ScriptedTicker::new(vec![0.0, 100.0]);
        let mut clock = AnimationClock::new(ticker, 4000.0);
        assert_eq!(drain(&mut clock).len(), 2);
        assert!(!clock.is_complete());
    }

    #[test]
    fn test_timestamps_never_run_backwards() {
        let ticker = ScriptedTicker::new(vec![0.0, 300.0, 200.0, 4100.0]);
        let mut clock = AnimationClock::new(ticker, 4000.0);
        let elapsed: Vec<_> = drain(&mut clock).iter().map(|s| s.elapsed_ms).collect();
        assert_eq!(elapsed, vec![0.0, 300.0, 300.0, 4000.0]);
    }

    #[test]
    fn test_spin_angle_keeps_minimum_turns() {
        let settings = SpinSettings::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let angle = draw_spin_angle(&mut rng, &settings);
            assert!((1800.0..2160.0).contains(&angle));
        }
    }
}
