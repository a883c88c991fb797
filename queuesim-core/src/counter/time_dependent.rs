use super::{Counter, CounterError, ensure_len};
use crate::time::SimTime;

/// Counter of values weighted by their duration.
///
/// Every time a value is counted it is paired with the time elapsed
/// since the previous count. The mean is then the time-weighted average
/// over the whole observation window (from the creation, or last
/// [`reset`](Counter::reset), to the last count).
///
/// This is what is needed for quantities like the queue length or the
/// server occupancy which hold a value for a certain amount of time.
///
/// ```
/// # use queuesim_core::{SimTime, counter::{Counter, TimeDependentCounter}};
/// let mut counter = TimeDependentCounter::new("queue length");
/// counter.count(SimTime::from_secs(1), 5.0);
/// counter.count(SimTime::from_secs(3), 9.0);
///
/// // (1 * 5 + 2 * 9) / 3
/// assert_eq!(counter.mean().unwrap(), 23.0 / 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeDependentCounter {
    name: String,
    first_timestamp: SimTime,
    last_timestamp: SimTime,

    /// `(duration in seconds, value)`
    values: Vec<(f64, f64)>,
}

impl TimeDependentCounter {
    /// create a counter whose observation window starts at
    /// [`SimTime::ZERO`].
    pub fn new(name: impl Into<String>) -> Self {
        Self::starting_at(name, SimTime::ZERO)
    }

    /// create a counter whose observation window starts at `now`.
    pub fn starting_at(name: impl Into<String>, now: SimTime) -> Self {
        Self {
            name: name.into(),
            first_timestamp: now,
            last_timestamp: now,
            values: Vec::new(),
        }
    }

    /// count `value`, weighted by the time elapsed since the previous
    /// count (or since the start of the window).
    pub fn count(&mut self, now: SimTime, value: f64) {
        debug_assert!(
            self.last_timestamp <= now,
            "the simulation clock is expected to only move forward"
        );

        let duration = now.saturating_since(self.last_timestamp).as_secs_f64();
        self.values.push((duration, value));
        self.last_timestamp = self.last_timestamp.max(now);
    }

    #[inline]
    pub fn values(&self) -> &[(f64, f64)] {
        &self.values
    }

    #[inline]
    pub fn first_timestamp(&self) -> SimTime {
        self.first_timestamp
    }

    #[inline]
    pub fn last_timestamp(&self) -> SimTime {
        self.last_timestamp
    }

    /// length of the observation window, in seconds
    fn window(&self) -> Result<f64, CounterError> {
        ensure_len(&self.name, self.values.len(), 1)?;

        let window = self
            .last_timestamp
            .saturating_since(self.first_timestamp)
            .as_secs_f64();
        if window == 0.0 {
            return Err(CounterError::EmptyObservationWindow {
                name: self.name.clone(),
            });
        }
        Ok(window)
    }
}

impl Counter for TimeDependentCounter {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    /// start a new observation window at `now`
    fn reset(&mut self, now: SimTime) {
        self.first_timestamp = now;
        self.last_timestamp = now;
        self.values.clear();
    }

    fn mean(&self) -> Result<f64, CounterError> {
        let window = self.window()?;
        let weighted: f64 = self.values.iter().map(|(d, v)| d * v).sum();
        Ok(weighted / window)
    }

    fn var(&self) -> Result<f64, CounterError> {
        let window = self.window()?;
        let mean = self.mean()?;
        let weighted: f64 = self.values.iter().map(|(d, v)| d * v * v).sum();
        Ok(weighted / window - mean * mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn time_weighted_mean() {
        let mut counter = TimeDependentCounter::new("tdc");
        counter.count(SimTime::from_secs(1), 5.0);
        counter.count(SimTime::from_secs(3), 9.0);

        assert_eq!(counter.values(), &[(1.0, 5.0), (2.0, 9.0)]);
        assert!(approx(counter.mean().unwrap(), 23.0 / 3.0));
    }

    #[test]
    fn time_weighted_variance() {
        let mut counter = TimeDependentCounter::new("tdc");
        counter.count(SimTime::from_secs(1), 5.0);
        counter.count(SimTime::from_secs(3), 9.0);

        // (1 * 25 + 2 * 81) / 3 - (23 / 3)^2
        let expected = 187.0 / 3.0 - (23.0_f64 / 3.0).powi(2);
        assert!(approx(counter.var().unwrap(), expected));
        assert!(approx(counter.stddev().unwrap(), expected.sqrt()));
    }

    #[test]
    fn zero_duration_counts_weigh_nothing() {
        let mut counter = TimeDependentCounter::new("tdc");
        counter.count(SimTime::from_secs(2), 1.0);
        counter.count(SimTime::from_secs(2), 100.0);
        counter.count(SimTime::from_secs(4), 3.0);

        assert!(approx(counter.mean().unwrap(), 2.0));
    }

    #[test]
    fn empty_window() {
        let mut counter = TimeDependentCounter::starting_at("tdc", SimTime::from_secs(5));
        assert!(matches!(
            counter.mean(),
            Err(CounterError::InsufficientData { .. })
        ));

        counter.count(SimTime::from_secs(5), 1.0);
        assert_eq!(
            counter.mean(),
            Err(CounterError::EmptyObservationWindow {
                name: "tdc".to_owned()
            })
        );
        assert!(counter.report().is_insufficient_data());
    }

    #[test]
    fn reset_opens_a_new_window() {
        let mut counter = TimeDependentCounter::new("tdc");
        counter.count(SimTime::from_secs(10), 1.0);

        counter.reset(SimTime::from_secs(10));
        assert!(counter.is_empty());
        assert_eq!(counter.first_timestamp(), SimTime::from_secs(10));
        assert_eq!(counter.last_timestamp(), SimTime::from_secs(10));
        assert!(counter.mean().is_err());

        counter.count(SimTime::from_secs(12), 4.0);
        assert!(approx(counter.mean().unwrap(), 4.0));
    }
}
