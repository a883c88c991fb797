/// Default maximum lag of a [`TimeIndependentAutocorrelationCounter`].
///
/// The cycle length used to rotate the series is `max_lag + 1`.
///
/// ```
/// # use queuesim_core::{counter::TimeIndependentAutocorrelationCounter, defaults::*};
/// let counter = TimeIndependentAutocorrelationCounter::new("waiting time");
/// assert_eq!(counter.max_lag(), DEFAULT_MAX_LAG);
/// ```
///
/// [`TimeIndependentAutocorrelationCounter`]: crate::counter::TimeIndependentAutocorrelationCounter
pub const DEFAULT_MAX_LAG: usize = 10;

/// Default significance used for confidence intervals, i.e. a 95%
/// confidence level.
///
/// See [`TimeIndependentCounter::report_confidence_interval`].
///
/// [`TimeIndependentCounter::report_confidence_interval`]: crate::counter::TimeIndependentCounter::report_confidence_interval
pub const DEFAULT_ALPHA: f64 = 0.05;
