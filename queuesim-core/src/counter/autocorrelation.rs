use super::{Counter, CounterError, LagReport, Report, TimeIndependentCounter, ensure_len};
use crate::{defaults::DEFAULT_MAX_LAG, time::SimTime};

/// Counter of the auto covariance and auto correlation of a series.
///
/// The lagged series is the counted series rotated by
/// `lag mod (max_lag + 1)` positions, i.e. the cycle length is
/// `max_lag + 1`. For every `lag <= max_lag` this is the usual lagged
/// pairing `(X[i - lag], X[i])`.
///
/// The rotation is never materialised, the indices are computed on the
/// fly from the recorded history.
///
/// ```
/// # use queuesim_core::counter::TimeIndependentAutocorrelationCounter;
/// let mut counter = TimeIndependentAutocorrelationCounter::with_max_lag("x", 2);
/// for value in [5.0, 5.0, 5.0, 5.0] {
///     counter.count(value);
/// }
///
/// assert_eq!(counter.auto_cov(0).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndependentAutocorrelationCounter {
    name: String,
    x: TimeIndependentCounter,
    max_lag: usize,
}

impl TimeIndependentAutocorrelationCounter {
    /// create a counter with the [`DEFAULT_MAX_LAG`]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_max_lag(name, DEFAULT_MAX_LAG)
    }

    pub fn with_max_lag(name: impl Into<String>, max_lag: usize) -> Self {
        Self {
            name: name.into(),
            x: TimeIndependentCounter::new("X"),
            max_lag,
        }
    }

    pub fn count(&mut self, x: f64) {
        self.x.count(x);
    }

    #[inline]
    pub fn x(&self) -> &TimeIndependentCounter {
        &self.x
    }

    #[inline]
    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// change the maximum lag, the cycle length becomes `max_lag + 1`
    pub fn set_max_lag(&mut self, max_lag: usize) {
        self.max_lag = max_lag;
    }

    /// auto covariance of the series at the given `lag`.
    ///
    /// With `m = n - lag` paired terms this is
    /// `(sum(X[(i - lag) mod cycle] * X[i]) - m * mean(X)^2) / m`
    /// for `i` in `lag..n`.
    ///
    /// # Errors
    ///
    /// * [`CounterError::InsufficientData`] if nothing was counted;
    /// * [`CounterError::LagOutOfRange`] if `lag` is not smaller than the
    ///   number of counted values (there would be nothing to pair).
    pub fn auto_cov(&self, lag: usize) -> Result<f64, CounterError> {
        let values = self.x.values();
        let n = values.len();
        ensure_len(&self.name, n, 1)?;
        if lag >= n {
            return Err(CounterError::LagOutOfRange {
                name: self.name.clone(),
                lag,
                available: n,
            });
        }

        let mean = self.x.mean()?;
        // shift <= lag < n
        let shift = lag % (self.max_lag + 1);

        let sum: f64 = (lag..n)
            .map(|i| values[(i + n - shift) % n] * values[i])
            .sum();
        let m = (n - lag) as f64;

        Ok((sum - m * mean * mean) / m)
    }

    /// auto correlation of the series at the given `lag`: the auto
    /// covariance normalised by the sample variance of the series.
    pub fn auto_cor(&self, lag: usize) -> Result<f64, CounterError> {
        let cov = self.auto_cov(lag)?;
        let stddev = self.x.var()?.sqrt();
        Ok(cov / (stddev * stddev))
    }

    /// covariance and correlation for every lag from `0` to `max_lag`
    /// (both included).
    pub fn lags(&self) -> Result<Vec<LagReport>, CounterError> {
        (0..=self.max_lag)
            .map(|lag| {
                Ok(LagReport {
                    lag,
                    covariance: self.auto_cov(lag)?,
                    correlation: self.auto_cor(lag)?,
                })
            })
            .collect()
    }
}

impl Counter for TimeIndependentAutocorrelationCounter {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> usize {
        self.x.len()
    }

    fn reset(&mut self, now: SimTime) {
        self.x.reset(now);
    }

    fn mean(&self) -> Result<f64, CounterError> {
        self.x.mean()
    }

    fn var(&self) -> Result<f64, CounterError> {
        self.x.var()
    }

    /// lists the covariance and correlation of every lag up to
    /// `max_lag`.
    ///
    /// While fewer than `max_lag + 1` values have been counted the
    /// lags that cannot be computed are omitted.
    fn report(&self) -> Report {
        let lags: Vec<LagReport> = (0..=self.max_lag)
            .map_while(|lag| {
                Some(LagReport {
                    lag,
                    covariance: self.auto_cov(lag).ok()?,
                    correlation: self.auto_cor(lag).ok()?,
                })
            })
            .collect();

        if lags.is_empty() {
            Report::InsufficientData {
                name: self.name.clone(),
            }
        } else {
            Report::Autocorrelation {
                name: self.name.clone(),
                lags,
            }
        }
    }
}
