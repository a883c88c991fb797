use super::{Counter, CounterError, ensure_len};
use crate::time::SimTime;
use statrs::distribution::{ContinuousCDF as _, StudentsT};

/// Counter of values independent of their duration.
///
/// Each counted value has the same weight. The variance is the
/// *sample* variance (Bessel-corrected, divided by `n - 1`).
///
/// ```
/// # use queuesim_core::counter::{Counter, TimeIndependentCounter};
/// let mut counter = TimeIndependentCounter::new("waiting time");
/// for value in [2.0, 4.0, 6.0] {
///     counter.count(value);
/// }
///
/// assert_eq!(counter.mean().unwrap(), 4.0);
/// assert_eq!(counter.var().unwrap(), 4.0);
/// assert_eq!(counter.stddev().unwrap(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndependentCounter {
    name: String,
    values: Vec<f64>,
}

impl TimeIndependentCounter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn count(&mut self, value: f64) {
        self.values.push(value);
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Half width of the two-sided confidence interval of the mean, at
    /// the confidence level `1 - alpha`.
    ///
    /// The interval is built from the Student-t distribution with `n - 1`
    /// degrees of freedom, located at the mean and scaled by the standard
    /// error `sqrt(var / n)`. The half width is its `1 - alpha / 2`
    /// quantile minus the mean.
    ///
    /// If all the values are identical the standard error is `0` and so
    /// is the half width.
    ///
    /// # Errors
    ///
    /// * [`CounterError::InsufficientData`] with fewer than 2 values;
    /// * [`CounterError::InvalidAlpha`] if `alpha` is not in `(0, 1)`.
    pub fn report_confidence_interval(&self, alpha: f64) -> Result<f64, CounterError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(CounterError::InvalidAlpha(alpha));
        }
        let mean = self.mean()?;
        let var = self.var()?;

        let n = self.values.len() as f64;
        let standard_error = (var / n).sqrt();
        if standard_error == 0.0 {
            return Ok(0.0);
        }

        let t = StudentsT::new(mean, standard_error, n - 1.0)
            .map_err(|error| CounterError::Distribution(error.to_string()))?;
        let half_width = t.inverse_cdf(1.0 - alpha / 2.0) - mean;

        tracing::debug!(
            counter = %self.name,
            alpha,
            mean,
            half_width,
            "confidence interval"
        );

        Ok(half_width)
    }

    /// Check whether `x` lies strictly inside the confidence interval of
    /// the mean.
    ///
    /// `alpha` is handed as is to [`report_confidence_interval`], where it
    /// is the *significance* (the interval has level `1 - alpha`). Callers
    /// of this method have historically passed the confidence level
    /// instead (e.g. `0.95`), which yields a much narrower interval.
    ///
    /// When the interval collapses to a single point (all values equal)
    /// it is empty and nothing, not even the mean, is strictly inside.
    ///
    /// [`report_confidence_interval`]: Self::report_confidence_interval
    pub fn is_in_confidence_interval(&self, x: f64, alpha: f64) -> Result<bool, CounterError> {
        let half_width = self.report_confidence_interval(alpha)?;
        let mean = self.mean()?;

        Ok(x > mean - half_width && x < mean + half_width)
    }
}

impl Counter for TimeIndependentCounter {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn reset(&mut self, _now: SimTime) {
        self.values.clear();
    }

    fn mean(&self) -> Result<f64, CounterError> {
        ensure_len(&self.name, self.values.len(), 1)?;
        Ok(self.sum() / self.values.len() as f64)
    }

    fn var(&self) -> Result<f64, CounterError> {
        ensure_len(&self.name, self.values.len(), 2)?;
        let mean = self.mean()?;

        let squares: f64 = self.values.iter().map(|v| (v - mean).powi(2)).sum();
        Ok(squares / (self.values.len() - 1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::Report;

    fn counter(values: &[f64]) -> TimeIndependentCounter {
        let mut counter = TimeIndependentCounter::new("tic");
        for value in values {
            counter.count(*value);
        }
        counter
    }

    #[test]
    fn sample_statistics() {
        let counter = counter(&[2.0, 4.0, 6.0]);

        assert_eq!(counter.len(), 3);
        assert_eq!(counter.mean(), Ok(4.0));
        assert_eq!(counter.var(), Ok(4.0));
        assert_eq!(counter.stddev(), Ok(2.0));
    }

    #[test]
    fn variance_uses_bessel_correction() {
        let counter = counter(&[1.0, 3.0]);
        // population variance would be 1.0
        assert_eq!(counter.var(), Ok(2.0));
    }

    #[test]
    fn empty_counter_has_insufficient_data() {
        let counter = counter(&[]);

        assert_eq!(
            counter.mean(),
            Err(CounterError::InsufficientData {
                name: "tic".to_owned(),
                required: 1,
                available: 0,
            })
        );
        assert!(counter.stddev().is_err());
        assert!(counter.report().is_insufficient_data());
    }

    #[test]
    fn single_value_has_a_mean_but_no_variance() {
        let counter = counter(&[7.0]);

        assert_eq!(counter.mean(), Ok(7.0));
        assert!(matches!(
            counter.var(),
            Err(CounterError::InsufficientData { required: 2, .. })
        ));
        assert!(counter.report_confidence_interval(0.05).is_err());
        assert_eq!(
            counter.report(),
            Report::Summary {
                name: "tic".to_owned(),
                mean: 7.0,
                variance: None,
            }
        );
    }

    #[test]
    fn reset_clears_history() {
        let mut counter = counter(&[1.0, 2.0, 3.0]);
        counter.reset(SimTime::from_secs(10));

        assert!(counter.is_empty());
        assert!(counter.mean().is_err());
        assert!(counter.var().is_err());

        counter.count(5.0);
        assert_eq!(counter.mean(), Ok(5.0));
    }

    #[test]
    fn confidence_interval_half_width() {
        let counter = counter(&[2.0, 4.0, 6.0]);

        // t(0.975, df = 2) = 4.302653, standard error = sqrt(4 / 3)
        let expected = 4.302_653 * (4.0_f64 / 3.0).sqrt();
        let half_width = counter.report_confidence_interval(0.05).unwrap();
        assert!(
            (half_width - expected).abs() < 1e-4,
            "{half_width} != {expected}"
        );
    }

    #[test]
    fn wider_interval_for_higher_confidence() {
        let counter = counter(&[1.0, 5.0, 2.0, 8.0, 3.0]);

        let h90 = counter.report_confidence_interval(0.10).unwrap();
        let h99 = counter.report_confidence_interval(0.01).unwrap();
        assert!(h90 > 0.0);
        assert!(h99 > h90);
    }

    #[test]
    fn invalid_alpha() {
        let counter = counter(&[1.0, 2.0]);

        for alpha in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                counter.report_confidence_interval(alpha),
                Err(CounterError::InvalidAlpha(_))
            ));
        }
    }

    #[test]
    fn mean_is_in_confidence_interval() {
        let counter = counter(&[1.0, 5.0, 2.0, 8.0, 3.0]);
        let mean = counter.mean().unwrap();

        for alpha in [0.01, 0.05, 0.5, 0.95, 0.99] {
            assert!(counter.is_in_confidence_interval(mean, alpha).unwrap());
        }
    }

    #[test]
    fn far_value_is_not_in_confidence_interval() {
        let counter = counter(&[2.0, 4.0, 6.0]);

        assert!(!counter.is_in_confidence_interval(100.0, 0.05).unwrap());
        assert!(counter.is_in_confidence_interval(5.0, 0.05).unwrap());
        // the confidence level passed as alpha gives a much narrower interval
        assert!(!counter.is_in_confidence_interval(5.0, 0.95).unwrap());
    }

    #[test]
    fn degenerate_interval() {
        let counter = counter(&[3.0, 3.0, 3.0]);

        assert_eq!(counter.report_confidence_interval(0.05), Ok(0.0));
        assert!(!counter.is_in_confidence_interval(3.0, 0.05).unwrap());
        assert!(!counter.is_in_confidence_interval(3.1, 0.05).unwrap());
    }
}
