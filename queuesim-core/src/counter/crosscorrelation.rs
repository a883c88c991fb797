use super::{Counter, CounterError, Report, TimeIndependentCounter, ensure_len};
use crate::time::SimTime;

/// Counter of the covariance and correlation between two series `X` and
/// `Y` observed together.
///
/// The counter's own history is the series of products `x * y`; its
/// [`mean`](Counter::mean) and [`var`](Counter::var) are those of the
/// products.
///
/// Note that [`cov`](Self::cov) is the *biased* estimator (divided by
/// `n`) while [`cor`](Self::cor) normalises it with the *sample*
/// standard deviations of `X` and `Y` (divided by `n - 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndependentCrosscorrelationCounter {
    products: TimeIndependentCounter,
    x: TimeIndependentCounter,
    y: TimeIndependentCounter,
}

impl TimeIndependentCrosscorrelationCounter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            products: TimeIndependentCounter::new(name),
            x: TimeIndependentCounter::new("X"),
            y: TimeIndependentCounter::new("Y"),
        }
    }

    pub fn count(&mut self, x: f64, y: f64) {
        self.x.count(x);
        self.y.count(y);
        self.products.count(x * y);
    }

    #[inline]
    pub fn x(&self) -> &TimeIndependentCounter {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &TimeIndependentCounter {
        &self.y
    }

    /// covariance of `X` and `Y`: `(sum(x * y) - n * mean(X) * mean(Y)) / n`
    ///
    /// ```
    /// # use queuesim_core::counter::TimeIndependentCrosscorrelationCounter;
    /// let mut counter = TimeIndependentCrosscorrelationCounter::new("xy");
    /// counter.count(1.0, 2.0);
    /// counter.count(3.0, 4.0);
    ///
    /// assert_eq!(counter.cov().unwrap(), 1.0);
    /// ```
    pub fn cov(&self) -> Result<f64, CounterError> {
        let n = self.products.len();
        ensure_len(self.products.name(), n, 1)?;

        let n = n as f64;
        Ok((self.products.sum() - n * self.x.mean()? * self.y.mean()?) / n)
    }

    /// correlation of `X` and `Y`: `cov / (stddev(X) * stddev(Y))`
    pub fn cor(&self) -> Result<f64, CounterError> {
        ensure_len(self.products.name(), self.products.len(), 2)?;
        Ok(self.cov()? / (self.x.var()?.sqrt() * self.y.var()?.sqrt()))
    }
}

impl Counter for TimeIndependentCrosscorrelationCounter {
    fn name(&self) -> &str {
        self.products.name()
    }

    fn len(&self) -> usize {
        self.products.len()
    }

    fn reset(&mut self, now: SimTime) {
        self.products.reset(now);
        self.x.reset(now);
        self.y.reset(now);
    }

    fn mean(&self) -> Result<f64, CounterError> {
        self.products.mean()
    }

    fn var(&self) -> Result<f64, CounterError> {
        self.products.var()
    }

    fn report(&self) -> Report {
        match (self.cov(), self.cor()) {
            (Ok(covariance), Ok(correlation)) => Report::Correlation {
                name: self.name().to_owned(),
                covariance,
                correlation,
            },
            _ => Report::InsufficientData {
                name: self.name().to_owned(),
            },
        }
    }
}
