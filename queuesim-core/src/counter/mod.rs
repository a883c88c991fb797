//! Statistical counters.
//!
//! Every counter keeps the history of what it counted since it was
//! created (or last [`reset`](Counter::reset)) and computes its
//! estimators from that history on demand. There are four flavours:
//!
//! * [`TimeIndependentCounter`]: every observation has the same weight
//!   (e.g. the waiting time of each packet). Also provides Student-t
//!   confidence intervals.
//! * [`TimeDependentCounter`]: every observation is weighted by how long
//!   it held (e.g. the queue length over time).
//! * [`TimeIndependentCrosscorrelationCounter`]: covariance and
//!   correlation between two series observed together.
//! * [`TimeIndependentAutocorrelationCounter`]: covariance and
//!   correlation of a series with itself at a given lag.
//!
//! The `count` operation is specific to each flavour (it does not take
//! the same arguments), everything else goes through the [`Counter`]
//! trait.
//!
//! Querying a statistic on an empty history returns
//! [`CounterError::InsufficientData`], never `NaN`.

mod autocorrelation;
mod crosscorrelation;
mod report;
mod time_dependent;
mod time_independent;

pub use self::{
    autocorrelation::TimeIndependentAutocorrelationCounter,
    crosscorrelation::TimeIndependentCrosscorrelationCounter,
    report::{LagReport, Report},
    time_dependent::TimeDependentCounter,
    time_independent::TimeIndependentCounter,
};
use crate::time::SimTime;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CounterError {
    #[error(
        "Counter `{name}' has insufficient data: {available} value(s) counted, at least {required} needed"
    )]
    InsufficientData {
        name: String,
        required: usize,
        available: usize,
    },
    #[error("Counter `{name}' has an empty observation window, the clock did not move")]
    EmptyObservationWindow { name: String },
    #[error("Counter `{name}': lag {lag} is out of range, only {available} value(s) counted")]
    LagOutOfRange {
        name: String,
        lag: usize,
        available: usize,
    },
    #[error("Invalid alpha ({0}), expecting a value in the open interval (0, 1)")]
    InvalidAlpha(f64),
    #[error("Failed to build the Student-t distribution: {0}")]
    Distribution(String),
}

/// Common operations of all the counters.
pub trait Counter {
    /// name given to the counter, used in the [`Report`]
    fn name(&self) -> &str;

    /// number of observations counted since the last reset
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// clear the history.
    ///
    /// `now` is the current simulation time. It is only used by the
    /// counters that weight observations by time.
    fn reset(&mut self, now: SimTime);

    fn mean(&self) -> Result<f64, CounterError>;

    fn var(&self) -> Result<f64, CounterError>;

    fn stddev(&self) -> Result<f64, CounterError> {
        self.var().map(f64::sqrt)
    }

    /// summary of the counter.
    ///
    /// This never fails: without a mean the report says there is not
    /// enough data, without a variance it is left out of the summary.
    fn report(&self) -> Report {
        match self.mean() {
            Ok(mean) => Report::Summary {
                name: self.name().to_owned(),
                mean,
                variance: self.var().ok(),
            },
            Err(_) => Report::InsufficientData {
                name: self.name().to_owned(),
            },
        }
    }
}

/// fail with [`CounterError::InsufficientData`] if fewer than `required`
/// values have been counted.
pub(crate) fn ensure_len(name: &str, available: usize, required: usize) -> Result<(), CounterError> {
    if available < required {
        Err(CounterError::InsufficientData {
            name: name.to_owned(),
            required,
            available,
        })
    } else {
        Ok(())
    }
}
