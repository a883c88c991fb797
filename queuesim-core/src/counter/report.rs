use std::fmt;

/// Covariance and correlation of a series with itself at a given lag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagReport {
    pub lag: usize,
    pub covariance: f64,
    pub correlation: f64,
}

/// The textual summary of a [`Counter`](super::Counter).
///
/// It is meant to be logged or printed (see the [`fmt::Display`]
/// implementation), nothing parses it back.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Summary {
        name: String,
        mean: f64,
        /// `None` while there are too few values for a variance
        variance: Option<f64>,
    },
    Correlation {
        name: String,
        covariance: f64,
        correlation: f64,
    },
    Autocorrelation {
        name: String,
        lags: Vec<LagReport>,
    },
    InsufficientData {
        name: String,
    },
}

impl Report {
    pub fn name(&self) -> &str {
        match self {
            Self::Summary { name, .. }
            | Self::Correlation { name, .. }
            | Self::Autocorrelation { name, .. }
            | Self::InsufficientData { name } => name,
        }
    }

    #[inline]
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

impl fmt::Display for LagReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lag = {}; covariance = {}; correlation = {}",
            self.lag, self.covariance, self.correlation
        )
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary {
                name,
                mean,
                variance,
            } => match variance {
                Some(variance) => write!(f, "Name: {name}, Mean: {mean}, Variance: {variance}"),
                None => write!(f, "Name: {name}, Mean: {mean}, Variance: unavailable"),
            },
            Self::Correlation {
                name,
                covariance,
                correlation,
            } => write!(
                f,
                "Name: {name}; covariance = {covariance}; correlation = {correlation}"
            ),
            Self::Autocorrelation { name, lags } => {
                write!(f, "Name: {name}")?;
                for lag in lags {
                    write!(f, "\n{lag}")?;
                }
                Ok(())
            }
            Self::InsufficientData { name } => {
                write!(f, "Name: {name}, insufficient data for a report")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let summary = Report::Summary {
            name: "waiting time".to_owned(),
            mean: 4.0,
            variance: Some(2.5),
        };
        assert_eq!(
            summary.to_string(),
            "Name: waiting time, Mean: 4, Variance: 2.5"
        );

        let single = Report::Summary {
            name: "one".to_owned(),
            mean: 7.0,
            variance: None,
        };
        assert_eq!(single.to_string(), "Name: one, Mean: 7, Variance: unavailable");

        let autocorrelation = Report::Autocorrelation {
            name: "wt".to_owned(),
            lags: vec![
                LagReport {
                    lag: 0,
                    covariance: 2.0,
                    correlation: 1.0,
                },
                LagReport {
                    lag: 1,
                    covariance: 0.5,
                    correlation: 0.25,
                },
            ],
        };
        assert_eq!(
            autocorrelation.to_string(),
            "Name: wt\nLag = 0; covariance = 2; correlation = 1\nLag = 1; covariance = 0.5; correlation = 0.25"
        );
    }

    #[test]
    fn insufficient_data() {
        let report = Report::InsufficientData {
            name: "ql".to_owned(),
        };
        assert!(report.is_insufficient_data());
        assert_eq!(report.name(), "ql");
        assert_eq!(report.to_string(), "Name: ql, insufficient data for a report");
    }
}
