use logos::{Lexer, Logos};
use std::{fmt, ops::Add, str::FromStr, time::Duration};
use thiserror::Error;

/// A point on (or a span of) the simulation clock.
///
/// The clock starts at [`SimTime::ZERO`] and only ever moves forward. It
/// is stored as a [`Duration`] since the start of the simulation so that
/// events can be totally ordered, and converted to seconds (as `f64`)
/// whenever a statistic needs it.
///
/// ```
/// # use queuesim_core::SimTime;
/// let t: SimTime = "1s 500ms".parse().unwrap();
/// assert_eq!(t.as_secs_f64(), 1.5);
/// assert_eq!(t.to_string(), "1.5s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimTime(Duration);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimTimeParseError {
    #[error("Failed to parse `{0}'")]
    InvalidToken(String),
    #[error("Expecting time to start with a number, cannot parse `{0}'")]
    ExpectedNumber(String),
    #[error("Expecting a unit after the number, cannot parse `{0}'")]
    ExpectedUnit(String),
    #[error("Empty time value")]
    Empty,
}

impl SimTime {
    /// The start of the simulation.
    pub const ZERO: Self = Self(Duration::ZERO);

    #[inline]
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// create a [`SimTime`] from a number of seconds.
    ///
    /// Negative and NaN values saturate to [`SimTime::ZERO`], values too
    /// large to be represented saturate to [`Duration::MAX`].
    pub fn from_secs_f64(secs: f64) -> Self {
        Self(Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX))
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }

    #[inline]
    pub fn into_duration(self) -> Duration {
        self.0
    }

    /// time elapsed since `earlier`, `ZERO` if `earlier` is in the future.
    #[inline]
    pub fn saturating_since(self, earlier: Self) -> Self {
        Self(self.0.saturating_sub(earlier.0))
    }
}

impl Add for SimTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl From<Duration> for SimTime {
    fn from(value: Duration) -> Self {
        Self::new(value)
    }
}

impl From<SimTime> for Duration {
    fn from(value: SimTime) -> Self {
        value.into_duration()
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Duration as fmt::Debug>::fmt(&self.0, f)
    }
}

impl FromStr for SimTime {
    type Err = SimTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lex: Lexer<Token> = Lexer::new(s);

        let mut total = Duration::ZERO;
        let mut parsed_any = false;

        while let Some(next) = lex.next() {
            let number: Token = next.map_err(|()| SimTimeParseError::InvalidToken(s.to_owned()))?;
            if number != Token::Value {
                return Err(SimTimeParseError::ExpectedNumber(s.to_owned()));
            }
            let number: u64 = lex
                .slice()
                .parse()
                .map_err(|_| SimTimeParseError::InvalidToken(s.to_owned()))?;

            let Some(Ok(unit)) = lex.next() else {
                return Err(SimTimeParseError::ExpectedUnit(s.to_owned()));
            };
            let duration = match unit {
                Token::NanoSeconds => Duration::from_nanos(number),
                Token::MicroSeconds => Duration::from_micros(number),
                Token::MilliSeconds => Duration::from_millis(number),
                Token::Seconds => Duration::from_secs(number),
                Token::Minutes => Duration::from_secs(number.saturating_mul(60)),
                Token::Hours => Duration::from_secs(number.saturating_mul(3_600)),
                Token::Value => return Err(SimTimeParseError::ExpectedUnit(s.to_owned())),
            };
            total = total.saturating_add(duration);
            parsed_any = true;
        }

        if !parsed_any {
            return Err(SimTimeParseError::Empty);
        }

        Ok(Self(total))
    }
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\n\f]+")]
enum Token {
    #[token("ns")]
    NanoSeconds,
    #[regex("us|μs")]
    MicroSeconds,
    #[token("ms")]
    MilliSeconds,
    #[token("s")]
    Seconds,
    #[token("m")]
    Minutes,
    #[token("h")]
    Hours,

    #[regex("[0-9]+")]
    Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logos_lexer() {
        let mut lex = Token::lexer("10ms");

        assert_eq!(lex.next(), Some(Ok(Token::Value)));
        assert_eq!(lex.slice(), "10");

        assert_eq!(lex.next(), Some(Ok(Token::MilliSeconds)));
        assert_eq!(lex.span(), 2..4);
    }

    #[test]
    fn parse() {
        let time: SimTime = "123ms".parse().unwrap();
        assert_eq!(time.into_duration().as_millis(), 123);

        let time: SimTime = "1m 2s 3000000us".parse().unwrap();
        assert_eq!(time.into_duration().as_secs(), 65);

        let time: SimTime = "2h".parse().unwrap();
        assert_eq!(time, SimTime::from_secs(7_200));
    }

    #[test]
    fn parse_invalid() {
        assert_eq!("".parse::<SimTime>(), Err(SimTimeParseError::Empty));
        assert!(matches!(
            "150".parse::<SimTime>(),
            Err(SimTimeParseError::ExpectedUnit(_))
        ));
        assert!(matches!(
            "ms".parse::<SimTime>(),
            Err(SimTimeParseError::ExpectedNumber(_))
        ));
        assert!("abc".parse::<SimTime>().is_err());
    }

    #[test]
    fn seconds_conversion() {
        assert_eq!(SimTime::from_secs_f64(2.5), SimTime::from_millis(2_500));
        assert_eq!(SimTime::from_secs_f64(-1.0), SimTime::ZERO);
        assert_eq!(SimTime::from_secs_f64(f64::NAN), SimTime::ZERO);
        assert_eq!(SimTime::from_millis(250).as_secs_f64(), 0.25);
    }

    #[test]
    fn saturating_since() {
        let early = SimTime::from_secs(1);
        let late = SimTime::from_secs(3);

        assert_eq!(late.saturating_since(early), SimTime::from_secs(2));
        assert_eq!(early.saturating_since(late), SimTime::ZERO);
        assert_eq!(early + late, SimTime::from_secs(4));
    }
}
