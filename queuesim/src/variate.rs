use queuesim_core::SimTime;
use rand_core::Rng;

/// Exponentially distributed durations, used for both the inter-arrival
/// and the service times.
///
/// The random source is given by the caller so that every draw of a
/// simulation comes from the same seedable generator held by the
/// [`Simulation`].
///
/// [`Simulation`]: crate::Simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    /// in seconds
    mean: f64,
}

impl Exponential {
    pub fn new(mean: SimTime) -> Self {
        Self {
            mean: mean.as_secs_f64(),
        }
    }

    #[inline]
    pub fn mean(&self) -> SimTime {
        SimTime::from_secs_f64(self.mean)
    }

    /// draw a duration by inversion of the cumulative distribution
    pub fn sample<R: Rng>(&self, rng: &mut R) -> SimTime {
        let u = uniform(rng);
        SimTime::from_secs_f64(-self.mean * (1.0 - u).ln())
    }
}

/// uniform sample in `[0, 1)` built from the 53 most significant bits
/// of the next `u64`, so that `1.0` can never be reached.
fn uniform<R: Rng>(rng: &mut R) -> f64 {
    let bits = rng.next_u64() >> 11;
    (bits as f64) * (1.0 / (1u64 << 53) as f64)
}
