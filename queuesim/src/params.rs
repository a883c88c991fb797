use crate::defaults::{
    DEFAULT_BUFFER_SIZE, DEFAULT_MEAN_INTERARRIVAL, DEFAULT_RHO, DEFAULT_SEED, DEFAULT_SIM_TIME,
    DEFAULT_WAITING_TIME_MAX_LAG,
};
use anyhow::{Result, ensure};
use queuesim_core::SimTime;

/// Parameters of a [`Simulation`].
///
/// Start from the [`Default`] parameters and change what is needed:
///
/// ```
/// use queuesim::{SimParams, SimTime};
///
/// let params = SimParams::default()
///     .set_buffer_size(10)
///     .set_rho(0.9)
///     .set_sim_time("1h".parse().unwrap());
///
/// assert_eq!(params.sim_time(), SimTime::from_secs(3_600));
/// assert!(params.validate().is_ok());
/// ```
///
/// ## Defaults
///
/// | Parameter | Default |
/// |-----------|---------|
/// | buffer size | [`DEFAULT_BUFFER_SIZE`] |
/// | mean inter-arrival time | [`DEFAULT_MEAN_INTERARRIVAL`] |
/// | rho | [`DEFAULT_RHO`] |
/// | simulated time | [`DEFAULT_SIM_TIME`] |
/// | seed | [`DEFAULT_SEED`] |
/// | waiting time max lag | [`DEFAULT_WAITING_TIME_MAX_LAG`] |
///
/// [`Simulation`]: crate::Simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimParams {
    buffer_size: usize,
    mean_interarrival: SimTime,
    rho: f64,
    sim_time: SimTime,
    seed: u64,
    max_lag: usize,
}

impl SimParams {
    /// number of places in the waiting room
    pub fn set_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn set_mean_interarrival(mut self, mean_interarrival: SimTime) -> Self {
        self.mean_interarrival = mean_interarrival;
        self
    }

    /// utilization of the server: the mean service time is `rho` times
    /// the mean inter-arrival time.
    pub fn set_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    pub fn set_sim_time(mut self, sim_time: SimTime) -> Self {
        self.sim_time = sim_time;
        self
    }

    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// maximum lag of the waiting time autocorrelation
    pub fn set_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = max_lag;
        self
    }

    #[inline]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    #[inline]
    pub fn mean_interarrival(&self) -> SimTime {
        self.mean_interarrival
    }

    #[inline]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    #[inline]
    pub fn sim_time(&self) -> SimTime {
        self.sim_time
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// `rho * mean inter-arrival time`
    pub fn mean_service_time(&self) -> SimTime {
        SimTime::from_secs_f64(self.rho * self.mean_interarrival.as_secs_f64())
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.rho.is_finite() && self.rho > 0.0,
            "rho ({}) must be a positive number",
            self.rho
        );
        ensure!(
            self.mean_interarrival > SimTime::ZERO,
            "The mean inter-arrival time must be greater than 0"
        );
        ensure!(
            self.mean_service_time() > SimTime::ZERO,
            "The mean service time (rho * {}) must be greater than 0",
            self.mean_interarrival
        );
        ensure!(
            self.sim_time > SimTime::ZERO,
            "The simulated time must be greater than 0"
        );
        Ok(())
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            mean_interarrival: DEFAULT_MEAN_INTERARRIVAL,
            rho: DEFAULT_RHO,
            sim_time: DEFAULT_SIM_TIME,
            seed: DEFAULT_SEED,
            max_lag: DEFAULT_WAITING_TIME_MAX_LAG,
        }
    }
}
