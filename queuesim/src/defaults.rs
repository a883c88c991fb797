use queuesim_core::SimTime;

/// Default number of places in the waiting room (the packet in service
/// is not counted).
///
/// ```
/// # use queuesim::{SimParams, defaults::*};
/// assert_eq!(SimParams::default().buffer_size(), DEFAULT_BUFFER_SIZE);
/// ```
pub const DEFAULT_BUFFER_SIZE: usize = 5;

/// Default mean inter-arrival time.
pub const DEFAULT_MEAN_INTERARRIVAL: SimTime = SimTime::from_secs(1);

/// Default utilization of the server, `mean service time / mean
/// inter-arrival time`.
pub const DEFAULT_RHO: f64 = 0.5;

/// Default simulated duration.
///
/// ```
/// # use queuesim::defaults::*;
/// assert_eq!(DEFAULT_SIM_TIME.to_string(), "10000s");
/// ```
pub const DEFAULT_SIM_TIME: SimTime = SimTime::from_secs(10_000);

/// Default seed of the random number generator.
pub const DEFAULT_SEED: u64 = 0;

/// Default maximum lag of the waiting time autocorrelation counter.
pub const DEFAULT_WAITING_TIME_MAX_LAG: usize = 20;
