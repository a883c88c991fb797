//! Simulation results.
//!
//! [`SimStats`] is a snapshot of a [`Simulation`] taken at the end of
//! [`Simulation::do_simulation`].
//!
//! [`Simulation`]: crate::Simulation
//! [`Simulation::do_simulation`]: crate::Simulation::do_simulation

use queuesim_core::{SimTime, counter::Report};

/// Snapshot of the statistics of a simulation run.
#[derive(Debug, Clone)]
pub struct SimStats {
    /// Simulation time at which the run stopped.
    pub end_time: SimTime,
    /// Number of packets that arrived in the system.
    pub arrivals: u64,
    /// Number of packets that completed their service.
    pub served: u64,
    /// Number of packets dropped because the queue was full.
    pub blocked: u64,
    /// Mean waiting time in the queue (seconds), if any packet was served.
    pub mean_waiting_time: Option<f64>,
    /// Time-weighted mean queue length.
    pub mean_queue_length: Option<f64>,
    /// Fraction of the time the server was busy.
    pub server_utilization: Option<f64>,
    /// The report of every counter of the run.
    pub reports: Vec<Report>,
}

impl SimStats {
    /// Fraction of the arrived packets that were dropped.
    pub fn blocking_probability(&self) -> f64 {
        if self.arrivals == 0 {
            0.0
        } else {
            self.blocked as f64 / self.arrivals as f64
        }
    }
}
