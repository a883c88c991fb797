use crate::{
    collection::CounterCollection,
    event::{EventKind, EventQueue},
    params::SimParams,
    stats::SimStats,
    variate::Exponential,
};
use anyhow::{Context as _, Result};
use queuesim_core::{Arrival, SimTime, SystemState, counter::Counter as _};
use rand_chacha::ChaChaRng;
use rand_core::SeedableRng as _;

/// Event driven simulation of a single server with a finite queue.
///
/// Packets arrive with exponentially distributed inter-arrival times and
/// are served with exponentially distributed service times (an M/M/1/S
/// system). Every random draw comes from a single [`ChaChaRng`] seeded
/// with [`SimParams::seed`], so a run is entirely reproducible.
///
/// ```
/// use queuesim::{SimParams, SimTime, Simulation};
///
/// let params = SimParams::default()
///     .set_sim_time(SimTime::from_secs(1_000))
///     .set_seed(42);
/// let mut simulation = Simulation::new(params).unwrap();
///
/// let stats = simulation.do_simulation().unwrap();
/// assert!(stats.arrivals > 0);
/// assert!(stats.blocking_probability() < 0.1);
/// ```
pub struct Simulation {
    params: SimParams,

    /// Centralised RNG for both the inter-arrival and the service times.
    rng: ChaChaRng,
    interarrival: Exponential,
    service: Exponential,

    now: SimTime,
    last_arrival: SimTime,
    events: EventQueue,
    state: SystemState,
    counters: CounterCollection,

    arrivals: u64,
    served: u64,
    blocked: u64,
}

impl Simulation {
    pub fn new(params: SimParams) -> Result<Self> {
        params.validate().context("Invalid simulation parameters")?;

        Ok(Self {
            rng: ChaChaRng::seed_from_u64(params.seed()),
            interarrival: Exponential::new(params.mean_interarrival()),
            service: Exponential::new(params.mean_service_time()),
            now: SimTime::ZERO,
            last_arrival: SimTime::ZERO,
            events: EventQueue::new(),
            state: SystemState::new(params.buffer_size()),
            counters: CounterCollection::new(params.max_lag()),
            arrivals: 0,
            served: 0,
            blocked: 0,
            params,
        })
    }

    #[inline]
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn state(&self) -> &SystemState {
        &self.state
    }

    #[inline]
    pub fn counters(&self) -> &CounterCollection {
        &self.counters
    }

    /// put the simulation back to its initial state, the random number
    /// generator is re-seeded with [`SimParams::seed`].
    pub fn reset(&mut self) {
        self.rng = ChaChaRng::seed_from_u64(self.params.seed());
        self.now = SimTime::ZERO;
        self.last_arrival = SimTime::ZERO;
        self.events.clear();
        self.state.reset();
        self.counters.reset(SimTime::ZERO);
        self.arrivals = 0;
        self.served = 0;
        self.blocked = 0;
    }

    /// run the simulation from the start until [`SimParams::sim_time`].
    ///
    /// The simulation is [`reset`](Self::reset) first, so calling it
    /// twice yields the same results.
    pub fn do_simulation(&mut self) -> Result<SimStats> {
        self.reset();

        self.events.push(SimTime::ZERO, EventKind::CustomerArrival);
        self.events
            .push(self.params.sim_time(), EventKind::SimulationTermination);

        while let Some(event) = self.events.pop() {
            debug_assert!(self.now <= event.time, "the clock moved backward");

            // the state held from the previous event until now
            self.counters.count_queue(event.time, &self.state);
            self.now = event.time;

            tracing::trace!(time = %self.now, event = ?event.kind, "processing event");
            match event.kind {
                EventKind::CustomerArrival => self.customer_arrival(),
                EventKind::ServiceCompletion => self.service_completion()?,
                EventKind::SimulationTermination => break,
            }
        }

        let stats = self.stats();
        tracing::info!(
            end_time = %stats.end_time,
            arrivals = stats.arrivals,
            served = stats.served,
            blocked = stats.blocked,
            blocking_probability = stats.blocking_probability(),
            "simulation finished"
        );
        Ok(stats)
    }

    fn customer_arrival(&mut self) {
        let interarrival = self.now.saturating_since(self.last_arrival);
        self.last_arrival = self.now;
        self.arrivals += 1;

        let next = self.now + self.interarrival.sample(&mut self.rng);
        self.events.push(next, EventKind::CustomerArrival);

        let arrival = Arrival::new(self.now, interarrival);
        if self.state.add_packet_to_server(arrival) {
            self.schedule_service_completion();
        } else if !self.state.add_packet_to_queue(arrival) {
            self.blocked += 1;
        }
    }

    fn service_completion(&mut self) -> Result<()> {
        self.state
            .complete_service(self.now, &mut self.counters)
            .with_context(|| format!("Service completion at {} without packet", self.now))?;
        self.served += 1;

        if self.state.start_service(self.now) {
            self.schedule_service_completion();
        }
        Ok(())
    }

    fn schedule_service_completion(&mut self) {
        let service_time = self.service.sample(&mut self.rng);
        self.events
            .push(self.now + service_time, EventKind::ServiceCompletion);
    }

    fn stats(&self) -> SimStats {
        SimStats {
            end_time: self.now,
            arrivals: self.arrivals,
            served: self.served,
            blocked: self.blocked,
            mean_waiting_time: self.counters.waiting_time.mean().ok(),
            mean_queue_length: self.counters.queue_length.mean().ok(),
            server_utilization: self.counters.server_utilization.mean().ok(),
            reports: self.counters.reports(),
        }
    }
}
