use queuesim_core::{
    Packet, PacketSink, SimTime, SystemState,
    counter::{
        Counter, Report, TimeDependentCounter, TimeIndependentAutocorrelationCounter,
        TimeIndependentCounter, TimeIndependentCrosscorrelationCounter,
    },
};

/// All the counters of one simulation run.
///
/// Served packets are counted through the [`PacketSink`] implementation;
/// the state of the system (queue length and server occupancy) through
/// [`CounterCollection::count_queue`]. All the durations are counted in
/// seconds.
#[derive(Debug, Clone)]
pub struct CounterCollection {
    /// time spent in the queue by each served packet
    pub waiting_time: TimeIndependentCounter,
    /// time spent in the system by each served packet
    pub system_time: TimeIndependentCounter,
    pub queue_length: TimeDependentCounter,
    /// `1` while the server is busy, `0` otherwise
    pub server_utilization: TimeDependentCounter,
    pub waiting_time_autocorrelation: TimeIndependentAutocorrelationCounter,
    pub interarrival_waiting_time: TimeIndependentCrosscorrelationCounter,
    pub interarrival_service_time: TimeIndependentCrosscorrelationCounter,
    pub service_system_time: TimeIndependentCrosscorrelationCounter,
}

impl CounterCollection {
    pub fn new(max_lag: usize) -> Self {
        Self {
            waiting_time: TimeIndependentCounter::new("waiting time"),
            system_time: TimeIndependentCounter::new("system time"),
            queue_length: TimeDependentCounter::new("queue length"),
            server_utilization: TimeDependentCounter::new("server utilization"),
            waiting_time_autocorrelation: TimeIndependentAutocorrelationCounter::with_max_lag(
                "waiting time autocorrelation",
                max_lag,
            ),
            interarrival_waiting_time: TimeIndependentCrosscorrelationCounter::new(
                "inter-arrival time / waiting time",
            ),
            interarrival_service_time: TimeIndependentCrosscorrelationCounter::new(
                "inter-arrival time / service time",
            ),
            service_system_time: TimeIndependentCrosscorrelationCounter::new(
                "service time / system time",
            ),
        }
    }

    /// count the queue length and the server occupancy.
    ///
    /// The time dependent counters weight a value by the time elapsed
    /// since their previous count, so this is to be called with the
    /// state as it was *before* the event at `now` changes it.
    pub fn count_queue(&mut self, now: SimTime, state: &SystemState) {
        self.queue_length.count(now, state.queue_length() as f64);
        self.server_utilization
            .count(now, if state.is_server_busy() { 1.0 } else { 0.0 });
    }

    pub fn counters(&self) -> [&dyn Counter; 8] {
        [
            &self.waiting_time,
            &self.system_time,
            &self.queue_length,
            &self.server_utilization,
            &self.waiting_time_autocorrelation,
            &self.interarrival_waiting_time,
            &self.interarrival_service_time,
            &self.service_system_time,
        ]
    }

    fn counters_mut(&mut self) -> [&mut dyn Counter; 8] {
        [
            &mut self.waiting_time,
            &mut self.system_time,
            &mut self.queue_length,
            &mut self.server_utilization,
            &mut self.waiting_time_autocorrelation,
            &mut self.interarrival_waiting_time,
            &mut self.interarrival_service_time,
            &mut self.service_system_time,
        ]
    }

    /// reset every counter, the time dependent ones start a new
    /// observation window at `now`.
    pub fn reset(&mut self, now: SimTime) {
        for counter in self.counters_mut() {
            counter.reset(now);
        }
    }

    pub fn reports(&self) -> Vec<Report> {
        self.counters()
            .into_iter()
            .map(|counter| counter.report())
            .collect()
    }
}

impl PacketSink for CounterCollection {
    fn count_packet(&mut self, packet: &Packet) {
        let (Some(waiting_time), Some(service_time), Some(system_time)) = (
            packet.waiting_time(),
            packet.service_time(),
            packet.system_time(),
        ) else {
            tracing::warn!(packet = %packet.id(), "ignoring packet that has not completed service");
            return;
        };

        let interarrival = packet.interarrival().as_secs_f64();
        let waiting_time = waiting_time.as_secs_f64();
        let service_time = service_time.as_secs_f64();
        let system_time = system_time.as_secs_f64();

        self.waiting_time.count(waiting_time);
        self.system_time.count(system_time);
        self.waiting_time_autocorrelation.count(waiting_time);
        self.interarrival_waiting_time
            .count(interarrival, waiting_time);
        self.interarrival_service_time
            .count(interarrival, service_time);
        self.service_system_time.count(service_time, system_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuesim_core::{Arrival, PacketIdGenerator};

    fn served_packet(arrival: u64, start: u64, end: u64) -> Packet {
        let mut packet = Packet::new(
            PacketIdGenerator::new().generate(),
            Arrival::new(SimTime::from_secs(arrival), SimTime::from_secs(1)),
        );
        packet.start_service(SimTime::from_secs(start));
        packet.complete_service(SimTime::from_secs(end));
        packet
    }

    #[test]
    fn count_packets() {
        let mut collection = CounterCollection::new(2);

        collection.count_packet(&served_packet(0, 0, 2));
        collection.count_packet(&served_packet(1, 2, 5));

        assert_eq!(collection.waiting_time.values(), &[0.0, 1.0]);
        assert_eq!(collection.system_time.values(), &[2.0, 4.0]);
        assert_eq!(collection.waiting_time_autocorrelation.len(), 2);
        assert_eq!(collection.interarrival_service_time.y().values(), &[2.0, 3.0]);
        assert_eq!(collection.service_system_time.len(), 2);
    }

    #[test]
    fn incomplete_packets_are_ignored() {
        let mut collection = CounterCollection::new(2);
        let packet = Packet::new(
            PacketIdGenerator::new().generate(),
            Arrival::new(SimTime::ZERO, SimTime::ZERO),
        );

        collection.count_packet(&packet);
        assert!(collection.waiting_time.is_empty());
    }

    #[test]
    fn count_queue_weights_by_time() {
        let mut collection = CounterCollection::new(2);
        let mut state = SystemState::new(3);

        // idle from 0 to 2
        collection.count_queue(SimTime::from_secs(2), &state);
        state.add_packet_to_server(Arrival::new(SimTime::from_secs(2), SimTime::from_secs(2)));
        // busy from 2 to 4
        collection.count_queue(SimTime::from_secs(4), &state);

        assert_eq!(collection.server_utilization.mean(), Ok(0.5));
        assert_eq!(collection.queue_length.mean(), Ok(0.0));
    }

    #[test]
    fn reset_and_reports() {
        let mut collection = CounterCollection::new(2);
        collection.count_packet(&served_packet(0, 0, 2));
        collection.count_packet(&served_packet(1, 3, 5));
        collection.count_packet(&served_packet(2, 5, 6));

        let reports = collection.reports();
        assert_eq!(reports.len(), 8);
        assert!(!reports[0].is_insufficient_data());

        collection.reset(SimTime::from_secs(6));
        assert!(collection.reports().iter().all(Report::is_insufficient_data));
        assert_eq!(
            collection.queue_length.first_timestamp(),
            SimTime::from_secs(6)
        );
    }
}
