use crate::time::SimTime;
use std::fmt;

/// a generator for monotonically increasing **unique** [`PacketId`]
///
#[derive(Debug, Clone)]
pub struct PacketIdGenerator(u64);

/// # [`Packet`] Identifier
///
/// During the lifetime of the simulation, this identifier can uniquely
/// identify the packet.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PacketId(u64);

/// The time at which a packet enters the system, along with the
/// inter-arrival time that separated it from the previous arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub time: SimTime,
    pub interarrival: SimTime,
}

/// # A unit flowing through the queue and the server
///
/// The [`Packet`] only keeps track of its own timestamps: when it
/// arrived, when it entered service and when it left the system. The
/// [`SystemState`] is responsible for moving it between the queue and
/// the server.
///
/// [`SystemState`]: crate::SystemState
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    id: PacketId,
    arrival: SimTime,
    interarrival: SimTime,
    service_start: Option<SimTime>,
    departure: Option<SimTime>,
}

impl PacketIdGenerator {
    pub fn new() -> Self {
        Self(1)
    }

    /// generate a new unique identifier
    pub fn generate(&mut self) -> PacketId {
        let id = self.0;
        self.0 = self.0.wrapping_add(1);

        debug_assert!(
            id != 0,
            "The generator overflowed after `u64::MAX` packets. This shouldn't happen!"
        );

        PacketId(id)
    }
}

impl Default for PacketIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketId {
    #[inline]
    pub fn into_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "packet#{}", self.0)
    }
}

impl Arrival {
    pub fn new(time: SimTime, interarrival: SimTime) -> Self {
        Self { time, interarrival }
    }
}

impl Packet {
    pub fn new(id: PacketId, arrival: Arrival) -> Self {
        Self {
            id,
            arrival: arrival.time,
            interarrival: arrival.interarrival,
            service_start: None,
            departure: None,
        }
    }

    #[inline]
    pub fn id(&self) -> PacketId {
        self.id
    }

    #[inline]
    pub fn arrival(&self) -> SimTime {
        self.arrival
    }

    #[inline]
    pub fn interarrival(&self) -> SimTime {
        self.interarrival
    }

    /// mark the packet as being served from `now`.
    ///
    /// Calling it a second time keeps the first timestamp.
    pub fn start_service(&mut self, now: SimTime) {
        debug_assert!(self.arrival <= now, "service cannot start before arrival");
        self.service_start.get_or_insert(now);
    }

    /// mark the packet as having left the system at `now`.
    ///
    /// A packet that never started service is considered to have been
    /// served instantly.
    pub fn complete_service(&mut self, now: SimTime) {
        self.service_start.get_or_insert(now);
        self.departure.get_or_insert(now);
    }

    #[inline]
    pub fn in_service(&self) -> bool {
        self.service_start.is_some() && self.departure.is_none()
    }

    #[inline]
    pub fn completed(&self) -> bool {
        self.departure.is_some()
    }

    #[inline]
    pub fn service_start(&self) -> Option<SimTime> {
        self.service_start
    }

    #[inline]
    pub fn departure(&self) -> Option<SimTime> {
        self.departure
    }

    /// time spent in the queue before service started
    pub fn waiting_time(&self) -> Option<SimTime> {
        self.service_start
            .map(|start| start.saturating_since(self.arrival))
    }

    /// time spent in the server
    pub fn service_time(&self) -> Option<SimTime> {
        let start = self.service_start?;
        self.departure.map(|end| end.saturating_since(start))
    }

    /// total time spent in the system (waiting and service)
    pub fn system_time(&self) -> Option<SimTime> {
        self.departure
            .map(|end| end.saturating_since(self.arrival))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_monotonic() {
        let mut generator = PacketIdGenerator::new();
        let a = generator.generate();
        let b = generator.generate();

        assert!(a < b);
        assert_eq!(a.into_u64(), 1);
        assert_eq!(b.to_string(), "packet#2");
    }

    #[test]
    fn lifecycle_timestamps() {
        let mut generator = PacketIdGenerator::new();
        let mut packet = Packet::new(
            generator.generate(),
            Arrival::new(SimTime::from_secs(2), SimTime::from_secs(1)),
        );

        assert!(!packet.in_service());
        assert!(!packet.completed());
        assert_eq!(packet.waiting_time(), None);

        packet.start_service(SimTime::from_secs(5));
        assert!(packet.in_service());
        assert_eq!(packet.waiting_time(), Some(SimTime::from_secs(3)));
        assert_eq!(packet.service_time(), None);

        packet.complete_service(SimTime::from_secs(6));
        assert!(packet.completed());
        assert!(!packet.in_service());
        assert_eq!(packet.service_time(), Some(SimTime::from_secs(1)));
        assert_eq!(packet.system_time(), Some(SimTime::from_secs(4)));
        assert_eq!(packet.interarrival(), SimTime::from_secs(1));
    }

    #[test]
    fn completion_keeps_first_timestamp() {
        let mut packet = Packet::new(
            PacketIdGenerator::new().generate(),
            Arrival::new(SimTime::ZERO, SimTime::ZERO),
        );
        packet.start_service(SimTime::from_secs(1));
        packet.complete_service(SimTime::from_secs(2));
        packet.complete_service(SimTime::from_secs(9));

        assert_eq!(packet.departure(), Some(SimTime::from_secs(2)));
    }
}
