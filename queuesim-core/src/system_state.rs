use crate::{
    packet::{Arrival, Packet, PacketIdGenerator},
    queue::FiniteQueue,
    time::SimTime,
};
use thiserror::Error;

/// Receives every packet that leaves the server.
///
/// This is where the statistics of a simulation are gathered. The
/// [`SystemState`] calls [`PacketSink::count_packet`] exactly once per
/// [`SystemState::complete_service`].
pub trait PacketSink {
    fn count_packet(&mut self, packet: &Packet);
}

impl PacketSink for Vec<Packet> {
    fn count_packet(&mut self, packet: &Packet) {
        self.push(packet.clone());
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// [`SystemState::complete_service`] was called before any packet
    /// ever entered the server.
    #[error("No packet has been served yet, nothing to complete")]
    NoPacketServed,
}

/// # State of a single-server, finite-buffer queueing system
///
/// The [`SystemState`] owns the waiting room ([`FiniteQueue`]) and the
/// packet currently in the server. It enforces the admission policy:
///
/// 1. an arriving packet goes straight to the server if it is idle
///    ([`add_packet_to_server`]);
/// 2. otherwise it waits in the queue if there is room
///    ([`add_packet_to_queue`]);
/// 3. otherwise it is dropped.
///
/// When the server finishes ([`complete_service`]) the packet is handed to
/// the [`PacketSink`] and the head of the queue may enter service
/// ([`start_service`]).
///
/// The server is busy if and only if [`SystemState::served_packet`]
/// returns a packet. A packet is never both queued and served.
///
/// ```
/// # use queuesim_core::{Arrival, Packet, SimTime, SystemState};
/// let mut state = SystemState::new(2);
/// let arrival = Arrival::new(SimTime::ZERO, SimTime::ZERO);
///
/// assert!(state.add_packet_to_server(arrival));
/// assert!(!state.add_packet_to_server(arrival));
/// assert!(state.add_packet_to_queue(arrival));
///
/// let mut served: Vec<Packet> = Vec::new();
/// state.complete_service(SimTime::from_secs(1), &mut served).unwrap();
/// assert!(state.start_service(SimTime::from_secs(1)));
/// assert_eq!(served.len(), 1);
/// assert_eq!(state.queue_length(), 0);
/// ```
///
/// [`add_packet_to_server`]: SystemState::add_packet_to_server
/// [`add_packet_to_queue`]: SystemState::add_packet_to_queue
/// [`complete_service`]: SystemState::complete_service
/// [`start_service`]: SystemState::start_service
#[derive(Debug, Clone)]
pub struct SystemState {
    server_busy: bool,
    queue: FiniteQueue,

    /// the last packet to have entered the server
    ///
    /// it is kept after completion (and replaced by the next packet to
    /// be served), it is only in service while `server_busy` is set.
    served_packet: Option<Packet>,

    packet_ids: PacketIdGenerator,
}

impl SystemState {
    /// create an idle system whose queue holds at most `buffer_size` packets
    pub fn new(buffer_size: usize) -> Self {
        Self {
            server_busy: false,
            queue: FiniteQueue::with_capacity(buffer_size),
            served_packet: None,
            packet_ids: PacketIdGenerator::new(),
        }
    }

    /// Try to put a new packet directly in the server.
    ///
    /// Returns `true` if the server was idle and the packet is now being
    /// served. Returns `false`, without changing anything, if the server
    /// is busy.
    pub fn add_packet_to_server(&mut self, arrival: Arrival) -> bool {
        if self.server_busy {
            return false;
        }

        let mut packet = Packet::new(self.packet_ids.generate(), arrival);
        packet.start_service(arrival.time);
        tracing::trace!(packet = %packet.id(), time = %arrival.time, "packet enters server");

        self.served_packet = Some(packet);
        self.server_busy = true;
        true
    }

    /// Try to store a new packet in the queue.
    ///
    /// Returns `false` if the queue was full, the packet is then lost.
    pub fn add_packet_to_queue(&mut self, arrival: Arrival) -> bool {
        let packet = Packet::new(self.packet_ids.generate(), arrival);
        let id = packet.id();

        let accepted = self.queue.add(packet);
        if accepted {
            tracing::trace!(packet = %id, queue_length = self.queue.len(), "packet queued");
        } else {
            tracing::debug!(packet = %id, time = %arrival.time, "packet blocked, queue full");
        }
        accepted
    }

    /// Set the server back to idle and report the served packet to the
    /// `sink`.
    ///
    /// The packet is only completed once: completing the same packet
    /// again keeps its original departure time, but it is still reported.
    ///
    /// # Errors
    ///
    /// [`StateError::NoPacketServed`] if no packet has entered the server
    /// since the creation (or [`reset`](Self::reset)) of the state. The
    /// server is idle afterwards either way.
    pub fn complete_service<S>(&mut self, now: SimTime, sink: &mut S) -> Result<(), StateError>
    where
        S: PacketSink + ?Sized,
    {
        self.server_busy = false;

        let Some(packet) = self.served_packet.as_mut() else {
            return Err(StateError::NoPacketServed);
        };

        if !packet.completed() {
            packet.complete_service(now);
        }
        tracing::trace!(packet = %packet.id(), time = %now, "packet leaves server");

        sink.count_packet(packet);
        Ok(())
    }

    /// Move the head of the queue into the server.
    ///
    /// Returns `false` if the server is still busy or the queue is empty,
    /// the state is left untouched.
    pub fn start_service(&mut self, now: SimTime) -> bool {
        if self.server_busy {
            tracing::debug!(time = %now, "server busy, service not started");
            return false;
        }

        let Some(mut packet) = self.queue.remove() else {
            return false;
        };

        packet.start_service(now);
        tracing::trace!(packet = %packet.id(), time = %now, "queued packet enters server");

        self.served_packet = Some(packet);
        self.server_busy = true;
        true
    }

    /// number of packets waiting in the queue (the served packet excluded)
    #[inline]
    pub fn queue_length(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn queue_capacity(&self) -> usize {
        self.queue.maximum_capacity()
    }

    #[inline]
    pub fn is_server_busy(&self) -> bool {
        self.server_busy
    }

    /// the packet currently in service, `None` while the server is idle
    pub fn served_packet(&self) -> Option<&Packet> {
        self.served_packet
            .as_ref()
            .filter(|_| self.server_busy)
    }

    /// empty the queue and set the server back to idle
    pub fn reset(&mut self) {
        self.server_busy = false;
        self.queue.clear();
        self.served_packet = None;
    }
}
