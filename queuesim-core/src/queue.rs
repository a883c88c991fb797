use crate::packet::Packet;
use std::collections::VecDeque;

/// [`FiniteQueue`] is the waiting room of the server: a FIFO of
/// [`Packet`]s with a maximum capacity.
///
/// Once the maximum capacity is reached, subsequent calls to
/// [`FiniteQueue::add`] are rejected and the packet is dropped. This is
/// the expected (and frequent) way the simulated system loses packets,
/// not an error.
///
/// A capacity of `0` is valid: the system then has no waiting room at
/// all and only the server can hold a packet.
#[derive(Debug, Clone)]
pub struct FiniteQueue {
    packets: VecDeque<Packet>,
    maximum_capacity: usize,
}

impl FiniteQueue {
    /// create a [`FiniteQueue`] holding at most `maximum_capacity` packets.
    ///
    /// ```
    /// # use queuesim_core::FiniteQueue;
    /// let queue = FiniteQueue::with_capacity(5);
    /// assert_eq!(queue.maximum_capacity(), 5);
    /// assert_eq!(queue.remaining_capacity(), 5);
    /// ```
    pub fn with_capacity(maximum_capacity: usize) -> Self {
        Self {
            packets: VecDeque::with_capacity(maximum_capacity),
            maximum_capacity,
        }
    }

    #[inline]
    pub fn maximum_capacity(&self) -> usize {
        self.maximum_capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.remaining_capacity() == 0
    }

    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        self.maximum_capacity.saturating_sub(self.len())
    }

    /// append the packet at the back of the queue.
    ///
    /// Returns `false` (and drops the packet) if the queue is full.
    ///
    /// ```
    /// # use queuesim_core::{Arrival, FiniteQueue, Packet, PacketIdGenerator, SimTime};
    /// let mut ids = PacketIdGenerator::new();
    /// let arrival = Arrival::new(SimTime::ZERO, SimTime::ZERO);
    /// let mut queue = FiniteQueue::with_capacity(1);
    ///
    /// assert!(queue.add(Packet::new(ids.generate(), arrival)));
    /// assert!(!queue.add(Packet::new(ids.generate(), arrival)));
    /// assert_eq!(queue.len(), 1);
    /// ```
    pub fn add(&mut self, packet: Packet) -> bool {
        if self.is_full() {
            tracing::trace!(packet = %packet.id(), "queue full, dropping packet");
            return false;
        }

        self.packets.push_back(packet);
        true
    }

    /// take the packet at the head of the queue, if any.
    pub fn remove(&mut self) -> Option<Packet> {
        self.packets.pop_front()
    }

    pub fn peek(&self) -> Option<&Packet> {
        self.packets.front()
    }

    pub fn clear(&mut self) {
        self.packets.clear()
    }
}
