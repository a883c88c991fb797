use core::cmp::Reverse;
use queuesim_core::SimTime;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    CustomerArrival,
    ServiceCompletion,
    SimulationTermination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub time: SimTime,
    pub kind: EventKind,
}

/// ordered by time, then by insertion order
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Scheduled {
    time: SimTime,
    sequence: u64,
    kind: EventKind,
}

/// The future events of a simulation, popped in chronological order.
///
/// Events scheduled at the same time are popped in the order they were
/// pushed.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Scheduled>>,
    sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn time_to_next_event(&self) -> Option<SimTime> {
        self.heap.peek().map(|Reverse(scheduled)| scheduled.time)
    }

    pub fn push(&mut self, time: SimTime, kind: EventKind) {
        let sequence = self.sequence;
        self.sequence = self.sequence.wrapping_add(1);

        self.heap.push(Reverse(Scheduled {
            time,
            sequence,
            kind,
        }))
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.heap
            .pop()
            .map(|Reverse(Scheduled { time, kind, .. })| Event { time, kind })
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.sequence = 0;
    }
}
