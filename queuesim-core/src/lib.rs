/*!
# Queue simulation core

Building blocks of a discrete-event simulation of a single server with a
finite waiting room (an M/M/1/S like system):

* [`SystemState`]: the server and its [`FiniteQueue`]. It decides whether
  an arriving [`Packet`] is served, queued or dropped and moves packets
  from the queue to the server;
* [`counter`]: the estimators used to turn what happens in the system
  into statistics (mean, variance, confidence interval, cross and auto
  correlation).

This crate does not schedule events nor generate random numbers. It is
driven by the caller, one event at a time, with the current [`SimTime`]
passed explicitly to every operation that needs it.

```
use queuesim_core::{
    Arrival, Packet, SimTime, SystemState,
    counter::{Counter, TimeIndependentCounter},
};

let mut state = SystemState::new(5);
let mut waiting_time = TimeIndependentCounter::new("waiting time");

let arrival = Arrival::new(SimTime::ZERO, SimTime::ZERO);
assert!(state.add_packet_to_server(arrival));

let mut served: Vec<Packet> = Vec::new();
state.complete_service(SimTime::from_secs(2), &mut served).unwrap();

for packet in &served {
    waiting_time.count(packet.waiting_time().unwrap().as_secs_f64());
}
assert_eq!(waiting_time.mean().unwrap(), 0.0);
```
*/

pub mod counter;
pub mod defaults;
mod packet;
mod queue;
mod system_state;
mod time;

pub use self::{
    packet::{Arrival, Packet, PacketId, PacketIdGenerator},
    queue::FiniteQueue,
    system_state::{PacketSink, StateError, SystemState},
    time::{SimTime, SimTimeParseError},
};
