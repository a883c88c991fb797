/*!
# Single server queue simulator

Discrete-event simulation of a server with a finite waiting room, built
on the [`queuesim_core`] state and counters.

```
use queuesim::{SimParams, SimTime, Simulation};

let params = SimParams::default()
    .set_buffer_size(2)
    .set_rho(0.8)
    .set_sim_time(SimTime::from_secs(500));

let stats = Simulation::new(params).unwrap().do_simulation().unwrap();
for report in &stats.reports {
    println!("{report}");
}
```
*/

mod collection;
pub mod defaults;
mod event;
mod params;
mod simulation;
pub mod stats;
mod variate;

// convenient re-export of `queuesim_core` core objects
pub use queuesim_core::{
    Arrival, FiniteQueue, Packet, PacketId, PacketSink, SimTime, SystemState, counter,
};

pub use self::{
    collection::CounterCollection,
    event::{Event, EventKind, EventQueue},
    params::SimParams,
    simulation::Simulation,
    stats::SimStats,
    variate::Exponential,
};
