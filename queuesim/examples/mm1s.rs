use anyhow::{Context as _, Result};
use clap::Parser;
use indicatif::ProgressBar;
use queuesim::{
    SimParams, SimTime, Simulation,
    counter::{Counter as _, TimeIndependentCounter},
};
use tracing_subscriber::EnvFilter;

/// Run independent replications of an M/M/1/S simulation and report the
/// confidence interval of the mean waiting time and of the blocking
/// probability.
///
/// Set `RUST_LOG=queuesim=debug` (or `trace`) to follow the simulation.
#[derive(Parser)]
struct Command {
    /// number of places in the waiting room
    #[arg(long, default_value = "5")]
    buffer_size: usize,

    /// utilization of the server
    #[arg(long, default_value = "0.5")]
    rho: f64,

    /// mean inter-arrival time (e.g. `1s`, `250ms`)
    #[arg(long, default_value = "1s")]
    interarrival: SimTime,

    /// simulated time of every replication (e.g. `1h`, `10000s`)
    #[arg(long, default_value = "10000s")]
    time: SimTime,

    #[arg(long, default_value = "0")]
    seed: u64,

    #[arg(long, default_value = "30")]
    replications: u64,

    /// significance of the confidence intervals
    #[arg(long, default_value = "0.05")]
    alpha: f64,

    /// print the reports of every counter of the last replication
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cmd = Command::parse();

    let mut waiting_time = TimeIndependentCounter::new("mean waiting time");
    let mut blocking = TimeIndependentCounter::new("blocking probability");
    let mut last_reports = Vec::new();

    let pb = ProgressBar::new(cmd.replications);
    for replication in 0..cmd.replications {
        let params = SimParams::default()
            .set_buffer_size(cmd.buffer_size)
            .set_rho(cmd.rho)
            .set_mean_interarrival(cmd.interarrival)
            .set_sim_time(cmd.time)
            .set_seed(cmd.seed.wrapping_add(replication));

        let mut simulation = Simulation::new(params)?;
        let stats = simulation
            .do_simulation()
            .with_context(|| format!("Replication {replication} failed"))?;

        if let Some(mean) = stats.mean_waiting_time {
            waiting_time.count(mean);
        }
        blocking.count(stats.blocking_probability());
        last_reports = stats.reports;
        pb.inc(1);
    }
    pb.finish_with_message("All replications done");

    if cmd.verbose {
        for report in &last_reports {
            println!("{report}");
        }
    }

    for counter in [&waiting_time, &blocking] {
        println!("{}", counter.report());
        match counter.report_confidence_interval(cmd.alpha) {
            Ok(half_width) => println!(
                "  {:.1}% confidence interval: {} ± {half_width}",
                (1.0 - cmd.alpha) * 100.0,
                counter.mean()?,
            ),
            Err(error) => println!("  no confidence interval: {error}"),
        }
    }

    Ok(())
}
