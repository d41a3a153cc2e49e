//! `u-procsim` command-line front end.
//!
//! ```text
//! u-procsim <FILE> [--policy fcfs|sjf] [--fit first|best|worst] [--config PATH]
//! ```
//!
//! `--fit` enables memory allocation against the configured partition
//! table (the reference table when no config file is given).

use anyhow::{bail, Context, Result};
use tracing::info;

use u_procsim::config::{MemoryConfig, SimulationConfig};
use u_procsim::dispatching::Policy;
use u_procsim::logging::init_tracing;
use u_procsim::memory::FitStrategy;
use u_procsim::simulation::{simulate_file, SimulationReport};

const USAGE: &str =
    "usage: u-procsim <FILE> [--policy fcfs|sjf] [--fit first|best|worst] [--config PATH]";

struct Args {
    input: String,
    config: SimulationConfig,
}

fn parse_args() -> Result<Args> {
    let mut input = None;
    let mut policy = None;
    let mut fit = None;
    let mut config_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--policy" | "-p" => policy = Some(args.next().context("--policy needs a value")?),
            "--fit" | "-f" => fit = Some(args.next().context("--fit needs a value")?),
            "--config" | "-c" => config_path = Some(args.next().context("--config needs a value")?),
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown option '{flag}'\n{USAGE}"),
            _ if input.is_none() => input = Some(arg),
            _ => bail!("unexpected argument '{arg}'\n{USAGE}"),
        }
    }

    let input = input.with_context(|| format!("missing input file\n{USAGE}"))?;

    let mut config = match config_path {
        Some(path) => SimulationConfig::from_file(&path)
            .with_context(|| format!("loading config {path}"))?,
        None => SimulationConfig::default(),
    };
    if let Some(policy) = policy {
        config.policy = policy.parse::<Policy>()?;
    }
    if let Some(fit) = fit {
        let strategy = fit.parse::<FitStrategy>()?;
        config
            .memory
            .get_or_insert_with(MemoryConfig::default)
            .strategy = strategy;
    }

    Ok(Args { input, config })
}

fn print_report(report: &SimulationReport) {
    println!("\n--- {} ---", report.policy);

    for entry in &report.schedule.entries {
        if let Some(block) = &entry.block {
            println!("Process {} allocated at block {}", entry.id(), block);
        }
    }
    for failure in &report.schedule.allocation_failures {
        println!("{failure}");
    }

    println!(
        "\n{:>5} {:>8} {:>6} {:>6} {:>7} {:>5} {:>5}",
        "PID", "Arrival", "Burst", "Start", "Finish", "WT", "TAT"
    );
    for m in &report.metrics.per_process {
        println!(
            "{:>5} {:>8} {:>6} {:>6} {:>7} {:>5} {:>5}",
            m.process_id,
            m.arrival_time,
            m.burst_time,
            m.start_time,
            m.finish_time,
            m.waiting_time,
            m.turnaround_time
        );
    }

    match (
        report.metrics.average_waiting_time,
        report.metrics.average_turnaround_time,
    ) {
        (Some(wt), Some(tat)) => {
            println!("\nAverage WT  = {wt:.2}");
            println!("Average TAT = {tat:.2}");
        }
        _ => println!("\nNo processes executed; averages undefined."),
    }
    if let Some(util) = report.metrics.cpu_utilization {
        println!("CPU utilization = {:.1}%", util * 100.0);
    }

    if !report.is_empty() {
        println!("\nGantt Chart:");
        print!("{}", report.gantt());
    }
}

fn main() -> Result<()> {
    init_tracing();

    let args = parse_args()?;
    info!(input = %args.input, policy = %args.config.policy, "starting simulation");

    let report = simulate_file(&args.input, &args.config)
        .with_context(|| format!("simulating {}", args.input))?;
    print_report(&report);
    Ok(())
}
