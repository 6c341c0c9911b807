//! outbreak: headless driver for the contagion simulation engine.
//!
//! Runs a simulation to completion and logs each reporter sample. A display
//! harness would call the same engine API and draw the snapshots instead.
//!
//! Usage:
//!   outbreak [--population N] [--seed N] [--recovery T] [--infect ID,ID,..]
//!            [--mixing CELL_SIZE] [--lockdown-at TICK] [--max-ticks N]

use std::process;

use outbreak_core::commands::EngineCommand;
use outbreak_core::enums::{SpeedProfile, SpreadModel};
use outbreak_sim::{SimConfig, Simulation};

struct Args {
    config: SimConfig,
    infect: Vec<u32>,
    lockdown_at: Option<u64>,
    max_ticks: u64,
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };

    let mut sim = match Simulation::new(args.config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };
    if let Err(err) = sim.seed_infection(&args.infect) {
        eprintln!("{err}");
        process::exit(1);
    }

    let mut samples_logged = 1;
    let mut ticks = 0u64;
    while !sim.is_complete() && ticks < args.max_ticks {
        if args.lockdown_at == Some(ticks) {
            sim.queue_command(EngineCommand::SetSpeedProfile {
                profile: SpeedProfile::Slow,
            });
        }
        sim.tick();
        ticks += 1;

        let history = sim.report_history();
        for sample in &history[samples_logged..] {
            log::info!(
                "t={:.1} susceptible={} infectious={} recovered={} vaccinated={}",
                sample.elapsed,
                sample.susceptible,
                sample.infectious,
                sample.recovered,
                sample.vaccinated
            );
        }
        samples_logged = history.len();
    }

    let report = sim.report();
    println!(
        "finished after {ticks} ticks: {} never infected, {} recovered, {} vaccinated",
        report.susceptible, report.recovered, report.vaccinated
    );
    if !sim.is_complete() {
        eprintln!("tick budget exhausted before the outbreak ended");
        process::exit(2);
    }
}

fn print_usage() {
    eprintln!(
        "outbreak: contagion simulation driver\n\
         \n\
         Options:\n\
           --population <N>     population size (default 100)\n\
           --seed <N>           RNG seed (default 42)\n\
           --recovery <T>       recovery duration in time units (default 4.0)\n\
           --infect <ID,ID,..>  ids to seed as infectious (default 0)\n\
           --mixing <N>         use group mixing with the given cell size\n\
           --lockdown-at <T>    switch to the slow speed profile at this tick\n\
           --max-ticks <N>      tick budget (default 100000)"
    );
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: SimConfig::default(),
        infect: vec![0],
        lockdown_at: None,
        max_ticks: 100_000,
    };

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut i = 0;
    while i < argv.len() {
        let flag = argv[i].as_str();
        if matches!(flag, "help" | "--help" | "-h") {
            print_usage();
            process::exit(0);
        }
        let value = argv
            .get(i + 1)
            .ok_or_else(|| format!("missing value for {flag}"))?;
        match flag {
            "--population" => args.config.population_size = parse(flag, value)?,
            "--seed" => args.config.seed = parse(flag, value)?,
            "--recovery" => args.config.recovery_duration = parse(flag, value)?,
            "--max-ticks" => args.max_ticks = parse(flag, value)?,
            "--lockdown-at" => args.lockdown_at = Some(parse(flag, value)?),
            "--mixing" => {
                args.config.spread = SpreadModel::GroupMixing {
                    cell_size: parse(flag, value)?,
                    interval_ticks: 1,
                };
            }
            "--infect" => {
                args.infect = value
                    .split(',')
                    .map(|part| parse(flag, part))
                    .collect::<Result<_, _>>()?;
            }
            other => return Err(format!("unknown option: {other}")),
        }
        i += 2;
    }
    Ok(args)
}

fn parse<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value for {flag}: {value}"))
}
