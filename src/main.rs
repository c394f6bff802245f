use sched_sim::{
    Algorithm, GanttTrace, RunReport, SimConfig, SimError, Workload,
    core::{ArrivalPolicy, EmptyReadyPolicy},
};
use std::{env, process::ExitCode};

const SLICES_PER_LINE: usize = 5;

struct Args {
    algorithms: Vec<Algorithm>,
    workload: Workload,
    config: SimConfig,
    show_events: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!(
                "usage: sched_sim [ALGORITHM|all] [WORKLOAD.json] [--horizon N] [--seed S] [--all-arrivals] [--abort-when-idle] [--events]"
            );
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for algorithm in &args.algorithms {
        println!("=== {algorithm}");
        let result = algorithm.run_observed(&args.workload, &args.config, |now, events| {
            if args.show_events {
                for event in events {
                    println!("t={now} {event:?}");
                }
            }
        });

        // A failed run only aborts that algorithm
        match result {
            Ok(report) => print_report(&report),
            Err(err) => {
                eprintln!("{algorithm} aborted: {err}");
                failed = true;
            }
        }
        println!();
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, SimError> {
    let mut algorithms = Algorithm::ALL.to_vec();
    let mut workload = None;
    let mut seed = None;
    let mut config = SimConfig::default();
    let mut show_events = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--horizon" => {
                config.horizon = parse_number(args.next(), "--horizon")?;
            }
            "--seed" => seed = Some(parse_number(args.next(), "--seed")?),
            "--all-arrivals" => config.arrivals = ArrivalPolicy::All,
            "--abort-when-idle" => {
                config.on_empty_ready = EmptyReadyPolicy::Abort;
            }
            "--events" => show_events = true,
            "all" => algorithms = Algorithm::ALL.to_vec(),
            path if path.ends_with(".json") => workload = Some(Workload::load(path)?),
            name => algorithms = vec![name.parse()?],
        }
    }

    config.validate()?;
    let workload = match (workload, seed) {
        (Some(workload), _) => workload,
        (None, Some(seed)) => Workload::bernoulli(config.horizon, 0.3, 0.3, 2, 6, seed),
        (None, None) => Workload::reference(),
    };
    Ok(Args {
        algorithms,
        workload,
        config,
        show_events,
    })
}

fn parse_number(value: Option<String>, flag: &str) -> Result<u64, SimError> {
    value
        .as_deref()
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| SimError::InvalidArgument(format!("{flag} expects a number")))
}

fn print_report(report: &RunReport) {
    println!("Gantt chart:\n");
    print_gantt(&report.trace);
    println!();

    match &report.statistics {
        Some(stats) => {
            println!("Average waiting time is: {:.2}", stats.average_waiting_time);
            println!(
                "Average turnaround time is: {:.2}",
                stats.average_turnaround_time
            );
        }
        None => println!("No process executed."),
    }

    let idle: u64 = report
        .trace
        .slices()
        .iter()
        .filter(|slice| slice.is_idle())
        .map(|slice| slice.duration())
        .sum();
    if idle > 0 {
        println!("CPU idle for {idle} ticks");
    }
}

fn print_gantt(trace: &GanttTrace) {
    for (index, slice) in trace.into_iter().enumerate() {
        let occupant = slice
            .process
            .map_or_else(|| "--".to_owned(), |id| format!("P{id}"));
        print!("{:<3} ||{:<2}|| {:<3}\t  ", slice.start, occupant, slice.end);
        if (index + 1) % SLICES_PER_LINE == 0 {
            println!("\n");
        }
    }
    println!();
}
