use rand::prelude::*;
use rustc_hash::FxHashMap;
use sched_sim::{
    Algorithm, Scheduler, Sim, SimConfig, Workload,
    core::ArrivalPolicy,
    scheduler::{
        FcfsScheduler, NonPreemptivePriority, PreemptivePriority, RoundRobinScheduler,
        SjfScheduler, SrtfScheduler,
    },
};

const SEEDS: u64 = 16;

fn random_workload(seed: u64) -> Workload {
    let mut rng = StdRng::seed_from_u64(seed);
    let ticks = rng.random_range(20..120);
    Workload::bernoulli(ticks, 0.35, 0.4, 1, 9, seed)
}

/// Steps a run tick by tick, checking per-process bounds along the way.
fn check_stepwise<S: Scheduler>(workload: &Workload, config: &SimConfig) {
    let mut sim = Sim::<S>::new(workload, config).unwrap();
    let mut waiting: FxHashMap<u32, u64> = FxHashMap::default();

    while !sim.is_finished() {
        sim.step().unwrap();
        let mut seen = 0;
        for process in sim.processes() {
            seen += 1;
            assert!(
                process.remaining_time <= process.burst_time,
                "{} t={} P{} remaining above burst",
                S::NAME,
                sim.now(),
                process.id
            );
            let previous = waiting.insert(process.id, process.waiting_time).unwrap_or(0);
            assert!(
                previous <= process.waiting_time,
                "{} t={} P{} waiting time decreased",
                S::NAME,
                sim.now(),
                process.id
            );
        }
        assert_eq!(seen, workload.len(), "{} lost a process", S::NAME);
    }

    let report = sim.finish();
    let slices = report.trace.slices();
    assert_eq!(slices.first().map(|slice| slice.start), Some(0));
    assert_eq!(slices.last().map(|slice| slice.end), Some(config.horizon));
    assert!(slices.windows(2).all(|pair| pair[0].end == pair[1].start));
    assert!(slices.iter().all(|slice| slice.start < slice.end));
}

#[test]
fn test_stepwise_invariants_hold_for_random_workloads() {
    for seed in 0..SEEDS {
        let workload = random_workload(seed);
        for arrivals in [ArrivalPolicy::FirstMatch, ArrivalPolicy::All] {
            let config = SimConfig {
                arrivals,
                ..SimConfig::with_horizon(150)
            };
            check_stepwise::<FcfsScheduler>(&workload, &config);
            check_stepwise::<SjfScheduler>(&workload, &config);
            check_stepwise::<SrtfScheduler>(&workload, &config);
            check_stepwise::<RoundRobinScheduler>(&workload, &config);
            check_stepwise::<PreemptivePriority>(&workload, &config);
            check_stepwise::<NonPreemptivePriority>(&workload, &config);
        }
    }
}

#[test]
fn test_completed_processes_turnaround_covers_burst() {
    for seed in 0..SEEDS {
        let workload = random_workload(seed);
        let first = workload.processes[0].id;

        for algorithm in Algorithm::ALL {
            let report = algorithm
                .run(&workload, &SimConfig::with_horizon(150))
                .unwrap();

            // Only processes whose last CPU exit was a completion
            for process in report.processes.iter().filter(|process| {
                process.has_executed
                    && process.id != first
                    && process.finish_time > 0
                    && process.cpu_turn_time == process.finish_time
            }) {
                assert!(
                    process.turnaround_time() >= i128::from(process.burst_time),
                    "{algorithm} seed {seed}: P{} turnaround {} below burst {}",
                    process.id,
                    process.turnaround_time(),
                    process.burst_time
                );
            }
        }
    }
}

#[test]
fn test_statistics_count_only_executed() {
    for seed in 0..SEEDS {
        let workload = random_workload(seed);
        for algorithm in Algorithm::ALL {
            let report = algorithm.run(&workload, &SimConfig::default()).unwrap();
            let executed = report
                .processes
                .iter()
                .filter(|process| process.has_executed)
                .count();

            let stats = report.statistics.unwrap();
            assert_eq!(stats.executed, executed);
            assert!(stats.average_waiting_time >= 0.0);
        }
    }
}

#[test]
fn test_occupancy_fills_horizon() {
    let workload = Workload::reference();
    for algorithm in Algorithm::ALL {
        let report = algorithm.run(&workload, &SimConfig::default()).unwrap();
        let busy: u64 = report.trace.occupancy().iter().map(|(_, ticks)| ticks).sum();
        let idle: u64 = report
            .trace
            .slices()
            .iter()
            .filter(|slice| slice.is_idle())
            .map(|slice| slice.duration())
            .sum();

        assert_eq!(busy + idle, 200, "{algorithm}");
    }
}
