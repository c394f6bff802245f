use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{config::SimConfig, stats::Statistics, workload::Workload};
use crate::{
    core::{GanttTrace, Process, ProcessId, SchedCore, SimError, SimEvent, Ticks},
    scheduler::{
        FcfsScheduler, NonPreemptivePriority, PreemptivePriority, RoundRobinScheduler, Scheduler,
        SjfScheduler, SrtfScheduler,
    },
};

/// One simulation run of policy `S` over a private copy of a workload.
pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(workload: &Workload, config: &SimConfig) -> Result<Self, SimError> {
        workload.validate()?;
        config.validate()?;

        let core = SchedCore::new(
            workload.instantiate(),
            config.horizon,
            config.arrivals,
            config.on_empty_ready,
        )?;
        Ok(Self { core })
    }

    pub fn step(&mut self) -> Result<Vec<SimEvent>, SimError> {
        if self.core.at_horizon() {
            return Err(SimError::HorizonReached(self.core.ctx.horizon));
        }
        self.core.tick()
    }

    pub fn is_finished(&self) -> bool {
        self.core.at_horizon()
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    pub fn processes(&self) -> impl Iterator<Item = &Process> + '_ {
        self.core.ctx.iter_processes()
    }

    pub fn run(self) -> Result<RunReport, SimError> {
        self.run_observed(|_, _| {})
    }

    /// Runs to the horizon, handing each tick's events to `on_tick`.
    pub fn run_observed(
        mut self,
        mut on_tick: impl FnMut(Ticks, &[SimEvent]),
    ) -> Result<RunReport, SimError> {
        log::info!("{}: simulating {} ticks", S::NAME, self.core.ctx.horizon);
        while !self.is_finished() {
            let events = self.step()?;
            on_tick(self.now(), &events);
        }
        Ok(self.finish())
    }

    /// Closes the trace at the horizon and collects final process state.
    pub fn finish(self) -> RunReport {
        let mut ctx = self.core.ctx;
        ctx.close_trace();
        let (trace, processes) = ctx.into_processes();
        let statistics = Statistics::collect(&processes);

        log::info!(
            "{}: {} gantt slices, {} processes executed",
            S::NAME,
            trace.len(),
            statistics.map_or(0, |stats| stats.executed)
        );
        RunReport {
            name: S::NAME,
            trace,
            processes,
            statistics,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub name: &'static str,
    pub trace: GanttTrace,
    /// Final state of every process, sorted by id.
    pub processes: Vec<Process>,
    pub statistics: Option<Statistics>,
}

impl RunReport {
    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|process| process.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Fcfs,
    Sjf,
    Srtf,
    RoundRobin,
    PriorityPreemptive,
    PriorityNonPreemptive,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::RoundRobin,
        Algorithm::Srtf,
        Algorithm::PriorityPreemptive,
        Algorithm::PriorityNonPreemptive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => FcfsScheduler::NAME,
            Algorithm::Sjf => SjfScheduler::NAME,
            Algorithm::Srtf => SrtfScheduler::NAME,
            Algorithm::RoundRobin => RoundRobinScheduler::NAME,
            Algorithm::PriorityPreemptive => PreemptivePriority::NAME,
            Algorithm::PriorityNonPreemptive => NonPreemptivePriority::NAME,
        }
    }

    /// Runs this algorithm on a fresh copy of `workload`.
    pub fn run(self, workload: &Workload, config: &SimConfig) -> Result<RunReport, SimError> {
        self.run_observed(workload, config, |_, _| {})
    }

    pub fn run_observed(
        self,
        workload: &Workload,
        config: &SimConfig,
        on_tick: impl FnMut(Ticks, &[SimEvent]),
    ) -> Result<RunReport, SimError> {
        match self {
            Algorithm::Fcfs => Sim::<FcfsScheduler>::new(workload, config)?.run_observed(on_tick),
            Algorithm::Sjf => Sim::<SjfScheduler>::new(workload, config)?.run_observed(on_tick),
            Algorithm::Srtf => Sim::<SrtfScheduler>::new(workload, config)?.run_observed(on_tick),
            Algorithm::RoundRobin => {
                Sim::<RoundRobinScheduler>::new(workload, config)?.run_observed(on_tick)
            }
            Algorithm::PriorityPreemptive => {
                Sim::<PreemptivePriority>::new(workload, config)?.run_observed(on_tick)
            }
            Algorithm::PriorityNonPreemptive => {
                Sim::<NonPreemptivePriority>::new(workload, config)?.run_observed(on_tick)
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "fcfs" | "1" => Ok(Algorithm::Fcfs),
            "sjf" | "2" => Ok(Algorithm::Sjf),
            "rr" | "round_robin" | "3" => Ok(Algorithm::RoundRobin),
            "srtf" | "4" => Ok(Algorithm::Srtf),
            "pp" | "priority_preemptive" | "5" => Ok(Algorithm::PriorityPreemptive),
            "np" | "priority_non_preemptive" | "6" => Ok(Algorithm::PriorityNonPreemptive),
            _ => Err(SimError::UnknownAlgorithm(s.to_owned())),
        }
    }
}
