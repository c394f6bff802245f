use rand::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::core::{Priority, Process, ProcessId, SimError, Ticks};

/// Static description of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    #[serde(default)]
    pub comeback_time: Ticks,
    #[serde(default)]
    pub priority: Priority,
}

impl ProcessSpec {
    pub fn new(
        id: ProcessId,
        arrival_time: Ticks,
        burst_time: Ticks,
        comeback_time: Ticks,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            comeback_time,
            priority,
        }
    }
}

impl From<&ProcessSpec> for Process {
    fn from(spec: &ProcessSpec) -> Self {
        Process::new(
            spec.id,
            spec.arrival_time,
            spec.burst_time,
            spec.comeback_time,
            spec.priority,
        )
    }
}

/// Ordered set of processes. The first entry owns the CPU at tick 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    pub fn new(processes: Vec<ProcessSpec>) -> Self {
        Self { processes }
    }

    /// Seven recurring processes: (arrival, burst, comeback, priority).
    pub fn reference() -> Self {
        Self::new(vec![
            ProcessSpec::new(1, 0, 10, 2, 3),
            ProcessSpec::new(2, 1, 8, 4, 2),
            ProcessSpec::new(3, 3, 14, 6, 3),
            ProcessSpec::new(4, 4, 7, 8, 1),
            ProcessSpec::new(5, 6, 5, 3, 0),
            ProcessSpec::new(6, 7, 4, 6, 1),
            ProcessSpec::new(7, 8, 6, 9, 2),
        ])
    }

    /// Random workload with one Bernoulli arrival trial per tick.
    pub fn bernoulli(
        ticks: Ticks,
        p_arrival: f64,
        p_short: f64,
        short_ticks: Ticks,
        long_ticks: Ticks,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut processes = Vec::new();

        for t in 0..ticks {
            // The first process runs at tick 0 whatever its arrival
            if processes.is_empty() || rng.random::<f64>() < p_arrival {
                let burst_time = if rng.random::<f64>() < p_short {
                    short_ticks
                } else {
                    long_ticks
                };

                processes.push(ProcessSpec {
                    id: processes.len() as ProcessId + 1,
                    arrival_time: t,
                    burst_time,
                    comeback_time: rng.random_range(0..=2 * long_ticks),
                    priority: rng.random_range(0..=4),
                });
            }
        }

        Self::new(processes)
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let workload: Self = serde_json::from_str(json)?;
        workload.validate()?;
        Ok(workload)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.processes.is_empty() {
            return Err(SimError::EmptyWorkload);
        }

        let mut seen = FxHashSet::default();
        for spec in &self.processes {
            if !seen.insert(spec.id) {
                return Err(SimError::DuplicateProcess(spec.id));
            }
        }
        Ok(())
    }

    /// Fresh, independent process state for one run.
    pub fn instantiate(&self) -> Vec<Process> {
        self.processes.iter().map(Process::from).collect()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}
