use average::{Estimate, Mean};
use serde::Serialize;

use crate::core::Process;

/// Averages over processes that held the CPU at least once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub executed: usize,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
}

impl Statistics {
    /// `None` when no process ever ran.
    pub fn collect<'a>(processes: impl IntoIterator<Item = &'a Process>) -> Option<Self> {
        let executed: Vec<&Process> = processes
            .into_iter()
            .filter(|process| process.has_executed)
            .collect();
        if executed.is_empty() {
            return None;
        }

        Some(Self {
            executed: executed.len(),
            average_waiting_time: avg(executed.iter().map(|p| p.waiting_time as f64)),
            average_turnaround_time: avg(executed.iter().map(|p| p.turnaround_time() as f64)),
        })
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}
