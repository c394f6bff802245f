pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{GanttSlice, GanttTrace, Process, SimError, SimEvent};
pub use scheduler::Scheduler;
pub use sim::{Algorithm, ProcessSpec, RunReport, Sim, SimConfig, Statistics, Workload};
