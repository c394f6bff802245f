use thiserror::Error;

use super::state::{ProcessId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue is empty")]
    Empty,

    #[error("no queued entry matches the item")]
    NotFound,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("ready queue empty when dispatching at tick {tick}")]
    EmptyReadyQueue { tick: Ticks },

    #[error("queue invariant violated: {0}")]
    Queue(#[from] QueueError),

    #[error("workload contains no processes")]
    EmptyWorkload,

    #[error("process id {0} appears more than once in the workload")]
    DuplicateProcess(ProcessId),

    #[error("horizon must be at least one tick")]
    InvalidHorizon,

    #[error("simulation already reached its horizon of {0} ticks")]
    HorizonReached(Ticks),

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to read workload: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse workload: {0}")]
    Parse(#[from] serde_json::Error),
}
