use serde::Serialize;

use super::state::{Priority, ProcessId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimEvent {
    Arrived {
        process: ProcessId,
    },
    // Back from the waiting queue for another burst
    CameBack {
        process: ProcessId,
    },
    Aged {
        process: ProcessId,
        priority: Priority,
    },
    Dispatched {
        process: ProcessId,
    },
    Completed {
        process: ProcessId,
    },
    Preempted {
        process: ProcessId,
        by: ProcessId,
    },
    // Ready queue empty after a completion
    CpuIdle,
}
