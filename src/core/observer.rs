use rustc_hash::FxHashMap;

use super::state::{ProcessId, SimCtx, Ticks};

/// Checks run invariants after every tick in debug builds.
#[derive(Debug)]
pub struct Observer {
    step: u64,
    // Last seen waiting time per process
    waiting: FxHashMap<ProcessId, Ticks>,
}

impl Observer {
    pub fn new() -> Self {
        Self {
            step: 0,
            waiting: FxHashMap::default(),
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        if let Some(running) = &ctx.running {
            debug_assert!(
                running.has_executed,
                "Running process {} never marked executed",
                running.id
            );
            debug_assert!(
                running.start_time <= ctx.now,
                "Running process {} starts in the future",
                running.id
            );
        }

        for process in ctx.iter_processes() {
            debug_assert!(
                process.remaining_time <= process.burst_time,
                "Process {} remaining {} exceeds burst {}",
                process.id,
                process.remaining_time,
                process.burst_time
            );

            let previous = self.waiting.insert(process.id, process.waiting_time);
            debug_assert!(
                previous.is_none_or(|previous| previous <= process.waiting_time),
                "Process {} waiting time went backwards",
                process.id
            );
        }

        debug_assert_eq!(
            ctx.iter_processes().count(),
            self.waiting.len(),
            "A process is missing or held in two places"
        );
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}
