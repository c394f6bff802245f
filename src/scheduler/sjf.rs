use super::{Scheduler, SimCtx};
use crate::core::ReadyQueue;

/// Non-preemptive shortest job first, keyed on the full burst length.
pub struct SjfScheduler;

impl Scheduler for SjfScheduler {
    const NAME: &'static str = "Shortest Job First";

    fn init(ctx: &mut SimCtx) -> Self {
        ctx.install_ready_queue(ReadyQueue::new_priq(|process| process.burst_time));
        Self
    }
}
