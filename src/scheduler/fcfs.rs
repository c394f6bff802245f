use super::{Scheduler, SimCtx};
use crate::core::ReadyQueue;

/// First-come-first-served: FIFO ready queue, never preempts.
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "First Come First Served";

    fn init(ctx: &mut SimCtx) -> Self {
        ctx.install_ready_queue(ReadyQueue::new_fifo());
        Self
    }
}
