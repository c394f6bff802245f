use super::{Process, QUANTUM, Scheduler, SimCtx};
use crate::core::ReadyQueue;

/// FIFO rotation with a fixed quantum.
///
/// The quantum is measured from the running process's last dispatch. A
/// process alone on the CPU keeps running through quantum boundaries.
pub struct RoundRobinScheduler;

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin";

    fn init(ctx: &mut SimCtx) -> Self {
        ctx.install_ready_queue(ReadyQueue::new_fifo());
        Self
    }

    fn should_preempt(&mut self, ctx: &SimCtx, running: &Process) -> bool {
        let quantum_expired = (ctx.now - running.start_time) % QUANTUM == 0;
        quantum_expired && !ctx.ready.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArrivalPolicy, EmptyReadyPolicy};

    #[test]
    fn test_rotates_on_quantum_boundary_only() {
        let mut ctx = SimCtx::new(
            vec![Process::new(1, 0, 20, 0, 0)],
            30,
            ArrivalPolicy::FirstMatch,
            EmptyReadyPolicy::Idle,
        )
        .unwrap();
        let mut scheduler = RoundRobinScheduler::init(&mut ctx);
        ctx.ready.push(Process::new(2, 1, 3, 0, 0));
        let running = ctx.running.clone().unwrap();

        ctx.now = 4;
        assert!(!scheduler.should_preempt(&ctx, &running));
        ctx.now = 5;
        assert!(scheduler.should_preempt(&ctx, &running));
        ctx.now = 10;
        assert!(scheduler.should_preempt(&ctx, &running));
    }

    #[test]
    fn test_no_self_rotation_when_alone() {
        let mut ctx = SimCtx::new(
            vec![Process::new(1, 0, 20, 0, 0)],
            30,
            ArrivalPolicy::FirstMatch,
            EmptyReadyPolicy::Idle,
        )
        .unwrap();
        let mut scheduler = RoundRobinScheduler::init(&mut ctx);
        let running = ctx.running.clone().unwrap();

        ctx.now = 5;
        assert!(!scheduler.should_preempt(&ctx, &running));
    }
}
