use super::{Process, Scheduler, SimCtx};
use crate::core::ReadyQueue;

/// Shortest remaining time first. Ties on remaining time go to whichever
/// process entered the ready queue first.
pub struct SrtfScheduler;

impl Scheduler for SrtfScheduler {
    const NAME: &'static str = "Shortest Remaining Time First";

    fn init(ctx: &mut SimCtx) -> Self {
        ctx.install_ready_queue(ReadyQueue::new_priq_with_secondary(
            |process| process.remaining_time,
            |process| process.ready_queue_time,
        ));
        Self
    }

    fn should_preempt(&mut self, ctx: &SimCtx, running: &Process) -> bool {
        ctx.ready
            .peek()
            .is_ok_and(|candidate| candidate.remaining_time < running.remaining_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArrivalPolicy, EmptyReadyPolicy};

    fn ctx_with_running(remaining: u64) -> SimCtx {
        let mut running = Process::new(1, 0, 10, 0, 0);
        running.remaining_time = remaining;
        SimCtx::new(
            vec![running],
            20,
            ArrivalPolicy::FirstMatch,
            EmptyReadyPolicy::Idle,
        )
        .unwrap()
    }

    #[test]
    fn test_preempts_only_on_strictly_shorter_remaining() {
        let mut ctx = ctx_with_running(5);
        let mut scheduler = SrtfScheduler::init(&mut ctx);
        let running = ctx.running.clone().unwrap();

        assert!(!scheduler.should_preempt(&ctx, &running));

        ctx.ready.push(Process::new(2, 0, 5, 0, 0));
        assert!(!scheduler.should_preempt(&ctx, &running));

        ctx.ready.push(Process::new(3, 0, 2, 0, 0));
        assert!(scheduler.should_preempt(&ctx, &running));
    }

    #[test]
    fn test_equal_remaining_prefers_earlier_ready_time() {
        let mut ctx = ctx_with_running(9);
        SrtfScheduler::init(&mut ctx);
        let mut late = Process::new(2, 0, 4, 0, 0);
        late.ready_queue_time = 7;
        let mut early = Process::new(3, 0, 4, 0, 0);
        early.ready_queue_time = 2;
        ctx.ready.push(late);
        ctx.ready.push(early);

        assert_eq!(ctx.ready.peek().unwrap().id, 3);
    }
}
