use super::{AGING_INTERVAL, Process, Scheduler, SimCtx};
use crate::core::{ReadyQueue, SimEvent};

/// Priority scheduling with aging. Lower values run first.
///
/// Every [`AGING_INTERVAL`] ticks spent in the ready queue lowers a
/// process's priority value by one, down to zero. With `PREEMPTIVE` set, a
/// ready process with a strictly better priority takes the CPU immediately.
pub struct PriorityScheduler<const PREEMPTIVE: bool>;

pub type PreemptivePriority = PriorityScheduler<true>;
pub type NonPreemptivePriority = PriorityScheduler<false>;

impl<const PREEMPTIVE: bool> Scheduler for PriorityScheduler<PREEMPTIVE> {
    const NAME: &'static str = if PREEMPTIVE {
        "Preemptive Priority with Aging"
    } else {
        "Non-preemptive Priority with Aging"
    };

    fn init(ctx: &mut SimCtx) -> Self {
        ctx.install_ready_queue(ReadyQueue::new_priq_with_secondary(
            |process| process.priority as u64,
            |process| process.ready_queue_time,
        ));
        Self
    }

    fn age(&mut self, ctx: &mut SimCtx) {
        let now = ctx.now;
        let mut aged = Vec::new();

        // Keys change in place, so the queue is rebuilt after the pass
        ctx.ready.update_all(|process| {
            if (now - process.ready_queue_time) % AGING_INTERVAL == 0 {
                process.decrease_priority();
                aged.push((process.id, process.priority));
            }
        });

        for (process, priority) in aged {
            ctx.emit(SimEvent::Aged { process, priority });
        }
    }

    fn should_preempt(&mut self, ctx: &SimCtx, running: &Process) -> bool {
        PREEMPTIVE
            && ctx
                .ready
                .peek()
                .is_ok_and(|candidate| candidate.priority < running.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArrivalPolicy, EmptyReadyPolicy};

    fn with_running(running_priority: u32) -> SimCtx {
        SimCtx::new(
            vec![Process::new(1, 0, 50, 0, running_priority)],
            100,
            ArrivalPolicy::FirstMatch,
            EmptyReadyPolicy::Idle,
        )
        .unwrap()
    }

    #[test]
    fn test_aging_lowers_priority_every_interval_down_to_zero() {
        let mut ctx = with_running(0);
        let mut scheduler = PreemptivePriority::init(&mut ctx);
        ctx.ready.push(Process::new(2, 0, 5, 0, 3));

        let mut seen = Vec::new();
        for tick in 1..=25 {
            ctx.now = tick;
            scheduler.age(&mut ctx);
            seen.push((tick, ctx.ready.peek().unwrap().priority));
        }

        let at = |tick: u64| seen.iter().find(|(t, _)| *t == tick).unwrap().1;
        assert_eq!(at(4), 3);
        assert_eq!(at(5), 2);
        assert_eq!(at(9), 2);
        assert_eq!(at(10), 1);
        assert_eq!(at(15), 0);
        assert_eq!(at(20), 0);
        assert_eq!(at(25), 0);

        let aged = ctx
            .take_events()
            .into_iter()
            .filter(|event| matches!(event, SimEvent::Aged { .. }))
            .count();
        assert_eq!(aged, 5);
    }

    #[test]
    fn test_aging_reorders_ready_queue() {
        let mut ctx = with_running(0);
        let mut scheduler = NonPreemptivePriority::init(&mut ctx);
        let mut stale = Process::new(2, 0, 5, 0, 2);
        stale.ready_queue_time = 0;
        let mut fresh = Process::new(3, 0, 5, 0, 1);
        fresh.ready_queue_time = 3;
        ctx.ready.push(stale);
        ctx.ready.push(fresh);
        assert_eq!(ctx.ready.peek().unwrap().id, 3);

        // Process 2 ages at 5 and 10, process 3 at 8
        for tick in 4..=10 {
            ctx.now = tick;
            scheduler.age(&mut ctx);
        }

        assert_eq!(ctx.ready.peek().unwrap().id, 2);
        assert_eq!(ctx.ready.peek().unwrap().priority, 0);
    }

    #[test]
    fn test_preemption_depends_on_mode() {
        let mut ctx = with_running(3);
        let mut preemptive = PreemptivePriority::init(&mut ctx);
        ctx.ready.push(Process::new(2, 0, 5, 0, 1));
        let running = ctx.running.clone().unwrap();
        assert!(preemptive.should_preempt(&ctx, &running));

        let mut ctx = with_running(3);
        let mut non_preemptive = NonPreemptivePriority::init(&mut ctx);
        ctx.ready.push(Process::new(2, 0, 5, 0, 1));
        let running = ctx.running.clone().unwrap();
        assert!(!non_preemptive.should_preempt(&ctx, &running));
    }

    #[test]
    fn test_equal_priority_does_not_preempt() {
        let mut ctx = with_running(2);
        let mut scheduler = PreemptivePriority::init(&mut ctx);
        ctx.ready.push(Process::new(2, 0, 5, 0, 2));
        let running = ctx.running.clone().unwrap();

        assert!(!scheduler.should_preempt(&ctx, &running));
    }
}
