use super::{
    error::SimError,
    event::SimEvent,
    observer::Observer,
    state::{ArrivalPolicy, EmptyReadyPolicy, Process, SimCtx, Ticks},
};
use crate::scheduler::Scheduler;

/// The tick loop shared by every scheduling policy.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(
        workload: Vec<Process>,
        horizon: Ticks,
        arrivals: ArrivalPolicy,
        on_empty_ready: EmptyReadyPolicy,
    ) -> Result<Self, SimError> {
        let mut ctx = SimCtx::new(workload, horizon, arrivals, on_empty_ready)?;
        let scheduler = S::init(&mut ctx);
        let mut observer = Observer::new();
        observer.observe(&ctx);
        Ok(Self {
            ctx,
            scheduler,
            observer,
        })
    }

    /// Advances one tick and returns what happened during it.
    pub fn tick(&mut self) -> Result<Vec<SimEvent>, SimError> {
        self.ctx.advance_time(1);

        self.scheduler.age(&mut self.ctx);
        self.ctx.admit_arrivals();
        self.ctx.admit_comebacks();
        self.ctx.advance_running();

        // Completion and preemption are mutually exclusive within a tick
        if self.ctx.is_idle() {
            self.ctx.dispatch_from_idle();
        } else if self.ctx.running_completed() {
            self.ctx.complete_running()?;
        } else if self.preemption_due() {
            self.ctx.preempt_running()?;
        }

        self.observer.observe(&self.ctx);
        Ok(self.ctx.take_events())
    }

    fn preemption_due(&mut self) -> bool {
        match self.ctx.running.as_ref() {
            Some(running) => self.scheduler.should_preempt(&self.ctx, running),
            None => false,
        }
    }

    /// Whether every tick before the horizon has been simulated.
    pub fn at_horizon(&self) -> bool {
        self.ctx.now + 1 >= self.ctx.horizon
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
