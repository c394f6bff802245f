use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{
    error::{QueueError, SimError},
    event::SimEvent,
    gantt::GanttTrace,
    queue::ReadyQueue,
};

pub type ProcessId = u32;
pub type Ticks = u64;
pub type Priority = u32;

/// Which arrivals are admitted when several share the same tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalPolicy {
    /// Only the first matching workload entry is admitted per tick.
    #[default]
    FirstMatch,
    All,
}

/// What happens when the CPU needs a new process and none is ready.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReadyPolicy {
    #[default]
    Idle,
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    /// Ticks spent away after a completed burst before re-entering the ready queue.
    pub comeback_time: Ticks,
    pub priority: Priority,
    pub remaining_time: Ticks,
    pub finish_time: Ticks,
    /// Tick the process last left the CPU, including truncation at the horizon.
    pub cpu_turn_time: Ticks,
    pub waiting_time: Ticks,
    pub ready_queue_time: Ticks,
    pub start_time: Ticks,
    pub has_executed: bool,
}

impl Process {
    pub fn new(
        id: ProcessId,
        arrival_time: Ticks,
        burst_time: Ticks,
        comeback_time: Ticks,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            comeback_time,
            priority,
            remaining_time: burst_time,
            finish_time: 0,
            cpu_turn_time: 0,
            waiting_time: 0,
            ready_queue_time: 0,
            start_time: 0,
            has_executed: false,
        }
    }

    pub fn decrease_remaining(&mut self) {
        self.remaining_time = self.remaining_time.saturating_sub(1);
    }

    pub fn decrease_priority(&mut self) {
        self.priority = self.priority.saturating_sub(1);
    }

    /// Signed: the tick-0 process can leave the CPU before its `arrival_time`.
    pub fn turnaround_time(&self) -> i128 {
        i128::from(self.cpu_turn_time) - i128::from(self.arrival_time)
    }
}

/// Mutable state of one simulation run.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub horizon: Ticks,
    pub running: Option<Process>,
    pub ready: ReadyQueue,
    // Finished a burst, cooling down for comeback_time ticks
    pub waiting: VecDeque<Process>,
    // Not yet arrived, in workload order
    pub pending: Vec<Process>,
    pub trace: GanttTrace,
    pub arrivals: ArrivalPolicy,
    pub on_empty_ready: EmptyReadyPolicy,

    idle_since: Option<Ticks>,
    events: Vec<SimEvent>,
}

impl SimCtx {
    /// The first workload entry is put on the CPU at tick 0.
    pub fn new(
        mut workload: Vec<Process>,
        horizon: Ticks,
        arrivals: ArrivalPolicy,
        on_empty_ready: EmptyReadyPolicy,
    ) -> Result<Self, SimError> {
        if horizon == 0 {
            return Err(SimError::InvalidHorizon);
        }
        if workload.is_empty() {
            return Err(SimError::EmptyWorkload);
        }

        let mut first = workload.remove(0);
        first.has_executed = true;
        first.start_time = 0;

        Ok(Self {
            now: 0,
            horizon,
            running: Some(first),
            ready: ReadyQueue::new_fifo(),
            waiting: VecDeque::new(),
            pending: workload,
            trace: GanttTrace::new(),
            arrivals,
            on_empty_ready,
            idle_since: None,
            events: Vec::new(),
        })
    }

    pub fn install_ready_queue(&mut self, ready: ReadyQueue) {
        debug_assert!(self.ready.is_empty(), "Replacing a non-empty ready queue");
        self.ready = ready;
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn emit(&mut self, event: SimEvent) {
        log::trace!("t={} {:?}", self.now, event);
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }

    pub fn admit_arrivals(&mut self) {
        let now = self.now;
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].arrival_time != now {
                index += 1;
                continue;
            }

            let mut process = self.pending.remove(index);
            process.ready_queue_time = now;
            self.emit(SimEvent::Arrived {
                process: process.id,
            });
            self.ready.push(process);

            if self.arrivals == ArrivalPolicy::FirstMatch {
                break;
            }
        }
    }

    pub fn admit_comebacks(&mut self) {
        let now = self.now;
        let mut staying = VecDeque::with_capacity(self.waiting.len());
        let mut returned = Vec::new();

        for mut process in self.waiting.drain(..) {
            if process.finish_time.checked_add(process.comeback_time) == Some(now) {
                process.remaining_time = process.burst_time;
                process.ready_queue_time = now;
                returned.push(process);
            } else {
                staying.push_back(process);
            }
        }
        self.waiting = staying;

        for process in returned {
            self.emit(SimEvent::CameBack {
                process: process.id,
            });
            self.ready.push(process);
        }
    }

    pub fn advance_running(&mut self) {
        if let Some(process) = self.running.as_mut() {
            process.decrease_remaining();
        }
    }

    pub fn running_completed(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|process| process.remaining_time == 0)
    }

    /// Moves the finished running process to the waiting queue and hands the
    /// CPU to the next ready process.
    pub fn complete_running(&mut self) -> Result<(), SimError> {
        let Some(mut done) = self.running.take() else {
            return Ok(());
        };
        let now = self.now;

        self.trace.close(done.start_time, now, Some(done.id));
        done.finish_time = now;
        done.cpu_turn_time = now;
        log::debug!("t={now} P{} completed its burst", done.id);
        self.emit(SimEvent::Completed { process: done.id });
        self.waiting.push_back(done);

        self.dispatch_next()
    }

    /// Swaps the running process for the head of the ready queue.
    pub fn preempt_running(&mut self) -> Result<(), SimError> {
        let Some(mut prev) = self.running.take() else {
            return Ok(());
        };
        let next = match self.ready.pop() {
            Ok(next) => next,
            Err(err) => {
                self.running = Some(prev);
                return Err(err.into());
            }
        };
        let now = self.now;

        self.trace.close(prev.start_time, now, Some(prev.id));
        prev.ready_queue_time = now;
        prev.cpu_turn_time = now;
        log::debug!("t={now} P{} preempted by P{}", prev.id, next.id);
        self.emit(SimEvent::Preempted {
            process: prev.id,
            by: next.id,
        });
        self.ready.push(prev);

        self.dispatch(next);
        Ok(())
    }

    /// Puts the next ready process on an idle CPU, if there is one.
    pub fn dispatch_from_idle(&mut self) {
        debug_assert!(self.is_idle(), "CPU is not idle");
        if let Ok(next) = self.ready.pop() {
            self.dispatch(next);
        }
    }

    fn dispatch_next(&mut self) -> Result<(), SimError> {
        match self.ready.pop() {
            Ok(next) => {
                self.dispatch(next);
                Ok(())
            }
            Err(QueueError::Empty) => match self.on_empty_ready {
                EmptyReadyPolicy::Idle => {
                    log::debug!("t={} CPU idle", self.now);
                    self.idle_since = Some(self.now);
                    self.emit(SimEvent::CpuIdle);
                    Ok(())
                }
                EmptyReadyPolicy::Abort => Err(SimError::EmptyReadyQueue { tick: self.now }),
            },
            Err(err) => Err(err.into()),
        }
    }

    fn dispatch(&mut self, mut next: Process) {
        let now = self.now;
        if let Some(since) = self.idle_since.take() {
            self.trace.close(since, now, None);
        }

        next.waiting_time += now - next.ready_queue_time;
        next.has_executed = true;
        next.start_time = now;
        log::debug!(
            "t={now} P{} dispatched after waiting {} ticks",
            next.id,
            now - next.ready_queue_time
        );
        self.emit(SimEvent::Dispatched { process: next.id });
        self.running = Some(next);
    }

    /// Closes the open gantt slice at the horizon.
    pub fn close_trace(&mut self) {
        let horizon = self.horizon;
        if let Some(process) = self.running.as_mut() {
            process.cpu_turn_time = horizon;
            self.trace
                .close(process.start_time, horizon, Some(process.id));
        } else if let Some(since) = self.idle_since.take() {
            self.trace.close(since, horizon, None);
        }
    }

    /// Every process of the run, wherever it currently sits.
    pub fn iter_processes(&self) -> impl Iterator<Item = &Process> + '_ {
        self.running
            .iter()
            .chain(self.ready.iter())
            .chain(self.waiting.iter())
            .chain(self.pending.iter())
    }

    /// Tears the context down into its processes, sorted by id.
    pub fn into_processes(mut self) -> (GanttTrace, Vec<Process>) {
        let mut processes: Vec<Process> = self
            .running
            .take()
            .into_iter()
            .chain(self.ready.drain())
            .chain(self.waiting.drain(..))
            .chain(self.pending.drain(..))
            .collect();
        processes.sort_by_key(|process| process.id);
        (self.trace, processes)
    }
}
