pub mod fcfs;
pub mod priority;
pub mod round_robin;
pub mod sjf;
pub mod srtf;

use crate::core::{Process, SimCtx, Ticks};
pub use fcfs::FcfsScheduler;
pub use priority::{NonPreemptivePriority, PreemptivePriority, PriorityScheduler};
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;
pub use srtf::SrtfScheduler;

/// Round-robin time slice.
pub const QUANTUM: Ticks = 5;

/// Ticks a process must sit in the ready queue per priority boost.
pub const AGING_INTERVAL: Ticks = 5;

/// Dispatch policy plugged into the shared tick loop.
///
/// `init` installs the ready queue the policy dispatches from. Every tick the
/// core calls `age` before admitting arrivals, and `should_preempt` when the
/// running process did not finish its burst. A `true` from `should_preempt`
/// swaps the running process with the head of the ready queue.
pub trait Scheduler {
    const NAME: &'static str;

    fn init(ctx: &mut SimCtx) -> Self;

    fn age(&mut self, _ctx: &mut SimCtx) {}

    fn should_preempt(&mut self, _ctx: &SimCtx, _running: &Process) -> bool {
        false
    }
}
