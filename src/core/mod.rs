pub mod driver;
pub mod error;
pub mod event;
pub mod gantt;
pub mod observer;
pub mod queue;
pub mod state;

pub use driver::SchedCore;
pub use error::{QueueError, SimError};
pub use event::SimEvent;
pub use gantt::{GanttSlice, GanttTrace};
pub use queue::{KeyFn, PriorityQueue, ReadyQueue};
pub use state::{
    ArrivalPolicy, EmptyReadyPolicy, Priority, Process, ProcessId, SimCtx, Ticks,
};
