pub mod config;
pub mod driver;
pub mod stats;
pub mod workload;

pub use config::{DEFAULT_HORIZON, SimConfig};
pub use driver::{Algorithm, RunReport, Sim};
pub use stats::Statistics;
pub use workload::{ProcessSpec, Workload};
