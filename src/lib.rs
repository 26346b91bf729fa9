//! Transaction generator launcher
//!
//! Splits an aggregate transactions-per-second target across as few
//! `trx_generator` processes as the per-generator limit allows, launches them
//! all at once and collects their exit statuses in launch order.
//!
//! The generators themselves are opaque: this crate builds their command
//! lines, spawns them and waits. It never reads their output.

pub mod error;
pub mod invocation;
pub mod launcher;
pub mod partition;
pub mod process;

// Re-export commonly used types
pub use error::{LaunchError, Result};
pub use invocation::{ActionDescriptor, GeneratorCommand, InvocationSpec, DEFAULT_TRX_GENERATOR};
pub use launcher::{Launcher, RunResult};
pub use partition::{partition, PartitionConfig, DEFAULT_TPS_LIMIT_PER_GENERATOR, MAX_GENERATORS};
pub use process::{GeneratorHandle, GeneratorStatus, Spawner, SystemSpawner};
