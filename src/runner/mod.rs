//! Load-test execution: worker loops and the run coordinator.
mod config;
mod coordinator;
mod partition;
mod worker;

#[cfg(test)]
mod tests;

pub use config::RunConfig;
pub use coordinator::{RunPhase, run};
pub use partition::partition_users;
