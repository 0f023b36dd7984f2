//! Target execution module
//!
//! This module handles plan resolution, scoped environments, command
//! execution and the sequential, fail-fast executor.

pub mod command;
pub mod dependencies;
pub mod environment;
pub mod runner;

pub use command::{CommandRunner, LaunchFailure, ProcessRunner};
pub use dependencies::{DependencyResolver, ExecutionPlan};
pub use environment::{EffectiveEnvironment, EnvironmentSnapshot};
pub use runner::Executor;
