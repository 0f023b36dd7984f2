//! Result types for lifecycle operations
//!
//! This module contains the outcome of a run together with the output
//! structures returned by the lifecycle manager's read-only operations.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::configs::targets::Target;
use crate::platform::Platform;
use crate::types::LifecycleError;

/// A failure of a command marked `allow_failure`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToleratedFailure {
    pub command: String,
    /// `None` when the program could not be launched
    pub exit_code: Option<i32>,
    pub message: String,
}

/// Outcome of one executed target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub target: String,
    /// Code reported by the failing command, `-1` when it was killed by a
    /// signal and 127 when it never started. Use [`RunOutcome::exit_code`]
    /// for the code the process should exit with.
    pub exit_code: i32,
    pub succeeded: bool,
    pub tolerated: Vec<ToleratedFailure>,
}

/// Everything a run produced, in execution order. `failure` is the error that
/// aborted the run; targets after it have no entry.
#[derive(Debug)]
pub struct RunOutcome {
    pub results: Vec<ExecutionResult>,
    pub failure: Option<LifecycleError>,
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    pub fn exit_code(&self) -> i32 {
        self.failure.as_ref().map_or(0, LifecycleError::exit_code)
    }

    pub fn result_for(&self, target: &str) -> Option<&ExecutionResult> {
        self.results.iter().find(|r| r.target == target)
    }

    pub fn into_result(self) -> Result<Vec<ExecutionResult>, LifecycleError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.results),
        }
    }
}

/// Information about a declared target
#[derive(Debug, Clone)]
pub struct TargetInfo {
    pub name: String,
    pub description: Option<String>,
    pub prerequisites: Vec<String>,
    pub command_count: usize,
    pub phony: bool,
}

impl From<&Target> for TargetInfo {
    fn from(target: &Target) -> Self {
        Self {
            name: target.name.clone(),
            description: target.description.clone(),
            prerequisites: target.prerequisites.clone(),
            command_count: target.commands.len(),
            phony: target.phony,
        }
    }
}

/// Result of listing targets
#[derive(Debug)]
pub struct TargetListResult {
    pub targets: Vec<TargetInfo>,
    pub platform: Platform,
    pub config_dirs: BTreeSet<PathBuf>,
}

/// Result of getting the dependency graph
#[derive(Debug)]
pub struct DependencyGraphResult {
    pub graph: petgraph::Graph<String, ()>,
    pub cycles: Vec<Vec<String>>,
}
