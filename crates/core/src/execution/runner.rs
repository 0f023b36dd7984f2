//! Plan executor
//!
//! Runs an [`ExecutionPlan`] strictly in order, one command at a time. The
//! first failing command that is not marked `allow_failure` aborts the rest of
//! the plan; results gathered up to that point are still returned.

use colored::*;
use tracing::{info, warn};

use crate::colors::get_target_color;
use crate::configs::targets::{Command, Target};
use crate::execution::command::CommandRunner;
use crate::execution::dependencies::ExecutionPlan;
use crate::execution::environment::EnvironmentSnapshot;
use crate::results::{ExecutionResult, RunOutcome, ToleratedFailure};
use crate::types::{LifecycleError, LAUNCH_EXIT_CODE};

pub struct Executor<'a> {
    runner: &'a dyn CommandRunner,
    ambient: &'a EnvironmentSnapshot,
    show_progress: bool,
}

impl<'a> Executor<'a> {
    pub fn new(runner: &'a dyn CommandRunner, ambient: &'a EnvironmentSnapshot) -> Self {
        Self {
            runner,
            ambient,
            show_progress: true,
        }
    }

    /// Disable the per-target headers printed to stdout
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn run(&self, plan: &ExecutionPlan<'_>) -> RunOutcome {
        let mut results = Vec::with_capacity(plan.len());

        for target in plan.iter() {
            self.print_header(target);
            info!(target_name = %target.name, commands = target.commands.len(), "running target");

            let mut tolerated = Vec::new();
            for command in &target.commands {
                if let Err(err) = self.run_command(target, command, &mut tolerated) {
                    results.push(ExecutionResult {
                        target: target.name.clone(),
                        exit_code: raw_exit_code(&err),
                        succeeded: false,
                        tolerated,
                    });
                    return RunOutcome {
                        results,
                        failure: Some(err),
                    };
                }
            }

            self.print_completion(target, &tolerated);
            results.push(ExecutionResult {
                target: target.name.clone(),
                exit_code: 0,
                succeeded: true,
                tolerated,
            });
        }

        RunOutcome {
            results,
            failure: None,
        }
    }

    fn run_command(
        &self,
        target: &Target,
        command: &Command,
        tolerated: &mut Vec<ToleratedFailure>,
    ) -> Result<(), LifecycleError> {
        let env = self.ambient.overlay(&command.env_overrides);

        let err = match self.runner.execute(command, &env) {
            Ok(0) => return Ok(()),
            Ok(exit_code) => LifecycleError::CommandFailed {
                target: target.name.clone(),
                command: command.to_string(),
                exit_code,
            },
            Err(failure) => LifecycleError::Launch {
                target: target.name.clone(),
                program: failure.program,
                source: failure.source,
            },
        };

        if !command.allow_failure {
            return Err(err);
        }

        warn!(target_name = %target.name, command = %command, "ignoring failure: {}", err);
        tolerated.push(ToleratedFailure {
            command: command.to_string(),
            exit_code: match &err {
                LifecycleError::CommandFailed { exit_code, .. } => Some(*exit_code),
                _ => None,
            },
            message: err.to_string(),
        });
        Ok(())
    }

    fn print_header(&self, target: &Target) {
        if !self.show_progress {
            return;
        }
        let color = get_target_color(&target.name);
        let kind = if target.phony {
            "phony".bright_black()
        } else {
            "artifact".bright_blue()
        };
        println!();
        println!(
            "┌─ {} {}",
            "Running target".bold(),
            target.name.color(color).bold()
        );
        println!(
            "└─ {} {} ({})",
            "Commands:".bright_black(),
            target.commands.len(),
            kind
        );
    }

    fn print_completion(&self, target: &Target, tolerated: &[ToleratedFailure]) {
        if !self.show_progress {
            return;
        }
        let color = get_target_color(&target.name);
        if tolerated.is_empty() {
            println!(
                "{} {}",
                "✓".green().bold(),
                format!("Completed {}", target.name).color(color)
            );
        } else {
            println!(
                "{} {}",
                "!".yellow().bold(),
                format!(
                    "Completed {} with {} ignored failure(s)",
                    target.name,
                    tolerated.len()
                )
                .color(color)
            );
        }
    }
}

/// Code the failing command itself reported, before any process exit mapping
fn raw_exit_code(err: &LifecycleError) -> i32 {
    match err {
        LifecycleError::CommandFailed { exit_code, .. } => *exit_code,
        LifecycleError::Launch { .. } => LAUNCH_EXIT_CODE,
        other => other.exit_code(),
    }
}
