//! Command execution
//!
//! All side effects of a run go through a [`CommandRunner`]. The production
//! implementation, [`ProcessRunner`], spawns the program as a child process
//! with exactly the environment it is given and waits for it to exit.

use std::path::PathBuf;
use std::process::Command as ProcessCommand;

use tracing::debug;

use crate::configs::targets::Command;
use crate::execution::environment::EffectiveEnvironment;

/// A command whose program could not be started
#[derive(Debug)]
pub struct LaunchFailure {
    pub program: String,
    pub source: std::io::Error,
}

/// Executes one command and reports its exit code
pub trait CommandRunner {
    fn execute(&self, command: &Command, env: &EffectiveEnvironment) -> Result<i32, LaunchFailure>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    default_dir: PathBuf,
}

impl ProcessRunner {
    /// Relative working directories are resolved against `default_dir`
    pub fn new(default_dir: impl Into<PathBuf>) -> Self {
        Self {
            default_dir: default_dir.into(),
        }
    }

    fn working_dir(&self, command: &Command) -> PathBuf {
        match &command.working_dir {
            Some(dir) => self.default_dir.join(dir),
            None => self.default_dir.clone(),
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn execute(&self, command: &Command, env: &EffectiveEnvironment) -> Result<i32, LaunchFailure> {
        let dir = self.working_dir(command);
        debug!(command = %command, dir = %dir.display(), "spawning");

        let status = ProcessCommand::new(&command.program)
            .args(&command.args)
            .current_dir(&dir)
            .env_clear()
            .envs(env.iter())
            .status()
            .map_err(|source| LaunchFailure {
                program: command.program.clone(),
                source,
            })?;

        // None when terminated by a signal
        Ok(status.code().unwrap_or(-1))
    }
}
