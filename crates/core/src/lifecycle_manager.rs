//! High-level lifecycle interface
//!
//! [`LifecycleManager`] is the entry point used by the command-line
//! interface. It loads the project configuration, identifies the platform,
//! snapshots the ambient environment and declares the release targets once;
//! every later operation works from that fixed state.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lifecycle_core::lifecycle_manager::{LifecycleManager, LifecycleManagerConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> lifecycle_core::types::LifecycleResult<()> {
//! let manager = LifecycleManager::new(LifecycleManagerConfig {
//!     project_root: PathBuf::from("."),
//!     config_path: None,
//! })?;
//!
//! // Show what `publish` would run
//! let plan = manager.get_execution_plan("publish")?;
//! println!("{:?}", plan.names());
//!
//! // Run it
//! let outcome = manager.run_target("publish")?;
//! std::process::exit(outcome.exit_code());
//! # }
//! ```

use std::path::PathBuf;

use tracing::debug;

use crate::configs::lifecycle::{LifecycleConfig, CONFIG_FILE_NAME};
use crate::execution::{
    CommandRunner, DependencyResolver, EnvironmentSnapshot, ExecutionPlan, Executor, ProcessRunner,
};
use crate::platform::{platform_config_dirs, Platform};
use crate::registry::TargetRegistry;
use crate::release::{release_registry, ReleaseContext};
use crate::results::{DependencyGraphResult, RunOutcome, TargetInfo, TargetListResult};
use crate::types::LifecycleResult;

/// Configuration for initializing a lifecycle manager
pub struct LifecycleManagerConfig {
    /// Directory the commands run in
    pub project_root: PathBuf,
    /// Defaults to `lifecycle.yml` in the project root
    pub config_path: Option<PathBuf>,
}

pub struct LifecycleManager {
    pub project_root: PathBuf,
    pub config: LifecycleConfig,
    pub platform: Platform,
    pub environment: EnvironmentSnapshot,
    pub registry: TargetRegistry,
}

impl LifecycleManager {
    /// Initialize from the real process environment and host platform
    pub fn new(config: LifecycleManagerConfig) -> LifecycleResult<Self> {
        Self::with_environment(config, Platform::current(), EnvironmentSnapshot::capture())
    }

    pub fn with_environment(
        config: LifecycleManagerConfig,
        platform: Platform,
        environment: EnvironmentSnapshot,
    ) -> LifecycleResult<Self> {
        // Children run inside the root, so paths handed to them must not be relative to it
        let project_root = std::path::absolute(&config.project_root)?;
        let config_path = config
            .config_path
            .unwrap_or_else(|| project_root.join(CONFIG_FILE_NAME));
        let lifecycle_config = LifecycleConfig::load(&config_path)?;

        let registry = release_registry(&ReleaseContext {
            config: &lifecycle_config,
            platform,
            env: &environment,
            project_root: &project_root,
        })?;
        debug!(%platform, targets = registry.len(), "declared release targets");

        Ok(Self {
            project_root,
            config: lifecycle_config,
            platform,
            environment,
            registry,
        })
    }

    /// List all declared targets in declaration order
    pub fn list_targets(&self) -> TargetListResult {
        TargetListResult {
            targets: self.registry.iter().map(TargetInfo::from).collect(),
            platform: self.platform,
            config_dirs: platform_config_dirs(self.platform, &self.config.package, &self.environment),
        }
    }

    /// Resolve the execution plan for a target without running anything
    pub fn get_execution_plan(&self, target: &str) -> LifecycleResult<ExecutionPlan<'_>> {
        DependencyResolver::new(&self.registry).resolve(target)
    }

    pub fn get_dependency_graph(&self) -> DependencyGraphResult {
        DependencyGraphResult {
            graph: self.registry.dependency_graph(),
            cycles: self.registry.cycles(),
        }
    }

    /// Resolve and run a target with real child processes
    pub fn run_target(&self, target: &str) -> LifecycleResult<RunOutcome> {
        let runner = ProcessRunner::new(&self.project_root);
        self.run_target_with(target, &runner)
    }

    /// Resolution errors are returned before any command runs; execution
    /// errors are reported inside the outcome.
    pub fn run_target_with(
        &self,
        target: &str,
        runner: &dyn CommandRunner,
    ) -> LifecycleResult<RunOutcome> {
        let plan = self.get_execution_plan(target)?;
        Ok(Executor::new(runner, &self.environment).run(&plan))
    }
}
