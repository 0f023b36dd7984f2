//! Lifecycle Core Library
//!
//! Core library for the `lifecycle` release runner. It declares the targets
//! of a package's release lifecycle, resolves a requested target into an
//! ordered execution plan and runs that plan one command at a time, stopping
//! at the first failure that is not explicitly tolerated.
//!
//! ## Architecture
//!
//! - [`lifecycle_manager`] - High-level interface used by the CLI
//! - [`registry`] - Target declaration and lookup
//! - [`execution`] - Dependency resolution, scoped environments, command runners and the executor
//! - [`release`] - The built-in release lifecycle targets
//! - [`platform`] - Platform identification and per-platform configuration paths
//! - [`configs`] - Target data types and the `lifecycle.yml` project file
//! - [`results`] - Result types for runs and listings
//! - [`types`] - Error type and result alias
//!
//! ## Usage
//!
//! ```rust
//! use lifecycle_core::configs::targets::{Command, Target};
//! use lifecycle_core::execution::DependencyResolver;
//! use lifecycle_core::registry::TargetRegistry;
//!
//! # fn example() -> lifecycle_core::types::LifecycleResult<()> {
//! let registry = TargetRegistry::from_targets([
//!     Target::new("docs").requires(["docs-html", "docs-pdf"]),
//!     Target::new("docs-html").command(Command::new("sphinx-build").args(["-b", "html", "docs", "out"])),
//!     Target::new("docs-pdf"),
//! ])?;
//!
//! let plan = DependencyResolver::new(&registry).resolve("docs")?;
//! assert_eq!(plan.names(), vec!["docs-html", "docs-pdf", "docs"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod colors;
pub mod configs;
pub mod execution;
pub mod lifecycle_manager;
pub mod platform;
pub mod registry;
pub mod release;
pub mod results;
pub mod types;

// Re-export the main types for easier usage
pub use lifecycle_manager::{LifecycleManager, LifecycleManagerConfig};
pub use types::{LifecycleError, LifecycleResult};
