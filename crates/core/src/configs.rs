//! Configuration types
//!
//! [`targets`] holds the plain data describing targets and their commands;
//! [`lifecycle`] holds the optional per-project `lifecycle.yml` file.

pub mod lifecycle;
pub mod targets;
