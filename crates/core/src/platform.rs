//! Platform identification and per-platform configuration paths

use std::collections::BTreeSet;
use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::execution::environment::EnvironmentSnapshot;

/// Host platform class, resolved once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// Detect the current platform
    pub fn current() -> Self {
        Self::from_os(env::consts::OS)
    }

    /// Create platform info from an OS string as reported by `std::env::consts::OS`
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::Other,
        }
    }

    pub fn is_windows(self) -> bool {
        self == Self::Windows
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user configuration directories an application named `app_name` may
/// have written to.
///
/// Windows keeps them under `%APPDATA%`; every other platform uses the dotted
/// `~/.config` convention, plus `$XDG_CONFIG_HOME` when it is set. Variables
/// that are missing or empty contribute nothing.
pub fn platform_config_dirs(
    platform: Platform,
    app_name: &str,
    env: &EnvironmentSnapshot,
) -> BTreeSet<PathBuf> {
    let mut dirs = BTreeSet::new();

    if platform.is_windows() {
        if let Some(appdata) = env.get_non_empty("APPDATA") {
            dirs.insert(PathBuf::from(appdata).join(app_name));
        }
        return dirs;
    }

    if let Some(home) = env.get_non_empty("HOME") {
        dirs.insert(PathBuf::from(home).join(".config").join(app_name));
    }
    if let Some(config_home) = env.get_non_empty("XDG_CONFIG_HOME") {
        dirs.insert(PathBuf::from(config_home).join(app_name));
    }
    dirs
}
