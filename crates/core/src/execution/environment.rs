//! Scoped environment handling
//!
//! The ambient environment is captured once into an immutable
//! [`EnvironmentSnapshot`]. Each command receives its own
//! [`EffectiveEnvironment`], built by overlaying the command's overrides onto
//! a copy of the snapshot. The process environment itself is never modified,
//! so overrides cannot outlive the command they were declared on.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

/// Immutable copy of the ambient process environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    vars: BTreeMap<OsString, OsString>,
}

impl EnvironmentSnapshot {
    /// Capture the current process environment
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    /// Non-empty value of a variable
    pub fn get_non_empty(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Merge overrides onto a copy of this snapshot
    pub fn overlay(&self, overrides: &BTreeMap<String, String>) -> EffectiveEnvironment {
        let mut vars = self.vars.clone();
        for (key, value) in overrides {
            vars.insert(OsString::from(key), OsString::from(value));
        }
        EffectiveEnvironment { vars }
    }
}

/// Environment handed to a single command's subprocess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveEnvironment {
    vars: BTreeMap<OsString, OsString>,
}

impl EffectiveEnvironment {
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
