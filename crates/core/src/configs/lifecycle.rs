use std::fs;
use std::path::{Component, Path};

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::platform::Platform;
use crate::types::{LifecycleError, LifecycleResult};

/// File name looked up in the project root when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "lifecycle.yml";

#[derive(Debug, Deserialize, JsonSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LifecycleConfig {
    /// Package name, also used for the per-user configuration directory
    pub package: String,
    /// Python interpreter; defaults to `python` on Windows and `python3` elsewhere
    pub python: Option<String>,
    pub tests_dir: String,
    pub docs_dir: String,
    pub docs_build_dir: String,
    /// Variable that redirects the application-data directory while tests run
    pub app_dir_env: String,
    /// Directory, relative to the project root, used as application data during tests
    pub test_app_dir: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            package: "package".to_string(),
            python: None,
            tests_dir: "tests".to_string(),
            docs_dir: "docs".to_string(),
            docs_build_dir: "docs/_build".to_string(),
            app_dir_env: "APP_DATA_DIR".to_string(),
            test_app_dir: ".test-appdata".to_string(),
        }
    }
}

impl LifecycleConfig {
    /// Interpreter to invoke on the given platform
    pub fn python_for(&self, platform: Platform) -> &str {
        match &self.python {
            Some(python) => python,
            None if platform == Platform::Windows => "python",
            None => "python3",
        }
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> LifecycleResult<Self> {
        if !path.exists() {
            info!(path = %path.display(), "no lifecycle config found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = parse_lifecycle_config(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> LifecycleResult<()> {
        let required = [
            ("package", &self.package),
            ("testsDir", &self.tests_dir),
            ("docsDir", &self.docs_dir),
            ("docsBuildDir", &self.docs_build_dir),
            ("appDirEnv", &self.app_dir_env),
            ("testAppDir", &self.test_app_dir),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(LifecycleError::Config(format!(
                    "'{}' must not be empty",
                    field
                )));
            }
        }
        let test_app_dir = Path::new(&self.test_app_dir);
        if test_app_dir.has_root()
            || test_app_dir.is_absolute()
            || test_app_dir
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(LifecycleError::Config(format!(
                "'testAppDir' must be a path inside the project root: {}",
                self.test_app_dir
            )));
        }
        if self.app_dir_env.contains('=') {
            return Err(LifecycleError::Config(format!(
                "'appDirEnv' is not a valid variable name: {}",
                self.app_dir_env
            )));
        }
        Ok(())
    }
}

pub fn parse_lifecycle_config(yaml_str: &str) -> LifecycleResult<LifecycleConfig> {
    let config: LifecycleConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_lifecycle_config("package: SuperHelper\ntestsDir: src/tests\n").unwrap();
        assert_eq!(config.package, "SuperHelper");
        assert_eq!(config.tests_dir, "src/tests");
        assert_eq!(config.docs_dir, "docs");
        assert_eq!(config.app_dir_env, "APP_DATA_DIR");
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = parse_lifecycle_config("pakage: typo\n").unwrap_err();
        assert!(matches!(err, LifecycleError::Yaml(_)));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = LifecycleConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, LifecycleConfig::default());
    }

    #[test]
    fn test_empty_value_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "appDirEnv: \"\"\n").unwrap();
        let err = LifecycleConfig::load(&path).unwrap_err();
        assert!(matches!(err, LifecycleError::Config(_)));
    }

    #[test]
    fn test_test_app_dir_must_stay_inside_project() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        for value in ["/home/me", "../sibling", "state/../../escape"] {
            fs::write(&path, format!("testAppDir: \"{}\"\n", value)).unwrap();
            let err = LifecycleConfig::load(&path).unwrap_err();
            assert!(
                matches!(err, LifecycleError::Config(ref msg) if msg.contains("testAppDir")),
                "{value} should be rejected"
            );
        }

        fs::write(&path, "testAppDir: build/test-state\n").unwrap();
        let config = LifecycleConfig::load(&path).unwrap();
        assert_eq!(config.test_app_dir, "build/test-state");
    }

    #[test]
    fn test_python_default_depends_on_platform() {
        let config = LifecycleConfig::default();
        assert_eq!(config.python_for(Platform::Windows), "python");
        assert_eq!(config.python_for(Platform::Linux), "python3");

        let config = LifecycleConfig {
            python: Some("/opt/py/bin/python".to_string()),
            ..LifecycleConfig::default()
        };
        assert_eq!(config.python_for(Platform::Windows), "/opt/py/bin/python");
    }
}
