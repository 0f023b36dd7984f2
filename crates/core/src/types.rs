use thiserror::Error;

/// Exit code reserved for errors detected while resolving a plan
pub const RESOLUTION_EXIT_CODE: i32 = 2;

/// Exit code used when a command could not be started at all
pub const LAUNCH_EXIT_CODE: i32 = 127;

/// The main error type for lifecycle operations
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Target '{0}' is already registered")]
    DuplicateTarget(String),

    #[error("Target '{name}' not found{}", required_by_suffix(.required_by))]
    UnknownTarget {
        name: String,
        required_by: Option<String>,
    },

    #[error("Circular dependency detected: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    #[error("Failed to launch '{program}' for target '{target}': {source}")]
    Launch {
        target: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' in target '{target}' failed with exit code {exit_code}")]
    CommandFailed {
        target: String,
        command: String,
        exit_code: i32,
    },
}

fn required_by_suffix(required_by: &Option<String>) -> String {
    match required_by {
        Some(target) => format!(" (required by '{}')", target),
        None => String::new(),
    }
}

impl LifecycleError {
    /// Errors raised before any command runs
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateTarget(_) | Self::UnknownTarget { .. } | Self::CyclicDependency { .. }
        )
    }

    /// Process exit code to report for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { exit_code, .. } if *exit_code > 0 => *exit_code,
            Self::Launch { .. } => LAUNCH_EXIT_CODE,
            err if err.is_resolution_error() => RESOLUTION_EXIT_CODE,
            _ => 1,
        }
    }
}

/// Result type alias for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_errors_use_reserved_code() {
        let err = LifecycleError::CyclicDependency {
            cycle: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert!(err.is_resolution_error());
        assert_eq!(err.exit_code(), RESOLUTION_EXIT_CODE);
        assert_eq!(err.to_string(), "Circular dependency detected: a -> b -> a");

        let err = LifecycleError::UnknownTarget {
            name: "deploy".to_string(),
            required_by: None,
        };
        assert_eq!(err.exit_code(), RESOLUTION_EXIT_CODE);
        assert_eq!(err.to_string(), "Target 'deploy' not found");
    }

    #[test]
    fn test_command_failure_propagates_exit_code() {
        let err = LifecycleError::CommandFailed {
            target: "build".to_string(),
            command: "python3 -m build".to_string(),
            exit_code: 3,
        };
        assert!(!err.is_resolution_error());
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_signal_termination_maps_to_generic_failure() {
        let err = LifecycleError::CommandFailed {
            target: "test".to_string(),
            command: "pytest".to_string(),
            exit_code: -1,
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_unknown_prerequisite_names_dependent() {
        let err = LifecycleError::UnknownTarget {
            name: "lint".to_string(),
            required_by: Some("build".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Target 'lint' not found (required by 'build')"
        );
    }
}
