use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// One external program invocation inside a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub program: String,
    pub args: Vec<String>,
    pub env_overrides: BTreeMap<String, String>,
    pub working_dir: Option<PathBuf>,
    pub allow_failure: bool,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env_overrides: BTreeMap::new(),
            working_dir: None,
            allow_failure: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for this command only
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_overrides.insert(key.into(), value.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Record a non-zero exit instead of aborting the run
    pub fn allow_failure(mut self) -> Self {
        self.allow_failure = true;
        self
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// A named unit of work: prerequisites first, then its commands in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub description: Option<String>,
    pub prerequisites: Vec<String>,
    pub commands: Vec<Command>,
    /// No tracked output artifact
    pub phony: bool,
}

impl Target {
    /// Create a phony target with no prerequisites or commands
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            prerequisites: Vec::new(),
            commands: Vec::new(),
            phony: true,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn requires<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites
            .extend(prerequisites.into_iter().map(Into::into));
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.commands.extend(commands);
        self
    }

    /// Mark the target as producing a file artifact
    pub fn produces_artifact(mut self) -> Self {
        self.phony = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display_quotes_whitespace() {
        let command = Command::new("sh").arg("-c").arg("rm -rf build");
        assert_eq!(command.to_string(), "sh -c \"rm -rf build\"");
    }

    #[test]
    fn test_command_defaults_to_fail_fast() {
        let command = Command::new("pytest");
        assert!(!command.allow_failure);
        assert!(command.env_overrides.is_empty());
        assert!(command.working_dir.is_none());
        assert!(Command::new("git").allow_failure().allow_failure);
    }

    #[test]
    fn test_target_builder_preserves_declaration_order() {
        let target = Target::new("docs")
            .requires(["docs-html", "docs-pdf"])
            .command(Command::new("echo").arg("one"))
            .command(Command::new("echo").arg("two"));
        assert_eq!(target.prerequisites, vec!["docs-html", "docs-pdf"]);
        assert_eq!(target.commands[0].args, vec!["one"]);
        assert_eq!(target.commands[1].args, vec!["two"]);
        assert!(target.phony);
        assert!(!target.produces_artifact().phony);
    }
}
