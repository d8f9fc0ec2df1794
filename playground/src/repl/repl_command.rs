// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{path::PathBuf, process::Stdio};

use tokio::process::Command;

/// Configuration builder for the interpreter invocation with sensible defaults.
///
/// This builder ensures critical settings are not forgotten when launching the
/// interpreter:
/// - Always sets the working directory (falling back to the current directory), so
///   the interpreter never spawns in an unexpected location under launchers that
///   start elsewhere.
/// - All three standard streams are redirected to pipes at launch; the channel owns
///   the only handles.
///
/// # Examples
///
/// ```rust
/// # use r3bl_playground::ReplCommandBuilder;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cmd = ReplCommandBuilder::new("python3")
///     .args(["-i", "-q"])
///     .env("PYTHONUNBUFFERED", "1")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReplCommandBuilder {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env_vars: Vec<(String, String)>,
}

impl ReplCommandBuilder {
    /// Creates a new builder for the specified interpreter executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env_vars: Vec::new(),
        }
    }

    /// Adds arguments to the invocation.
    #[must_use]
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    ///
    /// If not called, defaults to the current directory when
    /// [`build()`](Self::build) is invoked.
    #[must_use]
    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.cwd = Some(path.into());
        self
    }

    /// Adds an environment variable to the interpreter's environment.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Builds the final [`tokio::process::Command`] with all configurations applied:
    /// piped stdin/stdout/stderr, kill-on-drop, working directory, environment.
    ///
    /// Always sets a working directory: the provided one, or the current directory.
    ///
    /// # Errors
    /// Returns an error if no working directory was provided and the current
    /// directory cannot be determined.
    pub fn build(self) -> miette::Result<Command> {
        let cwd = match self.cwd {
            Some(cwd) => cwd,
            None => std::env::current_dir()
                .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?,
        };

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .current_dir(cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        for (key, value) in &self.env_vars {
            tracing::debug!("Applying interpreter env var: {}={}", key, value);
            command.env(key, value);
        }

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_new() {
        let builder = ReplCommandBuilder::new("python3");
        assert_eq!(builder.program, "python3");
        assert!(builder.args.is_empty());
        assert!(builder.cwd.is_none());
        assert!(builder.env_vars.is_empty());
    }

    #[test]
    fn test_builder_args() {
        let builder = ReplCommandBuilder::new("python3").args(["-i", "-q"]);
        assert_eq!(builder.args, vec!["-i", "-q"]);
    }

    #[test]
    fn test_builder_cwd() {
        let path = std::env::temp_dir();
        let builder = ReplCommandBuilder::new("sh").cwd(&path);
        assert_eq!(builder.cwd, Some(path));
    }

    #[test]
    fn test_builder_env() {
        let builder = ReplCommandBuilder::new("sh")
            .env("KEY1", "value1")
            .env("KEY2", "value2");
        assert_eq!(
            builder.env_vars,
            vec![
                ("KEY1".to_string(), "value1".to_string()),
                ("KEY2".to_string(), "value2".to_string()),
            ]
        );
    }

    #[test]
    fn test_builder_chaining_builds() {
        let result = ReplCommandBuilder::new("sh")
            .args(["-s"])
            .cwd(std::env::temp_dir())
            .env("LANG", "C.UTF-8")
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_build_defaults_cwd_to_current_dir() {
        let result = ReplCommandBuilder::new("sh").build();
        assert!(result.is_ok());
    }
}
