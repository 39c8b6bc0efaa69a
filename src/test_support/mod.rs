//! Test utilities and mocks for Drydock unit tests.
//!
//! Provisioning code reaches the host only through
//! [`CommandRunner`](crate::util::process::CommandRunner); the mock here
//! substitutes canned PATH contents and process outputs so install flows
//! can be exercised without a package manager (or root) present.
//!
//! # Example
//!
//! ```rust,ignore
//! use drydock::test_support::MockRunner;
//!
//! let mut runner = MockRunner::new();
//! runner.add_probe("apt-get", "/usr/bin/apt-get");
//! runner.expect("dpkg -s libglew-dev", MockRunner::success("Status: install ok installed"));
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::util::process::{CommandRunner, ProcessOutput};

/// Pattern for matching commands in [`MockRunner`].
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on the full command string.
    Exact(String),
    /// Match if the command starts with a prefix.
    StartsWith(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Any => true,
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    /// Pattern to match against commands.
    pub pattern: CommandPattern,
    /// Output to return when matched.
    pub output: ProcessOutput,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    /// Number of times this expectation has been used.
    pub used: usize,
}

impl CommandExpectation {
    /// Create a new expectation.
    pub fn new(pattern: CommandPattern, output: ProcessOutput) -> Self {
        CommandExpectation {
            pattern,
            output,
            times: None,
            used: 0,
        }
    }

    /// Set the number of times this expectation can be used.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    /// Check if this expectation can still be used.
    pub fn available(&self) -> bool {
        match self.times {
            Some(n) => self.used < n,
            None => true,
        }
    }
}

/// Mock command runner for testing provisioning without touching the host.
///
/// Records expected commands and their outputs, and keeps a call log so
/// tests can assert on what was (and was not) executed.
#[derive(Debug, Default)]
pub struct MockRunner {
    probes: Vec<(String, PathBuf)>,
    expectations: Vec<CommandExpectation>,
    calls: Vec<String>,
}

impl MockRunner {
    /// Create a new mock runner with an empty PATH.
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Make an executable visible to `probe`.
    pub fn add_probe(&mut self, name: &str, path: &str) -> &mut Self {
        self.probes.push((name.to_string(), PathBuf::from(path)));
        self
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, output: ProcessOutput) -> &mut Self {
        self.expectations.push(CommandExpectation::new(
            CommandPattern::Exact(cmd.to_string()),
            output,
        ));
        self
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&mut self, prefix: &str, output: ProcessOutput) -> &mut Self {
        self.expectations.push(CommandExpectation::new(
            CommandPattern::StartsWith(prefix.to_string()),
            output,
        ));
        self
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&mut self, expectation: CommandExpectation) -> &mut Self {
        self.expectations.push(expectation);
        self
    }

    /// A successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> ProcessOutput {
        ProcessOutput {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed output with the given stderr.
    pub fn failure(stderr: impl Into<String>) -> ProcessOutput {
        ProcessOutput {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Count calls whose command string starts with the prefix.
    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl CommandRunner for MockRunner {
    fn probe(&self, name: &str) -> Option<PathBuf> {
        self.probes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.clone())
    }

    fn run(&mut self, program: &str, args: &[String]) -> Result<ProcessOutput> {
        let full_cmd = if args.is_empty() {
            program.to_string()
        } else {
            format!("{} {}", program, args.join(" "))
        };

        self.calls.push(full_cmd.clone());

        for exp in &mut self.expectations {
            if exp.pattern.matches(&full_cmd) && exp.available() {
                exp.used += 1;
                return Ok(exp.output.clone());
            }
        }

        bail!("unexpected command: {}", full_cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expectation_order_and_times() {
        let mut runner = MockRunner::new();
        runner.expect_pattern(
            CommandExpectation::new(
                CommandPattern::Exact("dpkg -s foo".to_string()),
                MockRunner::failure("not installed"),
            )
            .times(1),
        );
        runner.expect("dpkg -s foo", MockRunner::success("install ok installed"));

        let first = runner.run("dpkg", &["-s".into(), "foo".into()]).unwrap();
        assert!(!first.success);
        let second = runner.run("dpkg", &["-s".into(), "foo".into()]).unwrap();
        assert!(second.success);
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_unexpected_command_errors() {
        let mut runner = MockRunner::new();
        assert!(runner.run("rm", &["-rf".into(), "/".into()]).is_err());
    }
}
