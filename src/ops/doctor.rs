//! Environment health checks.
//!
//! The `doctor` command reports what drydock can see on the host: the
//! detected OS, the package-manager backend provisioning would use, and
//! which compilers are visible on PATH. It is informational only — CI
//! images differ, and an absent tool here is a fact, not a failure.

use std::path::PathBuf;

use crate::core::backend::PackageBackend;
use crate::core::host::HostOs;
use crate::util::process::CommandRunner;

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check found what it was looking for
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool (if applicable)
    pub path: Option<PathBuf>,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            message: message.into(),
            path: None,
        }
    }

    /// Set the tool path.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone)]
pub struct DoctorReport {
    /// Host OS the checks ran on
    pub host: HostOs,

    /// Individual check results
    pub checks: Vec<CheckResult>,
}

/// Compilers worth reporting, by probe name.
const COMPILER_PROBES: &[&str] = &["cc", "gcc", "clang", "cl"];

/// Run all environment checks.
pub fn doctor(runner: &dyn CommandRunner) -> DoctorReport {
    let host = HostOs::current();
    let mut checks = Vec::new();

    match PackageBackend::detect(runner) {
        Some(backend) => {
            let path = runner.probe(backend.probe_executable());
            let mut check = CheckResult::pass(
                "package backend",
                format!("{} ({})", backend, backend.probe_executable()),
            );
            if let Some(path) = path {
                check = check.with_path(path);
            }
            checks.push(check);
        }
        None => checks.push(CheckResult::fail(
            "package backend",
            "no apt or yum found; provisioning will be a no-op",
        )),
    }

    for &name in COMPILER_PROBES {
        match runner.probe(name) {
            Some(path) => checks.push(
                CheckResult::pass(name, path.display().to_string()).with_path(path),
            ),
            None => checks.push(CheckResult::fail(name, "not found")),
        }
    }

    DoctorReport { host, checks }
}

/// Format a report for terminal output.
pub fn format_report(report: &DoctorReport) -> String {
    let mut out = format!("host os: {}\n", report.host);
    for check in &report.checks {
        let mark = if check.passed { "ok " } else { "-- " };
        out.push_str(&format!("{}{:<18} {}\n", mark, check.name, check.message));
    }
    out
}
