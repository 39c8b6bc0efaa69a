//! System package-manager backends.
//!
//! Each backend variant is a small strategy table: which executable proves
//! the backend exists, how to query a package's install state, what marker
//! the query prints for an installed package, and how to install with
//! elevated privileges. The installed check is a plain substring scan over
//! the captured query output, and this module is the only place those
//! marker strings appear.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::process::CommandRunner;

/// A native package-manager family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageBackend {
    /// Debian family (apt/dpkg)
    Apt,
    /// RPM family (yum/rpm)
    Yum,
}

/// Detection priority: Debian-family first. First hit wins and there is no
/// fallback to the other backend afterwards.
const DETECTION_ORDER: &[PackageBackend] = &[PackageBackend::Apt, PackageBackend::Yum];

impl PackageBackend {
    /// Get the backend name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageBackend::Apt => "apt",
            PackageBackend::Yum => "yum",
        }
    }

    /// The executable whose presence on PATH identifies this backend.
    pub fn probe_executable(&self) -> &'static str {
        match self {
            PackageBackend::Apt => "apt-get",
            PackageBackend::Yum => "yum",
        }
    }

    /// Command that queries a package's install state.
    pub fn query_command(&self, package: &str) -> (&'static str, Vec<String>) {
        match self {
            PackageBackend::Apt => ("dpkg", vec!["-s".to_string(), package.to_string()]),
            PackageBackend::Yum => (
                "yum",
                vec![
                    "list".to_string(),
                    "installed".to_string(),
                    package.to_string(),
                ],
            ),
        }
    }

    /// Marker the query output contains when the package is installed.
    pub fn installed_marker(&self) -> &'static str {
        match self {
            PackageBackend::Apt => "install ok installed",
            PackageBackend::Yum => "Installed Packages",
        }
    }

    /// Whether query output indicates the package is installed.
    pub fn is_installed_output(&self, output: &str) -> bool {
        output.contains(self.installed_marker())
    }

    /// Elevated install command for a package.
    ///
    /// Privilege escalation is assumed to be configured on the host
    /// (passwordless sudo on CI workers, interactive elsewhere).
    pub fn install_command(&self, package: &str) -> (&'static str, Vec<String>) {
        match self {
            PackageBackend::Apt => (
                "sudo",
                vec![
                    "apt-get".to_string(),
                    "install".to_string(),
                    "-y".to_string(),
                    package.to_string(),
                ],
            ),
            PackageBackend::Yum => (
                "sudo",
                vec![
                    "yum".to_string(),
                    "install".to_string(),
                    "-y".to_string(),
                    package.to_string(),
                ],
            ),
        }
    }

    /// Detect which backend is available on the host, probing PATH in
    /// fixed priority order.
    pub fn detect(runner: &dyn CommandRunner) -> Option<PackageBackend> {
        for &backend in DETECTION_ORDER {
            if let Some(path) = runner.probe(backend.probe_executable()) {
                tracing::debug!(
                    "detected {} backend via {}",
                    backend,
                    path.display()
                );
                return Some(backend);
            }
        }
        None
    }
}

impl fmt::Display for PackageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
