//! Host operating system detection and default build matrices.
//!
//! Each host OS maps to a literal table of candidate configurations: the
//! full cross product of the compiler versions and settings that CI ever
//! builds there. Candidates that are known-broken are expected in these
//! tables; the exclusion rules remove them during generation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::{
    Architecture, BuildConfiguration, BuildType, CompilerFamily, MsvcRuntime,
};

/// The operating system of the build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Windows,
    Linux,
    Macos,
}

impl HostOs {
    /// Detect the OS drydock is running on.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => HostOs::Windows,
            "macos" => HostOs::Macos,
            // Treat the BSDs and other unixes as Linux: same toolchains,
            // same matrix shape.
            _ => HostOs::Linux,
        }
    }

    /// Get the OS name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            HostOs::Windows => "windows",
            HostOs::Linux => "linux",
            HostOs::Macos => "macos",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HostOs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(HostOs::Windows),
            "linux" => Ok(HostOs::Linux),
            "macos" | "darwin" | "osx" => Ok(HostOs::Macos),
            _ => Err(format!(
                "unknown host os '{}'; expected 'windows', 'linux', or 'macos'",
                s
            )),
        }
    }
}

/// MSVC toolset versions built on Windows hosts.
const MSVC_VERSIONS: &[&str] = &["12", "14"];

/// GCC versions built on Linux hosts.
const GCC_VERSIONS: &[&str] = &["4.6", "4.9", "5", "6"];

/// Clang versions built on Linux hosts.
const CLANG_VERSIONS: &[&str] = &["3.9", "4.0"];

/// Apple Clang versions built on macOS hosts.
const APPLE_CLANG_VERSIONS: &[&str] = &["8.0", "8.1"];

const MSVC_RUNTIMES: &[MsvcRuntime] = &[
    MsvcRuntime::StaticDebug,
    MsvcRuntime::StaticRelease,
    MsvcRuntime::DynamicDebug,
    MsvcRuntime::DynamicRelease,
];

const BUILD_TYPES: &[BuildType] = &[BuildType::Debug, BuildType::Release];

const ARCHS: &[Architecture] = &[Architecture::X86, Architecture::X86_64];

/// Enumerate the default candidate matrix for a host OS.
///
/// The result is a raw cross product and deliberately over-complete;
/// callers pass it through [`crate::ops::drydock_matrix::generate`] to
/// obtain the buildable subset.
pub fn default_configurations(host: HostOs) -> Vec<BuildConfiguration> {
    let mut configs = Vec::new();

    match host {
        HostOs::Windows => {
            for &version in MSVC_VERSIONS {
                for &arch in ARCHS {
                    for &build_type in BUILD_TYPES {
                        for &runtime in MSVC_RUNTIMES {
                            configs.push(BuildConfiguration::msvc(
                                version, arch, build_type, runtime,
                            ));
                        }
                    }
                }
            }
        }
        HostOs::Linux => {
            for &(family, versions) in &[
                (CompilerFamily::Gcc, GCC_VERSIONS),
                (CompilerFamily::Clang, CLANG_VERSIONS),
            ] {
                for &version in versions {
                    for &arch in ARCHS {
                        for &build_type in BUILD_TYPES {
                            configs.push(BuildConfiguration::new(
                                family, version, arch, build_type,
                            ));
                        }
                    }
                }
            }
        }
        HostOs::Macos => {
            // Apple dropped 32-bit userland; only 64-bit candidates exist.
            for &version in APPLE_CLANG_VERSIONS {
                for &arch in &[Architecture::X86_64, Architecture::Aarch64] {
                    for &build_type in BUILD_TYPES {
                        configs.push(BuildConfiguration::new(
                            CompilerFamily::AppleClang,
                            version,
                            arch,
                            build_type,
                        ));
                    }
                }
            }
        }
    }

    configs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_defaults_are_full_cross_product() {
        let configs = default_configurations(HostOs::Windows);
        // versions x archs x build types x runtimes
        assert_eq!(
            configs.len(),
            MSVC_VERSIONS.len() * ARCHS.len() * BUILD_TYPES.len() * MSVC_RUNTIMES.len()
        );
        assert!(configs
            .iter()
            .all(|c| c.compiler == CompilerFamily::Msvc && c.msvc_runtime.is_some()));
    }

    #[test]
    fn test_linux_defaults_cover_gcc_and_clang() {
        let configs = default_configurations(HostOs::Linux);
        assert!(configs.iter().any(|c| c.compiler == CompilerFamily::Gcc));
        assert!(configs.iter().any(|c| c.compiler == CompilerFamily::Clang));
        assert!(configs.iter().all(|c| c.msvc_runtime.is_none()));
        // Raw enumeration leaves stdlib unset; normalization fills it later
        assert!(configs.iter().all(|c| c.stdlib.is_none()));
    }

    #[test]
    fn test_macos_defaults_are_64_bit_only() {
        let configs = default_configurations(HostOs::Macos);
        assert!(!configs.is_empty());
        assert!(configs.iter().all(|c| {
            c.compiler == CompilerFamily::AppleClang && c.arch != Architecture::X86
        }));
    }

    #[test]
    fn test_host_os_from_str_aliases() {
        assert_eq!("darwin".parse::<HostOs>().unwrap(), HostOs::Macos);
        assert_eq!("LINUX".parse::<HostOs>().unwrap(), HostOs::Linux);
        assert!("solaris".parse::<HostOs>().is_err());
    }
}
