//! Build configuration data model.
//!
//! A [`BuildConfiguration`] is one (compiler, version, architecture,
//! build type, ...) tuple a CI system could build. Candidate tuples are
//! enumerated per host OS (see [`crate::core::host`]) and filtered down to
//! the known-valid subset by [`crate::ops::drydock_matrix::generate`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// The family of a compiler toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFamily {
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Clang/LLVM
    Clang,
    /// Apple Clang (macOS)
    AppleClang,
    /// Microsoft Visual C++
    Msvc,
}

impl CompilerFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::AppleClang => "apple-clang",
            CompilerFamily::Msvc => "msvc",
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompilerFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcc" => Ok(CompilerFamily::Gcc),
            "clang" => Ok(CompilerFamily::Clang),
            "apple-clang" | "appleclang" => Ok(CompilerFamily::AppleClang),
            "msvc" => Ok(CompilerFamily::Msvc),
            _ => Err(format!(
                "unknown compiler family '{}'; expected 'gcc', 'clang', 'apple-clang', or 'msvc'",
                s
            )),
        }
    }
}

/// Target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    /// 32-bit x86
    X86,
    /// 64-bit x86
    X86_64,
    /// 64-bit ARM
    Aarch64,
}

impl Architecture {
    /// Get the architecture name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X86_64 => "x86_64",
            Architecture::Aarch64 => "aarch64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Architecture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x86" | "i686" | "i386" => Ok(Architecture::X86),
            "x86_64" | "x64" | "amd64" => Ok(Architecture::X86_64),
            "aarch64" | "arm64" => Ok(Architecture::Aarch64),
            _ => Err(format!(
                "unknown architecture '{}'; expected 'x86', 'x86_64', or 'aarch64'",
                s
            )),
        }
    }
}

/// Build type (optimization/debug-info profile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    /// Get the build type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// MSVC C runtime library selection (Windows only).
///
/// This is the /MT-vs-/MD axis of the build matrix. Unlike the non-MSVC
/// settings, the debug and release CRTs are distinct link targets, so the
/// matrix enumerates all four variants as separate candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MsvcRuntime {
    /// Static CRT, debug (/MTd)
    StaticDebug,
    /// Static CRT, release (/MT)
    StaticRelease,
    /// Dynamic CRT, debug (/MDd)
    DynamicDebug,
    /// Dynamic CRT, release (/MD)
    DynamicRelease,
}

impl MsvcRuntime {
    /// Get the compiler flag for this runtime.
    pub fn as_flag(&self) -> &'static str {
        match self {
            MsvcRuntime::StaticDebug => "/MTd",
            MsvcRuntime::StaticRelease => "/MT",
            MsvcRuntime::DynamicDebug => "/MDd",
            MsvcRuntime::DynamicRelease => "/MD",
        }
    }

    /// Whether this runtime links the CRT dynamically.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, MsvcRuntime::DynamicDebug | MsvcRuntime::DynamicRelease)
    }
}

/// C++ standard library variant (GCC/Clang only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CxxStdlib {
    /// GNU libstdc++ with the pre-C++11 ABI
    #[serde(rename = "libstdc++")]
    Libstdcxx,
    /// GNU libstdc++ with the C++11 ABI
    #[serde(rename = "libstdc++11")]
    Libstdcxx11,
    /// LLVM libc++
    #[serde(rename = "libc++")]
    Libcxx,
}

impl CxxStdlib {
    /// Get the stdlib name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CxxStdlib::Libstdcxx => "libstdc++",
            CxxStdlib::Libstdcxx11 => "libstdc++11",
            CxxStdlib::Libcxx => "libc++",
        }
    }
}

impl fmt::Display for CxxStdlib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate build of the packaged library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfiguration {
    /// Compiler family
    pub compiler: CompilerFamily,

    /// Compiler version ("4.9", "5", "14", ...). Versions are compared as
    /// strings; they are not reliably semver.
    pub version: String,

    /// Target architecture
    pub arch: Architecture,

    /// Build type
    pub build_type: BuildType,

    /// MSVC C runtime (None for non-MSVC configurations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msvc_runtime: Option<MsvcRuntime>,

    /// C++ standard library (None for MSVC and AppleClang configurations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdlib: Option<CxxStdlib>,
}

impl BuildConfiguration {
    /// Create a non-MSVC configuration with no stdlib selection.
    pub fn new(
        compiler: CompilerFamily,
        version: impl Into<String>,
        arch: Architecture,
        build_type: BuildType,
    ) -> Self {
        BuildConfiguration {
            compiler,
            version: version.into(),
            arch,
            build_type,
            msvc_runtime: None,
            stdlib: None,
        }
    }

    /// Create an MSVC configuration with a runtime selection.
    pub fn msvc(
        version: impl Into<String>,
        arch: Architecture,
        build_type: BuildType,
        runtime: MsvcRuntime,
    ) -> Self {
        BuildConfiguration {
            compiler: CompilerFamily::Msvc,
            version: version.into(),
            arch,
            build_type,
            msvc_runtime: Some(runtime),
            stdlib: None,
        }
    }

    /// Set the stdlib variant.
    pub fn with_stdlib(mut self, stdlib: CxxStdlib) -> Self {
        self.stdlib = Some(stdlib);
        self
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.compiler, self.version, self.arch, self.build_type
        )?;
        if let Some(rt) = self.msvc_runtime {
            write!(f, " {}", rt.as_flag())?;
        }
        if let Some(stdlib) = self.stdlib {
            write!(f, " {}", stdlib)?;
        }
        Ok(())
    }
}
