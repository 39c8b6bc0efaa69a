//! Exclusion rules for build-matrix generation.
//!
//! The set of combinations CI must not build has changed over the life of
//! the packaged library (toolchains age out, new ones relax old
//! constraints), so every rule lives in one named table and can be toggled
//! individually instead of being baked into generation logic.

use super::config::{Architecture, BuildConfiguration, CompilerFamily};
use super::host::HostOs;

/// Why a configuration is dropped from the matrix.
///
/// Each variant carries whatever data the predicate needs, so a rule is
/// plain matchable data rather than an opaque closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulePredicate {
    /// MSVC does not build the 32-bit variant of the library.
    MsvcX86,
    /// MSVC must link the dynamic CRT; static-CRT candidates (or candidates
    /// with no runtime selected at all) are unbuildable.
    MsvcStaticRuntime,
    /// GCC does not build the 32-bit variant of the library.
    GccX86,
    /// Compiler releases with codegen bugs the library trips over,
    /// matched by exact version string per family.
    BrokenCompilerVersion(Vec<(CompilerFamily, String)>),
    /// Clang cannot build the 32-bit variant on Linux build hosts.
    LinuxClangX86,
}

impl RulePredicate {
    /// Check whether this predicate matches (i.e. excludes) a configuration.
    pub fn matches(&self, config: &BuildConfiguration) -> bool {
        match self {
            RulePredicate::MsvcX86 => {
                config.compiler == CompilerFamily::Msvc && config.arch == Architecture::X86
            }
            RulePredicate::MsvcStaticRuntime => {
                config.compiler == CompilerFamily::Msvc
                    && !config.msvc_runtime.is_some_and(|rt| rt.is_dynamic())
            }
            RulePredicate::GccX86 => {
                config.compiler == CompilerFamily::Gcc && config.arch == Architecture::X86
            }
            RulePredicate::BrokenCompilerVersion(versions) => versions
                .iter()
                .any(|(family, version)| {
                    config.compiler == *family && config.version == *version
                }),
            RulePredicate::LinuxClangX86 => {
                config.compiler == CompilerFamily::Clang && config.arch == Architecture::X86
            }
        }
    }
}

/// A named, individually toggleable exclusion rule.
#[derive(Debug, Clone)]
pub struct ExclusionRule {
    /// Stable rule name, used for toggling and reporting
    pub name: &'static str,

    /// One-line description for `matrix --list-rules`
    pub description: &'static str,

    /// Whether the rule participates in filtering
    pub enabled: bool,

    /// The predicate that excludes configurations
    pub predicate: RulePredicate,
}

impl ExclusionRule {
    fn new(name: &'static str, description: &'static str, predicate: RulePredicate) -> Self {
        ExclusionRule {
            name,
            description,
            enabled: true,
            predicate,
        }
    }
}

/// Compiler versions excluded by default.
///
/// gcc 4.6 miscompiles the library; every other entry earns its place the
/// same way before it goes in here.
const DEFAULT_BROKEN_VERSIONS: &[(CompilerFamily, &str)] = &[(CompilerFamily::Gcc, "4.6")];

/// The rule table applied during matrix generation.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<ExclusionRule>,
}

impl RuleSet {
    /// Build the default rule set for a host OS.
    ///
    /// Every known rule is present in every set, so toggling by name works
    /// the same on any host. The clang/x86 exclusion only applies to Linux
    /// build hosts and starts disabled elsewhere; "applies on Linux" is a
    /// property of the rule set, not of the configurations, which carry no
    /// OS field.
    pub fn for_host(host: HostOs) -> Self {
        let broken = DEFAULT_BROKEN_VERSIONS
            .iter()
            .map(|(family, version)| (*family, (*version).to_string()))
            .collect();

        let mut linux_clang_x86 = ExclusionRule::new(
            "linux-clang-x86",
            "drop 32-bit Clang builds on Linux hosts",
            RulePredicate::LinuxClangX86,
        );
        linux_clang_x86.enabled = host == HostOs::Linux;

        let rules = vec![
            ExclusionRule::new(
                "msvc-x86",
                "drop 32-bit MSVC builds",
                RulePredicate::MsvcX86,
            ),
            ExclusionRule::new(
                "msvc-static-runtime",
                "drop MSVC builds that do not link the dynamic CRT",
                RulePredicate::MsvcStaticRuntime,
            ),
            ExclusionRule::new(
                "gcc-x86",
                "drop 32-bit GCC builds",
                RulePredicate::GccX86,
            ),
            ExclusionRule::new(
                "broken-compiler-version",
                "drop compiler releases with known codegen bugs",
                RulePredicate::BrokenCompilerVersion(broken),
            ),
            linux_clang_x86,
        ];

        RuleSet { rules }
    }

    /// All rules in the set, in evaluation order.
    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    /// Enable or disable a rule by name. Returns false if no rule has
    /// that name.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| r.name == name) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Add compiler versions to the broken-version rule.
    pub fn add_broken_versions(
        &mut self,
        versions: impl IntoIterator<Item = (CompilerFamily, String)>,
    ) {
        for rule in &mut self.rules {
            if let RulePredicate::BrokenCompilerVersion(ref mut list) = rule.predicate {
                list.extend(versions);
                return;
            }
        }
    }

    /// Check whether any enabled rule excludes the configuration, returning
    /// the first matching rule's name.
    pub fn excludes(&self, config: &BuildConfiguration) -> Option<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.enabled)
            .find(|rule| rule.predicate.matches(config))
            .map(|rule| rule.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{BuildType, MsvcRuntime};

    fn msvc(arch: Architecture, runtime: MsvcRuntime) -> BuildConfiguration {
        BuildConfiguration::msvc("14", arch, BuildType::Debug, runtime)
    }

    #[test]
    fn test_msvc_x86_excluded() {
        let rules = RuleSet::for_host(HostOs::Windows);
        let config = msvc(Architecture::X86, MsvcRuntime::DynamicDebug);
        assert_eq!(rules.excludes(&config), Some("msvc-x86"));
    }

    #[test]
    fn test_msvc_static_runtime_excluded() {
        let rules = RuleSet::for_host(HostOs::Windows);
        let config = msvc(Architecture::X86_64, MsvcRuntime::StaticDebug);
        assert_eq!(rules.excludes(&config), Some("msvc-static-runtime"));

        let config = msvc(Architecture::X86_64, MsvcRuntime::DynamicRelease);
        assert_eq!(rules.excludes(&config), None);
    }

    #[test]
    fn test_msvc_missing_runtime_excluded() {
        let rules = RuleSet::for_host(HostOs::Windows);
        let config = BuildConfiguration::new(
            CompilerFamily::Msvc,
            "14",
            Architecture::X86_64,
            BuildType::Debug,
        );
        assert_eq!(rules.excludes(&config), Some("msvc-static-runtime"));
    }

    #[test]
    fn test_broken_version_excluded_regardless_of_arch() {
        let rules = RuleSet::for_host(HostOs::Linux);
        let config = BuildConfiguration::new(
            CompilerFamily::Gcc,
            "4.6",
            Architecture::X86_64,
            BuildType::Release,
        );
        // x86_64 gcc passes every other rule; only the version kills it
        assert_eq!(rules.excludes(&config), Some("broken-compiler-version"));
    }

    #[test]
    fn test_linux_clang_x86_enabled_only_on_linux() {
        let config = BuildConfiguration::new(
            CompilerFamily::Clang,
            "4.0",
            Architecture::X86,
            BuildType::Debug,
        );

        let linux = RuleSet::for_host(HostOs::Linux);
        assert_eq!(linux.excludes(&config), Some("linux-clang-x86"));

        // The rule is still in the macOS table, just off
        let mut macos = RuleSet::for_host(HostOs::Macos);
        assert_eq!(macos.excludes(&config), None);
        assert!(macos.set_enabled("linux-clang-x86", true));
        assert_eq!(macos.excludes(&config), Some("linux-clang-x86"));
    }

    #[test]
    fn test_rule_toggle_by_name() {
        let mut rules = RuleSet::for_host(HostOs::Windows);
        let config = msvc(Architecture::X86, MsvcRuntime::DynamicDebug);
        assert!(rules.excludes(&config).is_some());

        assert!(rules.set_enabled("msvc-x86", false));
        assert_eq!(rules.excludes(&config), None);

        assert!(!rules.set_enabled("no-such-rule", false));
    }

    #[test]
    fn test_extended_broken_versions() {
        let mut rules = RuleSet::for_host(HostOs::Linux);
        rules.add_broken_versions([(CompilerFamily::Clang, "3.9".to_string())]);

        let config = BuildConfiguration::new(
            CompilerFamily::Clang,
            "3.9",
            Architecture::X86_64,
            BuildType::Debug,
        );
        assert_eq!(rules.excludes(&config), Some("broken-compiler-version"));
    }
}
