//! Build-matrix generation.
//!
//! Generation is a pure pass over candidate configurations: drop everything
//! an enabled exclusion rule matches, then normalize the survivors. Dropped
//! configurations are not errors; over-complete candidate sets are how the
//! matrix is meant to be fed.

use anyhow::{bail, Result};

use crate::core::config::{Architecture, BuildConfiguration, CompilerFamily, CxxStdlib};
use crate::core::host::{default_configurations, HostOs};
use crate::core::rules::RuleSet;
use crate::util::config::MatrixConfig;

/// Filter and normalize a candidate matrix.
///
/// Input order is preserved. Each surviving configuration is normalized
/// exactly once, on its way out.
pub fn generate(base: Vec<BuildConfiguration>, rules: &RuleSet) -> Vec<BuildConfiguration> {
    base.into_iter()
        .filter(|config| match rules.excludes(config) {
            Some(rule) => {
                tracing::debug!("dropping {} ({})", config, rule);
                false
            }
            None => true,
        })
        .map(normalize)
        .collect()
}

/// Normalize one surviving configuration.
///
/// GCC and Clang builds must all use the C++11 libstdc++ ABI or their
/// artifacts will not link against each other. MSVC and Apple Clang have
/// no equivalent knob and pass through untouched.
fn normalize(mut config: BuildConfiguration) -> BuildConfiguration {
    match config.compiler {
        CompilerFamily::Gcc | CompilerFamily::Clang => {
            config.stdlib = Some(CxxStdlib::Libstdcxx11);
        }
        CompilerFamily::Msvc | CompilerFamily::AppleClang => {}
    }
    config
}

/// Options for [`generate_matrix`].
#[derive(Debug, Clone, Default)]
pub struct MatrixOptions {
    /// Host OS to enumerate candidates for (None = detect)
    pub host: Option<HostOs>,

    /// Explicit candidate set; when set, host enumeration is skipped
    pub base: Option<Vec<BuildConfiguration>>,

    /// Restrict the matrix to these architectures (empty = all)
    pub archs: Vec<Architecture>,

    /// Rule names to disable on top of the defaults
    pub disable_rules: Vec<String>,

    /// Rule names to re-enable (wins over `disable_rules`)
    pub enable_rules: Vec<String>,

    /// Extra "family version" broken-compiler entries
    pub broken_versions: Vec<String>,
}

impl MatrixOptions {
    /// Fold config-file settings into the options. CLI flags are expected
    /// to already be present and keep precedence through `enable_rules`.
    pub fn apply_config(&mut self, config: &MatrixConfig) {
        self.disable_rules
            .extend(config.disabled_rules.iter().cloned());
        self.broken_versions
            .extend(config.broken_versions.iter().cloned());
    }
}

/// Build the effective rule set for the options.
pub fn resolve_rules(options: &MatrixOptions, host: HostOs) -> Result<RuleSet> {
    let mut rules = RuleSet::for_host(host);

    let mut extra = Vec::new();
    for entry in &options.broken_versions {
        let Some((family, version)) = entry.split_once(' ') else {
            bail!(
                "invalid broken-version entry '{}'; expected '<family> <version>' (e.g. 'gcc 4.8')",
                entry
            );
        };
        let family: CompilerFamily = family.parse().map_err(anyhow::Error::msg)?;
        extra.push((family, version.trim().to_string()));
    }
    rules.add_broken_versions(extra);

    for name in &options.disable_rules {
        if !rules.set_enabled(name, false) {
            bail!("unknown exclusion rule '{}'", name);
        }
    }
    for name in &options.enable_rules {
        if !rules.set_enabled(name, true) {
            bail!("unknown exclusion rule '{}'", name);
        }
    }

    Ok(rules)
}

/// Produce the matrix a CI driver should build: enumerate (or take the
/// explicit base), filter, normalize.
pub fn generate_matrix(options: &MatrixOptions) -> Result<Vec<BuildConfiguration>> {
    let host = options.host.unwrap_or_else(HostOs::current);
    let rules = resolve_rules(options, host)?;

    let mut base = match &options.base {
        Some(base) => base.clone(),
        None => default_configurations(host),
    };

    if !options.archs.is_empty() {
        base.retain(|config| options.archs.contains(&config.arch));
    }

    let total = base.len();
    let matrix = generate(base, &rules);
    tracing::info!(
        "matrix for {}: {} of {} candidates survive",
        host,
        matrix.len(),
        total
    );

    Ok(matrix)
}
