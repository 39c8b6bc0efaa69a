//! System package provisioning.
//!
//! Before a Linux CI build runs, the native libraries the build links
//! against must be present on the host. Provisioning detects the host's
//! package-manager family, checks whether each required package is
//! installed, and installs it on demand with elevated privileges.
//!
//! Failure handling is two-tier: a host with no recognized package manager
//! gets a warning and a soft pass (the dependency is assumed to be
//! provisioned out-of-band), while an install that does not stick is fatal
//! and must abort the surrounding pipeline before compilation starts.

use thiserror::Error;

use crate::core::backend::PackageBackend;
use crate::util::process::CommandRunner;

/// Error during provisioning.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(
        "package `{package}` is still not installed after `{command}`\n\
         \n\
         Install it manually (check the package name for your distribution)\n\
         and re-run, or provision the host image with the package preinstalled."
    )]
    InstallVerificationFailed { package: String, command: String },

    #[error("failed to run {backend} for `{package}`")]
    Backend {
        backend: PackageBackend,
        package: String,
        #[source]
        source: anyhow::Error,
    },
}

/// How a provisioning call was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The package was already present; nothing was run.
    AlreadyInstalled,
    /// The package was installed during this call.
    Installed,
    /// No package-manager backend exists on this host; the dependency is
    /// assumed to be satisfied externally.
    NoBackend,
}

/// Ensure a system package is installed on this host.
///
/// Detects the backend, then delegates to [`ensure_with_backend`]. With no
/// backend present this is a soft no-op: a warning, zero subprocess calls,
/// `Ok(Outcome::NoBackend)`.
pub fn ensure_installed(
    runner: &mut dyn CommandRunner,
    package: &str,
) -> Result<Outcome, ProvisionError> {
    match PackageBackend::detect(runner) {
        Some(backend) => ensure_with_backend(runner, backend, package),
        None => {
            tracing::warn!(
                "no supported package manager found; assuming `{}` is provisioned externally",
                package
            );
            Ok(Outcome::NoBackend)
        }
    }
}

/// Ensure a package is installed using an already-detected backend.
///
/// Query, install if missing, re-query. One install attempt, no fallback
/// to another backend. Already-installed packages never trigger an
/// install command.
pub fn ensure_with_backend(
    runner: &mut dyn CommandRunner,
    backend: PackageBackend,
    package: &str,
) -> Result<Outcome, ProvisionError> {
    if query_installed(runner, backend, package)? {
        tracing::debug!("`{}` already installed", package);
        return Ok(Outcome::AlreadyInstalled);
    }

    tracing::warn!("`{}` is not installed; installing via {}", package, backend);

    let (program, args) = backend.install_command(package);
    let output = runner
        .run(program, &args)
        .map_err(|source| ProvisionError::Backend {
            backend,
            package: package.to_string(),
            source,
        })?;
    if !output.success {
        // Not fatal yet: the re-query below is the source of truth
        tracing::debug!("install command exited non-zero: {}", output.stderr.trim());
    }

    if query_installed(runner, backend, package)? {
        tracing::info!("installed `{}`", package);
        return Ok(Outcome::Installed);
    }

    let command = format!("{} {}", program, args.join(" "));
    tracing::error!("`{}` missing after `{}`", package, command);
    Err(ProvisionError::InstallVerificationFailed {
        package: package.to_string(),
        command,
    })
}

/// Query the backend for a package's install state.
///
/// The query's exit status is ignored on purpose (dpkg exits non-zero for
/// unknown packages); only the marker scan over the captured output
/// decides.
fn query_installed(
    runner: &mut dyn CommandRunner,
    backend: PackageBackend,
    package: &str,
) -> Result<bool, ProvisionError> {
    let (program, args) = backend.query_command(package);
    let output = runner
        .run(program, &args)
        .map_err(|source| ProvisionError::Backend {
            backend,
            package: package.to_string(),
            source,
        })?;

    Ok(backend.is_installed_output(&output.combined()))
}

/// Provision a list of packages in order, stopping at the first fatal
/// failure. The backend is detected once for the whole list.
pub fn provision_packages(
    runner: &mut dyn CommandRunner,
    packages: &[String],
) -> Result<Vec<(String, Outcome)>, ProvisionError> {
    let Some(backend) = PackageBackend::detect(runner) else {
        tracing::warn!(
            "no supported package manager found; assuming {} package(s) are provisioned externally",
            packages.len()
        );
        return Ok(packages
            .iter()
            .map(|p| (p.clone(), Outcome::NoBackend))
            .collect());
    };

    let mut results = Vec::with_capacity(packages.len());
    for package in packages {
        let outcome = ensure_with_backend(runner, backend, package)?;
        results.push((package.clone(), outcome));
    }
    Ok(results)
}
