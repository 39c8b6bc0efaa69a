//! `drydock provision` command

use anyhow::{bail, Context, Result};

use drydock::ops::{provision_packages, Outcome};
use drydock::util::config::load_config;
use drydock::util::process::SystemRunner;

use crate::cli::ProvisionArgs;

pub fn execute(args: ProvisionArgs) -> Result<()> {
    let mut packages = args.packages;

    if args.from_config || packages.is_empty() {
        let cwd = std::env::current_dir().context("failed to determine working directory")?;
        packages.extend(load_config(&cwd).provision.packages);
    }

    if packages.is_empty() {
        bail!(
            "no packages to provision\n\
             \n\
             Pass package names on the command line or list them under\n\
             [provision] packages in drydock.toml."
        );
    }

    let mut runner = SystemRunner::new();
    let results = provision_packages(&mut runner, &packages)?;

    for (package, outcome) in results {
        let status = match outcome {
            Outcome::AlreadyInstalled => "already installed",
            Outcome::Installed => "installed",
            Outcome::NoBackend => "skipped (no package manager)",
        };
        println!("{:<24} {}", package, status);
    }

    Ok(())
}
