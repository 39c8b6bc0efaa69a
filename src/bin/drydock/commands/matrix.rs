//! `drydock matrix` command

use anyhow::{Context, Result};

use drydock::core::config::Architecture;
use drydock::core::host::HostOs;
use drydock::ops::{generate_matrix, resolve_rules, MatrixOptions};
use drydock::util::config::load_config;

use crate::cli::MatrixArgs;

pub fn execute(args: MatrixArgs) -> Result<()> {
    let host = args
        .host
        .as_deref()
        .map(|s| s.parse::<HostOs>().map_err(anyhow::Error::msg))
        .transpose()?;

    let archs = args
        .archs
        .iter()
        .map(|s| s.parse::<Architecture>().map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()?;

    let mut options = MatrixOptions {
        host,
        base: None,
        archs,
        disable_rules: args.disable_rules,
        enable_rules: args.enable_rules,
        broken_versions: args.broken_versions,
    };

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    options.apply_config(&load_config(&cwd).matrix);

    if args.list_rules {
        return list_rules(&options);
    }

    let matrix = generate_matrix(&options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matrix)?);
    } else {
        for config in &matrix {
            println!("{}", config);
        }
    }

    Ok(())
}

fn list_rules(options: &MatrixOptions) -> Result<()> {
    let host = options.host.unwrap_or_else(HostOs::current);
    let rules = resolve_rules(options, host)?;

    println!("exclusion rules for {}:", host);
    for rule in rules.rules() {
        let state = if rule.enabled { "enabled " } else { "disabled" };
        println!("  {} {:<24} {}", state, rule.name, rule.description);
    }

    Ok(())
}
