//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Drydock - CI build-matrix generation and host provisioning for native libraries
#[derive(Parser)]
#[command(name = "drydock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the filtered build matrix for CI
    Matrix(MatrixArgs),

    /// Ensure system packages are installed on this host
    Provision(ProvisionArgs),

    /// Report what drydock can detect on this host
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct MatrixArgs {
    /// Emit the matrix as JSON
    #[arg(long)]
    pub json: bool,

    /// Generate for this host OS instead of detecting (windows, linux, macos)
    #[arg(long)]
    pub host: Option<String>,

    /// Restrict the matrix to these architectures
    #[arg(long = "arch")]
    pub archs: Vec<String>,

    /// Disable an exclusion rule by name (repeatable)
    #[arg(long = "disable-rule", value_name = "RULE")]
    pub disable_rules: Vec<String>,

    /// Re-enable an exclusion rule by name (repeatable)
    #[arg(long = "enable-rule", value_name = "RULE")]
    pub enable_rules: Vec<String>,

    /// Mark an extra compiler version broken, as '<family> <version>' (repeatable)
    #[arg(long = "broken-version", value_name = "FAMILY VERSION")]
    pub broken_versions: Vec<String>,

    /// List the exclusion rule table and exit
    #[arg(long)]
    pub list_rules: bool,
}

#[derive(Args)]
pub struct ProvisionArgs {
    /// Packages to ensure are installed
    pub packages: Vec<String>,

    /// Also provision the packages listed in drydock.toml
    #[arg(long)]
    pub from_config: bool,
}

#[derive(Args)]
pub struct DoctorArgs {}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
