//! `drydock doctor` command

use anyhow::Result;

use drydock::ops::{doctor, format_report};
use drydock::util::process::SystemRunner;

use crate::cli::DoctorArgs;

pub fn execute(_args: DoctorArgs) -> Result<()> {
    let runner = SystemRunner::new();
    let report = doctor(&runner);

    print!("{}", format_report(&report));

    Ok(())
}
