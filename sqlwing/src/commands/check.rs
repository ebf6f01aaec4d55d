use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    project::FlutterProject,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Root directory of the Flutter project
    pub root: PathBuf,

    /// Path to the config file (defaults to <ROOT>/sqlwing.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the parsed schema as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let project = FlutterProject::open(&self.root).unwrap_or_exit();
        let config = project
            .load_config(self.config.as_deref())
            .unwrap_or_exit();

        let report = ops::check(&project, config.generate.fallback_type)?;

        let mut out = TerminalOutput::new();
        if self.json {
            report.render_json(&mut out)?;
        } else {
            report.render(&mut out);
        }

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
