use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, BakeOptions},
    project::FlutterProject,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BakeCommand {
    /// Root directory of the Flutter project
    pub root: PathBuf,

    /// Path to the config file (defaults to <ROOT>/sqlwing.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl BakeCommand {
    /// Run the bake command
    pub fn run(&self) -> Result<()> {
        let project = FlutterProject::open(&self.root).unwrap_or_exit();
        let config = project
            .load_config(self.config.as_deref())
            .unwrap_or_exit();

        let report = ops::bake(
            &project,
            &config.generate,
            BakeOptions {
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
