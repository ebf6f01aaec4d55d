use std::io::{self, Write};

use clap::{Args, CommandFactory};
use clap_complete::Shell;
use eyre::Result;

use super::Cli;

#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    shell: Shell,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        self.write_to(&mut io::stdout())
    }

    fn write_to(&self, out: &mut dyn Write) -> Result<()> {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        clap_complete::generate(self.shell, &mut cmd, bin_name, out);
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_list_subcommands() {
        let mut buffer = Vec::new();
        CompletionsCommand { shell: Shell::Bash }
            .write_to(&mut buffer)
            .unwrap();

        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("sqlwing"));
        assert!(script.contains("bake"));
        assert!(script.contains("check"));
    }
}
