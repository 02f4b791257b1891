use clap::Parser;
use harness::Directory;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser, Default)]
#[command(about = "List the harness files in the directory")]
pub struct List {
    /// Print identifiers only, one per line
    #[arg(long, short)]
    quiet: bool,
}

impl List {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, directory: &Directory) -> anyhow::Result<()> {
        let ids = directory.harness_ids();

        if self.quiet {
            for id in &ids {
                println!("{id}");
            }
            return Ok(());
        }

        if ids.is_empty() {
            println!(
                "No harnesses found in {}.",
                directory.root().display()
            );
            return Ok(());
        }

        println!("Harnesses");
        println!("{}", "─────────".dim());
        for id in &ids {
            println!("{id}");
        }
        println!("{}", format!("{} total", ids.len()).dim());
        Ok(())
    }
}
