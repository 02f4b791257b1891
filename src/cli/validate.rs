use std::process;

use clap::Parser;
use harness::Directory;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Load every harness and report any that are broken")]
pub struct Validate {
    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

impl Validate {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, directory: &Directory) -> anyhow::Result<()> {
        match directory.load_all() {
            Ok(harnesses) => {
                if !self.quiet {
                    let wires: usize = harnesses.iter().map(harness::Harness::wire_count).sum();
                    println!(
                        "{}",
                        format!(
                            "✅ {} harnesses valid ({wires} wires)",
                            harnesses.len()
                        )
                        .success()
                    );
                }
                Ok(())
            }
            Err(error) => {
                for (path, reason) in error.failures() {
                    eprintln!("{} {}", path.display().to_string().warning(), reason);
                }
                if !self.quiet {
                    println!(
                        "{}",
                        "Fix the files above, or set allow_unrecognised in config.toml to skip them."
                            .dim()
                    );
                }
                process::exit(1);
            }
        }
    }
}
