use anyhow::Context;
use clap::Parser;
use harness::{Config, Directory};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Write a config.toml for a new harness directory")]
pub struct Init {
    /// Decimal places used when printing lengths
    #[arg(long, default_value_t = 1)]
    precision: usize,

    /// Skip harness files that fail to load instead of reporting them
    #[arg(long)]
    allow_unrecognised: bool,
}

impl Init {
    #[instrument(level = "debug", skip(directory))]
    pub fn run(self, directory: &Directory) -> anyhow::Result<()> {
        let root = directory.root();
        let config_path = root.join("config.toml");
        if config_path.exists() {
            anyhow::bail!(
                "Directory already initialized (found {})",
                config_path.display()
            );
        }

        std::fs::create_dir_all(root)
            .with_context(|| format!("Failed to create {}", root.display()))?;

        let mut config = Config::default();
        config.set_precision(self.precision);
        config.allow_unrecognised = self.allow_unrecognised;
        config
            .save(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

        println!(
            "{}",
            format!("✅ Initialized harness directory at {}", root.display()).success()
        );
        Ok(())
    }
}
