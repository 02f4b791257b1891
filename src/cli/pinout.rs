use clap::Parser;
use harness::{
    Directory,
    report::{PinoutRecord, generate_pinout_report},
};
use tracing::instrument;

use super::{OutputFormat, load, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Print the pinout of one connector")]
pub struct Pinout {
    /// Harness identifier
    id: String,

    /// Connector identifier
    connector: String,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Pinout {
    #[instrument(level = "debug", skip(directory))]
    pub fn run(self, directory: &Directory) -> anyhow::Result<()> {
        let records = self.records(directory)?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
            OutputFormat::Table => {
                if records.is_empty() {
                    println!("{}", format!("{} has no cavities.", self.connector).dim());
                    return Ok(());
                }
                println!(
                    "{:<5} {:<8} {:<16} {:<8} {:<18} {:<6} Connected to",
                    "Pin", "Gender", "Seal", "Wire", "Type", "Color"
                );
                for record in &records {
                    let row = format!(
                        "{:<5} {:<8} {:<16} {:<8} {:<18} {:<6} {}",
                        record.pin_number,
                        record.gender.to_string(),
                        record.seal.to_string(),
                        record.wire_id,
                        record.wire_type,
                        record.wire_color,
                        record.connected_to
                    );
                    if record.wire_id == harness::report::NOT_APPLICABLE {
                        println!("{}", row.dim());
                    } else {
                        println!("{row}");
                    }
                }
            }
        }
        Ok(())
    }

    pub(super) fn records(&self, directory: &Directory) -> anyhow::Result<Vec<PinoutRecord>> {
        let harness = load(directory, &self.id)?;
        if harness.connector(&self.connector).is_none() {
            anyhow::bail!(
                "harness '{}' has no connector '{}'",
                self.id,
                self.connector
            );
        }
        Ok(generate_pinout_report(&harness, &self.connector))
    }
}
