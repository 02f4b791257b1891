use std::collections::BTreeMap;

use clap::Parser;
use harness::{
    Directory,
    report::{FastenerLine, generate_fastener_bom},
};
use tracing::instrument;

use super::{OutputFormat, load, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Print the fastener bill of materials for a harness")]
pub struct Fasteners {
    /// Harness identifier
    id: String,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Fasteners {
    #[instrument(level = "debug", skip(directory))]
    pub fn run(self, directory: &Directory) -> anyhow::Result<()> {
        let lines = self.lines(directory)?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&lines)?),
            OutputFormat::Table => {
                if lines.is_empty() {
                    println!("{}", "No fasteners.".dim());
                    return Ok(());
                }
                for line in lines.values() {
                    let torque = line
                        .torque_nm
                        .map_or_else(String::new, |torque| format!(" @ {torque} N·m"));
                    println!(
                        "{:<12} {:<20} {:<6} ×{}{}",
                        line.part_number,
                        line.type_name,
                        line.size.as_deref().unwrap_or("–"),
                        line.quantity,
                        torque.info()
                    );
                    println!("{}", format!("    {}", line.locations.join(", ")).dim());
                }
            }
        }
        Ok(())
    }

    pub(super) fn lines(
        &self,
        directory: &Directory,
    ) -> anyhow::Result<BTreeMap<String, FastenerLine>> {
        let harness = load(directory, &self.id)?;
        Ok(generate_fastener_bom(&harness))
    }
}
