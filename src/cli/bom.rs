use clap::Parser;
use harness::{
    Directory, Harness,
    report::{Bom as Report, generate_bom},
};
use tracing::instrument;

use super::{OutputFormat, load, mm, terminal::{Colorize, is_narrow}};

#[derive(Debug, Parser)]
#[command(about = "Print the bill of materials for a harness")]
pub struct Bom {
    /// Harness identifier
    id: String,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Bom {
    #[instrument(level = "debug", skip(directory))]
    pub fn run(self, directory: &Directory) -> anyhow::Result<()> {
        let (harness, bom) = self.report(directory)?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bom)?),
            OutputFormat::Table => {
                Self::output_table(&harness, &bom, directory.config().precision());
            }
        }
        Ok(())
    }

    /// Loads the harness and builds its BOM from freshly calculated lengths.
    pub(super) fn report(&self, directory: &Directory) -> anyhow::Result<(Harness, Report)> {
        let mut harness = load(directory, &self.id)?;
        harness.calculate_all_wire_lengths();
        let bom = generate_bom(&harness);
        Ok((harness, bom))
    }

    fn output_table(harness: &Harness, bom: &Report, precision: usize) {
        let narrow = is_narrow();

        println!(
            "{} {} rev {}",
            harness.part_number.info(),
            harness.name,
            harness.revision
        );
        println!();

        println!("Connectors");
        println!("{}", "──────────".dim());
        for (id, line) in &bom.connectors {
            let part_number = line.part_number.as_deref().unwrap_or("–");
            if narrow {
                println!("{id}: {part_number} ×{}", line.quantity);
            } else {
                println!(
                    "{id:<10} {:<18} {part_number:<16} ×{}",
                    line.connector_type.to_string(),
                    line.quantity
                );
            }
        }
        println!();

        println!("Wires");
        println!("{}", "─────".dim());
        for line in bom.wires.values() {
            if narrow {
                println!(
                    "{} {}: {}",
                    line.wire_type,
                    line.color,
                    mm(line.length_mm, precision)
                );
            } else {
                println!(
                    "{:<18} {:<6} {:>4}× {:>12}",
                    line.wire_type.to_string(),
                    line.color,
                    line.count,
                    mm(line.length_mm, precision)
                );
            }
        }
        println!("Total wire length: {}", mm(bom.total_wire_length, precision));
        println!();

        println!("Protections");
        println!("{}", "───────────".dim());
        for (id, line) in &bom.protections {
            let length = mm(line.length_mm, precision);
            // Protections no branch uses are still listed, dimmed.
            if line.length_mm > 0.0 {
                println!("{id:<10} {:<22} {length}", line.protection_type.to_string());
            } else {
                println!("{id:<10} {:<22} {}", line.protection_type.to_string(), length.dim());
            }
        }
    }
}
