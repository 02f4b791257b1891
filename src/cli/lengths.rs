use std::collections::HashMap;

use clap::Parser;
use harness::{Directory, EntityId};
use tracing::instrument;

use super::{load, mm, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Recalculate wire lengths from branch geometry")]
pub struct Lengths {
    /// Harness identifier
    id: String,

    /// Save the recalculated lengths back to the harness file
    #[arg(long)]
    write: bool,
}

impl Lengths {
    #[instrument(level = "debug", skip(directory))]
    pub fn run(self, directory: &Directory) -> anyhow::Result<()> {
        let precision = directory.config().precision();
        let mut harness = load(directory, &self.id)?;

        let previous: HashMap<EntityId, Option<f64>> = harness
            .wires()
            .map(|wire| (wire.id.clone(), wire.calculated_length_mm))
            .collect();
        let lengths = harness.calculate_all_wire_lengths();

        for (id, length) in &lengths {
            let formatted = mm(*length, precision);
            // Changed or previously missing lengths are highlighted.
            let unchanged = previous
                .get(id)
                .copied()
                .flatten()
                .is_some_and(|before| (before - length).abs() < f64::EPSILON);
            if unchanged {
                println!("{id:<10} {formatted:>12}");
            } else {
                println!("{id:<10} {:>12}", formatted.warning());
            }
        }

        if self.write {
            let path = directory.save_harness(&harness)?;
            println!(
                "{}",
                format!("✅ Saved {} wire lengths to {}", lengths.len(), path.display()).success()
            );
        }
        Ok(())
    }
}
