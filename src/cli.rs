use std::path::PathBuf;

mod bom;
mod fasteners;
mod init;
mod lengths;
mod list;
mod pinout;
mod terminal;
mod validate;

use bom::Bom;
use clap::ArgAction;
use fasteners::Fasteners;
use harness::{Directory, Harness};
use init::Init;
use lengths::Lengths;
use list::List;
use pinout::Pinout;
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The path to the root of the harness directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or(Command::List(List::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Write a default config.toml at the directory root
    Init(Init),

    /// List the harnesses in the directory (default)
    List(List),

    /// Load every harness and report any that are broken
    Validate(Validate),

    /// Print the bill of materials for a harness
    ///
    /// Wire lengths are recalculated from branch geometry first.
    Bom(Bom),

    /// Print the pinout of one connector
    Pinout(Pinout),

    /// Print the fastener bill of materials for a harness
    Fasteners(Fasteners),

    /// Recalculate wire lengths from branch geometry
    Lengths(Lengths),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = Directory::new(root);
        match self {
            Self::Init(command) => command.run(&directory)?,
            Self::List(command) => command.run(&directory)?,
            Self::Validate(command) => command.run(&directory)?,
            Self::Bom(command) => command.run(&directory)?,
            Self::Pinout(command) => command.run(&directory)?,
            Self::Fasteners(command) => command.run(&directory)?,
            Self::Lengths(command) => command.run(&directory)?,
        }
        Ok(())
    }
}

/// How a report is printed.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn load(directory: &Directory, id: &str) -> anyhow::Result<Harness> {
    use anyhow::Context;

    directory
        .load_harness(id)
        .with_context(|| format!("failed to load harness '{id}'"))
}

/// Formats a length in millimetres at the configured precision.
fn mm(length: f64, precision: usize) -> String {
    format!("{length:.precision$} mm")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use tempfile::tempdir;

    use super::*;

    const LOOM: &str = r"
_version: '1'
id: H1
name: Dash loom
part_number: LOOM-1
connectors:
  - id: C1
    name: ECU
    connector_type: DTM
    gender: FEMALE
    seal: FULLY_SEALED
    pins:
      - { number: '1', gender: FEMALE, seal: FULLY_SEALED }
      - { number: '2', gender: FEMALE, seal: FULLY_SEALED }
  - id: C2
    name: Sensor
    connector_type: DTM
    gender: MALE
    seal: FULLY_SEALED
    pins:
      - { number: '1', gender: MALE, seal: FULLY_SEALED }
nodes:
  - { id: N1, node_type: CONNECTOR, connector_id: C1, position: { x: 0.0, y: 0.0 } }
  - { id: N2, node_type: CONNECTOR, connector_id: C2, position: { x: 100.0, y: 0.0 } }
wires:
  - { id: W1, wire_type: FLRY_B_0_5, color: RD, from_node_id: N1, to_node_id: N2, from_pin: '1', to_pin: '1' }
branches:
  - id: B1
    name: Trunk
    path_points:
      - { sequence: 1, x: 0.0, y: 0.0 }
      - { sequence: 2, x: 100.0, y: 0.0 }
    nodes: [N1, N2]
fastener_types:
  - { id: FT1, name: Edge clip }
fasteners:
  - { id: F1, type_id: FT1, part_number: CLIP-1, quantity: 2, attachment: { kind: node, node_id: N1 } }
";

    fn setup_loom(root: &Path) {
        std::fs::write(root.join("H1.yaml"), LOOM).unwrap();
    }

    fn parse(root: &Path, args: &[&str]) -> Command {
        let root = root.to_str().unwrap();
        let cli = Cli::try_parse_from(["harness", "--root", root].iter().chain(args))
            .expect("arguments should parse");
        cli.command.expect("a subcommand was given")
    }

    #[test]
    fn missing_subcommand_defaults_to_current_directory_listing() {
        let cli = Cli::try_parse_from(["harness"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn lengths_write_persists_recalculated_lengths() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        setup_loom(&root);

        parse(&root, &["lengths", "H1", "--write"])
            .run(root.clone())
            .expect("lengths --write should succeed");

        let harness = Directory::new(root).load_harness("H1").unwrap();
        let length = harness.wire("W1").unwrap().calculated_length_mm.unwrap();
        assert!((length - 110.0).abs() < 1e-9, "got {length}");
    }

    #[test]
    fn lengths_without_write_leaves_file_untouched() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        setup_loom(&root);

        parse(&root, &["lengths", "H1"])
            .run(root.clone())
            .expect("lengths should succeed");

        let on_disk = std::fs::read_to_string(root.join("H1.yaml")).unwrap();
        assert_eq!(on_disk, LOOM);
    }

    #[test]
    fn pinout_of_unknown_connector_fails() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        setup_loom(&root);

        let error = parse(&root, &["pinout", "H1", "C404"])
            .run(root.clone())
            .unwrap_err();

        assert!(error.to_string().contains("no connector 'C404'"), "{error}");
    }

    #[test]
    fn unknown_harness_names_the_missing_id() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let error = parse(&root, &["bom", "H404"]).run(root.clone()).unwrap_err();

        assert!(error.to_string().contains("'H404'"), "{error}");
    }

    #[test]
    fn pinout_json_lists_every_cavity() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        setup_loom(&root);

        let Command::Pinout(pinout) = parse(&root, &["pinout", "H1", "C1", "--output", "json"])
        else {
            panic!("expected the pinout command");
        };
        let records = pinout.records(&Directory::new(root)).unwrap();
        let json = serde_json::to_value(&records).unwrap();

        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["pin_number"], "1");
        assert_eq!(rows[0]["gender"], "FEMALE");
        assert_eq!(rows[0]["wire_id"], "W1");
        assert_eq!(rows[0]["wire_color"], "RD");
        assert_eq!(rows[0]["connected_to"], "Connector C2, Pin 1");
        assert_eq!(rows[1]["wire_id"], harness::report::NOT_APPLICABLE);
        assert_eq!(rows[1]["connected_to"], harness::report::NOT_APPLICABLE);
    }

    #[test]
    fn bom_json_uses_recalculated_lengths() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        setup_loom(&root);

        let Command::Bom(bom) = parse(&root, &["bom", "H1", "--output", "json"]) else {
            panic!("expected the bom command");
        };
        let (_, report) = bom.report(&Directory::new(root)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["connectors"]["C1"]["connector_type"], "DTM");
        assert_eq!(json["connectors"]["C1"]["quantity"], 1);
        assert_eq!(json["connectors"].as_object().unwrap().len(), 2);
        assert_eq!(json["wires"].as_object().unwrap().len(), 1);
        let total = json["total_wire_length"].as_f64().unwrap();
        assert!((total - 110.0).abs() < 1e-9, "got {total}");
    }

    #[test]
    fn fastener_json_groups_by_part_number_and_size() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        setup_loom(&root);

        let Command::Fasteners(fasteners) = parse(&root, &["fasteners", "H1", "--output", "json"])
        else {
            panic!("expected the fasteners command");
        };
        let lines = fasteners.lines(&Directory::new(root)).unwrap();
        let json = serde_json::to_value(&lines).unwrap();

        let line = &json["CLIP-1_"];
        assert_eq!(line["type_name"], "Edge clip");
        assert_eq!(line["quantity"], 2);
        assert_eq!(line["locations"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn init_writes_config_once() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        parse(&root, &["init", "--precision", "3", "--allow-unrecognised"])
            .run(root.clone())
            .expect("init should succeed");

        let directory = Directory::new(root.clone());
        assert_eq!(directory.config().precision(), 3);
        assert!(directory.config().allow_unrecognised);

        let error = parse(&root, &["init"]).run(root.clone()).unwrap_err();
        assert!(error.to_string().contains("already initialized"), "{error}");
    }
}
