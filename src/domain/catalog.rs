//! Closed catalogues of part classifications.
//!
//! Each catalogue is a plain enum carrying a human-readable label. Adding a
//! new entry is a matter of adding a variant; nothing is registered at
//! runtime. Serialized forms use the upper snake case variant name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Connector housing families used in automotive harnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectorType {
    /// Junior Timer (Metri-Pack 150/280).
    Jt,
    /// General Timer (Metri-Pack 480/630).
    Gt,
    /// Micro Timer (Metri-Pack 56/110).
    Mt,
    /// Deutsch DTM series.
    Dtm,
    /// Deutsch DTP series.
    Dtp,
    /// Square connector housings.
    Square,
    /// Anything not covered above.
    Other,
}

impl ConnectorType {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jt => "Junior Timer",
            Self::Gt => "General Timer",
            Self::Mt => "Micro Timer",
            Self::Dtm => "Deutsch DTM",
            Self::Dtp => "Deutsch DTP",
            Self::Square => "Square Connector",
            Self::Other => "Other",
        }
    }
}

/// Sealing class of a connector or cavity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SealType {
    /// No sealing.
    Unsealed,
    /// Sealed at the housing interface only.
    ConnectorSealed,
    /// Housing and every cavity sealed.
    FullySealed,
}

impl SealType {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unsealed => "Unsealed",
            Self::ConnectorSealed => "Connector Sealed",
            Self::FullySealed => "Fully Sealed",
        }
    }
}

/// Gender of a housing or terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Male (pin) side.
    Male,
    /// Female (socket) side.
    Female,
}

impl Gender {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Standard thin-wall automotive cable, by conductor cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    /// FLRY-B 0.35 mm².
    #[serde(rename = "FLRY_B_0_35")]
    FlryB0p35,
    /// FLRY-B 0.5 mm².
    #[serde(rename = "FLRY_B_0_5")]
    FlryB0p5,
    /// FLRY-B 0.75 mm².
    #[serde(rename = "FLRY_B_0_75")]
    FlryB0p75,
    /// FLRY-B 1.0 mm².
    #[serde(rename = "FLRY_B_1_0")]
    FlryB1p0,
    /// FLRY-B 1.5 mm².
    #[serde(rename = "FLRY_B_1_5")]
    FlryB1p5,
    /// FLRY-B 2.5 mm².
    #[serde(rename = "FLRY_B_2_5")]
    FlryB2p5,
}

impl WireType {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FlryB0p35 => "FLRY-B 0.35 mm²",
            Self::FlryB0p5 => "FLRY-B 0.5 mm²",
            Self::FlryB0p75 => "FLRY-B 0.75 mm²",
            Self::FlryB1p0 => "FLRY-B 1.0 mm²",
            Self::FlryB1p5 => "FLRY-B 1.5 mm²",
            Self::FlryB2p5 => "FLRY-B 2.5 mm²",
        }
    }

    /// Conductor cross-section in mm².
    #[must_use]
    pub const fn cross_section_mm2(self) -> f64 {
        match self {
            Self::FlryB0p35 => 0.35,
            Self::FlryB0p5 => 0.5,
            Self::FlryB0p75 => 0.75,
            Self::FlryB1p0 => 1.0,
            Self::FlryB1p5 => 1.5,
            Self::FlryB2p5 => 2.5,
        }
    }
}

/// Sleeving and conduit applied over a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProtectionType {
    /// PET braided sleeve.
    BraidedSleeve,
    /// Heat shrink tubing.
    ShrinkTubing,
    /// Spiral wrap.
    SpiralWrap,
    /// Flexible corrugated conduit.
    FlexConduit,
    /// Friction tape.
    Tape,
    /// Fabric tape.
    FabricTape,
}

impl ProtectionType {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BraidedSleeve => "Braided Sleeve (PET)",
            Self::ShrinkTubing => "Heat Shrink Tubing",
            Self::SpiralWrap => "Spiral Wrap",
            Self::FlexConduit => "Flexible Conduit",
            Self::Tape => "Friction Tape",
            Self::FabricTape => "Fabric Tape",
        }
    }
}

/// Role of a node in the harness topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Wires terminate in a connector housing.
    Connector,
    /// Wires are joined in a splice.
    Splice,
    /// Ground point.
    Ground,
    /// Loose terminal.
    Terminal,
    /// Point where a bundle splits.
    Breakout,
}

impl NodeType {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Connector => "CONNECTOR",
            Self::Splice => "SPLICE",
            Self::Ground => "GROUND",
            Self::Terminal => "TERMINAL",
            Self::Breakout => "BREAKOUT",
        }
    }
}

/// Broad family of a fastener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FastenerCategory {
    /// Push-in or snap clip.
    #[default]
    Clip,
    /// Mounting bracket.
    Bracket,
    /// Bolt.
    Bolt,
    /// Nut.
    Nut,
    /// Washer.
    Washer,
    /// Cable tie.
    Tie,
    /// Grommet.
    Grommet,
    /// Anything else.
    Other,
}

impl FastenerCategory {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clip => "Clip",
            Self::Bracket => "Bracket",
            Self::Bolt => "Bolt",
            Self::Nut => "Nut",
            Self::Washer => "Washer",
            Self::Tie => "Cable Tie",
            Self::Grommet => "Grommet",
            Self::Other => "Other",
        }
    }
}

/// Material a fastener is made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FastenerMaterial {
    /// Nylon.
    #[default]
    Nylon,
    /// Carbon steel.
    Steel,
    /// Stainless steel.
    StainlessSteel,
    /// Aluminium.
    Aluminum,
    /// Generic plastic.
    Plastic,
    /// Rubber.
    Rubber,
}

impl FastenerMaterial {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nylon => "Nylon",
            Self::Steel => "Steel",
            Self::StainlessSteel => "Stainless Steel",
            Self::Aluminum => "Aluminum",
            Self::Plastic => "Plastic",
            Self::Rubber => "Rubber",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

display_label!(
    ConnectorType,
    SealType,
    Gender,
    WireType,
    ProtectionType,
    NodeType,
    FastenerCategory,
    FastenerMaterial,
);

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(NodeType::Splice, "SPLICE")]
    #[test_case(NodeType::Breakout, "BREAKOUT")]
    fn node_types_display_their_label(node_type: NodeType, expected: &str) {
        assert_eq!(node_type.to_string(), expected);
    }

    #[test]
    fn wire_type_serializes_as_catalogue_code() {
        let yaml = serde_yaml::to_string(&WireType::FlryB0p35).unwrap();
        assert_eq!(yaml.trim(), "FLRY_B_0_35");

        let parsed: WireType = serde_yaml::from_str("FLRY_B_2_5").unwrap();
        assert_eq!(parsed, WireType::FlryB2p5);
        assert!((parsed.cross_section_mm2() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn multi_word_variants_use_upper_snake_case() {
        let parsed: SealType = serde_yaml::from_str("CONNECTOR_SEALED").unwrap();
        assert_eq!(parsed, SealType::ConnectorSealed);
        assert_eq!(parsed.to_string(), "Connector Sealed");
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!(serde_yaml::from_str::<ProtectionType>("DUCT_TAPE").is_err());
    }
}
