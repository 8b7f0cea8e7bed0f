//! Material treatment flags carried by each section

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spraycoat_types::QuoteError;

/// A treatment applied to a section. Flags are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Material {
    Profiled,
    RoadBase,
    Asphalt,
    Bitumen,
}

impl Material {
    pub const ALL: [Material; 4] = [
        Material::Profiled,
        Material::RoadBase,
        Material::Asphalt,
        Material::Bitumen,
    ];

    /// Field name used in stored job-site documents
    pub fn wire_name(&self) -> &'static str {
        match self {
            Material::Profiled => "profiled",
            Material::RoadBase => "roadBase",
            Material::Asphalt => "asphalt",
            Material::Bitumen => "bitumen",
        }
    }

    /// Human-readable label for summaries
    pub fn label(&self) -> &'static str {
        match self {
            Material::Profiled => "Profiled",
            Material::RoadBase => "Road Base",
            Material::Asphalt => "Asphalt",
            Material::Bitumen => "Bitumen",
        }
    }
}

impl FromStr for Material {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profiled" => Ok(Material::Profiled),
            "roadBase" | "road_base" => Ok(Material::RoadBase),
            "asphalt" => Ok(Material::Asphalt),
            "bitumen" => Ok(Material::Bitumen),
            other => Err(QuoteError::UnknownMaterial(other.to_string())),
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        for material in Material::ALL {
            assert_eq!(material.wire_name().parse::<Material>(), Ok(material));
        }
        assert_eq!("road_base".parse::<Material>(), Ok(Material::RoadBase));
    }

    #[test]
    fn test_unknown_material() {
        assert_eq!(
            "concrete".parse::<Material>(),
            Err(QuoteError::UnknownMaterial("concrete".to_string()))
        );
        // Names are case-sensitive, like the stored field names
        assert!("Asphalt".parse::<Material>().is_err());
    }
}
