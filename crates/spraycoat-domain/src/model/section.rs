//! Measured sub-area of a job site

use serde::{Deserialize, Serialize};

use super::material::Material;

/// Caller-supplied section values.
///
/// There is no `area` field: area is always derived from `length * width`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionInput {
    pub label: String,
    pub length: f64,
    pub width: f64,
    pub profiled: bool,
    #[serde(alias = "road_base")]
    pub road_base: bool,
    pub asphalt: bool,
    pub bitumen: bool,
}

impl SectionInput {
    pub fn new(length: f64, width: f64) -> Self {
        Self {
            length,
            width,
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        *self.flag_mut(material) = true;
        self
    }

    fn flag_mut(&mut self, material: Material) -> &mut bool {
        match material {
            Material::Profiled => &mut self.profiled,
            Material::RoadBase => &mut self.road_base,
            Material::Asphalt => &mut self.asphalt,
            Material::Bitumen => &mut self.bitumen,
        }
    }
}

/// A rectangular section with material flags.
///
/// Fields are private so `area` cannot drift from `length * width`;
/// every setter that touches a dimension recomputes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SectionInput")]
pub struct Section {
    label: String,
    length: f64,
    width: f64,
    area: f64,
    profiled: bool,
    road_base: bool,
    asphalt: bool,
    bitumen: bool,
}

impl Section {
    /// Empty label, zero dimensions, no materials
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn has(&self, material: Material) -> bool {
        match material {
            Material::Profiled => self.profiled,
            Material::RoadBase => self.road_base,
            Material::Asphalt => self.asphalt,
            Material::Bitumen => self.bitumen,
        }
    }

    /// Materials flagged on this section, in canonical order
    pub fn materials(&self) -> Vec<Material> {
        Material::ALL
            .into_iter()
            .filter(|m| self.has(*m))
            .collect()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_dimensions(&mut self, length: f64, width: f64) {
        self.length = length;
        self.width = width;
        self.recompute();
    }

    pub fn set_material(&mut self, material: Material, enabled: bool) {
        match material {
            Material::Profiled => self.profiled = enabled,
            Material::RoadBase => self.road_base = enabled,
            Material::Asphalt => self.asphalt = enabled,
            Material::Bitumen => self.bitumen = enabled,
        }
    }

    /// Re-derive `area` from the current dimensions
    pub fn recompute(&mut self) {
        self.area = self.length * self.width;
    }
}

impl From<SectionInput> for Section {
    fn from(input: SectionInput) -> Self {
        let mut section = Section {
            label: input.label,
            length: input.length,
            width: input.width,
            area: 0.0,
            profiled: input.profiled,
            road_base: input.road_base,
            asphalt: input.asphalt,
            bitumen: input.bitumen,
        };
        section.recompute();
        section
    }
}

impl From<Section> for SectionInput {
    fn from(section: Section) -> Self {
        SectionInput {
            label: section.label,
            length: section.length,
            width: section.width,
            profiled: section.profiled,
            road_base: section.road_base,
            asphalt: section.asphalt,
            bitumen: section.bitumen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_section() {
        let section = Section::blank();
        assert_eq!(section.label(), "");
        assert_eq!(section.area(), 0.0);
        assert!(section.materials().is_empty());
    }

    #[test]
    fn test_area_follows_dimensions() {
        let mut section = Section::from(SectionInput::new(5.0, 4.0));
        assert!((section.area() - 20.0).abs() < f64::EPSILON);

        section.set_dimensions(2.5, 3.0);
        assert!((section.area() - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_ignores_stored_area() {
        let json = r#"{"label":"Driveway","length":5,"width":4,"area":999,
            "profiled":true,"roadBase":false,"asphalt":false,"bitumen":false}"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert!((section.area() - 20.0).abs() < f64::EPSILON);
        assert!(section.has(Material::Profiled));
        assert_eq!(section.label(), "Driveway");
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let section = Section::from(
            SectionInput::new(2.0, 3.0).with_material(Material::RoadBase),
        );
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["roadBase"], true);
        assert_eq!(value["area"], 6.0);
        assert_eq!(value["label"], "");
    }

    #[test]
    fn test_round_trip_through_input_drops_area() {
        let section = Section::from(SectionInput::new(3.0, 3.0).with_label("Path"));
        let input = SectionInput::from(section.clone());
        assert_eq!(Section::from(input), section);
    }
}
