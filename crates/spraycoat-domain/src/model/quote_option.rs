//! Quote option in its stored (wire) form

use serde::{Deserialize, Serialize};
use spraycoat_types::QuoteError;

use super::material::Material;
use super::section::Section;
use crate::service::area_calculator::{self, OptionSummary};

/// A named quote alternative with its ordered sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteOption {
    pub label: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl QuoteOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sections: Vec::new(),
        }
    }

    pub fn total_area(&self) -> f64 {
        area_calculator::total_area(&self.sections)
    }

    /// Area flagged with the named material (`profiled`, `roadBase`, `asphalt`, `bitumen`)
    pub fn material_area(&self, material: &str) -> Result<f64, QuoteError> {
        area_calculator::material_area(&self.sections, material)
    }

    pub fn area_for(&self, material: Material) -> f64 {
        area_calculator::area_for(&self.sections, material)
    }

    pub fn summary(&self) -> OptionSummary {
        area_calculator::summarize(&self.label, &self.sections)
    }
}

/// Default label for the option created at `position`.
///
/// 0 -> "Option A", 25 -> "Option Z", 26 -> "Option AA".
pub fn option_label(position: usize) -> String {
    let mut n = position + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    let suffix: String = letters.into_iter().rev().collect();
    format!("Option {}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionInput;

    #[test]
    fn test_option_labels() {
        assert_eq!(option_label(0), "Option A");
        assert_eq!(option_label(1), "Option B");
        assert_eq!(option_label(25), "Option Z");
        assert_eq!(option_label(26), "Option AA");
        assert_eq!(option_label(27), "Option AB");
        assert_eq!(option_label(701), "Option ZZ");
        assert_eq!(option_label(702), "Option AAA");
    }

    #[test]
    fn test_empty_option_has_zero_area() {
        let option = QuoteOption::new("Option A");
        assert_eq!(option.total_area(), 0.0);
        assert_eq!(option.material_area("bitumen"), Ok(0.0));
    }

    #[test]
    fn test_material_area_unknown_name() {
        let mut option = QuoteOption::new("Option A");
        option.sections.push(Section::from(SectionInput::new(1.0, 1.0)));
        assert_eq!(
            option.material_area("gravel"),
            Err(QuoteError::UnknownMaterial("gravel".to_string()))
        );
    }
}
