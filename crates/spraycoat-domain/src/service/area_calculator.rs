//! Area aggregation over sections

use serde::{Deserialize, Serialize};
use spraycoat_types::QuoteError;

use crate::model::{Material, Section};

/// Per-option totals shown under each quote option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSummary {
    pub label: String,
    pub section_count: usize,
    pub total_area: f64,
    pub profiled: f64,
    pub road_base: f64,
    pub asphalt: f64,
    pub bitumen: f64,
}

impl OptionSummary {
    pub fn material(&self, material: Material) -> f64 {
        match material {
            Material::Profiled => self.profiled,
            Material::RoadBase => self.road_base,
            Material::Asphalt => self.asphalt,
            Material::Bitumen => self.bitumen,
        }
    }
}

pub fn total_area<'a, I>(sections: I) -> f64
where
    I: IntoIterator<Item = &'a Section>,
{
    sections.into_iter().map(Section::area).sum()
}

pub fn area_for<'a, I>(sections: I, material: Material) -> f64
where
    I: IntoIterator<Item = &'a Section>,
{
    sections
        .into_iter()
        .filter(|s| s.has(material))
        .map(Section::area)
        .sum()
}

/// Area of sections flagged with a material given by its stored field name
pub fn material_area<'a, I>(sections: I, material: &str) -> Result<f64, QuoteError>
where
    I: IntoIterator<Item = &'a Section>,
{
    let material: Material = material.parse()?;
    Ok(area_for(sections, material))
}

pub fn summarize<'a, I>(label: &str, sections: I) -> OptionSummary
where
    I: IntoIterator<Item = &'a Section>,
{
    let sections: Vec<&Section> = sections.into_iter().collect();
    OptionSummary {
        label: label.to_string(),
        section_count: sections.len(),
        total_area: total_area(sections.iter().copied()),
        profiled: area_for(sections.iter().copied(), Material::Profiled),
        road_base: area_for(sections.iter().copied(), Material::RoadBase),
        asphalt: area_for(sections.iter().copied(), Material::Asphalt),
        bitumen: area_for(sections.iter().copied(), Material::Bitumen),
    }
}
