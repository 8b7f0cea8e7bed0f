//! Editable set of quote options for one job-site form.
//!
//! Options and sections live in flat maps keyed by generated ids. Each option
//! keeps an ordered list of its section ids and the set keeps the option order,
//! so positions are only resolved at the edge of each operation. Every
//! operation resolves all of its indices before touching any map, which means
//! a failed call leaves the set exactly as it was.
//!
//! Option labels are assigned from the option's position when it is created
//! and are never recomputed. Deleting "Option A" leaves "Option B" labelled
//! "Option B" at position 0.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use spraycoat_types::{IndexKind, QuoteError};
use uuid::Uuid;

use super::quote_option::{option_label, QuoteOption};
use super::section::{Section, SectionInput};
use crate::service::area_calculator::{self, OptionSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionId(Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(Uuid);

impl OptionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl SectionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct OptionEntry {
    label: String,
    sections: Vec<SectionId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<QuoteOption>", into = "Vec<QuoteOption>")]
pub struct QuoteOptionSet {
    order: Vec<OptionId>,
    options: HashMap<OptionId, OptionEntry>,
    sections: HashMap<SectionId, Section>,
}

impl Default for QuoteOptionSet {
    fn default() -> Self {
        Self::create_default()
    }
}

fn out_of_range(kind: IndexKind, index: usize, len: usize) -> QuoteError {
    QuoteError::IndexOutOfRange { kind, index, len }
}

impl QuoteOptionSet {
    /// A set with no options at all
    pub fn empty() -> Self {
        Self {
            order: Vec::new(),
            options: HashMap::new(),
            sections: HashMap::new(),
        }
    }

    /// "Option A" holding one blank section
    pub fn create_default() -> Self {
        let mut set = Self::empty();
        set.add_option();
        set
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ------------------------------------------------------------------
    // Addressing
    // ------------------------------------------------------------------

    pub fn option_id(&self, option_index: usize) -> Result<OptionId, QuoteError> {
        self.order
            .get(option_index)
            .copied()
            .ok_or_else(|| out_of_range(IndexKind::Option, option_index, self.order.len()))
    }

    pub fn section_id(
        &self,
        option_index: usize,
        section_index: usize,
    ) -> Result<SectionId, QuoteError> {
        let entry = self.entry(self.option_id(option_index)?)?;
        entry
            .sections
            .get(section_index)
            .copied()
            .ok_or_else(|| out_of_range(IndexKind::Section, section_index, entry.sections.len()))
    }

    /// Current position of an option, if it is still in the set
    pub fn position_of(&self, option: OptionId) -> Option<usize> {
        self.order.iter().position(|id| *id == option)
    }

    fn entry(&self, option: OptionId) -> Result<&OptionEntry, QuoteError> {
        self.options.get(&option).ok_or_else(|| QuoteError::UnknownId {
            kind: IndexKind::Option,
            id: option.to_string(),
        })
    }

    fn owner_of(&self, section: SectionId) -> Result<OptionId, QuoteError> {
        self.order
            .iter()
            .copied()
            .find(|id| {
                self.options
                    .get(id)
                    .map(|entry| entry.sections.contains(&section))
                    .unwrap_or(false)
            })
            .ok_or_else(|| QuoteError::UnknownId {
                kind: IndexKind::Section,
                id: section.to_string(),
            })
    }

    // ------------------------------------------------------------------
    // Options
    // ------------------------------------------------------------------

    /// Append an option labelled from its position, with one blank section
    pub fn add_option(&mut self) -> OptionId {
        let label = option_label(self.order.len());
        self.push_option(label, vec![Section::blank()])
    }

    fn push_option(&mut self, label: String, sections: Vec<Section>) -> OptionId {
        let id = OptionId::generate();
        let mut section_ids = Vec::with_capacity(sections.len());
        for section in sections {
            let section_id = SectionId::generate();
            self.sections.insert(section_id, section);
            section_ids.push(section_id);
        }
        self.options.insert(
            id,
            OptionEntry {
                label,
                sections: section_ids,
            },
        );
        self.order.push(id);
        id
    }

    /// Remove an option and all of its sections. Remaining labels are kept.
    pub fn delete_option(&mut self, option_index: usize) -> Result<QuoteOption, QuoteError> {
        let id = self.option_id(option_index)?;
        let removed = self.option_by_id(id)?;
        self.order.remove(option_index);
        if let Some(entry) = self.options.remove(&id) {
            for section_id in entry.sections {
                self.sections.remove(&section_id);
            }
        }
        Ok(removed)
    }

    pub fn rename_option(
        &mut self,
        option_index: usize,
        label: impl Into<String>,
    ) -> Result<(), QuoteError> {
        let id = self.option_id(option_index)?;
        let entry = self.options.get_mut(&id).ok_or_else(|| QuoteError::UnknownId {
            kind: IndexKind::Option,
            id: id.to_string(),
        })?;
        entry.label = label.into();
        Ok(())
    }

    pub fn label(&self, option_index: usize) -> Result<&str, QuoteError> {
        let entry = self.entry(self.option_id(option_index)?)?;
        Ok(entry.label.as_str())
    }

    /// Materialise the option at `option_index`
    pub fn option(&self, option_index: usize) -> Result<QuoteOption, QuoteError> {
        self.option_by_id(self.option_id(option_index)?)
    }

    pub fn option_by_id(&self, option: OptionId) -> Result<QuoteOption, QuoteError> {
        let entry = self.entry(option)?;
        Ok(QuoteOption {
            label: entry.label.clone(),
            sections: self.collect_sections(entry).into_iter().cloned().collect(),
        })
    }

    fn collect_sections(&self, entry: &OptionEntry) -> Vec<&Section> {
        entry
            .sections
            .iter()
            .filter_map(|id| self.sections.get(id))
            .collect()
    }

    // ------------------------------------------------------------------
    // Sections
    // ------------------------------------------------------------------

    /// Append a blank section to the option at `option_index`
    pub fn add_section(&mut self, option_index: usize) -> Result<SectionId, QuoteError> {
        let option = self.option_id(option_index)?;
        self.add_section_to(option)
    }

    pub fn add_section_to(&mut self, option: OptionId) -> Result<SectionId, QuoteError> {
        let section_id = SectionId::generate();
        let entry = self.options.get_mut(&option).ok_or_else(|| QuoteError::UnknownId {
            kind: IndexKind::Option,
            id: option.to_string(),
        })?;
        entry.sections.push(section_id);
        self.sections.insert(section_id, Section::blank());
        Ok(section_id)
    }

    /// Replace a section's values. `area` is always recomputed from the input.
    pub fn update_section(
        &mut self,
        option_index: usize,
        section_index: usize,
        values: impl Into<SectionInput>,
    ) -> Result<(), QuoteError> {
        let section = self.section_id(option_index, section_index)?;
        self.update_section_by_id(section, values)
    }

    pub fn update_section_by_id(
        &mut self,
        section: SectionId,
        values: impl Into<SectionInput>,
    ) -> Result<(), QuoteError> {
        let slot = self.sections.get_mut(&section).ok_or_else(|| QuoteError::UnknownId {
            kind: IndexKind::Section,
            id: section.to_string(),
        })?;
        *slot = Section::from(values.into());
        Ok(())
    }

    /// Remove a section; later sections shift down by one position
    pub fn delete_section(
        &mut self,
        option_index: usize,
        section_index: usize,
    ) -> Result<Section, QuoteError> {
        let option = self.option_id(option_index)?;
        let section = self.section_id(option_index, section_index)?;
        self.remove_section(option, section)
    }

    pub fn delete_section_by_id(&mut self, section: SectionId) -> Result<Section, QuoteError> {
        let option = self.owner_of(section)?;
        self.remove_section(option, section)
    }

    fn remove_section(
        &mut self,
        option: OptionId,
        section: SectionId,
    ) -> Result<Section, QuoteError> {
        let removed = self.sections.remove(&section).ok_or_else(|| QuoteError::UnknownId {
            kind: IndexKind::Section,
            id: section.to_string(),
        })?;
        if let Some(entry) = self.options.get_mut(&option) {
            entry.sections.retain(|id| *id != section);
        }
        Ok(removed)
    }

    pub fn section(
        &self,
        option_index: usize,
        section_index: usize,
    ) -> Result<&Section, QuoteError> {
        let id = self.section_id(option_index, section_index)?;
        self.section_by_id(id)
    }

    pub fn section_by_id(&self, section: SectionId) -> Result<&Section, QuoteError> {
        self.sections.get(&section).ok_or_else(|| QuoteError::UnknownId {
            kind: IndexKind::Section,
            id: section.to_string(),
        })
    }

    pub fn sections(&self, option_index: usize) -> Result<Vec<&Section>, QuoteError> {
        let entry = self.entry(self.option_id(option_index)?)?;
        Ok(self.collect_sections(entry))
    }

    pub fn section_count(&self, option_index: usize) -> Result<usize, QuoteError> {
        let entry = self.entry(self.option_id(option_index)?)?;
        Ok(entry.sections.len())
    }

    // ------------------------------------------------------------------
    // Derived metrics
    // ------------------------------------------------------------------

    pub fn total_area(&self, option_index: usize) -> Result<f64, QuoteError> {
        Ok(area_calculator::total_area(self.sections(option_index)?))
    }

    pub fn material_area(&self, option_index: usize, material: &str) -> Result<f64, QuoteError> {
        area_calculator::material_area(self.sections(option_index)?, material)
    }

    /// One summary per option, in option order
    pub fn summaries(&self) -> Vec<OptionSummary> {
        self.order
            .iter()
            .filter_map(|id| self.options.get(id))
            .map(|entry| area_calculator::summarize(&entry.label, self.collect_sections(entry)))
            .collect()
    }

    // ------------------------------------------------------------------
    // Wire form
    // ------------------------------------------------------------------

    /// Options in order, in the shape stored on job-site documents
    pub fn to_wire(&self) -> Vec<QuoteOption> {
        self.order
            .iter()
            .filter_map(|id| self.option_by_id(*id).ok())
            .collect()
    }

    /// Rebuild a set from stored options. Every section's area is recomputed.
    pub fn from_wire(options: Vec<QuoteOption>) -> Self {
        let mut set = Self::empty();
        for option in options {
            let sections = option
                .sections
                .into_iter()
                .map(|mut section| {
                    section.recompute();
                    section
                })
                .collect();
            set.push_option(option.label, sections);
        }
        set
    }
}

impl From<Vec<QuoteOption>> for QuoteOptionSet {
    fn from(options: Vec<QuoteOption>) -> Self {
        QuoteOptionSet::from_wire(options)
    }
}

impl From<QuoteOptionSet> for Vec<QuoteOption> {
    fn from(set: QuoteOptionSet) -> Self {
        set.to_wire()
    }
}
