//! Quote drafts prepared offline as TOML or JSON
//!
//! ```toml
//! address = "12 Quarry Rd"
//! city = "Ballarat"
//!
//! [[options]]
//! label = "Full reseal"
//!
//! [[options.sections]]
//! label = "Driveway"
//! length = 12.0
//! width = 3.5
//! asphalt = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use spraycoat_domain::model::{QuoteOptionSet, SectionInput};
use spraycoat_types::Result;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteDraft {
    pub address: Option<String>,
    pub city: Option<String>,
    pub notes: Option<String>,
    pub options: Vec<DraftOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftOption {
    /// Overrides the positional label
    pub label: Option<String>,
    pub sections: Vec<SectionInput>,
}

impl QuoteDraft {
    /// Read a draft; `.toml` files are TOML, anything else is JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let draft: QuoteDraft = if is_toml {
            toml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        debug!(path = %path.display(), options = draft.options.len(), "loaded quote draft");
        Ok(draft)
    }

    /// Build an option set by replaying the draft through the editing operations
    pub fn build(&self) -> Result<QuoteOptionSet> {
        let mut set = QuoteOptionSet::empty();
        for (option_index, draft) in self.options.iter().enumerate() {
            set.add_option();
            if let Some(label) = draft.label.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
                set.rename_option(option_index, label)?;
            }

            match draft.sections.split_first() {
                None => {
                    set.delete_section(option_index, 0)?;
                }
                Some((first, rest)) => {
                    set.update_section(option_index, 0, first.clone())?;
                    for (offset, section) in rest.iter().enumerate() {
                        set.add_section(option_index)?;
                        set.update_section(option_index, offset + 1, section.clone())?;
                    }
                }
            }
        }
        Ok(set)
    }
}
