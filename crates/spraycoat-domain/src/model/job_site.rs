//! Job site records stored under a lead

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::option_set::QuoteOptionSet;
use super::quote_option::QuoteOption;
use crate::service::area_calculator::OptionSummary;

/// Document written when a job-site form is submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSitePayload {
    pub address: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub options: Vec<QuoteOption>,
}

impl JobSitePayload {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        notes: Option<String>,
        options: &QuoteOptionSet,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            notes,
            options: options.to_wire(),
        }
    }
}

/// A stored job site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSite {
    pub id: String,
    pub lead_id: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub options: Vec<QuoteOption>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl JobSite {
    pub fn summaries(&self) -> Vec<OptionSummary> {
        self.options.iter().map(QuoteOption::summary).collect()
    }

    /// Editable copy of the stored options
    pub fn option_set(&self) -> QuoteOptionSet {
        QuoteOptionSet::from_wire(self.options.clone())
    }
}

/// Job site joined with the lead it belongs to, for cross-lead listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSiteListing {
    pub id: String,
    pub lead_id: String,
    pub lead_name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl JobSiteListing {
    pub fn from_job_site(job_site: &JobSite, lead_name: &str) -> Self {
        Self {
            id: job_site.id.clone(),
            lead_id: job_site.lead_id.clone(),
            lead_name: lead_name.to_string(),
            address: job_site.address.clone(),
            city: job_site.city.clone(),
            notes: job_site.notes.clone(),
        }
    }

    /// Case-insensitive match against address, city and lead name
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.address.to_lowercase().contains(&term)
            || self.city.to_lowercase().contains(&term)
            || self.lead_name.to_lowercase().contains(&term)
    }
}
