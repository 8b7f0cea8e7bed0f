//! Query Service - read-only access to stored leads and job sites

use spraycoat_domain::model::{JobSite, JobSiteListing, Lead};
use spraycoat_domain::repository::{JobSiteRepository, LeadRepository};
use spraycoat_domain::service::generate_quote_report;
use spraycoat_types::{Result, StoreError};

/// Filter for cross-lead job-site listings. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct JobSiteFilter {
    pub lead_id: Option<String>,
    /// Exact city, ignoring case
    pub city: Option<String>,
    /// Substring of address, city or lead name
    pub search: Option<String>,
}

impl JobSiteFilter {
    pub fn matches(&self, listing: &JobSiteListing) -> bool {
        if let Some(ref lead_id) = self.lead_id {
            if &listing.lead_id != lead_id {
                return false;
            }
        }
        if let Some(ref city) = self.city {
            if !listing.city.trim().eq_ignore_ascii_case(city.trim()) {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => listing.matches(term),
            _ => true,
        }
    }
}

// ============================================================================
// Lead Queries
// ============================================================================

/// Leads matching `term`, or every lead when the term is blank
pub fn search_leads<R: LeadRepository + ?Sized>(repo: &R, term: &str) -> Result<Vec<Lead>> {
    let term = term.trim();
    if term.is_empty() {
        repo.find_all()
    } else {
        repo.search(term)
    }
}

/// Lead by id, failing when it does not exist
pub fn get_lead<R: LeadRepository + ?Sized>(repo: &R, id: &str) -> Result<Lead> {
    repo.find_by_id(id)?
        .ok_or_else(|| StoreError::NotFound(format!("lead {}", id)).into())
}

// ============================================================================
// Job Site Queries
// ============================================================================

/// Job sites across all leads, sorted by city then address
pub fn list_job_sites<R: JobSiteRepository + ?Sized>(
    repo: &R,
    filter: &JobSiteFilter,
) -> Result<Vec<JobSiteListing>> {
    let mut listings: Vec<JobSiteListing> = repo
        .list_all()?
        .into_iter()
        .filter(|listing| filter.matches(listing))
        .collect();
    listings.sort_by(|a, b| {
        (a.city.to_lowercase(), a.address.to_lowercase())
            .cmp(&(b.city.to_lowercase(), b.address.to_lowercase()))
    });
    Ok(listings)
}

/// Distinct cities with at least one job site
pub fn cities<R: JobSiteRepository + ?Sized>(repo: &R) -> Result<Vec<String>> {
    let mut cities: Vec<String> = repo
        .list_all()?
        .into_iter()
        .map(|listing| listing.city.trim().to_string())
        .filter(|city| !city.is_empty())
        .collect();
    cities.sort_by_key(|city| city.to_lowercase());
    cities.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    Ok(cities)
}

pub fn get_job_site<R: JobSiteRepository + ?Sized>(
    repo: &R,
    lead_id: &str,
    id: &str,
) -> Result<JobSite> {
    repo.find_by_id(lead_id, id)?
        .ok_or_else(|| StoreError::NotFound(format!("job site {}/{}", lead_id, id)).into())
}

/// Printable quote report for one job site
pub fn job_site_report<R: JobSiteRepository + ?Sized>(
    repo: &R,
    lead_id: &str,
    id: &str,
) -> Result<String> {
    Ok(generate_quote_report(&get_job_site(repo, lead_id, id)?))
}
