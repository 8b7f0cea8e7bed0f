//! Persistence implementations
//!
//! This module provides record-store backed implementations of the repository traits.

mod documents;
mod store_job_site_repo;
mod store_lead_repo;

pub use store_job_site_repo::StoreJobSiteRepository;
pub use store_lead_repo::StoreLeadRepository;

pub(crate) const LEADS: &str = "leads";
pub(crate) const JOB_SITES: &str = "jobSites";
