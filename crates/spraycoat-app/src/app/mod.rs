//! Application Layer
//!
//! Orchestrates between the CLI and the domain/infrastructure layers:
//! - `context`: open store, repositories and session
//! - `jobsite_form`: edit and submit a new job site
//! - `quote_draft`: quote options prepared in a file
//! - `query_service`: read-only listings and reports

pub mod context;
pub mod jobsite_form;
pub mod query_service;
pub mod quote_draft;

pub use context::AppContext;
pub use jobsite_form::JobSiteForm;
pub use query_service::JobSiteFilter;
pub use quote_draft::{DraftOption, QuoteDraft};
