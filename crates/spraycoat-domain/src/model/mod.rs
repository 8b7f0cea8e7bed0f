//! Domain model types

pub mod job_site;
pub mod lead;
pub mod material;
pub mod option_set;
pub mod quote_option;
pub mod section;

pub use job_site::{JobSite, JobSiteListing, JobSitePayload};
pub use lead::{InquiryMethod, Lead, LeadUpdate, NewLead};
pub use material::Material;
pub use option_set::{OptionId, QuoteOptionSet, SectionId};
pub use quote_option::{option_label, QuoteOption};
pub use section::{Section, SectionInput};
