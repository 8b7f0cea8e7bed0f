//! New job-site form: address fields plus the quote options being edited
//!
//! The option set lives only in memory until `submit`, which writes the
//! whole job site in one store call.

use spraycoat_domain::model::{JobSitePayload, QuoteOptionSet};
use spraycoat_domain::repository::JobSiteRepository;
use spraycoat_types::{Error, Result};
use tracing::{debug, info};

use super::quote_draft::QuoteDraft;

#[derive(Debug, Clone)]
pub struct JobSiteForm {
    lead_id: String,
    pub address: String,
    pub city: String,
    pub notes: Option<String>,
    options: QuoteOptionSet,
}

impl JobSiteForm {
    /// Empty form for `lead_id`, starting with a single blank option
    pub fn new(lead_id: impl Into<String>) -> Self {
        Self {
            lead_id: lead_id.into(),
            address: String::new(),
            city: String::new(),
            notes: None,
            options: QuoteOptionSet::create_default(),
        }
    }

    pub fn lead_id(&self) -> &str {
        &self.lead_id
    }

    pub fn options(&self) -> &QuoteOptionSet {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut QuoteOptionSet {
        &mut self.options
    }

    /// Fill the form from a draft file. Blank draft fields keep what is already set.
    pub fn apply_draft(&mut self, draft: &QuoteDraft) -> Result<()> {
        if let Some(address) = non_blank(draft.address.as_deref()) {
            self.address = address.to_string();
        }
        if let Some(city) = non_blank(draft.city.as_deref()) {
            self.city = city.to_string();
        }
        if let Some(notes) = non_blank(draft.notes.as_deref()) {
            self.notes = Some(notes.to_string());
        }
        if !draft.options.is_empty() {
            self.options = draft.build()?;
        }
        debug!(options = self.options.len(), "applied quote draft");
        Ok(())
    }

    /// Check the form and build the document that would be stored
    pub fn validate(&self) -> Result<JobSitePayload> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(Error::validation("address", "required"));
        }
        let city = self.city.trim();
        if city.is_empty() {
            return Err(Error::validation("city", "required"));
        }

        for (option_index, option) in self.options.to_wire().iter().enumerate() {
            for (section_index, section) in option.sections.iter().enumerate() {
                let field = format!("options[{}].sections[{}]", option_index, section_index);
                check_dimension(&field, "length", section.length())?;
                check_dimension(&field, "width", section.width())?;
                // length * width can still overflow
                check_dimension(&field, "area", section.area())?;
            }
        }

        let notes = non_blank(self.notes.as_deref()).map(str::to_string);
        Ok(JobSitePayload::new(address, city, notes, &self.options))
    }

    /// Validate and save the job site, returning its id
    pub fn submit<R: JobSiteRepository + ?Sized>(self, repo: &R) -> Result<String> {
        let payload = self.validate()?;
        let id = repo.create(&self.lead_id, &payload)?;
        info!(lead_id = %self.lead_id, %id, "job site submitted");
        Ok(id)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_dimension(field: &str, name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::validation(
            format!("{}.{}", field, name),
            format!("must be a non-negative number, got {}", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spraycoat_domain::model::{InquiryMethod, Material, NewLead, SectionInput};
    use spraycoat_domain::repository::LeadRepository;
    use spraycoat_infra::persistence::{StoreJobSiteRepository, StoreLeadRepository};
    use spraycoat_store::MemoryStore;

    fn filled_form(lead_id: &str) -> JobSiteForm {
        let mut form = JobSiteForm::new(lead_id);
        form.address = "  12 Quarry Rd ".to_string();
        form.city = "Ballarat".to_string();
        form
    }

    #[test]
    fn test_new_form_has_one_blank_option() {
        let form = JobSiteForm::new("l1");
        assert_eq!(form.options().len(), 1);
        assert_eq!(form.options().label(0).unwrap(), "Option A");
        assert_eq!(form.options().section_count(0).unwrap(), 1);
    }

    #[test]
    fn test_missing_address_or_city() {
        let mut form = JobSiteForm::new("l1");
        form.city = "Ballarat".to_string();
        assert!(matches!(
            form.validate(),
            Err(Error::Validation { ref field, .. }) if field == "address"
        ));

        form.address = "12 Quarry Rd".to_string();
        form.city = "   ".to_string();
        assert!(matches!(
            form.validate(),
            Err(Error::Validation { ref field, .. }) if field == "city"
        ));
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let mut form = filled_form("l1");
        form.options_mut()
            .update_section(0, 0, SectionInput::new(-1.0, 3.0))
            .unwrap();
        match form.validate() {
            Err(Error::Validation { field, .. }) => {
                assert_eq!(field, "options[0].sections[0].length")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_area_rejected() {
        let mut form = filled_form("l1");
        form.options_mut()
            .update_section(0, 0, SectionInput::new(1e200, 1e200))
            .unwrap();
        match form.validate() {
            Err(Error::Validation { field, .. }) => {
                assert_eq!(field, "options[0].sections[0].area")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_stored_areas_are_numbers() {
        let mut form = filled_form("l1");
        form.options_mut()
            .update_section(0, 0, SectionInput::new(1e150, 1e150))
            .unwrap();
        let payload = form.validate().unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["options"][0]["sections"][0]["area"].is_f64());
    }

    #[test]
    fn test_nan_dimension_rejected() {
        let mut form = filled_form("l1");
        form.options_mut()
            .update_section(0, 0, SectionInput::new(2.0, f64::NAN))
            .unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_validate_trims_fields() {
        let mut form = filled_form("l1");
        form.notes = Some("   ".to_string());
        let payload = form.validate().unwrap();
        assert_eq!(payload.address, "12 Quarry Rd");
        assert!(payload.notes.is_none());
        assert_eq!(payload.options.len(), 1);
    }

    #[test]
    fn test_submit_writes_one_job_site() {
        let store = MemoryStore::new();
        let lead = StoreLeadRepository::new(&store)
            .create(NewLead {
                first_name: "Dana".to_string(),
                last_name: "Whitlock".to_string(),
                phone: "0400 123 456".to_string(),
                email: "dana@example.com".to_string(),
                inquiry_method: InquiryMethod::Phone,
            })
            .unwrap();

        let mut form = filled_form(&lead.id);
        let options = form.options_mut();
        options
            .update_section(
                0,
                0,
                SectionInput::new(10.0, 4.0).with_material(Material::Asphalt),
            )
            .unwrap();
        options.add_option();

        let repo = StoreJobSiteRepository::new(&store);
        let id = form.submit(&repo).unwrap();

        let site = repo.find_by_id(&lead.id, &id).unwrap().unwrap();
        assert_eq!(site.options.len(), 2);
        assert_eq!(site.options[1].label, "Option B");
        assert!((site.options[0].area_for(Material::Asphalt) - 40.0).abs() < 1e-9);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_invalid_form_writes_nothing() {
        let store = MemoryStore::new();
        let repo = StoreJobSiteRepository::new(&store);
        assert!(JobSiteForm::new("l1").submit(&repo).is_err());
        assert!(store.is_empty());
    }
}
