//! Lead to job site workflow against the file store

use spraycoat_app::app::query_service::{self, JobSiteFilter};
use spraycoat_app::app::{AppContext, JobSiteForm, QuoteDraft};
use spraycoat_app::config::Config;
use spraycoat_domain::model::{InquiryMethod, Material, NewLead, SectionInput};
use spraycoat_domain::repository::{JobSiteRepository, LeadRepository};
use spraycoat_types::{AuthError, Error};
use tempfile::tempdir;

fn open(dir: &tempfile::TempDir) -> AppContext {
    let config = Config {
        data_dir: Some(dir.path().join("data")),
        ..Default::default()
    };
    AppContext::with_session_path(config, dir.path().join("session.json")).unwrap()
}

fn new_lead() -> NewLead {
    NewLead {
        first_name: "Dana".to_string(),
        last_name: "Whitlock".to_string(),
        phone: "0400 123 456".to_string(),
        email: "dana@example.com".to_string(),
        inquiry_method: InquiryMethod::Referral,
    }
}

#[test]
fn test_writes_require_sign_in() {
    let dir = tempdir().unwrap();
    let ctx = open(&dir);
    assert!(matches!(
        ctx.require_user(),
        Err(Error::Auth(AuthError::NotSignedIn))
    ));
    ctx.identity().sign_in("office").unwrap();
    assert_eq!(ctx.require_user().unwrap(), "office");
}

#[test]
fn test_form_submission_survives_reopen() {
    let dir = tempdir().unwrap();
    let (lead_id, site_id) = {
        let ctx = open(&dir);
        let lead = ctx.leads().create(new_lead()).unwrap();

        let mut form = JobSiteForm::new(&lead.id);
        form.address = "12 Quarry Rd".to_string();
        form.city = "Ballarat".to_string();
        let options = form.options_mut();
        options
            .update_section(
                0,
                0,
                SectionInput::new(12.0, 3.5)
                    .with_label("Driveway")
                    .with_material(Material::Asphalt),
            )
            .unwrap();
        options.add_section(0).unwrap();
        options
            .update_section(0, 1, SectionInput::new(2.0, 2.0).with_material(Material::Bitumen))
            .unwrap();
        options.add_option();
        options.delete_option(1).unwrap();
        options.add_option();

        let id = form.submit(&ctx.job_sites()).unwrap();
        (lead.id, id)
    };

    let ctx = open(&dir);
    let site = ctx.job_sites().find_by_id(&lead_id, &site_id).unwrap().unwrap();
    assert_eq!(site.address, "12 Quarry Rd");
    assert_eq!(site.options.len(), 2);
    // Labels come from position at creation time
    assert_eq!(site.options[1].label, "Option B");
    assert_eq!(site.options[0].sections[0].label(), "Driveway");
    assert!((site.options[0].total_area() - 46.0).abs() < 1e-9);
    assert!((site.options[0].area_for(Material::Bitumen) - 4.0).abs() < 1e-9);

    let report = query_service::job_site_report(&ctx.job_sites(), &lead_id, &site_id).unwrap();
    assert!(report.contains("12 Quarry Rd"));

    let listed = query_service::list_job_sites(&ctx.job_sites(), &JobSiteFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].lead_name, "Dana Whitlock");
}

#[test]
fn test_draft_prefills_form() {
    let dir = tempdir().unwrap();
    let ctx = open(&dir);
    let lead = ctx.leads().create(new_lead()).unwrap();

    let draft_path = dir.path().join("draft.json");
    std::fs::write(
        &draft_path,
        r#"{"address": "4 Basalt St", "city": "Geelong",
            "options": [{"label": "Premium", "sections": [{"length": 5, "width": 4, "profiled": true}]}]}"#,
    )
    .unwrap();

    let mut form = JobSiteForm::new(&lead.id);
    form.apply_draft(&QuoteDraft::load(&draft_path).unwrap()).unwrap();
    let id = form.submit(&ctx.job_sites()).unwrap();

    let site = ctx.job_sites().find_by_id(&lead.id, &id).unwrap().unwrap();
    assert_eq!(site.city, "Geelong");
    assert_eq!(site.options[0].label, "Premium");
    assert!((site.options[0].material_area("profiled").unwrap() - 20.0).abs() < 1e-9);
}

#[test]
fn test_deleting_lead_removes_job_sites() {
    let dir = tempdir().unwrap();
    let ctx = open(&dir);
    let lead = ctx.leads().create(new_lead()).unwrap();

    let mut form = JobSiteForm::new(&lead.id);
    form.address = "4 Basalt St".to_string();
    form.city = "Geelong".to_string();
    form.submit(&ctx.job_sites()).unwrap();

    ctx.leads().delete(&lead.id).unwrap();
    assert!(ctx.job_sites().list_all().unwrap().is_empty());
    assert!(ctx.store().is_empty());
}
