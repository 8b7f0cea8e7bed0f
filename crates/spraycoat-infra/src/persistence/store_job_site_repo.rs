//! Record-store implementation of JobSiteRepository

use spraycoat_domain::model::{JobSite, JobSiteListing, JobSitePayload, Lead};
use spraycoat_domain::repository::{
    to_document, CollectionPath, DocumentPath, JobSiteRepository, RecordStore, StoredDocument,
};
use spraycoat_types::Result;
use tracing::{info, warn};

use super::documents::{decode, stamp_created};
use super::{JOB_SITES, LEADS};

/// Job sites stored in `leads/{leadId}/jobSites`
pub struct StoreJobSiteRepository<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> StoreJobSiteRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn lead_path(lead_id: &str) -> Result<DocumentPath> {
        Ok(CollectionPath::root(LEADS)?.doc(lead_id)?)
    }

    fn collection(lead_id: &str) -> Result<CollectionPath> {
        Ok(Self::lead_path(lead_id)?.collection(JOB_SITES)?)
    }

    fn decode_site(lead_id: &str, stored: StoredDocument) -> Result<JobSite> {
        decode(stored, &[("leadId", lead_id)])
    }
}

impl<'a, S: RecordStore + ?Sized> JobSiteRepository for StoreJobSiteRepository<'a, S> {
    fn create(&self, lead_id: &str, payload: &JobSitePayload) -> Result<String> {
        // The owning lead must exist
        self.store.get(&Self::lead_path(lead_id)?)?;

        let mut document = to_document(payload)?;
        stamp_created(&mut document);
        let id = self.store.create(&Self::collection(lead_id)?, document)?;
        info!(%lead_id, %id, options = payload.options.len(), "job site created");
        Ok(id)
    }

    fn find_for_lead(&self, lead_id: &str) -> Result<Vec<JobSite>> {
        let mut sites = self
            .store
            .list(&Self::collection(lead_id)?)?
            .into_iter()
            .map(|stored| Self::decode_site(lead_id, stored))
            .collect::<Result<Vec<_>>>()?;
        sites.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(sites)
    }

    fn find_by_id(&self, lead_id: &str, id: &str) -> Result<Option<JobSite>> {
        let path = Self::collection(lead_id)?.doc(id)?;
        match self.store.get(&path) {
            Ok(data) => {
                let stored = StoredDocument {
                    id: id.to_string(),
                    data,
                };
                Ok(Some(Self::decode_site(lead_id, stored)?))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn delete(&self, lead_id: &str, id: &str) -> Result<()> {
        self.store.delete(&Self::collection(lead_id)?.doc(id)?)?;
        info!(%lead_id, %id, "job site deleted");
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<JobSiteListing>> {
        let mut listings = Vec::new();
        for stored in self.store.list(&CollectionPath::root(LEADS)?)? {
            let lead: Lead = match decode(stored.clone(), &[]) {
                Ok(lead) => lead,
                Err(e) => {
                    warn!(id = %stored.id, "skipping unreadable lead: {}", e);
                    continue;
                }
            };
            let lead_name = lead.full_name();
            for site in self.find_for_lead(&lead.id)? {
                listings.push(JobSiteListing::from_job_site(&site, &lead_name));
            }
        }
        Ok(listings)
    }
}
