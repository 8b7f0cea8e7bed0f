//! Record-store implementation of LeadRepository

use spraycoat_domain::model::{Lead, LeadUpdate, NewLead};
use spraycoat_domain::repository::{
    to_document, CollectionPath, DocumentPath, LeadRepository, RecordStore, StoredDocument,
};
use spraycoat_types::{Result, StoreError};
use tracing::info;

use super::documents::{decode, stamp_created};
use super::LEADS;

/// Leads stored in the top-level `leads` collection
pub struct StoreLeadRepository<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> StoreLeadRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn collection() -> Result<CollectionPath> {
        Ok(CollectionPath::root(LEADS)?)
    }

    fn path(id: &str) -> Result<DocumentPath> {
        Ok(Self::collection()?.doc(id)?)
    }
}

impl<'a, S: RecordStore + ?Sized> LeadRepository for StoreLeadRepository<'a, S> {
    fn create(&self, lead: NewLead) -> Result<Lead> {
        lead.validate()?;
        let mut document = to_document(&lead)?;
        stamp_created(&mut document);

        let id = self.store.create(&Self::collection()?, document)?;
        info!(%id, "lead created");
        self.find_by_id(&id)?
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", LEADS, id)).into())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Lead>> {
        let path = Self::path(id)?;
        match self.store.get(&path) {
            Ok(data) => {
                let stored = StoredDocument {
                    id: id.to_string(),
                    data,
                };
                Ok(Some(decode(stored, &[])?))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn find_all(&self) -> Result<Vec<Lead>> {
        let mut leads = self
            .store
            .list(&Self::collection()?)?
            .into_iter()
            .map(|stored| decode::<Lead>(stored, &[]))
            .collect::<Result<Vec<_>>>()?;
        leads.sort_by(|a, b| {
            (a.last_name.to_lowercase(), a.first_name.to_lowercase())
                .cmp(&(b.last_name.to_lowercase(), b.first_name.to_lowercase()))
        });
        Ok(leads)
    }

    fn update(&self, id: &str, update: LeadUpdate) -> Result<Lead> {
        update.validate()?;
        let path = Self::path(id)?;
        if !update.is_empty() {
            self.store.update(&path, to_document(&update)?)?;
            info!(%id, "lead updated");
        }
        self.find_by_id(id)?
            .ok_or_else(|| StoreError::NotFound(path.to_string()).into())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(&Self::path(id)?)?;
        info!(%id, "lead deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spraycoat_domain::model::InquiryMethod;
    use spraycoat_store::MemoryStore;

    fn new_lead(first: &str, last: &str) -> NewLead {
        NewLead {
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: "0400 123 456".to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            inquiry_method: InquiryMethod::Phone,
        }
    }

    #[test]
    fn test_create_and_find() {
        let store = MemoryStore::new();
        let repo = StoreLeadRepository::new(&store);

        let lead = repo.create(new_lead("Dana", "Whitlock")).unwrap();
        assert!(lead.created_at.is_some());
        assert_eq!(lead.full_name(), "Dana Whitlock");

        let found = repo.find_by_id(&lead.id).unwrap().unwrap();
        assert_eq!(found, lead);
        assert!(repo.find_by_id("missing").unwrap().is_none());
    }

    #[test]
    fn test_create_rejects_invalid_lead() {
        let store = MemoryStore::new();
        let repo = StoreLeadRepository::new(&store);
        let mut lead = new_lead("Dana", "Whitlock");
        lead.email = "not-an-email".to_string();

        assert!(repo.create(lead).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_all_sorted_and_search() {
        let store = MemoryStore::new();
        let repo = StoreLeadRepository::new(&store);
        repo.create(new_lead("Sam", "Young")).unwrap();
        repo.create(new_lead("Dana", "Whitlock")).unwrap();
        repo.create(new_lead("Alex", "Whitlock")).unwrap();

        let names: Vec<String> = repo
            .find_all()
            .unwrap()
            .iter()
            .map(Lead::full_name)
            .collect();
        assert_eq!(names, vec!["Alex Whitlock", "Dana Whitlock", "Sam Young"]);

        let found = repo.search("whit").unwrap();
        assert_eq!(found.len(), 2);
        assert!(repo.search("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let store = MemoryStore::new();
        let repo = StoreLeadRepository::new(&store);
        let lead = repo.create(new_lead("Dana", "Whitlock")).unwrap();

        let updated = repo
            .update(
                &lead.id,
                LeadUpdate {
                    inquiry_method: Some(InquiryMethod::Referral),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.inquiry_method, InquiryMethod::Referral);
        assert_eq!(updated.phone, lead.phone);
        assert_eq!(updated.created_at, lead.created_at);
    }

    #[test]
    fn test_update_missing_lead() {
        let store = MemoryStore::new();
        let repo = StoreLeadRepository::new(&store);
        let err = repo
            .update(
                "missing",
                LeadUpdate {
                    first_name: Some("Dana".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let repo = StoreLeadRepository::new(&store);
        let lead = repo.create(new_lead("Dana", "Whitlock")).unwrap();
        repo.delete(&lead.id).unwrap();
        assert!(repo.find_by_id(&lead.id).unwrap().is_none());
    }
}
