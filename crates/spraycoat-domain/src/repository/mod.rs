//! Repository trait definitions for data persistence

mod path;

pub use path::{CollectionPath, DocumentPath};

use serde::Serialize;
use serde_json::{Map, Value};
use spraycoat_types::{Result, StoreError};

use crate::model::{JobSite, JobSiteListing, JobSitePayload, Lead, LeadUpdate, NewLead};

/// A stored document body: always a JSON object
pub type Document = Map<String, Value>;

/// Document together with its id within a collection
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
}

impl StoredDocument {
    /// Document body with the id folded in as an `id` field
    pub fn into_value_with_id(self) -> Value {
        let mut data = self.data;
        data.insert("id".to_string(), Value::String(self.id));
        Value::Object(data)
    }
}

/// Serialize a record into a document body. Non-object values are rejected.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "expected a JSON object, got {}",
            other
        ))
        .into()),
    }
}

/// Generic document store with nested collections
pub trait RecordStore {
    /// Persist a new document and return its generated id
    fn create(&self, collection: &CollectionPath, document: Document) -> Result<String>;

    /// Fetch a whole document; `StoreError::NotFound` if absent
    fn get(&self, path: &DocumentPath) -> Result<Document>;

    /// All documents directly inside a collection
    fn list(&self, collection: &CollectionPath) -> Result<Vec<StoredDocument>>;

    /// Merge top-level fields into an existing document
    fn update(&self, path: &DocumentPath, partial: Document) -> Result<()>;

    /// Remove a document and everything nested under it. Missing documents are ignored.
    fn delete(&self, path: &DocumentPath) -> Result<()>;

    /// Documents in a collection whose `field` equals `value`
    fn find_by_field(
        &self,
        collection: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredDocument>> {
        Ok(self
            .list(collection)?
            .into_iter()
            .filter(|doc| doc.data.get(field) == Some(value))
            .collect())
    }
}

/// Repository for leads
pub trait LeadRepository {
    /// Validate and save a new lead
    fn create(&self, lead: NewLead) -> Result<Lead>;

    fn find_by_id(&self, id: &str) -> Result<Option<Lead>>;

    fn find_all(&self) -> Result<Vec<Lead>>;

    /// Apply a partial update and return the stored result
    fn update(&self, id: &str, update: LeadUpdate) -> Result<Lead>;

    /// Delete a lead together with its job sites
    fn delete(&self, id: &str) -> Result<()>;

    /// Leads whose full name contains `term`, ignoring case
    fn search(&self, term: &str) -> Result<Vec<Lead>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|lead| lead.matches(term))
            .collect())
    }
}

/// Repository for job sites nested under leads
pub trait JobSiteRepository {
    /// Save a submitted job site under `lead_id`
    fn create(&self, lead_id: &str, payload: &JobSitePayload) -> Result<String>;

    fn find_for_lead(&self, lead_id: &str) -> Result<Vec<JobSite>>;

    fn find_by_id(&self, lead_id: &str, id: &str) -> Result<Option<JobSite>>;

    fn delete(&self, lead_id: &str, id: &str) -> Result<()>;

    /// Every job site of every lead, joined with the lead's name
    fn list_all(&self) -> Result<Vec<JobSiteListing>>;
}
