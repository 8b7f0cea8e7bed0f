//! In-memory record store

use std::cell::RefCell;

use spraycoat_domain::repository::{
    CollectionPath, Document, DocumentPath, RecordStore, StoredDocument,
};
use spraycoat_types::Result;
use tracing::debug;

use crate::records::Records;

/// Record store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of documents across all collections
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn create(&self, collection: &CollectionPath, document: Document) -> Result<String> {
        let id = self.records.borrow_mut().create(collection, document)?;
        debug!(%collection, %id, "created record");
        Ok(id)
    }

    fn get(&self, path: &DocumentPath) -> Result<Document> {
        self.records.borrow().get(path)
    }

    fn list(&self, collection: &CollectionPath) -> Result<Vec<StoredDocument>> {
        Ok(self.records.borrow().list(collection))
    }

    fn update(&self, path: &DocumentPath, partial: Document) -> Result<()> {
        self.records.borrow_mut().update(path, partial)?;
        debug!(%path, "updated record");
        Ok(())
    }

    fn delete(&self, path: &DocumentPath) -> Result<()> {
        let removed = self.records.borrow_mut().delete(path);
        debug!(%path, removed, "deleted record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spraycoat_types::{Error, StoreError};

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_create_get_round_trip() {
        let store = MemoryStore::new();
        let leads = CollectionPath::root("leads").unwrap();
        let id = store
            .create(&leads, doc(json!({"firstName": "Dana", "lastName": "Whitlock"})))
            .unwrap();

        let fetched = store.get(&leads.doc(&id).unwrap()).unwrap();
        assert_eq!(fetched["firstName"], "Dana");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = MemoryStore::new();
        let path = DocumentPath::parse("leads/missing").unwrap();
        assert!(matches!(
            store.get(&path),
            Err(Error::Store(StoreError::NotFound(_)))
        ));
    }

    #[test]
    fn test_update_merges_top_level_fields() {
        let store = MemoryStore::new();
        let leads = CollectionPath::root("leads").unwrap();
        let id = store
            .create(&leads, doc(json!({"firstName": "Dana", "phone": "0400 000 000"})))
            .unwrap();
        let path = leads.doc(&id).unwrap();

        store.update(&path, doc(json!({"phone": "0400 111 111"}))).unwrap();
        let fetched = store.get(&path).unwrap();
        assert_eq!(fetched["firstName"], "Dana");
        assert_eq!(fetched["phone"], "0400 111 111");
    }

    #[test]
    fn test_update_missing_fails() {
        let store = MemoryStore::new();
        let path = DocumentPath::parse("leads/missing").unwrap();
        assert!(store.update(&path, Document::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let leads = CollectionPath::root("leads").unwrap();
        let id = store.create(&leads, Document::new()).unwrap();
        let path = leads.doc(&id).unwrap();

        store.delete(&path).unwrap();
        store.delete(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_by_field() {
        let store = MemoryStore::new();
        let sites = CollectionPath::parse("leads/l1/jobSites").unwrap();
        store.create(&sites, doc(json!({"city": "Geelong"}))).unwrap();
        store.create(&sites, doc(json!({"city": "Ballarat"}))).unwrap();
        store.create(&sites, doc(json!({"city": "Geelong"}))).unwrap();

        let found = store
            .find_by_field(&sites, "city", &json!("Geelong"))
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(store
            .find_by_field(&sites, "city", &json!("Bendigo"))
            .unwrap()
            .is_empty());
    }
}
