//! Document map shared by the store implementations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spraycoat_domain::repository::{CollectionPath, Document, DocumentPath, StoredDocument};
use spraycoat_types::{Result, StoreError};
use uuid::Uuid;

/// Documents keyed by their full path (`leads/abc/jobSites/xyz`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Records {
    docs: BTreeMap<String, Document>,
}

impl Records {
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn create(&mut self, collection: &CollectionPath, document: Document) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        let path = collection.doc(&id)?;
        self.docs.insert(path.to_string(), document);
        Ok(id)
    }

    pub fn get(&self, path: &DocumentPath) -> Result<Document> {
        self.docs
            .get(&path.to_string())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()).into())
    }

    pub fn list(&self, collection: &CollectionPath) -> Vec<StoredDocument> {
        let prefix = format!("{}/", collection);
        self.docs
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, data)| {
                let id = &key[prefix.len()..];
                // Skip documents of nested collections
                if id.contains('/') {
                    return None;
                }
                Some(StoredDocument {
                    id: id.to_string(),
                    data: data.clone(),
                })
            })
            .collect()
    }

    pub fn update(&mut self, path: &DocumentPath, partial: Document) -> Result<()> {
        let doc = self
            .docs
            .get_mut(&path.to_string())
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        for (key, value) in partial {
            doc.insert(key, value);
        }
        Ok(())
    }

    /// Number of documents at `path` or nested below it
    pub fn count_under(&self, path: &DocumentPath) -> usize {
        self.docs.keys().filter(|key| is_under(path, key)).count()
    }

    /// Remove a document and its nested collections; returns how many were removed
    pub fn delete(&mut self, path: &DocumentPath) -> usize {
        let before = self.docs.len();
        self.docs.retain(|key, _| !is_under(path, key));
        before - self.docs.len()
    }
}

fn is_under(path: &DocumentPath, key: &str) -> bool {
    DocumentPath::parse(key)
        .map(|doc_path| path.contains(&doc_path))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_list_skips_nested_and_sibling_collections() {
        let mut records = Records::default();
        let leads = CollectionPath::parse("leads").unwrap();
        let lead_id = records.create(&leads, doc(json!({"firstName": "Dana"}))).unwrap();
        let sites = leads.doc(&lead_id).unwrap().collection("jobSites").unwrap();
        records.create(&sites, doc(json!({"city": "Geelong"}))).unwrap();
        let leads_archive = CollectionPath::parse("leadsArchive").unwrap();
        records.create(&leads_archive, doc(json!({}))).unwrap();

        let listed = records.list(&leads);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, lead_id);
        assert_eq!(records.list(&sites).len(), 1);
    }

    #[test]
    fn test_delete_cascades() {
        let mut records = Records::default();
        let leads = CollectionPath::parse("leads").unwrap();
        let lead_id = records.create(&leads, doc(json!({}))).unwrap();
        let lead = leads.doc(&lead_id).unwrap();
        let sites = lead.collection("jobSites").unwrap();
        records.create(&sites, doc(json!({}))).unwrap();
        records.create(&sites, doc(json!({}))).unwrap();

        assert_eq!(records.count_under(&lead), 3);
        assert_eq!(records.delete(&lead), 3);
        assert_eq!(records.len(), 0);
        assert_eq!(records.count_under(&lead), 0);
        assert_eq!(records.delete(&lead), 0);
    }
}
