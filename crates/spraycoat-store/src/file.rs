//! JSON-file backed record store

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use spraycoat_domain::repository::{
    CollectionPath, Document, DocumentPath, RecordStore, StoredDocument,
};
use spraycoat_types::{Result, StoreError};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::records::Records;

const RECORDS_FILE: &str = "records.json";

/// Persistent record store.
///
/// All documents are kept in memory and the whole file is replaced after
/// every mutation. A mutation whose write fails leaves both the file and
/// the in-memory records as they were.
#[derive(Debug)]
pub struct FileStore {
    store_path: PathBuf,
    records: RefCell<Records>,
}

impl FileStore {
    /// Create or load a store in `store_dir`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join(RECORDS_FILE);

        let records = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).map_err(|e| {
                StoreError::Io(format!("failed to read {}: {}", store_path.display(), e))
            })?
        } else {
            Records::default()
        };

        info!(path = %store_path.display(), "opened record store");
        Ok(Self {
            store_path,
            records: RefCell::new(records),
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Total number of documents across all collections
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write `records` to a temp file beside the store and rename it into place
    fn persist(&self, records: &Records) -> Result<()> {
        let dir = self
            .store_path
            .parent()
            .ok_or_else(|| StoreError::Io(format!("no parent for {}", self.store_path.display())))?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.store_path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Apply `change` to a copy of the records and keep it only once it is on disk
    fn commit<T>(&self, change: impl FnOnce(&mut Records) -> Result<T>) -> Result<T> {
        let mut next = self.records.borrow().clone();
        let out = change(&mut next)?;
        if let Err(e) = self.persist(&next) {
            warn!(path = %self.store_path.display(), "failed to write record store: {}", e);
            return Err(e);
        }
        *self.records.borrow_mut() = next;
        Ok(out)
    }
}

impl RecordStore for FileStore {
    fn create(&self, collection: &CollectionPath, document: Document) -> Result<String> {
        let id = self.commit(|records| records.create(collection, document))?;
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
        self.commit(|records| records.update(path, partial))?;
        debug!(%path, "updated record");
        Ok(())
    }

    fn delete(&self, path: &DocumentPath) -> Result<()> {
        if self.records.borrow().count_under(path) == 0 {
            debug!(%path, "nothing to delete");
            return Ok(());
        }
        let removed = self.commit(|records| Ok(records.delete(path)))?;
        debug!(%path, removed, "deleted record");
        Ok(())
    }
}
