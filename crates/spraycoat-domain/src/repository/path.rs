//! Collection and document paths for the record store.
//!
//! Segments alternate collection/document: `leads` is a collection,
//! `leads/abc` a document, `leads/abc/jobSites` a nested collection.

use spraycoat_types::StoreError;

fn parse_segments(path: &str) -> Result<Vec<String>, StoreError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    let segments: Vec<String> = trimmed.split('/').map(str::to_string).collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

fn check_segment(segment: &str) -> Result<(), StoreError> {
    if segment.trim().is_empty() || segment.contains('/') {
        return Err(StoreError::InvalidPath(segment.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    segments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// Top-level collection
    pub fn root(name: &str) -> Result<Self, StoreError> {
        check_segment(name)?;
        Ok(Self {
            segments: vec![name.to_string()],
        })
    }

    pub fn parse(path: &str) -> Result<Self, StoreError> {
        let segments = parse_segments(path)?;
        if segments.len() % 2 == 0 {
            return Err(StoreError::InvalidPath(path.to_string()));
        }
        Ok(Self { segments })
    }

    /// Document with `id` inside this collection
    pub fn doc(&self, id: &str) -> Result<DocumentPath, StoreError> {
        check_segment(id)?;
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        Ok(DocumentPath { segments })
    }

    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Document owning this collection, `None` for top-level collections
    pub fn parent(&self) -> Option<DocumentPath> {
        if self.segments.len() < 3 {
            return None;
        }
        Some(DocumentPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }
}

impl DocumentPath {
    pub fn parse(path: &str) -> Result<Self, StoreError> {
        let segments = parse_segments(path)?;
        if segments.len() % 2 != 0 {
            return Err(StoreError::InvalidPath(path.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn parent(&self) -> CollectionPath {
        CollectionPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        }
    }

    /// Nested collection under this document
    pub fn collection(&self, name: &str) -> Result<CollectionPath, StoreError> {
        check_segment(name)?;
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(CollectionPath { segments })
    }

    /// True if `other` is this document or lives anywhere beneath it
    pub fn contains(&self, other: &DocumentPath) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
