use core::str::FromStr;

use shopventory_core::id::validate_segment;

use super::StoreError;

/// Path to a collection: an odd number of segments (`users/u1/lists`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath {
    segments: Vec<String>,
}

/// Path to a document: an even, non-zero number of segments (`users/u1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    segments: Vec<String>,
}

fn checked(segment: impl AsRef<str>) -> Result<String, StoreError> {
    let segment = segment.as_ref();
    validate_segment("path segment", segment).map_err(|e| StoreError::InvalidPath(e.to_string()))?;
    Ok(segment.to_string())
}

impl CollectionPath {
    /// A top-level collection.
    pub fn root(name: impl AsRef<str>) -> Result<Self, StoreError> {
        Ok(Self {
            segments: vec![checked(name)?],
        })
    }

    /// Address a document inside this collection.
    pub fn doc(&self, id: impl AsRef<str>) -> Result<DocumentPath, StoreError> {
        let mut segments = self.segments.clone();
        segments.push(checked(id)?);
        Ok(DocumentPath { segments })
    }

    /// Parent document, if this is a sub-collection.
    pub fn parent(&self) -> Option<DocumentPath> {
        if self.segments.len() < 3 {
            return None;
        }
        Some(DocumentPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl DocumentPath {
    /// Address a sub-collection of this document.
    pub fn collection(&self, name: impl AsRef<str>) -> Result<CollectionPath, StoreError> {
        let mut segments = self.segments.clone();
        segments.push(checked(name)?);
        Ok(CollectionPath { segments })
    }

    /// Collection holding this document.
    pub fn parent(&self) -> CollectionPath {
        CollectionPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        }
    }

    /// Last segment: the document id.
    pub fn id(&self) -> &str {
        // Non-empty by construction.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

fn split(raw: &str) -> Result<Vec<String>, StoreError> {
    raw.split('/').map(checked).collect()
}

impl FromStr for CollectionPath {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = split(s)?;
        if segments.len() % 2 == 0 {
            return Err(StoreError::InvalidPath(format!(
                "'{s}' has an even number of segments; collections need an odd number"
            )));
        }
        Ok(Self { segments })
    }
}

impl FromStr for DocumentPath {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = split(s)?;
        if segments.len() % 2 != 0 {
            return Err(StoreError::InvalidPath(format!(
                "'{s}' has an odd number of segments; documents need an even number"
            )));
        }
        Ok(Self { segments })
    }
}

impl core::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl core::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
