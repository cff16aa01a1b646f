//! Core types and document records

use crate::error::{LookError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Full path of a scene object, e.g. `|asset_GRP|body_GEO|body_GEOShape`
pub type NodePath = String;

/// Opaque database document id: 24 lowercase hexadecimal characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    /// Validate and wrap a raw id string; uppercase hex is normalized
    /// to lowercase so equal ids always compare equal
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.len() != 24 || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LookError::InvalidObjectId(raw));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Get the raw hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ObjectId {
    type Err = LookError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Asset document as projected by the lookups in this crate:
/// the display name plus the ids needed for queue round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDocument {
    pub id: ObjectId,
    pub name: String,
    /// Project document the asset belongs to
    pub parent: ObjectId,
}

/// A look subset published under an asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetDocument {
    pub id: ObjectId,
    pub name: String,
    /// Owning asset document
    pub parent: ObjectId,
}

/// A published version under a look subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDocument {
    pub id: ObjectId,
    pub name: String,
    /// Owning subset document
    pub parent: ObjectId,
}

/// Plain-string form of a document, as stored in queue files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub parent: String,
}

impl DocumentData {
    pub(crate) fn from_asset(doc: &AssetDocument) -> Self {
        Self {
            id: doc.id.to_string(),
            name: doc.name.clone(),
            parent: doc.parent.to_string(),
        }
    }

    pub(crate) fn from_version(doc: &VersionDocument) -> Self {
        Self {
            id: doc.id.to_string(),
            name: doc.name.clone(),
            parent: doc.parent.to_string(),
        }
    }

    pub(crate) fn to_asset(&self) -> Result<AssetDocument> {
        Ok(AssetDocument {
            id: self.id.parse()?,
            name: self.name.clone(),
            parent: self.parent.parse()?,
        })
    }

    pub(crate) fn to_version(&self) -> Result<VersionDocument> {
        Ok(VersionDocument {
            id: self.id.parse()?,
            name: self.name.clone(),
            parent: self.parent.parse()?,
        })
    }
}
