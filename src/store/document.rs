//! Encrypted document model
//!
//! The store only reads `id` and `indexed`. Every other field of the
//! document (ciphertext, metadata, sequence numbers) is carried as an opaque
//! JSON payload and handed back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::index::IndexId;

/// A single blinded attribute of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    /// At most one live document may hold this `name=value` in its group.
    /// Kept as sent, so an explicit `false` survives a round trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    /// Unrecognized fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attribute {
    /// Non-unique attribute
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unique: None,
            extra: Map::new(),
        }
    }

    /// Unique attribute
    pub fn unique(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            unique: Some(true),
            ..Self::new(name, value)
        }
    }

    /// Whether the attribute claims its `name=value` exclusively
    pub fn is_unique(&self) -> bool {
        self.unique.unwrap_or(false)
    }
}

/// Which wire field carried an entry's index identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierField {
    #[default]
    HmacId,
    IndexIdentifier,
}

/// The attributes a document exposes under one index identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireIndexEntry", into = "WireIndexEntry")]
pub struct IndexEntry {
    pub index_id: IndexId,
    pub attributes: Vec<Attribute>,
    /// Unrecognized fields (sequence numbers, HMAC descriptors), preserved verbatim
    pub extra: Map<String, Value>,
    /// Written back under the same name it arrived with
    pub identifier_field: IdentifierField,
}

impl IndexEntry {
    pub fn new(index_id: impl Into<IndexId>, attributes: Vec<Attribute>) -> Self {
        Self {
            index_id: index_id.into(),
            attributes,
            extra: Map::new(),
            identifier_field: IdentifierField::default(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct WireIndexEntry {
    #[serde(rename = "hmacId", default, skip_serializing_if = "Option::is_none")]
    hmac_id: Option<IndexId>,
    #[serde(rename = "indexIdentifier", default, skip_serializing_if = "Option::is_none")]
    index_identifier: Option<IndexId>,
    #[serde(default)]
    attributes: Vec<Attribute>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<WireIndexEntry> for IndexEntry {
    type Error = String;

    fn try_from(wire: WireIndexEntry) -> Result<Self, Self::Error> {
        let (index_id, identifier_field) = match (wire.hmac_id, wire.index_identifier) {
            (Some(id), None) => (id, IdentifierField::HmacId),
            (None, Some(id)) => (id, IdentifierField::IndexIdentifier),
            (Some(_), Some(_)) => {
                return Err("index entry has both hmacId and indexIdentifier".to_string())
            }
            (None, None) => return Err("index entry is missing hmacId".to_string()),
        };

        Ok(Self {
            index_id,
            attributes: wire.attributes,
            extra: wire.extra,
            identifier_field,
        })
    }
}

impl From<IndexEntry> for WireIndexEntry {
    fn from(entry: IndexEntry) -> Self {
        let (hmac_id, index_identifier) = match entry.identifier_field {
            IdentifierField::HmacId => (Some(entry.index_id), None),
            IdentifierField::IndexIdentifier => (None, Some(entry.index_id)),
        };

        Self {
            hmac_id,
            index_identifier,
            attributes: entry.attributes,
            extra: entry.extra,
        }
    }
}

/// An encrypted document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub indexed: Vec<IndexEntry>,
    /// Everything else, preserved verbatim
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Document {
    /// Create a document with no index entries and an empty payload
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            indexed: Vec::new(),
            payload: Map::new(),
        }
    }

    /// Builder: add an index entry
    pub fn with_entry(mut self, entry: IndexEntry) -> Self {
        self.indexed.push(entry);
        self
    }

    /// Builder: set an opaque payload field
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.payload.insert(name.into(), value);
        self
    }

    /// Iterate every (index id, attribute) pair the document contributes
    pub fn attributes(&self) -> impl Iterator<Item = (&IndexId, &Attribute)> {
        self.indexed.iter().flat_map(|entry| {
            entry
                .attributes
                .iter()
                .map(move |attribute| (&entry.index_id, attribute))
        })
    }
}
