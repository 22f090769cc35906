use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Attribute holding the caller-supplied correlation context for a document.
pub const ATTRIBUTE_CONTEXT: &str = "philter.context";

/// Attribute holding the document ID, which the redaction service may assign.
pub const ATTRIBUTE_DOCUMENT_ID: &str = "philter.document.id";

/// One unit of data flowing through a pipeline stage.
///
/// A work item carries an opaque byte payload plus a string attribute map.
/// Items are never mutated in place by a stage: success produces a derived
/// child item next to the untouched original, and failure only flips the
/// `penalized` scheduling hint on the original.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    /// Set on derived items; links a redacted copy back to its input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub payload: Vec<u8>,
    pub attributes: HashMap<String, String>,
    /// Host-level hint to delay the next scheduling of this item.
    #[serde(default)]
    pub penalized: bool,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl WorkItem {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            parent_id: None,
            payload: payload.into(),
            attributes: HashMap::new(),
            penalized: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn put_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Create a child item derived from this one: fresh id, cloned
    /// attributes, empty payload, `parent_id` pointing back here.
    pub fn derive_child(&self) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            parent_id: Some(self.id.clone()),
            payload: Vec::new(),
            attributes: self.attributes.clone(),
            penalized: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Mark this item so the host delays its next scheduling attempt.
    pub fn penalize(&mut self) {
        self.penalized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_defaults() {
        let item = WorkItem::new("hello");

        assert_eq!(item.payload, b"hello");
        assert!(item.parent_id.is_none());
        assert!(item.attributes.is_empty());
        assert!(!item.penalized);
    }

    #[test]
    fn test_attribute_round_trip() {
        let item = WorkItem::new("x")
            .with_attribute(ATTRIBUTE_CONTEXT, "ctx-1")
            .with_attribute(ATTRIBUTE_DOCUMENT_ID, "doc-1");

        assert_eq!(item.attribute(ATTRIBUTE_CONTEXT), Some("ctx-1"));
        assert_eq!(item.attribute(ATTRIBUTE_DOCUMENT_ID), Some("doc-1"));
        assert_eq!(item.attribute("missing"), None);
    }

    #[test]
    fn test_derive_child_links_to_parent() {
        let original = WorkItem::new("payload").with_attribute(ATTRIBUTE_CONTEXT, "ctx-1");
        let child = original.derive_child();

        assert_ne!(child.id, original.id);
        assert_eq!(child.parent_id.as_deref(), Some(original.id.as_str()));
        assert!(child.payload.is_empty());
        assert_eq!(child.attribute(ATTRIBUTE_CONTEXT), Some("ctx-1"));
    }

    #[test]
    fn test_derive_child_does_not_share_attributes() {
        let original = WorkItem::new("payload").with_attribute("k", "v");
        let mut child = original.derive_child();
        child.put_attribute("k", "changed");

        assert_eq!(original.attribute("k"), Some("v"));
    }

    #[test]
    fn test_penalize() {
        let mut item = WorkItem::new("x");
        item.penalize();
        assert!(item.penalized);
    }
}
