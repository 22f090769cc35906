//! Pipeline stage that redacts work item text through a remote Philter API
//!
//! The stage owns a shared HTTP client built from its configuration and
//! routes every processed item to exactly one terminal channel set:
//! `{redacted, original}` on success or `{failure}` on error.

pub mod stage;

pub use stage::RedactionStage;

pub use philter_client::{FilterResult, PhilterClient};
pub use philter_core::{
    Outcome, PipelineStage, Relationship, StageConfiguration, WorkItem, ATTRIBUTE_CONTEXT,
    ATTRIBUTE_DOCUMENT_ID,
};
