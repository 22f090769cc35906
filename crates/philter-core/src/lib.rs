//! Core domain model for the Philter pipeline stage
//!
//! This crate contains:
//! - The work item model (payload + attributes flowing through a stage)
//! - Stage configuration and its validation rules
//! - Late-binding attribute expressions for per-item property values
//! - The host-facing `PipelineStage` trait and routing types

pub mod config;
pub mod error;
pub mod expression;
pub mod item;
pub mod stage;

pub use config::StageConfiguration;
pub use error::{ConfigError, Result};
pub use item::{WorkItem, ATTRIBUTE_CONTEXT, ATTRIBUTE_DOCUMENT_ID};
pub use stage::{Outcome, PipelineStage, Relationship};
