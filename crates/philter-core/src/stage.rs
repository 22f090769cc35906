//! Host-facing stage contract

use std::fmt;

use async_trait::async_trait;

use crate::item::WorkItem;

/// Output channels a stage routes items to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// Receives the redacted copy of a successfully processed item.
    Redacted,
    /// Receives the unmodified input of a successfully processed item.
    Original,
    /// Receives the unmodified input when processing fails.
    Failure,
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relationship::Redacted => write!(f, "redacted"),
            Relationship::Original => write!(f, "original"),
            Relationship::Failure => write!(f, "failure"),
        }
    }
}

/// Terminal result of processing one work item.
///
/// Every processed item ends in exactly one outcome: a redacted copy paired
/// with its untouched original, or the original alone on the failure channel.
#[derive(Debug)]
pub enum Outcome {
    Redacted {
        redacted: WorkItem,
        original: WorkItem,
    },
    Failure {
        original: WorkItem,
    },
}

impl Outcome {
    /// The channel transfers this outcome produces, in routing order.
    pub fn transfers(&self) -> Vec<(Relationship, &WorkItem)> {
        match self {
            Outcome::Redacted { redacted, original } => vec![
                (Relationship::Redacted, redacted),
                (Relationship::Original, original),
            ],
            Outcome::Failure { original } => vec![(Relationship::Failure, original)],
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure { .. })
    }
}

/// A pipeline stage the host can drive.
///
/// The host owns scheduling and queueing: it pulls items from its queue and
/// invokes `process`, possibly concurrently from several tasks. A stage must
/// therefore be safe to share by reference across tasks.
#[async_trait]
pub trait PipelineStage: Send + Sync {
    /// Process one work item to its terminal outcome.
    async fn process(&self, item: WorkItem) -> Outcome;

    fn name(&self) -> &'static str;
}
