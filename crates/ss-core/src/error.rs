//! Error types for the story engine.

use thiserror::Error;

use crate::node::{NodeId, Outcome};
use crate::validate::ValidationIssue;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while building or playing a story.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A node id does not exist in the story graph.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// The story content failed construction-time validation.
    #[error("invalid story content ({} issue(s)):\n{}", .0.len(), render_issues(.0))]
    InvalidContent(Vec<ValidationIssue>),

    /// The selection does not match any currently available choice.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// A flag was referenced that the schema does not declare.
    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    /// A flag was used as a different kind than the schema declares.
    #[error("flag '{key}' is not a {expected}")]
    FlagKindMismatch {
        /// Flag key.
        key: String,
        /// The kind the caller expected.
        expected: &'static str,
    },

    /// A variant flag was given a value outside its declared list.
    #[error("flag '{key}' has no variant '{value}'")]
    UnknownVariant {
        /// Flag key.
        key: String,
        /// The rejected value.
        value: String,
    },

    /// The session already reached a terminal node.
    #[error("the story is over ({0})")]
    SessionOver(Outcome),
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}
