//! Top-level error types for the Scribe generation pipeline.
//!
//! [`GenerationError`] covers the conditions that make a generation request
//! fail outright. Failures of the text-generation model are deliberately
//! absent: they are absorbed by deterministic fallback content inside the
//! generators and never reach the caller. Port-level errors
//! ([`crate::TextGenerationError`], [`crate::StoreError`]) are defined next to
//! their traits in [`crate::ports`].

use thiserror::Error;

use crate::{ContentId, StoreError, TopicId};

// ---------------------------------------------------------------------------
// Pipeline-level errors
// ---------------------------------------------------------------------------

/// Errors that abort a generation request.
///
/// Every variant is a precondition failure or a persistence failure. None of
/// them are retried by the pipeline; they are propagated to the caller with a
/// descriptive message.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The requested topic does not exist in the store.
    ///
    /// Produced by: Outline Generator. This is the only fatal path of outline
    /// generation.
    #[error("Topic not found: {topic_id}")]
    TopicNotFound {
        /// The identifier that could not be resolved.
        topic_id: TopicId,
    },

    /// No outline record exists for the requested identifier.
    ///
    /// Produced by: Article Writer.
    #[error("Outline not found: {outline_id}")]
    OutlineNotFound {
        /// The identifier that could not be resolved.
        outline_id: ContentId,
    },

    /// The outline record exists but carries no outline JSON.
    ///
    /// Produced by: Article Writer when the stored JSON is null or blank.
    #[error("Outline {outline_id} has no stored outline content")]
    OutlineEmpty {
        /// The record with the missing payload.
        outline_id: ContentId,
    },

    /// The stored outline JSON could not be read back into an outline.
    ///
    /// Produced by: Article Writer. Stored outlines are written by this
    /// pipeline, so a parse failure indicates corruption rather than model
    /// noise and is not papered over with fallback content.
    #[error("Outline {outline_id} is malformed: {reason}")]
    OutlineMalformed {
        /// The record whose payload failed to parse.
        outline_id: ContentId,
        /// Parser message describing the failure.
        reason: String,
    },

    /// Serialising generated content for persistence failed.
    #[error("Failed to serialise generated content: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The content store failed while resolving inputs or persisting results.
    #[error("Content store error: {0}")]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// A string could not be parsed into a domain identifier or option value.
///
/// Returned by the `FromStr` implementations of identifiers and request
/// options so the CLI can report bad arguments uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}: '{value}'")]
pub struct InvalidIdentifier {
    /// Name of the type that rejected the value.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}
