//! Port traits: the external collaborators the pipeline depends on.
//!
//! The pipeline defines *what* it needs here; infrastructure crates supply
//! the *how*:
//!
//! | Port | Adapter crate |
//! |------|---------------|
//! | [`TextGenerator`] | `llm` (`OllamaClient`) |
//! | [`ContentStore`] | `store` (`InMemoryContentStore`, `FileContentStore`) |
//!
//! Both traits are dyn-compatible via `async_trait` so generators can hold
//! them as `Arc<dyn ...>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    AngleId, Confidence, ContentId, ModelName, PostLength, PostStyle, Timestamp, Tone, Topic,
    TopicId,
};

// ---------------------------------------------------------------------------
// Text generation
// ---------------------------------------------------------------------------

/// Failure modes of a [`TextGenerator`].
///
/// The generators treat every variant the same way (fall back to
/// deterministic content); the distinction exists for logging.
#[derive(Debug, Error)]
pub enum TextGenerationError {
    /// `generate_content` was called before a successful `initialize`.
    #[error("Text generator is not initialised")]
    NotInitialized,

    /// The model server cannot be reached or does not serve the model.
    #[error("Model unavailable: {reason}")]
    Unavailable {
        /// Description of what was checked and failed.
        reason: String,
    },

    /// A generation request failed in transport or was rejected.
    #[error("Generation request failed: {reason}")]
    Request {
        /// Transport or status error description.
        reason: String,
    },

    /// The server answered but the body could not be interpreted.
    #[error("Invalid response from model server: {reason}")]
    InvalidResponse {
        /// Decoder error description.
        reason: String,
    },
}

/// A text-generation model client.
///
/// Each call to [`TextGenerator::generate_content`] is a potentially slow
/// network or process round-trip. Implementations may serialise requests
/// internally.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Prepares the client for use, verifying that the model is reachable.
    async fn initialize(&self) -> Result<(), TextGenerationError>;

    /// Sends `prompt` to the model and returns its raw output.
    async fn generate_content(&self, prompt: &str) -> Result<String, TextGenerationError>;

    /// Whether [`TextGenerator::initialize`] has completed successfully.
    fn is_initialized(&self) -> bool;

    /// Identifier of the model recorded in generation metadata.
    fn model_name(&self) -> ModelName;
}

/// Sends `prompt` to `client`, initialising it first if needed.
pub(crate) async fn generate_with(
    client: &dyn TextGenerator,
    prompt: &str,
) -> Result<String, TextGenerationError> {
    if !client.is_initialized() {
        client.initialize().await?;
    }
    client.generate_content(prompt).await
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Failure modes of a [`ContentStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failure not covered by the other variants.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// What a content record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    /// Carries outline JSON that the Article Writer can read back.
    Outline,
    /// Carries a finished article document.
    BlogPost,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Outline => "outline",
            Self::BlogPost => "blog-post",
        })
    }
}

/// A previously generated outline as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredOutline {
    pub id: ContentId,
    /// Serialised outline; `None` when the record carries no outline payload.
    pub outline_json: Option<String>,
}

/// A content record to be created by [`ContentStore::create_content`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContent {
    pub kind: ContentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
    pub title: String,
    /// Outline JSON for [`ContentKind::Outline`] records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_json: Option<String>,
    /// Article document text for [`ContentKind::BlogPost`] records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    pub model: ModelName,
    pub confidence: Confidence,
    pub processing_ms: u64,
    pub generated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_outline_id: Option<ContentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<PostStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<PostLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

/// A persisted content record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: ContentId,
    pub created_at: Timestamp,
    #[serde(flatten)]
    pub content: NewContent,
}

/// Topic and content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Resolves a topic with its content-angles.
    ///
    /// When `angle_ids` is `Some`, only angles whose id is listed are
    /// returned. Returns `Ok(None)` when the topic does not exist.
    async fn find_topic(
        &self,
        topic_id: &TopicId,
        angle_ids: Option<&[AngleId]>,
    ) -> Result<Option<Topic>, StoreError>;

    /// Resolves a stored outline record. Returns `Ok(None)` when no outline
    /// record has this id.
    async fn find_outline(
        &self,
        outline_id: ContentId,
    ) -> Result<Option<StoredOutline>, StoreError>;

    /// Persists a new content record and returns its freshly assigned id.
    async fn create_content(&self, content: NewContent) -> Result<ContentId, StoreError>;
}
