//! Core content-generation domain for Scribe.
//!
//! This crate turns an approved topic into a structured outline, and a stored
//! outline into a finished long-form article, by driving a text-generation
//! model through two stages. Each stage follows the same pattern: build a
//! prompt, call the model, parse the output or fall back to deterministic
//! content, score confidence. Validation is a separate, explicit quality gate.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed ([`TextGenerator`], [`ContentStore`]);
//! infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype domain identifiers (`TopicId`, `ContentId`, etc.) |
//! | [`types`] | Shared value types (`Confidence`, `PostStyle`, `Timestamp`, etc.) |
//! | [`content`] | Topics, outlines, and blog posts |
//! | [`ports`] | Text-generation and persistence traits |
//! | [`errors`] | Fatal generation errors |
//! | [`prompts`] | Prompt construction for both stages |
//! | [`scoring`] | Confidence heuristics, word count, reading time |
//! | [`validation`] | Outline and blog-post quality gates |
//! | [`outline`] | Outline Generator |
//! | [`article`] | Article Writer |
//! | [`workflow`] | Generate-then-persist orchestration |

pub mod article;
pub mod content;
pub mod errors;
pub mod identifiers;
pub mod outline;
pub mod ports;
pub mod prompts;
pub mod scoring;
pub mod types;
pub mod validation;
pub mod workflow;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use article::{fallback_prose, ArticleWriter, BlogPostRequest};
pub use content::{
    BlogOutline, BlogPost, BlogPostSection, ContentAngle, OutlineDraft, OutlineMetadata,
    OutlineSection, PostMetadata, SectionRole, Topic,
};
pub use errors::{GenerationError, InvalidIdentifier};
pub use identifiers::{AngleId, ContentId, ModelName, TopicId};
pub use outline::{
    extract_json_object, fallback_outline, parse_outline_response, FallbackReason,
    OutlineGenerator, OutlineOutcome, OutlineRequest,
};
pub use ports::{
    ContentKind, ContentRecord, ContentStore, NewContent, StoreError, StoredOutline,
    TextGenerationError, TextGenerator,
};
pub use scoring::{outline_confidence, post_confidence, reading_time_minutes, word_count};
pub use types::{Confidence, PostLength, PostStyle, Timestamp, Tone};
pub use validation::{validate_blog_post, validate_outline, ValidationIssue, ValidationReport};
pub use workflow::ContentWorkflow;
