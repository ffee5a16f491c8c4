//! Scribe text-generation infrastructure adapter.
//!
//! Implements the [`pipeline::TextGenerator`] trait for a locally hosted
//! Ollama server. Additional providers are added as new modules in this crate
//! without any changes to the `pipeline` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** All HTTP transport, request formatting, response
//! parsing, and readiness tracking live here. The [`pipeline`] crate sees only
//! [`pipeline::TextGenerator`].
//!
//! Requests are sent one at a time by the pipeline; this crate adds no
//! queueing of its own.

pub mod ollama;

pub use ollama::{OllamaClient, OllamaConfig, OllamaConfigError, DEFAULT_BASE_URL};
