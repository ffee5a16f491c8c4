//! Scribe persistence infrastructure adapters.
//!
//! Implements the [`pipeline::ContentStore`] trait twice:
//!
//! - [`InMemoryContentStore`] for tests and one-shot runs.
//! - [`FileContentStore`] persisting topics and generated content as one JSON
//!   document, so an outline generated by one CLI invocation can be turned
//!   into an article by the next.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Locking, serialisation, and file handling live here.
//! The [`pipeline`] crate sees only [`pipeline::ContentStore`].

pub mod file;
pub mod memory;
pub mod state;

pub use file::FileContentStore;
pub use memory::InMemoryContentStore;
pub use state::StoreState;
