//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging, for example,
//! a [`TopicId`] with an [`AngleId`] even though both are strings under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// or only whitespace.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::errors::InvalidIdentifier;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(crate::errors::InvalidIdentifier {
                    kind: stringify!($name),
                    value: s.to_string(),
                })
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: assigned by the upstream topic workflow
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies an approved topic.
    ///
    /// Topics are created and approved outside this pipeline; the identifier is
    /// whatever key the store uses for them.
    TopicId
}

string_id! {
    /// Identifies a content-angle belonging to a topic.
    AngleId
}

string_id! {
    /// Name of the text-generation model that produced a piece of content
    /// (e.g. `"llama3.1:8b"`).
    ModelName
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (generated when content is persisted)
// ---------------------------------------------------------------------------

/// Identifies a persisted content record: either a stored outline or a
/// generated blog post.
///
/// Generated fresh by the store for every record; the Article Writer receives
/// an outline's [`ContentId`] as its only input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(Uuid);

impl ContentId {
    /// Generates a new random content identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ContentId {
    type Err = crate::errors::InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| crate::errors::InvalidIdentifier {
                kind: "ContentId",
                value: s.to_string(),
            })
    }
}
