//! Shared value types for the Scribe pipeline domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values with invariants (e.g. confidence scores are in
//! `[0.0, 1.0]`) and participate in domain computations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::InvalidIdentifier;

// ---------------------------------------------------------------------------
// Score types
// ---------------------------------------------------------------------------

/// A heuristic quality estimate in the range `[0.0, 1.0]`.
///
/// Computed additively from structural and coverage signals by
/// [`crate::scoring`]; it is not a model-reported probability.
///
/// Deserialisation goes through [`Confidence::new`], so a stored record with
/// an out-of-range score is rejected rather than silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Creates a [`Confidence`], returning `None` if `value` is outside the
    /// valid range `[0.0, 1.0]`.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Creates a [`Confidence`] by clamping `value` into `[0.0, 1.0]`.
    ///
    /// NaN maps to `0.0`.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Returns the score as an `f64` in `[0.0, 1.0]`.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Confidence {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("confidence {value} is outside [0.0, 1.0]"))
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Request options
// ---------------------------------------------------------------------------

/// Editorial format requested for an outline or article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostStyle {
    /// Conventional article: introduction, themed sections, conclusion.
    #[default]
    Standard,
    /// Fewer topics covered with more analysis and evidence each.
    DeepDive,
    /// Numbered, scannable items.
    Listicle,
    /// Step-by-step practical guide.
    HowTo,
}

impl PostStyle {
    /// Returns the kebab-case name used on the wire and in prompts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::DeepDive => "deep-dive",
            Self::Listicle => "listicle",
            Self::HowTo => "how-to",
        }
    }
}

impl std::fmt::Display for PostStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostStyle {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "deep-dive" => Ok(Self::DeepDive),
            "listicle" => Ok(Self::Listicle),
            "how-to" => Ok(Self::HowTo),
            _ => Err(InvalidIdentifier {
                kind: "PostStyle",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------

/// Target size of the generated content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostLength {
    /// Two to three body sections; 300–500 words per section.
    Short,
    /// Three to five body sections; 600–800 words per section.
    #[default]
    Medium,
    /// Five to seven body sections; 1000–1200 words per section.
    Long,
}

impl PostLength {
    /// Inclusive range of body sections an outline of this length asks for.
    pub fn body_sections(self) -> (usize, usize) {
        match self {
            Self::Short => (2, 3),
            Self::Medium => (3, 5),
            Self::Long => (5, 7),
        }
    }

    /// Inclusive word-count guideline for a single article section.
    pub fn section_words(self) -> (usize, usize) {
        match self {
            Self::Short => (300, 500),
            Self::Medium => (600, 800),
            Self::Long => (1000, 1200),
        }
    }

    /// Returns the kebab-case name used on the wire and in prompts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl std::fmt::Display for PostLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostLength {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(InvalidIdentifier {
                kind: "PostLength",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------

/// Voice the article prose is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    /// Measured and precise; suits business readers.
    #[default]
    Professional,
    /// Direct address to the reader, as in a talk.
    Conversational,
    /// Assumes domain knowledge and uses exact terminology.
    Technical,
    /// Relaxed and informal.
    Casual,
}

impl Tone {
    /// Returns the kebab-case name used on the wire and in prompts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Conversational => "conversational",
            Self::Technical => "technical",
            Self::Casual => "casual",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tone {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "professional" => Ok(Self::Professional),
            "conversational" => Ok(Self::Conversational),
            "technical" => Ok(Self::Technical),
            "casual" => Ok(Self::Casual),
            _ => Err(InvalidIdentifier {
                kind: "Tone",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
