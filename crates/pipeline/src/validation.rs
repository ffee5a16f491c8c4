//! Structural quality gates for outlines and blog posts.
//!
//! Validation never participates in generation. Callers run it on a finished
//! value to decide whether to use it downstream. Issues are reported
//! cumulatively; a report is valid iff it holds no issues.

use serde::ser::SerializeStruct;
use serde::Serialize;

use crate::{BlogOutline, BlogPost};

/// Minimum character length of the outline introduction and conclusion.
pub const MIN_OUTLINE_SECTION_CHARS: usize = 50;
/// Minimum word count of a publishable blog post.
pub const MIN_POST_WORDS: usize = 300;
/// Minimum number of sections in a publishable blog post.
pub const MIN_POST_SECTIONS: usize = 3;

/// A single structural problem found by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// The title is empty or whitespace.
    MissingTitle,
    /// Outline introduction content under [`MIN_OUTLINE_SECTION_CHARS`].
    IntroductionTooShort { chars: usize },
    /// Outline body list is empty.
    NoBodySections,
    /// Outline conclusion content under [`MIN_OUTLINE_SECTION_CHARS`].
    ConclusionTooShort { chars: usize },
    /// No post section carries any prose; the document is headings only.
    MissingContent,
    /// Post has no sections at all.
    NoSections,
    /// Post document under [`MIN_POST_WORDS`].
    TooFewWords { words: usize },
    /// Post has fewer than [`MIN_POST_SECTIONS`] sections.
    TooFewSections { sections: usize },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => f.write_str("Title is missing"),
            Self::IntroductionTooShort { chars } => write!(
                f,
                "Introduction is too short ({chars} characters, \
                 minimum {MIN_OUTLINE_SECTION_CHARS})"
            ),
            Self::NoBodySections => f.write_str("Outline has no body sections"),
            Self::ConclusionTooShort { chars } => write!(
                f,
                "Conclusion is too short ({chars} characters, minimum {MIN_OUTLINE_SECTION_CHARS})"
            ),
            Self::MissingContent => f.write_str("Content is missing"),
            Self::NoSections => f.write_str("Post has no sections"),
            Self::TooFewWords { words } => {
                write!(f, "Word count too low ({words} words, minimum {MIN_POST_WORDS})")
            }
            Self::TooFewSections { sections } => write!(
                f,
                "Too few sections ({sections} sections, minimum {MIN_POST_SECTIONS})"
            ),
        }
    }
}

/// Outcome of a validation pass.
///
/// Serialises as `{"isValid": bool, "issues": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// `true` iff no issues were found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut report = serializer.serialize_struct("ValidationReport", 2)?;
        report.serialize_field("isValid", &self.is_valid())?;
        report.serialize_field("issues", &self.issues)?;
        report.end()
    }
}

/// Checks an outline's structure.
pub fn validate_outline(outline: &BlogOutline) -> ValidationReport {
    let mut issues = Vec::new();

    if outline.title.trim().is_empty() {
        issues.push(ValidationIssue::MissingTitle);
    }
    let intro = outline.introduction.content.chars().count();
    if intro < MIN_OUTLINE_SECTION_CHARS {
        issues.push(ValidationIssue::IntroductionTooShort { chars: intro });
    }
    if outline.body.is_empty() {
        issues.push(ValidationIssue::NoBodySections);
    }
    let conclusion = outline.conclusion.content.chars().count();
    if conclusion < MIN_OUTLINE_SECTION_CHARS {
        issues.push(ValidationIssue::ConclusionTooShort { chars: conclusion });
    }

    ValidationReport { issues }
}

/// Checks a blog post's completeness.
pub fn validate_blog_post(post: &BlogPost) -> ValidationReport {
    let mut issues = Vec::new();

    if post.title().trim().is_empty() {
        issues.push(ValidationIssue::MissingTitle);
    }
    if post.sections().iter().all(|s| s.content().trim().is_empty()) {
        issues.push(ValidationIssue::MissingContent);
    }
    if post.sections().is_empty() {
        issues.push(ValidationIssue::NoSections);
    }
    if post.word_count() < MIN_POST_WORDS {
        issues.push(ValidationIssue::TooFewWords {
            words: post.word_count(),
        });
    }
    if post.sections().len() < MIN_POST_SECTIONS {
        issues.push(ValidationIssue::TooFewSections {
            sections: post.sections().len(),
        });
    }

    ValidationReport { issues }
}
