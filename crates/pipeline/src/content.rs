//! Content model: topics, outlines, and finished blog posts.
//!
//! Topics and their content-angles are read-only inputs produced by the
//! upstream approval workflow. Outlines and blog posts are produced once per
//! generation request and never mutated afterwards; regeneration creates a new
//! value.
//!
//! The outline wire shape (what the model is asked to emit and what is stored
//! as outline JSON) uses camelCase keys:
//!
//! ```json
//! {
//!   "title": "...",
//!   "introduction": { "title": "...", "content": "...", "keyPoints": ["..."] },
//!   "body": [ { "title": "...", "content": "...", "keyPoints": [] } ],
//!   "conclusion": { "title": "...", "content": "...", "keyPoints": [] }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::scoring::{reading_time_minutes, word_count};
use crate::{
    AngleId, Confidence, ContentId, ModelName, PostLength, PostStyle, Timestamp, Tone, TopicId,
};

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

/// An approved subject for content generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    /// Display name, e.g. `Edge AI`. Used verbatim in prompts and fallback text.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Angles attached to the topic. When resolved through
    /// [`crate::ContentStore::find_topic`] with an angle filter, only the
    /// requested angles remain.
    #[serde(default)]
    pub angles: Vec<ContentAngle>,
}

/// A specific framing or sub-theme of a [`Topic`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAngle {
    pub id: AngleId,
    /// Becomes the section title when the angle seeds a fallback body section.
    pub title: String,
    /// Becomes the section content of that fallback section.
    #[serde(default)]
    pub description: String,
    /// Comma-separated keyword list, as entered by the approval workflow.
    #[serde(default)]
    pub keywords: String,
}

impl ContentAngle {
    /// Returns the keyword list split on commas, trimmed, lower-cased, with
    /// empty entries removed.
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Outlines
// ---------------------------------------------------------------------------

/// Position of a section within an outline or article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionRole {
    /// Opening section: hook, context, preview.
    Introduction,
    /// One of the analysis sections between introduction and conclusion.
    Body,
    /// Closing section: summary and final insight.
    Conclusion,
}

impl std::fmt::Display for SectionRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Introduction => "introduction",
            Self::Body => "body",
            Self::Conclusion => "conclusion",
        })
    }
}

/// One planned section of an outline.
///
/// `content` describes what the section should cover; it is not final prose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

impl OutlineSection {
    /// Creates a section with the given title and content and no key points.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            key_points: Vec::new(),
        }
    }

    /// Appends `points` as key points.
    pub fn with_key_points<I, S>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_points.extend(points.into_iter().map(Into::into));
        self
    }
}

/// Outline structure without generation metadata.
///
/// This is the shape parsed out of model output and out of stored outline
/// JSON. All four keys are required; a missing key is a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineDraft {
    pub title: String,
    pub introduction: OutlineSection,
    pub body: Vec<OutlineSection>,
    pub conclusion: OutlineSection,
}

impl OutlineDraft {
    /// Iterates sections in fixed order: introduction, body, conclusion.
    pub fn sections(&self) -> impl Iterator<Item = (SectionRole, &OutlineSection)> {
        ordered_sections(&self.introduction, &self.body, &self.conclusion)
    }
}

/// Generation metadata attached to a [`BlogOutline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineMetadata {
    pub generated_at: Timestamp,
    pub model: ModelName,
    pub confidence: Confidence,
    pub processing_ms: u64,
    /// `true` when the model output was unusable and the deterministic
    /// fallback outline was returned instead.
    #[serde(default)]
    pub used_fallback: bool,
}

/// A structured plan for an article.
///
/// Introduction and conclusion are always present. A fallback outline has at
/// least one body section; [`crate::validate_outline`] reports an empty body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogOutline {
    pub title: String,
    pub introduction: OutlineSection,
    pub body: Vec<OutlineSection>,
    pub conclusion: OutlineSection,
    pub metadata: OutlineMetadata,
}

impl BlogOutline {
    /// Attaches `metadata` to a draft.
    pub fn from_draft(draft: OutlineDraft, metadata: OutlineMetadata) -> Self {
        Self {
            title: draft.title,
            introduction: draft.introduction,
            body: draft.body,
            conclusion: draft.conclusion,
            metadata,
        }
    }

    /// Iterates sections in fixed order: introduction, body, conclusion.
    pub fn sections(&self) -> impl Iterator<Item = (SectionRole, &OutlineSection)> {
        ordered_sections(&self.introduction, &self.body, &self.conclusion)
    }
}

fn ordered_sections<'a>(
    introduction: &'a OutlineSection,
    body: &'a [OutlineSection],
    conclusion: &'a OutlineSection,
) -> impl Iterator<Item = (SectionRole, &'a OutlineSection)> {
    std::iter::once((SectionRole::Introduction, introduction))
        .chain(body.iter().map(|s| (SectionRole::Body, s)))
        .chain(std::iter::once((SectionRole::Conclusion, conclusion)))
}

// ---------------------------------------------------------------------------
// Blog posts
// ---------------------------------------------------------------------------

/// One finished section of a [`BlogPost`].
///
/// The word count is computed from the prose at construction and cannot be
/// set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostSection {
    title: String,
    content: String,
    word_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    key_points: Vec<String>,
}

impl BlogPostSection {
    /// Creates a section, counting the words in `content`.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        key_points: Vec<String>,
    ) -> Self {
        let content = content.into();
        Self {
            title: title.into(),
            word_count: word_count(&content),
            content,
            key_points,
        }
    }

    /// Section heading, copied from the outline section.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Finished prose, from the model or from the fallback template.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whitespace-separated token count of [`BlogPostSection::content`].
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Key points carried over from the outline section.
    pub fn key_points(&self) -> &[String] {
        &self.key_points
    }
}

/// Generation metadata attached to a [`BlogPost`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    pub generated_at: Timestamp,
    pub model: ModelName,
    pub confidence: Confidence,
    pub processing_ms: u64,
    /// The stored outline this post was written from.
    pub outline_id: ContentId,
    pub style: PostStyle,
    pub length: PostLength,
    pub tone: Tone,
    /// Number of sections whose prose came from the deterministic fallback.
    #[serde(default)]
    pub fallback_sections: usize,
}

/// A finished long-form article.
///
/// The document text, word count, and reading time are all derived from the
/// sections in [`BlogPost::assemble`]; there is no way to construct a post
/// whose document diverges from its sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    title: String,
    content: String,
    word_count: usize,
    reading_time_minutes: usize,
    sections: Vec<BlogPostSection>,
    metadata: PostMetadata,
}

impl BlogPost {
    /// Builds the document as `# {title}` followed by `## {section}` and the
    /// section prose for every section, in order.
    pub fn assemble(
        title: impl Into<String>,
        sections: Vec<BlogPostSection>,
        metadata: PostMetadata,
    ) -> Self {
        let title = title.into();
        let content = render_document(&title, &sections);
        let word_count = word_count(&content);
        Self {
            title,
            reading_time_minutes: reading_time_minutes(word_count),
            word_count,
            content,
            sections,
            metadata,
        }
    }

    /// The outline's title, rendered as the top-level heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The fully assembled Markdown document.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whitespace-separated token count of [`BlogPost::content`].
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// `ceil(word_count / 200)`.
    pub fn reading_time_minutes(&self) -> usize {
        self.reading_time_minutes
    }

    /// Sections in outline order: introduction, body, conclusion.
    pub fn sections(&self) -> &[BlogPostSection] {
        &self.sections
    }

    pub fn metadata(&self) -> &PostMetadata {
        &self.metadata
    }
}

fn render_document(title: &str, sections: &[BlogPostSection]) -> String {
    let mut doc = format!("# {title}\n\n");
    for section in sections {
        doc.push_str("## ");
        doc.push_str(&section.title);
        doc.push_str("\n\n");
        doc.push_str(section.content.trim());
        doc.push_str("\n\n");
    }
    let end = doc.trim_end().len();
    doc.truncate(end);
    doc.push('\n');
    doc
}
