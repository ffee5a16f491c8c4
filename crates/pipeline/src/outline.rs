//! Outline Generator: topic and content-angles in, structured outline out.
//!
//! The stage runs prompt construction, one model call, structured-output
//! parsing, deterministic fallback, and confidence scoring. The only fatal
//! path is an unresolvable topic; every model failure degrades to the
//! fallback outline.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::ports::generate_with;
use crate::prompts::outline_prompt;
use crate::scoring::outline_confidence;
use crate::{
    AngleId, BlogOutline, ContentStore, GenerationError, OutlineDraft, OutlineMetadata,
    OutlineSection, PostLength, PostStyle, TextGenerationError, TextGenerator, Timestamp, Topic,
    TopicId,
};

/// Maximum number of content-angles turned into fallback body sections.
pub const MAX_FALLBACK_SECTIONS: usize = 3;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Input to [`OutlineGenerator::generate_outline`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRequest {
    pub topic_id: TopicId,
    /// Restricts the topic's angles to this set. `None` uses every angle.
    pub angle_ids: Option<Vec<AngleId>>,
    pub style: PostStyle,
    pub length: PostLength,
}

impl OutlineRequest {
    /// Creates a request for `topic_id` with default style and length.
    pub fn new(topic_id: TopicId) -> Self {
        Self {
            topic_id,
            angle_ids: None,
            style: PostStyle::default(),
            length: PostLength::default(),
        }
    }

    /// Restricts the outline to `angle_ids`. Unknown ids are ignored.
    pub fn with_angles(mut self, angle_ids: Vec<AngleId>) -> Self {
        self.angle_ids = Some(angle_ids);
        self
    }

    /// Sets the editorial style the prompt asks for.
    pub fn with_style(mut self, style: PostStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the body-section range the prompt asks for.
    pub fn with_length(mut self, length: PostLength) -> Self {
        self.length = length;
        self
    }
}

// ---------------------------------------------------------------------------
// Parse-or-fallback outcome
// ---------------------------------------------------------------------------

/// Why the fallback outline was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The model could not be initialised or the call failed.
    ModelFailed(String),
    /// The response contained no brace-delimited JSON object.
    NoJsonObject,
    /// The extracted object is not valid JSON or lacks required keys.
    InvalidJson(String),
    /// The keys are present but the named fields are blank or empty.
    MissingFields(Vec<&'static str>),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModelFailed(reason) => write!(f, "model call failed: {reason}"),
            Self::NoJsonObject => f.write_str("no JSON object in model output"),
            Self::InvalidJson(reason) => write!(f, "unusable outline JSON: {reason}"),
            Self::MissingFields(fields) => {
                write!(f, "outline has no content for: {}", fields.join(", "))
            }
        }
    }
}

/// Result of interpreting one model response.
#[derive(Debug, Clone, PartialEq)]
pub enum OutlineOutcome {
    /// The model produced a usable outline.
    Parsed(OutlineDraft),
    /// The deterministic fallback outline replaced the model output.
    Fallback { draft: OutlineDraft, reason: FallbackReason },
}

impl OutlineOutcome {
    /// Parses `response` for `topic`, falling back deterministically on any
    /// failure.
    pub fn resolve(topic: &Topic, response: Result<String, TextGenerationError>) -> Self {
        let parsed = response
            .map_err(|e| FallbackReason::ModelFailed(e.to_string()))
            .and_then(|raw| parse_outline_response(&raw));

        match parsed {
            Ok(draft) => Self::Parsed(draft),
            Err(reason) => Self::Fallback {
                draft: fallback_outline(topic),
                reason,
            },
        }
    }

    pub fn draft(&self) -> &OutlineDraft {
        match self {
            Self::Parsed(draft) | Self::Fallback { draft, .. } => draft,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn into_draft(self) -> OutlineDraft {
        match self {
            Self::Parsed(draft) | Self::Fallback { draft, .. } => draft,
        }
    }
}

/// Returns the first balanced `{ ... }` span in `raw`.
///
/// Braces inside JSON string literals are ignored. Returns `None` when no
/// opening brace exists or the first object is never closed.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extracts and parses an outline from raw model output.
///
/// A parsed outline must carry a title, introduction content, at least one
/// body section, and conclusion content; otherwise the result is
/// [`FallbackReason::MissingFields`].
pub fn parse_outline_response(raw: &str) -> Result<OutlineDraft, FallbackReason> {
    let json = extract_json_object(raw).ok_or(FallbackReason::NoJsonObject)?;
    let draft: OutlineDraft =
        serde_json::from_str(json).map_err(|e| FallbackReason::InvalidJson(e.to_string()))?;

    let missing = blank_fields(&draft);
    if missing.is_empty() {
        Ok(draft)
    } else {
        Err(FallbackReason::MissingFields(missing))
    }
}

fn blank_fields(draft: &OutlineDraft) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if draft.title.trim().is_empty() {
        missing.push("title");
    }
    if draft.introduction.content.trim().is_empty() {
        missing.push("introduction");
    }
    if draft.body.is_empty() {
        missing.push("body");
    }
    if draft.conclusion.content.trim().is_empty() {
        missing.push("conclusion");
    }
    missing
}

/// Builds the deterministic outline used when model output is unusable.
///
/// Body sections map one-to-one onto the first [`MAX_FALLBACK_SECTIONS`]
/// angles. A topic without angles gets a single overview section so the
/// body is never empty.
pub fn fallback_outline(topic: &Topic) -> OutlineDraft {
    let name = topic.name.trim();

    let introduction = OutlineSection::new(
        "Introduction",
        format!(
            "An introduction to {name}: what it is, why it matters today, and what this \
             article will cover."
        ),
    )
    .with_key_points([
        format!("Why {name} matters"),
        "What this article covers".to_string(),
    ]);

    let mut body: Vec<OutlineSection> = topic
        .angles
        .iter()
        .take(MAX_FALLBACK_SECTIONS)
        .map(|angle| {
            OutlineSection::new(&angle.title, &angle.description)
                .with_key_points(angle.keyword_list())
        })
        .collect();

    if body.is_empty() {
        let content = if topic.description.trim().is_empty() {
            format!("An overview of the most important aspects of {name}.")
        } else {
            topic.description.trim().to_string()
        };
        body.push(OutlineSection::new(format!("Key Aspects of {name}"), content));
    }

    let conclusion = OutlineSection::new(
        "Conclusion",
        format!(
            "A summary of the key takeaways about {name} and what readers should keep in mind \
             as it continues to evolve."
        ),
    )
    .with_key_points([format!("Key takeaways about {name}")]);

    OutlineDraft {
        title: format!("Understanding {name}"),
        introduction,
        body,
        conclusion,
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Generates outlines from approved topics.
///
/// Holds no per-request state; concurrent calls are independent.
#[derive(Clone)]
pub struct OutlineGenerator {
    client: Arc<dyn TextGenerator>,
    store: Arc<dyn ContentStore>,
}

impl OutlineGenerator {
    /// Creates a generator over `client` and `store`.
    pub fn new(client: Arc<dyn TextGenerator>, store: Arc<dyn ContentStore>) -> Self {
        Self { client, store }
    }

    /// Generates an outline for the requested topic.
    ///
    /// # Errors
    ///
    /// [`GenerationError::TopicNotFound`] if the topic does not exist, or
    /// [`GenerationError::Store`] if the store fails. Model failures never
    /// produce an error.
    #[instrument(
        skip(self, request),
        fields(
            topic_id = %request.topic_id,
            style = %request.style,
            length = %request.length,
        )
    )]
    pub async fn generate_outline(
        &self,
        request: &OutlineRequest,
    ) -> Result<BlogOutline, GenerationError> {
        let started = Instant::now();

        let topic = self
            .store
            .find_topic(&request.topic_id, request.angle_ids.as_deref())
            .await?
            .ok_or_else(|| GenerationError::TopicNotFound {
                topic_id: request.topic_id.clone(),
            })?;
        debug!(angles = topic.angles.len(), "resolved topic");

        let prompt = outline_prompt(&topic, request.style, request.length);
        let response = generate_with(self.client.as_ref(), &prompt).await;

        let outcome = OutlineOutcome::resolve(&topic, response);
        if let OutlineOutcome::Fallback { reason, .. } = &outcome {
            warn!(%reason, "using fallback outline");
        }
        let used_fallback = outcome.is_fallback();
        let draft = outcome.into_draft();

        let confidence = outline_confidence(&draft, &topic.angles);
        let processing_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            body_sections = draft.body.len(),
            %confidence,
            used_fallback,
            elapsed_ms = processing_ms,
            "outline generated"
        );

        Ok(BlogOutline::from_draft(
            draft,
            OutlineMetadata {
                generated_at: Timestamp::now(),
                model: self.client.model_name(),
                confidence,
                processing_ms,
                used_fallback,
            },
        ))
    }
}
