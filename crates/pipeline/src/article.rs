//! Article Writer: stored outline in, finished long-form post out.
//!
//! Sections are written one model call at a time, strictly in outline order:
//! introduction, each body section, conclusion. A failed call only affects
//! its own section, which receives deterministic fallback prose. The only
//! fatal paths are a missing, empty, or corrupt stored outline.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::ports::generate_with;
use crate::prompts::{section_prompt, SectionPromptOptions};
use crate::scoring::post_confidence;
use crate::{
    BlogPost, BlogPostSection, ContentId, ContentStore, GenerationError, OutlineDraft,
    OutlineSection, PostLength, PostMetadata, PostStyle, SectionRole, TextGenerationError,
    TextGenerator, Timestamp, Tone,
};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Input to [`ArticleWriter::generate_blog_post`].
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPostRequest {
    pub outline_id: ContentId,
    pub style: PostStyle,
    pub length: PostLength,
    pub tone: Tone,
}

impl BlogPostRequest {
    /// Creates a request for `outline_id` with default style, length and tone.
    pub fn new(outline_id: ContentId) -> Self {
        Self {
            outline_id,
            style: PostStyle::default(),
            length: PostLength::default(),
            tone: Tone::default(),
        }
    }

    /// Overrides the writing style.
    pub fn with_style(mut self, style: PostStyle) -> Self {
        self.style = style;
        self
    }

    /// Overrides the per-section length target.
    pub fn with_length(mut self, length: PostLength) -> Self {
        self.length = length;
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

// ---------------------------------------------------------------------------
// Fallback prose
// ---------------------------------------------------------------------------

/// Deterministic prose for a section whose model call failed.
///
/// The section's outline content leads, followed by a closing clause that
/// depends on the section's role.
pub fn fallback_prose(role: SectionRole, section: &OutlineSection, post_title: &str) -> String {
    let brief = section.content.trim();
    let lead = if brief.is_empty() {
        format!("This section covers {}.", section.title.trim())
    } else if brief.ends_with(['.', '!', '?']) {
        brief.to_string()
    } else {
        format!("{brief}.")
    };

    let closing = match role {
        SectionRole::Introduction => {
            format!("In the sections that follow, we look at the ideas that shape {post_title}.")
        }
        SectionRole::Body => {
            "Understanding this aspect is essential to seeing the bigger picture.".to_string()
        }
        SectionRole::Conclusion => {
            "Taken together, these points offer a clear foundation for what comes next.".to_string()
        }
    };

    format!("{lead} {closing}")
}

fn usable_prose(
    response: Result<String, TextGenerationError>,
) -> Result<String, TextGenerationError> {
    let text = response?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TextGenerationError::InvalidResponse {
            reason: "model returned no text".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Writes finished articles from stored outlines.
///
/// Holds no per-request state; concurrent calls are independent.
#[derive(Clone)]
pub struct ArticleWriter {
    client: Arc<dyn TextGenerator>,
    store: Arc<dyn ContentStore>,
}

impl ArticleWriter {
    /// Creates a writer that reads outlines from `store`.
    pub fn new(client: Arc<dyn TextGenerator>, store: Arc<dyn ContentStore>) -> Self {
        Self { client, store }
    }

    /// Generates a blog post from the stored outline named in `request`.
    ///
    /// # Errors
    ///
    /// [`GenerationError::OutlineNotFound`], [`GenerationError::OutlineEmpty`]
    /// or [`GenerationError::OutlineMalformed`] when the outline cannot be
    /// loaded, and [`GenerationError::Store`] when the store fails. Model
    /// failures never produce an error.
    #[instrument(
        skip(self, request),
        fields(outline_id = %request.outline_id, tone = %request.tone)
    )]
    pub async fn generate_blog_post(
        &self,
        request: &BlogPostRequest,
    ) -> Result<BlogPost, GenerationError> {
        let started = Instant::now();
        let outline = self.load_outline(request.outline_id).await?;

        let options = SectionPromptOptions {
            post_title: &outline.title,
            style: request.style,
            length: request.length,
            tone: request.tone,
        };

        let mut sections = Vec::with_capacity(outline.body.len() + 2);
        let mut fallback_sections = 0usize;
        for (role, section) in outline.sections() {
            let prompt = section_prompt(role, section, options);
            let prose = match usable_prose(generate_with(self.client.as_ref(), &prompt).await) {
                Ok(prose) => prose,
                Err(e) => {
                    warn!(%role, section = %section.title, error = %e, "using fallback prose");
                    fallback_sections += 1;
                    fallback_prose(role, section, &outline.title)
                }
            };
            debug!(
                %role,
                section = %section.title,
                words = crate::scoring::word_count(&prose),
                "section written"
            );
            sections.push(BlogPostSection::new(&section.title, prose, section.key_points.clone()));
        }

        let confidence = post_confidence(&outline.title, &sections);
        let processing_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let post = BlogPost::assemble(
            outline.title,
            sections,
            PostMetadata {
                generated_at: Timestamp::now(),
                model: self.client.model_name(),
                confidence,
                processing_ms,
                outline_id: request.outline_id,
                style: request.style,
                length: request.length,
                tone: request.tone,
                fallback_sections,
            },
        );

        info!(
            sections = post.sections().len(),
            words = post.word_count(),
            fallback_sections,
            %confidence,
            elapsed_ms = processing_ms,
            "blog post generated"
        );
        Ok(post)
    }

    async fn load_outline(&self, outline_id: ContentId) -> Result<OutlineDraft, GenerationError> {
        let stored = self
            .store
            .find_outline(outline_id)
            .await?
            .ok_or(GenerationError::OutlineNotFound { outline_id })?;

        let json = stored
            .outline_json
            .filter(|json| !json.trim().is_empty())
            .ok_or(GenerationError::OutlineEmpty { outline_id })?;

        serde_json::from_str(&json).map_err(|e| GenerationError::OutlineMalformed {
            outline_id,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_prose_leads_with_outline_content() {
        let section = OutlineSection::new("Latency", "Why milliseconds matter on device");
        let prose = fallback_prose(SectionRole::Body, &section, "Edge AI");
        assert_eq!(
            prose,
            "Why milliseconds matter on device. \
             Understanding this aspect is essential to seeing the bigger picture."
        );
    }

    #[test]
    fn test_fallback_prose_without_content_names_the_section() {
        let section = OutlineSection::new("Wrap-up", "  ");
        let prose = fallback_prose(SectionRole::Conclusion, &section, "Edge AI");
        assert!(prose.starts_with("This section covers Wrap-up."));
        assert!(prose.ends_with("what comes next."));
    }

    #[test]
    fn test_fallback_prose_introduction_references_post_title() {
        let section = OutlineSection::new("Introduction", "Setting the scene!");
        let prose = fallback_prose(SectionRole::Introduction, &section, "Edge AI");
        assert!(prose.starts_with("Setting the scene! "));
        assert!(prose.contains("shape Edge AI"));
    }

    #[test]
    fn test_blank_model_output_is_not_usable() {
        assert!(usable_prose(Ok("  \n ".into())).is_err());
        assert_eq!(usable_prose(Ok("  prose \n".into())).unwrap(), "prose");
    }
}
