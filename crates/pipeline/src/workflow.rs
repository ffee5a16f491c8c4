//! Generate-then-persist orchestration for callers that want stored results.
//!
//! [`ContentWorkflow`] runs a generator and writes its output as a new
//! content record. Stored outlines are what the Article Writer reads back,
//! so `create_outline` followed by `create_blog_post` on the returned id is
//! the complete two-stage pipeline.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    ArticleWriter, BlogOutline, BlogPost, BlogPostRequest, ContentId, ContentKind, ContentStore,
    GenerationError, NewContent, OutlineGenerator, OutlineRequest, TextGenerator,
};

/// Drives both generation stages against one client and one store.
#[derive(Clone)]
pub struct ContentWorkflow {
    outlines: OutlineGenerator,
    articles: ArticleWriter,
    store: Arc<dyn ContentStore>,
}

impl ContentWorkflow {
    /// Builds both stages over the same client and store.
    pub fn new(client: Arc<dyn TextGenerator>, store: Arc<dyn ContentStore>) -> Self {
        Self {
            outlines: OutlineGenerator::new(Arc::clone(&client), Arc::clone(&store)),
            articles: ArticleWriter::new(client, Arc::clone(&store)),
            store,
        }
    }

    /// Generates an outline and stores it as an outline record.
    #[instrument(skip_all, fields(topic_id = %request.topic_id))]
    pub async fn create_outline(
        &self,
        request: &OutlineRequest,
    ) -> Result<(ContentId, BlogOutline), GenerationError> {
        let outline = self.outlines.generate_outline(request).await?;
        let metadata = &outline.metadata;

        let record = NewContent {
            kind: ContentKind::Outline,
            topic_id: Some(request.topic_id.clone()),
            title: outline.title.clone(),
            outline_json: Some(serde_json::to_string(&outline)?),
            body: None,
            word_count: None,
            model: metadata.model.clone(),
            confidence: metadata.confidence,
            processing_ms: metadata.processing_ms,
            generated_at: metadata.generated_at,
            source_outline_id: None,
            style: Some(request.style),
            length: Some(request.length),
            tone: None,
        };

        let id = self.store.create_content(record).await?;
        info!(content_id = %id, "outline stored");
        Ok((id, outline))
    }

    /// Generates a blog post from a stored outline and stores it as a new
    /// blog-post record.
    #[instrument(skip_all, fields(outline_id = %request.outline_id))]
    pub async fn create_blog_post(
        &self,
        request: &BlogPostRequest,
    ) -> Result<(ContentId, BlogPost), GenerationError> {
        let post = self.articles.generate_blog_post(request).await?;
        let metadata = post.metadata();

        let record = NewContent {
            kind: ContentKind::BlogPost,
            topic_id: None,
            title: post.title().to_string(),
            outline_json: None,
            body: Some(post.content().to_string()),
            word_count: Some(post.word_count()),
            model: metadata.model.clone(),
            confidence: metadata.confidence,
            processing_ms: metadata.processing_ms,
            generated_at: metadata.generated_at,
            source_outline_id: Some(metadata.outline_id),
            style: Some(metadata.style),
            length: Some(metadata.length),
            tone: Some(metadata.tone),
        };

        let id = self.store.create_content(record).await?;
        info!(content_id = %id, "blog post stored");
        Ok((id, post))
    }
}
