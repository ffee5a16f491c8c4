//! Process-local content store.

use async_trait::async_trait;
use pipeline::{
    AngleId, ContentId, ContentRecord, ContentStore, NewContent, StoreError, StoredOutline, Topic,
    TopicId,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::StoreState;

/// [`ContentStore`] that keeps everything in memory for the life of the
/// process.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    state: RwLock<StoreState>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `topics`.
    pub fn with_topics(topics: impl IntoIterator<Item = Topic>) -> Self {
        let mut state = StoreState::default();
        for topic in topics {
            state.upsert_topic(topic);
        }
        Self {
            state: RwLock::new(state),
        }
    }

    pub async fn insert_topic(&self, topic: Topic) {
        self.state.write().await.upsert_topic(topic);
    }

    pub async fn list_topics(&self) -> Vec<Topic> {
        self.state.read().await.topics.values().cloned().collect()
    }

    pub async fn get_content(&self, id: ContentId) -> Option<ContentRecord> {
        self.state.read().await.contents.get(&id).cloned()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn find_topic(
        &self,
        topic_id: &TopicId,
        angle_ids: Option<&[AngleId]>,
    ) -> Result<Option<Topic>, StoreError> {
        Ok(self.state.read().await.topic(topic_id, angle_ids))
    }

    async fn find_outline(
        &self,
        outline_id: ContentId,
    ) -> Result<Option<StoredOutline>, StoreError> {
        Ok(self.state.read().await.outline(outline_id))
    }

    async fn create_content(&self, content: NewContent) -> Result<ContentId, StoreError> {
        let kind = content.kind;
        let id = self.state.write().await.insert_content(content);
        debug!(content_id = %id, %kind, "content created");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::{Confidence, ContentAngle, ContentKind, ModelName, Timestamp};

    fn topic() -> Topic {
        let angle = |id: &str| ContentAngle {
            id: AngleId::new(id).unwrap(),
            title: format!("Angle {id}"),
            description: String::new(),
            keywords: String::new(),
        };
        Topic {
            id: TopicId::new("t1").unwrap(),
            name: "Edge AI".into(),
            description: String::new(),
            angles: vec![angle("a1"), angle("a2"), angle("a3")],
        }
    }

    fn content(kind: ContentKind, outline_json: Option<&str>) -> NewContent {
        NewContent {
            kind,
            topic_id: None,
            title: "Title".into(),
            outline_json: outline_json.map(str::to_string),
            body: None,
            word_count: None,
            model: ModelName::new("m").unwrap(),
            confidence: Confidence::clamped(0.5),
            processing_ms: 3,
            generated_at: Timestamp::now(),
            source_outline_id: None,
            style: None,
            length: None,
            tone: None,
        }
    }

    #[tokio::test]
    async fn test_find_topic_filters_angles() {
        let store = InMemoryContentStore::with_topics([topic()]);
        let id = TopicId::new("t1").unwrap();

        let all = store.find_topic(&id, None).await.unwrap().unwrap();
        assert_eq!(all.angles.len(), 3);

        let ids = [AngleId::new("a3").unwrap(), AngleId::new("zz").unwrap()];
        let some = store.find_topic(&id, Some(&ids[..])).await.unwrap().unwrap();
        assert_eq!(some.angles.len(), 1);
        assert_eq!(some.angles[0].id.as_str(), "a3");

        let missing = TopicId::new("nope").unwrap();
        assert!(store.find_topic(&missing, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_outline_only_returns_outline_records() {
        let store = InMemoryContentStore::new();
        let outline_id = store
            .create_content(content(ContentKind::Outline, Some("{}")))
            .await
            .unwrap();
        let post_id = store.create_content(content(ContentKind::BlogPost, None)).await.unwrap();

        let outline = store.find_outline(outline_id).await.unwrap().unwrap();
        assert_eq!(outline.id, outline_id);
        assert_eq!(outline.outline_json.as_deref(), Some("{}"));

        assert!(store.find_outline(post_id).await.unwrap().is_none());
        assert!(store.find_outline(ContentId::new_random()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_created_content_is_retrievable() {
        let store = InMemoryContentStore::new();
        let id = store.create_content(content(ContentKind::BlogPost, None)).await.unwrap();

        let record = store.get_content(id).await.unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.content.processing_ms, 3);
    }
}
