//! The store document shared by every backend.

use std::collections::BTreeMap;

use pipeline::{
    AngleId, ContentId, ContentKind, ContentRecord, NewContent, StoredOutline, Timestamp, Topic,
    TopicId,
};
use serde::{Deserialize, Serialize};

/// Topics and content records, keyed by identifier.
///
/// Serialised as-is by [`crate::FileContentStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub topics: BTreeMap<TopicId, Topic>,
    #[serde(default)]
    pub contents: BTreeMap<ContentId, ContentRecord>,
}

impl StoreState {
    /// Inserts or replaces a topic.
    pub fn upsert_topic(&mut self, topic: Topic) {
        self.topics.insert(topic.id.clone(), topic);
    }

    pub fn topic(&self, topic_id: &TopicId, angle_ids: Option<&[AngleId]>) -> Option<Topic> {
        let mut topic = self.topics.get(topic_id)?.clone();
        if let Some(ids) = angle_ids {
            topic.angles.retain(|angle| ids.contains(&angle.id));
        }
        Some(topic)
    }

    /// Returns the record only if it is an outline.
    pub fn outline(&self, outline_id: ContentId) -> Option<StoredOutline> {
        self.contents
            .get(&outline_id)
            .filter(|record| record.content.kind == ContentKind::Outline)
            .map(|record| StoredOutline {
                id: record.id,
                outline_json: record.content.outline_json.clone(),
            })
    }

    /// Assigns a fresh id and stores `content`.
    pub fn insert_content(&mut self, content: NewContent) -> ContentId {
        let id = ContentId::new_random();
        self.contents.insert(
            id,
            ContentRecord {
                id,
                created_at: Timestamp::now(),
                content,
            },
        );
        id
    }
}
