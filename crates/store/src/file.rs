//! Content store persisted as a single JSON document on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pipeline::{
    AngleId, ContentId, ContentRecord, ContentStore, NewContent, StoreError, StoredOutline, Topic,
    TopicId,
};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::StoreState;

/// [`ContentStore`] backed by a JSON file.
///
/// The whole document is loaded on [`FileContentStore::open`] and rewritten
/// after every mutation. Writes go to a sibling temporary file first and are
/// then renamed over the original, so a crash never leaves a truncated
/// document behind. Not intended for concurrent use by several processes.
#[derive(Debug)]
pub struct FileContentStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl FileContentStore {
    /// Opens the store at `path`, starting empty if the file does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("store file not found, starting empty");
                StoreState::default()
            }
            Err(e) => return Err(e.into()),
        };
        debug!(
            topics = state.topics.len(),
            contents = state.contents.len(),
            "store loaded"
        );

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Location of the JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts or replaces topics and persists the document.
    ///
    /// If persisting fails the in-memory topics are restored, so the store
    /// never reports topics that are not on disk.
    pub async fn import_topics(
        &self,
        topics: impl IntoIterator<Item = Topic>,
    ) -> Result<usize, StoreError> {
        let mut state = self.state.write().await;
        let previous = state.topics.clone();
        let mut count = 0;
        for topic in topics {
            state.upsert_topic(topic);
            count += 1;
        }
        if let Err(e) = self.persist(&state).await {
            state.topics = previous;
            return Err(e);
        }
        Ok(count)
    }

    pub async fn insert_topic(&self, topic: Topic) -> Result<(), StoreError> {
        self.import_topics([topic]).await.map(|_| ())
    }

    pub async fn list_topics(&self) -> Vec<Topic> {
        self.state.read().await.topics.values().cloned().collect()
    }

    pub async fn get_content(&self, id: ContentId) -> Option<ContentRecord> {
        self.state.read().await.contents.get(&id).cloned()
    }

    async fn persist(&self, state: &StoreState) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(state)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for FileContentStore {
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
        let mut state = self.state.write().await;
        let kind = content.kind;
        let id = state.insert_content(content);
        if let Err(e) = self.persist(&state).await {
            state.contents.remove(&id);
            return Err(e);
        }
        debug!(content_id = %id, %kind, path = %self.path.display(), "content persisted");
        Ok(id)
    }
}
