//! Test doubles shared by the pipeline integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use pipeline::{
    AngleId, ContentAngle, ContentId, ContentKind, ContentStore, ModelName, NewContent, StoreError,
    StoredOutline, TextGenerationError, TextGenerator, Topic, TopicId,
};

// ---------------------------------------------------------------------------
// Scripted text generator
// ---------------------------------------------------------------------------

/// One scripted model reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail,
}

/// A [`TextGenerator`] that replays scripted replies in order and records
/// every prompt it receives. When the script runs out, `fallback` is used.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    prompts: Mutex<Vec<String>>,
    initialized: AtomicBool,
    init_fails: bool,
}

impl ScriptedGenerator {
    pub fn new(replies: impl IntoIterator<Item = Reply>, fallback: Reply) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            fallback,
            prompts: Mutex::new(Vec::new()),
            initialized: AtomicBool::new(true),
            init_fails: false,
        }
    }

    /// A generator that fails every call.
    pub fn always_failing() -> Self {
        Self::new([], Reply::Fail)
    }

    /// A generator that returns `text` for every call.
    pub fn always(text: impl Into<String>) -> Self {
        Self::new([], Reply::Text(text.into()))
    }

    /// A generator that starts uninitialised and cannot be initialised.
    pub fn unreachable() -> Self {
        let generator = Self::always("never returned");
        generator.initialized.store(false, Ordering::SeqCst);
        Self {
            init_fails: true,
            ..generator
        }
    }

    /// A generator that starts uninitialised but initialises successfully.
    pub fn lazy(text: impl Into<String>) -> Self {
        let generator = Self::always(text);
        generator.initialized.store(false, Ordering::SeqCst);
        generator
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn initialize(&self) -> Result<(), TextGenerationError> {
        if self.init_fails {
            return Err(TextGenerationError::Unavailable {
                reason: "connection refused".into(),
            });
        }
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, TextGenerationError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(TextGenerationError::NotInitialized);
        }
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Fail => Err(TextGenerationError::Request {
                reason: "scripted failure".into(),
            }),
        }
    }

    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    fn model_name(&self) -> ModelName {
        ModelName::new("scripted-model").unwrap()
    }
}

// ---------------------------------------------------------------------------
// Fake store
// ---------------------------------------------------------------------------

/// A [`ContentStore`] over plain maps.
#[derive(Default)]
pub struct FakeStore {
    topics: Mutex<HashMap<TopicId, Topic>>,
    outlines: Mutex<HashMap<ContentId, Option<String>>>,
    created: Mutex<Vec<(ContentId, NewContent)>>,
}

impl FakeStore {
    pub fn with_topic(topic: Topic) -> Self {
        let store = Self::default();
        store.topics.lock().unwrap().insert(topic.id.clone(), topic);
        store
    }

    /// Registers an outline record with raw (possibly absent) JSON.
    pub fn insert_outline(&self, outline_json: Option<String>) -> ContentId {
        let id = ContentId::new_random();
        self.outlines.lock().unwrap().insert(id, outline_json);
        id
    }

    pub fn created(&self) -> Vec<(ContentId, NewContent)> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentStore for FakeStore {
    async fn find_topic(
        &self,
        topic_id: &TopicId,
        angle_ids: Option<&[AngleId]>,
    ) -> Result<Option<Topic>, StoreError> {
        let topics = self.topics.lock().unwrap();
        Ok(topics.get(topic_id).cloned().map(|mut topic| {
            if let Some(ids) = angle_ids {
                topic.angles.retain(|a| ids.contains(&a.id));
            }
            topic
        }))
    }

    async fn find_outline(
        &self,
        outline_id: ContentId,
    ) -> Result<Option<StoredOutline>, StoreError> {
        Ok(self
            .outlines
            .lock()
            .unwrap()
            .get(&outline_id)
            .cloned()
            .map(|outline_json| StoredOutline {
                id: outline_id,
                outline_json,
            }))
    }

    async fn create_content(&self, content: NewContent) -> Result<ContentId, StoreError> {
        let id = ContentId::new_random();
        if content.kind == ContentKind::Outline {
            self.outlines.lock().unwrap().insert(id, content.outline_json.clone());
        }
        self.created.lock().unwrap().push((id, content));
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn angle(id: &str, title: &str, description: &str, keywords: &str) -> ContentAngle {
    ContentAngle {
        id: AngleId::new(id).unwrap(),
        title: title.into(),
        description: description.into(),
        keywords: keywords.into(),
    }
}

pub fn edge_ai_topic() -> Topic {
    Topic {
        id: TopicId::new("t1").unwrap(),
        name: "Edge AI".into(),
        description: "Running machine learning models directly on devices".into(),
        angles: vec![angle(
            "a1",
            "Latency",
            "Why on-device inference removes network round-trips",
            "latency, inference",
        )],
    }
}

/// Outline JSON with an introduction, two body sections and a conclusion.
pub fn four_section_outline_json() -> String {
    r#"{
        "title": "Edge AI in Practice",
        "introduction": {
            "title": "Introduction", "content": "Why Edge AI matters now", "keyPoints": ["hook"]
        },
        "body": [
            {
                "title": "Latency",
                "content": "Round-trips and responsiveness",
                "keyPoints": ["network", "budgets"]
            },
            {"title": "Privacy", "content": "Keeping data on the device", "keyPoints": []}
        ],
        "conclusion": {"title": "Conclusion", "content": "What to do next", "keyPoints": []}
    }"#
    .to_string()
}

/// `n` words of filler prose.
pub fn prose(n: usize) -> String {
    vec!["insight"; n].join(" ")
}
