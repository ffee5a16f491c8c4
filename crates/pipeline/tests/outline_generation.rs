mod common;

use std::sync::Arc;

use common::{angle, edge_ai_topic, FakeStore, ScriptedGenerator};
use pipeline::{
    validate_outline, AngleId, GenerationError, OutlineGenerator, OutlineRequest, PostLength,
    PostStyle, Topic, TopicId,
};

fn generator(
    client: ScriptedGenerator,
    store: FakeStore,
) -> (OutlineGenerator, Arc<ScriptedGenerator>) {
    let client = Arc::new(client);
    (OutlineGenerator::new(client.clone(), Arc::new(store)), client)
}

fn request() -> OutlineRequest {
    OutlineRequest::new(TopicId::new("t1").unwrap())
}

#[tokio::test]
async fn test_unknown_topic_is_fatal() {
    let (outlines, _) = generator(ScriptedGenerator::always("{}"), FakeStore::default());

    let err = outlines.generate_outline(&request()).await.unwrap_err();
    assert!(matches!(err, GenerationError::TopicNotFound { .. }));
    assert_eq!(err.to_string(), "Topic not found: t1");
}

#[tokio::test]
async fn test_failing_model_yields_fallback_outline() {
    let (outlines, _) = generator(
        ScriptedGenerator::always_failing(),
        FakeStore::with_topic(edge_ai_topic()),
    );

    let outline = outlines.generate_outline(&request()).await.unwrap();

    assert_eq!(outline.title, "Understanding Edge AI");
    assert_eq!(outline.body.len(), 1);
    assert_eq!(outline.body[0].title, "Latency");
    assert!(outline.metadata.used_fallback);
    assert_eq!(outline.metadata.model.as_str(), "scripted-model");
}

#[tokio::test]
async fn test_unreachable_model_degrades_to_fallback() {
    let (outlines, client) = generator(
        ScriptedGenerator::unreachable(),
        FakeStore::with_topic(edge_ai_topic()),
    );

    let outline = outlines.generate_outline(&request()).await.unwrap();

    assert!(outline.metadata.used_fallback);
    assert!(client.prompts().is_empty());
}

#[tokio::test]
async fn test_uninitialised_model_is_initialised_before_use() {
    let raw = r#"{"title": "Edge AI", "introduction": {"content": "Why it matters"},
        "body": [{"title": "A"}], "conclusion": {"content": "Next steps"}}"#;
    let (outlines, client) = generator(
        ScriptedGenerator::lazy(raw),
        FakeStore::with_topic(edge_ai_topic()),
    );

    let outline = outlines.generate_outline(&request()).await.unwrap();

    assert!(!outline.metadata.used_fallback);
    assert_eq!(client.prompts().len(), 1);
}

#[tokio::test]
async fn test_unparseable_output_still_produces_complete_outline() {
    let (outlines, _) = generator(
        ScriptedGenerator::always("Here are some thoughts about edge computing, no JSON today."),
        FakeStore::with_topic(edge_ai_topic()),
    );

    let outline = outlines.generate_outline(&request()).await.unwrap();

    assert!(!outline.title.is_empty());
    assert!(!outline.introduction.content.is_empty());
    assert!(!outline.body.is_empty());
    assert!(!outline.conclusion.content.is_empty());
    assert!(validate_outline(&outline).is_valid());
}

#[tokio::test]
async fn test_missing_required_key_triggers_fallback() {
    let raw = r#"{"title": "A Perfectly Good Title", "introduction": {}, "body": []}"#;
    let (outlines, _) = generator(
        ScriptedGenerator::always(raw),
        FakeStore::with_topic(edge_ai_topic()),
    );

    let outline = outlines.generate_outline(&request()).await.unwrap();
    assert_eq!(outline.title, "Understanding Edge AI");
}

#[tokio::test]
async fn test_outline_with_blank_fields_triggers_fallback() {
    let raw = r#"{"title":"","introduction":{},"body":[],"conclusion":{}}"#;
    let (outlines, _) = generator(
        ScriptedGenerator::always(raw),
        FakeStore::with_topic(edge_ai_topic()),
    );

    let outline = outlines.generate_outline(&request()).await.unwrap();

    assert!(outline.metadata.used_fallback);
    assert_eq!(outline.title, "Understanding Edge AI");
    assert!(!outline.introduction.content.is_empty());
    assert_eq!(outline.body.len(), 1);
    assert!(!outline.conclusion.content.is_empty());
    assert!(validate_outline(&outline).is_valid());
}

#[tokio::test]
async fn test_outline_with_empty_body_triggers_fallback() {
    let raw = r#"{"title": "Edge AI Without the Cloud",
        "introduction": {"content": "Models are moving onto phones and sensors."},
        "body": [],
        "conclusion": {"content": "Start small and measure."}}"#;
    let (outlines, _) = generator(
        ScriptedGenerator::always(raw),
        FakeStore::with_topic(edge_ai_topic()),
    );

    let outline = outlines.generate_outline(&request()).await.unwrap();

    assert!(outline.metadata.used_fallback);
    assert_eq!(outline.body[0].title, "Latency");
}

#[tokio::test]
async fn test_model_outline_is_used_and_scored() {
    let long = "a".repeat(120);
    let raw = format!(
        r#"Sure, here it is:
        {{
          "title": "Edge AI: Faster Answers Without the Cloud",
          "introduction": {{
            "title": "Introduction", "content": "{long}", "keyPoints": ["latency"]
          }},
          "body": [
            {{"title": "Inference on device", "content": "c", "keyPoints": []}},
            {{"title": "Batteries", "content": "c", "keyPoints": []}},
            {{"title": "Tooling", "content": "c", "keyPoints": []}}
          ],
          "conclusion": {{"title": "Conclusion", "content": "{long}", "keyPoints": []}}
        }}
        Hope this helps!"#
    );
    let (outlines, _) = generator(
        ScriptedGenerator::always(raw),
        FakeStore::with_topic(edge_ai_topic()),
    );

    let outline = outlines.generate_outline(&request()).await.unwrap();

    assert!(!outline.metadata.used_fallback);
    assert_eq!(outline.title, "Edge AI: Faster Answers Without the Cloud");
    assert_eq!(outline.body.len(), 3);
    // Every structural signal plus full keyword coverage ("latency", "inference").
    assert!((outline.metadata.confidence.as_f64() - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_prompt_reflects_request_options_and_angle_filter() {
    let topic = Topic {
        angles: vec![
            angle("a1", "Latency", "Round-trips", "latency"),
            angle("a2", "Privacy", "Data stays local", "privacy"),
        ],
        ..edge_ai_topic()
    };
    let (outlines, client) =
        generator(ScriptedGenerator::always_failing(), FakeStore::with_topic(topic));

    let request = request()
        .with_angles(vec![AngleId::new("a2").unwrap()])
        .with_style(PostStyle::Listicle)
        .with_length(PostLength::Short);
    let outline = outlines.generate_outline(&request).await.unwrap();

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("- Privacy: Data stays local"));
    assert!(!prompts[0].contains("Latency"));
    assert!(prompts[0].contains("between 2 and 3 body sections"));
    assert!(prompts[0].contains("listicle"));

    let titles: Vec<_> = outline.body.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Privacy"]);
}
