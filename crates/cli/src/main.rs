//! Scribe CLI entry point.
//!
//! This binary is the composition root for the whole workspace:
//!
//! 1. **Parse configuration**: load `scribe.toml` (optional) and apply
//!    `SCRIBE_*` environment overrides.
//! 2. **Wire observability**: install a `tracing-subscriber` with an
//!    `EnvFilter`, text or JSON formatting, and an optional OpenTelemetry OTLP
//!    layer. Every span and event emitted by the workspace flows through it.
//! 3. **Construct infrastructure**: an [`llm::OllamaClient`] and a
//!    [`store::FileContentStore`], injected into a [`pipeline::ContentWorkflow`].
//! 4. **Dispatch the subcommand**, bounding each generation run with the
//!    configured pipeline timeout.

mod config;
mod telemetry;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use llm::OllamaClient;
use pipeline::{
    validate_blog_post, validate_outline, AngleId, BlogPostRequest, ContentId, ContentKind,
    ContentRecord, ContentStore, ContentWorkflow, OutlineRequest, PostLength, PostStyle,
    TextGenerator, Tone, Topic, TopicId, ValidationReport,
};
use store::FileContentStore;
use tracing::info;

use crate::config::CliConfig;

#[derive(Debug, Parser)]
#[command(
    name = "scribe",
    version,
    about = "Generate blog outlines and articles with a local language model"
)]
struct Cli {
    /// Path to the TOML config file [default: scribe.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print generated content as JSON instead of a summary.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import topics from a JSON array file, replacing topics with the same id.
    ImportTopics { file: PathBuf },

    /// List stored topics and their angles.
    Topics,

    /// Generate and store an outline for a topic.
    Outline {
        #[arg(long)]
        topic: TopicId,

        /// Restrict the outline to these angles; repeat for several. All
        /// angles are used when omitted.
        #[arg(long = "angle")]
        angles: Vec<AngleId>,

        #[arg(long, default_value_t)]
        style: PostStyle,

        #[arg(long, default_value_t)]
        length: PostLength,
    },

    /// Write and store a blog post from a stored outline.
    Article {
        #[arg(long)]
        outline: ContentId,

        #[arg(long, default_value_t)]
        style: PostStyle,

        #[arg(long, default_value_t)]
        length: PostLength,

        #[arg(long, default_value_t)]
        tone: Tone,
    },

    /// Show a stored content record.
    Show { id: ContentId },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?
        .with_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;

    let telemetry = telemetry::init(&config.telemetry)?;
    let result = run(cli, config).await;
    telemetry.shutdown();
    result
}

async fn run(cli: Cli, config: CliConfig) -> anyhow::Result<()> {
    let store = Arc::new(
        FileContentStore::open(&config.store.path)
            .await
            .with_context(|| format!("failed to open store {}", config.store.path.display()))?,
    );

    match cli.command {
        Command::ImportTopics { file } => import_topics(&store, &file).await,
        Command::Topics => {
            list_topics(&store.list_topics().await, cli.json)?;
            Ok(())
        }
        Command::Outline {
            topic,
            angles,
            style,
            length,
        } => {
            let mut request = OutlineRequest::new(topic).with_style(style).with_length(length);
            if !angles.is_empty() {
                request = request.with_angles(angles);
            }
            let workflow = workflow(&config, store)?;
            let (id, outline) =
                tokio::time::timeout(config.pipeline.timeout(), workflow.create_outline(&request))
                    .await
                    .map_err(|_| timed_out("outline", &config))??;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outline)?);
                return Ok(());
            }
            println!("Outline {id}: {}", outline.title);
            println!("  confidence: {}", outline.metadata.confidence);
            if outline.metadata.used_fallback {
                println!("  generated from fallback template");
            }
            print_report(&validate_outline(&outline));
            Ok(())
        }
        Command::Article {
            outline,
            style,
            length,
            tone,
        } => {
            let request = BlogPostRequest::new(outline)
                .with_style(style)
                .with_length(length)
                .with_tone(tone);
            let workflow = workflow(&config, store)?;
            let (id, post) =
                tokio::time::timeout(config.pipeline.timeout(), workflow.create_blog_post(&request))
                    .await
                    .map_err(|_| timed_out("article", &config))??;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&post)?);
                return Ok(());
            }
            println!("Blog post {id}: {}", post.title());
            println!("  confidence: {}", post.metadata().confidence);
            println!(
                "  {} words, {} min read",
                post.word_count(),
                post.reading_time_minutes()
            );
            if post.metadata().fallback_sections > 0 {
                println!(
                    "  {} section(s) used fallback prose",
                    post.metadata().fallback_sections
                );
            }
            print_report(&validate_blog_post(&post));
            Ok(())
        }
        Command::Show { id } => {
            let record = store
                .get_content(id)
                .await
                .ok_or_else(|| anyhow!("content not found: {id}"))?;
            show_record(&record, cli.json)?;
            Ok(())
        }
    }
}

fn timed_out(stage: &str, config: &CliConfig) -> anyhow::Error {
    anyhow!("{stage} generation timed out after {}s", config.pipeline.timeout_secs)
}

fn workflow(config: &CliConfig, store: Arc<FileContentStore>) -> anyhow::Result<ContentWorkflow> {
    let client = OllamaClient::new(config.model.to_ollama_config())
        .context("invalid model configuration")?;
    info!(model = %client.model_name(), base_url = client.base_url(), "using Ollama model");

    let client: Arc<dyn TextGenerator> = Arc::new(client);
    let store: Arc<dyn ContentStore> = store;
    Ok(ContentWorkflow::new(client, store))
}

async fn import_topics(store: &FileContentStore, file: &Path) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let topics: Vec<Topic> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of topics", file.display()))?;

    let count = store.import_topics(topics).await?;
    info!(count, path = %store.path().display(), "topics imported");
    println!("Imported {count} topic(s)");
    Ok(())
}

fn list_topics(topics: &[Topic], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(topics)?);
        return Ok(());
    }
    if topics.is_empty() {
        println!("No topics. Add some with `scribe import-topics <file>`.");
    }
    for topic in topics {
        println!("{}  {}", topic.id, topic.name);
        for angle in &topic.angles {
            println!("    {}  {}", angle.id, angle.title);
        }
    }
    Ok(())
}

fn show_record(record: &ContentRecord, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    let content = &record.content;
    println!("{} {}: {}", content.kind, record.id, content.title);
    println!("  created:    {}", record.created_at);
    println!("  model:      {}", content.model);
    println!("  confidence: {}", content.confidence);
    if let Some(outline_id) = content.source_outline_id {
        println!("  outline:    {outline_id}");
    }
    println!();

    match content.kind {
        ContentKind::Outline => match &content.outline_json {
            Some(raw) => {
                let value: serde_json::Value =
                    serde_json::from_str(raw).context("stored outline is not valid JSON")?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            None => println!("(no outline body stored)"),
        },
        ContentKind::BlogPost => {
            println!("{}", content.body.as_deref().unwrap_or("(no body stored)"))
        }
    }
    Ok(())
}

fn print_report(report: &ValidationReport) {
    if report.is_valid() {
        println!("  validation: ok");
        return;
    }
    println!("  validation issues:");
    for issue in &report.issues {
        println!("    - {issue}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_arguments_parse_into_typed_values() {
        let cli = Cli::try_parse_from([
            "scribe", "outline", "--topic", "t1", "--angle", "a1", "--angle", "a2", "--style",
            "how-to",
        ])
        .unwrap();

        match cli.command {
            Command::Outline {
                topic,
                angles,
                style,
                length,
            } => {
                assert_eq!(topic.as_str(), "t1");
                assert_eq!(angles.len(), 2);
                assert_eq!(style, PostStyle::HowTo);
                assert_eq!(length, PostLength::default());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_article_rejects_non_uuid_outline_id() {
        let result = Cli::try_parse_from(["scribe", "article", "--outline", "not-a-uuid"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_article_defaults_and_global_flags() {
        let id = ContentId::new_random();
        let cli = Cli::try_parse_from([
            "scribe",
            "article",
            "--outline",
            &id.to_string(),
            "--tone",
            "casual",
            "--json",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.config.as_deref(), Some(Path::new("custom.toml")));
        match cli.command {
            Command::Article { outline, tone, .. } => {
                assert_eq!(outline, id);
                assert_eq!(tone, Tone::Casual);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let result = Cli::try_parse_from(["scribe", "outline", "--topic", "t1", "--style", "poem"]);
        assert!(result.is_err());
    }
}
