//! Prompt construction for the outline and article stages.

use std::fmt::Write as _;

use crate::{ContentAngle, OutlineSection, PostLength, PostStyle, SectionRole, Tone, Topic};

fn style_guidance(style: PostStyle) -> &'static str {
    match style {
        PostStyle::Standard => {
            "a standard article: an engaging introduction, clearly themed body sections, \
             and a conclusion"
        }
        PostStyle::DeepDive => {
            "a deep-dive: fewer body sections, each exploring one idea in depth with \
             evidence and nuance"
        }
        PostStyle::Listicle => {
            "a listicle: each body section is one numbered, self-contained item with a punchy title"
        }
        PostStyle::HowTo => {
            "a how-to guide: body sections are sequential, actionable steps the reader can follow"
        }
    }
}

/// Builds the outline prompt for `topic`, whose angles have already been
/// filtered to the requested subset.
pub fn outline_prompt(topic: &Topic, style: PostStyle, length: PostLength) -> String {
    let (min_sections, max_sections) = length.body_sections();
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are an experienced editor planning a long-form blog post."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Topic: {}", topic.name);
    if !topic.description.trim().is_empty() {
        let _ = writeln!(prompt, "Description: {}", topic.description.trim());
    }

    if !topic.angles.is_empty() {
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "Content angles to cover:");
        for angle in &topic.angles {
            let _ = writeln!(prompt, "{}", angle_bullet(angle));
        }
    }

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Structure the post as {}.", style_guidance(style));
    let _ = writeln!(
        prompt,
        "Target length is {length}: plan between {min_sections} and {max_sections} body sections."
    );
    let _ = writeln!(
        prompt,
        "Each section needs a title, a description of what it should cover, \
         and a list of key points."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Respond with a single JSON object and nothing else, using exactly this shape:"
    );
    prompt.push_str(OUTLINE_SHAPE);
    prompt
}

fn angle_bullet(angle: &ContentAngle) -> String {
    if angle.description.trim().is_empty() {
        format!("- {}", angle.title)
    } else {
        format!("- {}: {}", angle.title, angle.description.trim())
    }
}

const OUTLINE_SHAPE: &str = r#"{
  "title": "Post title",
  "introduction": {
    "title": "Introduction",
    "content": "What the introduction covers",
    "keyPoints": ["..."]
  },
  "body": [
    { "title": "Section title", "content": "What this section covers", "keyPoints": ["..."] }
  ],
  "conclusion": {
    "title": "Conclusion",
    "content": "What the conclusion covers",
    "keyPoints": ["..."]
  }
}
"#;

// ---------------------------------------------------------------------------

/// Options shared by every section prompt of one article.
#[derive(Debug, Clone, Copy)]
pub struct SectionPromptOptions<'a> {
    pub post_title: &'a str,
    pub style: PostStyle,
    pub length: PostLength,
    pub tone: Tone,
}

fn role_instruction(role: SectionRole) -> &'static str {
    match role {
        SectionRole::Introduction => {
            "Write the introduction. Open with a hook that earns the reader's attention, \
             give the context they need, and preview what the article will cover."
        }
        SectionRole::Body => {
            "Write this body section. Provide substantive analysis supported by concrete \
             examples, and keep the focus on this section's subject."
        }
        SectionRole::Conclusion => {
            "Write the conclusion. Summarise the main points of the article and leave the \
             reader with a final insight or call to action."
        }
    }
}

/// Builds the prompt for one article section.
pub fn section_prompt(
    role: SectionRole,
    section: &OutlineSection,
    options: SectionPromptOptions<'_>,
) -> String {
    let (min_words, max_words) = options.length.section_words();
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are writing one section of the blog post \"{}\".",
        options.post_title
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Section title: {}", section.title);
    if !section.content.trim().is_empty() {
        let _ = writeln!(prompt, "Section brief: {}", section.content.trim());
    }
    if !section.key_points.is_empty() {
        let _ = writeln!(prompt, "Key points to cover:");
        for point in &section.key_points {
            let _ = writeln!(prompt, "- {point}");
        }
    }
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "{}", role_instruction(role));
    let _ = writeln!(
        prompt,
        "Style: {}. Tone: {}. Length: about {min_words}-{max_words} words.",
        options.style, options.tone
    );
    let _ = writeln!(
        prompt,
        "Return only the section prose in Markdown paragraphs, without repeating the \
         section title as a heading."
    );
    prompt
}
