//! Confidence heuristics and document metrics.
//!
//! Both confidence scores are hand-tuned additive heuristics. The weights are
//! fixed constants; changing them changes the scoring contract.

use crate::{BlogPostSection, Confidence, ContentAngle, OutlineDraft};

/// Words per minute used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

const BASE_CONFIDENCE: f64 = 0.5;

// ---------------------------------------------------------------------------
// Document metrics
// ---------------------------------------------------------------------------

/// Number of whitespace-separated tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `ceil(words / 200)`.
pub fn reading_time_minutes(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE)
}

// ---------------------------------------------------------------------------
// Outline confidence
// ---------------------------------------------------------------------------

/// Scores an outline against the angles it was generated from.
///
/// Starts at 0.5 and adds:
/// - 0.1 if the title is strictly between 20 and 80 characters,
/// - 0.1 if the introduction content exceeds 100 characters,
/// - 0.1 if there are at least three body sections,
/// - 0.1 if the conclusion content exceeds 100 characters,
/// - up to 0.2 for the fraction of angle keywords found in the outline text.
pub fn outline_confidence(draft: &OutlineDraft, angles: &[ContentAngle]) -> Confidence {
    let mut score = BASE_CONFIDENCE;

    let title_len = draft.title.chars().count();
    if title_len > 20 && title_len < 80 {
        score += 0.1;
    }
    if draft.introduction.content.chars().count() > 100 {
        score += 0.1;
    }
    if draft.body.len() >= 3 {
        score += 0.1;
    }
    if draft.conclusion.content.chars().count() > 100 {
        score += 0.1;
    }
    score += 0.2 * keyword_coverage(draft, angles);

    Confidence::clamped(score)
}

/// Fraction of angle keywords that occur in the outline text, in `[0, 1]`.
///
/// Returns `0.0` when the angles carry no keywords.
pub fn keyword_coverage(draft: &OutlineDraft, angles: &[ContentAngle]) -> f64 {
    let keywords: Vec<String> = angles.iter().flat_map(ContentAngle::keyword_list).collect();
    if keywords.is_empty() {
        return 0.0;
    }

    let text = outline_text(draft).to_lowercase();
    let found = keywords.iter().filter(|k| text.contains(k.as_str())).count();
    found as f64 / keywords.len() as f64
}

fn outline_text(draft: &OutlineDraft) -> String {
    let mut parts = vec![draft.title.as_str()];
    for (_, section) in draft.sections() {
        parts.push(&section.title);
        parts.push(&section.content);
        parts.extend(section.key_points.iter().map(String::as_str));
    }
    parts.join(" ")
}

// ---------------------------------------------------------------------------
// Blog post confidence
// ---------------------------------------------------------------------------

/// Scores a finished set of article sections.
///
/// Starts at 0.5 and adds:
/// - 0.2 if the sections hold more than 1000 words, else 0.1 above 500,
/// - 0.1 if there are at least three sections,
/// - 0.1 if any section carries key points,
/// - 0.1 if the outline had a title and at least one section was produced.
pub fn post_confidence(outline_title: &str, sections: &[BlogPostSection]) -> Confidence {
    let mut score = BASE_CONFIDENCE;

    let words: usize = sections.iter().map(BlogPostSection::word_count).sum();
    if words > 1000 {
        score += 0.2;
    } else if words > 500 {
        score += 0.1;
    }
    if sections.len() >= 3 {
        score += 0.1;
    }
    if sections.iter().any(|s| !s.key_points().is_empty()) {
        score += 0.1;
    }
    if !outline_title.trim().is_empty() && !sections.is_empty() {
        score += 0.1;
    }

    Confidence::clamped(score)
}
