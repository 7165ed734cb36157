//! Self-introduction style classification.

use devsignal_settings::Thresholds;
use devsignal_types::{IntroAnalysis, IntroState};

use crate::markdown::strip_markdown;

/// Analyze a raw self-introduction.
///
/// `None` means the subject has no introduction at all; an introduction made
/// only of whitespace or markup with no text and no images is `empty`.
pub fn analyze_intro(raw: Option<&str>, thresholds: &Thresholds) -> IntroAnalysis {
    let Some(raw) = raw else {
        return IntroAnalysis::default();
    };

    let stripped = strip_markdown(raw);
    let text_lines = stripped.plain_text.lines().count() as u64;
    let char_count = stripped.plain_text.chars().count() as u64;
    let state = classify(
        text_lines,
        char_count,
        stripped.image_count,
        thresholds,
    );
    let excerpt = excerpt(&stripped.plain_text, thresholds.excerpt_chars);

    IntroAnalysis {
        state,
        text_lines,
        char_count,
        image_count: stripped.image_count,
        image_alts: stripped.image_alts,
        plain_text: stripped.plain_text,
        excerpt,
    }
}

/// Style of a present introduction from its shape.
pub fn classify(
    text_lines: u64,
    char_count: u64,
    image_count: u64,
    thresholds: &Thresholds,
) -> IntroState {
    if text_lines == 0 && image_count == 0 {
        return IntroState::Empty;
    }
    if image_count > 0 && image_count >= text_lines {
        return IntroState::VisualDashboard;
    }
    if image_count == 0 {
        if text_lines <= 1 && char_count <= thresholds.one_liner_max_chars as u64 {
            return IntroState::OneLiner;
        }
        if text_lines >= 2 && char_count >= thresholds.short_bio_min_chars as u64 {
            return IntroState::ShortBio;
        }
    }
    IntroState::Mixed
}

/// First `limit` characters with line breaks folded into spaces.
fn excerpt(plain: &str, limit: usize) -> String {
    let folded = plain.split('\n').collect::<Vec<_>>().join(" ");
    folded.chars().take(limit).collect::<String>().trim_end().to_string()
}
