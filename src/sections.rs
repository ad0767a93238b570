//! Section segmentation: classify heading lines and partition the document.
//!
//! A line is a heading when its normalized text matches the section
//! vocabulary, or when its dominant font size exceeds the document median
//! by the configured ratio. Vocabulary wins: a vocabulary match fixes the
//! section kind even at body size, while a font-only heading keeps its text
//! but gets kind [`SectionKind::Other`].
//!
//! The output partitions the input exactly. Every line lands in exactly one
//! section (as a heading line or a content line) in original order.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::config::AnalyzeConfig;
use crate::model::{Line, Section, SectionKind};

/// Partition lines into sections.
///
/// Lines before the first heading form an implicit [`SectionKind::Header`]
/// section; when the document opens directly with a heading, no header
/// section is emitted.
pub fn segment(lines: Vec<Line>, config: &AnalyzeConfig) -> Vec<Section> {
    let vocabulary = build_vocabulary(config);
    let median = median_font_size(&lines);
    let threshold = median * config.heading_size_ratio;

    let mut sections: Vec<Section> = Vec::new();
    let mut header_lines: Vec<Line> = Vec::new();

    for line in lines {
        let kind = classify_heading(&line, &vocabulary, threshold, config.max_heading_words);

        match kind {
            Some(kind) => {
                if sections.is_empty() && !header_lines.is_empty() {
                    sections.push(Section {
                        kind: SectionKind::Header,
                        heading: String::new(),
                        heading_line: None,
                        lines: std::mem::take(&mut header_lines),
                    });
                }
                sections.push(Section {
                    kind,
                    heading: line.text(),
                    heading_line: Some(line),
                    lines: Vec::new(),
                });
            }
            None => match sections.last_mut() {
                Some(section) => section.lines.push(line),
                None => header_lines.push(line),
            },
        }
    }

    // No heading anywhere: the whole document is one header section.
    if sections.is_empty() && !header_lines.is_empty() {
        sections.push(Section {
            kind: SectionKind::Header,
            heading: String::new(),
            heading_line: None,
            lines: header_lines,
        });
    }

    log::debug!(
        "segmented into {} sections (median font size {:.1})",
        sections.len(),
        median
    );
    sections
}

fn classify_heading(
    line: &Line,
    vocabulary: &HashMap<String, SectionKind>,
    size_threshold: f32,
    max_heading_words: usize,
) -> Option<SectionKind> {
    let text = line.text();
    let normalized = normalize_heading(&text);
    if normalized.is_empty() {
        return None;
    }

    if let Some(&kind) = vocabulary.get(&normalized) {
        return Some(kind);
    }

    let word_count = normalized.split_whitespace().count();
    if size_threshold > 0.0 && line.font_size > size_threshold && word_count <= max_heading_words {
        return Some(SectionKind::Other);
    }

    None
}

/// Median of the dominant line font sizes; 0.0 for an empty document.
fn median_font_size(lines: &[Line]) -> f32 {
    if lines.is_empty() {
        return 0.0;
    }
    let mut sizes: Vec<f32> = lines.iter().map(|l| l.font_size).collect();
    sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sizes[sizes.len() / 2]
}

/// Normalize heading text for vocabulary lookup: NFKC fold, lowercase,
/// punctuation stripped, whitespace collapsed, and a trailing plural "s"
/// dropped so "SKILLS:" and "Skill" both normalize to "skill".
fn normalize_heading(text: &str) -> String {
    let folded: String = text
        .nfkc()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut normalized = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.ends_with('s') && normalized.len() > 1 {
        normalized.pop();
    }
    normalized
}

fn build_vocabulary(config: &AnalyzeConfig) -> HashMap<String, SectionKind> {
    config
        .section_vocabulary
        .iter()
        .map(|(name, kind)| (normalize_heading(name), *kind))
        .collect()
}
