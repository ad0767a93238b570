//! Positioned text primitives: tokens, lines, and sections.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A positioned fragment of text with font metadata, the unit produced by
/// text extraction. Immutable once produced; ordering is extraction order
/// (page, then reading order within the page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToken {
    /// Zero-based page index
    pub page: u32,
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline, PDF coordinates: larger = higher on page)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Height (font size)
    pub height: f32,
    /// Resolved font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Effective font size in points
    pub font_size: f32,
    /// Whether a line break follows this token in the content stream
    pub has_eol: bool,
}

impl TextToken {
    /// Whether the token's font appears to be bold.
    pub fn is_bold(&self) -> bool {
        let name = self.font_name.to_lowercase();
        name.contains("bold") || name.contains("black") || name.contains("heavy")
    }
}

/// A horizontally-ordered cluster of tokens sharing a vertical band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Zero-based page index
    pub page: u32,
    /// Tokens in this line, sorted by X position (stable on ties)
    pub tokens: Vec<TextToken>,
    /// Y position of the line (baseline of its first extracted token)
    pub y: f32,
    /// Dominant font size: mode of the token sizes, ties broken upward
    pub font_size: f32,
}

impl Line {
    /// Build a line from tokens in extraction order.
    ///
    /// Records the first token's baseline before sorting so line ordering
    /// stays tied to extraction order, then sorts tokens left-to-right.
    /// The sort is stable: x ties keep extraction order.
    pub fn from_tokens(mut tokens: Vec<TextToken>) -> Self {
        if tokens.is_empty() {
            return Self {
                page: 0,
                tokens,
                y: 0.0,
                font_size: 0.0,
            };
        }

        let page = tokens[0].page;
        let y = tokens[0].y;
        let font_size = dominant_font_size(&tokens);

        tokens.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            page,
            tokens,
            y,
            font_size,
        }
    }

    /// Combined text of all tokens with gap-based space insertion.
    ///
    /// A space is inserted between adjacent tokens when the horizontal gap
    /// between them exceeds 20% of the average character width of the
    /// following token.
    pub fn text(&self) -> String {
        if self.tokens.is_empty() {
            return String::new();
        }

        if self.tokens.len() == 1 {
            return self.tokens[0].text.clone();
        }

        let mut result = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i == 0 {
                result.push_str(&token.text);
                continue;
            }

            let prev = &self.tokens[i - 1];
            let gap = token.x - (prev.x + prev.width);

            let char_count = token.text.chars().count();
            let avg_char_width = if char_count > 0 && token.width > 0.0 {
                token.width / char_count as f32
            } else {
                token.font_size * 0.5
            };

            let prev_ends_with_space = prev.text.ends_with(' ') || prev.text.ends_with('\u{00A0}');
            let starts_with_space =
                token.text.starts_with(' ') || token.text.starts_with('\u{00A0}');

            if gap > avg_char_width * 0.2 && !prev_ends_with_space && !starts_with_space {
                result.push(' ');
            }
            result.push_str(&token.text);
        }

        result
    }

    /// Whether the line is predominantly bold (by character count).
    pub fn is_bold(&self) -> bool {
        let bold_chars: usize = self
            .tokens
            .iter()
            .filter(|t| t.is_bold())
            .map(|t| t.text.len())
            .sum();
        let total_chars: usize = self.tokens.iter().map(|t| t.text.len()).sum();
        total_chars > 0 && bold_chars as f32 / total_chars as f32 > 0.5
    }
}

/// Dominant font size over a token group: most frequent size at 0.1pt
/// precision, larger size winning frequency ties.
fn dominant_font_size(tokens: &[TextToken]) -> f32 {
    let mut histogram: HashMap<i32, usize> = HashMap::new();
    for token in tokens {
        let key = (token.font_size * 10.0) as i32;
        *histogram.entry(key).or_insert(0) += 1;
    }

    histogram
        .into_iter()
        .max_by_key(|&(key, count)| (count, key))
        .map(|(key, _)| key as f32 / 10.0)
        .unwrap_or(0.0)
}

/// Kind of a resume section. Closed set: field extraction dispatches with an
/// explicit match over these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Everything before the first detected heading (name, contact info)
    Header,
    /// Work history
    Experience,
    /// Academic background
    Education,
    /// Skill lists
    Skills,
    /// Personal or professional projects
    Projects,
    /// Unrecognized heading, retained verbatim
    Other,
}

/// A contiguous, kind-tagged run of lines.
///
/// Sections partition the full line sequence exactly: the header section's
/// lines plus each section's heading line and content lines reconstruct the
/// document in original order with no gaps or overlaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub kind: SectionKind,
    /// Heading text, empty for the implicit header section
    pub heading: String,
    /// The heading line itself, absent for the implicit header section
    pub heading_line: Option<Line>,
    /// Content lines after the heading, up to the next heading
    pub lines: Vec<Line>,
}

impl Section {
    /// Total number of lines this section accounts for, heading included.
    pub fn line_count(&self) -> usize {
        self.lines.len() + usize::from(self.heading_line.is_some())
    }
}
