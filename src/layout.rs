//! Line building: cluster extracted tokens into visual lines.
//!
//! Tokens arrive in content-stream order. A line is closed by an explicit
//! end-of-line marker, a page change, or a token whose baseline leaves the
//! vertical band of the line's first token. Closed lines are then ordered
//! top-to-bottom per page, which is the reading order for single-column
//! documents.

use crate::config::AnalyzeConfig;
use crate::model::{Line, TextToken};

/// Group tokens into lines.
///
/// The vertical band is `line_tolerance` times the larger of the anchor
/// token's and the candidate token's font size, so a large heading does not
/// swallow the body line beneath it.
pub fn build_lines(tokens: Vec<TextToken>, config: &AnalyzeConfig) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<TextToken> = Vec::new();

    for token in tokens {
        let start_new = match current.first() {
            Some(anchor) => {
                let band = config.line_tolerance * anchor.font_size.max(token.font_size);
                token.page != anchor.page || (token.y - anchor.y).abs() > band
            }
            None => false,
        };

        if start_new {
            lines.push(Line::from_tokens(std::mem::take(&mut current)));
        }

        let closes_line = token.has_eol;
        current.push(token);
        if closes_line {
            lines.push(Line::from_tokens(std::mem::take(&mut current)));
        }
    }
    if !current.is_empty() {
        lines.push(Line::from_tokens(current));
    }

    lines.retain(|line| !line.text().trim().is_empty());

    // Stable: lines sharing a baseline keep their extraction order.
    lines.sort_by(|a, b| {
        a.page.cmp(&b.page).then(
            b.y.partial_cmp(&a.y)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });

    log::debug!("built {} lines", lines.len());
    lines
}
