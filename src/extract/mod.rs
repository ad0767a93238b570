//! Text extraction: PDF bytes to an ordered sequence of positioned tokens.
//!
//! Pages are independent, so extraction can fan out across them; the
//! per-page results are re-joined in page order before anything downstream
//! runs, so parallel completion order never leaks into output ordering.

mod content;

use lopdf::{Document as PdfDocument, ObjectId};
use rayon::prelude::*;

use crate::config::AnalyzeConfig;
use crate::model::TextToken;
use crate::options::AnalyzeOptions;

/// Extract all text tokens from a decoded document, in (page, reading)
/// order. Pages whose content streams cannot be decoded are skipped with a
/// warning rather than failing the whole document.
pub fn extract_tokens(
    doc: &PdfDocument,
    options: &AnalyzeOptions,
    config: &AnalyzeConfig,
) -> Vec<TextToken> {
    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();

    let mut per_page: Vec<(u32, Vec<TextToken>)> = if options.parallel {
        pages
            .par_iter()
            .map(|&(num, id)| (num, page_tokens(doc, num, id, config)))
            .collect()
    } else {
        pages
            .iter()
            .map(|&(num, id)| (num, page_tokens(doc, num, id, config)))
            .collect()
    };

    // Deterministic total order regardless of completion order.
    per_page.sort_by_key(|&(num, _)| num);

    let mut tokens = Vec::new();
    for (num, mut page) in per_page {
        let page_index = num.saturating_sub(1);
        for token in &mut page {
            token.page = page_index;
        }
        tokens.extend(page);
    }

    log::debug!("extracted {} tokens from {} pages", tokens.len(), pages.len());
    tokens
}

fn page_tokens(
    doc: &PdfDocument,
    page_num: u32,
    page_id: ObjectId,
    config: &AnalyzeConfig,
) -> Vec<TextToken> {
    match content::extract_page_tokens(doc, page_id, config.tj_space_threshold) {
        Ok(tokens) => tokens,
        Err(e) => {
            log::warn!("failed to extract text from page {page_num}: {e}");
            Vec::new()
        }
    }
}
