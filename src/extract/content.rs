//! Content-stream walking for a single page.
//!
//! Tracks the text matrix through the positioning operators and emits one
//! [`TextToken`] per text-showing operator, tagged with position, effective
//! font size, and resolved font name. Line-advance operators (`Td`/`TD` with
//! a vertical move, `Tm` to a new baseline, `T*`, `'`, `"`) close the
//! current line by marking the last emitted token.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Document as PdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::TextToken;

/// Soft hyphen + hyphen pair some generators emit after '-' at a line wrap.
const HYPHEN_ARTIFACT: &str = "-\u{00AD}\u{2010}";

/// Extract all text tokens from one page, in content-stream order.
///
/// The `page` field of the returned tokens is left at 0; the caller assigns
/// page indices after the per-page fan-out is joined. `tj_space_threshold`
/// is the TJ kerning adjustment (in 1/1000 text-space units) beyond which
/// the adjustment stands in for a word space.
pub(crate) fn extract_page_tokens(
    doc: &PdfDocument,
    page_id: ObjectId,
    tj_space_threshold: f32,
) -> Result<Vec<TextToken>> {
    let lopdf_fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| Error::DocumentParse(e.to_string()))?;

    // Resource name -> BaseFont name, for bold detection downstream.
    let mut base_fonts = HashMap::new();
    for (name, font) in &lopdf_fonts {
        let base = font
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        base_fonts.insert(name.clone(), base);
    }

    let content = page_content(doc, page_id)?;
    walk_content(doc, &content, &base_fonts, &lopdf_fonts, tj_space_threshold)
}

/// Collect the page's content stream bytes, following references and
/// concatenating stream arrays. A page without a `Contents` key is blank.
fn page_content(doc: &PdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::DocumentParse(e.to_string()))?;

    let contents = match page_dict.get(b"Contents") {
        Ok(obj) => obj,
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(r) => {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                return s
                    .decompressed_content()
                    .map_err(|e| Error::DocumentParse(e.to_string()));
            }
            Err(Error::DocumentParse("invalid content stream".to_string()))
        }
        Object::Array(arr) => {
            let mut content = Vec::new();
            for obj in arr {
                if let Object::Reference(r) = obj {
                    if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                        if let Ok(data) = s.decompressed_content() {
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
            }
            Ok(content)
        }
        _ => Err(Error::DocumentParse("invalid content stream".to_string())),
    }
}

fn walk_content(
    doc: &PdfDocument,
    content: &[u8],
    base_fonts: &HashMap<Vec<u8>, String>,
    lopdf_fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    tj_space_threshold: f32,
) -> Result<Vec<TextToken>> {
    let content = lopdf::content::Content::decode(content)
        .map_err(|e| Error::DocumentParse(e.to_string()))?;

    let mut tokens: Vec<TextToken> = Vec::new();
    let mut current_font = String::new();
    let mut current_font_name: Vec<u8> = Vec::new();
    let mut current_font_size: f32 = 12.0;
    let mut matrix = TextMatrix::default();
    let mut in_text_block = false;

    for op in content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                matrix = TextMatrix::default();
            }
            "ET" => {
                in_text_block = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(font_name) = &op.operands[0] {
                        current_font_name = font_name.clone();
                        current_font = base_fonts
                            .get(font_name.as_slice())
                            .cloned()
                            .unwrap_or_else(|| {
                                String::from_utf8_lossy(font_name.as_slice()).to_string()
                            });
                    }
                    current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                    if ty != 0.0 {
                        mark_eol(&mut tokens);
                    }
                    matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    let f = get_number(&op.operands[5]).unwrap_or(0.0);
                    if (f - matrix.f).abs() > f32::EPSILON && !tokens.is_empty() {
                        mark_eol(&mut tokens);
                    }
                    matrix.set(
                        get_number(&op.operands[0]).unwrap_or(1.0),
                        get_number(&op.operands[1]).unwrap_or(0.0),
                        get_number(&op.operands[2]).unwrap_or(0.0),
                        get_number(&op.operands[3]).unwrap_or(1.0),
                        get_number(&op.operands[4]).unwrap_or(0.0),
                        f,
                    );
                }
            }
            "T*" => {
                mark_eol(&mut tokens);
                matrix.next_line();
            }
            "Tj" | "TJ" => {
                if in_text_block {
                    let encoding = lopdf_fonts
                        .get(&current_font_name)
                        .and_then(|f| f.get_font_encoding(doc).ok());

                    let text = if op.operator == "TJ" {
                        decode_tj_array(op.operands.first(), encoding.as_ref(), tj_space_threshold)
                    } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                        decode_string(bytes, encoding.as_ref())
                    } else {
                        String::new()
                    };

                    push_token(
                        &mut tokens,
                        text,
                        &matrix,
                        current_font_size,
                        &current_font,
                    );
                }
            }
            "'" | "\"" => {
                mark_eol(&mut tokens);
                matrix.next_line();
                if in_text_block {
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let encoding = lopdf_fonts
                            .get(&current_font_name)
                            .and_then(|f| f.get_font_encoding(doc).ok());
                        let text = decode_string(bytes, encoding.as_ref());
                        push_token(
                            &mut tokens,
                            text,
                            &matrix,
                            current_font_size,
                            &current_font,
                        );
                    }
                }
            }
            _ => {}
        }
    }

    // The last line of the page never sees another line-advance operator.
    mark_eol(&mut tokens);

    Ok(tokens)
}

/// Decode a TJ operand array, turning kerning adjustments past the
/// configured threshold into word spaces.
fn decode_tj_array(
    operand: Option<&Object>,
    encoding: Option<&lopdf::Encoding>,
    space_threshold: f32,
) -> String {
    let Some(Object::Array(arr)) = operand else {
        return String::new();
    };

    let mut combined = String::new();
    for item in arr {
        match item {
            Object::String(bytes, _) => {
                combined.push_str(&decode_string(bytes, encoding));
            }
            Object::Integer(_) | Object::Real(_) => {
                // Negative adjustments advance the pen to the right.
                let adjustment = -get_number(item).unwrap_or(0.0);
                if adjustment > space_threshold
                    && !combined.is_empty()
                    && !combined.ends_with(' ')
                    && !combined.ends_with('\u{00A0}')
                {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }
    combined
}

fn decode_string(bytes: &[u8], encoding: Option<&lopdf::Encoding>) -> String {
    match encoding {
        Some(enc) => PdfDocument::decode_text(enc, bytes).unwrap_or_default(),
        None => decode_text_simple(bytes),
    }
}

fn push_token(
    tokens: &mut Vec<TextToken>,
    text: String,
    matrix: &TextMatrix,
    font_size: f32,
    font_name: &str,
) {
    let text = normalize_artifacts(&text);
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = matrix.position();
    let effective_size = font_size * matrix.scale();
    let width = text.chars().count() as f32 * effective_size * 0.5;
    tokens.push(TextToken {
        page: 0,
        text,
        x,
        y,
        width,
        height: effective_size,
        font_name: font_name.to_string(),
        font_size: effective_size,
        has_eol: false,
    });
}

fn mark_eol(tokens: &mut [TextToken]) {
    if let Some(last) = tokens.last_mut() {
        last.has_eol = true;
    }
}

/// Strip the soft-hyphen wrap artifact some generators leave after '-'.
fn normalize_artifacts(text: &str) -> String {
    if text.contains(HYPHEN_ARTIFACT) {
        text.replace(HYPHEN_ARTIFACT, "-")
    } else {
        text.to_string()
    }
}

/// Text matrix for tracking position in the content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading; a TL operator would refine this.
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Best-effort decoding when the font carries no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Latin-1 fallback
    bytes.iter().map(|&b| b as char).collect()
}
