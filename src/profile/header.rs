//! Contact extraction from the header section.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Line, Section, SectionKind};

pub(crate) struct Contact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

struct ContactPatterns {
    email: Regex,
    phone: Regex,
    location: Regex,
    year_range: Regex,
}

fn patterns() -> &'static ContactPatterns {
    static PATTERNS: OnceLock<ContactPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| ContactPatterns {
        email: Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}")
            .expect("email pattern"),
        // +1 (555) 123-4567, 555-123-4567, 555.123.4567, +44 20 7946 0958
        phone: Regex::new(r"\+?\d[\d\s().\-]{7,}\d").expect("phone pattern"),
        // "City, ST" or "City, Country" on a header line
        location: Regex::new(r"([A-Z][A-Za-z.\- ]+,\s*(?:[A-Z]{2}|[A-Z][A-Za-z]+))")
            .expect("location pattern"),
        // "2016 - 2019" has enough digits to look like a phone number
        year_range: Regex::new(r"^\s*(?:19|20)\d{2}\s*[-\u{2013}\u{2014}]?\s*(?:19|20)\d{2}\s*$")
            .expect("year-range pattern"),
    })
}

/// Extract name, email, phone, and location.
///
/// Email, phone, and location are taken from the first match anywhere in
/// the document (headers occasionally live in a footer). The name is the
/// largest-font header line that carries no contact match; when the header
/// section is missing or yields nothing, the first unrecognized-heading
/// text stands in.
pub(crate) fn extract_contact(sections: &[Section]) -> Contact {
    let patterns = patterns();

    let mut email = None;
    let mut phone = None;
    let mut location = None;

    for line in all_lines(sections) {
        let text = line.text();
        if email.is_none() {
            email = patterns.email.find(&text).map(|m| m.as_str().to_string());
        }
        if phone.is_none() {
            // Avoid swallowing the email's digits or a date range.
            let masked = patterns.email.replace_all(&text, " ");
            phone = patterns
                .phone
                .find(&masked)
                .filter(|m| digit_count(m.as_str()) >= 7)
                .filter(|m| !patterns.year_range.is_match(m.as_str()))
                .map(|m| m.as_str().trim().to_string());
        }
        if location.is_none() {
            location = patterns
                .location
                .captures(&text)
                .map(|c| c[1].trim().to_string());
        }
        if email.is_some() && phone.is_some() && location.is_some() {
            break;
        }
    }

    let name = extract_name(sections, patterns);

    Contact {
        name,
        email,
        phone,
        location,
    }
}

fn extract_name(sections: &[Section], patterns: &ContactPatterns) -> Option<String> {
    let header = sections
        .iter()
        .find(|s| s.kind == SectionKind::Header)
        .map(|s| s.lines.as_slice())
        .unwrap_or(&[]);

    let from_header = header
        .iter()
        .filter(|line| {
            let text = line.text();
            !patterns.email.is_match(&text)
                && !patterns.phone.is_match(&text)
                && looks_like_name(&text)
        })
        .max_by(|a, b| {
            a.font_size
                .partial_cmp(&b.font_size)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|line| line.text().trim().to_string());

    // An oversized name line can be taken for a heading, leaving the header
    // section empty; that heading's text is still the name.
    from_header.or_else(|| {
        sections
            .iter()
            .find(|s| s.kind == SectionKind::Other && looks_like_name(&s.heading))
            .map(|s| s.heading.trim().to_string())
    })
}

/// Plausible person name: 1-4 capitalized-ish words, no digits.
fn looks_like_name(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || text.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    (1..=4).contains(&words.len())
        && words.iter().all(|w| {
            w.chars()
                .next()
                .map(|c| c.is_uppercase())
                .unwrap_or(false)
        })
}

fn digit_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}

fn all_lines(sections: &[Section]) -> impl Iterator<Item = &Line> {
    sections
        .iter()
        .flat_map(|s| s.heading_line.iter().chain(s.lines.iter()))
}
