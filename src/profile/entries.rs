//! Entry segmentation for dated sections (experience, education, projects).
//!
//! Entries are anchored on date-marker lines. The one or two non-bullet
//! lines directly above a marker are the entry's title and organization;
//! lines below it, up to the next entry's title block, are its bullets.

use chrono::NaiveDate;
use regex::Regex;

use crate::model::{DateRange, Line};

/// Characters that open a bullet line.
const BULLET_PREFIXES: &[char] = &['-', '*', '\u{2022}', '\u{00B7}', '\u{25AA}', '\u{25E6}', '\u{2023}'];

/// How many lines above a date marker may belong to its title block.
const TITLE_BLOCK_LINES: usize = 2;

/// A section-agnostic parsed entry; callers map it onto the concrete
/// experience/education/project shapes.
#[derive(Debug, Default)]
pub(crate) struct RawEntry {
    pub title: Option<String>,
    pub organization: Option<String>,
    pub date_range: Option<DateRange>,
    pub bullets: Vec<String>,
}

/// Compiled date patterns, built once per analysis.
pub(crate) struct DateMatcher {
    /// "Jan 2020", "January 2020", "Sept. 2020", or a bare "2020"
    date_token: Regex,
    open_end: Regex,
}

impl DateMatcher {
    pub fn new() -> Self {
        Self {
            date_token: Regex::new(
                r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s*((?:19|20)\d{2})\b|\b((?:19|20)\d{2})\b",
            )
            .expect("date pattern"),
            open_end: Regex::new(r"(?i)\b(present|current|now|ongoing|today)\b")
                .expect("open-end pattern"),
        }
    }

    /// Parse the first date range found in a line of text.
    ///
    /// Two dates form a closed range; one date followed by an open-end word
    /// forms an open range; a lone date is a point-in-time range with no
    /// end. Open-end words without any date do not count.
    pub fn parse_range(&self, text: &str) -> Option<DateRange> {
        let mut dates: Vec<(usize, usize, NaiveDate)> = Vec::new();
        for caps in self.date_token.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            let Some(year) = caps
                .get(2)
                .or_else(|| caps.get(3))
                .and_then(|y| y.as_str().parse::<i32>().ok())
            else {
                continue;
            };
            let month = caps
                .get(1)
                .map(|m| month_number(m.as_str()))
                .unwrap_or(1);
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) {
                dates.push((m.start(), m.end(), date));
            }
        }

        let (first_start, mut raw_end, start_date) = *dates.first()?;

        let end_date = dates.get(1).map(|&(_, end, date)| {
            raw_end = raw_end.max(end);
            date
        });

        let open = if end_date.is_none() {
            self.open_end
                .find_at(text, raw_end)
                .map(|m| {
                    raw_end = m.end();
                    true
                })
                .unwrap_or(false)
        } else {
            false
        };

        Some(DateRange {
            raw: text[first_start..raw_end].to_string(),
            start: Some(start_date),
            end: end_date,
            open_ended: open,
        })
    }
}

fn month_number(name: &str) -> u32 {
    match name.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => 1,
    }
}

fn is_bullet_line(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .map(|c| BULLET_PREFIXES.contains(&c))
        .unwrap_or(false)
}

fn strip_bullet(text: &str) -> String {
    text.trim_start()
        .trim_start_matches(BULLET_PREFIXES)
        .trim()
        .to_string()
}

/// Split a section's content lines into entries anchored on date markers.
///
/// Without any marker the whole section is one entry led by its first line.
/// An open-ended range ("Present", "Current") only means an ongoing role in
/// a work-history context; elsewhere the flag is cleared.
pub(crate) fn split_entries(
    lines: &[Line],
    dates: &DateMatcher,
    allow_open_end: bool,
) -> Vec<RawEntry> {
    let texts: Vec<String> = lines.iter().map(|l| l.text()).collect();
    if texts.is_empty() {
        return Vec::new();
    }

    let markers: Vec<usize> = texts
        .iter()
        .enumerate()
        .filter(|(_, t)| !is_bullet_line(t) && dates.parse_range(t).is_some())
        .map(|(i, _)| i)
        .collect();

    if markers.is_empty() {
        return vec![entry_from_block(&texts, None)];
    }

    // Title block of each marker: up to TITLE_BLOCK_LINES non-bullet lines
    // directly above it, never reaching past the previous marker.
    let title_starts: Vec<usize> = markers
        .iter()
        .enumerate()
        .map(|(k, &idx)| {
            let floor = if k == 0 { 0 } else { markers[k - 1] + 1 };
            let mut start = idx;
            while start > floor && idx - start < TITLE_BLOCK_LINES && !is_bullet_line(&texts[start - 1])
            {
                start -= 1;
            }
            start
        })
        .collect();

    let mut entries = Vec::new();
    for (k, &marker_idx) in markers.iter().enumerate() {
        let title_start = title_starts[k];
        let body_end = title_starts.get(k + 1).copied().unwrap_or(texts.len());

        let mut range = dates.parse_range(&texts[marker_idx]);
        if !allow_open_end {
            if let Some(ref mut r) = range {
                r.open_ended = false;
            }
        }
        let mut entry = RawEntry {
            date_range: range.clone(),
            ..Default::default()
        };

        // Title and organization from the lines above the marker, falling
        // back to whatever the marker line carries besides the date.
        let mut heads: Vec<String> = texts[title_start..marker_idx].to_vec();
        if let Some(ref r) = range {
            let remainder = texts[marker_idx].replace(&r.raw, "");
            heads.extend(split_head_line(&remainder));
        }
        let mut heads = heads.into_iter().filter(|h| !h.trim().is_empty());
        entry.title = heads.next().map(|h| h.trim().to_string());
        entry.organization = heads.next().map(|h| h.trim().to_string());

        let mut bullets: Vec<String> = Vec::new();
        // Lines above the first title block still belong to the section;
        // they read as details of the first entry.
        if k == 0 {
            bullets.extend(
                texts[..title_start]
                    .iter()
                    .map(|t| strip_bullet(t))
                    .filter(|t| !t.is_empty()),
            );
        }
        bullets.extend(
            texts[marker_idx + 1..body_end]
                .iter()
                .map(|t| strip_bullet(t))
                .filter(|t| !t.is_empty()),
        );
        entry.bullets = bullets;

        entries.push(entry);
    }
    entries
}

/// Project sections often carry no dates; fall back to splitting on bold
/// or oversized sub-lines when no marker is found.
pub(crate) fn split_project_entries(lines: &[Line], dates: &DateMatcher) -> Vec<RawEntry> {
    let has_marker = lines
        .iter()
        .any(|l| !is_bullet_line(&l.text()) && dates.parse_range(&l.text()).is_some());
    if has_marker {
        return split_entries(lines, dates, false);
    }

    let mut sizes: Vec<f32> = lines.iter().map(|l| l.font_size).collect();
    sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = sizes.get(sizes.len() / 2).copied().unwrap_or(0.0);

    let is_name_line =
        |line: &Line| !is_bullet_line(&line.text()) && (line.is_bold() || line.font_size > median);

    let mut entries: Vec<RawEntry> = Vec::new();
    for line in lines {
        let text = line.text();
        if is_name_line(line) || entries.is_empty() {
            entries.push(RawEntry {
                title: Some(text.trim().to_string()),
                ..Default::default()
            });
        } else if let Some(entry) = entries.last_mut() {
            let detail = strip_bullet(&text);
            if !detail.is_empty() {
                entry.bullets.push(detail);
            }
        }
    }
    entries
}

fn entry_from_block(texts: &[String], range: Option<DateRange>) -> RawEntry {
    RawEntry {
        title: texts.first().map(|t| strip_bullet(t)),
        organization: None,
        date_range: range,
        bullets: texts[1..]
            .iter()
            .map(|t| strip_bullet(t))
            .filter(|t| !t.is_empty())
            .collect(),
    }
}

/// Split a title block line like "Senior Engineer, Acme Corp" or
/// "Senior Engineer | Acme Corp" into its parts.
fn split_head_line(text: &str) -> Vec<String> {
    text.split(['|', ',', '\u{2013}', '\u{2014}'])
        .map(|p| p.trim().trim_matches('-').trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
