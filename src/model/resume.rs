//! The structured resume record extracted from a document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A parsed date range from an entry's date-marker line.
///
/// Month resolution; days are pinned to the 1st. `open_ended` marks ranges
/// whose end reads "Present" or "Current".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// The matched text exactly as it appeared
    pub raw: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub open_ended: bool,
}

/// One job within the experience section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub organization: Option<String>,
    pub date_range: Option<DateRange>,
    pub bullets: Vec<String>,
}

/// One degree or program within the education section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub date_range: Option<DateRange>,
    pub details: Vec<String>,
}

/// One project within the projects section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: Option<String>,
    pub date_range: Option<DateRange>,
    pub details: Vec<String>,
}

/// The structured resume record. Every field is best-effort: extraction
/// misses degrade to `None` or an empty list, never to an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// Free-text skills as listed in the skills section (first-seen order)
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
}

impl ResumeProfile {
    /// Count of present contact fields among name, email, phone, location.
    pub fn contact_field_count(&self) -> usize {
        [&self.name, &self.email, &self.phone, &self.location]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }
}
