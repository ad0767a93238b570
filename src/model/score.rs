//! Rubric score and the analysis result returned to callers.

use serde::{Deserialize, Serialize};

use super::ResumeProfile;

/// The five rubric sub-scores, each in [0, 20].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub contact_info: u8,
    pub structure: u8,
    pub experience: u8,
    pub keywords: u8,
    pub impact: u8,
}

impl ScoreBreakdown {
    /// Sum of the sub-scores; in [0, 100] by construction.
    pub fn total(&self) -> u8 {
        self.contact_info + self.structure + self.experience + self.keywords + self.impact
    }
}

/// The full rubric result: total, per-category breakdown, and feedback
/// messages in fixed category order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricScore {
    pub total_score: u8,
    pub breakdown: ScoreBreakdown,
    pub feedback: Vec<String>,
}

/// Everything one analysis call produces. Owned entirely by the caller
/// after return; the library keeps no reference to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub resume: ResumeProfile,
    pub score: RubricScore,
    /// Recognized skill terms found anywhere in the document,
    /// deduplicated in first-seen order
    pub keywords: Vec<String>,
    /// Keywords that also appear in the soft-skill vocabulary
    pub soft_skills: Vec<String>,
    /// Role labels ranked by keyword overlap, best first
    pub predicted_roles: Vec<String>,
}
