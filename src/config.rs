//! Analysis configuration: every heuristic threshold and vocabulary in one
//! place, threaded into each pipeline stage.
//!
//! Collecting the knobs here keeps the extraction and scoring code free of
//! magic numbers and lets tests (and deployments) override behavior without
//! touching logic. The whole struct deserializes from JSON/TOML via serde;
//! `Default` ships a realistic software-industry table set.

use serde::{Deserialize, Serialize};

use crate::model::SectionKind;

/// One row of the role prediction table. Rows earlier in the table win
/// overlap-ratio ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfile {
    /// Role label returned to the caller
    pub name: String,
    /// Keywords expected for the role (matched against KeywordSet,
    /// case-insensitive)
    pub keywords: Vec<String>,
}

/// Per-category feedback rule: the message is emitted when the category's
/// sub-score falls below the threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRule {
    pub threshold: u8,
    pub message: String,
}

impl FeedbackRule {
    fn new(threshold: u8, message: &str) -> Self {
        Self {
            threshold,
            message: message.to_string(),
        }
    }
}

/// Feedback rules in fixed category order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub contact_info: FeedbackRule,
    pub structure: FeedbackRule,
    pub experience: FeedbackRule,
    pub keywords: FeedbackRule,
    pub impact: FeedbackRule,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            contact_info: FeedbackRule::new(
                16,
                "Add missing contact details; recruiters expect a name, email, phone number, and location.",
            ),
            structure: FeedbackRule::new(
                12,
                "Your resume is missing standard sections; include Experience, Education, and Skills headings.",
            ),
            experience: FeedbackRule::new(
                10,
                "Flesh out your work experience with dated entries and bullet points describing what you did.",
            ),
            keywords: FeedbackRule::new(
                10,
                "Add more role-relevant skills and technologies so applicant tracking systems can match you.",
            ),
            impact: FeedbackRule::new(
                8,
                "Quantify your achievements: start bullets with action verbs and include numbers or percentages.",
            ),
        }
    }
}

/// Weights and penalties used by the scoring engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Structure points lost per missing canonical section
    pub missing_section_penalty: u8,
    /// Structure points lost when line count leaves the expected band
    pub length_penalty: u8,
    /// Experience entries counted toward the entry-count component
    pub max_counted_entries: usize,
    /// Experience points per counted entry
    pub points_per_entry: u8,
    /// Experience points for an open-ended ("Present") entry
    pub recency_bonus: u8,
    /// Experience points available from bullet quality density
    pub density_points: u8,
    /// Impact points per qualifying bullet
    pub impact_points_per_bullet: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            missing_section_penalty: 4,
            length_penalty: 6,
            max_counted_entries: 4,
            points_per_entry: 3,
            recency_bonus: 3,
            density_points: 5,
            impact_points_per_bullet: 4,
        }
    }
}

/// All heuristic thresholds and dictionaries for one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Vertical clustering tolerance as a fraction of the dominant font
    /// height. 0.5 = tokens join a line when their baselines sit within
    /// half the font height.
    pub line_tolerance: f32,

    /// A line is a heading candidate when its dominant font size exceeds
    /// the document median by this ratio.
    pub heading_size_ratio: f32,

    /// Oversized lines longer than this many words are body text, not
    /// headings, so pull-quotes and large intro lines do not split the
    /// document.
    pub max_heading_words: usize,

    /// TJ kerning adjustment (in 1/1000 text-space units) beyond which the
    /// adjustment reads as a word space.
    pub tj_space_threshold: f32,

    /// Synonym → section kind table for heading classification. Entries are
    /// normalized (case-folded, punctuation-stripped, trailing "s" dropped)
    /// before matching, so "WORK HISTORY" and "work history" both hit.
    pub section_vocabulary: Vec<(String, SectionKind)>,

    /// Skill dictionary populating KeywordSet (canonical casing preserved
    /// in output).
    pub skills: Vec<String>,

    /// Soft-skill vocabulary; KeywordSet members found here populate
    /// SoftSkillSet.
    pub soft_skills: Vec<String>,

    /// Action verbs recognized at the start of achievement bullets.
    pub action_verbs: Vec<String>,

    /// Role prediction table, priority order.
    pub roles: Vec<RoleProfile>,

    /// Keyword-count baseline used when the role table is empty.
    pub expected_skill_baseline: usize,

    /// Minimum overlap ratio for a role to be predicted.
    pub role_min_overlap: f32,

    /// Maximum number of predicted roles returned.
    pub max_roles: usize,

    /// Expected document length band (total lines, inclusive).
    pub length_band: (usize, usize),

    pub scoring: ScoringWeights,
    pub feedback: FeedbackConfig,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            line_tolerance: 0.5,
            heading_size_ratio: 1.2,
            max_heading_words: 6,
            tj_space_threshold: 200.0,
            section_vocabulary: default_section_vocabulary(),
            skills: to_strings(DEFAULT_SKILLS),
            soft_skills: to_strings(DEFAULT_SOFT_SKILLS),
            action_verbs: to_strings(DEFAULT_ACTION_VERBS),
            roles: default_roles(),
            expected_skill_baseline: 10,
            role_min_overlap: 0.25,
            max_roles: 3,
            length_band: (12, 160),
            scoring: ScoringWeights::default(),
            feedback: FeedbackConfig::default(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_section_vocabulary() -> Vec<(String, SectionKind)> {
    use SectionKind::*;
    let table: &[(&str, SectionKind)] = &[
        ("experience", Experience),
        ("work experience", Experience),
        ("work history", Experience),
        ("employment", Experience),
        ("employment history", Experience),
        ("professional experience", Experience),
        ("career history", Experience),
        ("internships", Experience),
        ("education", Education),
        ("academic background", Education),
        ("academics", Education),
        ("degrees", Education),
        ("skills", Skills),
        ("technical skills", Skills),
        ("technologies", Skills),
        ("tech stack", Skills),
        ("core competencies", Skills),
        ("projects", Projects),
        ("personal projects", Projects),
        ("selected projects", Projects),
        ("portfolio", Projects),
    ];
    table
        .iter()
        .map(|(name, kind)| (name.to_string(), *kind))
        .collect()
}

const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "rust",
    "go",
    "c",
    "sql",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "node.js",
    "django",
    "flask",
    "spring",
    "kubernetes",
    "docker",
    "aws",
    "azure",
    "gcp",
    "terraform",
    "git",
    "linux",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "kafka",
    "graphql",
    "rest",
    "machine learning",
    "deep learning",
    "data analysis",
    "pandas",
    "numpy",
    "tensorflow",
    "pytorch",
    "excel",
    "tableau",
    "communication",
    "leadership",
    "teamwork",
    "problem solving",
    "collaboration",
    "mentoring",
    "project management",
    "time management",
    "adaptability",
];

const DEFAULT_SOFT_SKILLS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "problem solving",
    "collaboration",
    "mentoring",
    "project management",
    "time management",
    "adaptability",
];

const DEFAULT_ACTION_VERBS: &[&str] = &[
    "achieved",
    "analyzed",
    "architected",
    "automated",
    "built",
    "created",
    "delivered",
    "designed",
    "developed",
    "drove",
    "implemented",
    "improved",
    "increased",
    "launched",
    "led",
    "managed",
    "mentored",
    "migrated",
    "optimized",
    "owned",
    "reduced",
    "scaled",
    "shipped",
    "streamlined",
];

fn default_roles() -> Vec<RoleProfile> {
    let table: &[(&str, &[&str])] = &[
        (
            "Backend Engineer",
            &[
                "python",
                "java",
                "go",
                "sql",
                "docker",
                "kubernetes",
                "aws",
                "rest",
                "postgresql",
                "redis",
            ],
        ),
        (
            "Frontend Engineer",
            &[
                "javascript",
                "typescript",
                "react",
                "html",
                "css",
                "vue",
                "angular",
            ],
        ),
        (
            "Full Stack Engineer",
            &[
                "javascript",
                "react",
                "node.js",
                "sql",
                "html",
                "css",
                "aws",
            ],
        ),
        (
            "Data Scientist",
            &[
                "python",
                "machine learning",
                "pandas",
                "numpy",
                "tensorflow",
                "pytorch",
                "sql",
                "data analysis",
            ],
        ),
        (
            "DevOps Engineer",
            &[
                "docker",
                "kubernetes",
                "aws",
                "terraform",
                "linux",
                "git",
                "azure",
            ],
        ),
        (
            "Data Analyst",
            &["sql", "excel", "tableau", "python", "data analysis"],
        ),
    ];
    table
        .iter()
        .map(|(name, keywords)| RoleProfile {
            name: name.to_string(),
            keywords: to_strings(keywords),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_nonempty() {
        let config = AnalyzeConfig::default();
        assert!(!config.section_vocabulary.is_empty());
        assert!(!config.skills.is_empty());
        assert!(!config.roles.is_empty());
        assert!(config.line_tolerance > 0.0);
        assert!(config.heading_size_ratio > 1.0);
    }

    #[test]
    fn test_soft_skills_are_subset_of_skills() {
        // SoftSkillSet is defined as a subset of KeywordSet, so every
        // soft-skill term must be recognizable by the skill dictionary.
        let config = AnalyzeConfig::default();
        for soft in &config.soft_skills {
            assert!(
                config.skills.iter().any(|s| s == soft),
                "soft skill {soft:?} missing from skill dictionary"
            );
        }
    }

    #[test]
    fn test_config_deserializes_with_partial_override() {
        let json = r#"{ "heading_size_ratio": 1.5, "max_roles": 1 }"#;
        let config: AnalyzeConfig = serde_json::from_str(json).unwrap();
        assert!((config.heading_size_ratio - 1.5).abs() < f32::EPSILON);
        assert_eq!(config.max_roles, 1);
        // untouched fields keep defaults
        assert_eq!(config.expected_skill_baseline, 10);
    }
}
