//! Rubric scoring: five bounded sub-scores, feedback, and role prediction.
//!
//! Every sub-score is clamped to [0, 20] before it enters the total, so the
//! total is in [0, 100] no matter what extraction produced. Scoring is pure
//! over its inputs: the same profile, sections, and keywords always yield
//! the same score.

use std::collections::HashSet;

use crate::config::AnalyzeConfig;
use crate::model::{
    ResumeProfile, RubricScore, ScoreBreakdown, Section, SectionKind,
};

const CATEGORY_MAX: u8 = 20;
const POINTS_PER_CONTACT_FIELD: u8 = 5;

/// Document-shape facts the structure sub-score works from.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureStats {
    pub has_experience: bool,
    pub has_education: bool,
    pub has_skills: bool,
    /// Total lines across all sections, headings included
    pub total_lines: usize,
}

impl StructureStats {
    pub fn from_sections(sections: &[Section]) -> Self {
        Self {
            has_experience: sections.iter().any(|s| s.kind == SectionKind::Experience),
            has_education: sections.iter().any(|s| s.kind == SectionKind::Education),
            has_skills: sections.iter().any(|s| s.kind == SectionKind::Skills),
            total_lines: sections.iter().map(|s| s.line_count()).sum(),
        }
    }
}

/// Compute the full rubric score.
pub fn score_resume(
    profile: &ResumeProfile,
    stats: &StructureStats,
    keywords: &[String],
    config: &AnalyzeConfig,
) -> RubricScore {
    let breakdown = ScoreBreakdown {
        contact_info: score_contact(profile),
        structure: score_structure(stats, config),
        experience: score_experience(profile, config),
        keywords: score_keywords(keywords, config),
        impact: score_impact(profile, config),
    };

    RubricScore {
        total_score: breakdown.total(),
        feedback: build_feedback(&breakdown, config),
        breakdown,
    }
}

fn score_contact(profile: &ResumeProfile) -> u8 {
    (profile.contact_field_count() as u8 * POINTS_PER_CONTACT_FIELD).min(CATEGORY_MAX)
}

fn score_structure(stats: &StructureStats, config: &AnalyzeConfig) -> u8 {
    let weights = &config.scoring;
    let missing = [stats.has_experience, stats.has_education, stats.has_skills]
        .iter()
        .filter(|present| !**present)
        .count() as u8;

    let mut score =
        CATEGORY_MAX.saturating_sub(missing.saturating_mul(weights.missing_section_penalty));

    let (min_lines, max_lines) = config.length_band;
    if stats.total_lines < min_lines || stats.total_lines > max_lines {
        score = score.saturating_sub(weights.length_penalty);
    }
    score
}

fn score_experience(profile: &ResumeProfile, config: &AnalyzeConfig) -> u8 {
    let weights = &config.scoring;
    let entries = &profile.experience;
    if entries.is_empty() {
        return 0;
    }

    let counted = entries.len().min(weights.max_counted_entries);
    let mut score = counted * weights.points_per_entry as usize;

    let has_current_role = entries.iter().any(|e| {
        e.date_range
            .as_ref()
            .map(|r| r.open_ended)
            .unwrap_or(false)
    });
    if has_current_role {
        score += weights.recency_bonus as usize;
    }

    // Bullet quality density: share of bullets that open with an action
    // verb or cite a number.
    let verbs = action_verb_set(config);
    let bullets: Vec<&String> = entries.iter().flat_map(|e| e.bullets.iter()).collect();
    if !bullets.is_empty() {
        let quality = bullets
            .iter()
            .filter(|b| is_quality_bullet(b, &verbs))
            .count();
        let density = quality as f32 / bullets.len() as f32;
        score += (density * weights.density_points as f32).round() as usize;
    }

    score.min(CATEGORY_MAX as usize) as u8
}

fn score_keywords(keywords: &[String], config: &AnalyzeConfig) -> u8 {
    let ratio = if config.roles.is_empty() {
        let baseline = config.expected_skill_baseline.max(1);
        keywords.len().min(baseline) as f32 / baseline as f32
    } else {
        let found = lowercase_set(keywords);
        config
            .roles
            .iter()
            .map(|role| overlap_ratio(&found, &role.keywords))
            .fold(0.0_f32, f32::max)
    };
    ((ratio * CATEGORY_MAX as f32).round() as u8).min(CATEGORY_MAX)
}

fn score_impact(profile: &ResumeProfile, config: &AnalyzeConfig) -> u8 {
    let verbs = action_verb_set(config);

    let experience_bullets = profile.experience.iter().flat_map(|e| e.bullets.iter());
    let project_details = profile.projects.iter().flat_map(|e| e.details.iter());

    let qualifying = experience_bullets
        .chain(project_details)
        .filter(|b| is_impact_bullet(b, &verbs))
        .count();

    (qualifying * config.scoring.impact_points_per_bullet as usize).min(CATEGORY_MAX as usize)
        as u8
}

fn action_verb_set(config: &AnalyzeConfig) -> HashSet<String> {
    config
        .action_verbs
        .iter()
        .map(|v| v.to_lowercase())
        .collect()
}

fn opens_with_action_verb(bullet: &str, verbs: &HashSet<String>) -> bool {
    bullet
        .split_whitespace()
        .next()
        .map(|w| verbs.contains(&w.to_lowercase()))
        .unwrap_or(false)
}

fn cites_metric(bullet: &str) -> bool {
    bullet.chars().any(|c| c.is_ascii_digit()) || bullet.contains('%')
}

/// A bullet carries substance when it opens with an action verb or cites a
/// number.
fn is_quality_bullet(bullet: &str, verbs: &HashSet<String>) -> bool {
    opens_with_action_verb(bullet, verbs) || cites_metric(bullet)
}

/// An impact bullet both opens with an action verb and quantifies its
/// outcome.
fn is_impact_bullet(bullet: &str, verbs: &HashSet<String>) -> bool {
    opens_with_action_verb(bullet, verbs) && cites_metric(bullet)
}

/// Rank role labels by keyword overlap, best first. Ties keep role-table
/// order; roles under the overlap floor are dropped.
pub fn predict_roles(keywords: &[String], config: &AnalyzeConfig) -> Vec<String> {
    let found = lowercase_set(keywords);

    let mut ranked: Vec<(f32, &str)> = config
        .roles
        .iter()
        .map(|role| (overlap_ratio(&found, &role.keywords), role.name.as_str()))
        .filter(|&(ratio, _)| ratio >= config.role_min_overlap && ratio > 0.0)
        .collect();

    // Stable: equal ratios keep table order.
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(config.max_roles);
    ranked.into_iter().map(|(_, name)| name.to_string()).collect()
}

fn overlap_ratio(found: &HashSet<String>, role_keywords: &[String]) -> f32 {
    if role_keywords.is_empty() {
        return 0.0;
    }
    let hits = role_keywords
        .iter()
        .filter(|k| found.contains(&k.to_lowercase()))
        .count();
    hits as f32 / role_keywords.len() as f32
}

fn lowercase_set(keywords: &[String]) -> HashSet<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

/// Feedback messages in fixed category order, one per sub-score below its
/// configured threshold.
fn build_feedback(breakdown: &ScoreBreakdown, config: &AnalyzeConfig) -> Vec<String> {
    let rules = &config.feedback;
    let checks = [
        (breakdown.contact_info, &rules.contact_info),
        (breakdown.structure, &rules.structure),
        (breakdown.experience, &rules.experience),
        (breakdown.keywords, &rules.keywords),
        (breakdown.impact, &rules.impact),
    ];

    checks
        .iter()
        .filter(|(score, rule)| *score < rule.threshold)
        .map(|(_, rule)| rule.message.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DateRange, ExperienceEntry};

    fn strong_profile() -> ResumeProfile {
        let entry = |open: bool| ExperienceEntry {
            title: Some("Engineer".to_string()),
            organization: Some("Acme".to_string()),
            date_range: Some(DateRange {
                raw: "2020 - Present".to_string(),
                start: chrono::NaiveDate::from_ymd_opt(2020, 1, 1),
                end: None,
                open_ended: open,
            }),
            bullets: vec![
                "Reduced latency by 40%".to_string(),
                "Led a team of 5".to_string(),
            ],
        };
        ResumeProfile {
            name: Some("Jane Roe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: Some("555-123-4567".to_string()),
            location: Some("Austin, TX".to_string()),
            experience: vec![entry(true), entry(false), entry(false), entry(false)],
            ..Default::default()
        }
    }

    fn full_stats() -> StructureStats {
        StructureStats {
            has_experience: true,
            has_education: true,
            has_skills: true,
            total_lines: 40,
        }
    }

    #[test]
    fn test_scores_are_bounded() {
        let config = AnalyzeConfig::default();
        let keywords: Vec<String> = config.skills.clone();
        let score = score_resume(&strong_profile(), &full_stats(), &keywords, &config);

        assert!(score.breakdown.contact_info <= 20);
        assert!(score.breakdown.structure <= 20);
        assert!(score.breakdown.experience <= 20);
        assert!(score.breakdown.keywords <= 20);
        assert!(score.breakdown.impact <= 20);
        assert!(score.total_score <= 100);
        assert_eq!(score.total_score, score.breakdown.total());
    }

    #[test]
    fn test_empty_profile_scores_low_with_feedback() {
        let config = AnalyzeConfig::default();
        let score = score_resume(
            &ResumeProfile::default(),
            &StructureStats::default(),
            &[],
            &config,
        );
        assert_eq!(score.breakdown.contact_info, 0);
        assert_eq!(score.breakdown.experience, 0);
        assert_eq!(score.breakdown.keywords, 0);
        assert_eq!(score.breakdown.impact, 0);
        // all five categories below threshold, in fixed order
        assert_eq!(score.feedback.len(), 5);
        assert_eq!(score.feedback[0], config.feedback.contact_info.message);
        assert_eq!(score.feedback[4], config.feedback.impact.message);
    }

    #[test]
    fn test_contact_scores_five_per_field() {
        let mut profile = ResumeProfile::default();
        assert_eq!(score_contact(&profile), 0);
        profile.email = Some("a@b.com".to_string());
        assert_eq!(score_contact(&profile), 5);
        profile.name = Some("A".to_string());
        profile.phone = Some("555".to_string());
        profile.location = Some("X, Y".to_string());
        assert_eq!(score_contact(&profile), 20);
    }

    #[test]
    fn test_structure_penalties() {
        let config = AnalyzeConfig::default();
        assert_eq!(score_structure(&full_stats(), &config), 20);

        let missing_one = StructureStats {
            has_skills: false,
            ..full_stats()
        };
        assert_eq!(score_structure(&missing_one, &config), 16);

        let too_short = StructureStats {
            total_lines: 3,
            ..full_stats()
        };
        assert_eq!(score_structure(&too_short, &config), 14);

        let nothing = StructureStats::default();
        assert_eq!(score_structure(&nothing, &config), 2);
    }

    #[test]
    fn test_experience_rewards_recency_and_detail() {
        let config = AnalyzeConfig::default();
        let profile = strong_profile();
        // 4 entries * 3 + recency 3 + full density 5 = 20
        assert_eq!(score_experience(&profile, &config), 20);

        let mut sparse = profile.clone();
        sparse.experience.truncate(1);
        sparse.experience[0].date_range = None;
        sparse.experience[0].bullets.clear();
        // 1 entry * 3, no recency, no density
        assert_eq!(score_experience(&sparse, &config), 3);
    }

    #[test]
    fn test_keyword_score_is_monotone() {
        let config = AnalyzeConfig::default();
        let mut keywords: Vec<String> = Vec::new();
        let mut last = 0;
        for skill in config.skills.iter().take(20) {
            keywords.push(skill.clone());
            let score = score_keywords(&keywords, &config);
            assert!(score >= last, "adding {skill:?} lowered the score");
            last = score;
        }
    }

    #[test]
    fn test_predict_roles_ranked_and_capped() {
        let config = AnalyzeConfig::default();
        let keywords: Vec<String> = ["javascript", "typescript", "react", "html", "css"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let roles = predict_roles(&keywords, &config);
        assert!(!roles.is_empty());
        assert!(roles.len() <= config.max_roles);
        assert_eq!(roles[0], "Frontend Engineer");
    }

    #[test]
    fn test_predict_roles_empty_keywords() {
        let config = AnalyzeConfig::default();
        assert!(predict_roles(&[], &config).is_empty());
    }

    #[test]
    fn test_impact_needs_verb_and_metric() {
        let config = AnalyzeConfig::default();
        let mut profile = ResumeProfile::default();
        profile.experience.push(ExperienceEntry {
            bullets: vec![
                "Reduced latency by 40%".to_string(),    // both
                "Led the platform rewrite".to_string(),  // verb only
                "Throughput up 3x".to_string(),          // metric only
            ],
            ..Default::default()
        });
        assert_eq!(score_impact(&profile, &config), 4);

        profile.experience[0].bullets = vec!["Led the platform team".to_string()];
        assert_eq!(score_impact(&profile, &config), 0);
    }

    #[test]
    fn test_density_tracks_bullet_quality() {
        let config = AnalyzeConfig::default();
        let entry = |bullets: &[&str]| ExperienceEntry {
            title: Some("Engineer".to_string()),
            bullets: bullets.iter().map(|b| b.to_string()).collect(),
            ..Default::default()
        };
        let vague = ResumeProfile {
            experience: vec![entry(&[
                "Responsible for various tasks",
                "Attended weekly meetings",
            ])],
            ..Default::default()
        };
        let concrete = ResumeProfile {
            experience: vec![entry(&[
                "Reduced costs by 30%",
                "Led a team of 5 engineers",
            ])],
            ..Default::default()
        };

        // Same shape; only bullet quality differs.
        let low = score_experience(&vague, &config);
        let high = score_experience(&concrete, &config);
        assert_eq!(high, low + config.scoring.density_points);
    }
}
