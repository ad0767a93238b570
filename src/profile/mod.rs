//! Field extraction: turn kind-tagged sections into a structured resume.
//!
//! Every extractor here is best-effort. A miss produces `None` or an empty
//! list, never an error; malformed or unusual layouts degrade to partial
//! records the scoring engine can still consume.

mod entries;
mod header;
mod skills;

use std::collections::HashSet;

pub use skills::KeywordScan;
pub(crate) use skills::SkillMatcher;

use crate::model::{
    EducationEntry, ExperienceEntry, ProjectEntry, ResumeProfile, Section, SectionKind,
};

/// Extract the structured resume record from segmented sections.
pub fn extract(sections: &[Section]) -> ResumeProfile {
    let contact = header::extract_contact(sections);
    let dates = entries::DateMatcher::new();

    let mut profile = ResumeProfile {
        name: contact.name,
        email: contact.email,
        phone: contact.phone,
        location: contact.location,
        ..Default::default()
    };
    let mut seen_skills: HashSet<String> = HashSet::new();

    for section in sections {
        match section.kind {
            SectionKind::Experience => {
                let parsed = entries::split_entries(&section.lines, &dates, true);
                profile.experience.extend(parsed.into_iter().map(|e| ExperienceEntry {
                    title: e.title,
                    organization: e.organization,
                    date_range: e.date_range,
                    bullets: e.bullets,
                }));
            }
            SectionKind::Education => {
                let parsed = entries::split_entries(&section.lines, &dates, false);
                profile.education.extend(parsed.into_iter().map(|e| {
                    let mut details = e.bullets;
                    // A second header line under a school is a degree or
                    // program, not an organization.
                    if let Some(org) = e.organization {
                        details.insert(0, org);
                    }
                    EducationEntry {
                        institution: e.title,
                        date_range: e.date_range,
                        details,
                    }
                }));
            }
            SectionKind::Projects => {
                let parsed = entries::split_project_entries(&section.lines, &dates);
                profile.projects.extend(parsed.into_iter().map(|e| {
                    let mut details = e.bullets;
                    if let Some(org) = e.organization {
                        details.insert(0, org);
                    }
                    ProjectEntry {
                        name: e.title,
                        date_range: e.date_range,
                        details,
                    }
                }));
            }
            SectionKind::Skills => {
                for line in &section.lines {
                    for item in skills::split_skill_items(&line.text()) {
                        if seen_skills.insert(item.to_lowercase()) {
                            profile.skills.push(item);
                        }
                    }
                }
            }
            SectionKind::Header | SectionKind::Other => {}
        }
    }

    log::debug!(
        "extracted profile: {} experience, {} education, {} projects, {} skills",
        profile.experience.len(),
        profile.education.len(),
        profile.projects.len(),
        profile.skills.len()
    );
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, TextToken};

    fn line(text: &str, y: f32) -> Line {
        Line::from_tokens(vec![TextToken {
            page: 0,
            text: text.to_string(),
            x: 50.0,
            y,
            width: text.chars().count() as f32 * 5.5,
            height: 11.0,
            font_name: "Helvetica".to_string(),
            font_size: 11.0,
            has_eol: true,
        }])
    }

    fn skills_section(lines: Vec<Line>) -> Section {
        Section {
            kind: SectionKind::Skills,
            heading: "Skills".to_string(),
            heading_line: Some(line("Skills", 720.0)),
            lines,
        }
    }

    #[test]
    fn test_skill_items_dedup_case_insensitively() {
        let sections = vec![skills_section(vec![
            line("Python, Docker", 700.0),
            line("python, Terraform", 686.0),
        ])];
        let profile = extract(&sections);
        assert_eq!(profile.skills, vec!["Python", "Docker", "Terraform"]);
    }
}
