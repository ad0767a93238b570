//! Skill and keyword recognition.
//!
//! Dictionary matching runs over word n-grams (1 to 3 words) so multi-word
//! terms like "machine learning" hit, and the token pattern keeps symbol
//! characters so "c++", "c#", and "node.js" survive tokenization.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::config::AnalyzeConfig;

const MAX_NGRAM: usize = 3;

/// Terms recognized across the whole document, split into the full keyword
/// list and its soft-skill subset. Both keep first-seen order.
#[derive(Debug, Default)]
pub struct KeywordScan {
    pub keywords: Vec<String>,
    pub soft_skills: Vec<String>,
}

/// Compiled skill dictionary.
pub(crate) struct SkillMatcher {
    word: Regex,
    /// lowercase term -> canonical casing from the dictionary
    terms: HashMap<String, String>,
    soft: HashSet<String>,
}

impl SkillMatcher {
    pub fn new(config: &AnalyzeConfig) -> Self {
        let terms = config
            .skills
            .iter()
            .map(|s| (s.to_lowercase(), s.clone()))
            .collect();
        let soft = config.soft_skills.iter().map(|s| s.to_lowercase()).collect();
        Self {
            word: Regex::new(r"[A-Za-z0-9+#.]+").expect("word pattern"),
            terms,
            soft,
        }
    }

    /// Scan lines of text, returning recognized terms deduplicated in
    /// first-seen order.
    pub fn scan<'a>(&self, texts: impl Iterator<Item = &'a str>) -> KeywordScan {
        let mut scan = KeywordScan::default();
        let mut seen: HashSet<String> = HashSet::new();

        for text in texts {
            let words: Vec<&str> = self.word.find_iter(text).map(|m| m.as_str()).collect();
            for start in 0..words.len() {
                for len in 1..=MAX_NGRAM.min(words.len() - start) {
                    let candidate = words[start..start + len].join(" ").to_lowercase();
                    // Trailing '.' from sentence position, "Docker." vs
                    // "node.js".
                    let candidate = candidate.trim_end_matches('.').to_string();
                    if let Some(canonical) = self.terms.get(&candidate) {
                        if seen.insert(candidate.clone()) {
                            scan.keywords.push(canonical.clone());
                            if self.soft.contains(&candidate) {
                                scan.soft_skills.push(canonical.clone());
                            }
                        }
                    }
                }
            }
        }
        scan
    }
}

/// Split a free-text skills line into its listed items.
pub(crate) fn split_skill_items(text: &str) -> Vec<String> {
    text.split([',', '|', ';', '\u{2022}', '\u{00B7}'])
        .map(|item| item.trim().trim_end_matches('.').trim())
        .filter(|item| !item.is_empty())
        .map(|item| {
            // "Languages: Python, Go" keeps only the listed part.
            match item.split_once(':') {
                Some((_, rest)) if !rest.trim().is_empty() => rest.trim().to_string(),
                _ => item.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SkillMatcher {
        SkillMatcher::new(&AnalyzeConfig::default())
    }

    #[test]
    fn test_single_word_terms() {
        let scan = matcher().scan(["Built services in Python and Go on AWS."].into_iter());
        assert_eq!(scan.keywords, vec!["python", "go", "aws"]);
    }

    #[test]
    fn test_multi_word_terms() {
        let scan = matcher().scan(["Applied machine learning to churn data"].into_iter());
        assert!(scan.keywords.contains(&"machine learning".to_string()));
    }

    #[test]
    fn test_symbol_terms_survive() {
        let scan = matcher().scan(["Node.js services backed by PostgreSQL"].into_iter());
        assert!(scan.keywords.contains(&"node.js".to_string()));
        assert!(scan.keywords.contains(&"postgresql".to_string()));
    }

    #[test]
    fn test_first_seen_order_and_dedup() {
        let scan = matcher().scan(
            ["Docker and Kubernetes", "Kubernetes again, then Docker"].into_iter(),
        );
        assert_eq!(scan.keywords, vec!["docker", "kubernetes"]);
    }

    #[test]
    fn test_soft_skills_are_subset() {
        let scan = matcher().scan(["Leadership, mentoring, and Python"].into_iter());
        assert_eq!(scan.soft_skills, vec!["leadership", "mentoring"]);
        for soft in &scan.soft_skills {
            assert!(scan.keywords.contains(soft));
        }
    }

    #[test]
    fn test_split_skill_items() {
        assert_eq!(
            split_skill_items("Python, Go | Rust; Docker"),
            vec!["Python", "Go", "Rust", "Docker"]
        );
        assert_eq!(
            split_skill_items("Languages: Python, Go"),
            vec!["Python", "Go"]
        );
        assert!(split_skill_items("  ").is_empty());
    }
}
