//! # cvscore
//!
//! Resume PDF analysis library for Rust.
//!
//! This library extracts positioned text from resume PDFs, reconstructs
//! lines and sections from the layout, pulls out structured fields
//! (contact details, experience, education, projects, skills), and scores
//! the result against a five-category rubric.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cvscore::analyze_file;
//!
//! fn main() -> cvscore::Result<()> {
//!     let result = analyze_file("resume.pdf")?;
//!
//!     println!("score: {}/100", result.score.total_score);
//!     for message in &result.score.feedback {
//!         println!("- {message}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layout-aware extraction**: positioned tokens, line clustering,
//!   heading-based section detection
//! - **Structured output**: contact fields, dated entries, skill lists
//! - **Bounded rubric**: five sub-scores in [0, 20], total in [0, 100]
//! - **Deterministic**: identical bytes always produce identical results
//! - **Parallel processing**: uses Rayon across pages
//! - **Configurable**: every vocabulary and threshold overridable via
//!   [`AnalyzeConfig`]

pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod layout;
pub mod model;
pub mod options;
pub mod profile;
pub mod score;
pub mod sections;

// Re-export commonly used types
pub use config::{AnalyzeConfig, FeedbackConfig, FeedbackRule, RoleProfile, ScoringWeights};
pub use detect::{sniff_header, PdfFormat};
pub use error::{Error, Result};
pub use model::{
    AnalysisResult, DateRange, EducationEntry, ExperienceEntry, Line, ProjectEntry, ResumeProfile,
    RubricScore, ScoreBreakdown, Section, SectionKind, TextToken,
};
pub use options::AnalyzeOptions;
pub use score::StructureStats;

use std::io::Read;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

/// Analyze a resume PDF file.
///
/// # Example
///
/// ```no_run
/// use cvscore::analyze_file;
///
/// let result = analyze_file("resume.pdf").unwrap();
/// println!("{}", result.score.total_score);
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<AnalysisResult> {
    let data = std::fs::read(path)?;
    analyze_bytes(&data)
}

/// Analyze a resume PDF from bytes with default options and configuration.
pub fn analyze_bytes(data: &[u8]) -> Result<AnalysisResult> {
    analyze_bytes_with(data, &AnalyzeOptions::default(), &AnalyzeConfig::default())
}

/// Analyze a resume PDF from bytes with explicit options and configuration.
///
/// # Example
///
/// ```no_run
/// use cvscore::{analyze_bytes_with, AnalyzeConfig, AnalyzeOptions};
///
/// let data = std::fs::read("resume.pdf").unwrap();
/// let options = AnalyzeOptions::new().sequential().fail_on_empty();
/// let result = analyze_bytes_with(&data, &options, &AnalyzeConfig::default()).unwrap();
/// ```
pub fn analyze_bytes_with(
    data: &[u8],
    options: &AnalyzeOptions,
    config: &AnalyzeConfig,
) -> Result<AnalysisResult> {
    detect::sniff_header(data)?;

    let doc = lopdf::Document::load_mem(data)?;

    // Nothing past decoding may take the process down on a malformed
    // document; a panic anywhere in extraction or the layout heuristics is
    // reported as an extraction error.
    catch_unwind(AssertUnwindSafe(|| {
        let tokens = extract::extract_tokens(&doc, options, config);
        if tokens.is_empty() {
            if options.fail_on_empty {
                return Err(Error::EmptyDocument);
            }
            log::warn!("document has no extractable text");
        }
        Ok(analyze_tokens(tokens, config))
    }))
    .map_err(|_| Error::Extraction("analysis failed on malformed document data".to_string()))?
}

/// Analyze a resume PDF from any reader.
pub fn analyze_reader<R: Read>(mut reader: R) -> Result<AnalysisResult> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    analyze_bytes(&data)
}

/// Analyze a resume PDF from bytes on a blocking worker thread.
#[cfg(feature = "async")]
pub async fn analyze_bytes_async(
    data: Vec<u8>,
    options: AnalyzeOptions,
    config: AnalyzeConfig,
) -> Result<AnalysisResult> {
    tokio::task::spawn_blocking(move || analyze_bytes_with(&data, &options, &config))
        .await
        .map_err(|e| Error::Extraction(e.to_string()))?
}

/// The full pipeline after token extraction: lines, sections, fields,
/// keywords, score.
fn analyze_tokens(tokens: Vec<TextToken>, config: &AnalyzeConfig) -> AnalysisResult {
    let lines = layout::build_lines(tokens, config);
    let segmented = sections::segment(lines, config);
    let resume = profile::extract(&segmented);

    let texts: Vec<String> = segmented
        .iter()
        .flat_map(|s| s.heading_line.iter().chain(s.lines.iter()))
        .map(|line| line.text())
        .collect();
    let matcher = profile::SkillMatcher::new(config);
    let scan = matcher.scan(texts.iter().map(String::as_str));

    let stats = score::StructureStats::from_sections(&segmented);
    let rubric = score::score_resume(&resume, &stats, &scan.keywords, config);
    let predicted_roles = score::predict_roles(&scan.keywords, config);

    AnalysisResult {
        resume,
        score: rubric,
        keywords: scan.keywords,
        soft_skills: scan.soft_skills,
        predicted_roles,
    }
}

/// Builder for configured analysis.
///
/// # Example
///
/// ```no_run
/// use cvscore::ResumeAnalyzer;
///
/// let result = ResumeAnalyzer::new()
///     .sequential()
///     .fail_on_empty()
///     .analyze_file("resume.pdf")?;
/// # Ok::<(), cvscore::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResumeAnalyzer {
    options: AnalyzeOptions,
    config: AnalyzeConfig,
}

impl ResumeAnalyzer {
    /// Create a new analyzer with default options and configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the heuristic configuration.
    pub fn with_config(mut self, config: AnalyzeConfig) -> Self {
        self.config = config;
        self
    }

    /// Disable parallel page extraction.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Fail with [`Error::EmptyDocument`] on documents without text.
    pub fn fail_on_empty(mut self) -> Self {
        self.options = self.options.fail_on_empty();
        self
    }

    /// Analyze a file.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisResult> {
        let data = std::fs::read(path)?;
        self.analyze_bytes(&data)
    }

    /// Analyze bytes.
    pub fn analyze_bytes(&self, data: &[u8]) -> Result<AnalysisResult> {
        analyze_bytes_with(data, &self.options, &self.config)
    }

    /// Analyze from any reader.
    pub fn analyze_reader<R: Read>(&self, mut reader: R) -> Result<AnalysisResult> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.analyze_bytes(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_bytes_empty_data() {
        let data: [u8; 0] = [];
        let result = analyze_bytes(&data);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_analyze_bytes_too_short() {
        let result = analyze_bytes(b"%PDF");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_analyze_bytes_unknown_magic() {
        let data = b"<!DOCTYPE html><html></html>";
        let result = analyze_bytes(data);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_analyze_bytes_header_without_body() {
        // Valid header, no document structure behind it.
        let result = analyze_bytes(b"%PDF-1.7\nnot really a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_analyzer_builder() {
        let analyzer = ResumeAnalyzer::new().sequential().fail_on_empty();
        assert!(!analyzer.options.parallel);
        assert!(analyzer.options.fail_on_empty);
    }

    #[test]
    fn test_analyzer_builder_with_config() {
        let config = AnalyzeConfig {
            max_roles: 1,
            ..Default::default()
        };
        let analyzer = ResumeAnalyzer::new().with_config(config);
        assert_eq!(analyzer.config.max_roles, 1);
    }

    #[test]
    fn test_analyze_tokens_empty_is_minimal_result() {
        let result = analyze_tokens(Vec::new(), &AnalyzeConfig::default());
        assert!(result.resume.name.is_none());
        assert!(result.keywords.is_empty());
        assert_eq!(result.score.breakdown.contact_info, 0);
        assert!(result.score.total_score <= 100);
    }
}
