//! Data model for resume analysis.
//!
//! This module defines the intermediate representation that flows through
//! the pipeline (positioned tokens, clustered lines, kind-tagged sections)
//! plus the structured resume record and rubric score returned to callers.

mod resume;
mod score;
mod text;

pub use resume::{DateRange, EducationEntry, ExperienceEntry, ProjectEntry, ResumeProfile};
pub use score::{AnalysisResult, RubricScore, ScoreBreakdown};
pub use text::{Line, Section, SectionKind, TextToken};
