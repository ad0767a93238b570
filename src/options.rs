//! Analysis options.

/// Options controlling one analysis call.
///
/// These are execution knobs; the heuristic thresholds and dictionaries
/// live in [`crate::AnalyzeConfig`].
#[derive(Debug, Clone, Copy)]
pub struct AnalyzeOptions {
    /// Extract pages in parallel. Output ordering is identical either way.
    pub parallel: bool,

    /// Treat a document with zero extractable text as
    /// [`crate::Error::EmptyDocument`] instead of producing a minimal,
    /// nearly-empty result.
    pub fail_on_empty: bool,
}

impl AnalyzeOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel page extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel page extraction.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Fail with `EmptyDocument` when the document has no extractable text.
    pub fn fail_on_empty(mut self) -> Self {
        self.fail_on_empty = true;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            fail_on_empty: false,
        }
    }
}
