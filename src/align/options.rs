//! Aligner options.

/// Default geometric gating threshold, in page units.
pub const DEFAULT_MAX_DIST: f32 = 30.0;

/// Options for aligning two OCR editions.
#[derive(Debug, Clone)]
pub struct AlignOptions {
    /// Line centers this far apart or further never match
    pub max_dist: f32,

    /// Run split-line reconciliation after the primary pass
    pub reconcile_splits: bool,

    /// Align pages in parallel
    pub parallel: bool,

    /// Label recorded for edition A
    pub a_label: String,

    /// Label recorded for edition B
    pub b_label: String,
}

impl AlignOptions {
    /// Create new align options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the geometric gating threshold.
    pub fn with_max_dist(mut self, max_dist: f32) -> Self {
        self.max_dist = max_dist;
        self
    }

    /// Enable or disable split-line reconciliation.
    pub fn with_split_reconciliation(mut self, enabled: bool) -> Self {
        self.reconcile_splits = enabled;
        self
    }

    /// Enable or disable parallel page processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the edition labels.
    pub fn with_labels(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.a_label = a.into();
        self.b_label = b.into();
        self
    }
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            max_dist: DEFAULT_MAX_DIST,
            reconcile_splits: true,
            parallel: true,
            a_label: "A".to_string(),
            b_label: "B".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_options_builder() {
        let options = AlignOptions::new()
            .with_max_dist(12.5)
            .with_split_reconciliation(false)
            .with_labels("FR14", "FR15")
            .sequential();

        assert_eq!(options.max_dist, 12.5);
        assert!(!options.reconcile_splits);
        assert!(!options.parallel);
        assert_eq!(options.a_label, "FR14");
        assert_eq!(options.b_label, "FR15");
    }

    #[test]
    fn test_default_options() {
        let options = AlignOptions::default();
        assert_eq!(options.max_dist, DEFAULT_MAX_DIST);
        assert!(options.reconcile_splits);
        assert!(options.parallel);
    }
}
