//! Report structure checking engine
//!
//! Verifies that a report's plain text satisfies structural and content
//! criteria, and flags likely duplicate conclusion sections across a batch:
//!
//! - Normalization of raw text into canonical token sequences
//! - Fuzzy sliding-window phrase location
//! - Ordered section walk driving title, metadata and passage checks
//! - Pairwise conclusion similarity over the collected corpus

pub mod error;
pub mod matcher;
pub mod metadata;
pub mod normalize;
pub mod passages;
pub mod sections;
pub mod similarity;

use std::sync::Arc;

use report_types::{ConclusionCorpus, Criteria, DuplicateReport, ViolationReport};

pub use error::EngineError;
pub use matcher::{find_phrase, sequence_ratio};
pub use normalize::{
    DictionaryLemmatizer, Lemmatizer, NoopLemmatizer, NormalizedDocument, Normalizer,
};
pub use similarity::detect_duplicates;

/// Checking engine entry point: validated criteria plus a normalizer.
pub struct ReportChecker {
    criteria: Criteria,
    normalizer: Normalizer,
}

impl ReportChecker {
    /// Build a checker with no morphological folding.
    ///
    /// Fails when a configured threshold falls outside (0, 1]; nothing can
    /// be meaningfully checked against broken criteria.
    pub fn new(criteria: Criteria) -> Result<Self, EngineError> {
        Self::with_lemmatizer(criteria, Arc::new(NoopLemmatizer))
    }

    pub fn with_lemmatizer(
        criteria: Criteria,
        lemmatizer: Arc<dyn Lemmatizer>,
    ) -> Result<Self, EngineError> {
        validate_threshold("compliance", criteria.compliance)?;
        validate_threshold("identity", criteria.identity)?;
        Ok(Self {
            criteria,
            normalizer: Normalizer::new(lemmatizer),
        })
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn normalize(&self, raw_text: &str) -> NormalizedDocument {
        self.normalizer.normalize(raw_text)
    }

    /// Check one document and contribute its conclusion to the corpus.
    pub fn check_document(
        &self,
        document_id: &str,
        raw_text: &str,
        corpus: &mut ConclusionCorpus,
    ) -> ViolationReport {
        let (violations, conclusion) = self.analyze(raw_text);
        if let Some(conclusion) = conclusion {
            corpus.insert(document_id, conclusion);
        }
        ViolationReport {
            document_id: document_id.to_string(),
            violations,
            checked_at: chrono::Utc::now().timestamp() as u64,
        }
    }

    /// Check raw text and return the violations only (for testing).
    pub fn check_text(&self, raw_text: &str) -> Vec<String> {
        self.analyze(raw_text).0
    }

    /// Compare all collected conclusions at the configured identity threshold.
    pub fn detect_duplicates(&self, corpus: &ConclusionCorpus) -> DuplicateReport {
        similarity::detect_duplicates(corpus, self.criteria.identity_threshold())
    }

    fn analyze(&self, raw_text: &str) -> (Vec<String>, Option<String>) {
        let doc = self.normalizer.normalize(raw_text);
        let mut violations = Vec::new();

        let map = sections::locate_sections(&doc, &self.criteria, &self.normalizer, &mut violations);
        violations.extend(metadata::check_title_metadata(
            &doc,
            map.title_end,
            &self.criteria,
            &self.normalizer,
        ));
        violations.extend(passages::check_required_text(&doc, &self.criteria, &self.normalizer));

        (violations, map.conclusion_text(&doc))
    }
}

fn validate_threshold(name: &'static str, value: Option<f64>) -> Result<(), EngineError> {
    match value {
        Some(v) if !(v > 0.0 && v <= 1.0) => Err(EngineError::InvalidThreshold { name, value: v }),
        _ => Ok(()),
    }
}
