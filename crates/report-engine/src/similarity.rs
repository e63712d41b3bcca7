//! Pairwise duplicate detection over extracted conclusions.

use crate::matcher::sequence_ratio;
use report_types::{ConclusionCorpus, DuplicateMatch, DuplicateReport};

/// Compare every ordered pair of corpus entries and report those whose
/// similarity reaches the identity threshold.
///
/// Both directions are computed independently, so a flagged pair shows up
/// under both documents. Entries with empty extracted text are skipped:
/// two empty strings compare as identical and would otherwise flag a
/// meaningless 100% match. Quadratic in corpus size.
pub fn detect_duplicates(corpus: &ConclusionCorpus, identity: f64) -> DuplicateReport {
    let mut report = DuplicateReport::new();
    for (document_id, text) in corpus.iter() {
        if text.is_empty() {
            continue;
        }
        for (other_id, other_text) in corpus.iter() {
            if other_id == document_id || other_text.is_empty() {
                continue;
            }
            let ratio = sequence_ratio(text, other_text);
            if ratio >= identity {
                report.push(
                    document_id.clone(),
                    DuplicateMatch {
                        document_id: other_id.clone(),
                        percent: ratio * 100.0,
                    },
                );
            }
        }
    }
    report
}
