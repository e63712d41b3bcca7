//! Mandatory passage checks.
//!
//! Unlike title metadata, passages are searched across the whole document
//! with the configured compliance threshold.

use crate::matcher::find_phrase;
use crate::normalize::{NormalizedDocument, Normalizer};
use report_types::Criteria;

pub fn check_required_text(
    doc: &NormalizedDocument,
    criteria: &Criteria,
    normalizer: &Normalizer,
) -> Vec<String> {
    let compliance = criteria.compliance_threshold();
    criteria
        .text
        .iter()
        .flatten()
        .filter_map(|passage| {
            let needle = normalizer.normalize(passage);
            match find_phrase(doc.tokens(), needle.tokens(), 0, None, compliance) {
                Some(_) => None,
                None => Some(format!("Not found text: {}", passage)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn criteria(passages: &[&str], compliance: Option<f64>) -> Criteria {
        Criteria {
            text: Some(passages.iter().map(|p| p.to_string()).collect()),
            compliance,
            ..Criteria::default()
        }
    }

    fn check(text: &str, criteria: &Criteria) -> Vec<String> {
        let normalizer = Normalizer::default();
        let doc = normalizer.normalize(text);
        check_required_text(&doc, criteria, &normalizer)
    }

    #[test]
    fn test_present_passage_passes() {
        let criteria = criteria(&["The goal of this work"], None);
        let text = "introduction The goal of this work is sorting conclusion done x";
        assert_eq!(check(text, &criteria), Vec::<String>::new());
    }

    #[test]
    fn test_passage_is_searched_beyond_title_region() {
        // The passage sits after the last section heading and still counts.
        let criteria = criteria(&["goals were met"], None);
        assert_eq!(
            check("intro conclusion goals were met", &criteria),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_missing_passage_reports_original_wording() {
        let criteria = criteria(&["The goal of this work"], None);
        assert_eq!(
            check("unrelated text entirely", &criteria),
            vec!["Not found text: The goal of this work".to_string()]
        );
    }

    #[test]
    fn test_compliance_threshold_tolerates_typos() {
        let criteria_exact = criteria(&["goal of this work"], None);
        let criteria_fuzzy = criteria(&["goal of this work"], Some(0.85));
        let text = "the gaol of this work is sorting";
        assert_eq!(check(text, &criteria_exact).len(), 1);
        assert_eq!(check(text, &criteria_fuzzy), Vec::<String>::new());
    }
}
