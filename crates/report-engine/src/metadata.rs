//! Title-page metadata checks.
//!
//! Each configured field must occur, in normalized concatenated form, inside
//! the concatenated title region (everything before the first located
//! section). Containment is exact; the compliance threshold does not apply
//! here.

use crate::normalize::{NormalizedDocument, Normalizer};
use report_types::Criteria;

pub fn check_title_metadata(
    doc: &NormalizedDocument,
    title_end: usize,
    criteria: &Criteria,
    normalizer: &Normalizer,
) -> Vec<String> {
    let title = doc.concat(0, title_end);
    let mut violations = Vec::new();

    let mut check = |value: &str, label: &str| {
        let needle = normalizer.normalize(value).concat_all();
        if !title.contains(&needle) {
            violations.push(format!("Not found {}: {}", label, value));
        }
    };

    if let Some(value) = &criteria.discipline_name {
        check(value, "discipline name");
    }
    if let Some(value) = &criteria.job_title {
        check(value, "job title");
    }
    if let Some(value) = &criteria.teacher_name {
        check(value, "teacher name");
    }
    if let Some(value) = &criteria.teacher_position {
        check(value, "teacher position");
    }
    if let Some(year) = &criteria.year {
        check(&year.to_string(), "year");
    }

    violations
}
