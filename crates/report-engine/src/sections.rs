//! Ordered section walk: locates required headings, bounds the title region,
//! and extracts the conclusion span.

use crate::matcher::{find_phrase, EXACT};
use crate::normalize::{NormalizedDocument, Normalizer};
use report_types::Criteria;

/// Number of trailing tokens excluded from the extracted conclusion span.
///
/// Both extraction paths (bounded by a following section, bounded by the
/// document end) drop the final token of the range. Duplicate percentages
/// downstream depend on this exact span, so the trim is part of the contract
/// rather than a slicing bug to correct.
pub const SPAN_TAIL_TRIM: usize = 1;

/// Section positions produced by [`locate_sections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMap {
    /// End of the title region: minimum over all located section starts,
    /// or the document length when no section was found.
    pub title_end: usize,
    /// First token after the conclusion heading, when located.
    pub conclusion_start: Option<usize>,
    /// Start of the section following the conclusion, when located.
    pub after_conclusion: Option<usize>,
}

impl SectionMap {
    /// Extracted conclusion text: the separator-less concatenation of the
    /// conclusion span, trailing trim applied, clamped to empty on inverted
    /// bounds. `None` when no conclusion heading was located.
    pub fn conclusion_text(&self, doc: &NormalizedDocument) -> Option<String> {
        let start = self.conclusion_start?;
        let end = self.after_conclusion.unwrap_or(doc.len());
        Some(doc.concat(start, end.saturating_sub(SPAN_TAIL_TRIM)))
    }
}

/// Accumulator threaded through the ordered walk of required sections.
#[derive(Debug)]
struct SectionWalk {
    title_end: usize,
    conclusion_start: Option<usize>,
    after_conclusion: Option<usize>,
    cursor: usize,
}

impl SectionWalk {
    fn new(doc_len: usize) -> Self {
        Self {
            title_end: doc_len,
            conclusion_start: None,
            after_conclusion: None,
            cursor: 0,
        }
    }

    fn visit(&mut self, position: usize, heading_len: usize, is_conclusion: bool) {
        if is_conclusion {
            self.conclusion_start = Some(position + heading_len);
        } else if self.conclusion_start.is_some() && self.after_conclusion.is_none() {
            self.after_conclusion = Some(position);
        }
        self.title_end = self.title_end.min(position);
        self.cursor = position;
    }
}

/// Walk the required section list in declared order.
///
/// Each heading is searched at or after the previously located one, so
/// out-of-order headings report as missing. Misses append a
/// "Not found partition" violation and leave the cursor unchanged. After the
/// walk, an undeclared appendix is looked up to bound the conclusion when no
/// declared section follows it.
pub fn locate_sections(
    doc: &NormalizedDocument,
    criteria: &Criteria,
    normalizer: &Normalizer,
    violations: &mut Vec<String>,
) -> SectionMap {
    let mut walk = SectionWalk::new(doc.len());
    let compliance = criteria.compliance_threshold();
    let conclusion_keyword = normalizer.normalize(criteria.conclusion_keyword());

    for heading in criteria.partition_list.iter().flatten() {
        let phrase = normalizer.normalize(heading);
        match find_phrase(doc.tokens(), phrase.tokens(), walk.cursor, None, compliance) {
            None => violations.push(format!("Not found partition: {}", heading)),
            Some(position) => {
                let is_conclusion = find_phrase(
                    phrase.tokens(),
                    conclusion_keyword.tokens(),
                    0,
                    None,
                    EXACT,
                )
                .is_some();
                walk.visit(position, phrase.len(), is_conclusion);
            }
        }
    }

    let mut map = SectionMap {
        title_end: walk.title_end,
        conclusion_start: walk.conclusion_start,
        after_conclusion: walk.after_conclusion,
    };

    // Undeclared appendices still truncate the extracted conclusion.
    if let (Some(start), None) = (map.conclusion_start, map.after_conclusion) {
        let appendix_keyword = normalizer.normalize(criteria.appendix_keyword());
        map.after_conclusion =
            find_phrase(doc.tokens(), appendix_keyword.tokens(), start, None, EXACT);
    }

    map
}
