use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Checking criteria for one batch run.
///
/// Key names preserve the original YAML criteria schema, so existing
/// criteria files keep working unchanged. Every option is optional; a check
/// only runs when its option is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    /// Required section headings, in the order they must appear.
    #[serde(rename = "Partition list", default, skip_serializing_if = "Option::is_none")]
    pub partition_list: Option<Vec<String>>,

    #[serde(rename = "Discipline name", default, skip_serializing_if = "Option::is_none")]
    pub discipline_name: Option<String>,

    #[serde(rename = "Job title", default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    #[serde(rename = "Teacher name", default, skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,

    #[serde(rename = "Teacher position", default, skip_serializing_if = "Option::is_none")]
    pub teacher_position: Option<String>,

    /// Year the work was carried out. Accepts a YAML integer or string.
    #[serde(rename = "Year", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,

    /// Mandatory passages that must occur somewhere in the document.
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,

    /// Minimum similarity for accepting a fuzzy section/passage match, in (0, 1].
    #[serde(rename = "Percentage of compliance", default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<f64>,

    /// Minimum similarity for flagging two conclusions as duplicates, in (0, 1].
    #[serde(rename = "Percentage of identity", default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<f64>,

    /// Heading keyword that marks the conclusion section for this locale.
    #[serde(rename = "Conclusion keyword", default, skip_serializing_if = "Option::is_none")]
    pub conclusion_keyword: Option<String>,

    /// Heading keyword that marks an optional appendix for this locale.
    #[serde(rename = "Appendix keyword", default, skip_serializing_if = "Option::is_none")]
    pub appendix_keyword: Option<String>,
}

impl Criteria {
    pub const DEFAULT_CONCLUSION_KEYWORD: &'static str = "conclusion";
    pub const DEFAULT_APPENDIX_KEYWORD: &'static str = "appendix";

    /// Compliance threshold, defaulting to exact matching.
    pub fn compliance_threshold(&self) -> f64 {
        self.compliance.unwrap_or(1.0)
    }

    /// Identity threshold, defaulting to exact matching.
    pub fn identity_threshold(&self) -> f64 {
        self.identity.unwrap_or(1.0)
    }

    pub fn conclusion_keyword(&self) -> &str {
        self.conclusion_keyword
            .as_deref()
            .unwrap_or(Self::DEFAULT_CONCLUSION_KEYWORD)
    }

    pub fn appendix_keyword(&self) -> &str {
        self.appendix_keyword
            .as_deref()
            .unwrap_or(Self::DEFAULT_APPENDIX_KEYWORD)
    }
}

/// Year scalar as it appears in criteria files: `Year: 2024` or `Year: "2024"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => f.write_str(s),
        }
    }
}

/// Result of checking a single document.
///
/// An empty violation list is the pass signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationReport {
    pub document_id: String,
    pub violations: Vec<String>,
    pub checked_at: u64,
}

impl ViolationReport {
    pub fn is_pass(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Extracted conclusion texts, keyed by document identifier.
///
/// Only documents with a located conclusion heading get an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConclusionCorpus {
    entries: BTreeMap<String, String>,
}

impl ConclusionCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, document_id: impl Into<String>, conclusion: impl Into<String>) {
        self.entries.insert(document_id.into(), conclusion.into());
    }

    pub fn get(&self, document_id: &str) -> Option<&str> {
        self.entries.get(document_id).map(String::as_str)
    }

    pub fn contains(&self, document_id: &str) -> bool {
        self.entries.contains_key(document_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single conclusion flagged as a likely duplicate of another document's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    pub document_id: String,
    /// Similarity ratio scaled to a percentage, rendered to two decimals.
    pub percent: f64,
}

impl fmt::Display for DuplicateMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  Coincidence: {:.2}%", self.document_id, self.percent)
    }
}

/// Duplicate matches per document, both directions reported independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicateReport {
    entries: BTreeMap<String, Vec<DuplicateMatch>>,
}

impl DuplicateReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, document_id: impl Into<String>, matched: DuplicateMatch) {
        self.entries.entry(document_id.into()).or_default().push(matched);
    }

    pub fn get(&self, document_id: &str) -> Option<&[DuplicateMatch]> {
        self.entries.get(document_id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<DuplicateMatch>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a batch run produces, ready for the reporters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Reports for documents with at least one violation.
    pub remarks: Vec<ViolationReport>,
    pub duplicates: DuplicateReport,
    /// Documents skipped because their text could not be extracted.
    pub skipped: Vec<String>,
    pub checked_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_criteria_parses_original_yaml_schema() {
        let yaml = r#"
Partition list:
  - Introduction
  - Conclusion
Discipline name: Algorithms
Job title: Lab report 1
Teacher name: Ivanov I. I.
Teacher position: Assistant professor
Year: 2024
Text:
  - The goal of this work
Percentage of compliance: 0.8
Percentage of identity: 0.8
"#;
        let criteria: Criteria = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            criteria.partition_list,
            Some(vec!["Introduction".to_string(), "Conclusion".to_string()])
        );
        assert_eq!(criteria.discipline_name.as_deref(), Some("Algorithms"));
        assert_eq!(criteria.year, Some(Year::Number(2024)));
        assert_eq!(criteria.compliance_threshold(), 0.8);
        assert_eq!(criteria.identity_threshold(), 0.8);
    }

    #[test]
    fn test_criteria_defaults_to_exact_thresholds() {
        let criteria: Criteria = serde_yaml::from_str("Discipline name: Physics").unwrap();
        assert_eq!(criteria.compliance_threshold(), 1.0);
        assert_eq!(criteria.identity_threshold(), 1.0);
        assert_eq!(criteria.conclusion_keyword(), "conclusion");
        assert_eq!(criteria.appendix_keyword(), "appendix");
    }

    #[test]
    fn test_year_accepts_number_and_string() {
        let number: Criteria = serde_yaml::from_str("Year: 2024").unwrap();
        let string: Criteria = serde_yaml::from_str("Year: \"2024\"").unwrap();
        assert_eq!(number.year.unwrap().to_string(), "2024");
        assert_eq!(string.year.unwrap().to_string(), "2024");
    }

    #[test]
    fn test_keyword_overrides_for_other_locales() {
        let yaml = "Conclusion keyword: вывод\nAppendix keyword: приложение";
        let criteria: Criteria = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(criteria.conclusion_keyword(), "вывод");
        assert_eq!(criteria.appendix_keyword(), "приложение");
    }

    #[test]
    fn test_violation_report_pass_signal() {
        let pass = ViolationReport {
            document_id: "a.txt".to_string(),
            violations: vec![],
            checked_at: 0,
        };
        let fail = ViolationReport {
            document_id: "b.txt".to_string(),
            violations: vec!["Not found partition: Conclusion".to_string()],
            checked_at: 0,
        };
        assert!(pass.is_pass());
        assert!(!fail.is_pass());
    }

    #[test]
    fn test_corpus_only_tracks_inserted_documents() {
        let mut corpus = ConclusionCorpus::new();
        corpus.insert("a.txt", "resultsweregood");
        assert!(corpus.contains("a.txt"));
        assert!(!corpus.contains("b.txt"));
        assert_eq!(corpus.get("a.txt"), Some("resultsweregood"));
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_duplicate_match_renders_two_decimals() {
        let matched = DuplicateMatch {
            document_id: "b.txt".to_string(),
            percent: 89.655_172,
        };
        assert_eq!(matched.to_string(), "b.txt  Coincidence: 89.66%");
    }

    #[test]
    fn test_batch_report_serializes_to_json() {
        let batch = BatchReport {
            remarks: vec![],
            duplicates: DuplicateReport::new(),
            skipped: vec!["broken.pdf".to_string()],
            checked_at: 1,
        };
        let json = serde_json::to_string(&batch).unwrap();
        assert!(json.contains("broken.pdf"));
    }
}
