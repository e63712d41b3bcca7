//! Batch report formatting: human-readable console output and JSON.

use anyhow::Result;
use report_types::BatchReport;
use std::fmt::Write;

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn format(batch: &BatchReport) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "List of remarks:")?;
        if batch.remarks.is_empty() {
            writeln!(output, "  (none)")?;
        }
        for report in &batch.remarks {
            writeln!(output)?;
            writeln!(output, "  {}", report.document_id)?;
            for violation in &report.violations {
                writeln!(output, "    - {}", violation)?;
            }
        }

        writeln!(output)?;
        writeln!(output, "Duplicates:")?;
        if batch.duplicates.is_empty() {
            writeln!(output, "  (none)")?;
        }
        for (document_id, matches) in batch.duplicates.iter() {
            writeln!(output)?;
            writeln!(output, " ---> file: {}", document_id)?;
            for matched in matches {
                writeln!(output, "      {}", matched)?;
            }
        }

        if !batch.skipped.is_empty() {
            writeln!(output)?;
            writeln!(output, "Skipped:")?;
            for document_id in &batch.skipped {
                writeln!(output, "  {}", document_id)?;
            }
        }

        Ok(output)
    }
}

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    pub fn format(batch: &BatchReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(batch)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use report_types::{DuplicateMatch, DuplicateReport, ViolationReport};

    fn sample_batch() -> BatchReport {
        let mut duplicates = DuplicateReport::new();
        duplicates.push(
            "a.txt",
            DuplicateMatch {
                document_id: "b.txt".to_string(),
                percent: 89.655,
            },
        );
        BatchReport {
            remarks: vec![ViolationReport {
                document_id: "c.txt".to_string(),
                violations: vec!["Not found partition: Conclusion".to_string()],
                checked_at: 0,
            }],
            duplicates,
            skipped: vec!["broken.docx".to_string()],
            checked_at: 0,
        }
    }

    #[test]
    fn test_console_output_lists_remarks_duplicates_and_skips() {
        let output = ConsoleReporter::format(&sample_batch()).unwrap();
        assert!(output.contains("c.txt"));
        assert!(output.contains("    - Not found partition: Conclusion"));
        assert!(output.contains(" ---> file: a.txt"));
        assert!(output.contains("b.txt  Coincidence: 89.66%"));
        assert!(output.contains("broken.docx"));
    }

    #[test]
    fn test_console_output_marks_empty_sections() {
        let batch = BatchReport {
            remarks: vec![],
            duplicates: DuplicateReport::new(),
            skipped: vec![],
            checked_at: 0,
        };
        let output = ConsoleReporter::format(&batch).unwrap();
        assert!(output.contains("List of remarks:\n  (none)"));
        assert!(output.contains("Duplicates:\n  (none)"));
        assert!(!output.contains("Skipped:"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let batch = sample_batch();
        let json = JsonReporter::format(&batch).unwrap();
        let parsed: BatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, batch);
    }
}
