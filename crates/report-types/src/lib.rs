pub mod types;

pub use types::{
    BatchReport, ConclusionCorpus, Criteria, DuplicateMatch, DuplicateReport, ViolationReport,
    Year,
};
