use thiserror::Error;

/// Configuration problems that make a checking run impossible.
///
/// Violations found in documents are regular output, never errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid {name} threshold {value}: must be in (0, 1]")]
    InvalidThreshold { name: &'static str, value: f64 },
}
