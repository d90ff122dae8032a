//! Defines the error types for the validation module.

/// The specific category of an integrity finding.
///
// This enum allows for programmatic inspection of findings, which is more
// robust than string matching on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorType {
    /// A lane or demand refers to a node that was never registered.
    DanglingReference,
    /// An attribute, recipe or demand names a product that was never registered.
    UnregisteredProduct,
    /// A non-empty per-period series ends before the horizon does.
    ShortSeries,
    /// A plant's recipes consume, directly or not, their own output.
    BomCycle,
}

/// A structured report of one integrity concern in a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// What the finding is about, e.g. `plant 'Mill'` or `lane #3`.
    pub subject: String,
    /// The category of the finding.
    pub error_type: ValidationErrorType,
    /// A human-readable message explaining the finding.
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(subject: impl Into<String>, error_type: ValidationErrorType, message: String) -> Self {
        Self { subject: subject.into(), error_type, message }
    }
}
