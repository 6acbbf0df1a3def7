use std::fmt;

use serde_json::Value;

/// One violated constraint, as reported by a schema binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    message: String,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human-readable description of the violated constraint.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A rejected payload: the full list of violated constraints.
///
/// `Display` joins the issue messages with newlines, one line per violation,
/// so the whole failure reads as a single debuggable block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    issues: Vec<ValidationIssue>,
}

impl ValidationFailure {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// One issue per violated constraint.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(issue.message())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

impl From<ValidationIssue> for ValidationFailure {
    fn from(issue: ValidationIssue) -> Self {
        Self::new(vec![issue])
    }
}

/// The single capability the bus needs from a validation engine.
///
/// Given a candidate payload, either accept it — yielding the decoded value,
/// which need not be identical to the input — or reject it with the full
/// list of violations.
pub trait SchemaDescriptor: Send + Sync {
    /// Validate and decode `value`.
    fn validate(&self, value: &Value) -> Result<Value, ValidationFailure>;
}
