use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StacSchemaError {
    #[error("Unknown extension: {identifier}")]
    UnknownExtension { identifier: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl StacSchemaError {
    pub fn unknown_extension<S: Into<String>>(identifier: S) -> Self {
        Self::UnknownExtension {
            identifier: identifier.into(),
        }
    }

    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Field-level diagnostics when this is a validation failure.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Validation(err) => &err.issues,
            _ => &[],
        }
    }
}

/// One failed check, located by its wire path (e.g. `properties.datetime`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue::new(path, message)],
        }
    }

    /// True if any issue is reported at exactly `path`.
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error: {} issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, StacSchemaError>;
