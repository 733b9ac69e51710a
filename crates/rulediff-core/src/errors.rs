use rulediff_core_types::InputSide;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using RuleDiffError
pub type Result<T> = std::result::Result<T, RuleDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Document loading
    /// Bytes match neither the YAML nor the JSON rule-file encoding
    CorruptedDocument,
    /// Both `spec.groups` and root-level `groups` are populated
    MalformedDocument,

    // Caller input
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::CorruptedDocument => "ERR_CORRUPTED_DOCUMENT",
            ExErrorKind::MalformedDocument => "ERR_MALFORMED_DOCUMENT",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus enough context (operation, file path,
/// which input side) for the caller to tell which of the two documents
/// failed.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<PathBuf>,
    side: Option<InputSide>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            side: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the path of the offending file
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Mark which input of the comparison failed
    pub fn with_side(mut self, side: InputSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn side(&self) -> Option<InputSide> {
        self.side
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(side) = self.side {
            write!(f, " alert {}", side)?;
        }
        if let Some(path) = &self.path {
            write!(f, " {:?}", path.display().to_string())?;
        }
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for rule loading, diffing and reporting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleDiffError {
    /// Input matched neither supported encoding
    #[error("corrupted yaml or json file: {}", path.display())]
    CorruptedDocument { path: PathBuf },

    /// Both document shapes populated at once
    #[error(
        "malformed file {}, both 'spec.groups' and 'groups' should not be populated",
        path.display()
    )]
    MalformedDocument { path: PathBuf },

    /// File could not be read
    #[error("cannot read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// Report serialization failed
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl From<RuleDiffError> for ExError {
    fn from(err: RuleDiffError) -> Self {
        let message = err.to_string();
        match err {
            RuleDiffError::CorruptedDocument { path } => {
                ExError::new(ExErrorKind::CorruptedDocument)
                    .with_op("parse_document")
                    .with_path(path)
                    .with_message(message)
            }
            RuleDiffError::MalformedDocument { path } => {
                ExError::new(ExErrorKind::MalformedDocument)
                    .with_op("parse_document")
                    .with_path(path)
                    .with_message(message)
            }
            RuleDiffError::Io { path, .. } => ExError::new(ExErrorKind::Io)
                .with_op("load_document")
                .with_path(path)
                .with_message(message),
            RuleDiffError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for RuleDiffError {
    fn from(err: serde_json::Error) -> Self {
        RuleDiffError::Serialization {
            message: err.to_string(),
        }
    }
}
