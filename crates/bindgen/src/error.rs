//! Binding generation error types.

use std::path::PathBuf;

/// Error type for binding generation.
///
/// Every variant is fatal: the run stops at the first one. Declarations that
/// are deliberately left out of the binding surface are not errors, they are
/// reported as [`crate::SkippedDeclaration`]s instead.
#[derive(Debug)]
pub enum BindgenError {
    /// The declaration header (or a tables file) could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The binding tables could not be parsed or are inconsistent
    Config(String),
    /// A declaration line does not follow `<type> <name>(<args>);`
    MalformedDeclaration { line: String, reason: String },
    /// A function name does not carry the API prefix (e.g. `gl`)
    MissingPrefix { function: String, prefix: String },
    /// A singularized or in/out vector function has an unexpected shape
    Precondition { function: String, reason: String },
    /// An argument type has no marshalling rule
    UnrecognizedType { type_name: String, function: String },
    /// A return type has no wrapping rule
    UnrecognizedReturnType { type_name: String, function: String },
    /// A formatting error while writing generated source
    Format(std::fmt::Error),
}

impl std::fmt::Display for BindgenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindgenError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            BindgenError::Config(s) => write!(f, "Invalid binding tables: {}", s),
            BindgenError::MalformedDeclaration { line, reason } => {
                write!(f, "Malformed declaration ({}): {}", reason, line)
            }
            BindgenError::MissingPrefix { function, prefix } => write!(
                f,
                "Function '{}' does not start with the API prefix '{}'",
                function, prefix
            ),
            BindgenError::Precondition { function, reason } => {
                write!(f, "Unexpected signature for '{}': {}", function, reason)
            }
            BindgenError::UnrecognizedType {
                type_name,
                function,
            } => write!(
                f,
                "Unrecognized parameter type '{}' (in {})",
                type_name, function
            ),
            BindgenError::UnrecognizedReturnType {
                type_name,
                function,
            } => write!(
                f,
                "Unrecognized return type '{}' (in {})",
                type_name, function
            ),
            BindgenError::Format(e) => write!(f, "Source generation error: {}", e),
        }
    }
}

impl std::error::Error for BindgenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindgenError::Io { source, .. } => Some(source),
            BindgenError::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::fmt::Error> for BindgenError {
    fn from(e: std::fmt::Error) -> Self {
        BindgenError::Format(e)
    }
}

impl BindgenError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        BindgenError::MalformedDeclaration {
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn precondition(function: &str, reason: impl Into<String>) -> Self {
        BindgenError::Precondition {
            function: function.to_string(),
            reason: reason.into(),
        }
    }
}
