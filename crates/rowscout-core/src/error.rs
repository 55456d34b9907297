//! Error types for Rowscout

use thiserror::Error;

/// Result type alias using Rowscout's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Rowscout error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Schema errors (E001-E099)
    #[error("Model '{0}' is not registered. Run `rowscout models` to list registered models.")]
    UnknownModel(String),

    #[error("Association '{association}' is not declared on model '{model}'.")]
    UnknownAssociation { model: String, association: String },

    #[error("Association '{association}' on model '{model}' cannot be resolved: {reason}")]
    UnresolvedShape {
        model: String,
        association: String,
        reason: String,
    },

    #[error("Association cycle detected: {0}")]
    CyclicAssociation(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    // Database errors (E400-E499)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownModel(_) => "E001",
            Self::UnknownAssociation { .. } => "E002",
            Self::UnresolvedShape { .. } => "E003",
            Self::CyclicAssociation(_) => "E004",
            Self::InvalidSchema(_) => "E005",
            Self::Database(_) => "E400",
            Self::Config(_) => "E600",
            Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownModel(_) => Some("rowscout models --schema <file>".to_string()),
            Self::UnknownAssociation { model, .. } => {
                Some(format!("rowscout check --schema <file> # inspect '{model}'"))
            }
            Self::CyclicAssociation(_) => {
                Some("Remove one side of the cycle from search_associated".to_string())
            }
            _ => None,
        }
    }
}
