use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    /// The drawing engine could not be set up. Nothing was drawn.
    #[error("rendering engine unavailable: {reason}")]
    EngineUnavailable { reason: String },

    /// A hero image could not be read or decoded. Never fatal to a render.
    #[error("failed to load image {}: {reason}", path.display())]
    ImageLoad { path: PathBuf, reason: String },

    #[error("document generation failed: {message}")]
    Generation { message: String },

    #[error("a document is already being generated")]
    GenerationInProgress,

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl PlanError {
    pub fn generation(message: impl Into<String>) -> Self {
        PlanError::Generation {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        PlanError::Config {
            message: message.into(),
        }
    }

    pub fn engine_unavailable(reason: impl Into<String>) -> Self {
        PlanError::EngineUnavailable {
            reason: reason.into(),
        }
    }

    /// Message shown to the person who pressed "Download PDF".
    pub fn user_message(&self) -> String {
        match self {
            PlanError::EngineUnavailable { .. } => {
                "The PDF engine is not available. Please check the installation and try again."
                    .to_string()
            }
            PlanError::GenerationInProgress => {
                "A PDF is already being generated. Please wait for it to finish.".to_string()
            }
            PlanError::Config { message } => format!("Invalid configuration: {}", message),
            _ => "Failed to generate the PDF. Please try again.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
