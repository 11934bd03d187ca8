use crate::models::Phase;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Request error: {0}")]
    RequestError(String),

    #[error("API error: {message} (status: {status})")]
    RemoteError { status: u16, message: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Encode error: {0}")]
    EncodeError(String),

    #[error("Failed to generate phase '{phase}': {source}")]
    PhaseFailed {
        phase: Phase,
        #[source]
        source: Box<GenerationError>,
    },

    #[error("No generated image to save yet")]
    NothingToSave,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GenerationError {
    /// Extra guidance for remote failures the user can usually fix themselves.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            GenerationError::RemoteError { status, message } => {
                if message.contains("must be provided") {
                    Some("Check that your API key is correct and has been entered.")
                } else if *status == 403 {
                    Some("Make sure you accepted the model's terms of use on the provider's site.")
                } else {
                    None
                }
            }
            GenerationError::PhaseFailed { source, .. } => source.hint(),
            _ => None,
        }
    }

    /// The phase that aborted a multi-phase run, if any.
    pub fn failed_phase(&self) -> Option<Phase> {
        match self {
            GenerationError::PhaseFailed { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = GenerationError::RemoteError {
            status: 503,
            message: "Model is currently loading".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error: Model is currently loading (status: 503)"
        );
    }

    #[test]
    fn test_hints() {
        let missing = GenerationError::RemoteError {
            status: 400,
            message: "Authorization header must be provided".into(),
        };
        assert!(missing.hint().unwrap().contains("API key"));

        let forbidden = GenerationError::RemoteError {
            status: 403,
            message: "gated".into(),
        };
        assert!(forbidden.hint().unwrap().contains("terms of use"));

        let wrapped = GenerationError::PhaseFailed {
            phase: Phase::Teen,
            source: Box::new(forbidden),
        };
        assert!(wrapped.hint().is_some());
        assert_eq!(wrapped.failed_phase(), Some(Phase::Teen));

        assert!(GenerationError::NothingToSave.hint().is_none());
    }
}
