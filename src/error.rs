//! Error taxonomy for the gate boundary

use thiserror::Error;

/// Failures surfaced at the decode boundary.
///
/// Range problems are never errors: stats are clamped and reported as
/// notices. Marker problems are never errors either.
#[derive(Debug, Error)]
pub enum GateError {
    /// Atmosphere tag outside the six-entry style table (configuration error:
    /// the generator broke its contract).
    #[error("unknown atmosphere tag: {0:?}")]
    UnknownAtmosphere(String),
    #[error("invalid scene: {0}")]
    InvalidScene(String),
    #[error("scene decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// HTTP request envelope that could not be read
    #[error("bad request: {0}")]
    Request(String),
}

impl GateError {
    /// Stable code for logs and HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            GateError::UnknownAtmosphere(_) => "E001_UNKNOWN_ATMOSPHERE",
            GateError::InvalidScene(_) => "E002_INVALID_SCENE",
            GateError::Decode(_) => "E003_DECODE",
            GateError::Io(_) => "E004_IO",
            GateError::Request(_) => "E005_BAD_REQUEST",
        }
    }

    /// True for upstream contract violations that should fail loudly
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, GateError::UnknownAtmosphere(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_messages() {
        let err = GateError::UnknownAtmosphere("vapor_mall".to_string());
        assert_eq!(err.code(), "E001_UNKNOWN_ATMOSPHERE");
        assert!(err.is_configuration_error());
        assert_eq!(err.to_string(), "unknown atmosphere tag: \"vapor_mall\"");

        let err = GateError::InvalidScene("duplicate option id \"a\"".to_string());
        assert!(!err.is_configuration_error());
        assert!(err.to_string().starts_with("invalid scene"));
    }

    #[test]
    fn test_decode_error_converts() {
        let err: GateError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert_eq!(err.code(), "E003_DECODE");
    }
}
