use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Missing provider credential: {0}")]
    MissingCredential(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown device preset: {0}")]
    UnknownDevice(String),

    #[error("Invalid animation format: {0}")]
    InvalidFormat(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl CaptureError {
    /// Errors caused by the caller's input rather than by the service.
    ///
    /// Client errors map to an HTTP 200 response with `success: false`;
    /// everything else surfaces as a generic 500.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CaptureError::InvalidUrl(_)
                | CaptureError::UnknownDevice(_)
                | CaptureError::InvalidFormat(_)
                | CaptureError::MalformedRequest(_)
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CaptureError::InvalidUrl(_) => ErrorSeverity::Low,
            CaptureError::UnknownDevice(_) => ErrorSeverity::Low,
            CaptureError::InvalidFormat(_) => ErrorSeverity::Low,
            CaptureError::MalformedRequest(_) => ErrorSeverity::Low,
            CaptureError::MissingCredential(_) => ErrorSeverity::High,
            CaptureError::ConfigurationError(_) => ErrorSeverity::High,
            _ => ErrorSeverity::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for CaptureError {
    fn from(err: serde_json::Error) -> Self {
        CaptureError::SerializationError(err.to_string())
    }
}

impl From<url::ParseError> for CaptureError {
    fn from(err: url::ParseError) -> Self {
        CaptureError::InvalidUrl(err.to_string())
    }
}
