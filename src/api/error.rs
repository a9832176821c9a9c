use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    Status { url: String, status: u16 },
    /// Connection refused, timeout, DNS failure and the like
    Network { url: String, message: String },
    /// Body was not the JSON shape we expected
    Decode { url: String, message: String },
}

impl ApiError {
    /// Server errors and transport failures are worth another attempt.
    /// Client errors and bad payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::Network { .. } => true,
            ApiError::Decode { .. } => false,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status { url, status } => write!(f, "{} returned HTTP {}", url, status),
            ApiError::Network { url, message } => write!(f, "Could not reach {}: {}", url, message),
            ApiError::Decode { url, message } => write!(f, "Unexpected response from {}: {}", url, message),
        }
    }
}

impl std::error::Error for ApiError {}
