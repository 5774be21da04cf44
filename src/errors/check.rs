use reqwest::StatusCode;
use std::time::Duration;

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FailureDetail {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual: Option<u16>,
}

impl FailureDetail {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CheckError {
    #[error("Expected status code {}, got {}", .expected.as_u16(), .actual.as_u16())]
    AssertionMismatch {
        expected: StatusCode,
        actual: StatusCode,
    },
    #[error("No response within {}ms", .after.as_millis())]
    Timeout { after: Duration },
    #[error("Failed to reach the application under test")]
    ConnectionError(#[source] reqwest::Error),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl CheckError {
    // reqwest reports its own deadlines as errors too, fold those into `Timeout`
    pub(crate) fn from_transport(e: reqwest::Error, after: Duration) -> Self {
        if e.is_timeout() {
            Self::Timeout { after }
        } else {
            Self::ConnectionError(e)
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AssertionMismatch { .. } => "assertion_mismatch",
            Self::Timeout { .. } => "timeout",
            Self::ConnectionError(_) => "connection_error",
            Self::InvalidRequest(_) => "invalid_request",
            Self::UnexpectedError(_) => "unexpected_error",
        }
    }

    #[must_use]
    pub fn detail(&self) -> FailureDetail {
        let (expected, actual) = match self {
            Self::AssertionMismatch { expected, actual } => {
                (Some(expected.as_u16()), Some(actual.as_u16()))
            }
            _ => (None, None),
        };
        FailureDetail {
            kind: self.kind(),
            message: self.to_string(),
            expected,
            actual,
        }
    }
}
