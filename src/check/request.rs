use reqwest::Method;
use std::fmt;

use crate::errors::CheckError;

/// The method and path sent to the application under test.
/// Built once per test case and consumed by a single exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
}

impl RequestDescriptor {
    #[must_use]
    pub fn root() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
        }
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn get(path: impl Into<String>) -> Result<Self, CheckError> {
        Self::new(Method::GET, path)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn new(method: Method, path: impl Into<String>) -> Result<Self, CheckError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(CheckError::InvalidRequest(format!(
                "path `{path}` must start with `/`"
            )));
        }
        if path.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(CheckError::InvalidRequest(format!(
                "path `{path}` contains whitespace or control characters"
            )));
        }
        Ok(Self { method, path })
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
