use reqwest::Url;
use std::fmt;
use std::net::SocketAddr;

use crate::check::RequestDescriptor;
use crate::errors::CheckError;

// base url of the application under test, in-process on an ephemeral port or remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationAddress(Url);

impl ApplicationAddress {
    #[allow(clippy::missing_errors_doc)]
    pub fn parse(base_url: &str) -> Result<Self, CheckError> {
        let url = Url::parse(base_url)
            .map_err(|e| CheckError::InvalidRequest(format!("base url `{base_url}`: {e}")))?;

        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(CheckError::InvalidRequest(format!(
                "unsupported scheme `{other}` in base url `{base_url}`"
            ))),
        }
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn from_socket_addr(addr: SocketAddr) -> Result<Self, CheckError> {
        Self::parse(&format!("http://{addr}"))
    }

    // an absolute request path replaces whatever path the base url carries
    #[allow(clippy::missing_errors_doc)]
    pub fn join(&self, request: &RequestDescriptor) -> Result<Url, CheckError> {
        self.0
            .join(request.path())
            .map_err(|e| CheckError::InvalidRequest(format!("path `{}`: {e}", request.path())))
    }
}

impl fmt::Display for ApplicationAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
