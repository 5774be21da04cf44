use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::check::{ApplicationAddress, RequestDescriptor};
use crate::errors::CheckError;

/// Sends one request to the application under test and compares the
/// response status with an expected code.
///
/// The check never retries and only reads from the application. The
/// whole exchange, body included, has to finish within `timeout`.
#[derive(Debug, Clone)]
pub struct StatusCheck {
    request: RequestDescriptor,
    expected: StatusCode,
    timeout: Duration,
}

impl StatusCheck {
    pub const DEFAULT_TIMEOUT_MILLISECONDS: u64 = 2000;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(Self::DEFAULT_TIMEOUT_MILLISECONDS);

    #[must_use]
    pub const fn new(request: RequestDescriptor, expected: StatusCode) -> Self {
        Self {
            request,
            expected,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// `GET /` must answer `200 OK`.
    #[must_use]
    pub fn root_ok() -> Self {
        Self::new(RequestDescriptor::root(), StatusCode::OK)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    #[must_use]
    pub const fn expected(&self) -> StatusCode {
        self.expected
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[allow(clippy::missing_errors_doc)]
    #[tracing::instrument(
        name = "Run status check",
        skip(self, client),
        fields(
            request = %self.request,
            expected = self.expected.as_u16(),
            actual = tracing::field::Empty,
        )
    )]
    pub async fn run(
        &self,
        client: &Client,
        address: &ApplicationAddress,
    ) -> Result<StatusCode, CheckError> {
        let url = address.join(&self.request)?;

        let exchange = async move {
            let mut response = client
                .request(self.request.method().clone(), url)
                .send()
                .await
                .map_err(|e| CheckError::from_transport(e, self.timeout))?;
            let status = response.status();
            // drain the body so a response that stalls mid-stream still counts against the timeout,
            // chunk by chunk so nothing is buffered
            while response
                .chunk()
                .await
                .map_err(|e| CheckError::from_transport(e, self.timeout))?
                .is_some()
            {}
            Ok::<_, CheckError>(status)
        };

        let actual = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| CheckError::Timeout {
                after: self.timeout,
            })??;
        tracing::Span::current().record("actual", actual.as_u16());

        if actual == self.expected {
            Ok(actual)
        } else {
            Err(CheckError::AssertionMismatch {
                expected: self.expected,
                actual,
            })
        }
    }
}
