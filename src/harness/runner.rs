use anyhow::anyhow;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tokio::sync::oneshot;
use tracing::Instrument;
use uuid::Uuid;

use crate::check::ApplicationAddress;
use crate::errors::CheckError;
use crate::harness::{RunReport, Suite, TestCase, TestOutcome};

/// Runs suites against one application under test.
///
/// Every case runs on its own task and reports back over a oneshot
/// channel. A case only counts as complete once that signal arrives.
#[derive(Debug, Clone)]
pub struct Harness {
    client: Client,
    address: ApplicationAddress,
}

impl Harness {
    #[allow(clippy::missing_errors_doc)]
    pub fn new(address: ApplicationAddress) -> Result<Self, CheckError> {
        // report the status the application actually sent, not where it points to
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| CheckError::UnexpectedError(anyhow!(e).context("Failed to build HTTP client")))?;
        Ok(Self::with_client(client, address))
    }

    #[must_use]
    pub const fn with_client(client: Client, address: ApplicationAddress) -> Self {
        Self { client, address }
    }

    #[must_use]
    pub const fn address(&self) -> &ApplicationAddress {
        &self.address
    }

    pub fn spawn_case(&self, suite: &str, case: &TestCase) -> PendingCase {
        let (done, signal) = oneshot::channel();
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "Test case",
            suite = %suite,
            case = %case.name(),
            %run_id,
        );

        // take the timestamps before spawning, the check may start running right away
        let started_at = Utc::now();
        let start = Instant::now();

        let check = case.check().clone();
        let client = self.client.clone();
        let address = self.address.clone();
        tokio::spawn(
            async move {
                let result = check.run(&client, &address).await;
                // the harness may have stopped waiting, nothing to do then
                let _ = done.send(result);
            }
            .instrument(span),
        );

        PendingCase {
            suite: suite.to_string(),
            case: case.name().to_string(),
            run_id,
            started_at,
            start,
            signal,
        }
    }

    #[tracing::instrument(name = "Run suite", skip_all, fields(suite = %suite.name(), address = %self.address))]
    pub async fn run(&self, suite: &Suite) -> RunReport {
        let mut report = RunReport::new(suite.name());

        for case in suite.cases() {
            let outcome = self.spawn_case(suite.name(), case).completed().await;
            match &outcome.result {
                Ok(status) => tracing::info!(
                    case = %outcome.case,
                    status = status.as_u16(),
                    "Test case passed"
                ),
                Err(e) => tracing::error!(
                    case = %outcome.case,
                    error.kind = e.kind(),
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Test case failed"
                ),
            }
            report.push(outcome);
        }

        tracing::info!(
            passed = report.passed(),
            failed = report.failed(),
            "Suite finished"
        );
        report
    }
}

/// A case whose check is still in flight.
pub struct PendingCase {
    suite: String,
    case: String,
    run_id: Uuid,
    started_at: DateTime<Utc>,
    start: Instant,
    signal: oneshot::Receiver<Result<StatusCode, CheckError>>,
}

impl PendingCase {
    /// Waits for the completion signal of the case.
    pub async fn completed(self) -> TestOutcome {
        let result = self.signal.await.unwrap_or_else(|_| {
            Err(CheckError::UnexpectedError(anyhow!(
                "test case task ended without signalling completion"
            )))
        });

        TestOutcome {
            suite: self.suite,
            case: self.case,
            run_id: self.run_id,
            started_at: self.started_at,
            elapsed: self.start.elapsed(),
            result,
        }
    }
}
