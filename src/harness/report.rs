use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use std::time::Duration;
use uuid::Uuid;

use crate::errors::{CheckError, FailureDetail};

/// Result of one completed test case.
#[derive(Debug)]
pub struct TestOutcome {
    pub suite: String,
    pub case: String,
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub result: Result<StatusCode, CheckError>,
}

impl TestOutcome {
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.result.is_ok()
    }

    fn summary(&self) -> OutcomeSummary<'_> {
        let result = match &self.result {
            Ok(status) => CaseResult::Passed {
                status: status.as_u16(),
            },
            Err(e) => CaseResult::Failed(e.detail()),
        };
        OutcomeSummary {
            suite: &self.suite,
            case: &self.case,
            run_id: self.run_id,
            started_at: self.started_at,
            elapsed_ms: u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
            result,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
enum CaseResult {
    Passed { status: u16 },
    Failed(FailureDetail),
}

#[derive(serde::Serialize)]
struct OutcomeSummary<'a> {
    suite: &'a str,
    case: &'a str,
    run_id: Uuid,
    started_at: DateTime<Utc>,
    elapsed_ms: u64,
    result: CaseResult,
}

#[derive(serde::Serialize)]
struct ReportSummary<'a> {
    suite: &'a str,
    passed: usize,
    failed: usize,
    outcomes: Vec<OutcomeSummary<'a>>,
}

#[derive(Debug)]
pub struct RunReport {
    suite: String,
    outcomes: Vec<TestOutcome>,
}

impl RunReport {
    #[must_use]
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: TestOutcome) {
        self.outcomes.push(outcome);
    }

    #[must_use]
    pub fn suite(&self) -> &str {
        &self.suite
    }

    #[must_use]
    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&ReportSummary {
            suite: &self.suite,
            passed: self.passed(),
            failed: self.failed(),
            outcomes: self.outcomes.iter().map(TestOutcome::summary).collect(),
        })
    }
}
