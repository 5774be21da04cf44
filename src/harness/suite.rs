use crate::check::StatusCheck;

#[derive(Debug, Clone)]
pub struct TestCase {
    name: String,
    check: StatusCheck,
}

impl TestCase {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn check(&self) -> &StatusCheck {
        &self.check
    }
}

// named group of cases, run in registration order
#[derive(Debug, Clone)]
pub struct Suite {
    name: String,
    cases: Vec<TestCase>,
}

impl Suite {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Suite named after the request (`GET /`) holding a single case named
    /// after the expected code (`should return status code 200`).
    #[must_use]
    pub fn root_status(check: StatusCheck) -> Self {
        let case_name = format!("should return status code {}", check.expected().as_u16());
        Self::new(check.request().to_string()).case(case_name, check)
    }

    #[must_use]
    pub fn case(mut self, name: impl Into<String>, check: StatusCheck) -> Self {
        self.cases.push(TestCase {
            name: name.into(),
            check,
        });
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }
}
