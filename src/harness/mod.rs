mod report;
mod runner;
mod suite;

pub use report::{RunReport, TestOutcome};
pub use runner::{Harness, PendingCase};
pub use suite::{Suite, TestCase};
