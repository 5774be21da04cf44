use anyhow::Context;
use rustls::crypto::CryptoProvider;
use std::fmt::{Debug, Display};
use tokio::task::JoinError;

use root_status_check::{
    check::ApplicationAddress,
    configuration::get_configuration,
    harness::{Harness, RunReport, Suite},
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // https targets need a process-wide provider, some images don't ship a default one
    let _ = CryptoProvider::install_default(rustls::crypto::aws_lc_rs::default_provider());

    // start logging (or the tokio console, when built with it)
    let use_console = cfg!(feature = "console") && std::env::var("TOKIO_CONSOLE").is_ok();
    if use_console {
        #[cfg(feature = "console")]
        console_subscriber::init();
    } else {
        let subscriber = get_subscriber("root_status_check".into(), "info".into(), std::io::stdout);
        init_subscriber(subscriber);
    }

    // settings decide where the application lives and what we expect from it
    let configuration = get_configuration().context("Failed to read configuration.")?;
    let address = ApplicationAddress::parse(&configuration.application.base_url)?;
    let suite = Suite::root_status(configuration.check.status_check()?);
    let harness = Harness::new(address)?;

    // run the suite on its own task so a panic inside it still gets reported below
    let run_task = tokio::spawn(async move { harness.run(&suite).await });
    let report = report_exit("Status check", run_task.await);

    // any failed case (or no report at all) means a non-zero exit for CI
    match report {
        Some(report) if report.is_success() => Ok(()),
        _ => std::process::exit(1),
    }
}

// log how the suite task ended, print the report when there is one
fn report_exit(task_name: &str, outcome: Result<RunReport, JoinError>) -> Option<RunReport> {
    match outcome {
        Ok(report) => {
            match report.to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => log_failure(task_name, "failed to serialize its report", &e),
            }
            tracing::info!(
                suite = report.suite(),
                passed = report.passed(),
                failed = report.failed(),
                "{} has exited",
                task_name
            );
            Some(report)
        }
        Err(e) => {
            log_failure(task_name, "task failed to complete", &e);
            None
        }
    }
}

fn log_failure(task_name: &str, what: &str, e: &(impl Debug + Display)) {
    tracing::error!(
        error.cause_chain = ?e,
        error.message = %e,
        "{} {}",
        task_name,
        what
    );
}
