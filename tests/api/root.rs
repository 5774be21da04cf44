use reqwest::StatusCode;

use root_status_check::{check::StatusCheck, harness::Suite};

use crate::helpers::{Fixture, spawn_app};

#[tokio::test]
async fn root_returns_status_code_200() {
    // arrange
    let app = spawn_app(Fixture::Healthy).await;

    // act
    let result = StatusCheck::root_ok()
        .run(&app.api_client, &app.address)
        .await;

    // assert
    assert_eq!(result.unwrap(), StatusCode::OK);
}

#[tokio::test]
async fn get_root_suite_passes_against_healthy_app() {
    // arrange
    let app = spawn_app(Fixture::Healthy).await;
    let suite = Suite::root_status(StatusCheck::root_ok());

    // act
    let report = app.harness.run(&suite).await;

    // assert
    assert_eq!(report.suite(), "GET /");
    assert_eq!(report.outcomes().len(), 1);
    assert_eq!(report.outcomes()[0].case, "should return status code 200");
    assert!(report.is_success());
}

#[tokio::test]
async fn repeated_checks_see_the_same_status() {
    // arrange
    let app = spawn_app(Fixture::Healthy).await;
    let check = StatusCheck::root_ok();

    // act
    let mut statuses = Vec::new();
    for _ in 0..3 {
        statuses.push(check.run(&app.api_client, &app.address).await.unwrap());
    }

    // assert
    assert!(statuses.iter().all(|s| *s == StatusCode::OK));
}

#[tokio::test]
async fn address_reports_the_fixture_port() {
    let app = spawn_app(Fixture::Healthy).await;

    assert_eq!(
        app.address.to_string(),
        format!("http://127.0.0.1:{}/", app.port)
    );
}
