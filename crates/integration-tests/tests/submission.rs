//! The add-pet workflow wired to real HTTP services on a stub server.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use pawcart_app::AppState;
use pawcart_app::config::AppConfig;
use pawcart_app::http::HttpError;
use pawcart_app::navigation::AlertAction;
use pawcart_app::submission::{FAILURE_MESSAGE, SubmissionError, SubmissionOutcome};
use pawcart_core::PetForm;
use pawcart_integration_tests::{STUB_IMAGE_URL, StubServer};

fn state_for(server: &StubServer, image_path: &str, echo_path: &str) -> AppState {
    let image = server.url(image_path);
    let echo = server.url(echo_path);
    let config = AppConfig::from_lookup(|key| match key {
        "PAWCART_IMAGE_URL" => Some(image.clone()),
        "PAWCART_ECHO_URL" => Some(echo.clone()),
        "PAWCART_HTTP_TIMEOUT_MS" => Some("300".to_string()),
        _ => None,
    })
    .unwrap();
    AppState::new(config).unwrap()
}

fn buddy() -> PetForm {
    PetForm::new("Buddy", "Beagle", "3", "500")
}

#[tokio::test]
async fn test_successful_submission() {
    let server = StubServer::spawn().await.unwrap();
    let state = state_for(&server, "/image", "/echo");

    let outcome = state.submission().submit(&buddy()).await;

    assert!(outcome.is_success());
    let pets = state.store().pets();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].image_url, STUB_IMAGE_URL);
    assert_eq!(state.store().current_pet().unwrap().pet_name, "Buddy");

    let echoed = server.echo_log().bodies();
    assert_eq!(echoed.len(), 1);
    assert_eq!(echoed[0]["petName"], "Buddy");
    assert_eq!(echoed[0]["breed"], "Beagle");
    assert_eq!(echoed[0]["age"], 3);
    assert_eq!(echoed[0]["price"], 500.0);
    assert_eq!(echoed[0]["imageUrl"], STUB_IMAGE_URL);
    assert_eq!(echoed[0]["id"], pets[0].id.as_str());

    let alert = outcome.alert().unwrap();
    assert_eq!(alert.actions, vec![AlertAction::AddAnother, AlertAction::ViewPets]);
}

#[tokio::test]
async fn test_image_timeout_commits_pet_without_image() {
    let server = StubServer::spawn().await.unwrap();
    let state = state_for(&server, "/image/slow", "/echo");

    let outcome = state.submission().submit(&buddy()).await;

    assert!(outcome.is_success());
    let pets = state.store().pets();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].image_url, "");
    assert!(!pets[0].has_image());
}

#[tokio::test]
async fn test_empty_image_message_commits_pet_without_image() {
    let server = StubServer::spawn().await.unwrap();
    let state = state_for(&server, "/image/empty", "/echo");

    let outcome = state.submission().submit(&buddy()).await;

    assert!(outcome.is_success());
    assert_eq!(state.store().pets()[0].image_url, "");
}

#[tokio::test]
async fn test_echo_500_keeps_pet_and_reports_failure() {
    let server = StubServer::spawn().await.unwrap();
    let state = state_for(&server, "/image", "/echo/fail");

    let outcome = state.submission().submit(&buddy()).await;

    assert!(!outcome.is_success());
    assert!(matches!(
        outcome.error(),
        Some(SubmissionError::Echo(HttpError::Status { status: 500, .. }))
    ));
    assert_eq!(outcome.alert().unwrap().message, FAILURE_MESSAGE);

    let pets = state.store().pets();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].image_url, STUB_IMAGE_URL);
    assert_eq!(&pets[0], outcome.committed_pet().unwrap());
}

#[tokio::test]
async fn test_echo_timeout_keeps_pet() {
    let server = StubServer::spawn().await.unwrap();
    let state = state_for(&server, "/image", "/echo/slow");

    let outcome = state.submission().submit(&buddy()).await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::EchoFailed {
            error: SubmissionError::Echo(HttpError::Timeout { .. }),
            ..
        }
    ));
    assert_eq!(state.store().pets().len(), 1);
}

#[tokio::test]
async fn test_abandoned_submission_leaves_store_untouched() {
    let server = StubServer::spawn().await.unwrap();
    let state = state_for(&server, "/image/slow", "/echo");
    let submission = state.submission();

    let abandoned =
        tokio::time::timeout(Duration::from_millis(50), submission.submit(&buddy())).await;

    assert!(abandoned.is_err());
    assert!(!submission.is_submitting());
    assert!(state.store().pets().is_empty());
    assert!(server.echo_log().bodies().is_empty());
}
