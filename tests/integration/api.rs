//! End-to-end behavior of the HTTP controllers against the in-memory stack.
use actix_web::http::StatusCode;

use onboarding_service::{
    api::controllers::onboarding,
    models::{ApiError, JobStatus, PaginationQuery, SubmitOnboardingRequest},
    repositories::Repository,
};

use crate::common::instant_state;

fn signup(username: &str) -> SubmitOnboardingRequest {
    SubmitOnboardingRequest {
        username: username.to_string(),
        email: format!("{}@example.com", username),
    }
}

#[tokio::test]
async fn test_submission_is_acknowledged_before_any_work() {
    let state = instant_state(3);

    let response = onboarding::submit_onboarding(signup("ada"), state.clone())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    // The record exists and is still pending; no worker has run.
    let jobs = state.job_repository.list_all().await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, JobStatus::Pending);
    assert_eq!(jobs[0].attempt_count, 0);

    // Exactly one message went onto the queue.
    let produced = state.job_producer.produced().await;
    assert_eq!(produced.len(), 1);
    assert_eq!(produced[0].job_id, jobs[0].id);
}

#[tokio::test]
async fn test_polling_unknown_id_returns_not_found() {
    let state = instant_state(3);

    let result = onboarding::get_onboarding("no-such-job".to_string(), state).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[actix_web::test]
async fn test_concurrent_submissions_get_distinct_ids() {
    let state = instant_state(3);

    let mut handles = Vec::new();
    for i in 0..100 {
        let state = state.clone();
        handles.push(actix_web::rt::spawn(async move {
            onboarding::submit_onboarding(signup(&format!("user-{}", i)), state).await
        }));
    }
    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    let jobs = state.job_repository.list_all().await.unwrap();
    assert_eq!(jobs.len(), 100);

    let mut ids: Vec<String> = jobs.iter().map(|j| j.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 100);

    // One queue message per accepted submission.
    assert_eq!(state.job_producer.produced().await.len(), 100);
}

#[tokio::test]
async fn test_listing_reflects_submissions() {
    let state = instant_state(3);
    for i in 0..15 {
        onboarding::submit_onboarding(signup(&format!("user-{}", i)), state.clone())
            .await
            .unwrap();
    }

    let page = state
        .job_repository
        .list_paginated(PaginationQuery {
            page: 2,
            per_page: 10,
        })
        .await
        .unwrap();
    assert_eq!(page.total, 15);
    assert_eq!(page.items.len(), 5);
}
