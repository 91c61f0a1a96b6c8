//! # Onboarding Controller
//!
//! Handles HTTP endpoints for onboarding jobs:
//! - Submitting a signup for asynchronous processing
//! - Polling a job's lifecycle status and result
//! - Listing job records
use actix_web::{web, HttpResponse};
use log::info;

use crate::{
    jobs::{JobProducerTrait, OnboardingRequest},
    models::{
        ApiError, ApiResponse, AppState, OnboardingJobModel, OnboardingJobResponse,
        PaginationMeta, PaginationQuery, SubmitOnboardingRequest, SubmitOnboardingResponse,
    },
    repositories::{OnboardingJobRepository, Repository},
};

fn validate_submission(request: &SubmitOnboardingRequest) -> Result<(), ApiError> {
    if request.username.trim().is_empty() {
        return Err(ApiError::BadRequest("username must not be empty".to_string()));
    }
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(ApiError::BadRequest(
            "email must be a valid address".to_string(),
        ));
    }
    Ok(())
}

/// Accepts a signup, stores the `Pending` record, enqueues exactly one job
/// message, and returns the job id without waiting for execution.
pub async fn submit_onboarding<J: JobProducerTrait, R: OnboardingJobRepository>(
    request: SubmitOnboardingRequest,
    state: web::ThinData<AppState<J, R>>,
) -> Result<HttpResponse, ApiError> {
    validate_submission(&request)?;

    let model = OnboardingJobModel::new(
        request.username.trim(),
        request.email.trim(),
        state.max_attempts,
    );
    let model = state.job_repository.create(model).await?;

    state
        .job_producer
        .produce_onboarding_job(
            OnboardingRequest::new(&model.id, &model.username, &model.email),
            None,
        )
        .await?;

    info!("Onboarding job {} accepted for {}", model.id, model.username);

    Ok(HttpResponse::Accepted().json(ApiResponse::success(SubmitOnboardingResponse {
        job_id: model.id,
    })))
}

/// Looks up one job record. Unknown ids are a 404, distinct from `Pending`:
/// a record exists from the moment submission returns.
pub async fn get_onboarding<J: JobProducerTrait, R: OnboardingJobRepository>(
    job_id: String,
    state: web::ThinData<AppState<J, R>>,
) -> Result<HttpResponse, ApiError> {
    let model = state.job_repository.get_by_id(job_id).await?;

    let response: OnboardingJobResponse = model.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

pub async fn list_onboardings<J: JobProducerTrait, R: OnboardingJobRepository>(
    query: PaginationQuery,
    state: web::ThinData<AppState<J, R>>,
) -> Result<HttpResponse, ApiError> {
    let jobs = state.job_repository.list_paginated(query).await?;

    let items: Vec<OnboardingJobResponse> =
        jobs.items.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        items,
        PaginationMeta {
            total_items: jobs.total,
            current_page: jobs.page,
            per_page: jobs.per_page,
        },
    )))
}
