//! This module defines the HTTP routes for onboarding operations.
//! It includes handlers for submitting a signup, polling a job record, and
//! listing job records. The routes are integrated with the Actix-web framework
//! and interact with the onboarding controller.
use crate::{
    api::controllers::onboarding,
    models::{
        ApiResponse, DefaultAppState, OnboardingJobResponse, PaginationQuery,
        SubmitOnboardingRequest, SubmitOnboardingResponse,
    },
};
use actix_web::{get, post, web, Responder};

/// Accepts a signup and enqueues it for asynchronous processing.
#[utoipa::path(
    post,
    path = "/api/v1/onboardings",
    tag = "Onboardings",
    operation_id = "submitOnboarding",
    request_body = SubmitOnboardingRequest,
    responses(
        (
            status = 202,
            description = "Onboarding accepted for processing",
            body = ApiResponse<SubmitOnboardingResponse>
        ),
        (
            status = 400,
            description = "BadRequest",
            body = ApiResponse<String>,
            example = json!({
                "success": false,
                "message": "Bad Request",
                "data": null
            })
        ),
        (
            status = 503,
            description = "Queue unavailable",
            body = ApiResponse<String>,
            example = json!({
                "success": false,
                "message": "Service Unavailable",
                "data": null
            })
        ),
    )
)]
#[post("/onboardings")]
async fn submit_onboarding(
    request: web::Json<SubmitOnboardingRequest>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    onboarding::submit_onboarding(request.into_inner(), data).await
}

/// Retrieves the record of a specific onboarding job by ID.
#[utoipa::path(
    get,
    path = "/api/v1/onboardings/{job_id}",
    tag = "Onboardings",
    operation_id = "getOnboarding",
    params(
        ("job_id" = String, Path, description = "The unique identifier of the onboarding job")
    ),
    responses(
        (
            status = 200,
            description = "Onboarding job retrieved successfully",
            body = ApiResponse<OnboardingJobResponse>
        ),
        (
            status = 404,
            description = "Onboarding job not found",
            body = ApiResponse<String>,
            example = json!({
                "success": false,
                "message": "Not Found",
                "data": null
            })
        ),
    )
)]
#[get("/onboardings/{job_id}")]
async fn get_onboarding(
    job_id: web::Path<String>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    onboarding::get_onboarding(job_id.into_inner(), data).await
}

/// Lists all onboarding jobs with pagination support.
#[utoipa::path(
    get,
    path = "/api/v1/onboardings",
    tag = "Onboardings",
    operation_id = "listOnboardings",
    params(
        ("page" = Option<u32>, Query, description = "Page number for pagination (starts at 1)"),
        ("per_page" = Option<u32>, Query, description = "Number of items per page (default: 10)")
    ),
    responses(
        (
            status = 200,
            description = "Onboarding job list retrieved successfully",
            body = ApiResponse<Vec<OnboardingJobResponse>>
        ),
    )
)]
#[get("/onboardings")]
async fn list_onboardings(
    query: web::Query<PaginationQuery>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    onboarding::list_onboardings(query.into_inner(), data).await
}

/// Initializes the onboarding routes.
pub fn init(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(submit_onboarding)
        .service(get_onboarding)
        .service(list_onboardings);
}
