//! # Repository Module
//!
//! Data persistence layer for job records using the Repository pattern.
use async_trait::async_trait;

use crate::models::{
    JobOutcome, JobStatus, OnboardingJobModel, PaginationQuery, RepositoryError,
};

mod onboarding_job;
pub use onboarding_job::*;

mod redis_base;
pub use redis_base::*;

#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

#[async_trait]
pub trait Repository<T, ID> {
    async fn create(&self, entity: T) -> Result<T, RepositoryError>;
    async fn get_by_id(&self, id: ID) -> Result<T, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<T>, RepositoryError>;
    async fn list_paginated(
        &self,
        query: PaginationQuery,
    ) -> Result<PaginatedResult<T>, RepositoryError>;
    async fn update(&self, id: ID, entity: T) -> Result<T, RepositoryError>;
    async fn delete_by_id(&self, id: ID) -> Result<(), RepositoryError>;
    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// Store operations the worker engine performs on job records.
///
/// Point writes only; delivery semantics guarantee a single worker owns a
/// job's retries at a time, so no per-key locking is needed here.
#[async_trait]
pub trait OnboardingJobRepository:
    Repository<OnboardingJobModel, String> + Send + Sync + 'static
{
    /// Records the start of attempt `attempt` (status `Started`).
    async fn mark_started(
        &self,
        id: &str,
        attempt: u32,
    ) -> Result<OnboardingJobModel, RepositoryError>;

    /// Writes the terminal status and result for a job.
    async fn finalize(
        &self,
        id: &str,
        status: JobStatus,
        outcome: JobOutcome,
    ) -> Result<OnboardingJobModel, RepositoryError>;
}
