//! In-memory job record store backed by a `Mutex`-protected `HashMap`.
//! Used by tests and local runs without a durable store.
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    models::{JobOutcome, JobStatus, OnboardingJobModel, PaginationQuery, RepositoryError},
    repositories::{OnboardingJobRepository, PaginatedResult, Repository},
};

#[derive(Debug, Default)]
pub struct InMemoryOnboardingJobRepository {
    store: Mutex<HashMap<String, OnboardingJobModel>>,
}

impl InMemoryOnboardingJobRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
        }
    }

    async fn acquire_lock<T>(lock: &Mutex<T>) -> Result<MutexGuard<T>, RepositoryError> {
        Ok(lock.lock().await)
    }
}

#[async_trait]
impl Repository<OnboardingJobModel, String> for InMemoryOnboardingJobRepository {
    async fn create(
        &self,
        job: OnboardingJobModel,
    ) -> Result<OnboardingJobModel, RepositoryError> {
        let mut store = Self::acquire_lock(&self.store).await?;
        if store.contains_key(&job.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Job with ID {} already exists",
                job.id
            )));
        }
        store.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    async fn get_by_id(&self, id: String) -> Result<OnboardingJobModel, RepositoryError> {
        let store = Self::acquire_lock(&self.store).await?;
        store
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Job with ID {} not found", id)))
    }

    async fn list_all(&self) -> Result<Vec<OnboardingJobModel>, RepositoryError> {
        let store = Self::acquire_lock(&self.store).await?;
        Ok(store.values().cloned().collect())
    }

    async fn list_paginated(
        &self,
        query: PaginationQuery,
    ) -> Result<PaginatedResult<OnboardingJobModel>, RepositoryError> {
        let store = Self::acquire_lock(&self.store).await?;
        let total = store.len() as u64;

        let mut items: Vec<OnboardingJobModel> = store.values().cloned().collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let start = ((query.page.saturating_sub(1)) * query.per_page) as usize;
        let items = items
            .into_iter()
            .skip(start)
            .take(query.per_page as usize)
            .collect();

        Ok(PaginatedResult {
            items,
            total,
            page: query.page,
            per_page: query.per_page,
        })
    }

    async fn update(
        &self,
        id: String,
        job: OnboardingJobModel,
    ) -> Result<OnboardingJobModel, RepositoryError> {
        let mut store = Self::acquire_lock(&self.store).await?;
        if !store.contains_key(&id) {
            return Err(RepositoryError::NotFound(format!(
                "Job with ID {} not found",
                id
            )));
        }
        let mut updated = job;
        updated.id = id.clone();
        store.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_by_id(&self, id: String) -> Result<(), RepositoryError> {
        let mut store = Self::acquire_lock(&self.store).await?;
        if store.remove(&id).is_some() {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(format!(
                "Job with ID {} not found",
                id
            )))
        }
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let store = Self::acquire_lock(&self.store).await?;
        Ok(store.len())
    }
}

#[async_trait]
impl OnboardingJobRepository for InMemoryOnboardingJobRepository {
    async fn mark_started(
        &self,
        id: &str,
        attempt: u32,
    ) -> Result<OnboardingJobModel, RepositoryError> {
        let mut store = Self::acquire_lock(&self.store).await?;
        let job = store
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Job with ID {} not found", id)))?;

        if job.status.is_terminal() {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Job {} is already in terminal state {}",
                id, job.status
            )));
        }

        job.status = JobStatus::Started;
        job.attempt_count = attempt;
        job.updated_at = Utc::now().to_rfc3339();
        Ok(job.clone())
    }

    async fn finalize(
        &self,
        id: &str,
        status: JobStatus,
        outcome: JobOutcome,
    ) -> Result<OnboardingJobModel, RepositoryError> {
        if !status.is_terminal() {
            return Err(RepositoryError::InvalidData(format!(
                "Cannot finalize job {} with non-terminal status {}",
                id, status
            )));
        }

        let mut store = Self::acquire_lock(&self.store).await?;
        let job = store
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Job with ID {} not found", id)))?;

        job.status = status;
        job.result = Some(outcome);
        job.updated_at = Utc::now().to_rfc3339();
        Ok(job.clone())
    }
}
