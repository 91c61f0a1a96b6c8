//! Redis-backed implementation of the job record store.
//!
//! Records are JSON values under `{prefix}:job:{id}`; a companion set
//! `{prefix}:job_ids` supports listing. Only point lookups and point writes
//! are needed by the engine, so no secondary indexes are kept.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::{
    models::{JobOutcome, JobStatus, OnboardingJobModel, PaginationQuery, RepositoryError},
    repositories::{OnboardingJobRepository, PaginatedResult, RedisRepository, Repository},
};

const JOB_PREFIX: &str = "job";
const JOB_LIST_KEY: &str = "job_ids";
const ENTITY_TYPE: &str = "onboarding_job";

#[derive(Clone)]
pub struct RedisOnboardingJobRepository {
    pub client: Arc<ConnectionManager>,
    pub key_prefix: String,
}

impl RedisRepository for RedisOnboardingJobRepository {}

impl RedisOnboardingJobRepository {
    pub fn new(
        connection_manager: Arc<ConnectionManager>,
        key_prefix: String,
    ) -> Result<Self, RepositoryError> {
        if key_prefix.is_empty() {
            return Err(RepositoryError::InvalidData(
                "Redis key prefix cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            client: connection_manager,
            key_prefix,
        })
    }

    /// Key for one job record: `{prefix}:job:{id}`.
    fn job_key(&self, id: &str) -> String {
        format!("{}:{}:{}", self.key_prefix, JOB_PREFIX, id)
    }

    /// Key for the set of all job ids: `{prefix}:job_ids`.
    fn job_list_key(&self) -> String {
        format!("{}:{}", self.key_prefix, JOB_LIST_KEY)
    }

    async fn write_job(&self, job: &OnboardingJobModel) -> Result<(), RepositoryError> {
        let json = self.serialize_entity(job, |j| &j.id, ENTITY_TYPE)?;
        let mut conn = self.client.as_ref().clone();
        let _: () = conn
            .set(self.job_key(&job.id), json)
            .await
            .map_err(|e| self.map_redis_error(e, "write_job"))?;
        Ok(())
    }

    async fn fetch_job(&self, id: &str) -> Result<Option<OnboardingJobModel>, RepositoryError> {
        let mut conn = self.client.as_ref().clone();
        let value: Option<String> = conn
            .get(self.job_key(id))
            .await
            .map_err(|e| self.map_redis_error(e, "fetch_job"))?;

        value
            .map(|json| self.deserialize_entity(&json, id, ENTITY_TYPE))
            .transpose()
    }
}

#[async_trait]
impl Repository<OnboardingJobModel, String> for RedisOnboardingJobRepository {
    async fn create(
        &self,
        job: OnboardingJobModel,
    ) -> Result<OnboardingJobModel, RepositoryError> {
        let mut conn = self.client.as_ref().clone();
        let exists: bool = conn
            .exists(self.job_key(&job.id))
            .await
            .map_err(|e| self.map_redis_error(e, "create_exists_check"))?;
        if exists {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Job with ID {} already exists",
                job.id
            )));
        }

        self.write_job(&job).await?;
        let _: () = conn
            .sadd(self.job_list_key(), &job.id)
            .await
            .map_err(|e| self.map_redis_error(e, "create_index"))?;

        debug!("Created job record {}", job.id);
        Ok(job)
    }

    async fn get_by_id(&self, id: String) -> Result<OnboardingJobModel, RepositoryError> {
        self.fetch_job(&id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Job with ID {} not found", id)))
    }

    async fn list_all(&self) -> Result<Vec<OnboardingJobModel>, RepositoryError> {
        let mut conn = self.client.as_ref().clone();
        let ids: Vec<String> = conn
            .smembers(self.job_list_key())
            .await
            .map_err(|e| self.map_redis_error(e, "list_all_ids"))?;

        if ids.is_empty() {
            return Ok(vec![]);
        }

        let keys: Vec<String> = ids.iter().map(|id| self.job_key(id)).collect();
        let values: Vec<Option<String>> = conn
            .mget(&keys)
            .await
            .map_err(|e| self.map_redis_error(e, "list_all_fetch"))?;

        let mut jobs = Vec::with_capacity(values.len());
        for (id, value) in ids.iter().zip(values) {
            match value {
                Some(json) => jobs.push(self.deserialize_entity(&json, id, ENTITY_TYPE)?),
                None => warn!("Job {} indexed but record missing", id),
            }
        }
        Ok(jobs)
    }

    async fn list_paginated(
        &self,
        query: PaginationQuery,
    ) -> Result<PaginatedResult<OnboardingJobModel>, RepositoryError> {
        let mut jobs = self.list_all().await?;
        jobs.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let total = jobs.len() as u64;
        let start = ((query.page.saturating_sub(1)) * query.per_page) as usize;
        let items = jobs
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
        if self.fetch_job(&id).await?.is_none() {
            return Err(RepositoryError::NotFound(format!(
                "Job with ID {} not found",
                id
            )));
        }

        let mut updated = job;
        updated.id = id;
        self.write_job(&updated).await?;
        Ok(updated)
    }

    async fn delete_by_id(&self, id: String) -> Result<(), RepositoryError> {
        let mut conn = self.client.as_ref().clone();
        let removed: u64 = conn
            .del(self.job_key(&id))
            .await
            .map_err(|e| self.map_redis_error(e, "delete_job"))?;
        let _: () = conn
            .srem(self.job_list_key(), &id)
            .await
            .map_err(|e| self.map_redis_error(e, "delete_index"))?;

        if removed == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Job with ID {} not found",
                id
            )));
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let mut conn = self.client.as_ref().clone();
        let count: u64 = conn
            .scard(self.job_list_key())
            .await
            .map_err(|e| self.map_redis_error(e, "count"))?;
        Ok(count as usize)
    }
}

#[async_trait]
impl OnboardingJobRepository for RedisOnboardingJobRepository {
    async fn mark_started(
        &self,
        id: &str,
        attempt: u32,
    ) -> Result<OnboardingJobModel, RepositoryError> {
        let mut job = self.get_by_id(id.to_string()).await?;

        if job.status.is_terminal() {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Job {} is already in terminal state {}",
                id, job.status
            )));
        }

        job.status = JobStatus::Started;
        job.attempt_count = attempt;
        job.updated_at = Utc::now().to_rfc3339();
        self.write_job(&job).await?;
        Ok(job)
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

        let mut job = self.get_by_id(id.to_string()).await?;
        job.status = status;
        job.result = Some(outcome);
        job.updated_at = Utc::now().to_rfc3339();
        self.write_job(&job).await?;
        Ok(job)
    }
}

impl std::fmt::Debug for RedisOnboardingJobRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisOnboardingJobRepository")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}
