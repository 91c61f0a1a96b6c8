//! Queue transport for onboarding jobs.
//!
//! Redis-backed apalis storage: durable, at-least-once, with redelivery of
//! unacknowledged messages. A message is only acknowledged once the worker
//! reaches a terminal outcome for the invocation, never on hand-off.
use apalis_redis::{Config, RedisStorage};
use color_eyre::{eyre, Result};
use log::error;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};

use crate::config::ServerConfig;

use super::{Job, OnboardingRequest};

pub const ONBOARDING_QUEUE_NAMESPACE: &str = "onboarding_queue";

#[derive(Clone, Debug)]
pub struct Queue {
    pub onboarding_queue: RedisStorage<Job<OnboardingRequest>>,
}

impl Queue {
    async fn storage<T: Serialize + for<'de> Deserialize<'de>>(
        config: &ServerConfig,
        namespace: &str,
    ) -> Result<RedisStorage<T>> {
        let redis_url = config.redis_url.clone();
        let connect_timeout = Duration::from_millis(config.redis_connection_timeout_ms);
        let conn = match timeout(connect_timeout, apalis_redis::connect(redis_url.clone())).await {
            Ok(result) => result.map_err(|e| {
                error!("Failed to connect to Redis at {}: {}", redis_url, e);
                eyre::eyre!(
                    "Failed to connect to Redis. Please ensure Redis is running and accessible at {}. Error: {}",
                    redis_url,
                    e
                )
            })?,
            Err(_) => {
                error!("Timeout connecting to Redis at {}", redis_url);
                return Err(eyre::eyre!(
                    "Timed out after {} milliseconds while connecting to Redis at {}",
                    config.redis_connection_timeout_ms,
                    redis_url
                ));
            }
        };

        // Storage-level retries cover delivery of crashed invocations; the
        // attempt-level retry policy lives in the worker.
        let storage_config = Config::default()
            .set_namespace(namespace)
            .set_max_retries(config.max_attempts as usize);

        Ok(RedisStorage::new_with_config(conn, storage_config))
    }

    pub async fn setup(config: &ServerConfig) -> Result<Self> {
        Ok(Self {
            onboarding_queue: Self::storage(config, ONBOARDING_QUEUE_NAMESPACE).await?,
        })
    }
}
