//! Base functionality shared by Redis-backed repositories.
use log::{error, warn};
use redis::RedisError;
use serde::{Deserialize, Serialize};

use crate::models::RepositoryError;

pub trait RedisRepository {
    fn serialize_entity<T, F>(
        &self,
        entity: &T,
        id_extractor: F,
        entity_type: &str,
    ) -> Result<String, RepositoryError>
    where
        T: Serialize,
        F: Fn(&T) -> &str,
    {
        serde_json::to_string(entity).map_err(|e| {
            let id = id_extractor(entity);
            error!("Serialization failed for {} {}: {}", entity_type, id, e);
            RepositoryError::InvalidData(format!(
                "Failed to serialize {} {}: {}",
                entity_type, id, e
            ))
        })
    }

    fn deserialize_entity<T>(
        &self,
        json: &str,
        entity_id: &str,
        entity_type: &str,
    ) -> Result<T, RepositoryError>
    where
        T: for<'de> Deserialize<'de>,
    {
        serde_json::from_str(json).map_err(|e| {
            error!(
                "Deserialization failed for {} {}: {}",
                entity_type, entity_id, e
            );
            RepositoryError::InvalidData(format!(
                "Failed to deserialize {} {}: {}",
                entity_type, entity_id, e
            ))
        })
    }

    fn map_redis_error(&self, error: RedisError, context: &str) -> RepositoryError {
        warn!("Redis operation failed in context '{}': {}", context, error);

        match error.kind() {
            redis::ErrorKind::TypeError => RepositoryError::InvalidData(format!(
                "Redis data type error in operation '{}': {}",
                context, error
            )),
            redis::ErrorKind::AuthenticationFailed => {
                RepositoryError::ConnectionError("Redis authentication failed".to_string())
            }
            redis::ErrorKind::IoError => RepositoryError::ConnectionError(format!(
                "Redis I/O error in operation '{}': {}",
                context, error
            )),
            _ => RepositoryError::Unknown(format!(
                "Redis operation '{}' failed: {}",
                context, error
            )),
        }
    }
}
