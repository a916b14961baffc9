//! Object store abstraction and backends.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ObjectStoreError;

/// Get-object-by-key access to an object storage backend.
///
/// Constructed once at process start and injected into whatever needs
/// it; torn down with the process.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download the full object named by `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, ObjectStoreError>;
}

/// S3-backed object store for a single bucket.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a store from the ambient AWS configuration (environment,
    /// profile, instance role).
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_no_such_key() {
                    ObjectStoreError::NotFound {
                        key: key.to_string(),
                    }
                } else {
                    ObjectStoreError::Backend(service.to_string())
                }
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| ObjectStoreError::Backend(e.to_string()))?;

        tracing::debug!(key, bucket = %self.bucket, "Downloaded object");
        Ok(data.into_bytes().to_vec())
    }
}

/// In-memory object store for tests.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object under `key`.
    pub fn insert(&self, key: impl Into<String>, bytes: Vec<u8>) {
        self.objects
            .lock()
            .expect("object map poisoned")
            .insert(key.into(), bytes);
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        self.objects
            .lock()
            .expect("object map poisoned")
            .get(key)
            .cloned()
            .ok_or_else(|| ObjectStoreError::NotFound {
                key: key.to_string(),
            })
    }
}
