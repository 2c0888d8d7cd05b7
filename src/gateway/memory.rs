// src/gateway/memory.rs
//! In-memory gateway over a [`RecordStore`].
//!
//! Used as the test double for the data service. Every call is recorded in a
//! request log (`"GET /workouts?user_id=1"`, `"DELETE /meals/3"`, ...) so tests
//! can assert exactly which requests a flow issued. Faults can be injected to
//! simulate an unreachable service or rejected creates.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use super::error::GatewayError;
use super::records::{RecordError, RecordStore};
use super::{Deletable, Gateway, Patchable, Resource, Scope};

type CreateRule = Box<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Default)]
struct Faults {
    offline: bool,
    failing_lists: HashSet<&'static str>,
    rejected_creates: Vec<(&'static str, CreateRule)>,
}

#[derive(Clone, Default)]
pub struct MemoryGateway {
    store: RecordStore,
    requests: Arc<Mutex<Vec<String>>>,
    faults: Arc<Mutex<Faults>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares an existing store, e.g. the one behind a running dev server.
    pub fn with_store(store: RecordStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Every request issued so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Requests whose line starts with `prefix`, e.g. `"DELETE /workouts"`.
    pub fn count_requests(&self, prefix: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }

    pub fn clear_requests(&self) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// While offline, every call fails with [`GatewayError::Network`] and nothing is stored.
    pub fn set_offline(&self, offline: bool) {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .offline = offline;
    }

    /// Makes every list call on `collection` fail with a 503.
    pub fn fail_lists(&self, collection: &'static str) {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .failing_lists
            .insert(collection);
    }

    /// Rejects creates on `collection` whose body matches `rule` with a 422.
    pub fn reject_creates_where<F>(&self, collection: &'static str, rule: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .rejected_creates
            .push((collection, Box::new(rule)));
    }

    fn record_request(&self, line: String) {
        debug!(request = %line, "Memory gateway request");
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }

    fn check_online(&self) -> Result<(), GatewayError> {
        let faults = self.faults.lock().unwrap_or_else(PoisonError::into_inner);
        if faults.offline {
            return Err(GatewayError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn check_list(&self, collection: &str) -> Result<(), GatewayError> {
        let faults = self.faults.lock().unwrap_or_else(PoisonError::into_inner);
        if faults.failing_lists.contains(collection) {
            return Err(GatewayError::Status {
                status: 503,
                detail: Some(format!("{} temporarily unavailable", collection)),
            });
        }
        Ok(())
    }

    fn check_create(&self, collection: &str, body: &Value) -> Result<(), GatewayError> {
        let faults = self.faults.lock().unwrap_or_else(PoisonError::into_inner);
        let rejected = faults
            .rejected_creates
            .iter()
            .any(|(target, rule)| *target == collection && rule(body));
        if rejected {
            return Err(GatewayError::Status {
                status: 422,
                detail: Some(format!("Invalid {} record", collection)),
            });
        }
        Ok(())
    }
}

impl From<RecordError> for GatewayError {
    fn from(e: RecordError) -> Self {
        let status = match e {
            RecordError::NotFound { .. } => 404,
            RecordError::Duplicate { .. } | RecordError::NotAnObject => 400,
        };
        GatewayError::Status {
            status,
            detail: Some(e.to_string()),
        }
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn list<R: Resource>(&self, scope: Scope) -> Result<Vec<R>, GatewayError> {
        let line = match scope.query() {
            Some((key, id)) => format!("GET /{}?{}={}", R::COLLECTION, key, id),
            None => format!("GET /{}", R::COLLECTION),
        };
        self.record_request(line);
        self.check_online()?;
        self.check_list(R::COLLECTION)?;

        self.store
            .list(R::COLLECTION, scope.query())
            .await
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(GatewayError::from))
            .collect()
    }

    async fn create<R: Resource>(&self, record: &R::Create) -> Result<R, GatewayError> {
        self.record_request(format!("POST /{}", R::COLLECTION));
        self.check_online()?;

        let body = serde_json::to_value(record)?;
        self.check_create(R::COLLECTION, &body)?;

        let stored = self.store.insert(R::COLLECTION, body).await?;
        Ok(serde_json::from_value(stored)?)
    }

    async fn patch<R: Patchable>(&self, id: i64, fields: &R::Patch) -> Result<R, GatewayError> {
        self.record_request(format!("PATCH /{}/{}", R::COLLECTION, id));
        self.check_online()?;

        let changes = serde_json::to_value(fields)?;
        let stored = self.store.patch(R::COLLECTION, id, changes).await?;
        Ok(serde_json::from_value(stored)?)
    }

    async fn delete<R: Deletable>(&self, id: i64) -> Result<(), GatewayError> {
        self.record_request(format!("DELETE /{}/{}", R::COLLECTION, id));
        self.check_online()?;

        self.store.delete(R::COLLECTION, id).await?;
        Ok(())
    }
}
