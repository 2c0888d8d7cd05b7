// src/gateway/records.rs
//! In-memory JSON record store shared by [`super::MemoryGateway`] and the dev server.
//!
//! Records are kept as JSON objects per collection, in insertion order. Ids are
//! assigned here, one counter per collection starting at 1, never reused.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Unique fields enforced on insert: (collection, field).
const UNIQUE_FIELDS: &[(&str, &str)] = &[("users", "email")];

/// Child records removed with their parent: (parent collection, child collection, foreign key).
const CASCADES: &[(&str, &str, &str)] = &[("workouts", "exercises", "workout_id")];

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordError {
    #[error("{collection} {id} not found")]
    NotFound { collection: String, id: i64 },
    #[error("{field} already registered")]
    Duplicate { field: String },
    #[error("Record must be a JSON object")]
    NotAnObject,
}

#[derive(Debug, Default)]
struct Collections {
    records: HashMap<String, Vec<Value>>,
    next_ids: HashMap<String, i64>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    inner: Arc<RwLock<Collections>>,
}

fn record_id(record: &Value) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of a collection, optionally only those whose `field` equals `value`.
    pub async fn list(&self, collection: &str, filter: Option<(&str, i64)>) -> Vec<Value> {
        let inner = self.inner.read().await;
        let records = match inner.records.get(collection) {
            Some(records) => records,
            None => return Vec::new(),
        };

        match filter {
            Some((field, value)) => records
                .iter()
                .filter(|r| r.get(field).and_then(Value::as_i64) == Some(value))
                .cloned()
                .collect(),
            None => records.clone(),
        }
    }

    pub async fn get(&self, collection: &str, id: i64) -> Option<Value> {
        let inner = self.inner.read().await;
        inner
            .records
            .get(collection)?
            .iter()
            .find(|r| record_id(r) == Some(id))
            .cloned()
    }

    /// Stores a new record and returns it with its assigned `id`.
    pub async fn insert(&self, collection: &str, record: Value) -> Result<Value, RecordError> {
        let Value::Object(mut fields) = record else {
            return Err(RecordError::NotAnObject);
        };

        let mut inner = self.inner.write().await;

        for (unique_collection, field) in UNIQUE_FIELDS {
            if *unique_collection != collection {
                continue;
            }
            let candidate = fields.get(*field);
            let taken = inner
                .records
                .get(collection)
                .map(|records| records.iter().any(|r| r.get(*field) == candidate))
                .unwrap_or(false);
            if candidate.is_some() && taken {
                return Err(RecordError::Duplicate {
                    field: field.to_string(),
                });
            }
        }

        let next_id = inner.next_ids.entry(collection.to_string()).or_insert(1);
        let id = *next_id;
        *next_id += 1;

        fields.insert("id".to_string(), Value::from(id));
        let record = Value::Object(fields);
        inner
            .records
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());

        debug!(collection = %collection, id = id, "Record inserted");
        Ok(record)
    }

    /// Merges `changes` into the record's fields. The `id` field cannot be changed.
    pub async fn patch(
        &self,
        collection: &str,
        id: i64,
        changes: Value,
    ) -> Result<Value, RecordError> {
        let Value::Object(changes) = changes else {
            return Err(RecordError::NotAnObject);
        };

        let mut inner = self.inner.write().await;
        let record = inner
            .records
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| record_id(r) == Some(id)))
            .ok_or_else(|| RecordError::NotFound {
                collection: collection.to_string(),
                id,
            })?;

        if let Value::Object(fields) = &mut *record {
            merge_fields(fields, changes);
        }

        debug!(collection = %collection, id = id, "Record patched");
        Ok(record.clone())
    }

    /// Removes a record and any child records that reference it.
    pub async fn delete(&self, collection: &str, id: i64) -> Result<Value, RecordError> {
        let mut inner = self.inner.write().await;
        let records = inner
            .records
            .get_mut(collection)
            .ok_or_else(|| RecordError::NotFound {
                collection: collection.to_string(),
                id,
            })?;

        let position = records
            .iter()
            .position(|r| record_id(r) == Some(id))
            .ok_or_else(|| RecordError::NotFound {
                collection: collection.to_string(),
                id,
            })?;
        let removed = records.remove(position);

        for (parent, child, foreign_key) in CASCADES {
            if *parent != collection {
                continue;
            }
            if let Some(children) = inner.records.get_mut(*child) {
                let before = children.len();
                children.retain(|c| c.get(*foreign_key).and_then(Value::as_i64) != Some(id));
                debug!(
                    collection = %child,
                    removed = before - children.len(),
                    "Child records removed"
                );
            }
        }

        debug!(collection = %collection, id = id, "Record deleted");
        Ok(removed)
    }
}

fn merge_fields(fields: &mut Map<String, Value>, changes: Map<String, Value>) {
    for (key, value) in changes {
        if key == "id" {
            continue;
        }
        fields.insert(key, value);
    }
}
