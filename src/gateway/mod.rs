//! # Gateway Module
//!
//! Typed access to the remote data service's four collections:
//! - [`Resource`]: a record type living in a named collection, with its create payload
//! - [`Patchable`] / [`Deletable`]: which collections accept PATCH and DELETE
//! - [`Gateway`]: the uniform list/create/patch/delete contract
//! - [`HttpGateway`]: reqwest implementation against the real service
//! - [`MemoryGateway`]: in-memory implementation for tests and offline development
//!
//! | Resource | List | Create | Patch | Delete |
//! |---|---|---|---|---|
//! | users | `GET /users` | `POST /users` | - | - |
//! | workouts | `GET /workouts?user_id={id}` | `POST /workouts` | `PATCH /workouts/{id}` | `DELETE /workouts/{id}` |
//! | exercises | `GET /exercises?workout_id={id}` | `POST /exercises` | - | - |
//! | meals | `GET /meals?user_id={id}` | `POST /meals` | - | `DELETE /meals/{id}` |

pub mod error;
pub mod http;
pub mod memory;
pub mod records;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

pub use error::GatewayError;
pub use http::HttpGateway;
pub use memory::MemoryGateway;
pub use records::{RecordError, RecordStore};

/// A record type stored in one collection of the data service.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, also the URL path segment.
    const COLLECTION: &'static str;

    /// Body sent on create. The server assigns the id.
    type Create: Serialize + Send + Sync;

    fn id(&self) -> i64;
}

/// Collections that accept `PATCH /{collection}/{id}`.
pub trait Patchable: Resource {
    type Patch: Serialize + Send + Sync;
}

/// Collections that accept `DELETE /{collection}/{id}`.
pub trait Deletable: Resource {}

/// Which slice of a collection a list call asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    User(i64),
    Workout(i64),
}

impl Scope {
    /// Query parameter for the list URL, if any.
    pub fn query(&self) -> Option<(&'static str, i64)> {
        match self {
            Scope::All => None,
            Scope::User(id) => Some(("user_id", *id)),
            Scope::Workout(id) => Some(("workout_id", *id)),
        }
    }
}

/// Uniform request contract against the data service.
///
/// Every call returns the server's representation of the affected record(s).
/// List order is whatever the server returns and carries no guarantee.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list<R: Resource>(&self, scope: Scope) -> Result<Vec<R>, GatewayError>;

    async fn create<R: Resource>(&self, record: &R::Create) -> Result<R, GatewayError>;

    async fn patch<R: Patchable>(&self, id: i64, fields: &R::Patch) -> Result<R, GatewayError>;

    async fn delete<R: Deletable>(&self, id: i64) -> Result<(), GatewayError>;
}
