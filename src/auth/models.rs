//! Authentication data models

use serde::{Deserialize, Serialize};

use crate::gateway::Resource;

/// User record as returned by the data service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl Resource for User {
    const COLLECTION: &'static str = "users";
    type Create = CreateUserRequest;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Signup payload for `POST /users`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Login input. Login is a lookup by email, never a create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
}
