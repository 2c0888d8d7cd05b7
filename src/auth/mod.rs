//! # Auth Module
//!
//! This module handles the client's notion of "who is signed in":
//! - User records and signup/login payloads
//! - The persisted session (file-backed and in-memory stores)
//! - Signup, login and logout flows with their form state

pub mod flow;
pub mod models;
pub mod session;
pub mod validators;

#[cfg(test)]
mod tests;

pub use flow::{login, logout, signup, AuthError, AuthForm, AuthMode};
pub use models::{CreateUserRequest, LoginRequest, User};
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore, SESSION_KEY};
