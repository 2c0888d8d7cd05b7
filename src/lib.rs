// src/lib.rs
//! PeakPerform client core: session handling, typed access to the data
//! service, per-view caches with derived values, and the mutation flows that
//! keep them in sync. Also ships an in-memory dev server for the same contract.

// ============================================================================
// MODULES
// ============================================================================

pub mod auth;
pub mod common;
pub mod devserver;
pub mod gateway;
pub mod meals;
pub mod mutations;
pub mod views;
pub mod workouts;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use auth::{FileSessionStore, MemorySessionStore, SessionStore, User};
pub use common::{ClientConfig, ClientContext, ExercisePolicy, ServerConfig};
pub use gateway::{Gateway, GatewayError, HttpGateway, MemoryGateway, RecordStore};
pub use views::{DashboardView, LiftsView, MealsView, RunsView, ViewStatus};
