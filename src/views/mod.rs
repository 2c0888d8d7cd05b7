//! # Views Module
//!
//! The four protected views of the client. Each view:
//! - checks the session on mount and redirects without any request when absent
//! - owns its collection cache and refreshes it from the gateway
//! - derives display values from the cache only
//! - routes user actions through the mutation coordinator, then refreshes
//!
//! Views take `&mut self` for every async step, so a response can only land in
//! a view that is still alive.

pub mod cache;
pub mod dashboard;
pub mod derive;
pub mod lifts;
pub mod meals;
pub mod runs;


pub use cache::CollectionCache;
pub use dashboard::DashboardView;
pub use derive::{
    daily_nutrition, filter_family, format_tenths, most_recent, total_distance, total_distance_km,
    Dated,
};
pub use lifts::LiftsView;
pub use meals::MealsView;
pub use runs::RunsView;

use tracing::{debug, info, warn};

use crate::auth::{SessionStore, User};
use crate::mutations::MutationError;

/// How many entries the dashboard lists per collection.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Unmounted,
    /// No session; nothing was fetched.
    RedirectedToLogin,
    Ready,
}

/// Mount bookkeeping shared by every view.
#[derive(Debug, Clone)]
pub(crate) struct ViewFrame {
    name: &'static str,
    status: ViewStatus,
    user: Option<User>,
    error: Option<String>,
}

impl ViewFrame {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            status: ViewStatus::Unmounted,
            user: None,
            error: None,
        }
    }

    /// Reads the session. Returns the user id to fetch for, or `None` after
    /// switching to the redirect state.
    pub(crate) fn authenticate<S: SessionStore>(&mut self, session: &S) -> Option<i64> {
        match session.current_user() {
            Some(user) => {
                debug!(view = self.name, user_id = %user.id, "Mounting view");
                let id = user.id;
                self.user = Some(user);
                self.status = ViewStatus::Ready;
                Some(id)
            }
            None => {
                info!(view = self.name, "No session, redirecting to login");
                self.user = None;
                self.status = ViewStatus::RedirectedToLogin;
                None
            }
        }
    }

    pub(crate) fn status(&self) -> ViewStatus {
        self.status
    }

    pub(crate) fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub(crate) fn user_id(&self) -> Result<i64, MutationError> {
        self.user
            .as_ref()
            .map(|u| u.id)
            .ok_or(MutationError::NotSignedIn)
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn record_refresh<E: std::fmt::Display>(&mut self, outcome: Result<(), E>) {
        match outcome {
            Ok(()) => self.error = None,
            Err(e) => {
                warn!(view = self.name, error = %e, "Refresh failed, keeping previous data");
                self.error = Some(e.to_string());
            }
        }
    }
}
