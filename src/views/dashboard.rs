// src/views/dashboard.rs

use tracing::warn;

use crate::auth::{SessionStore, User};
use crate::common::ClientContext;
use crate::gateway::{Gateway, GatewayError, Scope};
use crate::meals::Meal;
use crate::workouts::Workout;

use super::cache::CollectionCache;
use super::derive::{most_recent, total_distance};
use super::{ViewFrame, ViewStatus, RECENT_LIMIT};

/// Overview of every workout and meal of the signed-in user.
pub struct DashboardView<G, S> {
    ctx: ClientContext<G, S>,
    frame: ViewFrame,
    workouts: CollectionCache<Workout>,
    meals: CollectionCache<Meal>,
}

impl<G: Gateway, S: SessionStore> DashboardView<G, S> {
    pub fn new(ctx: ClientContext<G, S>) -> Self {
        Self {
            ctx,
            frame: ViewFrame::new("dashboard"),
            workouts: CollectionCache::new(),
            meals: CollectionCache::new(),
        }
    }

    pub async fn mount(&mut self) -> ViewStatus {
        if self.frame.authenticate(&*self.ctx.session).is_some() {
            let outcome = self.refresh().await;
            self.frame.record_refresh(outcome);
        }
        self.frame.status()
    }

    /// Fetches both collections concurrently. Each cache is replaced on its
    /// own success, so one failing list does not hide the other.
    pub async fn refresh(&mut self) -> Result<(), GatewayError> {
        let Ok(user_id) = self.frame.user_id() else {
            return Ok(());
        };

        let gateway = &*self.ctx.gateway;
        let (workouts, meals) = futures::join!(
            gateway.list::<Workout>(Scope::User(user_id)),
            gateway.list::<Meal>(Scope::User(user_id))
        );

        let mut first_error = None;
        match workouts {
            Ok(items) => self.workouts.replace(items),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to fetch workouts");
                first_error = first_error.or(Some(e));
            }
        }
        match meals {
            Ok(items) => self.meals.replace(items),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to fetch meals");
                first_error = first_error.or(Some(e));
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn status(&self) -> ViewStatus {
        self.frame.status()
    }

    pub fn user(&self) -> Option<&User> {
        self.frame.user()
    }

    pub fn error(&self) -> Option<&str> {
        self.frame.error()
    }

    pub fn workout_count(&self) -> usize {
        self.workouts.len()
    }

    pub fn meal_count(&self) -> usize {
        self.meals.len()
    }

    /// Distance across all workouts, not only runs.
    pub fn total_distance(&self) -> String {
        total_distance(self.workouts.items())
    }

    pub fn recent_workouts(&self) -> Vec<Workout> {
        most_recent(self.workouts.items(), RECENT_LIMIT)
    }

    pub fn recent_meals(&self) -> Vec<Meal> {
        most_recent(self.meals.items(), RECENT_LIMIT)
    }
}
