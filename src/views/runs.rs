// src/views/runs.rs

use crate::auth::{SessionStore, User};
use crate::common::ClientContext;
use crate::gateway::{Gateway, GatewayError, Scope};
use crate::mutations::{Confirm, DeleteOutcome, MutationCoordinator, MutationError};
use crate::workouts::{Family, RunForm, Workout};

use super::cache::CollectionCache;
use super::derive::{filter_family, total_distance};
use super::{ViewFrame, ViewStatus};

/// Running workouts of the signed-in user, with the run entry form.
pub struct RunsView<G, S> {
    ctx: ClientContext<G, S>,
    frame: ViewFrame,
    runs: CollectionCache<Workout>,
    pub form: RunForm,
}

impl<G: Gateway, S: SessionStore> RunsView<G, S> {
    pub fn new(ctx: ClientContext<G, S>) -> Self {
        Self {
            ctx,
            frame: ViewFrame::new("runs"),
            runs: CollectionCache::new(),
            form: RunForm::default(),
        }
    }

    pub async fn mount(&mut self) -> ViewStatus {
        if self.frame.authenticate(&*self.ctx.session).is_some() {
            let outcome = self.refresh().await;
            self.frame.record_refresh(outcome);
        }
        self.frame.status()
    }

    pub async fn refresh(&mut self) -> Result<(), GatewayError> {
        let Ok(user_id) = self.frame.user_id() else {
            return Ok(());
        };
        let workouts = self
            .ctx
            .gateway
            .list::<Workout>(Scope::User(user_id))
            .await?;
        self.runs.replace(filter_family(&workouts, Family::Running));
        Ok(())
    }

    pub fn status(&self) -> ViewStatus {
        self.frame.status()
    }

    pub fn user(&self) -> Option<&User> {
        self.frame.user()
    }

    /// Message of the last failed refresh, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.frame.error()
    }

    pub fn runs(&self) -> &[Workout] {
        self.runs.items()
    }

    pub fn cache(&self) -> &CollectionCache<Workout> {
        &self.runs
    }

    pub fn total_distance(&self) -> String {
        total_distance(self.runs.items())
    }

    fn coordinator(&self) -> MutationCoordinator<'_, G> {
        MutationCoordinator::new(&*self.ctx.gateway, self.ctx.exercise_policy)
    }

    async fn refresh_after_mutation(&mut self) {
        let outcome = self.refresh().await;
        self.frame.record_refresh(outcome);
    }

    /// Submits the run form. On success the list is refreshed and the form
    /// reset; on failure the form keeps its contents.
    pub async fn add_run(&mut self) -> Result<Workout, MutationError> {
        let user_id = self.frame.user_id()?;
        let request = self.form.to_request(user_id)?;
        let workout = self.coordinator().create_workout(&request).await?;

        self.refresh_after_mutation().await;
        self.form.reset();
        Ok(workout)
    }

    pub async fn toggle_star(&mut self, workout_id: i64) -> Result<(), MutationError> {
        self.frame.user_id()?;
        let workout = self
            .runs
            .find(|w| w.id == workout_id)
            .cloned()
            .ok_or(MutationError::UnknownWorkout(workout_id))?;

        self.coordinator().toggle_star(&workout).await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn delete_workout<C: Confirm + ?Sized>(
        &mut self,
        workout_id: i64,
        confirm: &C,
    ) -> Result<DeleteOutcome, MutationError> {
        self.frame.user_id()?;
        let outcome = self.coordinator().delete_workout(workout_id, confirm).await?;
        if outcome == DeleteOutcome::Deleted {
            self.refresh_after_mutation().await;
        }
        Ok(outcome)
    }
}
