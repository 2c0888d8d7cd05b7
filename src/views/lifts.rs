// src/views/lifts.rs

use futures::future::try_join_all;
use tracing::debug;

use crate::auth::{SessionStore, User};
use crate::common::ClientContext;
use crate::gateway::{Gateway, GatewayError, Scope};
use crate::mutations::{Confirm, CreatedLift, DeleteOutcome, MutationCoordinator, MutationError};
use crate::workouts::{Exercise, Family, LiftEntry, LiftForm, Workout};

use super::cache::CollectionCache;
use super::derive::filter_family;
use super::{ViewFrame, ViewStatus};

/// Strength workouts with their exercises attached.
pub struct LiftsView<G, S> {
    ctx: ClientContext<G, S>,
    frame: ViewFrame,
    lifts: CollectionCache<LiftEntry>,
    pub form: LiftForm,
}

impl<G: Gateway, S: SessionStore> LiftsView<G, S> {
    pub fn new(ctx: ClientContext<G, S>) -> Self {
        Self {
            ctx,
            frame: ViewFrame::new("lifts"),
            lifts: CollectionCache::new(),
            form: LiftForm::default(),
        }
    }

    pub async fn mount(&mut self) -> ViewStatus {
        if self.frame.authenticate(&*self.ctx.session).is_some() {
            let outcome = self.refresh().await;
            self.frame.record_refresh(outcome);
        }
        self.frame.status()
    }

    /// Lists the user's workouts, keeps the strength family, then fetches
    /// each one's exercises concurrently. Any failed fetch fails the whole
    /// refresh and leaves the cache as it was.
    pub async fn refresh(&mut self) -> Result<(), GatewayError> {
        let Ok(user_id) = self.frame.user_id() else {
            return Ok(());
        };

        let gateway = &*self.ctx.gateway;
        let workouts = gateway.list::<Workout>(Scope::User(user_id)).await?;
        let strength = filter_family(&workouts, Family::Strength);
        debug!(user_id = %user_id, count = strength.len(), "Fetching exercises for lifts");

        let entries = try_join_all(strength.into_iter().map(|workout| async move {
            let exercises = gateway
                .list::<Exercise>(Scope::Workout(workout.id))
                .await?;
            Ok::<_, GatewayError>(LiftEntry { workout, exercises })
        }))
        .await?;

        self.lifts.replace(entries);
        Ok(())
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

    pub fn lifts(&self) -> &[LiftEntry] {
        self.lifts.items()
    }

    pub fn cache(&self) -> &CollectionCache<LiftEntry> {
        &self.lifts
    }

    fn coordinator(&self) -> MutationCoordinator<'_, G> {
        MutationCoordinator::new(&*self.ctx.gateway, self.ctx.exercise_policy)
    }

    async fn refresh_after_mutation(&mut self) {
        let outcome = self.refresh().await;
        self.frame.record_refresh(outcome);
    }

    /// Creates the strength workout and its complete exercise rows.
    ///
    /// Under the all-or-nothing policy a failed exercise still refreshes the
    /// list (the workout exists) but keeps the form open for another try.
    pub async fn add_lift(&mut self) -> Result<CreatedLift, MutationError> {
        let user_id = self.frame.user_id()?;
        let request = self.form.to_request(user_id)?;
        let outcome = self
            .coordinator()
            .create_workout_with_exercises(&request, &self.form.exercises)
            .await;

        match outcome {
            Ok(created) => {
                self.refresh_after_mutation().await;
                self.form.reset();
                Ok(created)
            }
            Err(e @ MutationError::PartialExercises { .. }) => {
                self.refresh_after_mutation().await;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn toggle_star(&mut self, workout_id: i64) -> Result<(), MutationError> {
        self.frame.user_id()?;
        let workout = self
            .lifts
            .find(|entry| entry.workout.id == workout_id)
            .map(|entry| entry.workout.clone())
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
