// src/mutations/coordinator.rs

use futures::future::join_all;
use tracing::{error, info, warn};

use super::Confirm;
use crate::common::{ExercisePolicy, ValidationResult};
use crate::gateway::{Gateway, GatewayError};
use crate::meals::{CreateMealRequest, Meal};
use crate::workouts::{
    CreateWorkoutRequest, Exercise, ExerciseRow, UpdateWorkoutRequest, Workout,
};

pub const DELETE_WORKOUT_PROMPT: &str = "Are you sure you want to delete this workout?";

#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("{0}")]
    Validation(String),
    #[error("Request failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error("Workout {workout_id} saved but {failed} of {attempted} exercises failed")]
    PartialExercises {
        workout_id: i64,
        failed: usize,
        attempted: usize,
    },
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Workout {0} is not in the current list")]
    UnknownWorkout(i64),
}

impl From<ValidationResult> for MutationError {
    fn from(result: ValidationResult) -> Self {
        MutationError::Validation(result.summary())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
}

/// Result of a workout-with-exercises submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedLift {
    pub workout: Workout,
    pub exercises: Vec<Exercise>,
    /// Exercise creates that failed and were tolerated by the policy.
    pub failed: usize,
}

/// Issues the writes behind each user action. Holds no cache.
pub struct MutationCoordinator<'a, G> {
    gateway: &'a G,
    policy: ExercisePolicy,
}

impl<'a, G: Gateway> MutationCoordinator<'a, G> {
    pub fn new(gateway: &'a G, policy: ExercisePolicy) -> Self {
        Self { gateway, policy }
    }

    pub async fn create_workout(
        &self,
        request: &CreateWorkoutRequest,
    ) -> Result<Workout, MutationError> {
        let workout = self
            .gateway
            .create::<Workout>(request)
            .await
            .map_err(|e| {
                error!(user_id = %request.user_id, error = %e, "Failed to create workout");
                e
            })?;

        info!(
            user_id = %workout.user_id,
            workout_id = %workout.id,
            workout_type = %workout.workout_type,
            "Workout created"
        );
        Ok(workout)
    }

    /// Creates the workout, then one exercise per complete row tagged with the
    /// new id. Exercise creates run concurrently and are all awaited.
    pub async fn create_workout_with_exercises(
        &self,
        request: &CreateWorkoutRequest,
        rows: &[ExerciseRow],
    ) -> Result<CreatedLift, MutationError> {
        let workout = self.create_workout(request).await?;

        let requests: Vec<_> = rows
            .iter()
            .filter_map(|row| row.to_request(workout.id))
            .collect();
        let attempted = requests.len();
        let skipped = rows.len() - attempted;
        if skipped > 0 {
            info!(workout_id = %workout.id, skipped, "Skipping incomplete exercise rows");
        }

        let results = join_all(
            requests
                .iter()
                .map(|exercise| self.gateway.create::<Exercise>(exercise)),
        )
        .await;

        let mut exercises = Vec::with_capacity(attempted);
        let mut failed = 0;
        for (result, exercise) in results.into_iter().zip(&requests) {
            match result {
                Ok(created) => exercises.push(created),
                Err(e) => {
                    failed += 1;
                    warn!(
                        workout_id = %workout.id,
                        exercise = %exercise.name,
                        error = %e,
                        "Failed to create exercise"
                    );
                }
            }
        }

        info!(
            workout_id = %workout.id,
            created = exercises.len(),
            failed,
            "Exercises submitted"
        );

        if failed > 0 && self.policy == ExercisePolicy::AllOrNothing {
            return Err(MutationError::PartialExercises {
                workout_id: workout.id,
                failed,
                attempted,
            });
        }

        Ok(CreatedLift {
            workout,
            exercises,
            failed,
        })
    }

    /// Sends the negation of the star flag the caller last saw.
    pub async fn toggle_star(&self, workout: &Workout) -> Result<Workout, MutationError> {
        let starred = !workout.is_starred;
        let updated = self
            .gateway
            .patch::<Workout>(workout.id, &UpdateWorkoutRequest::starred(starred))
            .await
            .map_err(|e| {
                error!(workout_id = %workout.id, error = %e, "Failed to toggle star");
                e
            })?;

        info!(workout_id = %workout.id, is_starred = starred, "Workout star toggled");
        Ok(updated)
    }

    /// Deletes after the user confirms. A declined prompt sends nothing.
    pub async fn delete_workout<C: Confirm + ?Sized>(
        &self,
        workout_id: i64,
        confirm: &C,
    ) -> Result<DeleteOutcome, MutationError> {
        if !confirm.confirm(DELETE_WORKOUT_PROMPT) {
            info!(workout_id = %workout_id, "Workout deletion cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.gateway
            .delete::<Workout>(workout_id)
            .await
            .map_err(|e| {
                error!(workout_id = %workout_id, error = %e, "Failed to delete workout");
                e
            })?;

        info!(workout_id = %workout_id, "Workout deleted");
        Ok(DeleteOutcome::Deleted)
    }

    pub async fn create_meal(&self, request: &CreateMealRequest) -> Result<Meal, MutationError> {
        let meal = self.gateway.create::<Meal>(request).await.map_err(|e| {
            error!(user_id = %request.user_id, error = %e, "Failed to create meal");
            e
        })?;

        info!(user_id = %meal.user_id, meal_id = %meal.id, "Meal created");
        Ok(meal)
    }

    pub async fn delete_meal(&self, meal_id: i64) -> Result<(), MutationError> {
        self.gateway.delete::<Meal>(meal_id).await.map_err(|e| {
            error!(meal_id = %meal_id, error = %e, "Failed to delete meal");
            e
        })?;

        info!(meal_id = %meal_id, "Meal deleted");
        Ok(())
    }
}
