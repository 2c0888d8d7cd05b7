//! # Workouts Module
//!
//! Workout and exercise records plus the forms that produce them:
//! - `Workout` / `Exercise` resources and their create payloads
//! - Running and strength families with synonym matching
//! - Run and lift entry forms, parsed and validated on submit

pub mod forms;
pub mod models;
pub mod validators;


pub use forms::{ExerciseRow, LiftForm, RunForm};
pub use models::{
    CreateExerciseRequest, CreateWorkoutRequest, Exercise, Family, LiftEntry, UpdateWorkoutRequest,
    Workout,
};
pub use validators::{LiftFormValidator, RunFormValidator};
