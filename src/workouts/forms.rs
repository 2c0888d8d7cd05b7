// src/workouts/forms.rs
//! Workout entry forms. Fields hold raw text as typed; numbers and dates are
//! parsed on submit.

use super::models::{CreateExerciseRequest, CreateWorkoutRequest, Family};
use super::validators::{parse_date, parse_optional, parse_required, LiftFormValidator, RunFormValidator};
use crate::common::{ValidationResult, Validator};

#[derive(Debug, Clone, PartialEq)]
pub struct RunForm {
    /// Whether the entry panel is expanded.
    pub open: bool,
    pub workout_type: String,
    pub duration: String,
    pub distance: String,
    pub pace: String,
    pub date: String,
}

impl Default for RunForm {
    fn default() -> Self {
        Self {
            open: false,
            workout_type: Family::Running.default_type().to_string(),
            duration: String::new(),
            distance: String::new(),
            pace: String::new(),
            date: String::new(),
        }
    }
}

impl RunForm {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Clears every field and collapses the panel.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_request(&self, user_id: i64) -> Result<CreateWorkoutRequest, ValidationResult> {
        let validation = RunFormValidator.validate(self);
        if !validation.is_valid {
            return Err(validation);
        }

        let mut result = ValidationResult::new();
        let duration_min = parse_required(&mut result, "duration_min", &self.duration, "Duration");
        let distance_km = parse_optional(&mut result, "distance_km", &self.distance, "Distance");
        let pace_min_per_km = parse_optional(&mut result, "pace_min_per_km", &self.pace, "Pace");
        let date = parse_date(&mut result, "date", &self.date);

        match (duration_min, date) {
            (Some(duration_min), Some(date)) if result.is_valid => Ok(CreateWorkoutRequest {
                user_id,
                workout_type: self.workout_type.trim().to_string(),
                duration_min,
                distance_km,
                pace_min_per_km,
                date,
                is_starred: false,
            }),
            _ => Err(result),
        }
    }
}

/// One exercise line of the lift form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseRow {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub weight: String,
}

impl ExerciseRow {
    pub fn new(name: &str, sets: &str, reps: &str, weight: &str) -> Self {
        Self {
            name: name.to_string(),
            sets: sets.to_string(),
            reps: reps.to_string(),
            weight: weight.to_string(),
        }
    }

    /// A row is submitted only when every field is filled in.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.sets, &self.reps, &self.weight]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Request for a complete, well-formed row; `None` otherwise.
    pub fn to_request(&self, workout_id: i64) -> Option<CreateExerciseRequest> {
        if !self.is_complete() {
            return None;
        }
        Some(CreateExerciseRequest {
            workout_id,
            name: self.name.trim().to_string(),
            sets: self.sets.trim().parse().ok()?,
            reps: self.reps.trim().parse().ok()?,
            weight: self.weight.trim().parse().ok()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiftForm {
    pub open: bool,
    pub duration: String,
    pub date: String,
    pub exercises: Vec<ExerciseRow>,
}

impl Default for LiftForm {
    fn default() -> Self {
        Self {
            open: false,
            duration: String::new(),
            date: String::new(),
            exercises: vec![ExerciseRow::default()],
        }
    }
}

impl LiftForm {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn add_exercise_row(&mut self) {
        self.exercises.push(ExerciseRow::default());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_request(&self, user_id: i64) -> Result<CreateWorkoutRequest, ValidationResult> {
        let validation = LiftFormValidator.validate(self);
        if !validation.is_valid {
            return Err(validation);
        }

        let mut result = ValidationResult::new();
        let duration_min = parse_required(&mut result, "duration_min", &self.duration, "Duration");
        let date = parse_date(&mut result, "date", &self.date);

        match (duration_min, date) {
            (Some(duration_min), Some(date)) if result.is_valid => Ok(CreateWorkoutRequest {
                user_id,
                workout_type: Family::Strength.default_type().to_string(),
                duration_min,
                distance_km: None,
                pace_min_per_km: None,
                date,
                is_starred: false,
            }),
            _ => Err(result),
        }
    }

    /// Exercise requests for every complete row, tagged with the parent id.
    pub fn exercise_requests(&self, workout_id: i64) -> Vec<CreateExerciseRequest> {
        self.exercises
            .iter()
            .filter_map(|row| row.to_request(workout_id))
            .collect()
    }
}
