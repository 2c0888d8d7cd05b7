// src/workouts/models.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::gateway::{Deletable, Patchable, Resource};

// ============================================================================
// Workout Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub user_id: i64,
    /// Free text such as "Running" or "Weights"; see [`Family`].
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration_min: u32,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub pace_min_per_km: Option<f64>,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_starred: bool,
}

impl Workout {
    pub fn family(&self) -> Option<Family> {
        Family::classify(&self.workout_type)
    }
}

impl Resource for Workout {
    const COLLECTION: &'static str = "workouts";
    type Create = CreateWorkoutRequest;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Patchable for Workout {
    type Patch = UpdateWorkoutRequest;
}

impl Deletable for Workout {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWorkoutRequest {
    pub user_id: i64,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration_min: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace_min_per_km: Option<f64>,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_starred: bool,
}

/// Partial update for `PATCH /workouts/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateWorkoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_starred: Option<bool>,
}

impl UpdateWorkoutRequest {
    pub fn starred(is_starred: bool) -> Self {
        Self {
            is_starred: Some(is_starred),
        }
    }
}

// ============================================================================
// Workout Families
// ============================================================================

/// Case-insensitive synonym groups used to classify a workout's free-text type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Running,
    Strength,
}

impl Family {
    pub const ALL: [Family; 2] = [Family::Running, Family::Strength];

    /// Lowercase synonyms belonging to the family. Matching is exact after lowercasing.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Family::Running => &["running", "run"],
            Family::Strength => &["strength", "lifting", "weights"],
        }
    }

    pub fn matches(&self, workout_type: &str) -> bool {
        let lowered = workout_type.to_lowercase();
        self.synonyms().contains(&lowered.as_str())
    }

    pub fn classify(workout_type: &str) -> Option<Family> {
        Family::ALL.into_iter().find(|f| f.matches(workout_type))
    }

    /// Type written on workouts created from this family's form.
    pub fn default_type(&self) -> &'static str {
        match self {
            Family::Running => "Running",
            Family::Strength => "Strength",
        }
    }
}

// ============================================================================
// Exercise Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub workout_id: i64,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Kilograms
    pub weight: f64,
}

impl Resource for Exercise {
    const COLLECTION: &'static str = "exercises";
    type Create = CreateExerciseRequest;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExerciseRequest {
    pub workout_id: i64,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
}

/// A strength workout with its exercises attached, as the lifts view shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftEntry {
    pub workout: Workout,
    pub exercises: Vec<Exercise>,
}
