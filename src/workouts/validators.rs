// src/workouts/validators.rs

use std::str::FromStr;

use chrono::NaiveDate;

use super::forms::{ExerciseRow, LiftForm, RunForm};
use crate::common::{validate_date_format, ValidationResult, Validator};

// ============================================================================
// Field Parsers
// ============================================================================

/// Parses a required numeric field, recording an error when empty or malformed.
pub fn parse_required<T: FromStr>(
    result: &mut ValidationResult,
    field: &str,
    raw: &str,
    label: &str,
) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        result.add_error(field, &format!("{} is required", label));
        return None;
    }
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            result.add_error(field, &format!("{} must be a valid number", label));
            None
        }
    }
}

/// Parses an optional numeric field; empty means absent.
pub fn parse_optional<T: FromStr>(
    result: &mut ValidationResult,
    field: &str,
    raw: &str,
    label: &str,
) -> Option<T> {
    if raw.trim().is_empty() {
        return None;
    }
    parse_required(result, field, raw, label)
}

pub fn parse_date(result: &mut ValidationResult, field: &str, raw: &str) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        result.add_error(field, "Date is required");
        return None;
    }
    match validate_date_format(raw) {
        Ok(date) => Some(date),
        Err(_) => {
            result.add_error(field, "Date must be in YYYY-MM-DD format");
            None
        }
    }
}

fn check_non_negative(result: &mut ValidationResult, field: &str, value: Option<f64>, label: &str) {
    if let Some(v) = value {
        if !v.is_finite() || v < 0.0 {
            result.add_error(field, &format!("{} cannot be negative", label));
        }
    }
}

// ============================================================================
// Workout Form Validators
// ============================================================================

pub struct RunFormValidator;

impl Validator<RunForm> for RunFormValidator {
    fn validate(&self, data: &RunForm) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.workout_type.trim().is_empty() {
            result.add_error("type", "Workout type is required");
        }

        parse_required::<u32>(&mut result, "duration_min", &data.duration, "Duration");
        let distance = parse_optional::<f64>(&mut result, "distance_km", &data.distance, "Distance");
        check_non_negative(&mut result, "distance_km", distance, "Distance");
        let pace = parse_optional::<f64>(&mut result, "pace_min_per_km", &data.pace, "Pace");
        check_non_negative(&mut result, "pace_min_per_km", pace, "Pace");
        parse_date(&mut result, "date", &data.date);

        result
    }
}

pub struct LiftFormValidator;

impl Validator<LiftForm> for LiftFormValidator {
    fn validate(&self, data: &LiftForm) -> ValidationResult {
        let mut result = ValidationResult::new();

        parse_required::<u32>(&mut result, "duration_min", &data.duration, "Duration");
        parse_date(&mut result, "date", &data.date);

        // Incomplete rows are skipped on submit, so only complete ones are checked
        for (idx, row) in data.exercises.iter().enumerate() {
            if row.is_complete() {
                result.merge(validate_exercise_row(idx, row));
            }
        }

        result
    }
}

fn validate_exercise_row(idx: usize, row: &ExerciseRow) -> ValidationResult {
    let mut result = ValidationResult::new();

    parse_required::<u32>(&mut result, &format!("exercises[{}].sets", idx), &row.sets, "Sets");
    parse_required::<u32>(&mut result, &format!("exercises[{}].reps", idx), &row.reps, "Reps");
    let weight = parse_required::<f64>(
        &mut result,
        &format!("exercises[{}].weight", idx),
        &row.weight,
        "Weight",
    );
    check_non_negative(&mut result, &format!("exercises[{}].weight", idx), weight, "Weight");

    result
}
