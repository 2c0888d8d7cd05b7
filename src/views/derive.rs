// src/views/derive.rs
//! Pure computations over cached collections.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::meals::{DailyNutrition, Meal};
use crate::workouts::{Family, LiftEntry, Workout};

/// Anything listed newest-first by calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for Workout {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Meal {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for LiftEntry {
    fn date(&self) -> NaiveDate {
        self.workout.date
    }
}

/// Workouts whose lowercased type is one of the family's synonyms.
pub fn filter_family(workouts: &[Workout], family: Family) -> Vec<Workout> {
    workouts
        .iter()
        .filter(|w| family.matches(&w.workout_type))
        .cloned()
        .collect()
}

/// Sum of the distances present; missing distances count as zero.
pub fn total_distance_km(workouts: &[Workout]) -> f64 {
    workouts.iter().filter_map(|w| w.distance_km).sum()
}

/// One decimal place, halves rounded away from zero (`7.25` -> `"7.3"`).
pub fn format_tenths(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

pub fn total_distance(workouts: &[Workout]) -> String {
    format_tenths(total_distance_km(workouts))
}

/// The `n` newest items. Equal dates keep their fetched order.
pub fn most_recent<T: Dated + Clone>(items: &[T], n: usize) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.date().cmp(&a.date()));
    sorted.truncate(n);
    sorted
}

/// Per-date nutrition totals, newest date first.
pub fn daily_nutrition(meals: &[Meal]) -> Vec<DailyNutrition> {
    let mut days: BTreeMap<NaiveDate, DailyNutrition> = BTreeMap::new();
    for meal in meals {
        days.entry(meal.date)
            .or_insert_with(|| DailyNutrition::empty(meal.date))
            .add(meal);
    }
    days.into_values().rev().collect()
}
