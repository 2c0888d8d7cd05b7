//! # Meals Module
//!
//! Meal records, the meal entry form and per-day nutrition totals.

pub mod forms;
pub mod models;
pub mod validators;

#[cfg(test)]
mod tests;

pub use forms::MealForm;
pub use models::{CreateMealRequest, DailyNutrition, Meal};
pub use validators::MealFormValidator;
