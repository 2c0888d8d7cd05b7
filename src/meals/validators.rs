// src/meals/validators.rs

use super::forms::MealForm;
use crate::common::{ValidationResult, Validator};
use crate::workouts::validators::{parse_date, parse_required};

pub struct MealFormValidator;

impl Validator<MealForm> for MealFormValidator {
    fn validate(&self, data: &MealForm) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.trim().is_empty() {
            result.add_error("name", "Meal name is required");
        } else if data.name.trim().len() > 255 {
            result.add_error("name", "Meal name must be less than 255 characters");
        }

        parse_required::<u32>(&mut result, "calories", &data.calories, "Calories");
        for (field, raw, label) in [
            ("protein", &data.protein, "Protein"),
            ("carbs", &data.carbs, "Carbs"),
            ("fat", &data.fat, "Fat"),
        ] {
            if let Some(grams) = parse_required::<f64>(&mut result, field, raw, label) {
                if !grams.is_finite() || grams < 0.0 {
                    result.add_error(field, &format!("{} cannot be negative", label));
                }
            }
        }
        parse_date(&mut result, "date", &data.date);

        result
    }
}
