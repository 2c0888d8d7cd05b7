// src/meals/forms.rs

use super::models::CreateMealRequest;
use super::validators::MealFormValidator;
use crate::common::{ValidationResult, Validator};
use crate::workouts::validators::{parse_date, parse_required};

/// Meal entry form; raw text until submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealForm {
    pub open: bool,
    pub name: String,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub date: String,
}

impl MealForm {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_request(&self, user_id: i64) -> Result<CreateMealRequest, ValidationResult> {
        let validation = MealFormValidator.validate(self);
        if !validation.is_valid {
            return Err(validation);
        }

        let mut result = ValidationResult::new();
        let calories = parse_required(&mut result, "calories", &self.calories, "Calories");
        let protein = parse_required(&mut result, "protein", &self.protein, "Protein");
        let carbs = parse_required(&mut result, "carbs", &self.carbs, "Carbs");
        let fat = parse_required(&mut result, "fat", &self.fat, "Fat");
        let date = parse_date(&mut result, "date", &self.date);

        match (calories, protein, carbs, fat, date) {
            (Some(calories), Some(protein), Some(carbs), Some(fat), Some(date)) => {
                Ok(CreateMealRequest {
                    user_id,
                    name: self.name.trim().to_string(),
                    calories,
                    protein,
                    carbs,
                    fat,
                    date,
                })
            }
            _ => Err(result),
        }
    }
}
