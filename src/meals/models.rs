// src/meals/models.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::gateway::{Deletable, Resource};

// ============================================================================
// Meal Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub calories: u32,
    /// Grams
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub date: NaiveDate,
}

impl Resource for Meal {
    const COLLECTION: &'static str = "meals";
    type Create = CreateMealRequest;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Deletable for Meal {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMealRequest {
    pub user_id: i64,
    pub name: String,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub date: NaiveDate,
}

// ============================================================================
// Nutrition Totals
// ============================================================================

/// Everything eaten on one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyNutrition {
    pub date: NaiveDate,
    pub calories: u64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub meal_count: usize,
}

impl DailyNutrition {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            calories: 0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            meal_count: 0,
        }
    }

    pub fn add(&mut self, meal: &Meal) {
        self.calories += u64::from(meal.calories);
        self.protein += meal.protein;
        self.carbs += meal.carbs;
        self.fat += meal.fat;
        self.meal_count += 1;
    }
}
