//! Tests for meals module

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::Validator;
    use chrono::NaiveDate;
    use serde_json::json;

    fn filled_form() -> MealForm {
        MealForm {
            open: true,
            name: "Oats".to_string(),
            calories: "350".to_string(),
            protein: "12.5".to_string(),
            carbs: "60".to_string(),
            fat: "6".to_string(),
            date: "2024-02-10".to_string(),
        }
    }

    // ============================================================================
    // Form Tests
    // ============================================================================

    #[test]
    fn test_meal_form_builds_request() {
        let request = filled_form().to_request(3).unwrap();

        assert_eq!(request.user_id, 3);
        assert_eq!(request.name, "Oats");
        assert_eq!(request.calories, 350);
        assert_eq!(request.protein, 12.5);
        assert_eq!(
            request.date,
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
        );
    }

    #[test]
    fn test_meal_form_requires_every_field() {
        let form = MealForm {
            name: "Oats".to_string(),
            ..MealForm::default()
        };

        let result = MealFormValidator.validate(&form);
        assert!(!result.is_valid);
        for field in ["calories", "protein", "carbs", "fat", "date"] {
            assert!(result.errors.iter().any(|e| e.field == field), "{}", field);
        }
    }

    #[test]
    fn test_meal_form_rejects_fractional_calories() {
        let mut form = filled_form();
        form.calories = "350.5".to_string();

        let err = form.to_request(1).unwrap_err();
        assert_eq!(err.errors[0].field, "calories");
    }

    #[test]
    fn test_meal_form_reset() {
        let mut form = filled_form();
        form.reset();
        assert_eq!(form, MealForm::default());
    }

    // ============================================================================
    // Model Tests
    // ============================================================================

    #[test]
    fn test_meal_wire_format() {
        let meal: Meal = serde_json::from_value(json!({
            "id": 1,
            "user_id": 2,
            "name": "Rice",
            "calories": 200,
            "protein": 4.0,
            "carbs": 44.0,
            "fat": 0.5,
            "date": "2024-02-11"
        }))
        .unwrap();

        assert_eq!(meal.calories, 200);
        assert_eq!(meal.fat, 0.5);
    }

    #[test]
    fn test_daily_nutrition_accumulates() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 11).unwrap();
        let meal = Meal {
            id: 1,
            user_id: 1,
            name: "Rice".to_string(),
            calories: 200,
            protein: 4.0,
            carbs: 44.0,
            fat: 0.5,
            date,
        };

        let mut day = DailyNutrition::empty(date);
        day.add(&meal);
        day.add(&meal);

        assert_eq!(day.calories, 400);
        assert_eq!(day.carbs, 88.0);
        assert_eq!(day.meal_count, 2);
    }
}
