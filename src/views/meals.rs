// src/views/meals.rs

use crate::auth::{SessionStore, User};
use crate::common::ClientContext;
use crate::gateway::{Gateway, GatewayError, Scope};
use crate::meals::{DailyNutrition, Meal, MealForm};
use crate::mutations::{MutationCoordinator, MutationError};

use super::cache::CollectionCache;
use super::derive::daily_nutrition;
use super::{ViewFrame, ViewStatus};

pub struct MealsView<G, S> {
    ctx: ClientContext<G, S>,
    frame: ViewFrame,
    meals: CollectionCache<Meal>,
    pub form: MealForm,
}

impl<G: Gateway, S: SessionStore> MealsView<G, S> {
    pub fn new(ctx: ClientContext<G, S>) -> Self {
        Self {
            ctx,
            frame: ViewFrame::new("meals"),
            meals: CollectionCache::new(),
            form: MealForm::default(),
        }
    }

    pub async fn mount(&mut self) -> ViewStatus {
        if self.frame.authenticate(&*self.ctx.session).is_some() {
            let outcome = self.refresh().await;
            self.frame.record_refresh(outcome);
        }
        self.frame.status()
    }

    pub async fn refresh(&mut self) -> Result<(), GatewayError> {
        let Ok(user_id) = self.frame.user_id() else {
            return Ok(());
        };
        let meals = self.ctx.gateway.list::<Meal>(Scope::User(user_id)).await?;
        self.meals.replace(meals);
        Ok(())
    }

    pub fn status(&self) -> ViewStatus {
        self.frame.status()
    }

    pub fn user(&self) -> Option<&User> {
        self.frame.user()
    }

    pub fn error(&self) -> Option<&str> {
        self.frame.error()
    }

    pub fn meals(&self) -> &[Meal] {
        self.meals.items()
    }

    pub fn cache(&self) -> &CollectionCache<Meal> {
        &self.meals
    }

    pub fn daily_nutrition(&self) -> Vec<DailyNutrition> {
        daily_nutrition(self.meals.items())
    }

    fn coordinator(&self) -> MutationCoordinator<'_, G> {
        MutationCoordinator::new(&*self.ctx.gateway, self.ctx.exercise_policy)
    }

    async fn refresh_after_mutation(&mut self) {
        let outcome = self.refresh().await;
        self.frame.record_refresh(outcome);
    }

    pub async fn add_meal(&mut self) -> Result<Meal, MutationError> {
        let user_id = self.frame.user_id()?;
        let request = self.form.to_request(user_id)?;
        let meal = self.coordinator().create_meal(&request).await?;

        self.refresh_after_mutation().await;
        self.form.reset();
        Ok(meal)
    }

    /// Deletes without asking.
    pub async fn delete_meal(&mut self, meal_id: i64) -> Result<(), MutationError> {
        self.frame.user_id()?;
        self.coordinator().delete_meal(meal_id).await?;
        self.refresh_after_mutation().await;
        Ok(())
    }
}
