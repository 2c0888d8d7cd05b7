// src/devserver/handlers.rs

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::validators::SignupValidator;
use crate::auth::{CreateUserRequest, User};
use crate::common::{safe_email_log, ApiError, Validator};
use crate::gateway::{RecordError, RecordStore, Resource};
use crate::meals::{CreateMealRequest, Meal};
use crate::workouts::{
    CreateExerciseRequest, CreateWorkoutRequest, Exercise, UpdateWorkoutRequest, Workout,
};

/// Optional list filters. At most one applies per collection.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub user_id: Option<i64>,
    pub workout_id: Option<i64>,
}

impl From<RecordError> for ApiError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            RecordError::Duplicate { .. } | RecordError::NotAnObject => {
                ApiError::BadRequest(e.to_string())
            }
        }
    }
}

type Created = (StatusCode, Json<Value>);

async fn insert<T: Serialize>(
    store: &RecordStore,
    collection: &str,
    payload: &T,
) -> Result<Created, ApiError> {
    let body = serde_json::to_value(payload)
        .map_err(|e| ApiError::InternalServer(format!("Failed to encode record: {}", e)))?;
    let stored = store.insert(collection, body).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

// ============================================================================
// Users
// ============================================================================

/// GET /users
pub async fn list_users(Extension(store): Extension<RecordStore>) -> Json<Vec<Value>> {
    Json(store.list(User::COLLECTION, None).await)
}

/// POST /users - Register a user; emails are unique
pub async fn create_user(
    Extension(store): Extension<RecordStore>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Created, ApiError> {
    let validation = SignupValidator.validate(&payload);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let created = insert(&store, User::COLLECTION, &payload).await.map_err(|e| {
        warn!(email = %safe_email_log(&payload.email), error = %e, "User registration rejected");
        e
    })?;
    info!(email = %safe_email_log(&payload.email), "User registered");
    Ok(created)
}

// ============================================================================
// Workouts
// ============================================================================

/// GET /workouts?user_id={id}
pub async fn list_workouts(
    Extension(store): Extension<RecordStore>,
    Query(params): Query<ListQuery>,
) -> Json<Vec<Value>> {
    let filter = params.user_id.map(|id| ("user_id", id));
    let workouts = store.list(Workout::COLLECTION, filter).await;
    debug!(count = workouts.len(), user_id = ?params.user_id, "Listed workouts");
    Json(workouts)
}

/// POST /workouts
pub async fn create_workout(
    Extension(store): Extension<RecordStore>,
    Json(payload): Json<CreateWorkoutRequest>,
) -> Result<Created, ApiError> {
    let created = insert(&store, Workout::COLLECTION, &payload).await?;
    info!(user_id = %payload.user_id, workout_type = %payload.workout_type, "Workout stored");
    Ok(created)
}

/// PATCH /workouts/:id - Partial update, only the fields present change
pub async fn update_workout(
    Extension(store): Extension<RecordStore>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateWorkoutRequest>,
) -> Result<Json<Value>, ApiError> {
    let changes = serde_json::to_value(&payload)
        .map_err(|e| ApiError::InternalServer(format!("Failed to encode update: {}", e)))?;
    let updated = store.patch(Workout::COLLECTION, id, changes).await?;
    info!(workout_id = %id, is_starred = ?payload.is_starred, "Workout updated");
    Ok(Json(updated))
}

/// DELETE /workouts/:id - Also removes the workout's exercises
pub async fn delete_workout(
    Extension(store): Extension<RecordStore>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    store.delete(Workout::COLLECTION, id).await?;
    info!(workout_id = %id, "Workout deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Exercises
// ============================================================================

/// GET /exercises?workout_id={id}
pub async fn list_exercises(
    Extension(store): Extension<RecordStore>,
    Query(params): Query<ListQuery>,
) -> Json<Vec<Value>> {
    let filter = params.workout_id.map(|id| ("workout_id", id));
    Json(store.list(Exercise::COLLECTION, filter).await)
}

/// POST /exercises - The parent workout must exist
pub async fn create_exercise(
    Extension(store): Extension<RecordStore>,
    Json(payload): Json<CreateExerciseRequest>,
) -> Result<Created, ApiError> {
    if store.get(Workout::COLLECTION, payload.workout_id).await.is_none() {
        return Err(ApiError::NotFound(format!(
            "{} {} not found",
            Workout::COLLECTION,
            payload.workout_id
        )));
    }
    insert(&store, Exercise::COLLECTION, &payload).await
}

// ============================================================================
// Meals
// ============================================================================

/// GET /meals?user_id={id}
pub async fn list_meals(
    Extension(store): Extension<RecordStore>,
    Query(params): Query<ListQuery>,
) -> Json<Vec<Value>> {
    let filter = params.user_id.map(|id| ("user_id", id));
    Json(store.list(Meal::COLLECTION, filter).await)
}

/// POST /meals
pub async fn create_meal(
    Extension(store): Extension<RecordStore>,
    Json(payload): Json<CreateMealRequest>,
) -> Result<Created, ApiError> {
    let created = insert(&store, Meal::COLLECTION, &payload).await?;
    info!(user_id = %payload.user_id, "Meal stored");
    Ok(created)
}

/// DELETE /meals/:id
pub async fn delete_meal(
    Extension(store): Extension<RecordStore>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    store.delete(Meal::COLLECTION, id).await?;
    info!(meal_id = %id, "Meal deleted");
    Ok(StatusCode::NO_CONTENT)
}
