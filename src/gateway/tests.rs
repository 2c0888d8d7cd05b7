//! Tests for gateway module
//!
//! These tests verify:
//! - The in-memory gateway's request log, filtering and fault injection
//! - Mapping of record store failures to gateway errors
//! - Error detail extraction from service bodies
//! - HTTP gateway URL handling

#[cfg(test)]
mod tests {
    use super::super::error::extract_detail;
    use super::super::*;
    use crate::auth::{CreateUserRequest, User};
    use crate::meals::Meal;
    use crate::workouts::{CreateWorkoutRequest, UpdateWorkoutRequest, Workout};
    use chrono::NaiveDate;

    fn workout_request(user_id: i64, workout_type: &str) -> CreateWorkoutRequest {
        CreateWorkoutRequest {
            user_id,
            workout_type: workout_type.to_string(),
            duration_min: 25,
            distance_km: Some(4.0),
            pace_min_per_km: Some(6.25),
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            is_starred: false,
        }
    }

    // ============================================================================
    // Scope Tests
    // ============================================================================

    #[test]
    fn test_scope_query() {
        assert_eq!(Scope::All.query(), None);
        assert_eq!(Scope::User(3).query(), Some(("user_id", 3)));
        assert_eq!(Scope::Workout(8).query(), Some(("workout_id", 8)));
    }

    // ============================================================================
    // Memory Gateway Tests
    // ============================================================================

    #[tokio::test]
    async fn test_memory_gateway_logs_requests() {
        let gateway = MemoryGateway::new();

        let workout: Workout = gateway.create(&workout_request(1, "Run")).await.unwrap();
        let _: Vec<Workout> = gateway.list(Scope::User(1)).await.unwrap();
        let _: Workout = gateway
            .patch(workout.id, &UpdateWorkoutRequest::starred(true))
            .await
            .unwrap();
        gateway.delete::<Workout>(workout.id).await.unwrap();

        assert_eq!(
            gateway.requests(),
            vec![
                "POST /workouts".to_string(),
                "GET /workouts?user_id=1".to_string(),
                format!("PATCH /workouts/{}", workout.id),
                format!("DELETE /workouts/{}", workout.id),
            ]
        );
        assert_eq!(gateway.count_requests("GET"), 1);
    }

    #[tokio::test]
    async fn test_memory_gateway_filters_by_user() {
        let gateway = MemoryGateway::new();
        gateway.create::<Workout>(&workout_request(1, "Run")).await.unwrap();
        gateway.create::<Workout>(&workout_request(2, "Run")).await.unwrap();
        gateway.create::<Workout>(&workout_request(1, "Weights")).await.unwrap();

        let mine: Vec<Workout> = gateway.list(Scope::User(1)).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|w| w.user_id == 1));

        let all: Vec<Workout> = gateway.list(Scope::All).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_memory_gateway_returns_server_representation() {
        let gateway = MemoryGateway::new();
        let workout: Workout = gateway.create(&workout_request(5, "Run")).await.unwrap();

        assert_eq!(workout.id, 1);
        assert_eq!(workout.user_id, 5);
        assert_eq!(workout.pace_min_per_km, Some(6.25));
        assert!(!workout.is_starred);
    }

    #[tokio::test]
    async fn test_unknown_id_maps_to_404() {
        let gateway = MemoryGateway::new();

        let err = gateway.delete::<Meal>(12).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.detail(), Some("meals 12 not found"));

        let err = gateway
            .patch::<Workout>(3, &UpdateWorkoutRequest::starred(true))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_duplicate_user_maps_to_400() {
        let gateway = MemoryGateway::new();
        let request = CreateUserRequest {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
        };
        gateway.create::<User>(&request).await.unwrap();

        let err = gateway.create::<User>(&request).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.detail(), Some("email already registered"));
    }

    #[tokio::test]
    async fn test_offline_gateway_stores_nothing() {
        let gateway = MemoryGateway::new();
        gateway.set_offline(true);

        let err = gateway
            .create::<Workout>(&workout_request(1, "Run"))
            .await
            .unwrap_err();
        assert!(err.is_network());

        gateway.set_offline(false);
        let all: Vec<Workout> = gateway.list(Scope::All).await.unwrap();
        assert!(all.is_empty());
        // Failed calls are still logged
        assert_eq!(gateway.request_count(), 2);
    }

    #[tokio::test]
    async fn test_rejected_creates_only_match_rule() {
        let gateway = MemoryGateway::new();
        gateway.reject_creates_where("workouts", |body| body["type"] == "Yoga");

        assert!(gateway
            .create::<Workout>(&workout_request(1, "Run"))
            .await
            .is_ok());
        let err = gateway
            .create::<Workout>(&workout_request(1, "Yoga"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(422));
    }

    #[tokio::test]
    async fn test_failing_lists() {
        let gateway = MemoryGateway::new();
        gateway.fail_lists("meals");

        let err = gateway.list::<Meal>(Scope::User(1)).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert!(gateway.list::<Workout>(Scope::User(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_shared_store_is_visible_to_both_gateways() {
        let store = RecordStore::new();
        let first = MemoryGateway::with_store(store.clone());
        let second = MemoryGateway::with_store(store);

        first.create::<Workout>(&workout_request(1, "Run")).await.unwrap();
        let seen: Vec<Workout> = second.list(Scope::User(1)).await.unwrap();

        assert_eq!(seen.len(), 1);
        assert_eq!(second.request_count(), 1);
    }

    // ============================================================================
    // Error Tests
    // ============================================================================

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "email already registered"}"#),
            Some("email already registered".to_string())
        );
        assert_eq!(extract_detail(r#"{"detail": [{"msg": "field required"}]}"#), None);
        assert_eq!(extract_detail(r#"{"detail": "  "}"#), None);
        assert_eq!(extract_detail("Internal Server Error"), None);
    }

    #[test]
    fn test_error_display() {
        let err = GatewayError::Status {
            status: 400,
            detail: None,
        };
        assert_eq!(err.to_string(), "Service returned 400: no detail");
        assert!(!err.is_network());
    }

    // ============================================================================
    // HTTP Gateway Tests
    // ============================================================================

    #[test]
    fn test_http_gateway_trims_base_url() {
        let gateway = HttpGateway::new("http://localhost:8000/");
        assert_eq!(gateway.base_url(), "http://localhost:8000");
    }
}
