//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - Session store round-trips (file and memory)
//! - Signup and login validators
//! - Signup, login and logout flows against the in-memory gateway
//! - Auth form error handling

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::{ClientContext, Validator};
    use crate::gateway::MemoryGateway;

    fn context() -> ClientContext<MemoryGateway, MemorySessionStore> {
        ClientContext::new(MemoryGateway::new(), MemorySessionStore::new())
    }

    fn sample_user() -> User {
        User {
            id: 7,
            name: "Ada Runner".to_string(),
            email: "ada@peak.io".to_string(),
        }
    }

    // ============================================================================
    // Session Store Tests
    // ============================================================================

    #[test]
    fn test_memory_session_roundtrip() {
        let store = MemorySessionStore::new();
        assert!(store.current_user().is_none());

        store.sign_in(&sample_user()).unwrap();
        assert_eq!(store.current_user(), Some(sample_user()));

        store.sign_out().unwrap();
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_file_session_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session"));

        assert!(store.current_user().is_none());

        store.sign_in(&sample_user()).unwrap();
        assert!(store.path().ends_with("user.json"));

        // A second store over the same directory sees the same session
        let reopened = FileSessionStore::new(dir.path().join("session"));
        assert_eq!(reopened.current_user(), Some(sample_user()));

        reopened.sign_out().unwrap();
        assert!(store.current_user().is_none());

        // Signing out twice is not an error
        store.sign_out().unwrap();
    }

    #[test]
    fn test_corrupt_session_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(store.current_user().is_none());
    }

    // ============================================================================
    // Validator Tests
    // ============================================================================

    #[test]
    fn test_signup_validator() {
        let valid = CreateUserRequest {
            name: "Ada".to_string(),
            email: "ada@peak.io".to_string(),
        };
        assert!(validators::SignupValidator.validate(&valid).is_valid);

        let missing = CreateUserRequest {
            name: "  ".to_string(),
            email: "".to_string(),
        };
        let result = validators::SignupValidator.validate(&missing);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().any(|e| e.field == "name"));
        assert!(result.errors.iter().any(|e| e.field == "email"));

        let bad_email = CreateUserRequest {
            name: "Ada".to_string(),
            email: "ada.peak.io".to_string(),
        };
        assert!(!validators::SignupValidator.validate(&bad_email).is_valid);
    }

    #[test]
    fn test_login_validator() {
        let ok = LoginRequest {
            email: "a@x.com".to_string(),
        };
        assert!(validators::LoginValidator.validate(&ok).is_valid);

        let empty = LoginRequest {
            email: String::new(),
        };
        assert!(!validators::LoginValidator.validate(&empty).is_valid);
    }

    // ============================================================================
    // Flow Tests
    // ============================================================================

    #[tokio::test]
    async fn test_signup_creates_user_and_session() {
        let ctx = context();

        let user = signup(
            &ctx,
            &CreateUserRequest {
                name: "Ada".to_string(),
                email: " a@x.com ".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(ctx.session.current_user(), Some(user));
        assert_eq!(ctx.gateway.requests(), vec!["POST /users".to_string()]);
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_surfaces_detail() {
        let ctx = context();
        let request = CreateUserRequest {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
        };
        signup(&ctx, &request).await.unwrap();
        logout(&ctx).unwrap();

        let err = signup(&ctx, &request).await.unwrap_err();
        assert!(matches!(err, AuthError::Rejected(Some(_))));
        assert_eq!(err.to_string(), "email already registered");
        assert!(ctx.session.current_user().is_none());
    }

    #[test]
    fn test_rejected_without_detail_uses_generic_message() {
        let err = AuthError::Rejected(None);
        assert_eq!(err.to_string(), "Email already exists or invalid data");
    }

    #[tokio::test]
    async fn test_signup_validation_skips_gateway() {
        let ctx = context();

        let err = signup(
            &ctx,
            &CreateUserRequest {
                name: String::new(),
                email: "a@x.com".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(ctx.gateway.request_count(), 0);
    }

    #[tokio::test]
    async fn test_login_recovers_existing_user() {
        let ctx = context();
        let created = signup(
            &ctx,
            &CreateUserRequest {
                name: "Ada".to_string(),
                email: "a@x.com".to_string(),
            },
        )
        .await
        .unwrap();
        logout(&ctx).unwrap();
        assert!(ctx.session.current_user().is_none());

        let found = login(
            &ctx,
            &LoginRequest {
                email: "a@x.com".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(found, created);
        assert_eq!(ctx.session.current_user().map(|u| u.id), Some(created.id));
        // Login never creates a user
        assert_eq!(ctx.gateway.count_requests("POST /users"), 1);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let ctx = context();

        let err = login(
            &ctx,
            &LoginRequest {
                email: "ghost@x.com".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AuthError::UnknownEmail));
        assert_eq!(
            err.to_string(),
            "No account found with this email. Please sign up first."
        );
        assert!(ctx.session.current_user().is_none());
    }

    #[tokio::test]
    async fn test_login_when_service_unreachable() {
        let ctx = context();
        ctx.gateway.set_offline(true);

        let err = login(
            &ctx,
            &LoginRequest {
                email: "a@x.com".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AuthError::Unreachable(_)));
        assert_eq!(
            err.to_string(),
            "Could not connect to server. Make sure backend is running."
        );
    }

    #[tokio::test]
    async fn test_login_when_user_list_fails() {
        let ctx = context();
        ctx.gateway.fail_lists("users");

        let err = login(
            &ctx,
            &LoginRequest {
                email: "a@x.com".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Could not connect to server");
    }

    // ============================================================================
    // Auth Form Tests
    // ============================================================================

    #[tokio::test]
    async fn test_auth_form_error_cleared_on_toggle_and_resubmit() {
        let ctx = context();
        let mut form = AuthForm::new(AuthMode::Login);
        form.email = "nobody@x.com".to_string();

        assert!(form.submit(&ctx).await.is_none());
        assert_eq!(
            form.error.as_deref(),
            Some("No account found with this email. Please sign up first.")
        );

        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::Signup);
        assert!(form.error.is_none());

        form.name = "Nobody".to_string();
        let user = form.submit(&ctx).await;
        assert!(user.is_some());
        assert!(form.error.is_none());
    }

    #[tokio::test]
    async fn test_auth_form_submit_clears_previous_error() {
        let ctx = context();
        let mut form = AuthForm::default();
        form.name = "Ada".to_string();
        form.email = "not-an-email".to_string();

        form.submit(&ctx).await;
        assert!(form.error.is_some());

        form.email = "ada@x.com".to_string();
        assert!(form.submit(&ctx).await.is_some());
        assert!(form.error.is_none());

        form.error = Some("stale".to_string());
        form.dismiss_error();
        assert!(form.error.is_none());
    }
}
