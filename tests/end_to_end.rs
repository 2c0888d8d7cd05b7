//! Full client flows over HTTP: auth with a file-backed session, then the
//! views and mutations against a running dev server.

use chrono::NaiveDate;
use peakperform::auth::{login, logout, signup, CreateUserRequest, FileSessionStore, LoginRequest, SessionStore};
use peakperform::common::{ClientContext, ExercisePolicy, ServerConfig};
use peakperform::devserver::build_router;
use peakperform::gateway::{HttpGateway, RecordStore};
use peakperform::mutations::DeleteOutcome;
use peakperform::views::{DashboardView, LiftsView, MealsView, RunsView, ViewStatus};
use peakperform::workouts::ExerciseRow;
use tempfile::TempDir;
use tokio::net::TcpListener;

type Ctx = ClientContext<HttpGateway, FileSessionStore>;

async fn spawn_server() -> String {
    let config = ServerConfig {
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
    };
    let app = build_router(RecordStore::new(), &config);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn client_context(session_dir: &TempDir) -> Ctx {
    let base = spawn_server().await;
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    ClientContext::new(
        HttpGateway::with_client(http, base),
        FileSessionStore::new(session_dir.path()),
    )
}

async fn sign_up(ctx: &Ctx, email: &str) -> peakperform::User {
    signup(
        ctx,
        &CreateUserRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_signup_run_logout_login() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = client_context(&dir).await;

    let user = sign_up(&ctx, "a@x.com").await;
    assert_eq!(ctx.session.current_user(), Some(user.clone()));

    let mut runs = RunsView::new(ctx.clone());
    assert_eq!(runs.mount().await, ViewStatus::Ready);
    runs.form.duration = "30".to_string();
    runs.form.distance = "5".to_string();
    runs.form.date = "2024-01-01".to_string();
    runs.add_run().await.unwrap();

    assert_eq!(runs.runs().len(), 1);
    let run = &runs.runs()[0];
    assert_eq!(run.workout_type, "Running");
    assert_eq!(run.duration_min, 30);
    assert_eq!(run.distance_km, Some(5.0));
    assert_eq!(run.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(runs.total_distance(), "5.0");

    logout(&ctx).unwrap();
    assert!(ctx.session.current_user().is_none());

    let mut redirected = RunsView::new(ctx.clone());
    assert_eq!(redirected.mount().await, ViewStatus::RedirectedToLogin);

    let again = login(
        &ctx,
        &LoginRequest {
            email: "a@x.com".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(again.id, user.id);

    // A fresh store over the same directory sees the restored session
    let reopened = FileSessionStore::new(dir.path());
    assert_eq!(reopened.current_user().map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_lifts_star_and_delete_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = client_context(&dir)
        .await
        .with_exercise_policy(ExercisePolicy::AllOrNothing);
    sign_up(&ctx, "lifter@x.com").await;

    let mut lifts = LiftsView::new(ctx.clone());
    lifts.mount().await;
    lifts.form.duration = "55".to_string();
    lifts.form.date = "2024-02-01".to_string();
    lifts.form.exercises = vec![
        ExerciseRow::new("Squat", "5", "5", "100"),
        ExerciseRow::new("Bench", "5", "5", "70"),
        ExerciseRow::new("Row", "3", "8", "60"),
        ExerciseRow::new("Curl", "", "10", "15"),
    ];
    let created = lifts.add_lift().await.unwrap();

    assert_eq!(lifts.lifts().len(), 1);
    assert_eq!(lifts.lifts()[0].exercises.len(), 3);

    lifts.toggle_star(created.workout.id).await.unwrap();
    assert!(lifts.lifts()[0].workout.is_starred);
    lifts.toggle_star(created.workout.id).await.unwrap();
    assert!(!lifts.lifts()[0].workout.is_starred);

    let declined = lifts
        .delete_workout(created.workout.id, &|_: &str| false)
        .await
        .unwrap();
    assert_eq!(declined, DeleteOutcome::Cancelled);
    assert_eq!(lifts.lifts().len(), 1);

    let deleted = lifts
        .delete_workout(created.workout.id, &|_: &str| true)
        .await
        .unwrap();
    assert_eq!(deleted, DeleteOutcome::Deleted);
    assert!(lifts.lifts().is_empty());
}

#[tokio::test]
async fn test_dashboard_and_meals_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = client_context(&dir).await;
    sign_up(&ctx, "eater@x.com").await;

    let mut meals = MealsView::new(ctx.clone());
    meals.mount().await;
    for (name, calories, date) in [("Oats", "350", "2024-03-01"), ("Rice", "500", "2024-03-02")] {
        meals.form.name = name.to_string();
        meals.form.calories = calories.to_string();
        meals.form.protein = "10".to_string();
        meals.form.carbs = "60".to_string();
        meals.form.fat = "5".to_string();
        meals.form.date = date.to_string();
        meals.add_meal().await.unwrap();
    }
    assert_eq!(meals.meals().len(), 2);
    assert_eq!(meals.daily_nutrition()[0].calories, 500);

    let mut dashboard = DashboardView::new(ctx.clone());
    assert_eq!(dashboard.mount().await, ViewStatus::Ready);
    assert_eq!(dashboard.meal_count(), 2);
    assert_eq!(dashboard.workout_count(), 0);
    assert_eq!(dashboard.total_distance(), "0.0");
    assert_eq!(dashboard.recent_meals()[0].name, "Rice");

    let first = meals.meals()[0].id;
    meals.delete_meal(first).await.unwrap();
    assert_eq!(meals.meals().len(), 1);
}
