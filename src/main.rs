// src/main.rs
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use peakperform::auth::{logout, AuthForm, AuthMode, FileSessionStore, SessionStore};
use peakperform::common::{ClientConfig, ClientContext, ExercisePolicy};
use peakperform::gateway::HttpGateway;
use peakperform::meals::Meal;
use peakperform::mutations::{DeleteOutcome, MutationError};
use peakperform::views::{format_tenths, DashboardView, LiftsView, MealsView, RunsView, ViewStatus};
use peakperform::workouts::{ExerciseRow, LiftEntry, Workout};

type Ctx = ClientContext<HttpGateway, FileSessionStore>;

const LOGIN_HINT: &str = "Not signed in. Run `peakperform login --email <email>` or `peakperform signup` first.";

// ============================================================================
// COMMAND LINE
// ============================================================================

#[derive(Parser)]
#[command(name = "peakperform")]
#[command(about = "Track workouts and meals against a PeakPerform data service")]
#[command(
    after_help = "Environment:\n  PEAKPERFORM_API_URL          Data service base URL\n  PEAKPERFORM_SESSION_DIR      Session directory\n  PEAKPERFORM_EXERCISE_POLICY  best-effort | all-or-nothing"
)]
struct Cli {
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    session_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    exercise_policy: Option<ExercisePolicy>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Sign in with an existing email
    Login {
        #[arg(long)]
        email: String,
    },
    Logout,
    Whoami,
    Dashboard,
    Runs,
    Lifts,
    Meals,
    AddRun {
        #[arg(long = "type", default_value = "Running")]
        workout_type: String,
        /// Minutes
        #[arg(long)]
        duration: String,
        /// Kilometres
        #[arg(long)]
        distance: Option<String>,
        /// Minutes per kilometre
        #[arg(long)]
        pace: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
    AddLift {
        #[arg(long)]
        duration: String,
        #[arg(long)]
        date: String,
        /// name:sets:reps:weight, repeatable
        #[arg(long = "exercise")]
        exercises: Vec<String>,
    },
    AddMeal {
        #[arg(long)]
        name: String,
        #[arg(long)]
        calories: String,
        #[arg(long)]
        protein: String,
        #[arg(long)]
        carbs: String,
        #[arg(long)]
        fat: String,
        #[arg(long)]
        date: String,
    },
    /// Flip the star flag of a workout
    Star { id: i64 },
    DeleteWorkout {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    DeleteMeal { id: i64 },
}

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }
    if let Some(session_dir) = cli.session_dir {
        config.session_dir = session_dir;
    }
    if let Some(policy) = cli.exercise_policy {
        config.exercise_policy = policy;
    }
    config.log_summary();

    let ctx = ClientContext::new(
        HttpGateway::new(config.api_url.clone()),
        FileSessionStore::new(config.session_dir.clone()),
    )
    .with_exercise_policy(config.exercise_policy);

    run(cli.command, ctx).await
}

async fn run(command: Commands, ctx: Ctx) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Signup { name, email } => {
            let mut form = AuthForm::new(AuthMode::Signup);
            form.name = name;
            form.email = email;
            authenticate(form, &ctx).await
        }
        Commands::Login { email } => {
            let mut form = AuthForm::new(AuthMode::Login);
            form.email = email;
            authenticate(form, &ctx).await
        }
        Commands::Logout => {
            logout(&ctx)?;
            println!("Signed out.");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Whoami => match ctx.session.current_user() {
            Some(user) => {
                println!("{} <{}> (id {})", user.name, user.email, user.id);
                Ok(ExitCode::SUCCESS)
            }
            None => Ok(not_signed_in()),
        },
        Commands::Dashboard => {
            let mut view = DashboardView::new(ctx);
            if view.mount().await != ViewStatus::Ready {
                return Ok(not_signed_in());
            }
            report_load_error(view.error());
            println!(
                "Workouts: {}   Meals: {}   Total distance: {} km",
                view.workout_count(),
                view.meal_count(),
                view.total_distance()
            );
            println!("\nRecent workouts:");
            view.recent_workouts().iter().for_each(print_workout);
            println!("\nRecent meals:");
            view.recent_meals().iter().for_each(print_meal);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Runs => {
            let mut view = RunsView::new(ctx);
            if view.mount().await != ViewStatus::Ready {
                return Ok(not_signed_in());
            }
            report_load_error(view.error());
            println!("Total distance: {} km", view.total_distance());
            view.runs().iter().for_each(print_workout);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Lifts => {
            let mut view = LiftsView::new(ctx);
            if view.mount().await != ViewStatus::Ready {
                return Ok(not_signed_in());
            }
            report_load_error(view.error());
            view.lifts().iter().for_each(print_lift);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Meals => {
            let mut view = MealsView::new(ctx);
            if view.mount().await != ViewStatus::Ready {
                return Ok(not_signed_in());
            }
            report_load_error(view.error());
            for day in view.daily_nutrition() {
                println!(
                    "{}  {} kcal  P {}g  C {}g  F {}g  ({} meals)",
                    day.date,
                    day.calories,
                    format_tenths(day.protein),
                    format_tenths(day.carbs),
                    format_tenths(day.fat),
                    day.meal_count
                );
            }
            println!();
            view.meals().iter().for_each(print_meal);
            Ok(ExitCode::SUCCESS)
        }
        Commands::AddRun {
            workout_type,
            duration,
            distance,
            pace,
            date,
        } => {
            let mut view = RunsView::new(ctx);
            if view.mount().await != ViewStatus::Ready {
                return Ok(not_signed_in());
            }
            view.form.workout_type = workout_type;
            view.form.duration = duration;
            view.form.distance = distance.unwrap_or_default();
            view.form.pace = pace.unwrap_or_default();
            view.form.date = date;

            let workout = view.add_run().await?;
            println!("Saved workout #{}.", workout.id);
            Ok(ExitCode::SUCCESS)
        }
        Commands::AddLift {
            duration,
            date,
            exercises,
        } => {
            let rows = exercises
                .iter()
                .map(|raw| parse_exercise(raw))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let mut view = LiftsView::new(ctx);
            if view.mount().await != ViewStatus::Ready {
                return Ok(not_signed_in());
            }
            view.form.duration = duration;
            view.form.date = date;
            if !rows.is_empty() {
                view.form.exercises = rows;
            }

            let created = view.add_lift().await?;
            println!(
                "Saved workout #{} with {} exercises.",
                created.workout.id,
                created.exercises.len()
            );
            if created.failed > 0 {
                eprintln!("{} exercises could not be saved.", created.failed);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::AddMeal {
            name,
            calories,
            protein,
            carbs,
            fat,
            date,
        } => {
            let mut view = MealsView::new(ctx);
            if view.mount().await != ViewStatus::Ready {
                return Ok(not_signed_in());
            }
            view.form.name = name;
            view.form.calories = calories;
            view.form.protein = protein;
            view.form.carbs = carbs;
            view.form.fat = fat;
            view.form.date = date;

            let meal = view.add_meal().await?;
            println!("Saved meal #{}.", meal.id);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Star { id } => {
            let mut runs = RunsView::new(ctx.clone());
            if runs.mount().await != ViewStatus::Ready {
                return Ok(not_signed_in());
            }
            match runs.toggle_star(id).await {
                Err(MutationError::UnknownWorkout(_)) => {
                    let mut lifts = LiftsView::new(ctx);
                    lifts.mount().await;
                    lifts.toggle_star(id).await?;
                }
                other => other?,
            }
            println!("Toggled star on workout #{}.", id);
            Ok(ExitCode::SUCCESS)
        }
        Commands::DeleteWorkout { id, yes } => {
            let mut view = RunsView::new(ctx);
            if view.mount().await != ViewStatus::Ready {
                return Ok(not_signed_in());
            }
            let outcome = if yes {
                view.delete_workout(id, &|_: &str| true).await?
            } else {
                view.delete_workout(id, &confirm_on_stdin).await?
            };
            match outcome {
                DeleteOutcome::Deleted => println!("Deleted workout #{}.", id),
                DeleteOutcome::Cancelled => println!("Cancelled."),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::DeleteMeal { id } => {
            let mut view = MealsView::new(ctx);
            if view.mount().await != ViewStatus::Ready {
                return Ok(not_signed_in());
            }
            view.delete_meal(id).await?;
            println!("Deleted meal #{}.", id);
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

async fn authenticate(mut form: AuthForm, ctx: &Ctx) -> anyhow::Result<ExitCode> {
    match form.submit(ctx).await {
        Some(user) => {
            println!("Signed in as {} <{}>.", user.name, user.email);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("{}", form.error.as_deref().unwrap_or("Sign in failed"));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn not_signed_in() -> ExitCode {
    eprintln!("{}", LOGIN_HINT);
    ExitCode::FAILURE
}

fn report_load_error(error: Option<&str>) {
    if let Some(error) = error {
        eprintln!("Could not load data: {}", error);
    }
}

/// `name:sets:reps:weight`; the name may itself contain colons.
fn parse_exercise(raw: &str) -> anyhow::Result<ExerciseRow> {
    let mut parts = raw.rsplitn(4, ':');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(weight), Some(reps), Some(sets), Some(name)) => {
            Ok(ExerciseRow::new(name, sets, reps, weight))
        }
        _ => anyhow::bail!("Invalid exercise '{}', expected name:sets:reps:weight", raw),
    }
}

fn confirm_on_stdin(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_workout(workout: &Workout) {
    let star = if workout.is_starred { "*" } else { " " };
    let distance = workout
        .distance_km
        .map(|km| format!("  {} km", format_tenths(km)))
        .unwrap_or_default();
    let pace = workout
        .pace_min_per_km
        .map(|pace| format!("  {} min/km", format_tenths(pace)))
        .unwrap_or_default();
    println!(
        "{} #{:<4} {}  {:<10} {} min{}{}",
        star, workout.id, workout.date, workout.workout_type, workout.duration_min, distance, pace
    );
}

fn print_lift(entry: &LiftEntry) {
    print_workout(&entry.workout);
    for exercise in &entry.exercises {
        println!(
            "         {}  {}x{} @ {} kg",
            exercise.name,
            exercise.sets,
            exercise.reps,
            format_tenths(exercise.weight)
        );
    }
}

fn print_meal(meal: &Meal) {
    println!(
        "  #{:<4} {}  {:<20} {} kcal  P {}g  C {}g  F {}g",
        meal.id, meal.date, meal.name, meal.calories, meal.protein, meal.carbs, meal.fat
    );
}
