//! services/client/src/bin/pairpad.rs

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use client_lib::{
    app::App,
    config::Config,
    error::ClientError,
    flows::{
        self,
        auth::{login, logout, restore_session},
        discover::{load_matches, score_for},
        AssessmentFlow, ConsoleNotifier, Conversation, DashboardController, DiscoverFeed,
        ProfileFlow, RegistrationFlow, RequestsInbox,
    },
};
use pairpad_core::coliving::{SharedDashboard, SpaceSearch, TaskDraft};
use pairpad_core::domain::{CommunicationStyle, RecordId, RequestResponse, Role, TraitVector};
use pairpad_core::forms::assessment::DEFAULT_RESPONSE;
use pairpad_core::scoring::compatibility_score;
use pairpad_core::validation::FieldErrors;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pairpad", about = "Find compatible roommates and run a shared household")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with email and password.
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "student")]
        role: Role,
    },
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Edit profile fields. Unset flags keep their current value.
    Profile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        date_of_birth: Option<NaiveDate>,
        #[arg(long)]
        current_city: Option<String>,
        #[arg(long)]
        preferred_city: Option<String>,
        #[arg(long)]
        budget_min: Option<u32>,
        #[arg(long)]
        budget_max: Option<u32>,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Take the personality assessment.
    Assess {
        /// JSON file with answers; neutral answers are used otherwise.
        #[arg(long)]
        answers: Option<PathBuf>,
    },
    /// List suggested roommates.
    Suggestions,
    Like { user_id: RecordId },
    Pass { user_id: RecordId },
    /// Send a match request to a user outside the suggestions, such as a space owner.
    Request { user_id: RecordId },
    Matches,
    /// List incoming match requests.
    Requests,
    /// Answer the match request a user sent.
    Respond { user_id: RecordId, decision: Decision },
    Messages { match_id: RecordId },
    Send { match_id: RecordId, content: String },
    /// Browse living spaces.
    Spaces {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Only spaces you created.
        #[arg(long)]
        mine: bool,
    },
    /// Show a shared dashboard by living space, or by match with --by-match.
    Dashboard {
        id: RecordId,
        #[arg(long)]
        by_match: bool,
    },
    #[command(subcommand)]
    Task(TaskCommand),
    /// Offline fallback score of two trait vectors, e.g. 80,60,40,70,30.
    Score {
        #[arg(value_parser = parse_traits)]
        a: TraitVector,
        #[arg(value_parser = parse_traits)]
        b: TraitVector,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    Add {
        space_id: RecordId,
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Toggle a task between done and open.
    Done { space_id: RecordId, task_id: RecordId },
}

#[derive(Clone, Copy, ValueEnum)]
enum Decision {
    Accept,
    Decline,
}

impl From<Decision> for RequestResponse {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accept => RequestResponse::Accept,
            Decision::Decline => RequestResponse::Decline,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct AnswerFile {
    #[serde(default)]
    answers: BTreeMap<String, u8>,
    cleanliness: Option<u8>,
    social_level: Option<u8>,
    quiet_hours: Option<bool>,
    pets: Option<bool>,
    smoking: Option<bool>,
    communication_style: Option<CommunicationStyle>,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Using backend at {}", config.api_url);

    // --- 2. Build the App ---
    let app = App::from_config(&config, Arc::new(ConsoleNotifier))?;

    // --- 3. Run the Command ---
    match cli.command {
        Command::Login { email, password } => {
            let route = login(&app, &email, &password).await?;
            println!("→ {}", route);
        }
        Command::Register {
            email,
            username,
            password,
            role,
        } => register(&app, email, username, password, role).await?,
        Command::Logout => {
            logout(&app).await?;
            println!("Signed out.");
        }
        Command::Whoami => {
            if restore_session(&app).await {
                let user = app.current_user().await?;
                println!("{} <{}> ({:?})", user.display_name(), user.email, user.role);
                match &user.personality_profile {
                    Some(p) => println!(
                        "O {} C {} E {} A {} N {} · {:?}",
                        p.openness,
                        p.conscientiousness,
                        p.extraversion,
                        p.agreeableness,
                        p.neuroticism,
                        p.communication_style
                    ),
                    None => println!("No personality profile yet: run `pairpad assess`."),
                }
            } else {
                println!("Not signed in.");
            }
        }
        Command::Profile {
            first_name,
            last_name,
            date_of_birth,
            current_city,
            preferred_city,
            budget_min,
            budget_max,
            bio,
        } => {
            let mut flow = ProfileFlow::for_current_user(&app, Utc::now().date_naive()).await?;
            let form = flow.form_mut();
            if let Some(v) = first_name {
                form.edit("first_name", |d| d.first_name = v);
            }
            if let Some(v) = last_name {
                form.edit("last_name", |d| d.last_name = v);
            }
            if let Some(v) = date_of_birth {
                form.edit("date_of_birth", |d| d.date_of_birth = Some(v));
            }
            if let Some(v) = current_city {
                form.edit("current_city", |d| d.current_city = v);
            }
            if let Some(v) = preferred_city {
                form.edit("preferred_city", |d| d.preferred_city = v);
            }
            if let Some(v) = budget_min {
                form.edit("budget_min", |d| d.budget_min = Some(v));
            }
            if let Some(v) = budget_max {
                form.edit("budget_max", |d| d.budget_max = Some(v));
            }
            if let Some(v) = bio {
                form.edit("bio", |d| d.bio = v);
            }
            match flow.save(&app).await {
                Ok(user) => println!("Saved profile of {}.", user.display_name()),
                Err(ClientError::Invalid(errors)) => {
                    print_errors(&errors);
                    return Err(ClientError::Invalid(errors));
                }
                Err(e) => return Err(e),
            }
        }
        Command::Assess { answers } => assess(&app, answers).await?,
        Command::Suggestions => {
            let feed = DiscoverFeed::new();
            for user in feed.load(&app).await? {
                let score = score_for(&app, &user)
                    .await
                    .map(|s| format!("{}% ({:?})", s.value, s.source))
                    .unwrap_or_else(|| "n/a".to_string());
                println!(
                    "#{:<5} {:<24} {:<16} {}",
                    user.id,
                    user.display_name(),
                    user.current_city.as_deref().unwrap_or("-"),
                    score
                );
            }
        }
        Command::Like { user_id } => {
            let outcome = DiscoverFeed::new().like(&app, user_id).await?;
            if let Some(match_id) = outcome.match_id {
                println!("→ {}", flows::Route::Conversation(match_id));
            }
        }
        Command::Pass { user_id } => DiscoverFeed::new().pass(&app, user_id).await?,
        Command::Request { user_id } => {
            DiscoverFeed::new().request_match(&app, user_id).await?;
        }
        Command::Matches => {
            let me = app.current_user().await?.id;
            for m in load_matches(&app).await? {
                let other = m
                    .other_user
                    .as_ref()
                    .map(|u| u.display_name().to_string())
                    .unwrap_or_else(|| format!("user {}", m.other_user_id(me)));
                println!(
                    "match #{:<5} {:<24} {:>5.1}% {:?}",
                    m.id, other, m.compatibility_score, m.status
                );
            }
        }
        Command::Requests => {
            let inbox = RequestsInbox::load(&app).await?;
            if inbox.requests.is_empty() {
                println!("No pending requests.");
            }
            for request in &inbox.requests {
                println!(
                    "from #{:<5} {:<24} {:>5.1}%",
                    request.requesting_user.id,
                    request.requesting_user.display_name(),
                    request.compatibility_score
                );
            }
        }
        Command::Respond { user_id, decision } => {
            let mut inbox = RequestsInbox::load(&app).await?;
            inbox.respond(&app, user_id, decision.into()).await?;
        }
        Command::Messages { match_id } => {
            for message in Conversation::new(match_id).load(&app).await? {
                let when = message
                    .timestamp
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!(
                    "[{}] {}: {}",
                    when,
                    message.sender.as_deref().unwrap_or("?"),
                    message.content
                );
            }
        }
        Command::Send { match_id, content } => {
            let message = Conversation::new(match_id).send(&app, &content).await?;
            println!("Sent message #{}", message.id);
        }
        Command::Spaces { city, search, mine } => {
            let spaces = if mine {
                app.backend.coliving.my_spaces().await?
            } else {
                let query = SpaceSearch {
                    city,
                    search,
                    ..Default::default()
                };
                app.backend.coliving.spaces(&query).await?
            };
            for space in spaces {
                println!(
                    "#{:<5} {:<28} {:<16} rent {} · {} room(s) free",
                    space.id,
                    space.name,
                    space.city,
                    space
                        .total_rent
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    space.available_rooms().count()
                );
            }
        }
        Command::Dashboard { id, by_match } => {
            let controller = if by_match {
                DashboardController::open_for_match(&app, id).await?
            } else {
                DashboardController::open(&app, id).await?
            };
            print_dashboard(controller.snapshot());
        }
        Command::Task(TaskCommand::Add {
            space_id,
            title,
            description,
        }) => {
            let mut controller = DashboardController::open(&app, space_id).await?;
            let draft = TaskDraft {
                title,
                description: description.unwrap_or_default(),
                ..Default::default()
            };
            let task = controller.add_task(&app, draft).await?;
            println!("Created task #{}", task.id);
        }
        Command::Task(TaskCommand::Done { space_id, task_id }) => {
            let mut controller = DashboardController::open(&app, space_id).await?;
            let task = controller.toggle_task(&app, task_id).await?;
            println!("Task #{} is now {:?}", task.id, task.status);
        }
        Command::Score { a, b } => {
            println!("{}", compatibility_score(&a, &b));
        }
    }

    Ok(())
}

async fn register(
    app: &App,
    email: String,
    username: String,
    password: String,
    role: Role,
) -> Result<(), ClientError> {
    let mut flow = RegistrationFlow::new()?;
    let form = flow.form_mut();
    form.edit("email", |d| d.email = email);
    form.edit("username", |d| d.username = username);
    form.edit("confirm_password", |d| d.confirm_password = password.clone());
    form.edit("password", |d| d.password = password);
    if let Err(e) = form.advance() {
        print_errors(form.errors());
        return Err(e.into());
    }
    form.edit("role", |d| d.role = Some(role));

    match flow.submit(app).await {
        Ok(route) => {
            println!("→ {}", route);
            Ok(())
        }
        Err(e) => {
            print_errors(flow.form().errors());
            Err(e)
        }
    }
}

async fn assess(app: &App, answers: Option<PathBuf>) -> Result<(), ClientError> {
    let file = match answers {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<AnswerFile>(&raw)
                .map_err(|e| ClientError::Internal(format!("Invalid answers file: {}", e)))?
        }
        None => AnswerFile::default(),
    };

    let mut flow = AssessmentFlow::start(app).await?;
    let questions = flow.form().data().questions.clone();
    for question in &questions {
        let value = file
            .answers
            .get(&question.id.to_string())
            .copied()
            .unwrap_or(DEFAULT_RESPONSE);
        flow.answer(app, question.id, value).await;
    }

    let form = flow.form_mut();
    form.edit("cleanliness", |d| d.cleanliness = Some(file.cleanliness.unwrap_or(3)));
    form.edit("social_level", |d| d.social_level = Some(file.social_level.unwrap_or(3)));
    form.edit("quiet_hours", |d| d.quiet_hours = Some(file.quiet_hours.unwrap_or(false)));
    form.edit("pets", |d| d.pets = Some(file.pets.unwrap_or(false)));
    form.edit("smoking", |d| d.smoking = Some(file.smoking.unwrap_or(false)));
    if let Some(style) = file.communication_style {
        form.edit("communication_style", |d| d.communication_style = Some(style));
    }
    while !form.is_final_step() {
        if let Err(e) = form.advance() {
            print_errors(form.errors());
            return Err(e.into());
        }
    }

    let route = flow.submit(app).await?;
    println!("→ {}", route);
    Ok(())
}

fn print_dashboard(dashboard: &SharedDashboard) {
    println!(
        "{} open task(s) · {} unread notification(s)",
        dashboard.open_tasks(),
        dashboard.unread_notifications()
    );

    println!("\nTasks");
    for task in &dashboard.tasks {
        let mark = if task.is_done() { "x" } else { " " };
        println!(
            "  [{}] #{:<5} {} ({})",
            mark,
            task.id,
            task.title,
            task.assigned_to.as_deref().unwrap_or("unassigned")
        );
    }

    println!("\nExpenses");
    for expense in &dashboard.expenses {
        println!(
            "  #{:<5} {:<24} {:>10} outstanding {}",
            expense.id,
            expense.title,
            expense.amount,
            expense.outstanding()
        );
    }

    println!("\nBills");
    for bill in &dashboard.bills {
        println!(
            "  #{:<5} {:<24} {:>10} {:?}",
            bill.id, bill.title, bill.amount, bill.status
        );
    }

    println!("\nShopping");
    for list in &dashboard.shopping_lists {
        println!("  #{:<5} {} ({} left)", list.id, list.name, list.remaining());
    }

    println!("\nEvents");
    for event in &dashboard.calendar_events {
        println!(
            "  #{:<5} {} {}",
            event.id,
            event.start_datetime.format("%Y-%m-%d %H:%M"),
            event.title
        );
    }

    println!("\nMembers");
    for member in &dashboard.members {
        println!("  #{:<5} {:<20} {:?}", member.user, member.username, member.role);
    }
}

fn print_errors(errors: &FieldErrors) {
    for (field, message) in errors.fields() {
        eprintln!("  {}: {}", field, message);
    }
}

fn parse_traits(raw: &str) -> Result<TraitVector, String> {
    let values: Vec<u8> = raw
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("'{}' is not a list of numbers: {}", raw, e))?;
    match values.as_slice() {
        [o, c, e, a, n] => Ok(TraitVector::new(*o, *c, *e, *a, *n)),
        _ => Err(format!("expected five comma-separated values, got {}", values.len())),
    }
}
