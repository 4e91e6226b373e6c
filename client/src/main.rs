//! Event tracker command-line client
//!
//! ## Usage
//!
//! ```bash
//! eventtracker signup --name "Ada" --email ada@example.com --password secret
//! eventtracker login --email ada@example.com --password secret
//! eventtracker events list
//! eventtracker events create --title Standup --description daily --date 2024-01-01 --time 09:00
//! eventtracker events attend <ID> maybe
//! eventtracker logout
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventtracker_client::{
    ApiClient, CreateEvent, DEFAULT_SERVER_URL, EventTracker, FileTokenStore, Session,
};
use eventtracker_core::environment::SystemClock;
use eventtracker_core::{AttendanceStatus, Event, EventId};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eventtracker")]
#[command(about = "Track events, RSVPs, likes and comments", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Event tracker server address
    #[arg(long, env = "EVENTTRACKER_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// File holding the session token (defaults to ~/.eventtracker/token)
    #[arg(long, env = "EVENTTRACKER_TOKEN_FILE", value_name = "PATH")]
    token_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long, env = "EVENTTRACKER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in and remember the session
    Login {
        /// Email address
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long, env = "EVENTTRACKER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Browse and act on events
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },
}

#[derive(Subcommand)]
enum EventCommands {
    /// List all events
    List,

    /// Show one event
    Show {
        /// Event id
        #[arg(value_parser = parse_event_id)]
        id: EventId,
    },

    /// Create an event
    Create {
        /// Title
        #[arg(long)]
        title: String,
        /// Description
        #[arg(long)]
        description: String,
        /// Date
        #[arg(long)]
        date: String,
        /// Time
        #[arg(long)]
        time: String,
    },

    /// Comment on an event
    Comment {
        /// Event id
        #[arg(value_parser = parse_event_id)]
        id: EventId,
        /// Comment text
        text: String,
    },

    /// Like an event
    Like {
        /// Event id
        #[arg(value_parser = parse_event_id)]
        id: EventId,
    },

    /// Remove your like
    Unlike {
        /// Event id
        #[arg(value_parser = parse_event_id)]
        id: EventId,
    },

    /// RSVP: attending, maybe or not-attending
    Attend {
        /// Event id
        #[arg(value_parser = parse_event_id)]
        id: EventId,
        /// RSVP status
        #[arg(value_parser = parse_status)]
        status: AttendanceStatus,
    },
}

fn parse_event_id(raw: &str) -> Result<EventId, String> {
    EventId::parse(raw).ok_or_else(|| format!("'{raw}' is not an event id"))
}

fn parse_status(raw: &str) -> Result<AttendanceStatus, String> {
    raw.parse::<AttendanceStatus>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let token_file = cli
        .token_file
        .or_else(FileTokenStore::default_path)
        .context("HOME is not set; pass --token-file")?;
    let session = Session::new(Arc::new(FileTokenStore::new(token_file)), Arc::new(SystemClock));
    let mut tracker = EventTracker::open(ApiClient::new(cli.server), session)?;

    match cli.command {
        Commands::Signup {
            name,
            email,
            password,
        } => {
            let message = tracker
                .signup(&name, &email, &password)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("{message}. Log in to continue.");
        }
        Commands::Login { email, password } => {
            let user = tracker
                .login(&email, &password)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("Logged in as {} <{}>", user.full_name, user.email);
        }
        Commands::Logout => {
            tracker.logout()?;
            println!("Logged out");
        }
        Commands::Whoami => match tracker.user() {
            Some(user) => println!("{} <{}>", user.full_name, user.email),
            None => println!("Not logged in"),
        },
        Commands::Events { command } => run_event_command(&mut tracker, command).await?,
    }

    Ok(())
}

async fn run_event_command(tracker: &mut EventTracker, command: EventCommands) -> Result<()> {
    if !tracker.is_logged_in() {
        anyhow::bail!("Not logged in. Run `eventtracker login` first.");
    }
    let me = tracker.user().map(|u| u.email.clone()).unwrap_or_default();

    let outcome = match command {
        EventCommands::List => tracker.feed().await.map(|events| {
            if events.is_empty() {
                println!("No events yet");
            }
            for event in events {
                print_event(event, &me);
            }
        }),
        EventCommands::Show { id } => tracker.event(id).await.map(|e| print_event(&e, &me)),
        EventCommands::Create {
            title,
            description,
            date,
            time,
        } => {
            let event = CreateEvent {
                title,
                description,
                date,
                time,
            };
            tracker.create(&event).await.map(|e| print_event(&e, &me))
        }
        EventCommands::Comment { id, text } => {
            tracker.comment(id, &text).await.map(|e| print_event(&e, &me))
        }
        EventCommands::Like { id } => tracker.like(id, true).await.map(|e| print_event(&e, &me)),
        EventCommands::Unlike { id } => {
            tracker.like(id, false).await.map(|e| print_event(&e, &me))
        }
        EventCommands::Attend { id, status } => {
            tracker.attend(id, status).await.map(|e| print_event(&e, &me))
        }
    };

    outcome.map_err(|e| {
        if tracker.is_logged_in() {
            anyhow::anyhow!(e.user_message())
        } else {
            anyhow::anyhow!("{}. Log in again.", e.user_message())
        }
    })
}

fn print_event(event: &Event, me: &str) {
    println!("{}  {}", event.id, event.title);
    println!("    {} at {}", event.date, event.time);
    if !event.description.is_empty() {
        println!("    {}", event.description);
    }

    let liked = if event.is_liked_by(me) { " (you like this)" } else { "" };
    println!("    {} likes{liked}", event.like_count());

    if let Some(status) = event.attendance_of(me) {
        println!("    your RSVP: {status}");
    }
    for attendance in &event.attendance {
        println!("    - {} {}", attendance.email, attendance.status);
    }
    for comment in &event.comments {
        println!("    > {}: {}", comment.user, comment.text);
    }
}
