use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "smartstudy", version, about = "Study planner CLI")]
struct Cli {
    /// Evaluate priorities and countdowns at this RFC 3339 time instead of now
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Subject management
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Ranked task priorities
    Priority {
        /// How many tasks to show (defaults to priority.top_n)
        #[arg(long)]
        top: Option<usize>,
        /// Show every task
        #[arg(long, conflicts_with = "top")]
        all: bool,
    },
    /// Today's timeline
    Timeline {
        #[command(subcommand)]
        action: commands::timeline::TimelineAction,
    },
    /// Exam dates and countdowns
    Exam {
        #[command(subcommand)]
        action: commands::exam::ExamAction,
    },
    /// Tasks grouped by status
    Board,
    /// Planned hours per day
    Week {
        /// Number of days to show (defaults to ui.week_days)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Focus timer control
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let now = cli.now.unwrap_or_else(Utc::now);
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Subject { action } => commands::subject::run(action, now),
        Commands::Priority { top, all } => commands::overview::priority(top, all, now),
        Commands::Timeline { action } => commands::timeline::run(action),
        Commands::Exam { action } => commands::exam::run(action, now),
        Commands::Board => commands::overview::board(),
        Commands::Week { days } => commands::overview::week(days),
        Commands::Focus { action } => commands::focus::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
