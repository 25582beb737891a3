use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use taskboost_core::{
    Notification, NotificationLog, ProfileSummary, RewardsSummary, Seed, StatusFilter, TaskDraft,
    TaskStatus, TaskStore, TracingObserver, leaderboard, parse_date, user_by_id,
};
use std::rc::Rc;

mod config;
mod dashboard;
mod render;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "taskboost",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TASKBOOST_BUILD_SHA"), ")"),
    about = "TaskBoost rewards hub: tasks, leaderboard and bonuses"
)]
struct Cli {
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive dashboard (q to quit)
    Dashboard,

    /// List tasks, newest first
    Tasks {
        /// open, in-progress or completed
        #[arg(long)]
        status: Option<TaskStatus>,

        /// Only tasks assigned to this user id
        #[arg(long)]
        user: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Top performers by total reward
    Leaderboard {
        /// Number of users shown (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Performance card for a user
    Profile {
        /// User id (default: dashboard.current_user)
        #[arg(long)]
        user: Option<String>,
    },

    /// Team reward progress
    Summary,

    /// Validate and add a task to a fresh session, then show it
    Add {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Assignee user id
        #[arg(long, default_value = "")]
        assignee: String,

        #[arg(long, default_value = "")]
        department: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Reward in dollars (default from config)
        #[arg(long)]
        reward: Option<u32>,
    },

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.taskboost/config.toml with defaults if missing
    Init,

    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let cfg = config::load_config()?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Dashboard => {
            let seed = state::load_seed(cfg.tasks.seed_file.as_deref())?;
            dashboard::run_dashboard(&cfg, seed)?;
        }

        Command::Tasks { status, user, json } => {
            let seed = state::load_seed(cfg.tasks.seed_file.as_deref())?;
            let tasks: Vec<_> = StatusFilter::from(status)
                .apply(&seed.tasks)
                .into_iter()
                .filter(|t| user.as_deref().is_none_or(|u| t.assigned_to == u))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                render::print_tasks(&tasks, &seed.users, today);
            }
        }

        Command::Leaderboard { limit } => {
            let seed = state::load_seed(cfg.tasks.seed_file.as_deref())?;
            let limit = limit.unwrap_or(cfg.dashboard.leaderboard_limit);
            render::print_leaderboard(&leaderboard(&seed.users, limit));
        }

        Command::Profile { user } => {
            let seed = state::load_seed(cfg.tasks.seed_file.as_deref())?;
            let id = user.unwrap_or_else(|| cfg.dashboard.current_user.clone());
            let u = user_by_id(&seed.users, &id)
                .ok_or_else(|| taskboost_core::TaskError::UnknownUser(id.clone()))?;
            render::print_profile(&ProfileSummary::compute(u, &seed.tasks));
        }

        Command::Summary => {
            let seed = state::load_seed(cfg.tasks.seed_file.as_deref())?;
            render::print_rewards(&rewards_summary(&cfg, &seed), today);
        }

        Command::Add {
            title,
            description,
            assignee,
            department,
            due,
            reward,
        } => {
            let due_date = due.as_deref().map(parse_date).transpose()?;
            let draft = TaskDraft {
                title,
                description,
                assigned_to: assignee,
                department,
                due_date,
                reward,
            };
            add_task(&cfg, &draft, today)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config(&cfg)?,
        },
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TASKBOOST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

pub(crate) fn rewards_summary(cfg: &Config, seed: &Seed) -> RewardsSummary {
    RewardsSummary::compute(
        &seed.users,
        &seed.tasks,
        cfg.dashboard.target_rewards,
        cfg.dashboard.upcoming_payout.clone(),
    )
}

pub(crate) fn session_store(cfg: &Config, tasks: Vec<taskboost_core::Task>) -> TaskStore {
    let mut store = TaskStore::new(tasks).with_default_reward(cfg.tasks.default_reward);
    store.subscribe(TracingObserver);
    store
}

fn add_task(cfg: &Config, draft: &TaskDraft, today: chrono::NaiveDate) -> Result<()> {
    let seed = state::load_seed(cfg.tasks.seed_file.as_deref())?;
    let log = Rc::new(NotificationLog::default());
    let mut store = session_store(cfg, seed.tasks);
    store.subscribe(log.clone());

    let result = store.submit(draft).cloned();
    for n in log.drain() {
        print_notification(&n);
    }

    let task = result.context("task not added")?;
    println!();
    render::print_tasks(&[&task], &seed.users, today);
    println!("\nSession now holds {} tasks (nothing is saved).", store.len());
    Ok(())
}

fn print_notification(n: &Notification) {
    println!("{}: {}", n.title, n.description);
}
