mod cmd;
mod output;
mod root;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use cmd::{
    area::AreaSubcommand, board::BoardSubcommand, dream::DreamSubcommand,
    goal::GoalSubcommand, habit::HabitSubcommand, journal::JournalSubcommand,
    letter::LetterSubcommand, money::MoneySubcommand, plan::PlanSubcommand,
    settings::SettingsSubcommand, template::TemplateSubcommand, travel::TravelSubcommand,
    vision::VisionSubcommand, Ctx,
};
use dreamlife_core::clock::{Clock, FixedClock, SystemClock};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dreamlife",
    about = "Plan your dream life: goals, habits, letters to your future self, savings and more",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data root (default: nearest dir with .dreamlife/, else home)
    #[arg(long, global = true, env = "DREAMLIFE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, env = "DREAMLIFE_TODAY", value_name = "DATE")]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the .dreamlife directory and default config
    Init,

    /// Dream goals and their milestones
    Goal {
        #[command(subcommand)]
        subcommand: GoalSubcommand,
    },

    /// Daily habits and streaks
    Habit {
        #[command(subcommand)]
        subcommand: HabitSubcommand,
    },

    /// Letters to your future self
    Letter {
        #[command(subcommand)]
        subcommand: LetterSubcommand,
    },

    /// Travel wishlist
    Travel {
        #[command(subcommand)]
        subcommand: TravelSubcommand,
    },

    /// Savings goals
    Money {
        #[command(subcommand)]
        subcommand: MoneySubcommand,
    },

    /// Daily planner
    Plan {
        #[command(subcommand)]
        subcommand: PlanSubcommand,
    },

    /// Reflection journal and mood
    Journal {
        #[command(subcommand)]
        subcommand: JournalSubcommand,
    },

    /// Vision board quotes and images
    Vision {
        #[command(subcommand)]
        subcommand: VisionSubcommand,
    },

    /// Themed vision boards
    Board {
        #[command(subcommand)]
        subcommand: BoardSubcommand,
    },

    /// Life areas and overall balance
    Area {
        #[command(subcommand)]
        subcommand: AreaSubcommand,
    },

    /// Starter plans that add goals and habits
    Template {
        #[command(subcommand)]
        subcommand: TemplateSubcommand,
    },

    /// Your dream statement
    Dream {
        #[command(subcommand)]
        subcommand: DreamSubcommand,
    },

    /// Profile and preferences
    Settings {
        #[command(subcommand)]
        subcommand: SettingsSubcommand,
    },

    /// Create a local profile and log in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm: String,
    },

    /// Log in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log out
    Logout {
        /// Also erase every stored collection
        #[arg(long)]
        purge: bool,
    },

    /// Show who is logged in
    Whoami,

    /// Dashboard across every tracker
    Progress,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let clock: Box<dyn Clock> = match cli.today {
        Some(date) => Box::new(FixedClock::new(Utc::now(), date)),
        None => Box::new(SystemClock),
    };
    let ctx = Ctx {
        root: root::resolve_root(cli.root.as_deref()),
        clock,
        json: cli.json,
    };
    tracing::debug!(root = %ctx.root.display(), today = %ctx.clock().today(), "resolved context");

    let result = match cli.command {
        Commands::Init => cmd::init::run(&ctx),
        Commands::Goal { subcommand } => cmd::goal::run(&ctx, subcommand),
        Commands::Habit { subcommand } => cmd::habit::run(&ctx, subcommand),
        Commands::Letter { subcommand } => cmd::letter::run(&ctx, subcommand),
        Commands::Travel { subcommand } => cmd::travel::run(&ctx, subcommand),
        Commands::Money { subcommand } => cmd::money::run(&ctx, subcommand),
        Commands::Plan { subcommand } => cmd::plan::run(&ctx, subcommand),
        Commands::Journal { subcommand } => cmd::journal::run(&ctx, subcommand),
        Commands::Vision { subcommand } => cmd::vision::run(&ctx, subcommand),
        Commands::Board { subcommand } => cmd::board::run(&ctx, subcommand),
        Commands::Area { subcommand } => cmd::area::run(&ctx, subcommand),
        Commands::Template { subcommand } => cmd::template::run(&ctx, subcommand),
        Commands::Dream { subcommand } => cmd::dream::run(&ctx, subcommand),
        Commands::Settings { subcommand } => cmd::settings::run(&ctx, subcommand),
        Commands::Signup {
            name,
            email,
            password,
            confirm,
        } => cmd::auth::signup(&ctx, name, email, password, confirm),
        Commands::Login { email, password } => cmd::auth::login(&ctx, email, password),
        Commands::Logout { purge } => cmd::auth::logout(&ctx, purge),
        Commands::Whoami => cmd::auth::whoami(&ctx),
        Commands::Progress => cmd::progress::run(&ctx),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
