use clap::{Parser, Subcommand};
use focusroom_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "focusroom", version, about = "Focusroom CLI")]
struct Cli {
    /// User id (falls back to FOCUSROOM_USER, then `user_id` in config)
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start, stop and inspect timed sessions
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Daily check-ins
    Checkin {
        #[command(subcommand)]
        action: commands::checkin::CheckinAction,
    },
    /// Session statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Per-user settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Duration presets and parsing
    Durations {
        #[command(subcommand)]
        action: commands::durations::DurationsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let ctx = commands::Context::new(config, cli.user);
    let result = match cli.command {
        Commands::Session { action } => commands::session::run(&ctx, action),
        Commands::Checkin { action } => commands::checkin::run(&ctx, action),
        Commands::Stats { action } => commands::stats::run(&ctx, action),
        Commands::Settings { action } => commands::settings::run(&ctx, action),
        Commands::Durations { action } => commands::durations::run(&ctx, action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
