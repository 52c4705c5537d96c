use clap::{Parser, Subcommand};
use polynap_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "polynap-cli", version, about = "PolyNap CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a sleep schedule from survey answers
    Recommend(commands::recommend::RecommendArgs),
    /// Rank every free schedule for the given answers
    Rank(commands::recommend::RecommendArgs),
    /// Show how survey answers decode, defaults included
    Factors(commands::input::AnswerArgs),
    /// Schedule catalog inspection
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    commands::logging::init(&config.logging.level);

    let result = match cli.command {
        Commands::Recommend(args) => commands::recommend::run_recommend(&args, &config),
        Commands::Rank(args) => commands::recommend::run_rank(&args, &config),
        Commands::Factors(args) => commands::input::run_factors(&args),
        Commands::Catalog { action } => commands::catalog::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
