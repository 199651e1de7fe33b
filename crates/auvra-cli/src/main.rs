use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "auvra-cli", version, about = "Auvra weekly check-in CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive check-in conversation
    Chat(commands::chat::ChatArgs),
    /// Rewards progression
    Rewards {
        #[command(subcommand)]
        action: commands::rewards::RewardsAction,
    },
    /// Slider label and tint table
    Labels {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = auvra_core::Config::load_or_default();
    logging::init(&config.logging);

    let result = match cli.command {
        Commands::Chat(args) => commands::chat::run(args, &config),
        Commands::Rewards { action } => commands::rewards::run(action, &config),
        Commands::Labels { json } => commands::labels::run(json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
