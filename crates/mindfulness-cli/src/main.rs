use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "mindfulness", version, about = "Guided mindfulness activities")]
struct Cli {
    /// Print activity events as JSON lines, without animations
    #[arg(long, global = true)]
    json: bool,

    /// Seed for prompt selection (overrides the `seed` config key)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Breathing activity
    Breathe(commands::activity::ActivityArgs),
    /// Reflection activity
    Reflect(commands::activity::ActivityArgs),
    /// Listing activity
    List(commands::activity::ActivityArgs),
    /// Interactive activity menu (default)
    Menu,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let options = commands::Options {
        json: cli.json,
        seed: cli.seed,
    };
    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Breathe(args) => {
            commands::activity::run(mindfulness_core::ActivityKind::Breathing, args, &options)
        }
        Commands::Reflect(args) => {
            commands::activity::run(mindfulness_core::ActivityKind::Reflection, args, &options)
        }
        Commands::List(args) => {
            commands::activity::run(mindfulness_core::ActivityKind::Listing, args, &options)
        }
        Commands::Menu => commands::menu::run(&options),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
