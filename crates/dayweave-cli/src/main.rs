use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dayweave-cli", version, about = "Dayweave scheduling CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full planning pass over tasks and events
    Plan(commands::plan::PlanArgs),
    /// Report conflicts among fixed events
    Conflicts(commands::conflicts::ConflictsArgs),
    /// List free slots left by events within a horizon
    Slots(commands::slots::SlotsArgs),
    /// Split an oversized flexible task into focus chunks
    Split(commands::split::SplitArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Conflicts(args) => commands::conflicts::run(args),
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Split(args) => commands::split::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
