use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "focusgate", version, about = "Focusgate CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current focus state
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle focus mode on or off
    Toggle,
    /// Print whether blocking is active right now
    ShouldBlock,
    /// Blocked sites management
    Sites {
        #[command(subcommand)]
        action: commands::sites::SitesAction,
    },
    /// Focus schedule management
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Focus streak management
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Run the background controller: hourly streak checks, storage-change
    /// watching and rule reconciliation
    Run,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status { json } => commands::status::status(json).await,
        Commands::Toggle => commands::status::toggle().await,
        Commands::ShouldBlock => commands::status::should_block().await,
        Commands::Sites { action } => commands::sites::run(action).await,
        Commands::Schedule { action } => commands::schedule::run(action).await,
        Commands::Streak { action } => commands::streak::run(action).await,
        Commands::Run => commands::daemon::run().await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
