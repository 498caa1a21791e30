use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;
mod migrate;

/// rollcall - event check-in and attendance tracking
#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Event check-in and attendance tracking", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Load sample events, members and attendance into an empty database
    Seed,
    /// Member administration
    Member {
        #[command(subcommand)]
        command: MemberCommands,
    },
}

#[derive(Subcommand)]
enum MemberCommands {
    /// Promote or demote a member
    Role {
        email: String,
        #[arg(value_enum)]
        role: cli::member::Role,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = rollcall::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    rollcall::observability::init_observability(
        "rollcall",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => migrate::migrate(&config).await,
        Commands::Reset => migrate::reset(&config).await,
        Commands::Seed => cli::seed::seed(config).await,
        Commands::Member {
            command: MemberCommands::Role { email, role },
        } => cli::member::set_role(config, email, role).await,
    }
}
