use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portal::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Serve { host, port } => cli::commands::serve(host, port).await,
        Commands::HashPassword { password } => cli::commands::hash_password(&password).await,
        Commands::AddUser {
            email,
            password,
            first_name,
            last_name,
            phone,
            house,
            role,
        } => {
            cli::commands::add_user(
                &email,
                &password,
                &first_name,
                &last_name,
                &phone,
                &house,
                &role,
            )
            .await
        }
        Commands::Login {
            email,
            password,
            remember_me,
        } => cli::commands::login(&email, &password, remember_me).await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Reset => cli::commands::reset().await,
        Commands::Whoami { format } => cli::commands::whoami(format).await,
        Commands::Navigate {
            path,
            width,
            format,
        } => cli::commands::navigate(&path, width, format).await,
    }
}
