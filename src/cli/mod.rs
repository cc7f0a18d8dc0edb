//! CLI interface for the portal

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "portal")]
#[command(author = "Krakaw")]
#[command(version = "0.1.0")]
#[command(about = "Residential community portal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new portal.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to [server].host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to [server].port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print a bcrypt hash for a password, for [[users]] entries
    HashPassword {
        password: String,
    },

    /// Create a user in the configured database
    AddUser {
        #[arg(long)]
        email: String,

        #[arg(long, env = "PORTAL_NEW_USER_PASSWORD")]
        password: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long, default_value = "")]
        phone: String,

        /// House or unit label
        #[arg(long, default_value = "")]
        house: String,

        /// One of: residente, administrador, vigilante, mantenimiento
        #[arg(long, default_value = "residente")]
        role: String,
    },

    /// Sign in against the portal API
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "PORTAL_PASSWORD")]
        password: String,

        /// Keep the session after this command exits
        #[arg(short, long)]
        remember_me: bool,
    },

    /// Sign out, keeping the remember-me choice
    Logout,

    /// Sign out and delete the stored session
    Reset,

    /// Show the signed-in user
    Whoami {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show where opening a path would land the current session
    Navigate {
        /// Page path, e.g. /admin/usuarios
        path: String,

        /// Viewport width in pixels (desktop when omitted)
        #[arg(short, long)]
        width: Option<u32>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
