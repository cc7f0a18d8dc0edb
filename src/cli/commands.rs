//! CLI command implementations

use anyhow::{bail, Result};
use serde::Serialize;
use std::fs;
use std::sync::Arc;

use crate::access::{DeviceClass, Navigator};
use crate::auth::{PasswordHasher, Role, StoredUser, User};
use crate::cli::{error, info, print_navigation, print_session_table, success, warn, OutputFormat};
use crate::config::{self, Config};
use crate::db::{PostgresUserRepository, UserRepository};
use crate::session::{FileStorage, HttpAuthenticator, LoginOutcome, Session, SessionStore};

/// Initialize a new portal.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("portal.toml already exists");
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success("Created portal.toml");
    info("Add users under [[users]] or configure [database], then run 'portal serve'");

    Ok(())
}

/// Start the HTTP API server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting portal API on {}:{}", host, port));
    crate::api::run_server(config, &host, port).await?;
    Ok(())
}

/// Print a bcrypt hash for a password
pub async fn hash_password(password: &str) -> Result<()> {
    let config = load_config_or_default();
    let hash = PasswordHasher::new(config.auth.bcrypt_cost).hash(password)?;
    println!("{}", hash);
    Ok(())
}

/// Create a user in the configured database
#[allow(clippy::too_many_arguments)]
pub async fn add_user(
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
    phone: &str,
    house: &str,
    role: &str,
) -> Result<()> {
    let config = load_config()?;
    let Some(db) = &config.database else {
        bail!("No [database] configured; declare in-memory users under [[users]] instead");
    };

    if Role::from_role_str(role).as_str() != role {
        warn(&format!(
            "'{}' is not a known role; the user will be treated as a resident",
            role
        ));
    }

    let repo = PostgresUserRepository::connect(db).await?;
    repo.migrate().await?;

    let mut user = User::new(first_name, last_name, email, role);
    user.phone = phone.to_string();
    user.house_number = house.to_string();

    let password_hash = PasswordHasher::new(config.auth.bcrypt_cost).hash(password)?;
    repo.insert(StoredUser {
        user,
        password_hash,
    })
    .await?;

    success(&format!("Created user {} ({})", email, role));
    Ok(())
}

/// Sign in against the API and keep the session if asked to
pub async fn login(email: &str, password: &str, remember_me: bool) -> Result<()> {
    let config = load_config_or_default();
    let mut store = session_store(&config);
    store.set_remember_me(remember_me);

    match store.login(email, password).await {
        LoginOutcome::Success(user) => {
            success(&format!("Signed in as {} ({})", user.full_name(), user.role));

            // The login page forwards a signed-in user to their landing page
            let landing = Navigator::from_config(&config).resolve(
                store.session(),
                &config.routes.login,
                DeviceClass::Desktop,
            )?;
            info(&format!("Landing page: {}", landing.path));

            if !remember_me {
                warn("Session not remembered; it ends when this command exits");
            }
            Ok(())
        }
        LoginOutcome::Failure { message } => {
            error(&message);
            bail!(message)
        }
    }
}

/// Sign out
pub async fn logout() -> Result<()> {
    let config = load_config_or_default();
    let mut store = session_store(&config);
    let was_signed_in = store.is_authenticated();
    store.logout();

    if was_signed_in {
        success("Signed out");
    } else {
        info("Not signed in");
    }
    Ok(())
}

/// Sign out and delete the stored session
pub async fn reset() -> Result<()> {
    let config = load_config_or_default();
    let mut store = session_store(&config);
    store.reset_store();
    success(&format!(
        "Session reset ({} removed)",
        config.client.session_file.display()
    ));
    Ok(())
}

#[derive(Serialize)]
struct WhoAmI<'a> {
    authenticated: bool,
    remember_me: bool,
    role: Option<Role>,
    user: Option<&'a User>,
}

impl<'a> From<&'a Session> for WhoAmI<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            remember_me: session.remember_me(),
            role: session.role(),
            user: session.user(),
        }
    }
}

/// Show the signed-in user
pub async fn whoami(format: OutputFormat) -> Result<()> {
    let config = load_config_or_default();
    let store = session_store(&config);

    match format {
        OutputFormat::Table => print_session_table(store.session()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&WhoAmI::from(store.session()))?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&WhoAmI::from(store.session()))?;
            println!("{}", yaml);
        }
    }

    Ok(())
}

/// Show where a path leads for the current session
pub async fn navigate(path: &str, width: Option<u32>, format: OutputFormat) -> Result<()> {
    let config = load_config_or_default();
    let store = session_store(&config);
    let device = width
        .map(DeviceClass::from_width)
        .unwrap_or(DeviceClass::Desktop);

    let navigation = Navigator::from_config(&config).resolve(store.session(), path, device)?;

    match format {
        OutputFormat::Table => print_navigation(&navigation),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&navigation)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&navigation)?),
    }

    Ok(())
}

// Helper functions

fn load_config() -> Result<Config> {
    config::load_config().map_err(|e| {
        error(&format!("Failed to load config: {}", e));
        e.into()
    })
}

/// Client commands work without a config file
fn load_config_or_default() -> Config {
    match config::load_config() {
        Ok(config) => config,
        Err(crate::Error::ConfigNotFound) => Config::default(),
        Err(e) => {
            warn(&format!("Ignoring unreadable config: {}", e));
            Config::default()
        }
    }
}

fn session_store(config: &Config) -> SessionStore {
    SessionStore::restore(
        Arc::new(HttpAuthenticator::new(&config.client.api_url)),
        Arc::new(FileStorage::new(&config.client.session_file)),
    )
}
