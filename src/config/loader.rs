//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "portal.toml";

/// Load configuration from portal.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> String {
    format!(
        r#"# Portal Configuration

[server]
host = "0.0.0.0"
port = 4780

[auth]
jwt_secret = "${{PORTAL_JWT_SECRET:-{secret}}}"
token_ttl_secs = 86400
bcrypt_cost = 12

# Uncomment to keep users in PostgreSQL instead of this file
# [database]
# host = "localhost"
# port = 5432
# user = "postgres"
# password = "${{PORTAL_DB_PASSWORD}}"
# dbname = "portal"

[client]
api_url = "http://127.0.0.1:4780"
session_file = "./.portal-session.json"

[routes]
login = "/login"
home = "/home"
admin = "/admin"
guard = "/vigilante"
maintenance = "/mantenimiento"

# Additional page guards, matched by longest path prefix
# [[pages]]
# path = "/reportes"
# require_auth = true
# require_role = "administrador"

# Users for the in-memory repository (used when [database] is absent)
# Generate hashes with: portal hash-password <password>
# [[users]]
# email = "admin@example.com"
# password_hash = "$2b$12$..."
# first_name = "Ana"
# last_name = "Pérez"
# house_number = "A-101"
# role = "administrador"
"#,
        secret = uuid::Uuid::new_v4().simple()
    )
}
