//! Portal - residential community portal
//!
//! Sessions, role-based page access and the authentication service behind
//! them. The `access` rules take an explicit `Session` snapshot so they can be
//! driven by a browser client, the CLI or the API alike.

pub mod access;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use session::{Session, SessionStore};
