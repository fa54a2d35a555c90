//! Configuration loader
//!
//! Loads service configuration from environment variables. Every variable has
//! a default suitable for local development, so a bare `cargo run` works.
//!
//! ## Environment Variables
//! - `FITSPACE_DB_PATH`: Database file path (default `fitspace.db`)
//! - `FITSPACE_DB_POOL_SIZE`: Connection pool size (default 8)
//! - `FITSPACE_BIND_ADDR`: HTTP listen address (default `127.0.0.1:8080`)
//! - `FITSPACE_CORS_ORIGINS`: Comma-separated allowed origins
//!   (default `http://localhost:5177`)

use std::net::SocketAddr;

use fitspace_domain::{AvatarError, Result};

const DEFAULT_DB_PATH: &str = "fitspace.db";
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5177,http://127.0.0.1:5177";

/// Service configuration resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: String,
    pub db_pool_size: u32,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Resolve the configuration from process environment variables.
    ///
    /// # Errors
    /// Returns `AvatarError::Config` when a variable is present but does not
    /// parse (pool size, bind address).
    pub fn from_env() -> Result<Self> {
        let db_path =
            std::env::var("FITSPACE_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_owned());
        let db_pool_size = parse_pool_size(std::env::var("FITSPACE_DB_POOL_SIZE").ok())?;
        let bind_addr = parse_bind_addr(std::env::var("FITSPACE_BIND_ADDR").ok())?;
        let cors_origins = parse_origins(std::env::var("FITSPACE_CORS_ORIGINS").ok());

        Ok(Self { db_path, db_pool_size, bind_addr, cors_origins })
    }
}

fn parse_pool_size(raw: Option<String>) -> Result<u32> {
    match raw {
        None => Ok(DEFAULT_POOL_SIZE),
        Some(value) => value
            .trim()
            .parse::<u32>()
            .map_err(|e| AvatarError::Config(format!("Invalid pool size '{value}': {e}"))),
    }
}

fn parse_bind_addr(raw: Option<String>) -> Result<SocketAddr> {
    let value = raw.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    value
        .trim()
        .parse::<SocketAddr>()
        .map_err(|e| AvatarError::Config(format!("Invalid bind address '{value}': {e}")))
}

fn parse_origins(raw: Option<String>) -> Vec<String> {
    let value = raw.unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_owned());
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect()
}
