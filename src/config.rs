//! Process configuration, read from the environment (and `.env`, via `dotenv`).

use anyhow::{format_err, Context, Result};
use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_SECRET_KEY: &str = "dev";
const DEFAULT_STATIC_DIR: &str = "static";
const DATABASE_FILE: &str = "data.db";

#[derive(Debug, Clone)]
pub struct Config {
    /// sea-orm connection URI of the database file
    pub database_url: String,
    pub addr: SocketAddr,
    /// Key used to sign flash cookies
    pub secret_key: String,
    pub static_dir: PathBuf,
    pub debug: bool,
}

impl Config {
    /// Build the configuration from `DATABASE_URL`, `ADDR`, `SECRET_KEY`, `STATIC_DIR` and `DEBUG`.
    pub fn from_env() -> Result<Config> {
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => sqlite_url(&env::current_dir()?.join(DATABASE_FILE)),
        };
        let addr = env::var("ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_owned())
            .parse()
            .context("ADDR is not a valid socket address")?;
        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_owned());
        let static_dir = env::var("STATIC_DIR")
            .unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_owned())
            .into();
        let debug = match env::var("DEBUG") {
            Ok(value) => parse_flag(&value)?,
            Err(_) => false,
        };

        Ok(Config {
            database_url,
            addr,
            secret_key,
            static_dir,
            debug,
        })
    }

    /// The default log filter, used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "reading_list=debug,tower_http=debug"
        } else {
            "reading_list=info,tower_http=info"
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: sqlite_url(&PathBuf::from(DATABASE_FILE)),
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            secret_key: DEFAULT_SECRET_KEY.to_owned(),
            static_dir: DEFAULT_STATIC_DIR.into(),
            debug: false,
        }
    }
}

/// Connection URI for a SQLite file, created on first use.
pub fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(format_err!("DEBUG must be a boolean, got {:?}", other)),
    }
}
