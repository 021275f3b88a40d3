use anyhow::Result;
use config::{Config, Environment};
use rusqlite::Connection;
use serde::Deserialize;
use tracing::info;

use crate::controller::Status;
use crate::db;

pub const ENDPOINT_KEY: &str = "endpoint_url";
const ENV_PREFIX: &str = "PROFILE_LOGGER";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub endpoint_url: String,
}

impl Settings {
    /// Stored value, overridden by `PROFILE_LOGGER_ENDPOINT_URL` when set.
    pub fn load(conn: &Connection) -> Result<Self> {
        let stored = db::get_setting(conn, ENDPOINT_KEY)?.unwrap_or_default();
        let settings = Config::builder()
            .set_default(ENDPOINT_KEY, stored)?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }

    pub fn endpoint(&self) -> Option<&str> {
        let url = self.endpoint_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

pub fn save_endpoint(conn: &Connection, raw: &str) -> Result<Status> {
    let url = raw.trim();
    if url.is_empty() {
        return Ok(Status::error("Please enter a web app URL."));
    }
    db::set_setting(conn, ENDPOINT_KEY, url)?;
    info!(endpoint = url, "endpoint saved");
    Ok(Status::success("URL saved."))
}

// ── Tests ──
