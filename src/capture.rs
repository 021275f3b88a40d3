use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::parser::Page;

/// JSON wrapper written by browser capture hosts.
#[derive(Deserialize)]
struct Wrapped {
    html: String,
    url: Option<String>,
}

/// Load a saved page. Address precedence: `url_override`, wrapper url, file path.
pub fn load(path: &Path, url_override: Option<&str>) -> Result<Page> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture {:?}", path))?;

    let (markup, wrapped_url) = match serde_json::from_str::<Wrapped>(&raw) {
        Ok(w) => (w.html, w.url),
        Err(_) => (raw, None),
    };

    let url = match url_override.map(str::to_string).or(wrapped_url) {
        Some(u) => u,
        None => file_url(path)?,
    };
    debug!(?path, %url, bytes = markup.len(), "loaded capture");
    Ok(Page::parse(&markup, url))
}

fn file_url(path: &Path) -> Result<String> {
    let abs = std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {:?}", path))?;
    Ok(format!("file://{}", abs.display()))
}

// ── Tests ──
