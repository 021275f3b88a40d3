use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::parser::ProfileRecord;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no endpoint URL configured")]
    MissingEndpoint,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Body posted to the sheet endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPayload {
    pub name: String,
    pub profile_url: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub date: String,
}

impl SheetPayload {
    /// `page_url` stands in when the record carries no profile address.
    pub fn new(record: ProfileRecord, page_url: &str, today: NaiveDate) -> Self {
        let profile_url = if record.profile_url.is_empty() {
            page_url.to_string()
        } else {
            record.profile_url
        };
        SheetPayload {
            name: record.name,
            profile_url,
            job_title: record.job_title,
            company: record.company,
            location: record.location,
            date: sheet_date(today),
        }
    }
}

/// Short US-style date, e.g. "Jan 5, 2024".
pub fn sheet_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub struct Submitter {
    client: reqwest::Client,
}

impl Submitter {
    pub fn new() -> Self {
        Submitter {
            client: reqwest::Client::new(),
        }
    }

    /// Fire-and-forget POST. The endpoint's reply is opaque: anything short of
    /// a transport error counts as delivered.
    pub async fn send(&self, endpoint: &str, payload: &SheetPayload) -> Result<(), SubmitError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(SubmitError::MissingEndpoint);
        }
        info!(endpoint, name = %payload.name, "submitting profile");
        let response = self.client.post(endpoint).json(payload).send().await?;
        debug!(status = %response.status(), "endpoint responded");
        Ok(())
    }
}

impl Default for Submitter {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──
