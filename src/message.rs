use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::parser::{debug_experience, extract, ExperienceDebug, Page, ProfileRecord};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Envelope")]
pub enum Request {
    GetProfileData,
    DebugExperience,
    Unknown,
}

// A message without an `action` is treated like an unknown one.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    action: Option<String>,
}

impl From<Envelope> for Request {
    fn from(e: Envelope) -> Self {
        match e.action.as_deref() {
            Some("getProfileData") => Request::GetProfileData,
            Some("debugExperience") => Request::DebugExperience,
            _ => Request::Unknown,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Profile(ProfileRecord),
    Debug(ExperienceDebug),
}

/// Answer one request against the page. Unknown actions get no reply.
pub fn handle(page: &Page, request: &Request) -> Option<Response> {
    match request {
        Request::GetProfileData => Some(Response::Profile(extract(page))),
        Request::DebugExperience => Some(Response::Debug(debug_experience(page))),
        Request::Unknown => {
            warn!("ignoring message with unknown action");
            None
        }
    }
}

// ── Tests ──
