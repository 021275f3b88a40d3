use std::fmt;

use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

use crate::parser::{extract, ExperienceDebug, Page, ProfileRecord};
use crate::settings::Settings;
use crate::submit::{SheetPayload, Submitter};

const PROFILE_PATH_MARKER: &str = "linkedin.com/in/";
const DEBUG_SAMPLE_ELEMENTS: usize = 25;
const DEBUG_HTML_PREVIEW: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

/// User-facing outcome line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Status {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Status {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Status {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            StatusKind::Success => "ok",
            StatusKind::Error => "error",
            StatusKind::Info => "info",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

pub fn is_profile_url(url: &str) -> bool {
    url.contains(PROFILE_PATH_MARKER)
}

/// Error status for the debug view when the page is not a profile.
pub fn require_profile_page(page: &Page) -> Option<Status> {
    (!is_profile_url(&page.url)).then(|| Status::error("Open a LinkedIn profile page first."))
}

/// Outcome of a save attempt plus the record that was (or would have been) sent.
pub struct SaveOutcome {
    pub status: Status,
    pub record: Option<ProfileRecord>,
}

/// Extract then submit. Failures come back as an error status, never as `Err`.
pub async fn save_profile(page: &Page, settings: &Settings, submitter: &Submitter) -> SaveOutcome {
    save_profile_on(page, settings, submitter, Local::now().date_naive()).await
}

pub async fn save_profile_on(
    page: &Page,
    settings: &Settings,
    submitter: &Submitter,
    today: NaiveDate,
) -> SaveOutcome {
    let Some(endpoint) = settings.endpoint() else {
        return SaveOutcome {
            status: Status::error(
                "Set your spreadsheet web app URL first (profile-logger options --endpoint <url>).",
            ),
            record: None,
        };
    };

    if !is_profile_url(&page.url) {
        warn!(url = %page.url, "not a profile page");
        return SaveOutcome {
            status: Status::error("Open a LinkedIn profile page (linkedin.com/in/...) and try again."),
            record: None,
        };
    }

    let record = extract(page);
    if record.name.is_empty() {
        return SaveOutcome {
            status: Status::error(
                "Could not find a name on this page. Make sure you're on a profile page.",
            ),
            record: Some(record),
        };
    }

    let payload = SheetPayload::new(record.clone(), &page.url, today);
    let status = match submitter.send(endpoint, &payload).await {
        Ok(()) => {
            info!(name = %record.name, "profile saved");
            Status::success(format!("Saved to sheet: {}", record.name))
        }
        Err(e) => {
            error!("submit failed: {}", e);
            Status::error(format!("Error: {}", e))
        }
    };
    SaveOutcome {
        status,
        record: Some(record),
    }
}

/// "Will save:" summary of the non-empty fields.
pub fn preview(record: &ProfileRecord) -> Option<String> {
    if record.name.is_empty() && record.profile_url.is_empty() {
        return None;
    }
    let mut parts = vec!["Will save:".to_string()];
    let fields = [
        ("Name", &record.name),
        ("Job", &record.job_title),
        ("Company", &record.company),
        ("Location", &record.location),
        ("Profile", &record.profile_url),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            parts.push(format!("{}: {}", label, value));
        }
    }
    Some(parts.join("\n"))
}

pub fn debug_report(info: &ExperienceDebug) -> String {
    let mut text = format!(
        "Section found: {}\nFirst item found: {}\n\nHeadline: {}\n\n--- Links in first experience ---\n",
        info.found_section,
        info.found_first_item,
        if info.headline_text.is_empty() {
            "(none)"
        } else {
            info.headline_text.as_str()
        }
    );
    for link in &info.links_in_first_item {
        text.push_str(&format!("{} => \"{}\"\n", link.href, link.text));
    }
    text.push_str("\n--- Sample of elements (tag, class, text) ---\n");
    for el in info.all_spans_with_text.iter().take(DEBUG_SAMPLE_ELEMENTS) {
        text.push_str(&format!("{} .{} => \"{}\"\n", el.tag, el.class, el.text));
    }
    if let Some(html) = &info.first_item_html {
        text.push_str(&format!(
            "\n--- First item HTML (first {} chars) ---\n",
            DEBUG_HTML_PREVIEW
        ));
        text.extend(html.chars().take(DEBUG_HTML_PREVIEW));
    }
    text
}

// ── Tests ──
