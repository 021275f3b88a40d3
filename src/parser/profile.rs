use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::chain::Chain;
use super::dom::{Page, Scope};
use super::experience::{
    company_from_secondary_spans, entry_title, first_entry, locate_section, COMPANY_FALLBACKS,
};
use super::filters::{clean_company_text, is_label, split_headline};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub name: String,
    pub profile_url: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
}

static NAME_CHAIN: LazyLock<Chain> = LazyLock::new(|| {
    Chain::new(
        &[
            "h1.text-heading-xlarge",
            "h1.inline.t-24",
            r#"[data-section="headline"] h1"#,
            ".pv-top-card--list li:first-child",
            ".pv-text-details__left-panel h1",
            "h1",
        ],
        is_label,
    )
});

static HEADLINE_CHAIN: LazyLock<Chain> = LazyLock::new(|| {
    Chain::new(
        &[
            ".pv-text-details__left-panel .text-body-medium",
            r#"[data-section="headline"] .text-body-medium"#,
            ".pv-top-card--list-bullet .text-body-medium",
            ".pv-top-card-section__headline",
            ".text-body-medium.inline",
            "div.ph5 .text-body-medium",
        ],
        is_label,
    )
});

static LOCATION_CHAIN: LazyLock<Chain> = LazyLock::new(|| {
    Chain::new(
        &[
            ".pv-text-details__left-panel .text-body-small",
            r#"[data-section="location"] .text-body-small"#,
            ".pv-top-card--list-bullet .text-body-small",
            ".pv-top-card-section__location",
            "span.text-body-small.inline.t-black--light",
        ],
        is_label,
    )
});

/// Best-effort profile fields. Every miss leaves its field empty.
pub fn extract(page: &Page) -> ProfileRecord {
    let scope = page.scope();
    let mut record = ProfileRecord {
        profile_url: page.url.clone(),
        ..Default::default()
    };

    if let Some(name) = NAME_CHAIN.first_text(scope) {
        record.name = name;
    }

    // Headline under the name is often "Title at Company"
    if let Some(headline) = headline_text(scope) {
        let (title, company) = split_headline(&headline);
        record.job_title = title;
        if let Some(raw) = company {
            record.company = clean_company_text(raw);
        }
    }

    // Most recent experience entry fills or overrides the headline values
    if let Some(entry) = locate_section(&page.html).and_then(first_entry) {
        if let Some(title) = entry_title(entry) {
            record.job_title = title;
        }
        if let Some(company) = company_from_secondary_spans(entry) {
            record.company = company;
        }
        if record.company.is_empty() {
            if let Some(company) = COMPANY_FALLBACKS.iter().find_map(|strategy| strategy(entry)) {
                record.company = company;
            }
        }
    }

    if let Some(location) = LOCATION_CHAIN.first_text(scope) {
        record.location = location;
    }

    record
}

pub fn headline_text(scope: Scope<'_>) -> Option<String> {
    HEADLINE_CHAIN.first_text(scope)
}

// ── Tests ──
