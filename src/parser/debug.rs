use std::sync::LazyLock;

use scraper::Selector;
use serde::Serialize;
use tracing::debug;

use super::dom::{attr, text_of, Page, Scope};
use super::experience::{first_entry, locate_section};
use super::filters::{char_len, take_chars};

const MAX_ITEM_HTML: usize = 6000;
const MAX_ELEMENT_TEXT: usize = 300;
const MAX_SAMPLE_TEXT: usize = 150;
const MAX_CLASS_LEN: usize = 80;

static LINKS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static TEXT_ELEMENTS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span, div").unwrap());
static HEADLINE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        ".pv-text-details__left-panel .text-body-medium, \
         [data-section=\"headline\"] .text-body-medium, .text-body-medium.inline",
    )
    .unwrap()
});

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDebug {
    pub found_section: bool,
    pub found_first_item: bool,
    pub first_item_html: Option<String>,
    pub links_in_first_item: Vec<LinkInfo>,
    pub all_spans_with_text: Vec<ElementInfo>,
    pub headline_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkInfo {
    pub href: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ElementInfo {
    pub tag: String,
    pub class: String,
    pub text: String,
}

/// What the experience section looks like on this page, for selector maintenance.
pub fn debug_experience(page: &Page) -> ExperienceDebug {
    let section = locate_section(&page.html);
    let item = section.and_then(first_entry);

    let mut out = ExperienceDebug {
        found_section: section.is_some(),
        found_first_item: item.is_some(),
        first_item_html: item.map(|el| take_chars(&el.html(), MAX_ITEM_HTML)),
        links_in_first_item: Vec::new(),
        all_spans_with_text: Vec::new(),
        headline_text: page.scope().first(&HEADLINE).map(text_of).unwrap_or_default(),
    };

    if let Some(item) = item {
        let scope = Scope::from(item);
        out.links_in_first_item = scope
            .all(&LINKS)
            .into_iter()
            .map(|a| LinkInfo {
                href: attr(a, "href").unwrap_or_default().to_string(),
                text: text_of(a),
            })
            .collect();
        out.all_spans_with_text = scope
            .all(&TEXT_ELEMENTS)
            .into_iter()
            .filter_map(|el| {
                let text = text_of(el);
                let len = char_len(&text);
                (len > 0 && len < MAX_ELEMENT_TEXT).then(|| ElementInfo {
                    tag: el.value().name().to_uppercase(),
                    class: take_chars(attr(el, "class").unwrap_or_default(), MAX_CLASS_LEN),
                    text: take_chars(&text, MAX_SAMPLE_TEXT),
                })
            })
            .collect();
    }

    debug!(
        found_section = out.found_section,
        found_first_item = out.found_first_item,
        links = out.links_in_first_item.len(),
        "experience section debug"
    );
    out
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_entry_contents() {
        let page = Page::parse(
            r#"<div class="pv-text-details__left-panel"><div class="text-body-medium">CTO at Acme</div></div>
               <section><h2>Experience</h2><ul><li>
                 <a href="/company/acme/">Acme</a>
                 <span class="t-14 t-normal">Acme · Full-time</span>
                 <div>   </div>
               </li></ul></section>"#,
            "https://www.linkedin.com/in/x/",
        );
        let info = debug_experience(&page);
        assert!(info.found_section);
        assert!(info.found_first_item);
        assert_eq!(info.headline_text, "CTO at Acme");
        assert!(info.first_item_html.as_deref().unwrap().starts_with("<li>"));
        assert_eq!(info.links_in_first_item.len(), 1);
        assert_eq!(info.links_in_first_item[0].href, "/company/acme/");
        assert_eq!(info.all_spans_with_text.len(), 1);
        assert_eq!(info.all_spans_with_text[0].tag, "SPAN");
        assert_eq!(info.all_spans_with_text[0].class, "t-14 t-normal");
    }

    #[test]
    fn bounds_html_and_text() {
        let long = "x".repeat(7000);
        let markup = format!(
            r#"<section><h2>Experience</h2><ul><li><span>{}</span><span>{}</span></li></ul></section>"#,
            long,
            "y".repeat(200)
        );
        let info = debug_experience(&Page::parse(&markup, ""));
        assert_eq!(char_len(info.first_item_html.as_deref().unwrap()), MAX_ITEM_HTML);
        assert_eq!(info.all_spans_with_text.len(), 1);
        assert_eq!(info.all_spans_with_text[0].text.len(), MAX_SAMPLE_TEXT);
    }

    #[test]
    fn nothing_found() {
        let info = debug_experience(&Page::parse("<p>empty</p>", ""));
        assert!(!info.found_section);
        assert!(!info.found_first_item);
        assert!(info.first_item_html.is_none());
        assert!(info.links_in_first_item.is_empty());
        assert_eq!(info.headline_text, "");
    }

    #[test]
    fn serializes_camel_case() {
        let info = debug_experience(&Page::parse("<p>empty</p>", ""));
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["foundSection"], false);
        assert!(json["firstItemHtml"].is_null());
        assert!(json["allSpansWithText"].is_array());
    }
}
