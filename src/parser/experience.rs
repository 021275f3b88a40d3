use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::chain::Chain;
use super::dom::{closest, parent_element, text_of, Scope};
use super::filters::{clean_company_text, is_company_candidate, is_entry_label};

/// How far above the heading the section root may sit.
const ANCESTOR_STEPS: usize = 5;

const SECTION_HEADING: &str = "Experience";

static HEADING_CANDIDATES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"h2, h3, span, div[class*="section-header"]"#).unwrap());
static SECTION_CONTENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"ul li, [class*="list"] > div, [class*="experience"]"#).unwrap()
});
static COMPANY_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href*="/company/"]"#).unwrap());

static SECTION_CHAIN: LazyLock<Chain> = LazyLock::new(|| {
    Chain::elements(&[
        "#experience",
        r#"[data-section="experience"]"#,
        r#"section[aria-label="Experience"]"#,
        r#"[id*="experience"]"#,
        ".pv-profile-section.experience-section",
        "section.experience",
    ])
});

static ENTRY_CHAIN: LazyLock<Chain> = LazyLock::new(|| {
    Chain::elements(&[
        ".pv-entity__summary-info, .pv-entity__summary-info-v2, .pv-profile-section__list-item, \
         li.pv-entity, .experience-item, .scaffold-layout__list-item",
        "ul.pv-profile-section__list > li",
        "ul li",
        r#"[class*="list"] > div"#,
    ])
});

static TITLE_CHAIN: LazyLock<Chain> = LazyLock::new(|| {
    Chain::new(
        &[
            r#".hoverable-link-text span[aria-hidden="true"]"#,
            r#".t-bold span[aria-hidden="true"]"#,
            ".pv-entity__summary-title a",
            ".pv-entity__summary-title",
            "h3.t-16 a",
            "h3.t-16",
            r#"h3[aria-hidden="true"]"#,
            ".t-16.t-bold",
            r#"span[aria-hidden="true"]"#,
            ".experience-item__title",
            "h3",
            r#"[class*="title"] a"#,
            r#"a[href*="/title/"]"#,
        ],
        is_entry_label,
    )
});

// Current layout: company name sits in a small secondary span under the title.
static SECONDARY_SPAN_CHAIN: LazyLock<Chain> = LazyLock::new(|| {
    Chain::new(
        &[r#"span.t-14.t-normal span[aria-hidden="true"], span.t-14.t-normal"#],
        is_company_candidate,
    )
});

static LEGACY_SUBTITLE_CHAIN: LazyLock<Chain> = LazyLock::new(|| {
    Chain::new(
        &[
            ".pv-entity__summary-subtitle a",
            ".pv-entity__summary-subtitle",
            ".pv-entity__secondary-title a",
            ".pv-entity__secondary-title",
            ".pv-entity__company-summary-info h3",
            ".experience-item__subtitle",
        ],
        is_company_candidate,
    )
});

/// Locate the section whose heading reads "Experience", else a known section selector.
pub fn locate_section(html: &Html) -> Option<ElementRef<'_>> {
    find_section_by_heading(html, SECTION_HEADING)
        .or_else(|| SECTION_CHAIN.first_element(Scope::Document(html)))
}

/// Bounded upward walk from the first heading-like element reading `heading`.
pub fn find_section_by_heading<'a>(html: &'a Html, heading: &str) -> Option<ElementRef<'a>> {
    let wanted = heading.to_lowercase();
    let label = html
        .select(&HEADING_CANDIDATES)
        .find(|el| text_of(*el).to_lowercase() == wanted)?;

    let start = closest(label, "section").or_else(|| parent_element(label))?;
    let mut current = Some(start);
    for _ in 0..ANCESTOR_STEPS {
        let Some(node) = current else { break };
        if node.select(&SECTION_CONTENT).next().is_some() {
            return Some(node);
        }
        current = parent_element(node);
    }
    Some(start)
}

pub fn first_entry(section: ElementRef<'_>) -> Option<ElementRef<'_>> {
    ENTRY_CHAIN.first_element(section.into())
}

pub fn entry_title(entry: ElementRef<'_>) -> Option<String> {
    TITLE_CHAIN.first_text(entry.into())
}

/// Strategy (a): small secondary spans inside the entry.
pub fn company_from_secondary_spans(entry: ElementRef<'_>) -> Option<String> {
    SECONDARY_SPAN_CHAIN
        .scan_text(entry.into())
        .map(|t| clean_company_text(&t))
}

/// Strategy (b): the entry's link into a company page.
pub fn company_from_link(entry: ElementRef<'_>) -> Option<String> {
    let text = Scope::from(entry).first(&COMPANY_LINK).map(text_of)?;
    is_company_candidate(&text).then(|| clean_company_text(&text))
}

/// Strategy (c): subtitles from older profile layouts.
pub fn company_from_legacy_subtitle(entry: ElementRef<'_>) -> Option<String> {
    LEGACY_SUBTITLE_CHAIN
        .first_text(entry.into())
        .map(|t| clean_company_text(&t))
}

/// Fallbacks tried in order once the secondary spans came up empty.
pub const COMPANY_FALLBACKS: &[for<'a> fn(ElementRef<'a>) -> Option<String>] =
    &[company_from_link, company_from_legacy_subtitle];

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_of(markup: &str) -> Html {
        Html::parse_document(markup)
    }

    fn only_entry(html: &Html) -> ElementRef<'_> {
        let section = locate_section(html).expect("section");
        first_entry(section).expect("entry")
    }

    #[test]
    fn heading_walk_stops_at_list_ancestor() {
        let html = Html::parse_document(
            r#"<main id="main">
                 <div id="card">
                   <div class="header"><h2><span>Experience</span></h2></div>
                   <ul><li id="job1">Engineer</li></ul>
                 </div>
               </main>"#,
        );
        let section = find_section_by_heading(&html, "Experience").unwrap();
        assert_eq!(section.value().attr("id"), Some("card"));
    }

    #[test]
    fn heading_inside_section_uses_section() {
        let html = Html::parse_document(
            r#"<section id="exp"><h2>Experience</h2><ul><li>Job</li></ul></section>"#,
        );
        let section = find_section_by_heading(&html, "experience").unwrap();
        assert_eq!(section.value().attr("id"), Some("exp"));
    }

    #[test]
    fn walk_reaches_fifth_level() {
        let html = Html::parse_document(
            r#"<div id="a"><div id="b"><div id="c"><ul><li>Job</li></ul>
                 <div id="d"><div id="e"><div id="f"><p><span>Experience</span></p></div></div></div>
               </div></div></div>"#,
        );
        let section = find_section_by_heading(&html, "Experience").unwrap();
        assert_eq!(section.value().attr("id"), Some("c"));
    }

    #[test]
    fn walk_stops_before_sixth_level() {
        let html = Html::parse_document(
            r#"<div id="a"><div id="b"><ul><li>Job</li></ul>
                 <div id="c"><div id="d"><div id="e"><div id="f"><p><span>Experience</span></p></div></div></div></div>
               </div></div>"#,
        );
        let section = find_section_by_heading(&html, "Experience").unwrap();
        assert_eq!(section.value().name(), "p");
    }

    #[test]
    fn selector_fallback_when_no_heading() {
        let html = Html::parse_document(
            r#"<div id="experience-anchor"></div><section data-section="experience"><ul><li>x</li></ul></section>"#,
        );
        let section = locate_section(&html).unwrap();
        assert_eq!(section.value().attr("data-section"), Some("experience"));
    }

    #[test]
    fn missing_section_is_none() {
        let html = Html::parse_document("<div><h2>Education</h2></div>");
        assert!(locate_section(&html).is_none());
    }

    #[test]
    fn entry_prefers_known_item_classes() {
        let html = entry_of(
            r#"<section id="experience"><h2>Experience</h2>
                 <ul><li class="noise">first li</li></ul>
                 <div class="experience-item">item</div>
               </section>"#,
        );
        let entry = only_entry(&html);
        assert_eq!(text_of(entry), "item");
    }

    #[test]
    fn secondary_span_skips_durations() {
        let html = entry_of(
            r#"<section><h2>Experience</h2><ul><li>
                 <div class="t-bold"><span aria-hidden="true">Staff Engineer</span></div>
                 <span class="t-14 t-normal"><span aria-hidden="true">Jan 2020 - Present · 4 yrs 2 mos</span></span>
                 <span class="t-14 t-normal"><span aria-hidden="true">HackerRank · Full-time</span></span>
               </li></ul></section>"#,
        );
        let entry = only_entry(&html);
        assert_eq!(entry_title(entry).as_deref(), Some("Staff Engineer"));
        assert_eq!(company_from_secondary_spans(entry).as_deref(), Some("HackerRank"));
    }

    #[test]
    fn duration_only_rejected_by_every_strategy() {
        let html = entry_of(
            r#"<section><h2>Experience</h2><ul><li>
                 <span class="t-14 t-normal">Jan 2020 - Present · 4 yrs 2 mos</span>
                 <a href="/company/123/">Jan 2020 - Present · 4 yrs 2 mos</a>
                 <div class="pv-entity__secondary-title">Jan 2020 - Present · 4 yrs 2 mos</div>
               </li></ul></section>"#,
        );
        let entry = only_entry(&html);
        assert!(company_from_secondary_spans(entry).is_none());
        assert!(COMPANY_FALLBACKS.iter().all(|strategy| strategy(entry).is_none()));
    }

    #[test]
    fn company_link_strategy() {
        let html = entry_of(
            r#"<section><h2>Experience</h2><ul><li>
                 <a href="https://www.linkedin.com/company/acme/">Acme Corp · Contract</a>
               </li></ul></section>"#,
        );
        let entry = only_entry(&html);
        assert_eq!(company_from_link(entry).as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn legacy_subtitle_strategy() {
        let html = entry_of(
            r#"<section><h2>Experience</h2><ul><li class="pv-entity">
                 <h3 class="pv-entity__summary-title">Analyst</h3>
                 <p class="pv-entity__secondary-title">Initech</p>
               </li></ul></section>"#,
        );
        let entry = only_entry(&html);
        assert_eq!(entry_title(entry).as_deref(), Some("Analyst"));
        assert_eq!(company_from_legacy_subtitle(entry).as_deref(), Some("Initech"));
    }
}
