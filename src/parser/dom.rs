use scraper::{ElementRef, Html, Selector};

/// A rendered profile page: parsed markup plus the address it was loaded from.
pub struct Page {
    pub html: Html,
    pub url: String,
}

impl Page {
    pub fn parse(markup: &str, url: impl Into<String>) -> Self {
        Page {
            html: Html::parse_document(markup),
            url: url.into(),
        }
    }

    pub fn scope(&self) -> Scope<'_> {
        Scope::Document(&self.html)
    }
}

/// Where a selector lookup runs: the whole document or one element's subtree.
#[derive(Clone, Copy)]
pub enum Scope<'a> {
    Document(&'a Html),
    Element(ElementRef<'a>),
}

impl<'a> Scope<'a> {
    /// First match in document order (`querySelector`).
    pub fn first(self, selector: &Selector) -> Option<ElementRef<'a>> {
        match self {
            Scope::Document(html) => html.select(selector).next(),
            Scope::Element(el) => el.select(selector).next(),
        }
    }

    /// Every match in document order (`querySelectorAll`).
    pub fn all(self, selector: &Selector) -> Vec<ElementRef<'a>> {
        match self {
            Scope::Document(html) => html.select(selector).collect(),
            Scope::Element(el) => el.select(selector).collect(),
        }
    }
}

impl<'a> From<ElementRef<'a>> for Scope<'a> {
    fn from(el: ElementRef<'a>) -> Self {
        Scope::Element(el)
    }
}

/// Trimmed text content of an element and all its descendants.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

/// Nearest inclusive ancestor with the given tag name.
pub fn closest<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    std::iter::once(el)
        .chain(el.ancestors().filter_map(ElementRef::wrap))
        .find(|e| e.value().name().eq_ignore_ascii_case(tag))
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

// ── Tests ──
