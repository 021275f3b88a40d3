use scraper::{ElementRef, Selector};

use super::dom::{text_of, Scope};

/// One layout variant: where to look and what text to accept there.
pub struct Rule {
    pub selector: Selector,
    pub accept: fn(&str) -> bool,
}

/// Priority-ordered selector rules with first-success-wins semantics.
///
/// New layout variants are appended to the selector table; the lookup logic
/// never changes.
pub struct Chain {
    rules: Vec<Rule>,
}

impl Chain {
    pub fn new(selectors: &[&str], accept: fn(&str) -> bool) -> Self {
        let rules = selectors
            .iter()
            .map(|s| Rule {
                selector: Selector::parse(s).unwrap(),
                accept,
            })
            .collect();
        Chain { rules }
    }

    /// Element-only chain: the first selector with any match wins.
    pub fn elements(selectors: &[&str]) -> Self {
        Self::new(selectors, |_| true)
    }

    /// Examine the first match of each selector; return the first accepted text.
    pub fn first_text(&self, scope: Scope<'_>) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            let text = scope.first(&rule.selector).map(text_of)?;
            (rule.accept)(&text).then_some(text)
        })
    }

    /// Examine every match of each selector in order; return the first accepted text.
    pub fn scan_text(&self, scope: Scope<'_>) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            scope
                .all(&rule.selector)
                .into_iter()
                .map(text_of)
                .find(|text| (rule.accept)(text))
        })
    }

    pub fn first_element<'a>(&self, scope: Scope<'a>) -> Option<ElementRef<'a>> {
        self.rules.iter().find_map(|rule| scope.first(&rule.selector))
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dom::Page;
    use crate::parser::filters::is_label;

    #[test]
    fn earlier_brand_match_is_skipped() {
        let page = Page::parse(
            r#"<h1 class="brand">LinkedIn</h1><h2 class="name">Ada Lovelace</h2>"#,
            "",
        );
        let chain = Chain::new(&["h1.brand", "h2.name", "h1"], is_label);
        assert_eq!(chain.first_text(page.scope()).as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn first_text_only_looks_at_first_match() {
        let page = Page::parse(r#"<p>x</p><p>Valid text</p>"#, "");
        let chain = Chain::new(&["p"], is_label);
        assert_eq!(chain.first_text(page.scope()), None);
        assert_eq!(chain.scan_text(page.scope()).as_deref(), Some("Valid text"));
    }

    #[test]
    fn first_element_respects_rule_order() {
        let page = Page::parse(r#"<div class="b">b</div><div class="a">a</div>"#, "");
        let chain = Chain::elements(&[".a", ".b"]);
        let el = chain.first_element(page.scope()).unwrap();
        assert_eq!(text_of(el), "a");
    }

    #[test]
    fn no_match_yields_none() {
        let page = Page::parse("<p>nothing here</p>", "");
        let chain = Chain::new(&["h1", ".missing"], is_label);
        assert!(chain.first_text(page.scope()).is_none());
        assert_eq!(chain.rules.len(), 2);
    }
}
