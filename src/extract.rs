//! Selector-and-fallback field extraction.
//!
//! Every field the parsers read goes through [`extract`]: a selector that
//! matches nothing, a selector that does not parse, or a value function that
//! gives up all resolve to the caller's default instead of an error.

use scraper::{ElementRef, Html, Selector};

/// A place selectors can be run against: a whole document or one element.
pub trait Query<'a>: Copy {
    fn query_all(self, selector: &str) -> Vec<ElementRef<'a>>;

    fn query_one(self, selector: &str) -> Option<ElementRef<'a>> {
        self.query_all(selector).into_iter().next()
    }
}

impl<'a> Query<'a> for &'a Html {
    fn query_all(self, selector: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(selector) {
            Ok(sel) => self.select(&sel).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn query_one(self, selector: &str) -> Option<ElementRef<'a>> {
        let sel = Selector::parse(selector).ok()?;
        self.select(&sel).next()
    }
}

impl<'a> Query<'a> for ElementRef<'a> {
    fn query_all(self, selector: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(selector) {
            Ok(sel) => self.select(&sel).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn query_one(self, selector: &str) -> Option<ElementRef<'a>> {
        let sel = Selector::parse(selector).ok()?;
        self.select(&sel).next()
    }
}

/// First match of `selector` in `scope`, mapped through `f`, or `default`.
pub fn extract<'a, Q, T, F>(scope: Q, selector: &str, f: F, default: T) -> T
where
    Q: Query<'a>,
    F: FnOnce(ElementRef<'a>) -> Option<T>,
{
    scope.query_one(selector).and_then(f).unwrap_or(default)
}

/// Text of the first match, or `default` when missing or blank.
pub fn text_or<'a, Q: Query<'a>>(scope: Q, selector: &str, default: &str) -> String {
    extract(scope, selector, node_text, default.to_string())
}

/// Text of the first match, `None` when missing or blank.
pub fn text<'a, Q: Query<'a>>(scope: Q, selector: &str) -> Option<String> {
    extract(scope, selector, |el| node_text(el).map(Some), None)
}

/// Trimmed attribute value of the first match.
pub fn attr<'a, Q: Query<'a>>(scope: Q, selector: &str, name: &str) -> Option<String> {
    extract(
        scope,
        selector,
        |el| {
            el.value()
                .attr(name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| Some(v.to_string()))
        },
        None,
    )
}

/// Non-blank texts of every match, in document order.
pub fn all_texts<'a, Q: Query<'a>>(scope: Q, selector: &str) -> Vec<String> {
    scope
        .query_all(selector)
        .into_iter()
        .filter_map(node_text)
        .collect()
}

/// Text pieces of `el`, each trimmed, joined without separator.
pub fn node_text(el: ElementRef<'_>) -> Option<String> {
    let text: String = el.text().map(str::trim).collect();
    if text.is_empty() { None } else { Some(text) }
}
