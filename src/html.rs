//! Page scraping helpers: regex search and OpenGraph lookup.

use regex::Regex;
use scraper::{Html, Selector};

/// Search `html` with `pattern` and return `group` of the first match.
///
/// The match is entity-decoded and trimmed. Returns `None` when there is
/// no match or the group is empty.
#[must_use]
pub fn search_regex(pattern: &Regex, html: &str, group: &str) -> Option<String> {
    let caps = pattern.captures(html)?;
    let value = unescape_html(caps.name(group)?.as_str());
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Look up `og:<prop>` in `<meta property=..>` or `<meta name=..>` tags.
#[must_use]
pub fn og_search_property(prop: &str, html: &str) -> Option<String> {
    let key = format!("og:{prop}");
    let selector =
        Selector::parse(&format!(r#"meta[property="{key}"], meta[name="{key}"]"#)).ok()?;

    let document = Html::parse_document(html);
    let found = document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string);
    found
}

#[must_use]
pub fn og_search_title(html: &str) -> Option<String> {
    og_search_property("title", html)
}

#[must_use]
pub fn og_search_description(html: &str) -> Option<String> {
    og_search_property("description", html)
}

#[must_use]
pub fn og_search_thumbnail(html: &str) -> Option<String> {
    og_search_property("image", html)
}

/// Decode HTML character references (`&amp;`, `&#39;`, ...).
///
/// `<` is escaped before parsing so tag-like text survives as text.
#[must_use]
pub fn unescape_html(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    Html::parse_fragment(&s.replace('<', "&lt;"))
        .root_element()
        .text()
        .collect()
}
