//! Best-effort field extraction from parsed HTML.
//!
//! A [`FieldSpec`] is an ordered list of [`Rule`]s. Rules are tried in order
//! and the first one that yields a non-empty string wins; if none do, the
//! field is the empty string. Extraction never fails.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// How a value is read out of a matched element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractMode {
    /// Text of the first descendant matching the given link selector
    LinkText(String),
    /// Text following the first separator in the element's space-joined text;
    /// the whole text when the separator is absent
    AfterSeparator(char),
    /// Value of an attribute on the matched element
    Attribute(String),
    /// Trimmed text nodes, concatenated
    Text,
}

/// One selector plus the way to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    /// Only consider matches whose text contains this label
    pub label: Option<String>,
    pub mode: ExtractMode,
}

impl Rule {
    pub fn new(selector: impl Into<String>, mode: ExtractMode) -> Self {
        Self {
            selector: selector.into(),
            label: None,
            mode,
        }
    }

    pub fn text(selector: impl Into<String>) -> Self {
        Self::new(selector, ExtractMode::Text)
    }

    pub fn link_text(selector: impl Into<String>, link: impl Into<String>) -> Self {
        Self::new(selector, ExtractMode::LinkText(link.into()))
    }

    pub fn after(selector: impl Into<String>, separator: char) -> Self {
        Self::new(selector, ExtractMode::AfterSeparator(separator))
    }

    pub fn attribute(selector: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(selector, ExtractMode::Attribute(name.into()))
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Named fallback chain for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Extract a field from a whole document.
pub fn extract(doc: &Html, spec: &FieldSpec) -> String {
    extract_within(doc.root_element(), spec)
}

/// Extract a field from the descendants of `scope`.
pub fn extract_within(scope: ElementRef<'_>, spec: &FieldSpec) -> String {
    spec.rules
        .iter()
        .find_map(|rule| apply(scope, spec.name, rule))
        .unwrap_or_default()
}

fn apply(scope: ElementRef<'_>, field: &str, rule: &Rule) -> Option<String> {
    let selector = parse_selector(field, &rule.selector)?;

    let element = scope.select(&selector).find(|el| match &rule.label {
        Some(label) => el.text().collect::<String>().contains(label.as_str()),
        None => true,
    })?;

    let value = match &rule.mode {
        ExtractMode::Text => stripped_text(element, ""),
        ExtractMode::AfterSeparator(sep) => after_separator(&stripped_text(element, " "), *sep),
        ExtractMode::Attribute(name) => element
            .value()
            .attr(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default(),
        ExtractMode::LinkText(link) => {
            let link_selector = parse_selector(field, link)?;
            element
                .select(&link_selector)
                .next()
                .map(|a| stripped_text(a, ""))
                .unwrap_or_default()
        }
    };

    Some(value).filter(|v| !v.is_empty())
}

fn parse_selector(field: &str, selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!(field, selector, error = ?e, "Skipping rule with invalid selector");
            None
        }
    }
}

/// Trimmed, non-empty text nodes of `element` joined by `separator`.
pub fn stripped_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Everything after the first `separator`, trimmed. Whole text if absent.
pub fn after_separator(text: &str, separator: char) -> String {
    match text.find(separator) {
        Some(pos) => text[pos + separator.len_utf8()..].trim().to_string(),
        None => text.trim().to_string(),
    }
}
