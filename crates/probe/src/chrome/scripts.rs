//! Page-side scripts evaluated through `Runtime.evaluate`.
//!
//! Every lookup script answers `{ found, value }` so a missing element is
//! distinguishable from a `null` value.

use crate::error::ProbeError;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Result shape shared by all lookup scripts.
#[derive(Debug, Deserialize)]
pub struct Lookup<T> {
    pub found: bool,
    pub value: Option<T>,
}

impl<T> Lookup<T> {
    /// The looked-up value, or [`ProbeError::SelectorNotFound`].
    pub fn into_found(self, selector: &str) -> Result<Option<T>, ProbeError> {
        if self.found {
            Ok(self.value)
        } else {
            Err(ProbeError::SelectorNotFound(selector.to_owned()))
        }
    }
}

/// Quote `raw` as a JavaScript string literal.
fn literal(raw: &str) -> String {
    JsonValue::String(raw.to_owned()).to_string()
}

/// Mirrors what the test runner calls visible: displayed, not hidden, not
/// fully transparent, and taking up space.
const IS_VISIBLE: &str = r"
    const isVisible = (el) => {
        const style = window.getComputedStyle(el);
        if (style.display === 'none' || style.visibility === 'hidden' || style.visibility === 'collapse') {
            return false;
        }
        if (Number(style.opacity) === 0) {
            return false;
        }
        const rect = el.getBoundingClientRect();
        return rect.width > 0 && rect.height > 0;
    };";

/// Wrap `body` so that `el` is the element matching `selector`.
fn with_element(selector: &str, body: &str) -> String {
    format!(
        r"(() => {{
    {IS_VISIBLE}
    const el = document.querySelector({selector});
    if (!el) {{ return {{ found: false }}; }}
    {body}
}})()",
        selector = literal(selector),
    )
}

pub fn exists(selector: &str) -> String {
    with_element(selector, "return { found: true, value: true };")
}

pub fn bounding_rect(selector: &str) -> String {
    with_element(
        selector,
        r"const rect = el.getBoundingClientRect();
    return { found: true, value: { top: rect.top, left: rect.left, width: rect.width, height: rect.height } };",
    )
}

pub fn computed_style(selector: &str, property: &str) -> String {
    with_element(
        selector,
        &format!(
            "return {{ found: true, value: window.getComputedStyle(el).getPropertyValue({}) }};",
            literal(property)
        ),
    )
}

pub fn attribute(selector: &str, name: &str) -> String {
    with_element(
        selector,
        &format!(
            "return {{ found: true, value: el.getAttribute({}) }};",
            literal(name)
        ),
    )
}

pub fn value(selector: &str) -> String {
    with_element(
        selector,
        "return { found: true, value: String(el.value ?? '') };",
    )
}

pub fn is_visible(selector: &str) -> String {
    with_element(selector, "return { found: true, value: isVisible(el) };")
}

/// Looks for an element whose own text nodes, trimmed, equal `text`.
pub fn text_visible(text: &str) -> String {
    format!(
        r"(() => {{
    {IS_VISIBLE}
    const wanted = {wanted};
    const ownText = (el) => Array.from(el.childNodes)
        .filter((node) => node.nodeType === Node.TEXT_NODE)
        .map((node) => node.textContent)
        .join('')
        .trim();
    const hits = Array.from(document.querySelectorAll('body *')).filter((el) => ownText(el) === wanted);
    return {{ found: true, value: hits.some(isVisible) }};
}})()",
        wanted = literal(text),
    )
}
