//! Single-shot assertions over a page. Wrap them in
//! [`crate::retry::eventually`] to wait for the page to settle.

use crate::error::{OverlapFailure, ProbeError};
use crate::reader::{LayoutReader, StyleReader};
use log::debug;
use meme_geometry::{Verdict, verdict};

/// Assert that `forefront` lies inside `background` and renders something.
///
/// # Errors
///
/// - [`ProbeError::SelectorNotFound`] if either element is missing;
/// - [`ProbeError::NotContained`] if the boxes do not nest on both axes;
/// - [`ProbeError::NoVisibleArea`] if the forefront box is empty.
pub async fn check_full_overlap<R>(
    reader: &R,
    background: &str,
    forefront: &str,
) -> Result<Verdict, ProbeError>
where
    R: LayoutReader + ?Sized,
{
    let background_rect = reader.bounding_rect(background).await?;
    let forefront_rect = reader.bounding_rect(forefront).await?;
    let result = verdict(&background_rect, &forefront_rect);
    debug!("{forefront} {forefront_rect} over {background} {background_rect}: {result}");

    if !result.contained {
        return Err(ProbeError::NotContained(Box::new(OverlapFailure {
            background: background.to_owned(),
            forefront: forefront.to_owned(),
            background_rect,
            forefront_rect,
            verdict: result,
        })));
    }
    if !result.forefront_visible {
        return Err(ProbeError::NoVisibleArea {
            selector: forefront.to_owned(),
            rect: forefront_rect,
        });
    }
    Ok(result)
}

/// Assert a computed CSS property.
///
/// # Errors
///
/// [`ProbeError::Mismatch`] when the value differs.
pub async fn expect_css<R>(
    reader: &R,
    selector: &str,
    property: &str,
    expected: &str,
) -> Result<(), ProbeError>
where
    R: StyleReader + ?Sized,
{
    let actual = reader.computed_style(selector, property).await?;
    if actual.trim() == expected {
        Ok(())
    } else {
        Err(ProbeError::mismatch(
            format!("`{selector}` {property}"),
            expected,
            actual,
        ))
    }
}

/// Assert a form control's current value.
///
/// # Errors
///
/// [`ProbeError::Mismatch`] when the value differs.
pub async fn expect_value<R>(reader: &R, selector: &str, expected: &str) -> Result<(), ProbeError>
where
    R: StyleReader + ?Sized,
{
    let actual = reader.value(selector).await?;
    if actual == expected {
        Ok(())
    } else {
        Err(ProbeError::mismatch(
            format!("`{selector}` value"),
            expected,
            actual,
        ))
    }
}

/// Assert that an attribute is present and ends with `suffix`.
///
/// # Errors
///
/// [`ProbeError::Mismatch`] when the attribute is missing or ends otherwise.
pub async fn expect_attr_suffix<R>(
    reader: &R,
    selector: &str,
    name: &str,
    suffix: &str,
) -> Result<(), ProbeError>
where
    R: StyleReader + ?Sized,
{
    match reader.attribute(selector, name).await? {
        Some(actual) if actual.ends_with(suffix) => Ok(()),
        Some(actual) => Err(ProbeError::mismatch(
            format!("`{selector}` [{name}]"),
            format!("…{suffix}"),
            actual,
        )),
        None => Err(ProbeError::mismatch(
            format!("`{selector}` [{name}]"),
            format!("…{suffix}"),
            "<absent>",
        )),
    }
}

/// Assert that an element is visible.
///
/// # Errors
///
/// [`ProbeError::Mismatch`] when it is hidden or empty.
pub async fn expect_visible<R>(reader: &R, selector: &str) -> Result<(), ProbeError>
where
    R: StyleReader + ?Sized,
{
    if reader.is_visible(selector).await? {
        Ok(())
    } else {
        Err(ProbeError::mismatch(
            format!("`{selector}` visibility"),
            "visible",
            "hidden",
        ))
    }
}

/// Assert that an element showing exactly `text` is visible.
///
/// # Errors
///
/// [`ProbeError::Mismatch`] when no such element is visible.
pub async fn expect_text_visible<R>(reader: &R, text: &str) -> Result<(), ProbeError>
where
    R: StyleReader + ?Sized,
{
    if reader.text_visible(text).await? {
        Ok(())
    } else {
        Err(ProbeError::mismatch(
            "visible text",
            text,
            "no visible element with that text",
        ))
    }
}
