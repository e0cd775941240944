//! Capabilities the checks need from a page.
//!
//! Scenarios never talk to a browser directly. They are generic over these
//! traits, which [`crate::chrome::ChromePage`] implements over the Chrome
//! debugging protocol and [`crate::test_support::FakePage`] implements in memory.

use crate::config::Viewport;
use crate::error::ProbeError;
use meme_geometry::Rect;
use std::path::Path;

/// Reads rendered geometry.
#[allow(
    async_fn_in_trait,
    reason = "scenarios drive one page from one task; callers never need a Send bound"
)]
pub trait LayoutReader {
    /// Bounding client rect of the first element matching `selector`.
    ///
    /// # Errors
    ///
    /// [`ProbeError::SelectorNotFound`] when nothing matches.
    async fn bounding_rect(&self, selector: &str) -> Result<Rect, ProbeError>;
}

/// Reads computed style, attributes and visibility.
#[allow(
    async_fn_in_trait,
    reason = "scenarios drive one page from one task; callers never need a Send bound"
)]
pub trait StyleReader {
    /// Computed value of a CSS property, as `getPropertyValue` reports it.
    async fn computed_style(&self, selector: &str, property: &str) -> Result<String, ProbeError>;

    /// An attribute's value, or `None` when the element lacks it.
    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>, ProbeError>;

    /// Current value of a form control.
    async fn value(&self, selector: &str) -> Result<String, ProbeError>;

    /// Whether the element is rendered, not hidden, and occupies space.
    async fn is_visible(&self, selector: &str) -> Result<bool, ProbeError>;

    /// Whether some element whose own text is exactly `text` (after trimming)
    /// is visible. Absence is `Ok(false)`, not an error.
    async fn text_visible(&self, text: &str) -> Result<bool, ProbeError>;
}

/// Drives a page the way a user would.
#[allow(
    async_fn_in_trait,
    reason = "scenarios drive one page from one task; callers never need a Send bound"
)]
pub trait PageDriver: LayoutReader + StyleReader {
    /// Navigate to `path`, resolved against the configured base URL.
    async fn visit(&self, path: &str) -> Result<(), ProbeError>;

    /// Resize the viewport.
    async fn set_viewport(&self, viewport: Viewport) -> Result<(), ProbeError>;

    /// Reload the current page.
    async fn reload(&self) -> Result<(), ProbeError>;

    /// Click the element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), ProbeError>;

    /// Focus the element and type `text` one key at a time.
    async fn type_text(&self, selector: &str, text: &str) -> Result<(), ProbeError>;

    /// Attach a local file to a file input.
    async fn upload_file(&self, selector: &str, path: &Path, mime: &str) -> Result<(), ProbeError>;
}

/// Adapts a plain `selector -> Option<Rect>` function into a
/// [`LayoutReader`].
pub struct LayoutFn<F>(pub F);

impl<F> LayoutReader for LayoutFn<F>
where
    F: Fn(&str) -> Option<Rect>,
{
    async fn bounding_rect(&self, selector: &str) -> Result<Rect, ProbeError> {
        (self.0)(selector).ok_or_else(|| ProbeError::SelectorNotFound(selector.to_owned()))
    }
}
