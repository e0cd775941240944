//! An in-memory meme page for exercising scenarios without a browser.
//!
//! [`FakePage`] keeps a map of elements keyed by `#id` selector and applies
//! the page's documented behaviour when driven: typing respects `maxlength`
//! and mirrors into the caption, border buttons restyle the container,
//! thumbnails and uploads fill the image. Builder methods break individual
//! parts of that behaviour so failure reporting can be tested too.

use crate::config::Viewport;
use crate::contract::{self, BORDER_PRESETS, selectors};
use crate::error::ProbeError;
use crate::reader::{LayoutReader, PageDriver, StyleReader};
use meme_geometry::{Rect, has_visible_area};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One element of the fake document.
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub rect: Rect,
    pub styles: HashMap<String, String>,
    pub attributes: HashMap<String, String>,
    pub value: String,
    pub text: String,
    pub hidden: bool,
    pub max_length: Option<usize>,
}

impl FakeElement {
    fn at(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    fn style(mut self, property: &str, value: &str) -> Self {
        self.styles.insert(property.to_owned(), value.to_owned());
        self
    }

    fn attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    fn is_visible(&self) -> bool {
        !self.hidden && has_visible_area(&self.rect)
    }
}

#[derive(Debug, Default)]
struct FakeState {
    elements: HashMap<String, FakeElement>,
    url: Option<String>,
    viewport: Option<Viewport>,
    visits: usize,
    uploads: Vec<(PathBuf, String)>,
}

/// A scripted stand-in for the meme generator page.
#[derive(Debug)]
pub struct FakePage {
    template: HashMap<String, FakeElement>,
    caption_rect: Rect,
    image_rect: Rect,
    state: Mutex<FakeState>,
}

const CONTAINER_RECT: Rect = Rect::new(150.0, 433.0, 500.0, 400.0);
const CAPTION_RECT: Rect = Rect::new(170.0, 453.0, 460.0, 40.0);
const IMAGE_RECT: Rect = Rect::new(151.0, 434.0, 498.0, 398.0);

impl FakePage {
    /// A page that honours every part of the contract.
    #[must_use]
    pub fn meme_page() -> Self {
        let mut template = HashMap::new();

        let mut input = FakeElement::at(Rect::new(80.0, 533.0, 300.0, 24.0));
        input.max_length = Some(contract::MAX_TEXT_LENGTH);
        template.insert(selectors::TEXT_INPUT.to_owned(), input);

        template.insert(
            selectors::IMAGE_UPLOAD.to_owned(),
            FakeElement::at(Rect::new(110.0, 533.0, 300.0, 24.0)),
        );

        template.insert(
            selectors::IMAGE_CONTAINER.to_owned(),
            FakeElement::at(CONTAINER_RECT)
                .style("background-color", contract::CONTAINER_BACKGROUND)
                .style("border", contract::CONTAINER_BORDER),
        );

        let mut image = FakeElement::at(Rect::new(IMAGE_RECT.top, IMAGE_RECT.left, 0.0, 0.0));
        image.hidden = true;
        template.insert(selectors::MEME_IMAGE.to_owned(), image);

        template.insert(
            selectors::MEME_TEXT.to_owned(),
            FakeElement::at(Rect::new(CAPTION_RECT.top, CAPTION_RECT.left, CAPTION_RECT.width, 0.0))
                .style("text-shadow", contract::TEXT_SHADOW)
                .style("font-size", contract::TEXT_FONT_SIZE)
                .style("color", contract::TEXT_COLOR),
        );

        for (index, preset) in BORDER_PRESETS.iter().enumerate() {
            let left = 433.0 + 110.0 * index as f64;
            template.insert(
                preset.button.to_owned(),
                FakeElement::at(Rect::new(580.0, left, 100.0, 30.0))
                    .style("background-color", preset.button_color),
            );
        }

        for id in contract::preset_meme_ids() {
            let left = 433.0 + 130.0 * (id - 1) as f64;
            template.insert(
                contract::preset_selector(id),
                FakeElement::at(Rect::new(630.0, left, 120.0, 90.0))
                    .attribute("src", &contract::preset_src_suffix(id)),
            );
        }

        let page = Self {
            template,
            caption_rect: CAPTION_RECT,
            image_rect: IMAGE_RECT,
            state: Mutex::new(FakeState::default()),
        };
        page.reset();
        page
    }

    /// Render the caption at `rect` once it has text.
    #[must_use]
    pub fn with_caption_rect(mut self, rect: Rect) -> Self {
        self.caption_rect = rect;
        self.reset();
        self
    }

    /// Render the image at `rect` once it has a source.
    #[must_use]
    pub fn with_image_rect(mut self, rect: Rect) -> Self {
        self.image_rect = rect;
        self.reset();
        self
    }

    /// Override a computed style.
    #[must_use]
    pub fn with_style(mut self, selector: &str, property: &str, value: &str) -> Self {
        if let Some(element) = self.template.get_mut(selector) {
            element
                .styles
                .insert(property.to_owned(), value.to_owned());
        }
        self.reset();
        self
    }

    /// Change the text input's `maxlength`.
    #[must_use]
    pub fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        if let Some(input) = self.template.get_mut(selectors::TEXT_INPUT) {
            input.max_length = max_length;
        }
        self.reset();
        self
    }

    /// Drop an element from the document.
    #[must_use]
    pub fn without_element(mut self, selector: &str) -> Self {
        self.template.remove(selector);
        self.reset();
        self
    }

    /// A copy of an element's current state.
    #[must_use]
    pub fn element(&self, selector: &str) -> Option<FakeElement> {
        self.state.lock().elements.get(selector).cloned()
    }

    /// URL of the last visit.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.state.lock().url.clone()
    }

    /// Viewport set most recently.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.state.lock().viewport
    }

    /// Number of visits and reloads so far.
    #[must_use]
    pub fn visits(&self) -> usize {
        self.state.lock().visits
    }

    /// Files attached through [`PageDriver::upload_file`], with their MIME
    /// types.
    #[must_use]
    pub fn uploads(&self) -> Vec<(PathBuf, String)> {
        self.state.lock().uploads.clone()
    }

    fn reset(&self) {
        self.state.lock().elements = self.template.clone();
    }

    fn with_element<T>(
        &self,
        selector: &str,
        read: impl FnOnce(&FakeElement) -> T,
    ) -> Result<T, ProbeError> {
        self.state
            .lock()
            .elements
            .get(selector)
            .map(read)
            .ok_or_else(|| ProbeError::SelectorNotFound(selector.to_owned()))
    }

    fn show_image(&self, elements: &mut HashMap<String, FakeElement>, src: String) {
        if let Some(image) = elements.get_mut(selectors::MEME_IMAGE) {
            image.attributes.insert("src".to_owned(), src);
            image.rect = self.image_rect;
            image.hidden = false;
        }
    }
}

impl Default for FakePage {
    fn default() -> Self {
        Self::meme_page()
    }
}

impl LayoutReader for FakePage {
    async fn bounding_rect(&self, selector: &str) -> Result<Rect, ProbeError> {
        self.with_element(selector, |element| element.rect)
    }
}

impl StyleReader for FakePage {
    async fn computed_style(&self, selector: &str, property: &str) -> Result<String, ProbeError> {
        self.with_element(selector, |element| {
            element.styles.get(property).cloned().unwrap_or_default()
        })
    }

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>, ProbeError> {
        self.with_element(selector, |element| element.attributes.get(name).cloned())
    }

    async fn value(&self, selector: &str) -> Result<String, ProbeError> {
        self.with_element(selector, |element| element.value.clone())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool, ProbeError> {
        self.with_element(selector, FakeElement::is_visible)
    }

    async fn text_visible(&self, text: &str) -> Result<bool, ProbeError> {
        Ok(self
            .state
            .lock()
            .elements
            .values()
            .any(|element| element.text.trim() == text && element.is_visible()))
    }
}

impl PageDriver for FakePage {
    async fn visit(&self, path: &str) -> Result<(), ProbeError> {
        self.reset();
        let mut state = self.state.lock();
        state.url = Some(path.to_owned());
        state.visits = state.visits.saturating_add(1);
        Ok(())
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<(), ProbeError> {
        self.state.lock().viewport = Some(viewport);
        Ok(())
    }

    async fn reload(&self) -> Result<(), ProbeError> {
        self.reset();
        let mut state = self.state.lock();
        state.visits = state.visits.saturating_add(1);
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), ProbeError> {
        let mut state = self.state.lock();
        if !state.elements.contains_key(selector) {
            return Err(ProbeError::SelectorNotFound(selector.to_owned()));
        }
        if let Some(preset) = contract::border_preset(selector)
            && let Some(container) = state.elements.get_mut(selectors::IMAGE_CONTAINER)
        {
            container
                .styles
                .insert("border".to_owned(), preset.border.to_owned());
        }
        if let Some(id) = contract::preset_id(selector) {
            self.show_image(&mut state.elements, contract::preset_src_suffix(id));
        }
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), ProbeError> {
        let mut state = self.state.lock();
        let input = state
            .elements
            .get_mut(selector)
            .ok_or_else(|| ProbeError::SelectorNotFound(selector.to_owned()))?;
        for key in text.chars() {
            if input
                .max_length
                .is_some_and(|limit| input.value.chars().count() >= limit)
            {
                break;
            }
            input.value.push(key);
        }
        let typed = input.value.clone();

        if selector == selectors::TEXT_INPUT
            && let Some(caption) = state.elements.get_mut(selectors::MEME_TEXT)
        {
            caption.rect = if typed.is_empty() {
                Rect::new(self.caption_rect.top, self.caption_rect.left, self.caption_rect.width, 0.0)
            } else {
                self.caption_rect
            };
            caption.text = typed;
        }
        Ok(())
    }

    async fn upload_file(&self, selector: &str, path: &Path, mime: &str) -> Result<(), ProbeError> {
        fs::metadata(path)?;
        let mut state = self.state.lock();
        if !state.elements.contains_key(selector) {
            return Err(ProbeError::SelectorNotFound(selector.to_owned()));
        }
        state.uploads.push((path.to_path_buf(), mime.to_owned()));
        if selector == selectors::IMAGE_UPLOAD {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.show_image(&mut state.elements, format!("blob:meme-page/{name}"));
        }
        Ok(())
    }
}
