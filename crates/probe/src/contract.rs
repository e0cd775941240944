//! What the meme generator page promises: element ids, expected computed
//! styles and the behaviour of its controls.

/// Element selectors.
pub mod selectors {
    /// Text field the caption is typed into.
    pub const TEXT_INPUT: &str = "#text-input";
    /// Caption rendered over the image.
    pub const MEME_TEXT: &str = "#meme-text";
    /// Framed area the image and caption live in.
    pub const IMAGE_CONTAINER: &str = "#meme-image-container";
    /// The meme image itself.
    pub const MEME_IMAGE: &str = "#meme-image";
    /// File input for uploading an image.
    pub const IMAGE_UPLOAD: &str = "#meme-insert";
}

/// Caption typed in the positioning checks.
pub const SAMPLE_TEXT: &str = "My awesome meme";

/// Longest caption the input accepts.
pub const MAX_TEXT_LENGTH: usize = 60;

/// Sixty-one characters, one more than the input accepts.
pub const OVERLONG_TEXT: &str = "I have written a line that has precisely sixty-one characters";

/// What remains of [`OVERLONG_TEXT`] once the input truncates it.
pub const TRUNCATED_TEXT: &str = "I have written a line that has precisely sixty-one character";

/// Container frame before any border preset is chosen.
pub const CONTAINER_BORDER: &str = "1px solid rgb(0, 0, 0)";
/// Background of the image area.
pub const CONTAINER_BACKGROUND: &str = "rgb(255, 255, 255)";

/// Caption shadow.
pub const TEXT_SHADOW: &str = "rgb(0, 0, 0) 5px 5px 5px";
/// Caption font size.
pub const TEXT_FONT_SIZE: &str = "30px";
/// Caption colour.
pub const TEXT_COLOR: &str = "rgb(255, 255, 255)";

/// Image uploaded by the upload checks, relative to the fixtures directory.
pub const UPLOAD_FIXTURE: &str = "meme.jpeg";
/// Its MIME type.
pub const UPLOAD_MIME: &str = "image/jpeg";

/// A button that swaps the container's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderPreset {
    /// Button selector.
    pub button: &'static str,
    /// The button's own background colour.
    pub button_color: &'static str,
    /// Container border after clicking it.
    pub border: &'static str,
}

/// The fire, water and earth frames, in page order.
pub const BORDER_PRESETS: [BorderPreset; 3] = [
    BorderPreset {
        button: "#fire",
        button_color: "rgb(255, 0, 0)",
        border: "3px dashed rgb(255, 0, 0)",
    },
    BorderPreset {
        button: "#water",
        button_color: "rgb(0, 0, 255)",
        border: "5px double rgb(0, 0, 255)",
    },
    BorderPreset {
        button: "#earth",
        button_color: "rgb(0, 128, 0)",
        border: "6px groove rgb(0, 128, 0)",
    },
];

/// Number of ready-made meme thumbnails.
pub const PRESET_MEME_COUNT: usize = 4;

/// Ids of the ready-made memes, starting at 1.
pub fn preset_meme_ids() -> impl Iterator<Item = usize> {
    1..=PRESET_MEME_COUNT
}

/// Selector of a ready-made meme's thumbnail.
#[must_use]
pub fn preset_selector(id: usize) -> String {
    format!("#meme-{id}")
}

/// The end of the image `src` once that thumbnail is chosen.
#[must_use]
pub fn preset_src_suffix(id: usize) -> String {
    format!("imgs/meme{id}.png")
}

/// The border preset whose button matches `selector`.
#[must_use]
pub fn border_preset(selector: &str) -> Option<&'static BorderPreset> {
    BORDER_PRESETS.iter().find(|preset| preset.button == selector)
}

/// The preset id a thumbnail selector refers to.
#[must_use]
pub fn preset_id(selector: &str) -> Option<usize> {
    selector
        .strip_prefix("#meme-")?
        .parse()
        .ok()
        .filter(|id| (1..=PRESET_MEME_COUNT).contains(id))
}
