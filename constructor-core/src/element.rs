//! Canvas elements - the items placed onto the monument image.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal text alignment inside the element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    Left,
    /// Centered (the engraving default).
    #[default]
    Center,
    /// Flush right.
    Right,
}

/// Compound font specification: `"family|weight"`, or `"family|custom|"` for
/// a user-uploaded font where only the family name is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontSpec(String);

impl FontSpec {
    /// A catalog font with an explicit weight.
    #[must_use]
    pub fn new(family: &str, weight: &str) -> Self {
        Self(format!("{family}|{weight}"))
    }

    /// A custom (uploaded) font known only by family name.
    #[must_use]
    pub fn custom(family: &str) -> Self {
        Self(format!("{family}|custom|"))
    }

    /// The font family name.
    #[must_use]
    pub fn family(&self) -> &str {
        self.0.split('|').next().unwrap_or("serif")
    }

    /// The font weight. Custom fonts always render at normal weight.
    #[must_use]
    pub fn weight(&self) -> &str {
        if self.is_custom() {
            "normal"
        } else {
            self.0.split('|').nth(1).unwrap_or("400")
        }
    }

    /// Whether this is a user-uploaded font.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.0.contains("|custom|")
    }

    /// The raw compound string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("serif", "400")
    }
}

/// Attributes shared by the text-capable element kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAttrs {
    /// Text content; multi-line via `\n`.
    pub content: String,
    /// Font size in canvas pixels.
    pub font_size: f32,
    /// Text color as hex.
    pub color: String,
    /// Compound font specification.
    pub font: FontSpec,
    /// Line height multiplier.
    pub line_height: f32,
    /// Additional spacing between letters, in pixels.
    pub letter_spacing: f32,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Italic rendering.
    pub italic: bool,
    /// Enlargement factor for the first glyph of each word (FIO lines);
    /// 1.0 disables the effect.
    pub initial_scale: f32,
}

impl Default for TextAttrs {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_size: 24.0,
            color: "#FFFFFF".to_string(),
            font: FontSpec::default(),
            line_height: 1.2,
            letter_spacing: 0.0,
            align: TextAlign::Center,
            italic: false,
            initial_scale: 1.0,
        }
    }
}

/// Attributes shared by the image-carrying element kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttrs {
    /// Original asset reference (URL or data URI).
    pub src: String,
    /// Output of the screen compositing filter, cached until invalidated.
    /// Not persisted; recomputed on demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_src: Option<String>,
    /// Render `processed_src` instead of `src` when set.
    #[serde(default)]
    pub screen_mode: bool,
    /// Mirror horizontally at render time.
    #[serde(default)]
    pub flip_horizontal: bool,
}

impl ImageAttrs {
    /// Image attributes for a freshly placed asset.
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            processed_src: None,
            screen_mode: false,
            flip_horizontal: false,
        }
    }

    /// The source that should be rendered right now.
    #[must_use]
    pub fn render_src(&self) -> &str {
        if self.screen_mode {
            if let Some(processed) = &self.processed_src {
                return processed;
            }
        }
        &self.src
    }
}

/// The closed set of element kinds, with per-variant payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ElementKind {
    /// Free-form engraving text.
    Text(TextAttrs),
    /// Epitaph line, italic by default.
    Epitaph(TextAttrs),
    /// Surname / name / patronymic block.
    Fio(TextAttrs),
    /// Birth and death dates line.
    Dates(TextAttrs),
    /// Generic decorative image.
    Image(ImageAttrs),
    /// Cross from the decorative library.
    Cross(ImageAttrs),
    /// Flower from the decorative library.
    Flower(ImageAttrs),
    /// Uploaded portrait photo, cover-fit.
    Photo(ImageAttrs),
}

impl ElementKind {
    /// Whether this kind carries editable text.
    #[must_use]
    pub fn is_text_capable(&self) -> bool {
        matches!(
            self,
            Self::Text(_) | Self::Epitaph(_) | Self::Fio(_) | Self::Dates(_)
        )
    }

    /// Text attributes, if this is a text-capable kind.
    #[must_use]
    pub fn text(&self) -> Option<&TextAttrs> {
        match self {
            Self::Text(t) | Self::Epitaph(t) | Self::Fio(t) | Self::Dates(t) => Some(t),
            _ => None,
        }
    }

    /// Mutable text attributes, if text-capable.
    pub fn text_mut(&mut self) -> Option<&mut TextAttrs> {
        match self {
            Self::Text(t) | Self::Epitaph(t) | Self::Fio(t) | Self::Dates(t) => Some(t),
            _ => None,
        }
    }

    /// Image attributes, if this is an image-carrying kind.
    #[must_use]
    pub fn image(&self) -> Option<&ImageAttrs> {
        match self {
            Self::Image(i) | Self::Cross(i) | Self::Flower(i) | Self::Photo(i) => Some(i),
            _ => None,
        }
    }

    /// Mutable image attributes, if image-carrying.
    pub fn image_mut(&mut self) -> Option<&mut ImageAttrs> {
        match self {
            Self::Image(i) | Self::Cross(i) | Self::Flower(i) | Self::Photo(i) => Some(i),
            _ => None,
        }
    }
}

/// Position and size in canvas-local, unscaled units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// X position (pixels from the canvas left edge).
    pub x: f32,
    /// Y position (pixels from the canvas top edge).
    pub y: f32,
    /// Width in pixels; ignored when `auto_size` is set.
    pub width: f32,
    /// Height in pixels; ignored when `auto_size` is set.
    pub height: f32,
    /// Rotation in degrees; the UI clamps to [-180, 180].
    #[serde(default)]
    pub rotation: f32,
    /// Let the content dictate the box size.
    #[serde(default)]
    pub auto_size: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
            auto_size: false,
        }
    }
}

impl Transform {
    /// Position and size in one call.
    #[must_use]
    pub fn at(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    /// Center of the bounding box.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A canvas element with content and transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier, stable for the element's lifetime.
    pub id: ElementId,
    /// Element content.
    pub kind: ElementKind,
    /// Position and size.
    pub transform: Transform,
}

impl Element {
    /// Create a new element with the given kind and that kind's default
    /// placement.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        let transform = default_transform(&kind);
        Self {
            id: ElementId::new(),
            kind,
            transform,
        }
    }

    /// Override the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// A plain text element with the stock placeholder content.
    #[must_use]
    pub fn text() -> Self {
        Self::new(ElementKind::Text(TextAttrs {
            content: "Текст".to_string(),
            ..TextAttrs::default()
        }))
    }

    /// An epitaph element; falls back to the traditional line when no custom
    /// text is supplied.
    #[must_use]
    pub fn epitaph(custom_text: Option<&str>) -> Self {
        Self::new(ElementKind::Epitaph(TextAttrs {
            content: custom_text.unwrap_or("Вечная память").to_string(),
            font_size: 18.0,
            italic: true,
            ..TextAttrs::default()
        }))
    }

    /// A FIO (surname/name/patronymic) block in the given catalog font.
    #[must_use]
    pub fn fio(content: impl Into<String>, font: FontSpec) -> Self {
        Self::new(ElementKind::Fio(TextAttrs {
            content: content.into(),
            font_size: 28.0,
            font,
            line_height: 1.05,
            ..TextAttrs::default()
        }))
    }

    /// A dates line in the given catalog font.
    #[must_use]
    pub fn dates(content: impl Into<String>, font: FontSpec) -> Self {
        Self::new(ElementKind::Dates(TextAttrs {
            content: content.into(),
            font_size: 20.0,
            font,
            ..TextAttrs::default()
        }))
    }

    /// A generic decorative image.
    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self::new(ElementKind::Image(ImageAttrs::new(src)))
    }

    /// A cross from the decorative library.
    #[must_use]
    pub fn cross(src: impl Into<String>) -> Self {
        Self::new(ElementKind::Cross(ImageAttrs::new(src)))
    }

    /// A flower from the decorative library.
    #[must_use]
    pub fn flower(src: impl Into<String>) -> Self {
        Self::new(ElementKind::Flower(ImageAttrs::new(src)))
    }

    /// An uploaded portrait photo.
    #[must_use]
    pub fn photo(src: impl Into<String>) -> Self {
        Self::new(ElementKind::Photo(ImageAttrs::new(src)))
    }
}

/// Factory placement per kind, matching the constructor's defaults.
fn default_transform(kind: &ElementKind) -> Transform {
    match kind {
        ElementKind::Text(_) => Transform::at(50.0, 50.0, 200.0, 40.0),
        ElementKind::Epitaph(_) => Transform::at(50.0, 200.0, 300.0, 100.0),
        ElementKind::Fio(_) => Transform::at(100.0, 100.0, 300.0, 120.0),
        ElementKind::Dates(_) => Transform::at(100.0, 250.0, 250.0, 40.0),
        ElementKind::Image(_) | ElementKind::Cross(_) | ElementKind::Flower(_) => {
            Transform::at(50.0, 50.0, 100.0, 100.0)
        }
        ElementKind::Photo(_) => Transform::at(100.0, 50.0, 150.0, 200.0),
    }
}
