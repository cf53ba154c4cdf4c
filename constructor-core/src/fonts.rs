//! Built-in engraving font catalog.
//!
//! Each entry pairs a display label used in the font picker with the CSS
//! family and weight it resolves to. Uploaded fonts live outside this list
//! and are marked with the `|custom|` suffix in [`FontSpec`].

use crate::FontSpec;

/// A selectable engraving font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngravingFont {
    /// Stable identifier, also used in saved designs.
    pub id: &'static str,
    /// Label shown in the picker.
    pub label: &'static str,
    /// Font family name.
    pub family: &'static str,
    /// Font weight.
    pub weight: &'static str,
}

impl EngravingFont {
    /// The compound spec for this catalog entry.
    #[must_use]
    pub fn spec(&self) -> FontSpec {
        FontSpec::new(self.family, self.weight)
    }
}

/// The fonts offered for engraving text.
pub const ENGRAVING_FONTS: [EngravingFont; 9] = [
    EngravingFont {
        id: "font1",
        label: "Шрифт № 1/1а",
        family: "Playfair Display",
        weight: "400",
    },
    EngravingFont {
        id: "font2",
        label: "Шрифт № 2/2а",
        family: "Playfair Display",
        weight: "700",
    },
    EngravingFont {
        id: "font3",
        label: "Шрифт № 3",
        family: "Cormorant Garamond",
        weight: "400",
    },
    EngravingFont {
        id: "font4",
        label: "Шрифт № 4",
        family: "Cormorant Garamond",
        weight: "700",
    },
    EngravingFont {
        id: "font5",
        label: "Шрифт № 3а",
        family: "EB Garamond",
        weight: "400",
    },
    EngravingFont {
        id: "font6",
        label: "Искусственный 1/1а",
        family: "Dancing Script",
        weight: "400",
    },
    EngravingFont {
        id: "font7",
        label: "Искусственный 2/2а",
        family: "Great Vibes",
        weight: "400",
    },
    EngravingFont {
        id: "font8",
        label: "Искусственный 3/3а",
        family: "Allura",
        weight: "400",
    },
    EngravingFont {
        id: "font9",
        label: "Шрифт Cinzel",
        family: "Cinzel",
        weight: "700",
    },
];

/// Look up a catalog font by id.
#[must_use]
pub fn engraving_font(id: &str) -> Option<&'static EngravingFont> {
    ENGRAVING_FONTS.iter().find(|f| f.id == id)
}
