//! # Pass Images
//!
//! The named image slots a pass may carry. Payloads arrive from the editor as
//! base64 text, optionally wrapped in a `data:image/...;base64,` URI. Decoding
//! happens in the assembler.

use serde::{Deserialize, Serialize};

/// A named image slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageSlot {
    Icon,
    Logo,
    Strip,
    Thumbnail,
    Background,
    Footer,
}

impl ImageSlot {
    /// Every slot, in bundle order.
    pub const ALL: [ImageSlot; 6] = [
        Self::Icon,
        Self::Logo,
        Self::Strip,
        Self::Thumbnail,
        Self::Background,
        Self::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::Logo => "logo",
            Self::Strip => "strip",
            Self::Thumbnail => "thumbnail",
            Self::Background => "background",
            Self::Footer => "footer",
        }
    }

    /// File name inside the pass bundle.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.as_str())
    }

    /// Recommended @1x dimensions (width, height) in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Icon => (29, 29),
            Self::Logo => (160, 50),
            Self::Strip => (375, 123),
            Self::Thumbnail => (90, 90),
            Self::Background => (180, 220),
            Self::Footer => (286, 15),
        }
    }
}

impl std::fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional encoded image per slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl ImageSet {
    /// Encoded payload for a slot, if present and non-empty.
    pub fn get(&self, slot: ImageSlot) -> Option<&str> {
        let value = match slot {
            ImageSlot::Icon => &self.icon,
            ImageSlot::Logo => &self.logo,
            ImageSlot::Strip => &self.strip,
            ImageSlot::Thumbnail => &self.thumbnail,
            ImageSlot::Background => &self.background,
            ImageSlot::Footer => &self.footer,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Present slots with their payloads, in bundle order.
    pub fn present(&self) -> impl Iterator<Item = (ImageSlot, &str)> + '_ {
        ImageSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|v| (slot, v)))
    }
}
