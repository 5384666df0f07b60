//! Image placement styles.
use super::error::{Result, StyleError};
use super::paragraph::Alignment;
use super::values::{StyleValue, normalize_key};
use super::{StyleDefinition, StyleKind};

/// Text wrapping around a picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrapping {
    #[default]
    Inline,
    Square,
    Tight,
    Behind,
    InFront,
}

impl Wrapping {
    /// Value of `style:wrap` in OpenDocument.
    pub fn as_odf(&self) -> &'static str {
        match self {
            Self::Inline => "none",
            Self::Square | Self::Tight => "parallel",
            Self::Behind | Self::InFront => "run-through",
        }
    }

    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline)
    }
}

/// Picture size and placement. Sizes and margins are in pixels at 96 DPI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageStyle {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub align: Option<Alignment>,
    pub margin_top: Option<i32>,
    pub margin_left: Option<i32>,
    pub wrapping: Wrapping,
}

impl ImageStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn wrapping(mut self, wrapping: Wrapping) -> Self {
        self.wrapping = wrapping;
        self
    }

    /// Final extent in pixels. Missing sides are derived from the intrinsic
    /// size keeping the aspect ratio.
    pub fn extent(&self, intrinsic: (u32, u32)) -> (u32, u32) {
        let (iw, ih) = intrinsic;
        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) if iw > 0 => (w, ((w as u64 * ih as u64) / iw as u64) as u32),
            (None, Some(h)) if ih > 0 => (((h as u64 * iw as u64) / ih as u64) as u32, h),
            (Some(w), None) => (w, ih),
            (None, Some(h)) => (iw, h),
            (None, None) => (iw, ih),
        }
    }
}

impl StyleDefinition for ImageStyle {
    const KIND: StyleKind = StyleKind::Image;

    fn set_value(&mut self, key: &str, value: &StyleValue) -> Result<()> {
        match normalize_key(key).as_str() {
            "width" => self.width = Some(value.to_u32(key)?),
            "height" => self.height = Some(value.to_u32(key)?),
            "align" => self.align = Some(Alignment::parse(key, value)?),
            "margintop" => self.margin_top = Some(value.to_i32(key)?),
            "marginleft" => self.margin_left = Some(value.to_i32(key)?),
            "wrappingstyle" | "wrapping" => {
                self.wrapping = match value.to_text().to_ascii_lowercase().as_str() {
                    "inline" => Wrapping::Inline,
                    "square" => Wrapping::Square,
                    "tight" => Wrapping::Tight,
                    "behind" => Wrapping::Behind,
                    "infront" => Wrapping::InFront,
                    _ => return Err(StyleError::invalid(key, value, "unknown wrapping style")),
                }
            },
            _ => return Err(StyleError::unknown_key(Self::KIND, key)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleValues;

    #[test]
    fn test_image_keys() {
        let style = ImageStyle::from_values(
            &StyleValues::new()
                .set("width", 100)
                .set("height", 50)
                .set("align", "center")
                .set("marginTop", -10)
                .set("wrappingStyle", "behind"),
        )
        .unwrap();
        assert_eq!(style.extent((10, 10)), (100, 50));
        assert_eq!(style.align, Some(Alignment::Center));
        assert_eq!(style.margin_top, Some(-10));
        assert_eq!(style.wrapping, Wrapping::Behind);
    }

    #[test]
    fn test_extent_keeps_aspect_ratio() {
        let style = ImageStyle::new();
        assert_eq!(style.extent((200, 100)), (200, 100));
        let style = ImageStyle { width: Some(100), ..Default::default() };
        assert_eq!(style.extent((200, 100)), (100, 50));
    }

    #[test]
    fn test_unknown_wrapping() {
        assert!(ImageStyle::from_values(&StyleValues::new().set("wrappingStyle", "float")).is_err());
    }
}
