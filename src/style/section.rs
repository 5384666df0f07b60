//! Section (page setup) styles. All lengths are in twips.
use super::error::{Result, StyleError};
use super::values::{StyleValue, normalize_key};
use super::{StyleDefinition, StyleKind};

/// A4 portrait width in twips.
pub const DEFAULT_PAGE_WIDTH: u32 = 11_906;
/// A4 portrait height in twips.
pub const DEFAULT_PAGE_HEIGHT: u32 = 16_838;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

/// How a section starts relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakType {
    NextPage,
    Continuous,
    EvenPage,
    OddPage,
    NextColumn,
}

impl BreakType {
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::NextPage => "nextPage",
            Self::Continuous => "continuous",
            Self::EvenPage => "evenPage",
            Self::OddPage => "oddPage",
            Self::NextColumn => "nextColumn",
        }
    }
}

/// Page geometry, margins and columns of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStyle {
    orientation: Orientation,
    page_width: u32,
    page_height: u32,
    pub margin_top: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    pub header_height: u32,
    pub footer_height: u32,
    pub gutter: u32,
    pub cols_num: u32,
    pub cols_space: u32,
    pub break_type: Option<BreakType>,
    pub page_numbering_start: Option<u32>,
}

impl Default for SectionStyle {
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            margin_top: 1418,
            margin_left: 1418,
            margin_right: 1418,
            margin_bottom: 1134,
            header_height: 720,
            footer_height: 720,
            gutter: 0,
            cols_num: 1,
            cols_space: 720,
            break_type: None,
            page_numbering_start: None,
        }
    }
}

impl SectionStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch orientation. Width and height swap when it changes.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if orientation != self.orientation {
            std::mem::swap(&mut self.page_width, &mut self.page_height);
            self.orientation = orientation;
        }
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.set_orientation(orientation);
        self
    }

    pub fn page_size(mut self, width: u32, height: u32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    pub fn margins(mut self, top: u32, right: u32, bottom: u32, left: u32) -> Self {
        self.margin_top = top;
        self.margin_right = right;
        self.margin_bottom = bottom;
        self.margin_left = left;
        self
    }

    pub fn columns(mut self, count: u32, space: u32) -> Self {
        self.cols_num = count.max(1);
        self.cols_space = space;
        self
    }

    pub fn break_type(mut self, break_type: BreakType) -> Self {
        self.break_type = Some(break_type);
        self
    }

    #[inline]
    pub fn page_orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn page_width(&self) -> u32 {
        self.page_width
    }

    #[inline]
    pub fn page_height(&self) -> u32 {
        self.page_height
    }

    #[inline]
    pub fn is_landscape(&self) -> bool {
        self.orientation == Orientation::Landscape
    }
}

impl StyleDefinition for SectionStyle {
    const KIND: StyleKind = StyleKind::Section;

    fn set_value(&mut self, key: &str, value: &StyleValue) -> Result<()> {
        match normalize_key(key).as_str() {
            "orientation" => {
                let orientation = match value.to_text().to_ascii_lowercase().as_str() {
                    "portrait" | "" => Orientation::Portrait,
                    "landscape" => Orientation::Landscape,
                    _ => return Err(StyleError::invalid(key, value, "expected portrait or landscape")),
                };
                self.set_orientation(orientation);
            },
            "pagesizew" => self.page_width = value.to_u32(key)?,
            "pagesizeh" => self.page_height = value.to_u32(key)?,
            "margintop" => self.margin_top = value.to_u32(key)?,
            "marginleft" => self.margin_left = value.to_u32(key)?,
            "marginright" => self.margin_right = value.to_u32(key)?,
            "marginbottom" => self.margin_bottom = value.to_u32(key)?,
            "headerheight" => self.header_height = value.to_u32(key)?,
            "footerheight" => self.footer_height = value.to_u32(key)?,
            "gutter" => self.gutter = value.to_u32(key)?,
            "colsnum" => self.cols_num = value.to_u32(key)?.max(1),
            "colsspace" => self.cols_space = value.to_u32(key)?,
            "breaktype" => {
                self.break_type = Some(match normalize_key(&value.to_text()).as_str() {
                    "nextpage" => BreakType::NextPage,
                    "continuous" => BreakType::Continuous,
                    "evenpage" => BreakType::EvenPage,
                    "oddpage" => BreakType::OddPage,
                    "nextcolumn" => BreakType::NextColumn,
                    _ => return Err(StyleError::invalid(key, value, "unknown section break type")),
                })
            },
            "pagenumberingstart" => self.page_numbering_start = Some(value.to_u32(key)?),
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
    fn test_defaults_are_a4() {
        let style = SectionStyle::default();
        assert_eq!(style.page_width(), 11906);
        assert_eq!(style.page_height(), 16838);
        assert_eq!(style.margin_bottom, 1134);
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let style = SectionStyle::from_values(&StyleValues::new().set("orientation", "landscape")).unwrap();
        assert!(style.is_landscape());
        assert_eq!(style.page_width(), 16838);
        assert_eq!(style.page_height(), 11906);

        let back = style.orientation(Orientation::Portrait);
        assert_eq!(back.page_width(), 11906);
    }

    #[test]
    fn test_column_and_break_keys() {
        let style = SectionStyle::from_values(
            &StyleValues::new()
                .set("colsNum", 2)
                .set("colsSpace", 360)
                .set("breakType", "continuous")
                .set("pageNumberingStart", 5),
        )
        .unwrap();
        assert_eq!(style.cols_num, 2);
        assert_eq!(style.cols_space, 360);
        assert_eq!(style.break_type, Some(BreakType::Continuous));
        assert_eq!(style.page_numbering_start, Some(5));
    }
}
