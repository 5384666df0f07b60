//! OpenDocument style markup.
//!
//! Inline styles become automatic styles of the part they are used in;
//! named styles live in `office:styles` of `styles.xml`. Both share the
//! property writers below.

use crate::common::Settings;
use crate::common::unit::{format_decimal, twips_to_cm};
use crate::common::xml::escape_xml;
use crate::document::ListType;
use crate::style::{BorderSide, FontStyle, NamedStyle, ParagraphStyle, StyleRegistry, Underline, style_id};
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

/// Name of the paragraph style every other paragraph style derives from.
pub(crate) const STANDARD_STYLE: &str = "Standard";
/// Paragraph style of footnote bodies.
pub(crate) const FOOTNOTE_STYLE: &str = "Footnote";

/// Every list type, for the list styles of `styles.xml`.
const LIST_TYPES: [ListType; 6] = [
    ListType::SquareFilled,
    ListType::BulletFilled,
    ListType::BulletEmpty,
    ListType::Number,
    ListType::NumberNested,
    ListType::AlphaNum,
];

/// Centimetre length attribute value.
pub(crate) fn cm(twips: u32) -> String {
    format!("{}cm", format_decimal(twips_to_cm(twips as i64)))
}

/// Style family of `style:style`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Family {
    Paragraph,
    Text,
    Graphic,
    Table,
    TableColumn,
    TableRow,
    TableCell,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Paragraph => "paragraph",
            Family::Text => "text",
            Family::Graphic => "graphic",
            Family::Table => "table",
            Family::TableColumn => "table-column",
            Family::TableRow => "table-row",
            Family::TableCell => "table-cell",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Family::Paragraph => "P",
            Family::Text => "T",
            Family::Graphic => "fr",
            Family::Table => "Tbl",
            Family::TableColumn => "Col",
            Family::TableRow => "Row",
            Family::TableCell => "Cell",
        }
    }
}

#[derive(Debug, Clone)]
struct AutoStyle {
    name: String,
    family: Family,
    /// Extra attributes of `style:style`, each with a leading space
    attributes: String,
    properties: String,
}

/// Automatic styles of one part. Identical definitions share a name.
#[derive(Debug, Default)]
pub(crate) struct AutoStyles {
    prefix: &'static str,
    styles: Vec<AutoStyle>,
    index: HashMap<(Family, String, String), usize>,
    counters: HashMap<Family, u32>,
}

impl AutoStyles {
    /// `prefix` keeps the names of different parts apart.
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            ..Self::default()
        }
    }

    /// Add a style and return its name.
    pub fn add(&mut self, family: Family, attributes: String, properties: String) -> String {
        let key = (family, attributes, properties);
        if let Some(&i) = self.index.get(&key) {
            return self.styles[i].name.clone();
        }
        let counter = self.counters.entry(family).or_insert(0);
        *counter += 1;
        let name = format!("{}{}{}", self.prefix, family.prefix(), counter);
        let (family, attributes, properties) = key.clone();
        self.index.insert(key, self.styles.len());
        self.styles.push(AutoStyle {
            name: name.clone(),
            family,
            attributes,
            properties,
        });
        name
    }

    /// Paragraph style derived from `Standard`.
    pub fn paragraph(&mut self, properties: String) -> String {
        let attributes = format!(r#" style:parent-style-name="{}""#, STANDARD_STYLE);
        self.add(Family::Paragraph, attributes, properties)
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Write the `style:style` elements.
    pub fn write(&self, xml: &mut String) {
        for style in &self.styles {
            let _ = write!(
                xml,
                r#"<style:style style:name="{}" style:family="{}"{}>{}</style:style>"#,
                style.name,
                style.family.as_str(),
                style.attributes,
                style.properties
            );
        }
    }
}

fn highlight_hex(name: &str) -> Option<&'static str> {
    Some(match name.to_ascii_lowercase().as_str() {
        "yellow" => "FFFF00",
        "green" => "00FF00",
        "cyan" => "00FFFF",
        "magenta" => "FF00FF",
        "blue" => "0000FF",
        "red" => "FF0000",
        "darkblue" => "000080",
        "darkcyan" => "008080",
        "darkgreen" => "008000",
        "darkmagenta" => "800080",
        "darkred" => "800000",
        "darkyellow" => "808000",
        "darkgray" => "808080",
        "lightgray" => "C0C0C0",
        "black" => "000000",
        "white" => "FFFFFF",
        _ => return None,
    })
}

/// `style:text-properties` of a font style, empty when nothing is set.
pub(crate) fn text_properties(font: &FontStyle) -> String {
    let mut attrs = String::new();
    if let Some(name) = font.font_name() {
        let name = escape_xml(name);
        let _ = write!(
            attrs,
            r#" fo:font-family="{0}" style:font-family-asian="{0}" style:font-family-complex="{0}""#,
            name
        );
    }
    if let Some(size) = font.size_pt() {
        let size = format_decimal(size);
        let _ = write!(
            attrs,
            r#" fo:font-size="{0}pt" style:font-size-asian="{0}pt" style:font-size-complex="{0}pt""#,
            size
        );
    }
    if font.is_bold() {
        attrs.push_str(r#" fo:font-weight="bold" style:font-weight-asian="bold" style:font-weight-complex="bold""#);
    }
    if font.is_italic() {
        attrs.push_str(r#" fo:font-style="italic" style:font-style-asian="italic" style:font-style-complex="italic""#);
    }
    let underline = font.underline_style();
    if underline != Underline::None {
        let _ = write!(
            attrs,
            r#" style:text-underline-style="{}" style:text-underline-width="auto" style:text-underline-color="font-color""#,
            underline.as_odf()
        );
        if underline == Underline::Double {
            attrs.push_str(r#" style:text-underline-type="double""#);
        }
        if underline == Underline::Words {
            attrs.push_str(r#" style:text-underline-mode="skip-white-space""#);
        }
    }
    if font.is_strikethrough() {
        attrs.push_str(r#" style:text-line-through-style="solid""#);
    }
    if let Some(color) = font.text_color() {
        let _ = write!(attrs, r##" fo:color="#{}""##, escape_xml(color));
    }
    if let Some(hex) = font.highlight().and_then(highlight_hex) {
        let _ = write!(attrs, r##" fo:background-color="#{}""##, hex);
    }
    if font.is_superscript() {
        attrs.push_str(r#" style:text-position="super 58%""#);
    } else if font.is_subscript() {
        attrs.push_str(r#" style:text-position="sub 58%""#);
    }
    if attrs.is_empty() {
        return String::new();
    }
    format!("<style:text-properties{}/>", attrs)
}

/// Attributes of `style:paragraph-properties`, each with a leading space.
fn paragraph_attributes(paragraph: &ParagraphStyle) -> String {
    let mut attrs = String::new();
    if let Some(align) = paragraph.alignment() {
        let _ = write!(attrs, r#" fo:text-align="{}""#, align.as_odf());
    }
    if let Some(before) = paragraph.before() {
        let _ = write!(attrs, r#" fo:margin-top="{}""#, cm(before));
    }
    if let Some(after) = paragraph.after() {
        let _ = write!(attrs, r#" fo:margin-bottom="{}""#, cm(after));
    }
    let line_height = paragraph
        .line_height_multiple()
        .or_else(|| paragraph.spacing().map(|twips| twips as f64 / 240.0));
    if let Some(multiple) = line_height {
        let _ = write!(attrs, r#" fo:line-height="{}%""#, format_decimal(multiple * 100.0));
    }
    if let Some(indent) = paragraph.indentation() {
        let _ = write!(attrs, r#" fo:margin-left="{}""#, cm(indent));
    }
    if let Some(hanging) = paragraph.hanging_indent() {
        let _ = write!(attrs, r#" fo:text-indent="-{}""#, cm(hanging));
    }
    if paragraph.is_keep_next() {
        attrs.push_str(r#" fo:keep-with-next="always""#);
    }
    if paragraph.is_keep_lines() {
        attrs.push_str(r#" fo:keep-together="always""#);
    }
    match paragraph.widow_control_flag() {
        Some(true) => attrs.push_str(r#" fo:widows="2" fo:orphans="2""#),
        Some(false) => attrs.push_str(r#" fo:widows="0" fo:orphans="0""#),
        None => {},
    }
    if paragraph.is_page_break_before() {
        attrs.push_str(r#" fo:break-before="page""#);
    }
    attrs
}

/// `style:paragraph-properties` of a paragraph style, empty when nothing is
/// set.
pub(crate) fn paragraph_properties(paragraph: &ParagraphStyle) -> String {
    let attrs = paragraph_attributes(paragraph);
    if attrs.is_empty() {
        return String::new();
    }
    format!("<style:paragraph-properties{}/>", attrs)
}

/// `fo:border-*` value of a border side; size is in eighths of a point.
pub(crate) fn border(side: &BorderSide) -> String {
    let size = side.size.unwrap_or(4) as f64 / 8.0;
    format!(
        "{}pt solid #{}",
        format_decimal(size),
        escape_xml(side.color.as_deref().unwrap_or("000000"))
    )
}

fn write_named_style(xml: &mut String, name: &str, style: &NamedStyle) {
    let id = style_id(name);
    let (family, display, extra) = match style {
        NamedStyle::Font { paragraph: None, .. } | NamedStyle::Link(_) => (Family::Text, name.to_string(), String::new()),
        NamedStyle::Title { depth, .. } => (
            Family::Paragraph,
            format!("Heading {}", depth),
            format!(
                r#" style:parent-style-name="{}" style:default-outline-level="{}""#,
                STANDARD_STYLE, depth
            ),
        ),
        NamedStyle::Font { .. } | NamedStyle::Paragraph(_) => (
            Family::Paragraph,
            name.to_string(),
            format!(r#" style:parent-style-name="{}""#, STANDARD_STYLE),
        ),
        // Table formatting is written with each table
        NamedStyle::Table { .. } => return,
    };
    let _ = write!(
        xml,
        r#"<style:style style:name="{}" style:display-name="{}" style:family="{}"{}>"#,
        escape_xml(&id),
        escape_xml(&display),
        family.as_str(),
        extra
    );
    if let Some(paragraph) = style.paragraph() {
        xml.push_str(&paragraph_properties(paragraph));
    }
    if let Some(font) = style.font() {
        xml.push_str(&text_properties(font));
    }
    xml.push_str("</style:style>");
}

fn write_list_style(xml: &mut String, list_type: ListType) {
    let _ = write!(xml, r#"<text:list-style style:name="{}">"#, list_style_name(list_type));
    for level in 1..=9u32 {
        let indent = cm(360 * level);
        let properties = format!(
            concat!(
                r#"<style:list-level-properties text:list-level-position-and-space-mode="label-alignment">"#,
                r#"<style:list-level-label-alignment text:label-followed-by="listtab" "#,
                r#"text:list-tab-stop-position="{0}" fo:text-indent="-0.635cm" fo:margin-left="{0}"/>"#,
                r#"</style:list-level-properties>"#
            ),
            indent
        );
        let bullet = match list_type {
            ListType::SquareFilled => Some("\u{25AA}"),
            ListType::BulletFilled => Some("\u{2022}"),
            ListType::BulletEmpty => Some("\u{25E6}"),
            ListType::Number | ListType::NumberNested | ListType::AlphaNum => None,
        };
        match bullet {
            Some(bullet) => {
                let _ = write!(
                    xml,
                    r#"<text:list-level-style-bullet text:level="{}" text:bullet-char="{}">{}</text:list-level-style-bullet>"#,
                    level, bullet, properties
                );
            },
            None => {
                let format = match (list_type, level % 2) {
                    (ListType::AlphaNum, 0) => "a",
                    _ => "1",
                };
                let display = if list_type == ListType::NumberNested { level } else { 1 };
                let _ = write!(
                    xml,
                    r#"<text:list-level-style-number text:level="{}" style:num-suffix="." style:num-format="{}" text:display-levels="{}">{}</text:list-level-style-number>"#,
                    level, format, display, properties
                );
            },
        }
    }
    xml.push_str("</text:list-style>");
}

/// Name of the list style of a list type.
pub(crate) fn list_style_name(list_type: ListType) -> String {
    format!("L{}", list_type.num_id())
}

/// Write the `office:styles` element of `styles.xml`.
pub(crate) fn write_common_styles(xml: &mut String, styles: &StyleRegistry, settings: &Settings) {
    xml.push_str("<office:styles>");
    let font = escape_xml(&settings.default_font_name);
    let size = format_decimal(settings.default_font_size);
    let _ = write!(
        xml,
        concat!(
            r#"<style:default-style style:family="paragraph">"#,
            r#"<style:text-properties fo:font-family="{0}" style:font-family-asian="{0}" style:font-family-complex="{0}" "#,
            r#"fo:font-size="{1}pt" style:font-size-asian="{1}pt" style:font-size-complex="{1}pt"/>"#,
            r#"</style:default-style>"#
        ),
        font, size
    );
    let taken = |id: &str| styles.iter().any(|(name, _)| style_id(name) == id);
    if !taken(STANDARD_STYLE) {
        let _ = write!(
            xml,
            r#"<style:style style:name="{}" style:family="paragraph" style:class="text"/>"#,
            STANDARD_STYLE
        );
    }
    if !taken(FOOTNOTE_STYLE) {
        let _ = write!(
            xml,
            concat!(
                r#"<style:style style:name="{0}" style:family="paragraph" style:parent-style-name="{1}" style:class="extra">"#,
                r#"<style:paragraph-properties fo:margin-left="0.5cm" fo:text-indent="-0.5cm"/>"#,
                r#"<style:text-properties fo:font-size="10pt"/></style:style>"#
            ),
            FOOTNOTE_STYLE, STANDARD_STYLE
        );
    }
    for (name, style) in styles.iter() {
        write_named_style(xml, name, style);
    }
    for list_type in LIST_TYPES {
        write_list_style(xml, list_type);
    }
    xml.push_str("</office:styles>");
}
