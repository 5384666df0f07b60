//! ODF constants: MIME types, part paths and XML namespaces.

/// ODF specification version written into every part
pub const OFFICE_VERSION: &str = "1.2";

/// MIME type for OpenDocument Text (.odt)
pub const ODF_TEXT: &str = "application/vnd.oasis.opendocument.text";

/// Path to content.xml (main document content)
pub const ODF_CONTENT: &str = "content.xml";

/// Path to meta.xml (document metadata)
pub const ODF_META: &str = "meta.xml";

/// Path to settings.xml (application settings)
pub const ODF_SETTINGS: &str = "settings.xml";

/// Path to styles.xml (document styles)
pub const ODF_STYLES: &str = "styles.xml";

/// Path to manifest.xml (package manifest)
pub const ODF_MANIFEST: &str = "META-INF/manifest.xml";

/// Folder holding packaged pictures
pub const ODF_PICTURES: &str = "Pictures";

// ============================================================================
// NAMESPACES
// ============================================================================

pub const OFFICENS: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
pub const STYLENS: &str = "urn:oasis:names:tc:opendocument:xmlns:style:1.0";
pub const TEXTNS: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";
pub const TABLENS: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";
pub const DRAWNS: &str = "urn:oasis:names:tc:opendocument:xmlns:drawing:1.0";
pub const FONS: &str = "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0";
pub const XLINKNS: &str = "http://www.w3.org/1999/xlink";
pub const DCNS: &str = "http://purl.org/dc/elements/1.1/";
pub const METANS: &str = "urn:oasis:names:tc:opendocument:xmlns:meta:1.0";
pub const SVGNS: &str = "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0";
pub const CONFIGNS: &str = "urn:oasis:names:tc:opendocument:xmlns:config:1.0";
pub const MANIFESTNS: &str = "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0";

/// Prefix/URI pairs declared on the root of content.xml and styles.xml.
pub const DOCUMENT_NAMESPACES: [(&str, &str); 9] = [
    ("office", OFFICENS),
    ("style", STYLENS),
    ("text", TEXTNS),
    ("table", TABLENS),
    ("draw", DRAWNS),
    ("fo", FONS),
    ("xlink", XLINKNS),
    ("dc", DCNS),
    ("svg", SVGNS),
];
