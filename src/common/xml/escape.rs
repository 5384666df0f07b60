use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

const XML_ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use quillpack::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &XML_ENTITIES)
}

/// Escape character data for a text node.
///
/// Control characters that XML 1.0 forbids are dropped before escaping; tab,
/// line feed and carriage return are kept.
///
/// ```
/// use quillpack::common::xml::escape_text;
/// assert_eq!(escape_text("a\u{1}b < c"), "ab &lt; c");
/// ```
pub fn escape_text(s: &str) -> String {
    if s.chars().any(is_forbidden_char) {
        let cleaned: String = s.chars().filter(|c| !is_forbidden_char(*c)).collect();
        escape_xml(&cleaned)
    } else {
        escape_xml(s)
    }
}

#[inline]
fn is_forbidden_char(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}
