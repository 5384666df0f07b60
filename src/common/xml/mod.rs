//! XML helpers shared by the package writers.

mod escape;

pub use escape::{escape_text, escape_xml};

/// XML declaration used at the top of every generated part.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
