//! WordprocessingML (`.docx`) output.
pub mod writer;

pub use writer::Word2007;
