//! Open Packaging Conventions (OPC) building blocks for writing packages:
//! content types, relationship tables and the well-known URIs.
pub mod constants;
mod content_types;
mod rel;

pub use content_types::ContentTypes;
pub use rel::{Relationship, Relationships};
