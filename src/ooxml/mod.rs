//! Office Open XML output.
//!
//! Packages follow the Open Packaging Conventions: a ZIP container with a
//! `[Content_Types].xml` part and `_rels` relationship tables, see [`opc`].
pub mod docx;
pub mod opc;
