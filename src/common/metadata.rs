//! Document properties written into the package.
//!
//! DOCX stores these in `docProps/core.xml` and `docProps/app.xml`,
//! ODT stores them in `meta.xml`.
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Document metadata attached to a [`Document`](crate::document::Document).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document author/creator
    pub creator: Option<String>,
    /// Keywords associated with the document
    pub keywords: Option<String>,
    /// Document description/comments
    pub description: Option<String>,
    /// Last person to modify the document
    pub last_modified_by: Option<String>,
    /// Document category
    pub category: Option<String>,
    /// Company/organization
    pub company: Option<String>,
    /// Manager name
    pub manager: Option<String>,
    /// Creation date
    pub created: DateTime<Utc>,
    /// Last modification date
    pub modified: DateTime<Utc>,
}

impl Default for Metadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            title: None,
            subject: None,
            creator: None,
            keywords: None,
            description: None,
            last_modified_by: None,
            category: None,
            company: None,
            manager: None,
            created: now,
            modified: now,
        }
    }
}

impl Metadata {
    /// Check if any optional text property is set.
    pub fn has_data(&self) -> bool {
        self.title.is_some()
            || self.subject.is_some()
            || self.creator.is_some()
            || self.keywords.is_some()
            || self.description.is_some()
            || self.last_modified_by.is_some()
            || self.category.is_some()
            || self.company.is_some()
            || self.manager.is_some()
    }

    /// Creation timestamp in W3CDTF form (`2024-05-01T10:00:00Z`).
    pub fn created_w3c(&self) -> String {
        self.created.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Modification timestamp in W3CDTF form.
    pub fn modified_w3c(&self) -> String {
        self.modified.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metadata_has_data() {
        let empty_metadata = Metadata::default();
        assert!(!empty_metadata.has_data());

        let metadata_with_title = Metadata {
            title: Some("Report".to_string()),
            ..Default::default()
        };
        assert!(metadata_with_title.has_data());
    }

    #[test]
    fn test_w3c_timestamps() {
        let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let metadata = Metadata {
            created: stamp,
            modified: stamp,
            ..Default::default()
        };
        assert_eq!(metadata.created_w3c(), "2024-05-01T10:00:00Z");
        assert_eq!(metadata.modified_w3c(), "2024-05-01T10:00:00Z");
    }
}
