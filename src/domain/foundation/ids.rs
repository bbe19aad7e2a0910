//! Strongly-typed identifier value objects.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for an uploaded dataset (assigned by the uploading client).
///
/// Keys the analysis context and chat history kept for that dataset. The
/// value is opaque to the server; only emptiness is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetId(String);

impl DatasetId {
    /// Creates a new DatasetId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("file_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_id_accepts_any_non_empty_value() {
        let id = DatasetId::new("upload-1724300000-abc").unwrap();
        assert_eq!(id.as_str(), "upload-1724300000-abc");
    }

    #[test]
    fn dataset_id_rejects_empty_string() {
        let result = DatasetId::new("");
        assert!(result.is_err());
    }

    #[test]
    fn dataset_id_displays_inner_value() {
        let id = DatasetId::new("wine-panel.csv").unwrap();
        assert_eq!(id.to_string(), "wine-panel.csv");
    }

    #[test]
    fn dataset_id_serializes_as_plain_string() {
        let id = DatasetId::new("ds-42").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ds-42\"");
    }
}
