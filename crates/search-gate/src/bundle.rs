//! Search Bundle wire model.
//!
//! Only the members the gate inspects are modelled: each entry's embedded
//! resource (presence only) and its request method and URL. Everything else
//! in the Bundle is ignored.
//!
//! # Example
//!
//! ```rust
//! use helios_search_gate::bundle::SearchBundle;
//!
//! let bundle = SearchBundle::from_json(r#"{
//!     "resourceType": "Bundle",
//!     "type": "batch",
//!     "entry": [{ "request": { "method": "GET", "url": "metadata" } }]
//! }"#).unwrap();
//!
//! assert_eq!(bundle.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BundleError;

/// HTTP method required on every search request.
pub const HTTP_GET: &str = "GET";

/// The request descriptor of a Bundle entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleRequest {
    /// HTTP verb (`GET`, `POST`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Raw request URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl BundleRequest {
    /// Returns true if the method is exactly `GET`.
    pub fn is_get(&self) -> bool {
        self.method.as_deref() == Some(HTTP_GET)
    }

    /// Returns the URL if it is present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// A single Bundle entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    /// Embedded resource. Search Bundles must not carry any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,

    /// Request descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<BundleRequest>,
}

impl BundleEntry {
    /// Creates a `GET` entry for the given URL.
    pub fn get(url: impl Into<String>) -> Self {
        Self::request(HTTP_GET, url)
    }

    /// Creates an entry with the given method and URL.
    pub fn request(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            resource: None,
            request: Some(BundleRequest {
                method: Some(method.into()),
                url: Some(url.into()),
            }),
        }
    }

    /// Attaches an embedded resource to this entry.
    pub fn with_resource(mut self, resource: Value) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Returns true if the entry embeds a non-empty resource.
    pub fn has_resource(&self) -> bool {
        match &self.resource {
            None | Some(Value::Null) => false,
            Some(Value::Object(map)) => !map.is_empty(),
            Some(_) => true,
        }
    }
}

/// A batch of search requests, validated as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchBundle {
    #[serde(rename = "entry", default)]
    entries: Vec<BundleEntry>,
}

impl SearchBundle {
    /// Creates a Bundle from its entries.
    pub fn new(entries: Vec<BundleEntry>) -> Self {
        Self { entries }
    }

    /// Parses a FHIR JSON Bundle.
    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Extracts the entries from a FHIR JSON Bundle value.
    pub fn from_value(value: Value) -> Result<Self, BundleError> {
        let resource_type = value
            .get("resourceType")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        if resource_type != "Bundle" {
            return Err(BundleError::NotABundle {
                resource_type: resource_type.to_string(),
            });
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Returns the entries in Bundle order.
    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the Bundle has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<BundleEntry> for SearchBundle {
    fn from_iter<I: IntoIterator<Item = BundleEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let bundle = SearchBundle::from_value(json!({
            "resourceType": "Bundle",
            "type": "batch",
            "entry": [
                { "request": { "method": "GET", "url": "Condition?_summary=count" } },
                { "request": { "method": "GET", "url": "metadata" } }
            ]
        }))
        .unwrap();

        assert_eq!(bundle.len(), 2);
        assert!(bundle.entries()[0].request.as_ref().unwrap().is_get());
        assert_eq!(
            bundle.entries()[1].request.as_ref().unwrap().url(),
            Some("metadata")
        );
    }

    #[test]
    fn test_from_value_without_entries() {
        let bundle = SearchBundle::from_value(json!({
            "resourceType": "Bundle",
            "type": "batch"
        }))
        .unwrap();

        assert!(bundle.is_empty());
    }

    #[test]
    fn test_from_value_not_a_bundle() {
        let result = SearchBundle::from_value(json!({ "resourceType": "Patient" }));
        assert!(matches!(
            result,
            Err(BundleError::NotABundle { resource_type }) if resource_type == "Patient"
        ));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            SearchBundle::from_json("{ not json"),
            Err(BundleError::Json(_))
        ));
    }

    #[test]
    fn test_has_resource() {
        assert!(!BundleEntry::get("metadata").has_resource());
        assert!(
            !BundleEntry::get("metadata")
                .with_resource(json!({}))
                .has_resource()
        );
        assert!(
            BundleEntry::get("metadata")
                .with_resource(json!({ "resourceType": "Patient" }))
                .has_resource()
        );
    }

    #[test]
    fn test_request_helpers() {
        let request = BundleRequest {
            method: Some("get".to_string()),
            url: Some(String::new()),
        };
        assert!(!request.is_get());
        assert_eq!(request.url(), None);
    }
}
