//! Structural checks on Bundle entries.

use crate::bundle::SearchBundle;
use crate::error::{ValidationResult, Violation};

/// Checks that every entry is a bare `GET` request with a URL.
///
/// The checks run in order over all entries: embedded resources first, then
/// request methods, then request URLs.
pub fn check(bundle: &SearchBundle) -> ValidationResult {
    let entries = bundle.entries();

    if entries.iter().any(|e| e.has_resource()) {
        return Err(Violation::EmbeddedResourceNotAllowed);
    }

    let get_count = entries
        .iter()
        .filter_map(|e| e.request.as_ref())
        .filter(|r| r.is_get())
        .count();
    if get_count != entries.len() {
        return Err(Violation::InvalidHttpMethod);
    }

    let url_count = entries
        .iter()
        .filter_map(|e| e.request.as_ref())
        .filter(|r| r.url().is_some())
        .count();
    if url_count != entries.len() {
        return Err(Violation::MissingRequestUrl);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{BundleEntry, BundleRequest};
    use serde_json::json;

    #[test]
    fn test_empty_bundle_passes() {
        assert!(check(&SearchBundle::default()).is_ok());
    }

    #[test]
    fn test_embedded_resource() {
        let bundle = SearchBundle::new(vec![
            BundleEntry::get("metadata"),
            BundleEntry::get("Patient?_summary=count")
                .with_resource(json!({ "resourceType": "Patient", "id": "1" })),
        ]);

        assert_eq!(check(&bundle), Err(Violation::EmbeddedResourceNotAllowed));
    }

    #[test]
    fn test_embedded_resource_checked_before_method() {
        let bundle = SearchBundle::new(vec![
            BundleEntry::request("POST", "Patient")
                .with_resource(json!({ "resourceType": "Patient" })),
        ]);

        assert_eq!(check(&bundle), Err(Violation::EmbeddedResourceNotAllowed));
    }

    #[test]
    fn test_non_get_method() {
        let bundle = SearchBundle::new(vec![
            BundleEntry::get("metadata"),
            BundleEntry::request("DELETE", "Patient"),
        ]);

        assert_eq!(check(&bundle), Err(Violation::InvalidHttpMethod));
    }

    #[test]
    fn test_missing_request_or_method() {
        let no_request = SearchBundle::new(vec![BundleEntry::default()]);
        assert_eq!(check(&no_request), Err(Violation::InvalidHttpMethod));

        let no_method = SearchBundle::new(vec![BundleEntry {
            resource: None,
            request: Some(BundleRequest {
                method: None,
                url: Some("metadata".to_string()),
            }),
        }]);
        assert_eq!(check(&no_method), Err(Violation::InvalidHttpMethod));
    }

    #[test]
    fn test_missing_url() {
        let bundle = SearchBundle::new(vec![
            BundleEntry::get("metadata"),
            BundleEntry {
                resource: None,
                request: Some(BundleRequest {
                    method: Some("GET".to_string()),
                    url: None,
                }),
            },
        ]);
        assert_eq!(check(&bundle), Err(Violation::MissingRequestUrl));

        let empty_url = SearchBundle::new(vec![BundleEntry::get("")]);
        assert_eq!(check(&empty_url), Err(Violation::MissingRequestUrl));
    }
}
