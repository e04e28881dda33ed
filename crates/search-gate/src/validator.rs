//! Search Bundle validator.
//!
//! Runs the rules in [`crate::rules`] as a fail-fast pipeline:
//!
//! 1. Structural checks on the Bundle entries.
//! 2. Decomposition of every request URL.
//! 3. Path classification of every request.
//! 4. Each request rule, in [`REQUEST_RULES`] order, over every
//!    non-metadata request.
//!
//! The first violation aborts validation. No partial results are kept.

use tracing::{debug, trace};

use crate::bundle::SearchBundle;
use crate::catalog;
use crate::error::{GateError, ValidationResult};
use crate::query::ParsedRequest;
use crate::rules::{self, REQUEST_RULES};

/// Validates search Bundles exchanged between organizations.
///
/// The validator holds no state; one instance may be shared freely across
/// threads and used for any number of Bundles.
///
/// # Example
///
/// ```rust
/// use helios_search_gate::{BundleEntry, SearchBundle, SearchBundleValidator};
///
/// let bundle = SearchBundle::new(vec![
///     BundleEntry::get("Condition?_summary=count&code=http://snomed.info/sct|&date=eq2022"),
///     BundleEntry::get("metadata"),
/// ]);
///
/// assert!(SearchBundleValidator::new().validate(&bundle).is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchBundleValidator;

impl SearchBundleValidator {
    /// Creates a validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a search Bundle as a whole.
    pub fn validate(&self, bundle: &SearchBundle) -> ValidationResult {
        debug!(entries = bundle.len(), "Validating search Bundle");

        rules::structural::check(bundle)?;

        // The structural check guarantees every entry has a request URL.
        let requests: Vec<ParsedRequest> = bundle
            .entries()
            .iter()
            .filter_map(|e| e.request.as_ref().and_then(|r| r.url()))
            .map(ParsedRequest::parse)
            .collect();

        rules::path::check(&requests)?;

        let searches: Vec<&ParsedRequest> =
            requests.iter().filter(|r| !r.is_metadata()).collect();
        for &(name, rule) in REQUEST_RULES {
            trace!(rule = name, requests = searches.len(), "Applying request rule");
            for request in searches.iter().copied() {
                rule(request)?;
            }
        }

        debug!(entries = bundle.len(), "Search Bundle is valid");
        Ok(())
    }

    /// Parses a FHIR JSON Bundle and validates it.
    pub fn validate_json(&self, json: &str) -> Result<(), GateError> {
        let bundle = SearchBundle::from_json(json)?;
        self.validate(&bundle)?;
        Ok(())
    }

    /// Returns the search parameter whitelist, for diagnostics.
    pub fn valid_search_params(&self) -> &'static [&'static str] {
        catalog::valid_search_params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::BundleEntry;
    use crate::error::{Violation, ViolationKind};

    fn validate(urls: &[&str]) -> ValidationResult {
        let bundle: SearchBundle = urls.iter().map(|u| BundleEntry::get(*u)).collect();
        SearchBundleValidator::new().validate(&bundle)
    }

    fn kind_of(urls: &[&str]) -> ViolationKind {
        validate(urls).unwrap_err().kind()
    }

    #[test]
    fn test_valid_bundle() {
        assert!(
            validate(&[
                "Condition?_summary=count&code=http://snomed|&date=eq2022",
                "metadata",
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_metadata_exempt_from_query_rules() {
        assert!(validate(&["metadata?foo=bar&date=2023"]).is_ok());
    }

    #[test]
    fn test_empty_bundle_is_valid() {
        assert!(validate(&[]).is_ok());
    }

    #[test]
    fn test_path_checked_before_query_rules() {
        // Second request misses _summary, but the first has a forbidden path
        assert_eq!(
            kind_of(&["Patient/123?_summary=count", "Condition"]),
            ViolationKind::ForbiddenPath
        );
    }

    #[test]
    fn test_rules_are_applied_rule_major() {
        // The first request has an unknown parameter, the second misses
        // _summary; the summary rule runs over all requests first.
        assert_eq!(
            kind_of(&["Condition?_summary=count&name=x", "Observation"]),
            ViolationKind::MissingSummaryParam
        );
    }

    #[test]
    fn test_whitelist_before_date_rule() {
        assert_eq!(
            kind_of(&["Condition?_summary=count&date=2023&subject=1"]),
            ViolationKind::InvalidSearchParam
        );
    }

    #[test]
    fn test_date_before_token_rule() {
        assert_eq!(
            kind_of(&["Condition?_summary=count&date=2023&code=http://snomed|1"]),
            ViolationKind::DateFilterNotEquality
        );
    }

    #[test]
    fn test_idempotent() {
        let bundle = SearchBundle::new(vec![BundleEntry::get(
            "Observation?_summary=count&code=http://loinc.org|1234",
        )]);
        let validator = SearchBundleValidator::new();

        let first = validator.validate(&bundle);
        let second = validator.validate(&bundle);
        assert_eq!(first, second);
        assert!(matches!(
            first,
            Err(Violation::TokenValueNotSystemOnly { .. })
        ));
    }

    #[test]
    fn test_validate_json() {
        let validator = SearchBundleValidator::new();
        let json = r#"{"resourceType":"Bundle","type":"batch","entry":[
            {"request":{"method":"GET","url":"Encounter?_summary=count&type=http://terminology|consult"}}
        ]}"#;
        assert!(validator.validate_json(json).is_ok());

        let err = validator.validate_json(r#"{"resourceType":"Patient"}"#);
        assert!(matches!(err, Err(GateError::Bundle(_))));
    }

    #[test]
    fn test_valid_search_params_accessor() {
        let params = SearchBundleValidator::new().valid_search_params();
        assert!(params.contains(&"_summary"));
        assert!(params.contains(&"location-period"));
    }

    #[test]
    fn test_validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchBundleValidator>();
    }
}
