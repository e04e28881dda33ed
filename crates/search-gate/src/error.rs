//! Error types for the search Bundle gate.
//!
//! A [`Violation`] is a rejection reason for a whole search Bundle. The
//! validator stops at the first one it finds, so callers always receive a
//! single violation per invocation.
//!
//! # Violation Mapping
//!
//! Violations render as FHIR OperationOutcome issues:
//!
//! | Violation | FHIR Issue Code |
//! |-----------|-----------------|
//! | EmbeddedResourceNotAllowed | forbidden |
//! | InvalidHttpMethod | forbidden |
//! | MissingRequestUrl | required |
//! | ForbiddenPath | forbidden |
//! | MissingSummaryParam | required |
//! | DuplicateSummaryParam | invalid |
//! | UnexpectedSummaryValue | invalid |
//! | InvalidSearchParam | not-supported |
//! | DateFilterNotEquality | invalid |
//! | DateValueNotYearOnly | invalid |
//! | TokenValueNotSystemOnly | invalid |

// Variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;

/// A single offending `(parameter, value)` pair reported by a value rule.
///
/// The parameter name is kept as it appeared in the query, modifier included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offender {
    pub param: String,
    pub value: String,
}

impl Offender {
    /// Creates a new offender pair.
    pub fn new(param: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Offender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.param, self.value)
    }
}

/// Wrapper that formats a list of offenders as `a:1,b:2`.
struct OffenderList<'a>(&'a [Offender]);

impl fmt::Display for OffenderList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, offender) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", offender)?;
        }
        Ok(())
    }
}

fn offender_list(offenders: &[Offender]) -> OffenderList<'_> {
    OffenderList(offenders)
}

/// Reasons a search Bundle is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("Search Bundle contains resources")]
    EmbeddedResourceNotAllowed,

    #[error("Search Bundle contains HTTP method other then GET")]
    InvalidHttpMethod,

    #[error("Search Bundle contains request without url")]
    MissingRequestUrl,

    #[error("Search Bundle contains request url with forbidden path - [{path}]")]
    ForbiddenPath { path: String },

    #[error("Search Bundle contains request url without _summary parameter")]
    MissingSummaryParam,

    #[error("Search Bundle contains request url with more than one _summary parameter")]
    DuplicateSummaryParam,

    #[error(
        "Search Bundle contains request url with unexpected _summary parameter value (expected: count, actual: {actual})"
    )]
    UnexpectedSummaryValue { actual: String },

    #[error(
        "Search Bundle contains invalid search params, only allowed search params are [{}]",
        .whitelist.join(", ")
    )]
    InvalidSearchParam { whitelist: Vec<String> },

    #[error(
        "Search Bundle contains date search params not starting with 'eq' - [{}]",
        offender_list(.offenders)
    )]
    DateFilterNotEquality { offenders: Vec<Offender> },

    #[error(
        "Search Bundle contains date search params not limited to a year - [{}]",
        offender_list(.offenders)
    )]
    DateValueNotYearOnly { offenders: Vec<Offender> },

    #[error(
        "Search Bundle contains code search params not limited to system - [{}]",
        offender_list(.offenders)
    )]
    TokenValueNotSystemOnly { offenders: Vec<Offender> },
}

/// Discriminant of a [`Violation`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    EmbeddedResourceNotAllowed,
    InvalidHttpMethod,
    MissingRequestUrl,
    ForbiddenPath,
    MissingSummaryParam,
    DuplicateSummaryParam,
    UnexpectedSummaryValue,
    InvalidSearchParam,
    DateFilterNotEquality,
    DateValueNotYearOnly,
    TokenValueNotSystemOnly,
}

impl ViolationKind {
    /// Returns a stable kebab-case code for logs and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::EmbeddedResourceNotAllowed => "embedded-resource-not-allowed",
            ViolationKind::InvalidHttpMethod => "invalid-http-method",
            ViolationKind::MissingRequestUrl => "missing-request-url",
            ViolationKind::ForbiddenPath => "forbidden-path",
            ViolationKind::MissingSummaryParam => "missing-summary-param",
            ViolationKind::DuplicateSummaryParam => "duplicate-summary-param",
            ViolationKind::UnexpectedSummaryValue => "unexpected-summary-value",
            ViolationKind::InvalidSearchParam => "invalid-search-param",
            ViolationKind::DateFilterNotEquality => "date-filter-not-equality",
            ViolationKind::DateValueNotYearOnly => "date-value-not-year-only",
            ViolationKind::TokenValueNotSystemOnly => "token-value-not-system-only",
        }
    }

    /// Returns the FHIR issue type code used in OperationOutcome rendering.
    pub fn issue_code(&self) -> &'static str {
        match self {
            ViolationKind::EmbeddedResourceNotAllowed
            | ViolationKind::InvalidHttpMethod
            | ViolationKind::ForbiddenPath => "forbidden",
            ViolationKind::MissingRequestUrl | ViolationKind::MissingSummaryParam => "required",
            ViolationKind::InvalidSearchParam => "not-supported",
            ViolationKind::DuplicateSummaryParam
            | ViolationKind::UnexpectedSummaryValue
            | ViolationKind::DateFilterNotEquality
            | ViolationKind::DateValueNotYearOnly
            | ViolationKind::TokenValueNotSystemOnly => "invalid",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Violation {
    /// Returns the kind of this violation.
    pub fn kind(&self) -> ViolationKind {
        match self {
            Violation::EmbeddedResourceNotAllowed => ViolationKind::EmbeddedResourceNotAllowed,
            Violation::InvalidHttpMethod => ViolationKind::InvalidHttpMethod,
            Violation::MissingRequestUrl => ViolationKind::MissingRequestUrl,
            Violation::ForbiddenPath { .. } => ViolationKind::ForbiddenPath,
            Violation::MissingSummaryParam => ViolationKind::MissingSummaryParam,
            Violation::DuplicateSummaryParam => ViolationKind::DuplicateSummaryParam,
            Violation::UnexpectedSummaryValue { .. } => ViolationKind::UnexpectedSummaryValue,
            Violation::InvalidSearchParam { .. } => ViolationKind::InvalidSearchParam,
            Violation::DateFilterNotEquality { .. } => ViolationKind::DateFilterNotEquality,
            Violation::DateValueNotYearOnly { .. } => ViolationKind::DateValueNotYearOnly,
            Violation::TokenValueNotSystemOnly { .. } => ViolationKind::TokenValueNotSystemOnly,
        }
    }

    /// Returns the offending `(parameter, value)` pairs, if this violation
    /// carries any.
    pub fn offenders(&self) -> &[Offender] {
        match self {
            Violation::DateFilterNotEquality { offenders }
            | Violation::DateValueNotYearOnly { offenders }
            | Violation::TokenValueNotSystemOnly { offenders } => offenders,
            _ => &[],
        }
    }

    /// Renders this violation as a FHIR OperationOutcome resource.
    pub fn to_operation_outcome(&self) -> serde_json::Value {
        let kind = self.kind();
        serde_json::json!({
            "resourceType": "OperationOutcome",
            "issue": [{
                "severity": "error",
                "code": kind.issue_code(),
                "details": {
                    "text": self.to_string()
                },
                "diagnostics": kind.as_str()
            }]
        })
    }
}

/// Errors raised while reading a search Bundle from its wire format.
#[derive(Error, Debug)]
pub enum BundleError {
    /// The payload is not valid JSON or does not match the Bundle shape.
    #[error("invalid Bundle JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is a FHIR resource other than a Bundle.
    #[error("expected resourceType Bundle, got {resource_type}")]
    NotABundle { resource_type: String },
}

/// The primary error type for the gate's convenience entry points.
#[derive(Error, Debug)]
pub enum GateError {
    /// The Bundle could not be read.
    #[error(transparent)]
    Bundle(#[from] BundleError),

    /// The Bundle was read but rejected.
    #[error(transparent)]
    Violation(#[from] Violation),
}

/// Result type alias for validation.
pub type ValidationResult = Result<(), Violation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_path_display() {
        let err = Violation::ForbiddenPath {
            path: "Patient/123".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Search Bundle contains request url with forbidden path - [Patient/123]"
        );
    }

    #[test]
    fn test_offender_list_display() {
        let err = Violation::DateFilterNotEquality {
            offenders: vec![Offender::new("date", "2023"), Offender::new("issued", "ge2020")],
        };
        assert!(err.to_string().ends_with("- [date:2023,issued:ge2020]"));
    }

    #[test]
    fn test_whitelist_display() {
        let err = Violation::InvalidSearchParam {
            whitelist: vec!["date".to_string(), "code".to_string()],
        };
        assert!(err.to_string().contains("[date, code]"));
    }

    #[test]
    fn test_kind_and_offenders() {
        let err = Violation::TokenValueNotSystemOnly {
            offenders: vec![Offender::new("code", "http://loinc.org|1234")],
        };
        assert_eq!(err.kind(), ViolationKind::TokenValueNotSystemOnly);
        assert_eq!(err.offenders().len(), 1);
        assert!(Violation::MissingSummaryParam.offenders().is_empty());
    }

    #[test]
    fn test_to_operation_outcome() {
        let outcome = Violation::InvalidHttpMethod.to_operation_outcome();
        assert_eq!(outcome["resourceType"], "OperationOutcome");
        assert_eq!(outcome["issue"][0]["severity"], "error");
        assert_eq!(outcome["issue"][0]["code"], "forbidden");
        assert_eq!(outcome["issue"][0]["diagnostics"], "invalid-http-method");
    }

    #[test]
    fn test_gate_error_transparent() {
        let err: GateError = Violation::MissingRequestUrl.into();
        assert_eq!(
            err.to_string(),
            "Search Bundle contains request without url"
        );
    }
}
