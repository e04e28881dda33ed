//! # helios-search-gate - Federated FHIR Search Bundle Validation
//!
//! This crate checks Bundles of FHIR search requests received from another
//! organization before they are executed. Only coarse, aggregate queries
//! pass:
//!
//! - **No resources**: entries are bare `GET` requests with a URL
//! - **Resource type paths only**: `Condition`, never `Patient/123`
//! - **Counts only**: every search carries exactly one `_summary=count`
//! - **Whitelisted parameters**: see [`catalog::valid_search_params`]
//! - **Year-level dates**: date filters are `eq` plus a year, e.g. `eq2023`
//! - **System-level codes**: token filters name a code system only, e.g.
//!   `http://loinc.org|`
//!
//! The capability statement probe (`metadata`) is exempt from the query
//! rules. A Bundle is accepted or rejected as a whole; the first
//! [`Violation`] found is returned.
//!
//! ## Quick Start
//!
//! ```rust
//! use helios_search_gate::{SearchBundle, SearchBundleValidator, ViolationKind};
//!
//! let bundle = SearchBundle::from_json(r#"{
//!     "resourceType": "Bundle",
//!     "type": "batch",
//!     "entry": [
//!         { "request": { "method": "GET", "url": "Patient/123?_summary=count" } }
//!     ]
//! }"#).unwrap();
//!
//! let violation = SearchBundleValidator::new().validate(&bundle).unwrap_err();
//! assert_eq!(violation.kind(), ViolationKind::ForbiddenPath);
//! assert!(violation.to_string().contains("Patient/123"));
//! ```

pub mod bundle;
pub mod catalog;
pub mod config;
pub mod error;
pub mod query;
pub mod rules;
pub mod validator;

// Re-export main types
pub use bundle::{BundleEntry, BundleRequest, SearchBundle};
pub use config::{GateConfig, OutputFormat};
pub use error::{BundleError, GateError, Offender, ValidationResult, Violation, ViolationKind};
pub use query::ParsedRequest;
pub use validator::SearchBundleValidator;

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "helios_search_gate={},search_gate={}",
            level, level
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
