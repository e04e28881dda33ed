//! Static catalogs consulted by the validation rules.
//!
//! All catalogs are process-wide constants. They are only ever used for
//! membership tests and read-only iteration.

use std::sync::LazyLock;

/// Path of the capability statement probe. Exempt from the query rules.
pub const METADATA_PATH: &str = "metadata";

/// The summary search parameter every resource search must carry.
pub const SUMMARY_PARAM: &str = "_summary";

/// The only accepted value of [`SUMMARY_PARAM`].
pub const SUMMARY_COUNT: &str = "count";

/// Prefix of an equality date filter.
pub const DATE_EQUALITY_PREFIX: &str = "eq";

/// Separator between system and code in a token value.
pub const TOKEN_SYSTEM_SEPARATOR: char = '|';

/// FHIR R4 (4.0.1) resource type names.
const R4_RESOURCE_TYPES: &[&str] = &[
    "Account",
    "ActivityDefinition",
    "AdverseEvent",
    "AllergyIntolerance",
    "Appointment",
    "AppointmentResponse",
    "AuditEvent",
    "Basic",
    "Binary",
    "BiologicallyDerivedProduct",
    "BodyStructure",
    "Bundle",
    "CapabilityStatement",
    "CarePlan",
    "CareTeam",
    "CatalogEntry",
    "ChargeItem",
    "ChargeItemDefinition",
    "Claim",
    "ClaimResponse",
    "ClinicalImpression",
    "CodeSystem",
    "Communication",
    "CommunicationRequest",
    "CompartmentDefinition",
    "Composition",
    "ConceptMap",
    "Condition",
    "Consent",
    "Contract",
    "Coverage",
    "CoverageEligibilityRequest",
    "CoverageEligibilityResponse",
    "DetectedIssue",
    "Device",
    "DeviceDefinition",
    "DeviceMetric",
    "DeviceRequest",
    "DeviceUseStatement",
    "DiagnosticReport",
    "DocumentManifest",
    "DocumentReference",
    "EffectEvidenceSynthesis",
    "Encounter",
    "Endpoint",
    "EnrollmentRequest",
    "EnrollmentResponse",
    "EpisodeOfCare",
    "EventDefinition",
    "Evidence",
    "EvidenceVariable",
    "ExampleScenario",
    "ExplanationOfBenefit",
    "FamilyMemberHistory",
    "Flag",
    "Goal",
    "GraphDefinition",
    "Group",
    "GuidanceResponse",
    "HealthcareService",
    "ImagingStudy",
    "Immunization",
    "ImmunizationEvaluation",
    "ImmunizationRecommendation",
    "ImplementationGuide",
    "InsurancePlan",
    "Invoice",
    "Library",
    "Linkage",
    "List",
    "Location",
    "Measure",
    "MeasureReport",
    "Media",
    "Medication",
    "MedicationAdministration",
    "MedicationDispense",
    "MedicationKnowledge",
    "MedicationRequest",
    "MedicationStatement",
    "MedicinalProduct",
    "MedicinalProductAuthorization",
    "MedicinalProductContraindication",
    "MedicinalProductIndication",
    "MedicinalProductIngredient",
    "MedicinalProductInteraction",
    "MedicinalProductManufactured",
    "MedicinalProductPackaged",
    "MedicinalProductPharmaceutical",
    "MedicinalProductUndesirableEffect",
    "MessageDefinition",
    "MessageHeader",
    "MolecularSequence",
    "NamingSystem",
    "NutritionOrder",
    "Observation",
    "ObservationDefinition",
    "OperationDefinition",
    "OperationOutcome",
    "Organization",
    "OrganizationAffiliation",
    "Parameters",
    "Patient",
    "PaymentNotice",
    "PaymentReconciliation",
    "Person",
    "PlanDefinition",
    "Practitioner",
    "PractitionerRole",
    "Procedure",
    "Provenance",
    "Questionnaire",
    "QuestionnaireResponse",
    "RelatedPerson",
    "RequestGroup",
    "ResearchDefinition",
    "ResearchElementDefinition",
    "ResearchStudy",
    "ResearchSubject",
    "RiskAssessment",
    "RiskEvidenceSynthesis",
    "Schedule",
    "SearchParameter",
    "ServiceRequest",
    "Slot",
    "Specimen",
    "SpecimenDefinition",
    "StructureDefinition",
    "StructureMap",
    "Subscription",
    "Substance",
    "SubstanceNucleicAcid",
    "SubstancePolymer",
    "SubstanceProtein",
    "SubstanceReferenceInformation",
    "SubstanceSourceMaterial",
    "SubstanceSpecification",
    "SupplyDelivery",
    "SupplyRequest",
    "Task",
    "TerminologyCapabilities",
    "TestReport",
    "TestScript",
    "ValueSet",
    "VerificationResult",
    "VisionPrescription",
];

/// Date-typed search parameters. Values must be `eq` plus a year.
pub const DATE_SEARCH_PARAMS: &[&str] = &[
    "date",
    "recorded-date",
    "onset-date",
    "effective",
    "effective-time",
    "authored",
    "collected",
    "issued",
    "period",
    "location-period",
    "occurrence",
];

/// Token-typed search parameters. Values must name a system only.
pub const TOKEN_SEARCH_PARAMS: &[&str] = &["code", "ingredient-code", "type"];

/// Remaining allowed search parameters.
pub const OTHER_SEARCH_PARAMS: &[&str] = &["_profile", "_summary"];

static VALID_SEARCH_PARAMS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    DATE_SEARCH_PARAMS
        .iter()
        .chain(TOKEN_SEARCH_PARAMS)
        .chain(OTHER_SEARCH_PARAMS)
        .copied()
        .collect()
});

/// A token parameter that may carry a specific code on one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenExemption {
    /// Base name of the token parameter.
    pub param: &'static str,
    /// Resource type the exemption applies to.
    pub resource_type: &'static str,
}

/// Token parameters allowed to carry a code, per resource type.
pub const TOKEN_EXEMPTIONS: &[TokenExemption] = &[TokenExemption {
    param: "type",
    resource_type: "Encounter",
}];

/// Returns the FHIR resource type names accepted as search paths.
pub fn resource_type_names() -> &'static [&'static str] {
    R4_RESOURCE_TYPES
}

/// Checks if a path names a FHIR resource type.
///
/// The comparison is exact and case-sensitive; `PatientX`, `patient` and
/// `Patient/123` are all rejected.
pub fn is_resource_type(path: &str) -> bool {
    R4_RESOURCE_TYPES.contains(&path)
}

/// Returns the full search parameter whitelist: date, token, then other
/// parameters, in catalog order.
pub fn valid_search_params() -> &'static [&'static str] {
    VALID_SEARCH_PARAMS.as_slice()
}

/// Checks if a parameter base name is whitelisted.
pub fn is_valid_search_param(base_name: &str) -> bool {
    VALID_SEARCH_PARAMS.iter().any(|p| *p == base_name)
}

/// Checks if a parameter base name is date-typed.
pub fn is_date_param(base_name: &str) -> bool {
    DATE_SEARCH_PARAMS.contains(&base_name)
}

/// Checks if a parameter base name is token-typed.
pub fn is_token_param(base_name: &str) -> bool {
    TOKEN_SEARCH_PARAMS.contains(&base_name)
}

/// Checks if a token parameter is exempt from the system-only requirement
/// on the given resource type.
pub fn is_token_exempt(base_name: &str, resource_type: &str) -> bool {
    TOKEN_EXEMPTIONS
        .iter()
        .any(|e| e.param == base_name && e.resource_type == resource_type)
}
