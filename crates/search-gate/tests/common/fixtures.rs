//! Search Bundle fixtures.

use serde_json::{Value, json};

/// Builds a batch Bundle of `GET` requests for the given URLs.
pub fn search_bundle(urls: &[&str]) -> Value {
    let entries: Vec<Value> = urls
        .iter()
        .map(|url| json!({ "request": { "method": "GET", "url": url } }))
        .collect();
    bundle_with_entries(entries)
}

/// Builds a batch Bundle from raw entries.
pub fn bundle_with_entries(entries: Vec<Value>) -> Value {
    json!({
        "resourceType": "Bundle",
        "id": "search-bundle",
        "type": "batch",
        "entry": entries
    })
}

/// A Bundle the gate accepts, mirroring a typical report query set.
#[allow(dead_code)]
pub fn valid_report_bundle() -> Value {
    search_bundle(&[
        "metadata",
        "Patient?_summary=count",
        "Condition?_summary=count&code=http://fhir.de/CodeSystem/bfarm/icd-10-gm|&recorded-date=eq2023",
        "Observation?_summary=count&code=http://loinc.org|&date=eq2022",
        "Procedure?_summary=count&code=http://fhir.de/CodeSystem/bfarm/ops|&date=eq2021",
        "MedicationAdministration?_summary=count&effective-time=eq2020",
        "Medication?_summary=count&ingredient-code=http://fhir.de/CodeSystem/bfarm/atc|",
        "Specimen?_summary=count&collected=eq2019&_profile=https://www.medizininformatik-initiative.de/fhir/ext/modul-biobank/StructureDefinition/Specimen",
        "Encounter?_summary=count&type=http://fhir.de/CodeSystem/Kontaktebene|einrichtungskontakt&date=eq2023",
        "Consent?_summary=count&date=eq2023",
    ])
}
