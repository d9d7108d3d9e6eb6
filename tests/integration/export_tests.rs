//! Integration tests for the exporter
//!
//! These tests use wiremock to stand in for a FHIR server and run the full
//! metadata → count → paginate → append cycle end-to-end.

use fhir_walk::config::ExportConfig;
use fhir_walk::crawler::Exporter;
use fhir_walk::state::RunState;
use fhir_walk::{run_export, WalkError};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Matches requests without a query string (first pages, not count probes)
fn no_query(request: &Request) -> bool {
    request.url.query().is_none()
}

/// Builds a searchset Bundle of `resource_type` resources with the given ids
fn bundle(resource_type: &str, ids: &[&str], next: Option<&str>) -> Value {
    let mut link = vec![json!({
        "relation": "self",
        "url": format!("https://fhir.internal/fhir/{}", resource_type)
    })];
    if let Some(next) = next {
        link.push(json!({"relation": "next", "url": next}));
    }

    json!({
        "resourceType": "Bundle",
        "type": "searchset",
        "link": link,
        "entry": ids
            .iter()
            .map(|id| json!({
                "fullUrl": format!("https://fhir.internal/fhir/{}/{}", resource_type, id),
                "resource": {"resourceType": resource_type, "id": id}
            }))
            .collect::<Vec<_>>()
    })
}

async fn mount_metadata(server: &MockServer, types: &[&str]) {
    let resources: Vec<Value> = types.iter().map(|t| json!({"type": t})).collect();
    Mock::given(method("GET"))
        .and(path("/fhir/metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resourceType": "CapabilityStatement",
            "rest": [{"mode": "server", "resource": resources}]
        })))
        .mount(server)
        .await;
}

async fn mount_count(server: &MockServer, resource_type: &str, total: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/fhir/{}", resource_type)))
        .and(query_param("_summary", "count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "total": total
        })))
        .mount(server)
        .await;
}

/// Mounts a small server: Patient spans two pages, Encounter one, Observation is empty
async fn mount_fhir_server(server: &MockServer) {
    mount_metadata(server, &["Patient", "Observation", "Encounter"]).await;
    mount_count(server, "Patient", 3).await;
    mount_count(server, "Observation", 0).await;
    mount_count(server, "Encounter", 2).await;

    Mock::given(method("GET"))
        .and(path("/fhir/Patient"))
        .and(no_query)
        .respond_with(ResponseTemplate::new(200).set_body_json(bundle(
            "Patient",
            &["p1", "p2"],
            Some("https://fhir.internal/fhir/Patient?page=2"),
        )))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fhir/Patient"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bundle("Patient", &["p3"], None)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fhir/Encounter"))
        .and(no_query)
        .respond_with(
            ResponseTemplate::new(200).set_body_json(bundle("Encounter", &["e1", "e2"], None)),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fhir/Observation"))
        .and(no_query)
        .respond_with(ResponseTemplate::new(200).set_body_json(bundle("Observation", &[], None)))
        .expect(0)
        .mount(server)
        .await;
}

fn read_ids(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read output file")
        .lines()
        .map(|line| {
            let resource: Value = serde_json::from_str(line).expect("Line is not JSON");
            resource["id"].as_str().expect("Missing id").to_string()
        })
        .collect()
}

#[tokio::test]
async fn test_full_export() {
    let server = MockServer::start().await;
    mount_fhir_server(&server).await;

    let dir = TempDir::new().unwrap();
    let config = ExportConfig::new(&format!("{}/fhir", server.uri()), dir.path()).unwrap();
    let mut exporter = Exporter::new(config).unwrap();

    let summary = exporter.run().await.expect("Export failed");

    assert_eq!(exporter.state(), &RunState::Done);
    assert_eq!(
        read_ids(&dir.path().join("Patient.ndjson")),
        vec!["p1", "p2", "p3"]
    );
    assert_eq!(
        read_ids(&dir.path().join("Encounter.ndjson")),
        vec!["e1", "e2"]
    );
    assert!(!dir.path().join("Observation.ndjson").exists());

    assert_eq!(summary.total_reported(), 5);
    assert_eq!(summary.total_written(), 5);
    assert_eq!(summary.exported["Patient"].pages, 2);
    assert_eq!(summary.exported["Encounter"].pages, 1);
    assert_eq!(summary.skipped, vec!["Observation".to_string()]);
}

#[tokio::test]
async fn test_lines_are_verbatim_resources() {
    let server = MockServer::start().await;
    mount_metadata(&server, &["Patient"]).await;
    mount_count(&server, "Patient", 1).await;

    let resource = json!({
        "resourceType": "Patient",
        "id": "example",
        "meta": {"versionId": "1", "lastUpdated": "2024-01-01T00:00:00Z"},
        "name": [{"use": "official", "family": "Chalmers", "given": ["Peter", "James"]}],
        "extension": [{"url": "http://example.org/fhir/StructureDefinition/x", "valueString": "é ü"}]
    });
    Mock::given(method("GET"))
        .and(path("/fhir/Patient"))
        .and(no_query)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resourceType": "Bundle",
            "entry": [{"resource": resource.clone()}]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = ExportConfig::new(&format!("{}/fhir", server.uri()), dir.path()).unwrap();
    run_export(config).await.expect("Export failed");

    let content = std::fs::read_to_string(dir.path().join("Patient.ndjson")).unwrap();
    assert_eq!(content, format!("{}\n", serde_json::to_string(&resource).unwrap()));
}

#[tokio::test]
async fn test_second_run_appends_duplicates() {
    let server = MockServer::start().await;
    mount_fhir_server(&server).await;

    let dir = TempDir::new().unwrap();
    let base_url = format!("{}/fhir", server.uri());

    run_export(ExportConfig::new(&base_url, dir.path()).unwrap())
        .await
        .expect("First export failed");
    run_export(ExportConfig::new(&base_url, dir.path()).unwrap())
        .await
        .expect("Second export failed");

    assert_eq!(
        read_ids(&dir.path().join("Patient.ndjson")),
        vec!["p1", "p2", "p3", "p1", "p2", "p3"]
    );
    assert_eq!(
        read_ids(&dir.path().join("Encounter.ndjson")),
        vec!["e1", "e2", "e1", "e2"]
    );
}

#[tokio::test]
async fn test_failure_mid_pagination_keeps_written_pages() {
    let server = MockServer::start().await;
    mount_metadata(&server, &["Patient"]).await;
    mount_count(&server, "Patient", 4).await;

    Mock::given(method("GET"))
        .and(path("/fhir/Patient"))
        .and(no_query)
        .respond_with(ResponseTemplate::new(200).set_body_json(bundle(
            "Patient",
            &["p1", "p2"],
            Some("http://fhir.internal/fhir/Patient?page=2"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fhir/Patient"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = ExportConfig::new(&format!("{}/fhir", server.uri()), dir.path()).unwrap();
    let mut exporter = Exporter::new(config).unwrap();

    let result = exporter.run().await;

    assert!(matches!(result, Err(WalkError::Status { status: 500, .. })));
    assert_eq!(exporter.state(), &RunState::Failed);
    assert_eq!(
        read_ids(&dir.path().join("Patient.ndjson")),
        vec!["p1", "p2"]
    );
}

#[tokio::test]
async fn test_count_probe_failure_aborts_before_export() {
    let server = MockServer::start().await;
    mount_metadata(&server, &["Patient"]).await;

    Mock::given(method("GET"))
        .and(path("/fhir/Patient"))
        .and(query_param("_summary", "count"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fhir/Patient"))
        .and(no_query)
        .respond_with(ResponseTemplate::new(200).set_body_json(bundle("Patient", &["p1"], None)))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = ExportConfig::new(&format!("{}/fhir", server.uri()), dir.path()).unwrap();

    let result = run_export(config).await;

    assert!(matches!(result, Err(WalkError::Json { .. })));
    assert!(!dir.path().join("Patient.ndjson").exists());
}

#[tokio::test]
async fn test_export_count_may_differ_from_probe() {
    let server = MockServer::start().await;
    mount_metadata(&server, &["Condition"]).await;
    // Probed before a resource was added; the export does not re-check.
    mount_count(&server, "Condition", 1).await;

    Mock::given(method("GET"))
        .and(path("/fhir/Condition"))
        .and(no_query)
        .respond_with(
            ResponseTemplate::new(200).set_body_json(bundle("Condition", &["c1", "c2"], None)),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = ExportConfig::new(&format!("{}/fhir", server.uri()), dir.path()).unwrap();

    let summary = run_export(config).await.expect("Export failed");

    assert_eq!(summary.resource_counts["Condition"], 1);
    assert_eq!(summary.exported["Condition"].resources, 2);
}
