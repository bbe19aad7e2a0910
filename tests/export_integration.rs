//! Integration tests for the ANOVA workbook export endpoint.
//!
//! These tests verify the production round trip:
//! 1. A dataset is analyzed over HTTP
//! 2. The client echoes the analysis response back to the export endpoint
//! 3. The returned workbook carries the five sheets with the expected layout
//!
//! Uses in-memory adapters, so no external services are required.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use chemostats::adapters::http::{app, AnalysisAppState, AssistantAppState};
use chemostats::adapters::{InMemoryContextStore, OpenAIConfig, OpenAIProvider};

// =============================================================================
// Test Infrastructure
// =============================================================================

const BOUNDARY: &str = "export-boundary";

const TRIGGERED_CSV: &str = "Sample,Group,DATA,Lactate,Glucose,Ethanol\r\n\
    s1,A,,1.0,2.0,0.50\r\n\
    s2,A,,1.1,2.1,0.52\r\n\
    s3,A,,0.9,1.9,0.48\r\n\
    s4,B,,3.0,4.0,0.90\r\n\
    s5,B,,3.1,4.1,0.92\r\n\
    s6,B,,2.9,3.9,0.88\r\n";

fn test_app() -> Router {
    let assistant = AssistantAppState::new(
        Arc::new(OpenAIProvider::new(OpenAIConfig::new(""))),
        Arc::new(InMemoryContextStore::new()),
    );
    app(AnalysisAppState::default(), assistant)
}

fn multipart_request(uri: &str, csv: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"upload.csv\"\r\n\r\n\
         {csv}\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"class_column\"\r\n\r\n\
         Group\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
        csv = csv,
    );
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn export_request(payload: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/export/anova")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Runs the analysis and returns its JSON response body.
async fn analyze(router: &Router, csv: &str) -> Value {
    let response = router
        .clone()
        .oneshot(multipart_request("/api/analyze/anova", csv))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response_json(response).await
}

/// Analyzes `csv` and echoes the response into the export endpoint.
async fn export_workbook(csv: &str) -> Value {
    let router = test_app();
    let analysis = analyze(&router, csv).await;

    let response = router
        .clone()
        .oneshot(export_request(&analysis))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response_json(response).await
}

fn sheet_lines<'a>(workbook: &'a Value, index: usize) -> Vec<&'a str> {
    workbook["sheets"][index]["csv"]
        .as_str()
        .unwrap()
        .lines()
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn export_accepts_analyze_response_payload() {
    let workbook = export_workbook(TRIGGERED_CSV).await;

    assert_eq!(workbook["file_name"], "ANOVA_results");
    let names: Vec<&str> = workbook["sheets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "ANOVA_TABLE_KKH",
            "MULTICOMPARISON",
            "DATASET",
            "GLOBALSTATDATA",
            "GROUPSTATDATA"
        ]
    );
}

#[tokio::test]
async fn exported_anova_sheet_lists_each_variable() {
    let workbook = export_workbook(TRIGGERED_CSV).await;
    let lines = sheet_lines(&workbook, 0);

    assert_eq!(
        lines[0],
        "VariableIndex,Variable,P-Nominal,P_FDR,Effect size (%),F-stat"
    );
    assert_eq!(lines.len(), 4);
    for (i, variable) in ["Lactate", "Glucose", "Ethanol"].iter().enumerate() {
        let fields: Vec<&str> = lines[i + 1].split(',').collect();
        assert_eq!(fields[0], (i + 1).to_string());
        assert_eq!(fields[1], *variable);
        assert!(fields[2].parse::<f64>().unwrap() < 0.001);
    }
}

#[tokio::test]
async fn exported_multicomparison_sheet_tags_group_pairs() {
    let workbook = export_workbook(TRIGGERED_CSV).await;
    let lines = sheet_lines(&workbook, 1);

    assert_eq!(
        lines[0],
        "VariableIndex,Variable,GroupX,GroupY,P_Nominal,P_FDR,MeanDiff,T-stat"
    );
    // One pair per variable with two groups.
    assert_eq!(lines.len(), 4);
    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields[1], "Lactate");
    assert_eq!(fields[2], "1");
    assert_eq!(fields[3], "2");
    assert!((fields[6].parse::<f64>().unwrap() - (-2.0)).abs() < 1e-9);
}

#[tokio::test]
async fn exported_data_sheet_echoes_matrix() {
    let workbook = export_workbook(TRIGGERED_CSV).await;
    let lines = sheet_lines(&workbook, 2);

    assert_eq!(lines[0], ",Variable#,1,2,3");
    assert_eq!(lines[1], "Sample#,Design,Lactate,Glucose,Ethanol");
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[2], "1,1,1,2,0.5");
    assert_eq!(lines[7], "6,2,2.9,3.9,0.88");
}

#[tokio::test]
async fn exported_data_sheet_keeps_missing_cells_empty() {
    // s2's Ethanol reading is missing.
    let csv = "Sample,Group,DATA,Lactate,Glucose,Ethanol\r\n\
        s1,A,,1.0,2.0,0.50\r\n\
        s2,A,,1.1,2.1,\r\n\
        s3,A,,0.9,1.9,0.48\r\n\
        s4,B,,3.0,4.0,0.90\r\n\
        s5,B,,3.1,4.1,0.92\r\n\
        s6,B,,2.9,3.9,0.88\r\n";
    let workbook = export_workbook(csv).await;
    let lines = sheet_lines(&workbook, 2);

    assert_eq!(lines[3], "2,1,1.1,2.1,");
}

#[tokio::test]
async fn exported_stat_sheets_cover_groups_and_metrics() {
    let workbook = export_workbook(TRIGGERED_CSV).await;

    let global = sheet_lines(&workbook, 3);
    assert_eq!(global[0], "Variable,RSD,STD,MEAN,RANGE,MIN,MAX");
    assert_eq!(global.len(), 4);
    // Lactate's global mean over both groups is 2.
    let fields: Vec<&str> = global[1].split(',').collect();
    assert_eq!(fields[0], "Lactate");
    assert!((fields[3].parse::<f64>().unwrap() - 2.0).abs() < 1e-9);

    let group = sheet_lines(&workbook, 4);
    assert!(group[0].contains("Group1-RSD"));
    assert!(group[0].contains("Group2-MAX"));
    assert_eq!(group.len(), 4);
}

#[tokio::test]
async fn export_rejects_incomplete_payload() {
    let response = test_app()
        .oneshot(export_request(&json!({"results": []})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Missing required fields:"));
    assert!(body["message"].as_str().unwrap().contains("classes"));
}

#[tokio::test]
async fn export_rejects_mistyped_payload() {
    let payload = json!({
        "results": [],
        "multicomparison": [],
        "global_stats": {"variables": [], "RSD": [], "STD": [], "MEAN": [], "RANGE": [], "MIN": [], "MAX": []},
        "group_stats": {},
        "original_data": [],
        "classes": "not-a-list",
        "variable_names": []
    });
    let response = test_app()
        .oneshot(export_request(&payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error_code"], "INVALID_FORMAT");
}
