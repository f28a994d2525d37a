//! End-to-end tests for the POI HTTP API over an in-memory store.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{Value, json};

use poi_lib::{NewPoi, Poi, PoiId, PoiPatch, PoiStore};
use poi_service::app;
use poi_service_shared::test_utils::{SEED_POIS, seeded_state, test_state};
use poi_service_shared::{AppState, PoiResponse, SearchResponse};

fn server(state: AppState) -> TestServer {
    TestServer::new(app(state, "/metrics")).expect("test server")
}

fn names(response: &SearchResponse) -> Vec<&str> {
    response.results.iter().map(|p| p.name.as_str()).collect()
}

async fn create(server: &TestServer, name: &str, x: f64, y: f64) -> i64 {
    let response = server
        .post("/api/v1/pois")
        .json(&json!({"name": name, "x": x, "y": y}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: PoiResponse = response.json();
    body.poi.expect("created poi").id
}

#[tokio::test]
async fn create_then_list_returns_bakery() {
    let server = server(test_state());

    let response = server
        .post("/api/v1/pois")
        .json(&json!({"name": "Bakery", "x": 23, "y": 42}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["poi"]["name"], "Bakery");
    assert!(body["poi"]["id"].as_i64().unwrap() > 0);

    let list: SearchResponse = server.get("/api/v1/pois").await.json();
    assert_eq!(list.results.len(), 1);
    assert_eq!(list.results[0].name, "Bakery");
    assert_eq!(list.results[0].x, 23.0);
    assert_eq!(list.results[0].y, 42.0);
}

#[tokio::test]
async fn list_serializes_coordinates_as_floats() {
    let server = server(test_state());
    create(&server, "Origin", 0.0, 0.0).await;

    let body: Value = server.get("/api/v1/pois").await.json();
    assert!(body["results"][0]["x"].is_f64());
    assert!(body["results"][0]["y"].is_f64());
}

#[tokio::test]
async fn list_empty_store() {
    let server = server(test_state());
    let response = server.get("/api/v1/pois").await;
    response.assert_status_ok();
    response.assert_json(&json!({"results": []}));
}

#[tokio::test]
async fn create_rejects_blank_name() {
    let server = server(test_state());
    let response = server
        .post("/api/v1/pois")
        .json(&json!({"name": "  ", "x": 1, "y": 2}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/invalid-request");
    assert!(body["detail"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn create_rejects_wrongly_typed_fields() {
    let server = server(test_state());
    let response = server
        .post("/api/v1/pois")
        .json(&json!({"name": "Teste", "x": "abc", "y": null}))
        .await;

    assert!(response.status_code().is_client_error());
    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/invalid-request");

    let list: SearchResponse = server.get("/api/v1/pois").await.json();
    assert!(list.results.is_empty());
}

#[tokio::test]
async fn create_rejects_missing_field() {
    let server = server(test_state());
    let response = server
        .post("/api/v1/pois")
        .json(&json!({"name": "No coordinates"}))
        .await;
    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn proximity_boundary_is_inclusive() {
    let server = server(test_state());
    create(&server, "A", 3.0, 4.0).await;
    create(&server, "B", 6.0, 8.0).await;

    let within_five: SearchResponse = server
        .post("/api/v1/pois/nearby")
        .json(&json!({"x": 0, "y": 0, "max_distance": 5}))
        .await
        .json();
    assert_eq!(names(&within_five), vec!["A"]);

    let within_less: SearchResponse = server
        .post("/api/v1/pois/nearby")
        .json(&json!({"x": 0, "y": 0, "max_distance": 4.9}))
        .await
        .json();
    assert!(within_less.results.is_empty());
}

#[tokio::test]
async fn proximity_over_seed_data() {
    let server = server(seeded_state());
    let response: SearchResponse = server
        .post("/api/v1/pois/nearby")
        .json(&json!({"x": 20, "y": 10, "max_distance": 10}))
        .await
        .json();

    assert_eq!(
        names(&response),
        vec!["Lanchonete", "Joalheria", "Pub", "Supermercado"]
    );
}

#[tokio::test]
async fn proximity_negative_distance_is_empty() {
    let server = server(seeded_state());
    let response = server
        .post("/api/v1/pois/nearby")
        .json(&json!({"x": 0, "y": 0, "max_distance": -10}))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"results": []}));
}

#[tokio::test]
async fn proximity_zero_distance_matches_exact_position() {
    let server = server(seeded_state());
    let response: SearchResponse = server
        .post("/api/v1/pois/nearby")
        .json(&json!({"x": 12, "y": 8, "max_distance": 0}))
        .await
        .json();
    assert_eq!(names(&response), vec!["Pub"]);
}

#[tokio::test]
async fn proximity_missing_field_is_rejected() {
    let server = server(seeded_state());
    let response = server
        .post("/api/v1/pois/nearby")
        .json(&json!({"x": 5, "y": 5}))
        .await;
    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn name_search_is_case_insensitive_substring() {
    let server = server(test_state());
    create(&server, "Padaria do Zé", 1.0, 1.0).await;
    create(&server, "Farmácia", 2.0, 2.0).await;

    for query in ["padaria", "PADARIA", "do zé", "Zé"] {
        let response: SearchResponse = server
            .get("/api/v1/pois/search")
            .add_query_param("name", query)
            .await
            .json();
        assert_eq!(names(&response), vec!["Padaria do Zé"], "query {query:?}");
    }

    let none: SearchResponse = server
        .get("/api/v1/pois/search")
        .add_query_param("name", "mercado")
        .await
        .json();
    assert!(none.results.is_empty());
}

#[tokio::test]
async fn name_search_empty_query_matches_all() {
    let server = server(seeded_state());
    let response: SearchResponse = server
        .get("/api/v1/pois/search")
        .add_query_param("name", "")
        .await
        .json();
    assert_eq!(response.results.len(), SEED_POIS.len());
}

#[tokio::test]
async fn name_search_requires_parameter() {
    let server = server(seeded_state());
    let response = server.get("/api/v1/pois/search").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_one_and_not_found() {
    let server = server(test_state());
    let id = create(&server, "Museum", 5.0, 5.0).await;

    let found = server.get(&format!("/api/v1/pois/{id}")).await;
    found.assert_status_ok();
    let body: PoiResponse = found.json();
    assert!(body.success);
    assert_eq!(body.poi.map(|p| p.name), Some("Museum".to_string()));

    let missing = server.get("/api/v1/pois/9999").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    let body: Value = missing.json();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("9999"));
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let server = server(test_state());
    let response = server.get("/api/v1/pois/abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/invalid-request");
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let server = server(test_state());
    let id = create(&server, "Old", 10.0, 20.0).await;

    let response = server
        .put(&format!("/api/v1/pois/{id}"))
        .json(&json!({"name": "New"}))
        .await;
    response.assert_status_ok();
    let body: PoiResponse = response.json();
    assert!(body.success);

    let poi = server
        .get(&format!("/api/v1/pois/{id}"))
        .await
        .json::<PoiResponse>()
        .poi
        .expect("poi");
    assert_eq!(poi.name, "New");
    assert_eq!(poi.x, 10.0);
    assert_eq!(poi.y, 20.0);
}

#[tokio::test]
async fn update_unknown_id_is_not_found_and_store_unchanged() {
    let server = server(seeded_state());
    let before: Value = server.get("/api/v1/pois").await.json();

    let response = server
        .put("/api/v1/pois/9999")
        .json(&json!({"name": "Ghost"}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], false);

    let after: Value = server.get("/api/v1/pois").await.json();
    assert_eq!(before, after);
}

#[tokio::test]
async fn update_with_blank_name_is_rejected() {
    let server = server(test_state());
    let id = create(&server, "Keep", 1.0, 1.0).await;

    let response = server
        .put(&format!("/api/v1/pois/{id}"))
        .json(&json!({"name": ""}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let poi = server
        .get(&format!("/api/v1/pois/{id}"))
        .await
        .json::<PoiResponse>()
        .poi
        .expect("poi");
    assert_eq!(poi.name, "Keep");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let server = server(test_state());
    let id = create(&server, "Temp", 0.0, 0.0).await;

    let first = server.delete(&format!("/api/v1/pois/{id}")).await;
    first.assert_status_ok();
    let body: Value = first.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted_id"], id);

    let second = server.delete(&format!("/api/v1/pois/{id}")).await;
    second.assert_status(StatusCode::NOT_FOUND);
    let body: Value = second.json();
    assert_eq!(body["success"], false);

    server.get(&format!("/api/v1/pois/{id}")).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_id_keeps_count() {
    let server = server(seeded_state());
    server
        .delete("/api/v1/pois/9999")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let list: SearchResponse = server.get("/api/v1/pois").await.json();
    assert_eq!(list.results.len(), SEED_POIS.len());
}

/// Store whose every call fails as if the disk had gone away.
struct UnavailableStore;

fn disk_gone<T>() -> poi_lib::Result<T> {
    Err(poi_lib::Error::Io(std::io::Error::other("disk gone")))
}

impl PoiStore for UnavailableStore {
    fn create(&self, _poi: &NewPoi) -> poi_lib::Result<Poi> {
        disk_gone()
    }

    fn get_all(&self) -> poi_lib::Result<Vec<Poi>> {
        disk_gone()
    }

    fn get(&self, _id: PoiId) -> poi_lib::Result<Option<Poi>> {
        disk_gone()
    }

    fn find_by_name(&self, _query: &str) -> poi_lib::Result<Vec<Poi>> {
        disk_gone()
    }

    fn update(&self, _id: PoiId, _patch: &PoiPatch) -> poi_lib::Result<Option<Poi>> {
        disk_gone()
    }

    fn delete(&self, _id: PoiId) -> poi_lib::Result<bool> {
        disk_gone()
    }

    fn count(&self) -> poi_lib::Result<usize> {
        disk_gone()
    }
}

fn assert_failed_mutation(body: &Value) {
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().expect("message");
    assert!(!message.is_empty());
    assert!(!message.contains("disk gone"));
    assert!(body.get("poi").is_none());
    assert!(body.get("deleted_id").is_none());
}

#[tokio::test]
async fn storage_failure_on_create_reports_failed_creation() {
    let server = server(AppState::from_store(UnavailableStore));

    let response = server
        .post("/api/v1/pois")
        .json(&json!({"name": "Bakery", "x": 23, "y": 42}))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_failed_mutation(&response.json());
}

#[tokio::test]
async fn storage_failure_on_update_and_delete_keeps_envelope() {
    let server = server(AppState::from_store(UnavailableStore));

    let updated = server.put("/api/v1/pois/1").json(&json!({"name": "New"})).await;
    updated.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_failed_mutation(&updated.json());

    let deleted = server.delete("/api/v1/pois/1").await;
    deleted.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_failed_mutation(&deleted.json());
}

#[tokio::test]
async fn invalid_create_against_failing_store_is_still_a_problem() {
    let server = server(AppState::from_store(UnavailableStore));

    let response = server
        .post("/api/v1/pois")
        .json(&json!({"name": "  ", "x": 1, "y": 2}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/invalid-request");
}

#[tokio::test]
async fn storage_failure_on_query_is_internal_error_problem() {
    let server = server(AppState::from_store(UnavailableStore));

    let response = server.get("/api/v1/pois").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/internal-error");
    assert!(!body["detail"].as_str().unwrap_or_default().contains("disk gone"));
}

#[tokio::test]
async fn request_id_is_echoed_and_used_as_problem_instance() {
    let server = server(test_state());
    let response = server
        .post("/api/v1/pois")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-abc"),
        )
        .json(&json!({"name": "", "x": 0, "y": 0}))
        .await;

    assert_eq!(response.header("x-request-id"), "req-abc");
    let body: Value = response.json();
    assert_eq!(body["instance"], "req-abc");
}

#[tokio::test]
async fn request_id_is_generated_when_missing() {
    let server = server(test_state());
    let response = server.get("/api/v1/pois").await;
    let id = response.header("x-request-id");
    assert_eq!(id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn health_endpoints() {
    let server = server(seeded_state());

    let live = server.get("/health/live").await;
    live.assert_status_ok();
    let body: Value = live.json();
    assert_eq!(body["status"], "ok");

    let ready = server.get("/health/ready").await;
    ready.assert_status_ok();
    let body: Value = ready.json();
    assert_eq!(body["pois_stored"], SEED_POIS.len());
}

#[tokio::test]
async fn metrics_endpoint_responds() {
    let server = server(test_state());
    let response = server.get("/metrics").await;
    response.assert_status_ok();
    assert!(response.text().starts_with('#') || response.text().is_empty());
}
