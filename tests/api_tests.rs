use std::path::Path;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use wayfarer_api::{
    config::Config,
    models::{ActivityScores, BudgetTier, MonthlyTemperatures},
    routes::{create_router, AppState},
    services::{Catalog, CatalogRecord},
};

fn warm_year() -> MonthlyTemperatures {
    let mut temps = MonthlyTemperatures::new();
    for month in 1..=12 {
        temps.insert(month, if (6..=8).contains(&month) { 27.0 } else { 17.0 });
    }
    temps
}

fn record(city: &str, country: &str, lat: f64, lon: f64, tier: BudgetTier) -> CatalogRecord {
    CatalogRecord {
        city: city.to_string(),
        country: country.to_string(),
        latitude: Some(lat),
        longitude: Some(lon),
        budget_tier: Some(tier),
        scores: ActivityScores::uniform(5.0),
        temperatures: warm_year(),
    }
}

fn test_catalog() -> Catalog {
    // 10,000 km east along the equator
    let far_lon = 10_000.0 / 6371.0_f64 * 180.0 / std::f64::consts::PI;
    Catalog::from_records(vec![
        record("Faraway", "Z", 0.0, far_lon, BudgetTier::Luxury),
        record("Hometown", "X", 0.0, 0.0, BudgetTier::Budget),
        record("Nearby", "X", 1.0, 1.0, BudgetTier::MidRange),
    ])
}

fn create_test_server_with_dist(dist: &Path) -> TestServer {
    let mut config = Config::from_vars(Vec::new()).unwrap();
    config.frontend_dist = dist.to_path_buf();
    let state = AppState::new(test_catalog(), &config);
    TestServer::new(create_router(state)).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with_dist(Path::new("/nonexistent/frontend/dist"))
}

fn at_origin(extra: Value) -> Value {
    let mut body = json!({
        "user_location": { "city": "Origin", "country": "X", "latitude": 0, "longitude": 0 }
    });
    if let (Some(target), Value::Object(fields)) = (body.as_object_mut(), extra) {
        target.extend(fields);
    }
    body
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_schema_hint() {
    let server = create_test_server();
    let response = server.get("/recommend").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["hint"], "POST JSON to this endpoint.");
    assert_eq!(body["schema"]["CLIMATE"], json!([0, 1, 2, 3]));
    assert_eq!(body["schema"]["DISTANCE"], json!([0, 1, 2, 3, 4]));
    assert_eq!(
        body["schema"]["VACATION_TIME"],
        json!(["Mar-May", "Jun-Aug", "Sep-Nov", "Dec-Feb"])
    );
    assert_eq!(body["schema"]["PREFERENCES"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_recommend_ranks_home_destination_first() {
    let server = create_test_server();
    let response = server.post("/recommend").json(&at_origin(json!({}))).await;
    response.assert_status_ok();

    let results: Vec<Value> = response.json();
    assert_eq!(results.len(), 3);

    let first = &results[0];
    assert_eq!(first["city"], "Hometown");
    assert_eq!(first["id"], 1);
    assert_eq!(first["distance_km"], 0.0);
    assert_eq!(first["flight_hours"], 1.0);
    assert_eq!(first["ticket_price"], 90.0);
    assert_eq!(first["budget_level"], 0);
    assert_eq!(first["domestic_intl"], "domestic");
    assert_eq!(first["Jun-Aug"], 3);
    assert_eq!(first["Mar-May"], 1);

    let last = &results[2];
    assert_eq!(last["city"], "Faraway");
    assert_eq!(last["domestic_intl"], "international");
    assert_eq!(last["final_cost_level"], 3);
}

#[tokio::test]
async fn test_distance_filter_excludes_long_haul() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&at_origin(json!({ "DISTANCE": [0] })))
        .await;
    response.assert_status_ok();

    let results: Vec<Value> = response.json();
    let cities: Vec<&str> = results.iter().map(|r| r["city"].as_str().unwrap()).collect();
    assert!(!cities.contains(&"Faraway"));
    assert_eq!(cities.len(), 2);
}

#[tokio::test]
async fn test_combined_filters() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&at_origin(json!({
            "VACATION_TIME": ["Jun-Aug"],
            "CLIMATE": [3],
            "COUNTRY": "international",
            "PREFERENCES": ["beach", "seclusion"],
            "DISTANCE": [4],
        })))
        .await;
    response.assert_status_ok();

    let results: Vec<Value> = response.json();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["city"], "Faraway");
    assert_eq!(results[0]["flight_hours"], 12.11);
}

#[tokio::test]
async fn test_out_of_domain_climate_is_rejected() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&at_origin(json!({ "CLIMATE": [5] })))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["field"], "CLIMATE");
    assert_eq!(body["allowed"], "[0, 1, 2, 3]");
    assert!(body["error"].as_str().unwrap().contains("CLIMATE"));
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let server = create_test_server();
    let response = server.post("/recommend").text("{not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid JSON");
}

#[tokio::test]
async fn test_body_is_parsed_regardless_of_content_type() {
    let server = create_test_server();
    let body = at_origin(json!({ "BUDGET": [1] })).to_string();
    let response = server.post("/recommend").text(body).await;
    response.assert_status_ok();

    let results: Vec<Value> = response.json();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["city"], "Hometown");
    assert_eq!(results[0]["final_cost_level"], 1);
}

#[tokio::test]
async fn test_missing_coordinates_is_server_error() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "user_location": { "country": "X" } }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("latitude"));
}

#[tokio::test]
async fn test_non_numeric_coordinate_is_server_error() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "user_location": { "country": "X", "latitude": true, "longitude": 0 } }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("user_location.latitude"));
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_missing_frontend_build() {
    let server = create_test_server();
    let response = server.get("/some/page").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["error"], "Frontend build not found");
    assert!(body["expected"].as_str().unwrap().ends_with("index.html"));
}

#[tokio::test]
async fn test_frontend_files_and_spa_fallback() {
    let dist = tempfile::tempdir().unwrap();
    std::fs::write(dist.path().join("index.html"), "<html>app</html>").unwrap();
    std::fs::create_dir(dist.path().join("assets")).unwrap();
    std::fs::write(dist.path().join("assets").join("main.js"), "console.log(1)").unwrap();

    let server = create_test_server_with_dist(dist.path());

    let asset = server.get("/assets/main.js").await;
    asset.assert_status_ok();
    asset.assert_text("console.log(1)");
    assert_eq!(
        asset.header("cache-control"),
        "no-cache, no-store, must-revalidate"
    );

    let route = server.get("/trips/42").await;
    route.assert_status_ok();
    route.assert_text("<html>app</html>");

    let info = server.get("/__dist_info").await;
    info.assert_status_ok();
    let body: Value = info.json();
    assert_eq!(body["index_html_exists"], true);
    assert_eq!(body["assets_dir_exists"], true);
    assert_eq!(body["assets_examples"], json!(["main.js"]));
}
