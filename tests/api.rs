//! End-to-end tests of the HTTP surface against the bundled dataset.

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use countries_api::http_server::{HttpServer, ServerConfig};
use countries_api::store::InMemoryStore;

fn dataset_path() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data/countries.json"))
}

fn app() -> Router {
    let store = InMemoryStore::load(dataset_path()).unwrap();
    HttpServer::with_config(ServerConfig::default(), Arc::new(store)).router()
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

fn names(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name_common"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_all_returns_envelope_with_default_includes() {
    let (status, body) = get(app(), "/all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["meta"],
        json!({ "total": 8, "page": 1, "limit": 10, "totalPages": 1 })
    );
    assert_eq!(body["data"].as_array().unwrap().len(), 8);

    let belgium = &body["data"][0];
    assert_eq!(belgium["cca3"], "BEL");
    assert_eq!(belgium["currencies"][0]["code"], "EUR");
    assert_eq!(belgium["capitals"], json!(["Brussels"]));
    assert!(belgium.get("borders").is_some());
    assert!(belgium.get("bordered_by").is_none());
}

#[tokio::test]
async fn test_all_with_fields_is_partial() {
    let (status, body) = get(app(), "/all?fields=cca2,name_common").await;

    assert_eq!(status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(body["data"][0], json!({ "cca2": "BE", "name_common": "Belgium" }));
}

#[tokio::test]
async fn test_unknown_fields_are_dropped() {
    let (status, body) = get(app(), "/all?fields=cca2,capital_city").await;

    assert_eq!(status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(body["data"][1], json!({ "cca2": "EC" }));
}

#[tokio::test]
async fn test_only_unknown_fields_is_rejected() {
    let (status, body) = get(app(), "/all?fields=bogus").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid fields requested." }));
}

#[tokio::test]
async fn test_empty_fields_means_default() {
    let (status, body) = get(app(), "/all?fields=").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"][0].get("timezones").is_some());
}

#[tokio::test]
async fn test_pagination() {
    let (status, body) = get(app(), "/all?page=2&limit=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["meta"],
        json!({ "total": 8, "page": 2, "limit": 3, "totalPages": 3 })
    );
    assert_eq!(names(&body), vec!["Germany", "Luxembourg", "Netherlands"]);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let (status, body) = get(app(), "/currency/EUR?page=4&limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_bad_pagination_is_rejected() {
    for uri in [
        "/all?limit=501",
        "/all?limit=0",
        "/all?page=0",
        "/all?page=two",
        "/all?limit=-5",
    ] {
        let (status, body) = get(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid parameter"));
    }
}

#[tokio::test]
async fn test_alpha_is_case_insensitive() {
    let (status, lower) = get(app(), "/alpha/us").await;
    let (_, upper) = get(app(), "/alpha/US").await;
    let (_, numeric) = get(app(), "/alpha/840").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(lower["cca3"], "USA");
    assert_eq!(lower, upper);
    assert_eq!(lower, numeric);
}

#[tokio::test]
async fn test_alpha_matches_cioc() {
    let (status, body) = get(app(), "/alpha/ger").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name_common"], "Germany");
}

#[tokio::test]
async fn test_alpha_not_found() {
    let (status, body) = get(app(), "/alpha/ZZ").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Country not found." }));
}

#[tokio::test]
async fn test_alpha_bordered_by() {
    let (status, body) = get(app(), "/alpha/FRA?fields=borders,bordered_by").await;

    assert_eq!(status, StatusCode::PARTIAL_CONTENT);
    let mut bordered_by: Vec<&str> = body["bordered_by"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    bordered_by.sort_unstable();
    assert_eq!(bordered_by, vec!["BEL", "CHE", "DEU", "LUX"]);
}

#[tokio::test]
async fn test_alpha_batch() {
    let (status, body) = get(app(), "/alpha?code=fr,DEU,756").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(names(&body), vec!["France", "Germany", "Switzerland"]);
}

#[tokio::test]
async fn test_alpha_batch_without_codes() {
    let (status, body) = get(app(), "/alpha").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing parameter: code" }));
}

#[tokio::test]
async fn test_name_lookup() {
    let (status, body) = get(app(), "/name/United%20States").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["cca2"], "US");

    let (status, body) = get(app(), "/name/Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Country not found.");
}

#[tokio::test]
async fn test_missing_path_parameters() {
    for (uri, param) in [
        ("/name/", "name"),
        ("/alpha/", "code"),
        ("/currency/", "currency"),
        ("/lang/", "language"),
        ("/capital/", "capital"),
    ] {
        let (status, body) = get(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], format!("Missing parameter: {}", param));
    }
}

#[tokio::test]
async fn test_currency_by_code_and_name() {
    let (status, body) = get(app(), "/currency/usd").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Ecuador", "United States"]);

    let (_, body) = get(app(), "/currency/franc").await;
    assert_eq!(names(&body), vec!["Switzerland"]);
}

#[tokio::test]
async fn test_currency_not_found() {
    let (status, body) = get(app(), "/currency/ZZZ").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Currency not found." }));

    // known currency that no country uses
    let (status, body) = get(app(), "/currency/XAU").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Country not found." }));
}

#[tokio::test]
async fn test_language_lookup() {
    let (status, body) = get(app(), "/lang/french?fields=cca3").await;

    assert_eq!(status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(body["meta"]["total"], 4);
    assert_eq!(
        body["data"],
        json!([{ "cca3": "BEL" }, { "cca3": "FRA" }, { "cca3": "LUX" }, { "cca3": "CHE" }])
    );

    let (_, body) = get(app(), "/lang/LTZ").await;
    assert_eq!(names(&body), vec!["Luxembourg"]);
}

#[tokio::test]
async fn test_language_not_found() {
    let (status, body) = get(app(), "/lang/klingon").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Language not found." }));

    let (status, body) = get(app(), "/lang/lat").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Country not found." }));
}

#[tokio::test]
async fn test_capital_lookup() {
    let (status, body) = get(app(), "/capital/paris").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cca2"], "FR");

    let (status, body) = get(app(), "/capital/washington,%20d.c.?fields=name_common").await;
    assert_eq!(status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(body, json!({ "name_common": "United States" }));

    let (status, body) = get(app(), "/capital/atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Country not found.");
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_metrics_count_responses() {
    let app = app();

    get(app.clone(), "/all").await;
    get(app.clone(), "/all?fields=cca2").await;
    get(app.clone(), "/alpha/ZZ").await;
    get(app.clone(), "/all?limit=9999").await;

    let (status, body) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    // the metrics request counts itself before it is answered
    assert_eq!(body["requests"], 5);
    assert_eq!(body["ok_responses"], 1);
    assert_eq!(body["partial_responses"], 1);
    assert_eq!(body["not_found"], 1);
    assert_eq!(body["client_errors"], 1);
    assert_eq!(body["store_queries"], 2 + 2 + 1);
    assert_eq!(
        body["dataset"],
        json!({ "countries": 8, "currencies": 4, "languages": 9 })
    );
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = get(app(), "/regions/europe").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found." }));
}

#[tokio::test]
async fn test_filtered_total_pages() {
    let (status, body) = get(app(), "/lang/french?limit=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["meta"],
        json!({ "total": 4, "page": 1, "limit": 3, "totalPages": 2 })
    );
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (_, body) = get(app(), "/lang/french?limit=3&page=2").await;
    assert_eq!(names(&body), vec!["Switzerland"]);
}

#[tokio::test]
async fn test_name_is_not_trimmed() {
    let (status, body) = get(app(), "/name/%20France%20").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Country not found." }));
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    for uri in ["/all?page=1&page=2", "/name/%FF", "/alpha/%FF", "/capital/%FF"] {
        let (status, body) = get(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(
            body["error"].as_str().unwrap().starts_with("Invalid parameter"),
            "{}",
            uri
        );
    }
}
