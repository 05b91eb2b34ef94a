//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use chekscan_core::test_utils::MockReceiptServer;
use chekscan_core::{ReceiptScanner, ReceiptStore};

const RECEIPT_HTML: &str = r#"
    <html><body>
      <h3 style="font-weight: bold;">ShopCo</h3>
      <table>
        <tr><td><b>12345</b></td></tr>
        <tr><td><i>21.05.2024 14:30</i></td></tr>
        <tr class="products-row">
          <td>Bread Loaf</td>
          <td align="center">1</td>
          <td class="price-sum">5000</td>
        </tr>
        <tr class="products-row">
          <td>Cola 1.5L</td>
          <td align="center">2</td>
          <td class="price-sum">12000</td>
        </tr>
        <tr><td>Jami to`lov:</td><td>17000</td></tr>
      </table>
    </body></html>
"#;

fn setup_test_app() -> (Router, ReceiptStore) {
    let store = ReceiptStore::in_memory();
    let app = create_router_with_scanner(
        store.clone(),
        ReceiptScanner::default(),
        ServerConfig::default(),
    );
    (app, store)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ========== Receipt API Tests ==========

#[tokio::test]
async fn test_list_receipts_empty() {
    let (app, _store) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/receipts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["receipts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_receipt_success() {
    let server = MockReceiptServer::start(RECEIPT_HTML).await;
    let (app, store) = setup_test_app();

    let uri = format!("/api/fetch-receipt?url={}", server.check_url());
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["merchant_name"], "ShopCo");
    assert_eq!(json["data"]["receipt_number"], "12345");
    assert_eq!(json["data"]["date_time"], "21.05.2024 14:30");
    assert_eq!(json["data"]["total_text"], "17000");
    assert_eq!(json["data"]["id"], 1);

    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["category"], "bread");
    assert_eq!(items[1]["category"], "beverages");

    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_fetch_receipt_unreachable_url() {
    let (app, store) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/fetch-receipt?url=http://127.0.0.1:1/check")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Structured failure, not an HTTP error status
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("Failed to fetch"));
    assert!(json.get("data").is_none());

    // Nothing stored, no id consumed
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn test_fetch_receipt_missing_url_param() {
    let (app, _store) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/fetch-receipt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("url"));
}

#[tokio::test]
async fn test_delete_receipt_is_idempotent() {
    let server = MockReceiptServer::start(RECEIPT_HTML).await;
    let (app, store) = setup_test_app();

    let uri = format!("/api/fetch-receipt?url={}", server.check_url());
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(store.len(), 1);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/receipts/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = get_body_json(response).await;
        assert_eq!(json["success"], true);
    }

    // Deleting an id that never existed also reports success
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/receipts/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(store.len(), 0);
}

// ========== Statistics API Tests ==========

#[tokio::test]
async fn test_statistics_empty() {
    let (app, _store) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/statistics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["categories"].as_array().unwrap().is_empty());
    assert_eq!(json["grand_total"], 0.0);
    assert_eq!(json["receipt_count"], 0);
}

#[tokio::test]
async fn test_statistics_after_scan() {
    let server = MockReceiptServer::start(RECEIPT_HTML).await;
    let (app, _store) = setup_test_app();

    let uri = format!("/api/fetch-receipt?url={}", server.check_url());
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/statistics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["receipt_count"], 1);
    assert_eq!(json["grand_total"], 17000.0);

    let categories = json["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    // Beverages (12000) sorts above bread (5000)
    assert_eq!(categories[0]["category"], "beverages");
    assert_eq!(categories[0]["total_spend"], 12000.0);
    assert_eq!(categories[1]["category"], "bread");
    assert_eq!(categories[1]["items"][0]["receipt_number"], "12345");
}

// ========== Health / Page Tests ==========

#[tokio::test]
async fn test_health() {
    let (app, _store) = setup_test_app();

    for uri in ["/health", "/api/health"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = get_body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["receipts_count"], 0);
        assert_eq!(json["storage"], "memory");
    }
}

#[tokio::test]
async fn test_index_page_served() {
    let (app, _store) = setup_test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("chekscan"));
    assert!(html.contains("/api/receipts"));
}
