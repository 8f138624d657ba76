use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::{json, Value};
use shop_engine::{
    db_types::{Product, ProductId},
    CatalogApi,
    CatalogError,
    StoreError,
};

use super::{helpers::send_request, mocks::MockCatalogManager};
use crate::routes::{AddProductRoute, ProductViewRoute, SearchProductRoute};

fn apple() -> Product {
    Product {
        id: "d1b7f0c6-2a8e-4c51-9f3d-6e0a4b8c2d17".parse().unwrap(),
        name: "Apple".into(),
        price: 250.into(),
        rating: Some(4),
        image: None,
    }
}

async fn call(req: TestRequest, catalog: MockCatalogManager) -> (StatusCode, String) {
    send_request(req, move |cfg| {
        cfg.service(AddProductRoute::<MockCatalogManager>::new())
            .service(ProductViewRoute::<MockCatalogManager>::new())
            .service(SearchProductRoute::<MockCatalogManager>::new())
            .app_data(actix_web::web::Data::new(CatalogApi::new(catalog)));
    })
    .await
}

#[actix_web::test]
async fn add_product() {
    let mut catalog = MockCatalogManager::new();
    catalog
        .expect_insert_product()
        .withf(|p| p.name == "Apple" && p.price.value() == 250)
        .times(1)
        .returning(|_| Ok(ProductId::random()));
    let req = TestRequest::post().uri("/admin/addproduct").set_json(json!({ "product_name": "Apple", "price": 250 }));
    let (status, body) = call(req, catalog).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["product_id"].is_string());
}

#[actix_web::test]
async fn add_product_without_name() {
    let mut catalog = MockCatalogManager::new();
    catalog.expect_insert_product().never();
    let req = TestRequest::post().uri("/admin/addproduct").set_json(json!({ "product_name": " ", "price": 250 }));
    let (status, body) = call(req, catalog).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"product_name is required"}"#);
}

#[actix_web::test]
async fn add_product_with_negative_price() {
    let req = TestRequest::post().uri("/admin/addproduct").set_json(json!({ "product_name": "Apple", "price": -1 }));
    let (status, _) = call(req, MockCatalogManager::new()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn add_product_with_unstorable_price() {
    let mut catalog = MockCatalogManager::new();
    catalog.expect_insert_product().never();
    let req = TestRequest::post()
        .uri("/admin/addproduct")
        .set_json(json!({ "product_name": "Yacht", "price": 9_223_372_036_854_775_808u64 }));
    let (status, body) = call(req, catalog).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"price must not exceed 9223372036854775807"}"#);
}

#[actix_web::test]
async fn view_products() {
    let mut catalog = MockCatalogManager::new();
    catalog.expect_fetch_products().returning(|| Ok(vec![apple()]));
    let (status, body) = call(TestRequest::get().uri("/users/productview"), catalog).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["products"][0]["product_name"], "Apple");
    assert_eq!(body["products"][0]["price"], 250);
}

#[actix_web::test]
async fn search_trims_the_query() {
    let mut catalog = MockCatalogManager::new();
    catalog.expect_search_products().withf(|name| name == "app").times(1).returning(|_| Ok(vec![apple()]));
    let (status, body) = call(TestRequest::get().uri("/users/search?name=%20app%20"), catalog).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Apple"));
}

#[actix_web::test]
async fn search_without_a_query() {
    for uri in ["/users/search", "/users/search?name=", "/users/search?name=%20"] {
        let mut catalog = MockCatalogManager::new();
        catalog.expect_search_products().never();
        let (status, body) = call(TestRequest::get().uri(uri), catalog).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, r#"{"error":"search query is required"}"#);
    }
}

#[actix_web::test]
async fn catalog_outage() {
    let mut catalog = MockCatalogManager::new();
    catalog
        .expect_fetch_products()
        .returning(|| Err(CatalogError::Store(StoreError::Unavailable("database is locked".into()))));
    let (status, body) = call(TestRequest::get().uri("/users/productview"), catalog).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("locked"));
}
