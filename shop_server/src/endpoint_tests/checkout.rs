use std::time::Duration;

use actix_web::{http::StatusCode, test::TestRequest, web};
use serde_json::Value;
use shop_engine::{db_types::OrderId, CheckoutApi, CheckoutError, CheckoutResult, StoreError};

use super::{
    helpers::{alice_id, alice_token, send_request, users_knowing_alice, with_token},
    mocks::{MockCheckoutManager, MockUserManager},
};
use crate::routes::{CartCheckoutRoute, InstantBuyRoute};

const PRODUCT_ID: &str = "d1b7f0c6-2a8e-4c51-9f3d-6e0a4b8c2d17";

async fn call(req: TestRequest, checkout: MockCheckoutManager) -> (StatusCode, String) {
    let req = with_token(req, &alice_token());
    send_request(req, move |cfg| {
        cfg.service(CartCheckoutRoute::<MockCheckoutManager, MockUserManager>::new())
            .service(InstantBuyRoute::<MockCheckoutManager, MockUserManager>::new())
            .app_data(web::Data::new(CheckoutApi::new(checkout)))
            .app_data(users_knowing_alice());
    })
    .await
}

#[actix_web::test]
async fn checkout_cart() {
    let order_id = OrderId::random();
    let expected = order_id.to_string();
    let mut checkout = MockCheckoutManager::new();
    checkout
        .expect_checkout_cart()
        .withf(|user| *user == alice_id())
        .times(1)
        .returning(move |_| Ok(CheckoutResult { order_id: order_id.clone(), total_price: 750.into() }));
    let (status, body) = call(TestRequest::get().uri("/cartcheckout"), checkout).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["order_id"], expected);
    assert_eq!(body["total_price"], 750);
}

#[actix_web::test]
async fn checkout_empty_cart() {
    let mut checkout = MockCheckoutManager::new();
    checkout.expect_checkout_cart().returning(|_| Err(CheckoutError::EmptyCart));
    let (status, body) = call(TestRequest::get().uri("/cartcheckout"), checkout).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"The cart is empty"}"#);
}

#[actix_web::test]
async fn checkout_when_the_store_is_slow() {
    let mut checkout = MockCheckoutManager::new();
    checkout
        .expect_checkout_cart()
        .returning(|_| Err(CheckoutError::Store(StoreError::Timeout(Duration::from_secs(10)))));
    let (status, body) = call(TestRequest::get().uri("/cartcheckout"), checkout).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"The service is temporarily unavailable. Please try again."}"#);
}

#[actix_web::test]
async fn checkout_store_failure_is_not_leaked() {
    let mut checkout = MockCheckoutManager::new();
    checkout
        .expect_checkout_cart()
        .returning(|_| Err(CheckoutError::Store(StoreError::Query("no such table: order_items".into()))));
    let (status, body) = call(TestRequest::get().uri("/cartcheckout"), checkout).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"An error occurred on the backend of the server."}"#);
}

#[actix_web::test]
async fn instant_buy() {
    let mut checkout = MockCheckoutManager::new();
    checkout
        .expect_instant_buy()
        .withf(|user, product| *user == alice_id() && product.as_str() == PRODUCT_ID)
        .times(1)
        .returning(|_, _| Ok(CheckoutResult { order_id: OrderId::random(), total_price: 250.into() }));
    let (status, body) = call(TestRequest::get().uri(&format!("/instantbuy?id={PRODUCT_ID}")), checkout).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["total_price"], 250);
}

#[actix_web::test]
async fn instant_buy_without_product() {
    let mut checkout = MockCheckoutManager::new();
    checkout.expect_instant_buy().never();
    let (status, body) = call(TestRequest::get().uri("/instantbuy"), checkout).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid request parameter: product id is empty"}"#);
}

#[actix_web::test]
async fn instant_buy_unknown_product() {
    let mut checkout = MockCheckoutManager::new();
    checkout.expect_instant_buy().returning(|_, _| Err(CheckoutError::ProductNotFound));
    let (status, _) = call(TestRequest::get().uri(&format!("/instantbuy?id={PRODUCT_ID}")), checkout).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
