use actix_web::{http::StatusCode, test::TestRequest, web};
use chrono::Utc;
use serde_json::Value;
use shop_engine::{db_types::CartItem, CartApi, CartError};

use super::{
    helpers::{alice_id, alice_token, issue_token, send_request, users_knowing_alice, with_token},
    mocks::{MockCartManager, MockUserManager},
};
use crate::{
    auth::JwtClaims,
    routes::{AddToCartRoute, ListCartRoute, RemoveItemRoute},
};

const PRODUCT_ID: &str = "d1b7f0c6-2a8e-4c51-9f3d-6e0a4b8c2d17";

async fn call(req: TestRequest, cart: MockCartManager) -> (StatusCode, String) {
    send_request(req, move |cfg| {
        cfg.service(AddToCartRoute::<MockCartManager, MockUserManager>::new())
            .service(RemoveItemRoute::<MockCartManager, MockUserManager>::new())
            .service(ListCartRoute::<MockCartManager, MockUserManager>::new())
            .app_data(web::Data::new(CartApi::new(cart)))
            .app_data(users_knowing_alice());
    })
    .await
}

fn line(name: &str, price: u64, quantity: u32) -> CartItem {
    let now = Utc::now();
    CartItem {
        product_id: shop_engine::db_types::ProductId::random(),
        product_name: name.into(),
        price: price.into(),
        rating: None,
        image: None,
        quantity,
        created_at: now,
        updated_at: now,
    }
}

#[actix_web::test]
async fn add_to_cart_without_token() {
    let mut cart = MockCartManager::new();
    cart.expect_add_or_increment().never();
    let (status, body) = call(TestRequest::get().uri(&format!("/addtocart?id={PRODUCT_ID}")), cart).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. No authorization token was provided."}"#);
}

#[actix_web::test]
async fn add_to_cart_with_tampered_token() {
    let mut token = alice_token();
    token.replace_range(token.len() - 10..token.len() - 5, "00000");
    let req = with_token(TestRequest::get().uri(&format!("/addtocart?id={PRODUCT_ID}")), &token);
    let (status, body) = call(req, MockCartManager::new()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Login token signature is invalid"), "was: {body}");
}

#[actix_web::test]
async fn add_to_cart_for_deleted_account() {
    let token = issue_token(JwtClaims {
        email: "ghost@example.com".into(),
        first_name: "Casper".into(),
        last_name: "Ghost".into(),
    });
    let req = with_token(TestRequest::get().uri(&format!("/addtocart?id={PRODUCT_ID}")), &token);
    let (status, _) = call(req, MockCartManager::new()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn add_to_cart() {
    let mut cart = MockCartManager::new();
    cart.expect_add_or_increment()
        .withf(|user, product| *user == alice_id() && product.as_str() == PRODUCT_ID)
        .times(1)
        .returning(|_, _| Ok(2));
    let req = with_token(TestRequest::get().uri(&format!("/addtocart?id={PRODUCT_ID}")), &alice_token());
    let (status, body) = call(req, cart).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["quantity"], 2);
    assert_eq!(body["message"], "Successfully added to the cart");
}

#[actix_web::test]
async fn add_to_cart_with_bad_id() {
    for uri in ["/addtocart", "/addtocart?id=", "/addtocart?id=42"] {
        let mut cart = MockCartManager::new();
        cart.expect_add_or_increment().never();
        let (status, body) = call(with_token(TestRequest::get().uri(uri), &alice_token()), cart).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}: {body}");
        assert!(body.contains("product id is"), "{uri}: {body}");
    }
}

#[actix_web::test]
async fn add_unknown_product_to_cart() {
    let mut cart = MockCartManager::new();
    cart.expect_add_or_increment().returning(|_, _| Err(CartError::ProductNotFound));
    let req = with_token(TestRequest::get().uri(&format!("/addtocart?id={PRODUCT_ID}")), &alice_token());
    let (status, body) = call(req, cart).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Product not found"}"#);
}

#[actix_web::test]
async fn remove_item() {
    let mut cart = MockCartManager::new();
    cart.expect_remove_line().times(1).returning(|_, _| Ok(()));
    let req = with_token(TestRequest::get().uri(&format!("/removeitem?id={PRODUCT_ID}")), &alice_token());
    let (status, body) = call(req, cart).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"message":"Successfully removed item from cart"}"#);
}

#[actix_web::test]
async fn remove_item_not_in_cart() {
    let mut cart = MockCartManager::new();
    cart.expect_remove_line().returning(|_, _| Err(CartError::LineNotFound));
    let req = with_token(TestRequest::get().uri(&format!("/removeitem?id={PRODUCT_ID}")), &alice_token());
    let (status, body) = call(req, cart).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Item is not in the cart"}"#);
}

#[actix_web::test]
async fn list_cart_totals_current_prices() {
    let mut cart = MockCartManager::new();
    cart.expect_fetch_cart()
        .withf(|user| *user == alice_id())
        .returning(|_| Ok(vec![line("Apple", 250, 2), line("Pear", 125, 2)]));
    let (status, body) = call(with_token(TestRequest::get().uri("/listcart"), &alice_token()), cart).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["total_price"], 750);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn list_cart_that_overflows() {
    let mut cart = MockCartManager::new();
    cart.expect_fetch_cart().returning(|_| Ok(vec![line("Yacht", u64::MAX, 2)]));
    let (status, body) = call(with_token(TestRequest::get().uri("/listcart"), &alice_token()), cart).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"The order total is too large to be processed."}"#);
}
