use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::{json, Value};
use shop_engine::{db_types::User, helpers::password::hash_password, UserAccountError};

use super::{
    helpers::{alice, alice_claims, get_auth_config, send_request, users_api},
    mocks::MockUserManager,
};
use crate::{
    auth::TokenIssuer,
    routes::{LoginRoute, SignupRoute},
};

fn signup_body() -> Value {
    json!({
        "first_name": "Alice",
        "last_name": "Liddell",
        "email": "alice@example.com",
        "phone": "5550100",
        "password": "wonderland"
    })
}

async fn signup(body: Value, users: MockUserManager) -> (StatusCode, String) {
    let req = TestRequest::post().uri("/users/signup").set_json(body);
    send_request(req, move |cfg| {
        cfg.service(SignupRoute::<MockUserManager>::new()).app_data(users_api(users));
    })
    .await
}

async fn login(email: &str, password: &str, users: MockUserManager) -> (StatusCode, String) {
    let req = TestRequest::post().uri("/users/login").set_json(json!({ "email": email, "password": password }));
    send_request(req, move |cfg| {
        cfg.service(LoginRoute::<MockUserManager>::new()).app_data(users_api(users));
    })
    .await
}

#[actix_web::test]
async fn signup_new_user() {
    let mut users = MockUserManager::new();
    users.expect_user_exists().times(1).returning(|_, _| Ok(false));
    users
        .expect_insert_user()
        .withf(|rec| {
            rec.email == "alice@example.com" &&
                rec.password_hash.starts_with("$argon2") &&
                !rec.password_hash.contains("wonderland") &&
                !rec.tokens.token.is_empty() &&
                !rec.tokens.refresh_token.is_empty()
        })
        .times(1)
        .returning(|rec| Ok(rec.id));
    let (status, body) = signup(signup_body(), users).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["message"], "Successfully signed up");
    assert!(body["user_id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[actix_web::test]
async fn signup_with_taken_email() {
    let mut users = MockUserManager::new();
    users.expect_user_exists().returning(|_, _| Ok(true));
    users.expect_insert_user().never();
    let (status, body) = signup(signup_body(), users).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"User with this email or phone already exists"}"#);
}

#[actix_web::test]
async fn signup_insert_race_is_reported_as_duplicate() {
    let mut users = MockUserManager::new();
    users.expect_user_exists().returning(|_, _| Ok(false));
    users.expect_insert_user().returning(|_| Err(UserAccountError::UserAlreadyExists));
    let (status, _) = signup(signup_body(), users).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn signup_with_invalid_details() {
    let mut body = signup_body();
    body["first_name"] = json!("A");
    let (status, body) = signup(body, MockUserManager::new()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("first_name must be between"), "was: {body}");

    let mut body = signup_body();
    body["email"] = json!("not an email");
    let (status, _) = signup(body, MockUserManager::new()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn signup_with_malformed_body() {
    let req = TestRequest::post()
        .uri("/users/signup")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"first_name\": ");
    let (status, body) = send_request(req, |cfg| {
        cfg.service(SignupRoute::<MockUserManager>::new()).app_data(users_api(MockUserManager::new()));
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Could not read request body"#), "was: {body}");
}

#[actix_web::test]
async fn login_issues_fresh_tokens() {
    let hash = hash_password("wonderland").unwrap();
    let mut users = MockUserManager::new();
    users.expect_fetch_user_by_email().returning(move |_| Ok(Some(alice(&hash))));
    users.expect_update_tokens().times(1).returning(|_, _| Ok(()));
    let (status, body) = login("alice@example.com", "wonderland", users).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(!body.contains("password"), "password hash leaked: {body}");
    let user: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(user["email"], "alice@example.com");
    let token = user["token"].as_str().expect("token is missing");
    let claims = TokenIssuer::new(&get_auth_config()).validate(token).unwrap();
    assert_eq!(claims, alice_claims());
    assert!(user["refresh_token"].as_str().is_some());
}

#[actix_web::test]
async fn login_with_wrong_password() {
    let hash = hash_password("wonderland").unwrap();
    let mut users = MockUserManager::new();
    users.expect_fetch_user_by_email().returning(move |_| Ok(Some(alice(&hash))));
    users.expect_update_tokens().never();
    let (status, body) = login("alice@example.com", "looking-glass", users).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. Login or password incorrect"}"#);
}

#[actix_web::test]
async fn login_with_unknown_email() {
    let mut users = MockUserManager::new();
    users.expect_fetch_user_by_email().returning(|_| Ok(None::<User>));
    let (status, body) = login("nobody@example.com", "wonderland", users).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. Login or password incorrect"}"#);
}
