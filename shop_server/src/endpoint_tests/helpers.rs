use actix_web::{
    http::{header::AUTHORIZATION, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use chrono::Utc;
use log::debug;
use shop_common::Secret;
use shop_engine::{
    db_types::{User, UserId},
    UserAccountApi,
};

use super::mocks::MockUserManager;
use crate::{
    auth::{JwtClaims, TokenIssuer},
    config::AuthConfig,
    server::{json_config, query_config},
};

pub const ALICE_ID: &str = "0b5e1c2a-4f6d-4e8a-9b3c-7d2e1f0a5b6c";
pub const ALICE_EMAIL: &str = "alice@example.com";

// Creates a test `AuthConfig` for issuing tokens. DO NOT re-use this secret anywhere.
pub fn get_auth_config() -> AuthConfig {
    AuthConfig::new(Secret::new("endpoint tests only, not a real secret".to_string()), 1, 24)
}

pub fn alice_claims() -> JwtClaims {
    JwtClaims { email: ALICE_EMAIL.into(), first_name: "Alice".into(), last_name: "Liddell".into() }
}

pub fn alice_id() -> UserId {
    ALICE_ID.parse().expect("valid user id")
}

pub fn issue_token(claims: JwtClaims) -> String {
    TokenIssuer::new(&get_auth_config()).issue(claims).expect("Failed to sign token").token
}

pub fn alice_token() -> String {
    issue_token(alice_claims())
}

pub fn alice(password_hash: &str) -> User {
    let now = Utc::now();
    User {
        id: alice_id(),
        first_name: "Alice".into(),
        last_name: "Liddell".into(),
        email: ALICE_EMAIL.into(),
        phone: "5550100".into(),
        password_hash: password_hash.into(),
        token: None,
        refresh_token: None,
        created_at: now,
        updated_at: now,
    }
}

/// A user store that knows about Alice, and nobody else.
pub fn users_knowing_alice() -> web::Data<UserAccountApi<MockUserManager>> {
    let mut users = MockUserManager::new();
    users.expect_fetch_user_by_email().returning(|email| Ok((email == ALICE_EMAIL).then(|| alice("unused"))));
    users_api(users)
}

pub fn users_api(users: MockUserManager) -> web::Data<UserAccountApi<MockUserManager>> {
    web::Data::new(UserAccountApi::new(users))
}

pub fn with_token(req: TestRequest, token: &str) -> TestRequest {
    req.insert_header((AUTHORIZATION, format!("Bearer {token}")))
}

pub async fn send_request<F>(req: TestRequest, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let _ = env_logger::try_init().ok();
    let app = App::new()
        .app_data(web::Data::new(TokenIssuer::new(&get_auth_config())))
        .app_data(json_config())
        .app_data(query_config())
        .configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body)
}
