//! Session tokens.
//!
//! Access tokens are HS256-signed JWTs that carry the user's email address and name and expire after
//! [`AuthConfig::access_token_ttl`]. Refresh tokens carry no identity and live longer. The [`TokenIssuer`] is the only
//! place where tokens are created or checked; handlers receive the validated [`JwtClaims`] as an extractor.
use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use jwt_compact::{
    alg::{Hs256, Hs256Key},
    AlgorithmExt,
    Claims,
    Header,
    TimeOptions,
    UntrustedToken,
};
use log::*;
use serde::{Deserialize, Serialize};
use shop_engine::db_types::{User, UserTokens};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

/// The identity encoded in an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for JwtClaims {
    fn from(user: &User) -> Self {
        Self { email: user.email.clone(), first_name: user.first_name.clone(), last_name: user.last_name.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RefreshClaims {}

pub struct TokenIssuer {
    key: Hs256Key,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: Hs256Key::new(config.jwt_secret.reveal().as_bytes()),
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
        }
    }

    /// Issues a fresh access and refresh token pair for the given identity.
    pub fn issue(&self, identity: JwtClaims) -> Result<UserTokens, AuthError> {
        let time_options = TimeOptions::default();
        let header = Header::empty().with_token_type("JWT");
        let claims = Claims::new(identity).set_duration_and_issuance(&time_options, self.access_ttl);
        let token =
            Hs256.token(&header, &claims, &self.key).map_err(|e| AuthError::CouldNotIssueToken(e.to_string()))?;
        let refresh = Claims::new(RefreshClaims {}).set_duration_and_issuance(&time_options, self.refresh_ttl);
        let refresh_token =
            Hs256.token(&header, &refresh, &self.key).map_err(|e| AuthError::CouldNotIssueToken(e.to_string()))?;
        Ok(UserTokens { token, refresh_token })
    }

    /// Checks the token's signature and expiry, and returns the identity it carries.
    pub fn validate(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let untrusted = UntrustedToken::new(token).map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
        let token = Hs256
            .validator::<JwtClaims>(&self.key)
            .validate(&untrusted)
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;
        token.claims().validate_expiration(&TimeOptions::default()).map_err(|e| {
            debug!("🔐️ Rejected access token for {}. {e}", token.claims().custom.email);
            AuthError::ValidationError(e.to_string())
        })?;
        let (_, claims) = token.into_parts();
        Ok(claims.custom)
    }
}

/// Reads the bearer token from the `Authorization` header. A bare token without the `Bearer` scheme is accepted too.
fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let header = req.headers().get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?.trim();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .app_data::<web::Data<TokenIssuer>>()
            .ok_or_else(|| ServerError::InitializeError("No token issuer has been configured".to_string()))
            .and_then(|issuer| {
                let token = bearer_token(req)?;
                Ok(issuer.validate(token)?)
            });
        if let Err(e) = &result {
            debug!("🔐️ Request to {} was not authorised. {e}", req.path());
        }
        ready(result)
    }
}
