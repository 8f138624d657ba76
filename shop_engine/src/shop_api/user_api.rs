use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::UserManagement,
    db_types::{NewUser, NewUserRecord, User, UserId, UserTokens},
    helpers::{password, validate_new_user},
    shop_api::errors::UserAccountError,
};

/// Signup, login and session token bookkeeping.
///
/// Password hashing is CPU-bound, so it is moved off the async executor with `spawn_blocking`.
pub struct UserAccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for UserAccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UserAccountApi ({:?})", self.db)
    }
}

impl<B> UserAccountApi<B>
where B: UserManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Validates the signup details and stores a new user with the given session tokens.
    pub async fn register(&self, user: NewUser, tokens: UserTokens) -> Result<UserId, UserAccountError> {
        validate_new_user(&user).map_err(UserAccountError::Validation)?;
        if self.db.user_exists(&user.email, &user.phone).await? {
            debug!("👤️ Signup rejected. Email or phone is already registered");
            return Err(UserAccountError::UserAlreadyExists);
        }
        let NewUser { first_name, last_name, email, phone, password } = user;
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(|e| UserAccountError::PasswordHashError(e.to_string()))?
            .map_err(|e| UserAccountError::PasswordHashError(e.to_string()))?;
        let record = NewUserRecord { id: UserId::random(), first_name, last_name, email, phone, password_hash, tokens };
        let id = self.db.insert_user(record).await?;
        info!("👤️ New user {id} registered");
        Ok(id)
    }

    /// Checks the email and password. Every failure, including an unknown email, is reported as
    /// [`UserAccountError::InvalidCredentials`].
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserAccountError> {
        let user = self.db.fetch_user_by_email(email).await?.ok_or_else(|| {
            debug!("👤️ Login attempt for unknown email");
            UserAccountError::InvalidCredentials
        })?;
        let credential = user.password_hash.clone();
        let attempt = password.to_string();
        let matches = tokio::task::spawn_blocking(move || password::verify_password(&credential, &attempt))
            .await
            .map_err(|e| UserAccountError::PasswordHashError(e.to_string()))?;
        if !matches {
            debug!("👤️ Incorrect password for user {}", user.id);
            return Err(UserAccountError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Persists a freshly issued token pair for the user and returns the updated user record.
    pub async fn record_login(&self, mut user: User, tokens: UserTokens) -> Result<User, UserAccountError> {
        self.db.update_tokens(&user.id, &tokens).await?;
        info!("👤️ User {} logged in", user.id);
        user.token = Some(tokens.token);
        user.refresh_token = Some(tokens.refresh_token);
        Ok(user)
    }

    /// Resolves an authenticated email address to the id of the user it belongs to.
    pub async fn user_id_for_email(&self, email: &str) -> Result<UserId, UserAccountError> {
        let user = self.db.fetch_user_by_email(email).await?.ok_or(UserAccountError::UserNotFound)?;
        Ok(user.id)
    }
}
