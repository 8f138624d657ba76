use crate::{
    db_types::{NewUserRecord, User, UserId, UserTokens},
    shop_api::errors::UserAccountError,
};

#[allow(async_fn_in_trait)]
pub trait UserManagement {
    /// Checks whether any user has already registered with the given email address or phone number.
    async fn user_exists(&self, email: &str, phone: &str) -> Result<bool, UserAccountError>;

    /// Stores a new user. Fails with [`UserAccountError::UserAlreadyExists`] if the email or phone number is taken.
    async fn insert_user(&self, user: NewUserRecord) -> Result<UserId, UserAccountError>;

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, UserAccountError>;

    /// Replaces the user's stored session tokens.
    async fn update_tokens(&self, user_id: &UserId, tokens: &UserTokens) -> Result<(), UserAccountError>;
}
