use std::str::FromStr;

use log::debug;
use shop_engine::{db_types::UserId, UserAccountApi, UserManagement};

use crate::{auth::JwtClaims, data_objects::IdParams, errors::ServerError};

/// Extracts and parses the `id` query parameter. `what` names the kind of id in error messages.
pub fn parse_id_param<T: FromStr>(params: &IdParams, what: &str) -> Result<T, ServerError>
where T::Err: std::fmt::Display {
    let raw = params
        .id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::InvalidRequestParameter(format!("{what} id is empty")))?;
    raw.parse::<T>().map_err(|e| {
        debug!("💻️ Rejected {what} id '{raw}'. {e}");
        ServerError::InvalidRequestParameter(format!("{what} id is not valid"))
    })
}

/// Resolves the identity in a validated access token to the id of the user it belongs to. A token for a user that no
/// longer exists is treated as unauthorised.
pub async fn caller_id<U: UserManagement>(claims: &JwtClaims, users: &UserAccountApi<U>) -> Result<UserId, ServerError> {
    let id = users.user_id_for_email(&claims.email).await?;
    Ok(id)
}
