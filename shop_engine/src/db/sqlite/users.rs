use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewUserRecord, User, UserId, UserTokens},
};

pub async fn user_exists(email: &str, phone: &str, conn: &mut SqliteConnection) -> Result<bool, SqliteDatabaseError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1 OR phone = $2")
        .bind(email)
        .bind(phone)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

pub async fn insert_user(user: NewUserRecord, conn: &mut SqliteConnection) -> Result<UserId, SqliteDatabaseError> {
    let result = sqlx::query(
        r#"
            INSERT INTO users (id, first_name, last_name, email, phone, password_hash, token, refresh_token)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(&user.id)
    .bind(user.first_name)
    .bind(user.last_name)
    .bind(user.email)
    .bind(user.phone)
    .bind(user.password_hash)
    .bind(user.tokens.token)
    .bind(user.tokens.refresh_token)
    .execute(conn)
    .await
    .map_err(SqliteDatabaseError::from);
    match result {
        Err(e) if e.is_unique_violation() => Err(SqliteDatabaseError::DuplicateUser),
        Err(e) => Err(e),
        Ok(_) => {
            trace!("🗃️ User {} inserted", user.id);
            Ok(user.id)
        },
    }
}

pub async fn fetch_user_by_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<User>, SqliteDatabaseError> {
    let user = sqlx::query_as(
        r#"
            SELECT id, first_name, last_name, email, phone, password_hash, token, refresh_token, created_at, updated_at
            FROM users WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await?;
    Ok(user)
}

pub async fn update_tokens(
    user_id: &UserId,
    tokens: &UserTokens,
    conn: &mut SqliteConnection,
) -> Result<(), SqliteDatabaseError> {
    let result = sqlx::query(
        "UPDATE users SET token = $1, refresh_token = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $3",
    )
    .bind(&tokens.token)
    .bind(&tokens.refresh_token)
    .bind(user_id)
    .execute(conn)
    .await?;
    if result.rows_affected() == 0 {
        return Err(SqliteDatabaseError::UserNotFound(user_id.to_string()));
    }
    Ok(())
}
