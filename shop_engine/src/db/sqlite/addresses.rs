use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{AddressFields, AddressId, UserId},
};

pub async fn insert_address(
    user_id: &UserId,
    address: AddressFields,
    conn: &mut SqliteConnection,
) -> Result<AddressId, SqliteDatabaseError> {
    let id = AddressId::random();
    sqlx::query(
        r#"
            INSERT INTO addresses (id, user_id, house, street, city, pincode, state)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(address.house)
    .bind(address.street)
    .bind(address.city)
    .bind(address.pincode)
    .bind(address.state)
    .execute(conn)
    .await?;
    trace!("🗃️ Address {id} added for user {user_id}");
    Ok(id)
}

/// Overwrites the postal fields of the address. Only the owner's rows can match.
pub async fn update_address(
    user_id: &UserId,
    address_id: &AddressId,
    address: AddressFields,
    conn: &mut SqliteConnection,
) -> Result<(), SqliteDatabaseError> {
    let result = sqlx::query(
        r#"
            UPDATE addresses SET
                house = $1,
                street = $2,
                city = $3,
                pincode = $4,
                state = $5,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $6 AND user_id = $7
        "#,
    )
    .bind(address.house)
    .bind(address.street)
    .bind(address.city)
    .bind(address.pincode)
    .bind(address.state)
    .bind(address_id)
    .bind(user_id)
    .execute(conn)
    .await?;
    if result.rows_affected() == 0 {
        return Err(SqliteDatabaseError::AddressNotFound(address_id.to_string()));
    }
    Ok(())
}

pub async fn delete_address(
    user_id: &UserId,
    address_id: &AddressId,
    conn: &mut SqliteConnection,
) -> Result<(), SqliteDatabaseError> {
    let result = sqlx::query("DELETE FROM addresses WHERE id = $1 AND user_id = $2")
        .bind(address_id)
        .bind(user_id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(SqliteDatabaseError::AddressNotFound(address_id.to_string()));
    }
    trace!("🗃️ Address {address_id} deleted");
    Ok(())
}
