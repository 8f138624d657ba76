use crate::{
    db_types::{AddressFields, AddressId, UserId},
    shop_api::errors::AddressError,
};

/// Address book storage. Updates and deletes match on both the address id and the owning user, and fail with
/// [`AddressError::AddressNotFound`] when that pair matches nothing. An address that belongs to someone else is
/// therefore indistinguishable from one that does not exist.
#[allow(async_fn_in_trait)]
pub trait AddressManagement {
    async fn insert_address(&self, user_id: &UserId, address: AddressFields) -> Result<AddressId, AddressError>;

    async fn update_address(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
        address: AddressFields,
    ) -> Result<(), AddressError>;

    async fn delete_address(&self, user_id: &UserId, address_id: &AddressId) -> Result<(), AddressError>;
}
