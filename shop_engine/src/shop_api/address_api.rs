use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::AddressManagement,
    db_types::{AddressFields, AddressId, UserId},
    shop_api::errors::AddressError,
};

pub struct AddressBookApi<B> {
    db: B,
}

impl<B: Debug> Debug for AddressBookApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AddressBookApi ({:?})", self.db)
    }
}

impl<B> AddressBookApi<B>
where B: AddressManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn add_address(&self, user_id: &UserId, address: AddressFields) -> Result<AddressId, AddressError> {
        let id = self.db.insert_address(user_id, address).await?;
        debug!("📫️ Address {id} added for user {user_id}");
        Ok(id)
    }

    pub async fn update_address(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
        address: AddressFields,
    ) -> Result<(), AddressError> {
        self.db.update_address(user_id, address_id, address).await?;
        debug!("📫️ Address {address_id} updated by user {user_id}");
        Ok(())
    }

    pub async fn delete_address(&self, user_id: &UserId, address_id: &AddressId) -> Result<(), AddressError> {
        self.db.delete_address(user_id, address_id).await?;
        debug!("📫️ Address {address_id} deleted by user {user_id}");
        Ok(())
    }
}
