use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::CartManagement,
    db_types::{ProductId, UserId},
    helpers::pricing::order_total,
    shop_api::{errors::CartError, order_objects::CartSummary},
};

pub struct CartApi<B> {
    db: B,
}

impl<B: Debug> Debug for CartApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CartApi ({:?})", self.db)
    }
}

impl<B> CartApi<B>
where B: CartManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Adds one unit of the product to the user's cart and returns the line's new quantity.
    pub async fn add_to_cart(&self, user_id: &UserId, product_id: &ProductId) -> Result<u32, CartError> {
        let quantity = self.db.add_or_increment(user_id, product_id).await?;
        debug!("🛒️ User {user_id} has {quantity} of product {product_id} in their cart");
        Ok(quantity)
    }

    pub async fn remove_from_cart(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), CartError> {
        self.db.remove_line(user_id, product_id).await?;
        debug!("🛒️ Product {product_id} removed from the cart of user {user_id}");
        Ok(())
    }

    pub async fn cart_summary(&self, user_id: &UserId) -> Result<CartSummary, CartError> {
        let items = self.db.fetch_cart(user_id).await?;
        let total_price =
            order_total(items.iter().map(|item| (item.price, item.quantity))).ok_or(CartError::AmountOverflow)?;
        Ok(CartSummary { items, total_price })
    }
}
