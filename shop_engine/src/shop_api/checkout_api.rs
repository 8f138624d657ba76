use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::{CheckoutManagement, CheckoutResult},
    db_types::{ProductId, UserId},
    shop_api::errors::CheckoutError,
};

/// `CheckoutApi` is the only way orders come into existence.
pub struct CheckoutApi<B> {
    db: B,
}

impl<B: Debug> Debug for CheckoutApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CheckoutApi ({:?})", self.db)
    }
}

impl<B> CheckoutApi<B>
where B: CheckoutManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Buys everything in the user's cart. On success the cart is empty and a `pending` order holds a copy of every
    /// line at the price it had at the time of purchase.
    pub async fn checkout_cart(&self, user_id: &UserId) -> Result<CheckoutResult, CheckoutError> {
        match self.db.checkout_cart(user_id).await {
            Ok(result) => {
                info!(
                    "🛒️ User {user_id} checked out their cart. Order {} placed for {}",
                    result.order_id, result.total_price
                );
                Ok(result)
            },
            Err(e) => {
                warn!("🛒️ Checkout for user {user_id} failed. {e}");
                Err(e)
            },
        }
    }

    /// Buys a single unit of the product without touching the user's cart.
    pub async fn instant_buy(&self, user_id: &UserId, product_id: &ProductId) -> Result<CheckoutResult, CheckoutError> {
        match self.db.instant_buy(user_id, product_id).await {
            Ok(result) => {
                info!(
                    "🛒️ User {user_id} bought product {product_id}. Order {} placed for {}",
                    result.order_id, result.total_price
                );
                Ok(result)
            },
            Err(e) => {
                warn!("🛒️ Instant buy of {product_id} for user {user_id} failed. {e}");
                Err(e)
            },
        }
    }
}
