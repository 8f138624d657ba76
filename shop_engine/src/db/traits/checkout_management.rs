use serde::{Deserialize, Serialize};
use shop_common::Price;

use crate::{
    db_types::{OrderId, ProductId, UserId},
    shop_api::errors::CheckoutError,
};

/// The outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResult {
    pub order_id: OrderId,
    pub total_price: Price,
}

/// Implementations must run each method in a single store transaction. Either the order, all of its items and (for
/// [`checkout_cart`](CheckoutManagement::checkout_cart)) the cart deletion are committed together, or nothing is.
/// The outcome must not depend on whether the caller is still waiting for the result.
#[allow(async_fn_in_trait)]
pub trait CheckoutManagement {
    /// Converts the user's entire cart into a `pending` order, capturing the current price of every product, and
    /// empties the cart.
    ///
    /// Fails with [`CheckoutError::EmptyCart`] if the user has no cart lines. Two concurrent calls for the same user
    /// produce at most one order; the loser observes an empty cart.
    async fn checkout_cart(&self, user_id: &UserId) -> Result<CheckoutResult, CheckoutError>;

    /// Creates a `pending` order for a single unit of the product. The user's cart is neither read nor modified.
    async fn instant_buy(&self, user_id: &UserId, product_id: &ProductId) -> Result<CheckoutResult, CheckoutError>;
}
