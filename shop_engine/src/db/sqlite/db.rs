use std::{fmt::Debug, time::Duration};

use log::*;
use sqlx::SqlitePool;

use super::{addresses, cart, db_url, new_pool, orders, products, users, with_deadline, SqliteDatabaseError};
use crate::{
    db::traits::{
        AddressManagement,
        CartManagement,
        CatalogManagement,
        CheckoutManagement,
        CheckoutResult,
        OrderManagement,
        UserManagement,
    },
    db_types::{
        AddressFields,
        AddressId,
        CartItem,
        NewProduct,
        NewUserRecord,
        Order,
        OrderId,
        OrderItem,
        Product,
        ProductId,
        User,
        UserId,
        UserTokens,
    },
    shop_api::errors::{AddressError, CartError, CatalogError, CheckoutError, StoreError, UserAccountError},
};

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
    store_timeout: Duration,
    checkout_timeout: Duration,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL in the `SHOP_DATABASE_URL` environment variable.
    pub async fn new(max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let pool = new_pool(url, max_connections).await?;
        trace!("🗃️ Created new Sqlite connection pool for {url}");
        Ok(Self {
            url: url.to_string(),
            pool,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        })
    }

    /// Sets the deadlines for ordinary store calls and for checkout transactions respectively.
    pub fn with_timeouts(mut self, store_timeout: Duration, checkout_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self.checkout_timeout = checkout_timeout;
        self
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
        trace!("🗃️ Connection pool for {} closed", self.url);
    }

    /// Brings the schema up to date using the migrations embedded in this crate.
    pub async fn migrate(&self) -> Result<(), SqliteDatabaseError> {
        sqlx::migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    /// Runs `f` in a transaction on a separate task, so that the outcome does not depend on the caller. If the
    /// caller's future is dropped (for instance, because the client disconnected), the transaction still runs to a
    /// commit or a rollback.
    async fn run_checkout<T, F>(&self, f: F) -> Result<T, SqliteDatabaseError>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(
                &'c mut sqlx::SqliteConnection,
            ) -> futures_util::future::BoxFuture<'c, Result<T, SqliteDatabaseError>>
            + Send
            + 'static,
    {
        let pool = self.pool.clone();
        let deadline = self.checkout_timeout;
        let task = tokio::spawn(async move {
            with_deadline(deadline, async move {
                let mut tx = pool.begin().await?;
                let result = f(&mut *tx).await?;
                tx.commit().await?;
                Ok(result)
            })
            .await
        });
        task.await.map_err(|e| SqliteDatabaseError::TaskFailed(e.to_string()))?
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn insert_product(&self, product: NewProduct) -> Result<ProductId, CatalogError> {
        let id = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            products::insert_product(product, &mut conn).await
        })
        .await?;
        Ok(id)
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let products = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            products::fetch_products(&mut conn).await
        })
        .await?;
        Ok(products)
    }

    async fn search_products(&self, name: &str) -> Result<Vec<Product>, CatalogError> {
        let products = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            products::search_products(name, &mut conn).await
        })
        .await?;
        Ok(products)
    }

    async fn fetch_product(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let product = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            products::fetch_product(product_id, &mut conn).await
        })
        .await?;
        Ok(product)
    }
}

impl CartManagement for SqliteDatabase {
    async fn add_or_increment(&self, user_id: &UserId, product_id: &ProductId) -> Result<u32, CartError> {
        let quantity = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            cart::add_or_increment(user_id, product_id, &mut conn).await
        })
        .await?;
        Ok(quantity)
    }

    async fn remove_line(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), CartError> {
        with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            cart::remove_line(user_id, product_id, &mut conn).await
        })
        .await?;
        Ok(())
    }

    async fn fetch_cart(&self, user_id: &UserId) -> Result<Vec<CartItem>, CartError> {
        let items = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            cart::fetch_cart(user_id, &mut conn).await
        })
        .await?;
        Ok(items)
    }
}

impl CheckoutManagement for SqliteDatabase {
    async fn checkout_cart(&self, user_id: &UserId) -> Result<CheckoutResult, CheckoutError> {
        let user_id = user_id.clone();
        let result =
            self.run_checkout(move |conn| Box::pin(async move { orders::checkout_cart(&user_id, conn).await })).await;
        if let Err(e) = &result {
            debug!("🗃️ Checkout rolled back. {e}");
        }
        Ok(result?)
    }

    async fn instant_buy(&self, user_id: &UserId, product_id: &ProductId) -> Result<CheckoutResult, CheckoutError> {
        let user_id = user_id.clone();
        let product_id = product_id.clone();
        let result = self
            .run_checkout(move |conn| {
                Box::pin(async move { orders::instant_buy(&user_id, &product_id, conn).await })
            })
            .await;
        if let Err(e) = &result {
            debug!("🗃️ Instant buy rolled back. {e}");
        }
        Ok(result?)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn order_by_id(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError> {
        let order = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            orders::fetch_order(order_id, &mut conn).await
        })
        .await?;
        Ok(order)
    }

    async fn order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, StoreError> {
        let items = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            orders::fetch_order_items(order_id, &mut conn).await
        })
        .await?;
        Ok(items)
    }

    async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError> {
        let orders = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            orders::fetch_orders_for_user(user_id, &mut conn).await
        })
        .await?;
        Ok(orders)
    }
}

impl AddressManagement for SqliteDatabase {
    async fn insert_address(&self, user_id: &UserId, address: AddressFields) -> Result<AddressId, AddressError> {
        let id = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            addresses::insert_address(user_id, address, &mut conn).await
        })
        .await?;
        Ok(id)
    }

    async fn update_address(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
        address: AddressFields,
    ) -> Result<(), AddressError> {
        with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            addresses::update_address(user_id, address_id, address, &mut conn).await
        })
        .await?;
        Ok(())
    }

    async fn delete_address(&self, user_id: &UserId, address_id: &AddressId) -> Result<(), AddressError> {
        with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            addresses::delete_address(user_id, address_id, &mut conn).await
        })
        .await?;
        Ok(())
    }
}

impl UserManagement for SqliteDatabase {
    async fn user_exists(&self, email: &str, phone: &str) -> Result<bool, UserAccountError> {
        let exists = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            users::user_exists(email, phone, &mut conn).await
        })
        .await?;
        Ok(exists)
    }

    async fn insert_user(&self, user: NewUserRecord) -> Result<UserId, UserAccountError> {
        let id = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            users::insert_user(user, &mut conn).await
        })
        .await?;
        Ok(id)
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, UserAccountError> {
        let user = with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            users::fetch_user_by_email(email, &mut conn).await
        })
        .await?;
        Ok(user)
    }

    async fn update_tokens(&self, user_id: &UserId, tokens: &UserTokens) -> Result<(), UserAccountError> {
        with_deadline(self.store_timeout, async {
            let mut conn = self.pool.acquire().await?;
            users::update_tokens(user_id, tokens, &mut conn).await
        })
        .await?;
        Ok(())
    }
}
