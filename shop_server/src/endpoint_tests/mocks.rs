use mockall::mock;
use shop_engine::{
    db_types::{AddressFields, AddressId, CartItem, NewProduct, NewUserRecord, Product, ProductId, User, UserId, UserTokens},
    AddressError,
    AddressManagement,
    CartError,
    CartManagement,
    CatalogError,
    CatalogManagement,
    CheckoutError,
    CheckoutManagement,
    CheckoutResult,
    UserAccountError,
    UserManagement,
};

mock! {
    pub UserManager {}
    impl UserManagement for UserManager {
        async fn user_exists(&self, email: &str, phone: &str) -> Result<bool, UserAccountError>;
        async fn insert_user(&self, user: NewUserRecord) -> Result<UserId, UserAccountError>;
        async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, UserAccountError>;
        async fn update_tokens(&self, user_id: &UserId, tokens: &UserTokens) -> Result<(), UserAccountError>;
    }
}

mock! {
    pub CatalogManager {}
    impl CatalogManagement for CatalogManager {
        async fn insert_product(&self, product: NewProduct) -> Result<ProductId, CatalogError>;
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
        async fn search_products(&self, name: &str) -> Result<Vec<Product>, CatalogError>;
        async fn fetch_product(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError>;
    }
}

mock! {
    pub CartManager {}
    impl CartManagement for CartManager {
        async fn add_or_increment(&self, user_id: &UserId, product_id: &ProductId) -> Result<u32, CartError>;
        async fn remove_line(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), CartError>;
        async fn fetch_cart(&self, user_id: &UserId) -> Result<Vec<CartItem>, CartError>;
    }
}

mock! {
    pub CheckoutManager {}
    impl CheckoutManagement for CheckoutManager {
        async fn checkout_cart(&self, user_id: &UserId) -> Result<CheckoutResult, CheckoutError>;
        async fn instant_buy(&self, user_id: &UserId, product_id: &ProductId) -> Result<CheckoutResult, CheckoutError>;
    }
}

mock! {
    pub AddressManager {}
    impl AddressManagement for AddressManager {
        async fn insert_address(&self, user_id: &UserId, address: AddressFields) -> Result<AddressId, AddressError>;
        async fn update_address(&self, user_id: &UserId, address_id: &AddressId, address: AddressFields) -> Result<(), AddressError>;
        async fn delete_address(&self, user_id: &UserId, address_id: &AddressId) -> Result<(), AddressError>;
    }
}
