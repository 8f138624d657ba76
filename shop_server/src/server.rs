use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use shop_engine::{AddressBookApi, CartApi, CatalogApi, CheckoutApi, SqliteDatabase, UserAccountApi};

use crate::{
    auth::TokenIssuer,
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        AddAddressRoute,
        AddProductRoute,
        AddToCartRoute,
        CartCheckoutRoute,
        DeleteAddressRoute,
        EditAddressRoute,
        EditHomeAddressRoute,
        EditWorkAddressRoute,
        InstantBuyRoute,
        ListCartRoute,
        LoginRoute,
        ProductViewRoute,
        RemoveItemRoute,
        SearchProductRoute,
        SignupRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?
        .with_timeouts(config.store_timeout, config.checkout_timeout);
    if config.run_migrations {
        info!("🗃️ Running database migrations");
        db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    }
    warn!("💻️ /admin/addproduct is not protected by any authentication. Do not expose it to the public internet.");
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(ServerError::from)
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let catalog_api = CatalogApi::new(db.clone());
        let cart_api = CartApi::new(db.clone());
        let checkout_api = CheckoutApi::new(db.clone());
        let address_api = AddressBookApi::new(db.clone());
        let users_api = UserAccountApi::new(db.clone());
        let jwt_signer = TokenIssuer::new(&config.auth);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("shop::access_log"))
            .app_data(json_config())
            .app_data(query_config())
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(cart_api))
            .app_data(web::Data::new(checkout_api))
            .app_data(web::Data::new(address_api))
            .app_data(web::Data::new(users_api))
            .app_data(web::Data::new(jwt_signer))
            .service(health)
            .configure(configure_routes::<SqliteDatabase>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers every shop route against the given backend.
pub fn configure_routes<B>(cfg: &mut web::ServiceConfig)
where B: shop_engine::CatalogManagement
        + shop_engine::CartManagement
        + shop_engine::CheckoutManagement
        + shop_engine::AddressManagement
        + shop_engine::UserManagement
        + 'static {
    cfg.service(SignupRoute::<B>::new())
        .service(LoginRoute::<B>::new())
        .service(AddProductRoute::<B>::new())
        .service(ProductViewRoute::<B>::new())
        .service(SearchProductRoute::<B>::new())
        .service(AddAddressRoute::<B, B>::new())
        .service(EditAddressRoute::<B, B>::new())
        .service(EditHomeAddressRoute::<B, B>::new())
        .service(EditWorkAddressRoute::<B, B>::new())
        .service(DeleteAddressRoute::<B, B>::new())
        .service(AddToCartRoute::<B, B>::new())
        .service(RemoveItemRoute::<B, B>::new())
        .service(ListCartRoute::<B, B>::new())
        .service(CartCheckoutRoute::<B, B>::new())
        .service(InstantBuyRoute::<B, B>::new());
}

/// Malformed JSON bodies are reported in the same `{"error": ...}` shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ServerError::InvalidRequestParameter(err.to_string()).into())
}
