//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, etc.) should be expressed as
//! futures or asynchronous functions. Async handlers get executed concurrently by worker threads and thus don’t block
//! execution. CPU-heavy work such as password hashing is moved onto the blocking pool by the engine.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use shop_engine::{
    db_types::{AddressFields, AddressId, NewProduct, NewUser, ProductId},
    AddressBookApi,
    AddressManagement,
    CartApi,
    CartManagement,
    CatalogApi,
    CatalogManagement,
    CheckoutApi,
    CheckoutManagement,
    UserAccountApi,
    UserManagement,
};

use crate::{
    auth::{JwtClaims, TokenIssuer},
    data_objects::{
        AddressCreatedResponse,
        CartUpdateResponse,
        IdParams,
        JsonResponse,
        LoginRequest,
        ProductCreatedResponse,
        ProductList,
        SearchParams,
        SignupResponse,
    },
    errors::ServerError,
    helpers::{caller_id, parse_id_param},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Users  ----------------------------------------------------
route!(signup => Post "/users/signup" impl UserManagement);
/// Creates a new user account. The user's first session tokens are issued and stored as part of the signup.
pub async fn signup<U: UserManagement>(
    body: web::Json<NewUser>,
    users: web::Data<UserAccountApi<U>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received signup request");
    let new_user = body.into_inner();
    let identity = JwtClaims {
        email: new_user.email.clone(),
        first_name: new_user.first_name.clone(),
        last_name: new_user.last_name.clone(),
    };
    let tokens = signer.issue(identity)?;
    let user_id = users.register(new_user, tokens).await?;
    Ok(HttpResponse::Created().json(SignupResponse { message: "Successfully signed up".to_string(), user_id }))
}

route!(login => Post "/users/login" impl UserManagement);
/// Checks the user's email and password and returns the user record with a freshly issued token pair.
pub async fn login<U: UserManagement>(
    body: web::Json<LoginRequest>,
    users: web::Data<UserAccountApi<U>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received login request");
    let LoginRequest { email, password } = body.into_inner();
    let user = users.authenticate(&email, &password).await?;
    let tokens = signer.issue(JwtClaims::from(&user))?;
    let user = users.record_login(user, tokens).await?;
    Ok(HttpResponse::Ok().json(user))
}

//----------------------------------------------   Catalog  ----------------------------------------------------
route!(add_product => Post "/admin/addproduct" impl CatalogManagement);
pub async fn add_product<B: CatalogManagement>(
    body: web::Json<NewProduct>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received add product request");
    let product_id = api.add_product(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ProductCreatedResponse { message: "Successfully added product".into(), product_id }))
}

route!(product_view => Get "/users/productview" impl CatalogManagement);
pub async fn product_view<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received product list request");
    let products = api.products().await?;
    Ok(HttpResponse::Ok().json(ProductList { products }))
}

route!(search_product => Get "/users/search" impl CatalogManagement);
pub async fn search_product<B: CatalogManagement>(
    query: web::Query<SearchParams>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let name = query.name.as_deref().map(str::trim).unwrap_or_default();
    trace!("💻️ Received product search request for '{name}'");
    if name.is_empty() {
        return Err(ServerError::NoRecordFound("search query is required".into()));
    }
    let products = api.search(name).await?;
    Ok(HttpResponse::Ok().json(ProductList { products }))
}

//----------------------------------------------   Address book  ----------------------------------------------------
route!(add_address => Post "/address" impl AddressManagement, UserManagement);
pub async fn add_address<A: AddressManagement, U: UserManagement>(
    claims: JwtClaims,
    body: web::Json<AddressFields>,
    api: web::Data<AddressBookApi<A>>,
    users: web::Data<UserAccountApi<U>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = caller_id(&claims, &users).await?;
    trace!("💻️ Received new address for user {user_id}");
    let address_id = api.add_address(&user_id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(AddressCreatedResponse { message: "Successfully added address".into(), address_id }))
}

route!(edit_address => Put "/address" impl AddressManagement, UserManagement);
pub async fn edit_address<A: AddressManagement, U: UserManagement>(
    claims: JwtClaims,
    query: web::Query<IdParams>,
    body: web::Json<AddressFields>,
    api: web::Data<AddressBookApi<A>>,
    users: web::Data<UserAccountApi<U>>,
) -> Result<HttpResponse, ServerError> {
    update_address(claims, query, body, api, users).await
}

route!(edit_home_address => Put "/address/home" impl AddressManagement, UserManagement);
pub async fn edit_home_address<A: AddressManagement, U: UserManagement>(
    claims: JwtClaims,
    query: web::Query<IdParams>,
    body: web::Json<AddressFields>,
    api: web::Data<AddressBookApi<A>>,
    users: web::Data<UserAccountApi<U>>,
) -> Result<HttpResponse, ServerError> {
    update_address(claims, query, body, api, users).await
}

route!(edit_work_address => Put "/address/work" impl AddressManagement, UserManagement);
pub async fn edit_work_address<A: AddressManagement, U: UserManagement>(
    claims: JwtClaims,
    query: web::Query<IdParams>,
    body: web::Json<AddressFields>,
    api: web::Data<AddressBookApi<A>>,
    users: web::Data<UserAccountApi<U>>,
) -> Result<HttpResponse, ServerError> {
    update_address(claims, query, body, api, users).await
}

async fn update_address<A: AddressManagement, U: UserManagement>(
    claims: JwtClaims,
    query: web::Query<IdParams>,
    body: web::Json<AddressFields>,
    api: web::Data<AddressBookApi<A>>,
    users: web::Data<UserAccountApi<U>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = caller_id(&claims, &users).await?;
    let address_id = parse_id_param::<AddressId>(&query, "address")?;
    trace!("💻️ Received address update for {address_id} from user {user_id}");
    api.update_address(&user_id, &address_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Successfully updated the address")))
}

route!(delete_address => Delete "/address" impl AddressManagement, UserManagement);
pub async fn delete_address<A: AddressManagement, U: UserManagement>(
    claims: JwtClaims,
    query: web::Query<IdParams>,
    api: web::Data<AddressBookApi<A>>,
    users: web::Data<UserAccountApi<U>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = caller_id(&claims, &users).await?;
    let address_id = parse_id_param::<AddressId>(&query, "address")?;
    trace!("💻️ Received address deletion for {address_id} from user {user_id}");
    api.delete_address(&user_id, &address_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Successfully deleted the address")))
}

//----------------------------------------------   Cart  ----------------------------------------------------
route!(add_to_cart => Get "/addtocart" impl CartManagement, UserManagement);
pub async fn add_to_cart<C: CartManagement, U: UserManagement>(
    claims: JwtClaims,
    query: web::Query<IdParams>,
    api: web::Data<CartApi<C>>,
    users: web::Data<UserAccountApi<U>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = caller_id(&claims, &users).await?;
    let product_id = parse_id_param::<ProductId>(&query, "product")?;
    let quantity = api.add_to_cart(&user_id, &product_id).await?;
    Ok(HttpResponse::Ok().json(CartUpdateResponse { message: "Successfully added to the cart".into(), quantity }))
}

route!(remove_item => Get "/removeitem" impl CartManagement, UserManagement);
pub async fn remove_item<C: CartManagement, U: UserManagement>(
    claims: JwtClaims,
    query: web::Query<IdParams>,
    api: web::Data<CartApi<C>>,
    users: web::Data<UserAccountApi<U>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = caller_id(&claims, &users).await?;
    let product_id = parse_id_param::<ProductId>(&query, "product")?;
    api.remove_from_cart(&user_id, &product_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Successfully removed item from cart")))
}

route!(list_cart => Get "/listcart" impl CartManagement, UserManagement);
pub async fn list_cart<C: CartManagement, U: UserManagement>(
    claims: JwtClaims,
    api: web::Data<CartApi<C>>,
    users: web::Data<UserAccountApi<U>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = caller_id(&claims, &users).await?;
    let summary = api.cart_summary(&user_id).await?;
    Ok(HttpResponse::Ok().json(summary))
}

//----------------------------------------------   Checkout  ----------------------------------------------------
route!(cart_checkout => Get "/cartcheckout" impl CheckoutManagement, UserManagement);
pub async fn cart_checkout<B: CheckoutManagement, U: UserManagement>(
    claims: JwtClaims,
    api: web::Data<CheckoutApi<B>>,
    users: web::Data<UserAccountApi<U>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = caller_id(&claims, &users).await?;
    debug!("💻️ Received checkout request from user {user_id}");
    let result = api.checkout_cart(&user_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(instant_buy => Get "/instantbuy" impl CheckoutManagement, UserManagement);
pub async fn instant_buy<B: CheckoutManagement, U: UserManagement>(
    claims: JwtClaims,
    query: web::Query<IdParams>,
    api: web::Data<CheckoutApi<B>>,
    users: web::Data<UserAccountApi<U>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = caller_id(&claims, &users).await?;
    let product_id = parse_id_param::<ProductId>(&query, "product")?;
    debug!("💻️ Received instant buy request for {product_id} from user {user_id}");
    let result = api.instant_buy(&user_id, &product_id).await?;
    Ok(HttpResponse::Ok().json(result))
}
