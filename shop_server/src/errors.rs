use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::*;
use shop_engine::{AddressError, CartError, CatalogError, CheckoutError, StoreError, UserAccountError};
use thiserror::Error;

/// Errors surfaced to HTTP clients.
///
/// Backend failures are logged with their full detail when they are converted into a `ServerError`. The variants
/// that reach the client only ever carry a category message.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Invalid request parameter: {0}")]
    InvalidRequestParameter(String),
    #[error("{0}")]
    ClientError(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("{0}")]
    NoRecordFound(String),
    #[error("The cart is empty")]
    EmptyCart,
    #[error("The service is temporarily unavailable. Please try again.")]
    TransientBackendError,
    #[error("An error occurred on the backend of the server.")]
    BackendError,
    #[error("The order total is too large to be processed.")]
    AmountOverflow,
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestParameter(_) => StatusCode::BAD_REQUEST,
            Self::ClientError(_) => StatusCode::BAD_REQUEST,
            Self::EmptyCart => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => match e {
                AuthError::CouldNotIssueToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::UNAUTHORIZED,
            },
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::TransientBackendError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AmountOverflow => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("No authorization token was provided.")]
    MissingToken,
    #[error("Login token signature is invalid. {0}")]
    ValidationError(String),
    #[error("Login token is not in the correct format. {0}")]
    PoorlyFormattedToken(String),
    #[error("Login or password incorrect")]
    InvalidCredentials,
    #[error("User account not found.")]
    AccountNotFound,
    #[error("Could not issue access token. {0}")]
    CouldNotIssueToken(String),
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        if e.is_transient() {
            warn!("💻️ Transient store failure. {e}");
            Self::TransientBackendError
        } else {
            error!("💻️ Store failure. {e}");
            Self::BackendError
        }
    }
}

impl From<CatalogError> for ServerError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Store(e) => e.into(),
            CatalogError::InvalidProduct(msg) => Self::ClientError(msg),
            CatalogError::ProductNotFound => Self::NoRecordFound(e.to_string()),
        }
    }
}

impl From<CartError> for ServerError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::Store(e) => e.into(),
            CartError::ProductNotFound | CartError::LineNotFound => Self::NoRecordFound(e.to_string()),
            CartError::AmountOverflow => {
                error!("💻️ Cart total overflowed");
                Self::AmountOverflow
            },
        }
    }
}

impl From<CheckoutError> for ServerError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::Store(e) => e.into(),
            CheckoutError::EmptyCart => Self::EmptyCart,
            CheckoutError::ProductNotFound => Self::NoRecordFound(e.to_string()),
            CheckoutError::AmountOverflow => {
                error!("💻️ Order total overflowed");
                Self::AmountOverflow
            },
        }
    }
}

impl From<AddressError> for ServerError {
    fn from(e: AddressError) -> Self {
        match e {
            AddressError::Store(e) => e.into(),
            AddressError::AddressNotFound => Self::NoRecordFound(e.to_string()),
        }
    }
}

impl From<UserAccountError> for ServerError {
    fn from(e: UserAccountError) -> Self {
        match e {
            UserAccountError::Store(e) => e.into(),
            UserAccountError::Validation(msg) => Self::ClientError(msg),
            UserAccountError::UserAlreadyExists => Self::ClientError(e.to_string()),
            UserAccountError::InvalidCredentials => Self::AuthenticationError(AuthError::InvalidCredentials),
            UserAccountError::UserNotFound => Self::AuthenticationError(AuthError::AccountNotFound),
            UserAccountError::PasswordHashError(msg) => {
                error!("💻️ Password processing failed. {msg}");
                Self::BackendError
            },
        }
    }
}
