use std::{env, time::Duration};

use log::*;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use shop_common::{parse_boolean_flag, parse_millis, parse_positive, Secret};

const DEFAULT_SHOP_HOST: &str = "127.0.0.1";
const DEFAULT_SHOP_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/shop.db";
const DEFAULT_ACCESS_TOKEN_TTL_HOURS: u64 = 24;
const DEFAULT_REFRESH_TOKEN_TTL_HOURS: u64 = 168;
/// Ten years. Longer token lifetimes are rejected from the environment and capped otherwise.
const MAX_TOKEN_TTL_HOURS: u64 = 87_600;
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(5_000);
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_millis(10_000);
const DEFAULT_MAX_CONNECTIONS: u32 = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    /// The deadline for ordinary store calls.
    pub store_timeout: Duration,
    /// The deadline for a checkout transaction, from the first statement to the commit.
    pub checkout_timeout: Duration,
    pub max_connections: u32,
    /// If true, pending database migrations are applied at startup.
    pub run_migrations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SHOP_HOST.to_string(),
            port: DEFAULT_SHOP_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            auth: AuthConfig::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            run_migrations: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("SHOP_HOST").ok().unwrap_or_else(|| DEFAULT_SHOP_HOST.into());
        let port = env::var("SHOP_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SHOP_PORT. {e} Using the default, {DEFAULT_SHOP_PORT}, \
                         instead."
                    );
                    DEFAULT_SHOP_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SHOP_PORT);
        let database_url = env::var("SHOP_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ SHOP_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let auth = AuthConfig::try_from_env().unwrap_or_default();
        let store_timeout = millis_from_env("SHOP_STORE_TIMEOUT_MS", DEFAULT_STORE_TIMEOUT);
        let checkout_timeout = millis_from_env("SHOP_CHECKOUT_TIMEOUT_MS", DEFAULT_CHECKOUT_TIMEOUT);
        let max_connections = positive_from_env("SHOP_DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);
        let run_migrations = parse_boolean_flag(env::var("SHOP_RUN_MIGRATIONS").ok(), true);
        Self { host, port, database_url, auth, store_timeout, checkout_timeout, max_connections, run_migrations }
    }
}

fn millis_from_env(name: &str, default: Duration) -> Duration {
    let value = env::var(name).ok();
    let result = parse_millis(value.as_deref(), default);
    if value.is_some() && result == default {
        warn!("🪛️ {name} is not a positive number of milliseconds. Using the default, {}ms.", default.as_millis());
    }
    result
}

fn positive_from_env<T>(name: &str, default: T) -> T
where T: std::str::FromStr + Default + PartialOrd + std::fmt::Display + Copy {
    match env::var(name).ok() {
        None => default,
        Some(s) => parse_positive(Some(s.as_str())).unwrap_or_else(|| {
            warn!("🪛️ {s} is not a valid value for {name}. Using the default, {default}.");
            default
        }),
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HMAC secret used to sign and verify session tokens.
    pub jwt_secret: Secret<String>,
    pub access_token_ttl: chrono::Duration,
    pub refresh_token_ttl: chrono::Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT signing secret has not been set. I'm using a random value for this session. DO NOT \
             operate on production like this, since every restart will log all users out. Set SHOP_JWT_SECRET \
             instead. 🚨️🚨️🚨️"
        );
        let secret = thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect::<String>();
        Self::new(Secret::new(secret), DEFAULT_ACCESS_TOKEN_TTL_HOURS, DEFAULT_REFRESH_TOKEN_TTL_HOURS)
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: Secret<String>, access_ttl_hours: u64, refresh_ttl_hours: u64) -> Self {
        Self {
            jwt_secret,
            access_token_ttl: hours(access_ttl_hours),
            refresh_token_ttl: hours(refresh_ttl_hours),
        }
    }

    /// Loads the authentication settings from the environment. Returns `None` if `SHOP_JWT_SECRET` is not set.
    pub fn try_from_env() -> Option<Self> {
        let secret = env::var("SHOP_JWT_SECRET").ok().filter(|s| !s.trim().is_empty())?;
        let access = ttl_hours_from_env("SHOP_ACCESS_TOKEN_TTL_HOURS", DEFAULT_ACCESS_TOKEN_TTL_HOURS);
        let refresh = ttl_hours_from_env("SHOP_REFRESH_TOKEN_TTL_HOURS", DEFAULT_REFRESH_TOKEN_TTL_HOURS);
        Some(Self::new(Secret::new(secret), access, refresh))
    }
}

fn ttl_hours_from_env(name: &str, default: u64) -> u64 {
    let ttl = positive_from_env(name, default);
    if ttl > MAX_TOKEN_TTL_HOURS {
        warn!("🪛️ {name}={ttl} exceeds the maximum of {MAX_TOKEN_TTL_HOURS} hours. Using the default, {default}.");
        return default;
    }
    ttl
}

fn hours(h: u64) -> chrono::Duration {
    // capped, so the cast cannot wrap
    chrono::Duration::hours(h.min(MAX_TOKEN_TTL_HOURS) as i64)
}
