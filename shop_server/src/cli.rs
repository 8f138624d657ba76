use std::{env, env::VarError};

const README: &str = include_str!("./cli-help.txt");

// Only these are printed verbatim. Secrets are reported as set or not set.
const DISPLAY_ENVS: [&str; 10] = [
    "RUST_LOG",
    "SHOP_HOST",
    "SHOP_PORT",
    "SHOP_DATABASE_URL",
    "SHOP_DB_MAX_CONNECTIONS",
    "SHOP_RUN_MIGRATIONS",
    "SHOP_STORE_TIMEOUT_MS",
    "SHOP_CHECKOUT_TIMEOUT_MS",
    "SHOP_ACCESS_TOKEN_TTL_HOURS",
    "SHOP_REFRESH_TOKEN_TTL_HOURS",
];
const SECRET_ENVS: [&str; 1] = ["SHOP_JWT_SECRET"];

/// The server takes no arguments. If any are given, print the help and the current configuration and return `true`
/// so that the caller can exit.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        println!("\n{README}\n");
        display_envs();
    }
    has_cli_args
}

fn display_envs() {
    println!("Current environment values:");
    for name in DISPLAY_ENVS {
        println!("  {name:<35} {:<15}", env_value(name));
    }
    for name in SECRET_ENVS {
        let state = if env::var_os(name).is_some() { "Set (hidden)" } else { "Not set" };
        println!("  {name:<35} {state:<15}");
    }
}

fn env_value(name: &str) -> String {
    match env::var(name) {
        Ok(s) => s,
        Err(VarError::NotPresent) => "Not set".into(),
        Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
    }
}
