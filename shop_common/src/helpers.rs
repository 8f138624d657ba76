use std::{str::FromStr, time::Duration};

/// Parse a boolean flag from a string value, or return the given default value otherwise.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let value = match value {
        Some(v) => v,
        None => return default,
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

/// Parse a positive number from a string value. `None`, blank strings, zero and unparseable values all yield `None`
/// so that the caller can decide on the fallback (and log it).
pub fn parse_positive<T>(value: Option<&str>) -> Option<T>
where T: FromStr + Default + PartialOrd {
    value.map(str::trim).filter(|s| !s.is_empty()).and_then(|s| s.parse::<T>().ok()).filter(|v| *v > T::default())
}

/// Parse a millisecond count into a [`Duration`], falling back to `default` when the value is missing or invalid.
pub fn parse_millis(value: Option<&str>, default: Duration) -> Duration {
    parse_positive::<u64>(value).map(Duration::from_millis).unwrap_or(default)
}
