//! Metadata key resolution and display formatting.
//!
//! Trace producers have spelled the same metadata key three ways over time:
//! as requested (`exe`), upper-cased (`EXE`) and as a benchmark parameter
//! (`PARAM_EXE`). Lookups try them in that order.

use crate::table::{Information, Value};
use crate::utils::config::PARAM_KEY_PREFIX;
use crate::utils::error::MetadataError;
use regex::Regex;
use std::sync::LazyLock;

/// Benchmark executables are named `.../testing_<kernel>`
static EXE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*testing_(\w+)").expect("executable pattern is valid")
});

/// Resolve a requested key to the spelling present in `info`
///
/// **Public** - used by every metadata lookup
///
/// Tries the key unchanged, then upper-cased, then upper-cased with the
/// `PARAM_` prefix. When none exist the requested key is returned as-is
/// and the caller's lookup reports it missing.
pub fn resolve_key(info: &Information, key: &str) -> String {
    if info.contains_key(key) {
        return key.to_string();
    }

    let upper = key.to_uppercase();
    if info.contains_key(&upper) {
        return upper;
    }

    let prefixed = format!("{}{}", PARAM_KEY_PREFIX, upper);
    if info.contains_key(&prefixed) {
        return prefixed;
    }

    key.to_string()
}

/// Fetch `key` from `info` and format it for display
///
/// **Public** - `key` must already be resolved
///
/// # Errors
/// * `MetadataError::NotFound` - key absent
/// * `MetadataError::MalformedExecutable` - `exe` without a benchmark name
pub fn nice_value(info: &Information, key: &str) -> Result<Value, MetadataError> {
    let raw = info
        .get(key)
        .ok_or_else(|| MetadataError::NotFound(key.to_string()))?;
    format_value(key, raw)
}

/// Display form of a raw metadata value
///
/// **Public** - `exe` is reduced to its benchmark name and `hostname`
/// loses its domain; everything else passes through.
pub fn format_value(key: &str, raw: &Value) -> Result<Value, MetadataError> {
    match key {
        "exe" => {
            let text = raw.to_string();
            EXE_REGEX
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .map(|m| Value::Str(m.as_str().to_string()))
                .ok_or(MetadataError::MalformedExecutable(text))
        }
        "hostname" => {
            let text = raw.to_string();
            let short = text.split('.').next().unwrap_or_default();
            Ok(Value::Str(short.to_string()))
        }
        _ => Ok(raw.clone()),
    }
}
