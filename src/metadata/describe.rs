//! Render trace metadata as a single delimited string.

use super::keys::{nice_value, resolve_key};
use crate::table::{Information, Value};
use crate::utils::config::DEFAULT_DESCRIPTORS;
use crate::utils::error::MetadataError;
use std::collections::HashSet;

/// Options for `describe`
#[derive(Debug, Clone)]
pub struct DescribeOptions {
    /// Keys to render, in order; `None` renders every key of the dictionary
    pub keys: Option<Vec<String>>,

    /// Separator written after each value
    pub sep: String,

    /// When set, each value is preceded by `<key><key_val_sep>`
    pub key_val_sep: Option<String>,

    /// Prefix each value with the first `key_length` characters of its key
    pub include_key: bool,
    pub key_length: usize,

    /// Maximum characters kept from non-float values
    pub val_length: Option<usize>,

    /// Decimal places for float values
    pub float_precision: usize,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            keys: Some(DEFAULT_DESCRIPTORS.iter().map(|k| k.to_string()).collect()),
            sep: " ".to_string(),
            key_val_sep: None,
            include_key: false,
            key_length: 3,
            val_length: None,
            float_precision: 1,
        }
    }
}

impl DescribeOptions {
    /// Render every key of the dictionary
    pub fn all_keys() -> Self {
        Self {
            keys: None,
            ..Default::default()
        }
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }
}

/// Describe `info` as one string
///
/// **Public** - backs trace naming and the textual form of a trace
///
/// Keys are resolved with `resolve_key`; a resolved key is rendered at most
/// once and absent keys are skipped. Floats are printed with
/// `float_precision` decimals, other values as text.
///
/// # Errors
/// * `MetadataError::MalformedExecutable` - the `exe` value has no benchmark name
pub fn describe(info: &Information, options: &DescribeOptions) -> Result<String, MetadataError> {
    let keys: Vec<String> = match &options.keys {
        Some(keys) => keys.clone(),
        None => info.keys().cloned().collect(),
    };

    let mut description = String::new();
    let mut used_keys: HashSet<String> = HashSet::new();

    for key in &keys {
        let real_key = resolve_key(info, key);
        if !used_keys.insert(real_key.clone()) {
            continue;
        }

        let value = match nice_value(info, &real_key) {
            Ok(value) => value,
            Err(MetadataError::NotFound(_)) => continue,
            Err(e) => return Err(e),
        };

        if options.include_key && options.key_length > 0 {
            let abbrev: String = key.chars().take(options.key_length).collect();
            description.push_str(&abbrev.to_lowercase());
        }
        if let Some(key_val_sep) = &options.key_val_sep {
            description.push_str(key);
            description.push_str(key_val_sep);
        }

        description.push_str(&render_value(&value, options));
        description.push_str(&options.sep);
    }

    if let Some(trimmed) = description.strip_suffix(options.sep.as_str()) {
        description.truncate(trimmed.len());
    }
    Ok(description)
}

fn render_value(value: &Value, options: &DescribeOptions) -> String {
    let text = value.to_string();
    match value {
        Value::Float(f) if text.contains('.') => format!("{:.*}", options.float_precision, f),
        _ => match options.val_length {
            Some(max) => text.chars().take(max).collect(),
            None => text,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_info() -> Information {
        let mut info = Information::new();
        info.insert("hostname".into(), Value::from("node01.cluster.example"));
        info.insert("exe".into(), Value::from("/home/u/dplasma/testing_dgemm"));
        info.insert("N".into(), Value::Int(1000));
        info.insert("gflops".into(), Value::Float(12.345));
        info
    }

    #[test]
    fn test_default_descriptors() {
        let options = DescribeOptions::default().with_sep("-");
        assert_eq!(describe(&sample_info(), &options).unwrap(), "node01-dgemm-1000-12.3");
    }

    #[test]
    fn test_duplicates_by_resolved_key() {
        // "n" and "N" both resolve to "N"
        let options = DescribeOptions::default().with_keys(["N", "n", "NB"]);
        assert_eq!(describe(&sample_info(), &options).unwrap(), "1000");
    }

    #[test]
    fn test_missing_keys_are_skipped() {
        let options = DescribeOptions::default().with_keys(["nope", "gflops"]);
        assert_eq!(describe(&sample_info(), &options).unwrap(), "12.3");
        assert_eq!(describe(&Information::new(), &options).unwrap(), "");
    }

    #[test]
    fn test_val_length_and_key_prefix() {
        let options = DescribeOptions {
            keys: Some(vec!["hostname".into(), "N".into()]),
            include_key: true,
            val_length: Some(3),
            sep: "_".into(),
            ..Default::default()
        };
        assert_eq!(describe(&sample_info(), &options).unwrap(), "hosnod_n100");
    }

    #[test]
    fn test_all_keys_in_dictionary_order() {
        let description = describe(&sample_info(), &DescribeOptions::all_keys()).unwrap();
        assert_eq!(description, "node01 dgemm 1000 12.3");
    }

    #[test]
    fn test_exponent_floats_pass_through() {
        let mut info = Information::new();
        info.insert("tiny".into(), Value::Float(1e-7));
        info.insert("huge".into(), Value::Float(1e20));
        info.insert("small".into(), Value::Float(1.5e-7));
        let options = DescribeOptions::all_keys();
        // only exponent forms with a decimal point are rounded
        assert_eq!(describe(&info, &options).unwrap(), "1e-7 1e20 0.0");
    }

    #[test]
    fn test_key_val_sep_prefixes_full_key() {
        let options = DescribeOptions {
            keys: Some(vec!["N".into(), "hostname".into()]),
            key_val_sep: Some("=".into()),
            sep: ",".into(),
            ..Default::default()
        };
        assert_eq!(
            describe(&sample_info(), &options).unwrap(),
            "N=1000,hostname=node01"
        );
    }

    #[test]
    fn test_malformed_exe_is_an_error() {
        let mut info = sample_info();
        info.insert("exe".into(), Value::from("a.out"));
        assert!(describe(&info, &DescribeOptions::default()).is_err());
    }
}
