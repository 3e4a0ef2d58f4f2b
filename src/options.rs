//! # Filter Options
//!
//! [`FilterOptions`] is the configuration bound to a filter factory and to every
//! instance it creates. It is an open map of JSON values: unknown keys are kept
//! verbatim for the transport, and a handful of keys are recognized and validated.
//!
//! ## Recognized options
//!
//! | Key             | Shape                  | Default    |
//! |-----------------|------------------------|------------|
//! | `wantStrings`   | boolean                | `false`    |
//! | `objectMode`    | boolean                | `false`    |
//! | `highWaterMark` | non-negative integer   | unset      |
//! | `name`          | string                 | `"filter"` |
//!
//! ## Example
//!
//! ```rust
//! use stream_filter::options::FilterOptions;
//!
//! let options = FilterOptions::new()
//!   .with_want_strings(true)
//!   .with("encoding", "utf8");
//!
//! assert!(options.want_strings());
//! assert!(!options.object_mode());
//! assert_eq!(options.get("encoding").and_then(|v| v.as_str()), Some("utf8"));
//! ```

use crate::error::FilterError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Coerce each chunk to text before the predicate sees it.
pub const WANT_STRINGS: &str = "wantStrings";
/// Chunks are structured records rather than bytes or text.
pub const OBJECT_MODE: &str = "objectMode";
/// Buffering hint for the transport. Carried, never interpreted.
pub const HIGH_WATER_MARK: &str = "highWaterMark";
/// Component name used in logs and error reports.
pub const NAME: &str = "name";

pub(crate) const DEFAULT_NAME: &str = "filter";

/// Configuration for a filter factory and its instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterOptions {
  entries: Map<String, Value>,
}

impl FilterOptions {
  /// Creates an empty set of options.
  pub fn new() -> Self {
    Self::default()
  }

  /// Options used by the object-mode entry points: `{objectMode: true}`.
  pub fn object_mode_defaults() -> Self {
    Self::new().with_object_mode(true)
  }

  /// Parses options from a JSON object and validates them.
  pub fn from_json(text: &str) -> Result<Self, FilterError> {
    let options: Self = serde_json::from_str(text)?;
    options.validate()?;
    Ok(options)
  }

  /// Sets `key` to `value`, replacing any previous value.
  #[must_use]
  pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.entries.insert(key.into(), value.into());
    self
  }

  /// Sets `wantStrings`.
  #[must_use]
  pub fn with_want_strings(self, want_strings: bool) -> Self {
    self.with(WANT_STRINGS, want_strings)
  }

  /// Sets `objectMode`.
  #[must_use]
  pub fn with_object_mode(self, object_mode: bool) -> Self {
    self.with(OBJECT_MODE, object_mode)
  }

  /// Sets `highWaterMark`.
  #[must_use]
  pub fn with_high_water_mark(self, high_water_mark: u64) -> Self {
    self.with(HIGH_WATER_MARK, high_water_mark)
  }

  /// Sets the component name.
  #[must_use]
  pub fn with_name(self, name: impl Into<String>) -> Self {
    self.with(NAME, name.into())
  }

  /// Returns the raw value stored under `key`.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.entries.get(key)
  }

  /// Returns `true` if `key` is set.
  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.contains_key(key)
  }

  /// Iterates over every option, recognized or not.
  pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.entries.iter()
  }

  /// Number of options set.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` if no option is set.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Whether chunks are coerced to text before the predicate runs.
  pub fn want_strings(&self) -> bool {
    self.flag(WANT_STRINGS)
  }

  /// Whether the transport carries structured records.
  pub fn object_mode(&self) -> bool {
    self.flag(OBJECT_MODE)
  }

  /// The transport buffering hint, if set.
  pub fn high_water_mark(&self) -> Option<u64> {
    self.get(HIGH_WATER_MARK).and_then(Value::as_u64)
  }

  /// The component name, `"filter"` when unset.
  pub fn name(&self) -> &str {
    self
      .get(NAME)
      .and_then(Value::as_str)
      .unwrap_or(DEFAULT_NAME)
  }

  /// Returns a new set of options with `overrides` laid over `self`.
  ///
  /// Keys present in both take the value from `overrides`.
  #[must_use]
  pub fn merge(&self, overrides: &FilterOptions) -> FilterOptions {
    let mut entries = self.entries.clone();
    for (key, value) in &overrides.entries {
      entries.insert(key.clone(), value.clone());
    }
    FilterOptions { entries }
  }

  /// Checks the shape of every recognized option.
  pub fn validate(&self) -> Result<(), FilterError> {
    self.expect(WANT_STRINGS, "a boolean", Value::is_boolean)?;
    self.expect(OBJECT_MODE, "a boolean", Value::is_boolean)?;
    self.expect(HIGH_WATER_MARK, "a non-negative integer", Value::is_u64)?;
    self.expect(NAME, "a string", Value::is_string)?;
    Ok(())
  }

  fn flag(&self, key: &str) -> bool {
    self.get(key).and_then(Value::as_bool).unwrap_or(false)
  }

  fn expect(
    &self,
    key: &str,
    expected: &'static str,
    accepts: fn(&Value) -> bool,
  ) -> Result<(), FilterError> {
    match self.get(key) {
      Some(value) if !accepts(value) => Err(FilterError::InvalidOption {
        key: key.to_string(),
        expected,
        found: describe(value),
      }),
      _ => Ok(()),
    }
  }
}

impl From<Map<String, Value>> for FilterOptions {
  fn from(entries: Map<String, Value>) -> Self {
    Self { entries }
  }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FilterOptions {
  fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
    Self {
      entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
    }
  }
}

fn describe(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(n) if n.is_u64() => "an unsigned integer",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
