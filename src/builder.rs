//! Builder-style construction of filters.
//!
//! ```rust
//! use stream_filter::{Call, FilterBuilder, FilterError};
//!
//! let filter = FilterBuilder::<Vec<u8>>::new()
//!   .want_strings(true)
//!   .name("short-lines")
//!   .predicate(|call: Call<'_, Vec<u8>>| call.text().len() <= 5)
//!   .build()
//!   .unwrap();
//! assert_eq!(filter.name(), "short-lines");
//!
//! let missing = FilterBuilder::<Vec<u8>>::new().build();
//! assert!(matches!(missing, Err(FilterError::MissingPredicate)));
//! ```

use crate::chunk::Chunk;
use crate::error::FilterError;
use crate::factory::FilterFactory;
use crate::filter::Filter;
use crate::options::FilterOptions;
use crate::predicate::{Call, Predicate, Verdict};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Collects options and a predicate, then builds a factory or an instance.
pub struct FilterBuilder<T> {
  options: FilterOptions,
  predicate: Option<Arc<dyn Predicate<T>>>,
}

impl<T: Chunk> FilterBuilder<T> {
  /// Starts with empty options and no predicate.
  pub fn new() -> Self {
    Self {
      options: FilterOptions::new(),
      predicate: None,
    }
  }

  /// Merges `options` over the options collected so far.
  #[must_use]
  pub fn options(mut self, options: &FilterOptions) -> Self {
    self.options = self.options.merge(options);
    self
  }

  /// Sets one option.
  #[must_use]
  pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.options = self.options.with(key, value);
    self
  }

  /// Sets `wantStrings`.
  #[must_use]
  pub fn want_strings(mut self, want_strings: bool) -> Self {
    self.options = self.options.with_want_strings(want_strings);
    self
  }

  /// Sets `objectMode`.
  #[must_use]
  pub fn object_mode(mut self, object_mode: bool) -> Self {
    self.options = self.options.with_object_mode(object_mode);
    self
  }

  /// Sets `highWaterMark`.
  #[must_use]
  pub fn high_water_mark(mut self, high_water_mark: u64) -> Self {
    self.options = self.options.with_high_water_mark(high_water_mark);
    self
  }

  /// Sets the component name.
  #[must_use]
  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.options = self.options.with_name(name);
    self
  }

  /// Sets the predicate, replacing any previous one.
  #[must_use]
  pub fn predicate<F, V>(mut self, predicate: F) -> Self
  where
    F: Fn(Call<'_, T>) -> V + Send + Sync + 'static,
    V: Verdict,
  {
    let predicate: Arc<dyn Predicate<T>> = Arc::new(predicate);
    self.predicate = Some(predicate);
    self
  }

  /// Builds a reusable factory.
  pub fn build_factory(self) -> Result<FilterFactory<T>, FilterError> {
    let predicate = self.predicate.ok_or(FilterError::MissingPredicate)?;
    FilterFactory::from_parts(self.options, predicate)
  }

  /// Builds a single instance.
  pub fn build(self) -> Result<Filter<T>, FilterError> {
    Ok(self.build_factory()?.instantiate())
  }
}

impl<T: Chunk> Default for FilterBuilder<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> fmt::Debug for FilterBuilder<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FilterBuilder")
      .field("options", &self.options)
      .field("has_predicate", &self.predicate.is_some())
      .finish()
  }
}
