//! # Stream Factory
//!
//! A [`FilterFactory`] binds a predicate to a set of options and mints independent
//! [`Filter`] instances from them. Every instance gets its own sequence index,
//! starting at 0, and its own copy of the options; the predicate is shared.
//!
//! ```rust
//! use stream_filter::{make_factory, Call};
//! use stream_filter::options::FilterOptions;
//!
//! let factory = make_factory(|call: Call<'_, String>| !call.text().is_empty());
//!
//! let first = factory.instantiate();
//! let second = factory
//!   .instantiate_with(&FilterOptions::new().with_name("second"))
//!   .unwrap();
//!
//! assert_eq!(first.name(), "filter");
//! assert_eq!(second.name(), "second");
//! ```

use crate::adapter::PredicateAdapter;
use crate::chunk::Chunk;
use crate::error::FilterError;
use crate::filter::Filter;
use crate::options::FilterOptions;
use crate::predicate::{Call, Predicate, Verdict};
use std::fmt;
use std::sync::Arc;

/// A reusable template for filter instances.
pub struct FilterFactory<T> {
  predicate: Arc<dyn Predicate<T>>,
  options: Arc<FilterOptions>,
}

impl<T: Chunk> FilterFactory<T> {
  /// Binds `predicate` to empty options.
  pub fn new<F, V>(predicate: F) -> Self
  where
    F: Fn(Call<'_, T>) -> V + Send + Sync + 'static,
    V: Verdict,
  {
    Self::bind(FilterOptions::new(), Arc::new(predicate))
  }

  /// Binds `predicate` to `options`, validating the options first.
  pub fn with_options<F, V>(options: FilterOptions, predicate: F) -> Result<Self, FilterError>
  where
    F: Fn(Call<'_, T>) -> V + Send + Sync + 'static,
    V: Verdict,
  {
    Self::from_parts(options, Arc::new(predicate))
  }

  pub(crate) fn from_parts(
    options: FilterOptions,
    predicate: Arc<dyn Predicate<T>>,
  ) -> Result<Self, FilterError> {
    options.validate()?;
    Ok(Self::bind(options, predicate))
  }

  /// `options` must already be valid.
  pub(crate) fn bind(options: FilterOptions, predicate: Arc<dyn Predicate<T>>) -> Self {
    tracing::debug!(
      component = %options.name(),
      want_strings = options.want_strings(),
      object_mode = options.object_mode(),
      "filter factory created"
    );
    Self {
      predicate,
      options: Arc::new(options),
    }
  }

  /// The options every instance starts from.
  pub fn options(&self) -> &FilterOptions {
    &self.options
  }

  /// The component name instances inherit unless overridden.
  pub fn name(&self) -> &str {
    self.options.name()
  }

  /// Creates a new instance with the factory's options.
  pub fn instantiate(&self) -> Filter<T> {
    self.spawn(Arc::clone(&self.options))
  }

  /// Creates a new instance with `overrides` merged over the factory's options.
  pub fn instantiate_with(&self, overrides: &FilterOptions) -> Result<Filter<T>, FilterError> {
    let options = self.options.merge(overrides);
    options.validate()?;
    Ok(self.spawn(Arc::new(options)))
  }

  fn spawn(&self, options: Arc<FilterOptions>) -> Filter<T> {
    tracing::debug!(component = %options.name(), "filter instance created");
    Filter::new(PredicateAdapter::new(Arc::clone(&self.predicate), options))
  }
}

impl<T> Clone for FilterFactory<T> {
  fn clone(&self) -> Self {
    Self {
      predicate: Arc::clone(&self.predicate),
      options: Arc::clone(&self.options),
    }
  }
}

impl<T> fmt::Debug for FilterFactory<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FilterFactory")
      .field("options", &self.options)
      .finish_non_exhaustive()
  }
}
