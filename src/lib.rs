//! # stream-filter
//!
//! Predicate-driven filter streams for chunked async pipelines.
//!
//! A filter sits between a producer and a consumer and forwards only the chunks its
//! predicate accepts, in their original order and with their original boundaries.
//! Predicates see each chunk together with its 0-based position in the running
//! instance and the instance's options.
//!
//! ## Entry points
//!
//! - [`make`] / [`make_with`]: build one ready filter instance.
//! - [`make_object_mode`]: `make_with` with `{objectMode: true}`.
//! - [`make_factory`] / [`make_factory_with`]: build a reusable [`FilterFactory`]
//!   minting independent instances, each with its own sequence index.
//! - [`make_factory_object_mode`]: `make_factory_with` with `{objectMode: true}`.
//! - [`FilterBuilder`]: the same, assembled step by step.
//!
//! ## Quick Start
//!
//! ```rust
//! use futures::{stream, TryStreamExt};
//! use stream_filter::{make, Call};
//!
//! # async fn example() -> Result<(), stream_filter::FilterError> {
//! let chunks = stream::iter(
//!   ["a", "b", "cdefghijk", "lmnopqrst", "u", "vwxyz"]
//!     .into_iter()
//!     .map(|s| Ok(s.to_string())),
//! );
//!
//! let filter = make(|call: Call<'_, String>| call.text().len() <= 5);
//! let kept: Vec<String> = filter.pipe(chunks).try_collect().await?;
//! assert_eq!(kept.concat(), "abuvwxyz");
//! # Ok(())
//! # }
//! ```
//!
//! ## Faults
//!
//! A predicate that returns an `Err` or panics ends its instance: the fault is
//! yielded once as [`FilterError::Predicate`], and nothing after it is pulled from
//! upstream. Upstream errors pass through untouched.

#![deny(missing_docs)]

/// Predicate adapter: coercion, verdicts and the per-instance index.
pub mod adapter;
/// Builder-style construction.
pub mod builder;
/// Chunk trait and predicate views.
pub mod chunk;
/// Error types.
pub mod error;
/// Reusable filter factories.
pub mod factory;
/// Filter instances.
pub mod filter;
/// Input trait for stream consumers.
pub mod input;
/// Filter configuration.
pub mod options;
/// Output trait for stream producers.
pub mod output;
/// Predicate contract and verdicts.
pub mod predicate;
/// Running filter streams.
pub mod stream;
/// Transformer trait.
pub mod transformer;

pub use builder::FilterBuilder;
pub use chunk::{Chunk, View};
pub use error::FilterError;
pub use factory::FilterFactory;
pub use filter::Filter;
pub use input::{ChunkStream, Input};
pub use options::FilterOptions;
pub use output::Output;
pub use predicate::{Call, Predicate, Verdict};
pub use stream::{FilterStats, FilterStatus, FilterStreamExt, Filtered};
pub use transformer::Transformer;

use std::sync::Arc;

/// Builds one filter instance with empty options.
pub fn make<T, F, V>(predicate: F) -> Filter<T>
where
  T: Chunk,
  F: Fn(Call<'_, T>) -> V + Send + Sync + 'static,
  V: Verdict,
{
  make_factory(predicate).instantiate()
}

/// Builds one filter instance bound to `options`.
pub fn make_with<T, F, V>(options: FilterOptions, predicate: F) -> Result<Filter<T>, FilterError>
where
  T: Chunk,
  F: Fn(Call<'_, T>) -> V + Send + Sync + 'static,
  V: Verdict,
{
  Ok(make_factory_with(options, predicate)?.instantiate())
}

/// Builds one filter instance for structured records.
pub fn make_object_mode<T, F, V>(predicate: F) -> Filter<T>
where
  T: Chunk,
  F: Fn(Call<'_, T>) -> V + Send + Sync + 'static,
  V: Verdict,
{
  make_factory_object_mode(predicate).instantiate()
}

/// Builds a reusable factory with empty options.
pub fn make_factory<T, F, V>(predicate: F) -> FilterFactory<T>
where
  T: Chunk,
  F: Fn(Call<'_, T>) -> V + Send + Sync + 'static,
  V: Verdict,
{
  FilterFactory::new(predicate)
}

/// Builds a reusable factory bound to `options`.
pub fn make_factory_with<T, F, V>(
  options: FilterOptions,
  predicate: F,
) -> Result<FilterFactory<T>, FilterError>
where
  T: Chunk,
  F: Fn(Call<'_, T>) -> V + Send + Sync + 'static,
  V: Verdict,
{
  FilterFactory::with_options(options, predicate)
}

/// Builds a reusable factory for structured records.
pub fn make_factory_object_mode<T, F, V>(predicate: F) -> FilterFactory<T>
where
  T: Chunk,
  F: Fn(Call<'_, T>) -> V + Send + Sync + 'static,
  V: Verdict,
{
  FilterFactory::bind(FilterOptions::object_mode_defaults(), Arc::new(predicate))
}

#[cfg(test)]
mod factory_test;
#[cfg(test)]
mod predicate_test;
