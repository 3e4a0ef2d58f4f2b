//! # Predicate Adapter
//!
//! Turns a predicate and a chunk into a forward/drop [`Decision`], and owns the
//! sequence index of one filter instance.
//!
//! For every chunk the adapter:
//!
//! 1. builds the predicate's view, coercing the chunk to text when the instance's
//!    options set `wantStrings`;
//! 2. calls the predicate with that view and the current index;
//! 3. advances the index by one, whatever the outcome;
//! 4. reports the decision, or a [`FilterError::Predicate`] if the predicate returned
//!    an error, or if coercion or the predicate panicked.
//!
//! The chunk itself is never modified: the caller forwards the original value when
//! the decision is [`Decision::Forward`].

use crate::chunk::{Chunk, View};
use crate::error::{BoxError, FilterError, PredicatePanic};
use crate::options::FilterOptions;
use crate::predicate::{Call, Predicate};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Outcome of evaluating one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
  /// Forward the original chunk downstream.
  Forward,
  /// Consume the chunk silently.
  Discard,
}

/// Per-instance predicate state.
pub struct PredicateAdapter<T> {
  predicate: Arc<dyn Predicate<T>>,
  options: Arc<FilterOptions>,
  coerce: bool,
  index: u64,
}

impl<T: Chunk> PredicateAdapter<T> {
  /// Creates an adapter whose index starts at 0.
  pub fn new(predicate: Arc<dyn Predicate<T>>, options: Arc<FilterOptions>) -> Self {
    let coerce = options.want_strings();
    Self {
      predicate,
      options,
      coerce,
      index: 0,
    }
  }

  /// Index that will be passed with the next chunk.
  pub fn index(&self) -> u64 {
    self.index
  }

  /// Options this adapter was created with.
  pub fn options(&self) -> &FilterOptions {
    &self.options
  }

  /// Evaluates `chunk` and advances the index.
  pub fn decide(&mut self, chunk: &T) -> Result<Decision, FilterError> {
    let index = self.index;
    let coerce = self.coerce;
    let options = &self.options;
    let predicate = &self.predicate;
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
      let view = if coerce {
        View::Text(chunk.text())
      } else {
        View::Chunk(chunk)
      };
      predicate.evaluate(Call::new(view, index, options))
    }));
    self.index += 1;

    match outcome {
      Ok(Ok(accepted)) => {
        tracing::trace!(
          component = %self.options.name(),
          index,
          accepted,
          "filter decision"
        );
        Ok(if accepted {
          Decision::Forward
        } else {
          Decision::Discard
        })
      }
      Ok(Err(source)) => Err(self.fault(index, source)),
      Err(payload) => Err(self.fault(index, Box::new(PredicatePanic::from_payload(payload)))),
    }
  }

  fn fault(&self, index: u64, source: BoxError) -> FilterError {
    FilterError::Predicate {
      component: self.options.name().to_string(),
      index,
      source,
    }
  }
}

impl<T> fmt::Debug for PredicateAdapter<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PredicateAdapter")
      .field("options", &self.options)
      .field("coerce", &self.coerce)
      .field("index", &self.index)
      .finish_non_exhaustive()
  }
}
