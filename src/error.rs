//! # Error Handling
//!
//! Errors raised while building filters and while running them.
//!
//! ## Taxonomy
//!
//! - **Usage errors**: [`FilterError::MissingPredicate`], [`FilterError::InvalidOption`]
//!   and [`FilterError::InvalidConfig`]. These are returned synchronously from the
//!   construction entry points and never appear on a running stream.
//! - **Predicate faults**: [`FilterError::Predicate`]. Emitted exactly once as an item
//!   of the filter's output stream, after which that filter instance stops.
//! - **Upstream faults**: [`FilterError::Upstream`], or any other `Err` item produced
//!   upstream. These are passed through unchanged.
//!
//! ## Example
//!
//! ```rust
//! use stream_filter::error::FilterError;
//!
//! let err = FilterError::upstream(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
//! assert!(!err.is_usage());
//! assert_eq!(err.index(), None);
//! ```

use std::any::Any;
use std::error::Error;
use thiserror::Error;

/// Boxed error type carried as the source of predicate and upstream faults.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Errors produced by filter construction and filter streams.
#[derive(Debug, Error)]
pub enum FilterError {
  /// A filter was built without a predicate.
  #[error("a filter requires a predicate")]
  MissingPredicate,

  /// A recognized option holds a value of the wrong shape.
  #[error("option `{key}` must be {expected}, found {found}")]
  InvalidOption {
    /// The option key.
    key: String,
    /// Description of the accepted shape.
    expected: &'static str,
    /// Description of the shape that was supplied.
    found: &'static str,
  },

  /// A textual configuration could not be parsed into an options map.
  #[error("invalid filter configuration: {0}")]
  InvalidConfig(#[from] serde_json::Error),

  /// The predicate failed while evaluating a chunk.
  #[error("predicate failed in {component} at chunk {index}: {source}")]
  Predicate {
    /// Name of the filter instance.
    component: String,
    /// Sequence index of the chunk that was being evaluated.
    index: u64,
    /// The failure reported by the predicate.
    #[source]
    source: BoxError,
  },

  /// An error produced upstream of the filter.
  #[error("upstream error: {0}")]
  Upstream(#[source] BoxError),
}

impl FilterError {
  /// Wraps an arbitrary upstream failure.
  pub fn upstream<E>(error: E) -> Self
  where
    E: Into<BoxError>,
  {
    Self::Upstream(error.into())
  }

  /// Returns `true` for errors raised while constructing a filter.
  pub fn is_usage(&self) -> bool {
    matches!(
      self,
      Self::MissingPredicate | Self::InvalidOption { .. } | Self::InvalidConfig(_)
    )
  }

  /// Returns `true` for predicate faults.
  pub fn is_predicate(&self) -> bool {
    matches!(self, Self::Predicate { .. })
  }

  /// The sequence index of the chunk that faulted, for predicate faults.
  pub fn index(&self) -> Option<u64> {
    match self {
      Self::Predicate { index, .. } => Some(*index),
      _ => None,
    }
  }
}

/// A predicate that panicked instead of returning.
#[derive(Debug, Error)]
#[error("predicate panicked: {0}")]
pub struct PredicatePanic(pub String);

impl PredicatePanic {
  pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
    let message = match payload.downcast::<String>() {
      Ok(message) => *message,
      Err(payload) => match payload.downcast::<&'static str>() {
        Ok(message) => (*message).to_string(),
        Err(_) => "non-string panic payload".to_string(),
      },
    };
    Self(message)
  }
}

/// Name and type of a component, for log and error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
  /// The configured component name.
  pub name: String,
  /// The Rust type name of the component.
  pub type_name: String,
}

impl ComponentInfo {
  /// Creates a new `ComponentInfo`.
  pub fn new(name: String, type_name: String) -> Self {
    Self { name, type_name }
  }
}
