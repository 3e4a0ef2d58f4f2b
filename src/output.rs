//! Output trait for components that produce chunk streams.

use crate::error::FilterError;
use futures::Stream;

/// Trait for components that produce chunk streams.
pub trait Output {
  /// The chunk type produced.
  type Output: Send + 'static;
  /// The stream type produced.
  type OutputStream: Stream<Item = Result<Self::Output, FilterError>> + Send + 'static;
}
