//! Input trait for components that consume chunk streams.
//!
//! A chunk stream yields `Result<T, FilterError>` items: `Ok` carries a chunk, `Err`
//! carries a fault that downstream components pass along.
//!
//! ```rust
//! use stream_filter::input::{ChunkStream, Input};
//!
//! struct Sink;
//!
//! impl Input for Sink {
//!   type Input = String;
//!   type InputStream = ChunkStream<String>;
//! }
//! ```

use crate::error::FilterError;
use futures::Stream;
use std::pin::Pin;

/// A boxed chunk stream, the default stream type of every component.
pub type ChunkStream<T> = Pin<Box<dyn Stream<Item = Result<T, FilterError>> + Send>>;

/// Trait for components that consume chunk streams.
pub trait Input {
  /// The chunk type consumed.
  type Input: Send + 'static;
  /// The stream type consumed.
  type InputStream: Stream<Item = Result<Self::Input, FilterError>> + Send + 'static;
}
