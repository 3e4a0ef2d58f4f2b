//! Filter instances.

use crate::adapter::PredicateAdapter;
use crate::chunk::Chunk;
use crate::error::FilterError;
use crate::input::{ChunkStream, Input};
use crate::options::FilterOptions;
use crate::output::Output;
use crate::stream::Filtered;
use crate::transformer::Transformer;
use async_trait::async_trait;
use futures::Stream;

/// One filter instance, not yet spliced into a pipeline.
///
/// Created by [`FilterFactory::instantiate`](crate::FilterFactory::instantiate) or
/// by the `make*` functions. An instance owns its sequence index; splicing it with
/// [`Filter::pipe`] or [`Transformer::transform`] moves that index into the running
/// stream.
#[derive(Debug)]
pub struct Filter<T> {
  adapter: PredicateAdapter<T>,
}

impl<T: Chunk> Filter<T> {
  pub(crate) fn new(adapter: PredicateAdapter<T>) -> Self {
    Self { adapter }
  }

  /// Read-only view of this instance's options.
  pub fn options(&self) -> &FilterOptions {
    self.adapter.options()
  }

  /// The component name of this instance.
  pub fn name(&self) -> &str {
    self.adapter.options().name()
  }

  /// Index that will be passed with the first chunk.
  pub fn index(&self) -> u64 {
    self.adapter.index()
  }

  /// Splices this filter onto `upstream`.
  pub fn pipe<S>(self, upstream: S) -> Filtered<S, T>
  where
    S: Stream<Item = Result<T, FilterError>>,
  {
    Filtered::new(upstream, self.adapter)
  }
}

impl<T: Chunk> Input for Filter<T> {
  type Input = T;
  type InputStream = ChunkStream<T>;
}

impl<T: Chunk> Output for Filter<T> {
  type Output = T;
  type OutputStream = ChunkStream<T>;
}

#[async_trait]
impl<T: Chunk> Transformer for Filter<T> {
  async fn transform(self, input: Self::InputStream) -> Self::OutputStream {
    Box::pin(self.pipe(input))
  }

  fn options(&self) -> &FilterOptions {
    self.adapter.options()
  }
}
