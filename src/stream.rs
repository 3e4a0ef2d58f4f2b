//! # Filtered Streams
//!
//! [`Filtered`] is a filter instance spliced onto an upstream chunk stream. Polling
//! it pulls one chunk at a time from upstream, runs the [`PredicateAdapter`] on it,
//! and yields the chunks that are forwarded, in their original order.
//!
//! ## Termination
//!
//! - When upstream ends, the filter ends and its status becomes
//!   [`FilterStatus::Completed`].
//! - When the predicate faults, the filter yields that single error, stops pulling
//!   from upstream, and its status becomes [`FilterStatus::Failed`]. A failed filter
//!   never reports `Completed`.
//! - Upstream `Err` items are passed through as they are and do not consume a
//!   sequence index.

use crate::adapter::{Decision, PredicateAdapter};
use crate::chunk::Chunk;
use crate::error::FilterError;
use crate::options::FilterOptions;
use futures::ready;
use futures::stream::{FusedStream, Stream};
use futures::task::{Context, Poll};
use pin_project::pin_project;
use std::pin::Pin;

/// Lifecycle of a running filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStatus {
  /// Still pulling from upstream.
  Open,
  /// Upstream ended normally.
  Completed,
  /// The predicate faulted.
  Failed,
}

/// Counters for a running filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
  /// Chunks handed to the predicate.
  pub seen: u64,
  /// Chunks forwarded downstream.
  pub accepted: u64,
  /// Chunks dropped.
  pub rejected: u64,
}

/// A filter instance reading from `S`.
#[pin_project]
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct Filtered<S, T> {
  #[pin]
  upstream: S,
  adapter: PredicateAdapter<T>,
  status: FilterStatus,
  stats: FilterStats,
}

impl<S, T> Filtered<S, T>
where
  T: Chunk,
{
  pub(crate) fn new(upstream: S, adapter: PredicateAdapter<T>) -> Self {
    Self {
      upstream,
      adapter,
      status: FilterStatus::Open,
      stats: FilterStats::default(),
    }
  }

  /// Read-only view of this instance's options.
  pub fn options(&self) -> &FilterOptions {
    self.adapter.options()
  }

  /// Index that will be passed with the next chunk.
  pub fn index(&self) -> u64 {
    self.adapter.index()
  }

  /// Current lifecycle state.
  pub fn status(&self) -> FilterStatus {
    self.status
  }

  /// Chunk counters so far.
  pub fn stats(&self) -> FilterStats {
    self.stats
  }

  /// Returns the upstream stream, discarding the filter.
  pub fn into_inner(self) -> S {
    self.upstream
  }
}

impl<S, T> Stream for Filtered<S, T>
where
  S: Stream<Item = Result<T, FilterError>>,
  T: Chunk,
{
  type Item = Result<T, FilterError>;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    let mut this = self.project();

    loop {
      if *this.status != FilterStatus::Open {
        return Poll::Ready(None);
      }

      match ready!(this.upstream.as_mut().poll_next(cx)) {
        None => {
          *this.status = FilterStatus::Completed;
          tracing::debug!(
            component = %this.adapter.options().name(),
            seen = this.stats.seen,
            accepted = this.stats.accepted,
            "filter completed"
          );
          return Poll::Ready(None);
        }
        Some(Err(error)) => return Poll::Ready(Some(Err(error))),
        Some(Ok(chunk)) => {
          this.stats.seen += 1;
          match this.adapter.decide(&chunk) {
            Ok(Decision::Forward) => {
              this.stats.accepted += 1;
              return Poll::Ready(Some(Ok(chunk)));
            }
            Ok(Decision::Discard) => {
              this.stats.rejected += 1;
            }
            Err(error) => {
              *this.status = FilterStatus::Failed;
              tracing::error!(
                component = %this.adapter.options().name(),
                error = %error,
                "filter predicate failed, stopping"
              );
              return Poll::Ready(Some(Err(error)));
            }
          }
        }
      }
    }
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    if self.status == FilterStatus::Open {
      let (_, upper) = self.upstream.size_hint();
      (0, upper)
    } else {
      (0, Some(0))
    }
  }
}

impl<S, T> FusedStream for Filtered<S, T>
where
  S: Stream<Item = Result<T, FilterError>>,
  T: Chunk,
{
  fn is_terminated(&self) -> bool {
    self.status != FilterStatus::Open
  }
}

/// Splices filters onto chunk streams.
pub trait FilterStreamExt<T>: Stream<Item = Result<T, FilterError>> + Sized
where
  T: Chunk,
{
  /// Runs `filter` over this stream.
  fn filter_with(self, filter: crate::Filter<T>) -> Filtered<Self, T> {
    filter.pipe(self)
  }
}

impl<S, T> FilterStreamExt<T> for S
where
  S: Stream<Item = Result<T, FilterError>>,
  T: Chunk,
{
}
