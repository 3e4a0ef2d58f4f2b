//! Chunks and the views a predicate sees of them.

use bytes::Bytes;
use serde_json::Value;
use std::borrow::Cow;

/// One unit of data flowing through a filter.
///
/// Every chunk has a textual view, used when a filter is configured with
/// `wantStrings`. Byte chunks decode as lossy UTF-8, JSON strings yield their
/// contents without quotes, and other JSON values yield their JSON text.
pub trait Chunk: Send + 'static {
  /// The textual view of this chunk.
  fn text(&self) -> Cow<'_, str>;
}

impl Chunk for String {
  fn text(&self) -> Cow<'_, str> {
    Cow::Borrowed(self.as_str())
  }
}

impl Chunk for &'static str {
  fn text(&self) -> Cow<'_, str> {
    Cow::Borrowed(*self)
  }
}

impl Chunk for Vec<u8> {
  fn text(&self) -> Cow<'_, str> {
    String::from_utf8_lossy(self)
  }
}

impl Chunk for Bytes {
  fn text(&self) -> Cow<'_, str> {
    String::from_utf8_lossy(self)
  }
}

impl Chunk for Value {
  fn text(&self) -> Cow<'_, str> {
    match self {
      Value::String(s) => Cow::Borrowed(s.as_str()),
      other => Cow::Owned(other.to_string()),
    }
  }
}

macro_rules! impl_chunk_display {
  ($($ty:ty),* $(,)?) => {
    $(
      impl Chunk for $ty {
        fn text(&self) -> Cow<'_, str> {
          Cow::Owned(self.to_string())
        }
      }
    )*
  };
}

impl_chunk_display!(bool, char, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

/// What the predicate is shown for a chunk.
#[derive(Debug)]
pub enum View<'a, T> {
  /// The chunk itself.
  Chunk(&'a T),
  /// The chunk's textual view, when `wantStrings` is set.
  Text(Cow<'a, str>),
}

impl<'a, T: Chunk> View<'a, T> {
  /// The chunk, unless the filter coerced it to text.
  pub fn chunk(&self) -> Option<&'a T> {
    match self {
      View::Chunk(chunk) => Some(*chunk),
      View::Text(_) => None,
    }
  }

  /// The textual view, computing it on demand for uncoerced chunks.
  pub fn text(&self) -> Cow<'_, str> {
    match self {
      View::Chunk(chunk) => chunk.text(),
      View::Text(text) => Cow::Borrowed(text.as_ref()),
    }
  }

  /// Returns `true` if the predicate is being shown the coerced text.
  pub fn is_text(&self) -> bool {
    matches!(self, View::Text(_))
  }
}
