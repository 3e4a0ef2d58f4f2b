//! # Predicates
//!
//! A predicate decides, chunk by chunk, whether a filter forwards its input.
//!
//! Predicates are plain closures taking a [`Call`]. The call exposes the chunk (or
//! its textual view when the filter was built with `wantStrings`), the chunk's
//! sequence index within the running instance, and the instance's options.
//!
//! ## Verdicts
//!
//! The explicit contract is a `bool`. Other return types are accepted through the
//! [`Verdict`] trait, which follows the usual truthiness rule:
//!
//! - numbers accept when non-zero and not NaN;
//! - strings accept when non-empty;
//! - `Option<V>` defers to `V` when `Some` and rejects `None`;
//! - JSON values accept unless `null`, `false`, `0`, `NaN`, or `""`;
//! - `Result<V, E>` defers to `V` on `Ok` and reports a predicate fault on `Err`.
//!
//! ```rust
//! use stream_filter::predicate::Call;
//!
//! let short = |call: Call<'_, String>| call.text().len() <= 5;
//! let fallible = |call: Call<'_, String>| -> Result<bool, std::num::ParseIntError> {
//!   Ok(call.text().parse::<i64>()? > 0)
//! };
//! # let _ = (short, fallible);
//! ```

use crate::chunk::{Chunk, View};
use crate::error::BoxError;
use crate::options::FilterOptions;
use serde_json::Value;
use std::borrow::Cow;

/// The arguments a predicate is called with.
#[derive(Debug)]
pub struct Call<'a, T> {
  view: View<'a, T>,
  index: u64,
  options: &'a FilterOptions,
}

impl<'a, T: Chunk> Call<'a, T> {
  pub(crate) fn new(view: View<'a, T>, index: u64, options: &'a FilterOptions) -> Self {
    Self {
      view,
      index,
      options,
    }
  }

  /// What the predicate is shown for this chunk.
  pub fn view(&self) -> &View<'a, T> {
    &self.view
  }

  /// The chunk, unless the filter coerces chunks to text.
  pub fn chunk(&self) -> Option<&'a T> {
    self.view.chunk()
  }

  /// The chunk's textual view.
  pub fn text(&self) -> Cow<'_, str> {
    self.view.text()
  }

  /// 0-based position of this chunk within the running instance.
  pub fn index(&self) -> u64 {
    self.index
  }

  /// The options of the instance evaluating this chunk.
  pub fn options(&self) -> &'a FilterOptions {
    self.options
  }
}

/// A value a predicate may return, converted into accept or reject.
pub trait Verdict {
  /// `Ok(true)` to forward the chunk, `Ok(false)` to drop it, `Err` for a fault.
  fn accepts(self) -> Result<bool, BoxError>;
}

impl Verdict for bool {
  fn accepts(self) -> Result<bool, BoxError> {
    Ok(self)
  }
}

macro_rules! impl_verdict_int {
  ($($ty:ty),* $(,)?) => {
    $(
      impl Verdict for $ty {
        fn accepts(self) -> Result<bool, BoxError> {
          Ok(self != 0)
        }
      }
    )*
  };
}

impl_verdict_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Verdict for f32 {
  fn accepts(self) -> Result<bool, BoxError> {
    Ok(self != 0.0 && !self.is_nan())
  }
}

impl Verdict for f64 {
  fn accepts(self) -> Result<bool, BoxError> {
    Ok(self != 0.0 && !self.is_nan())
  }
}

impl Verdict for String {
  fn accepts(self) -> Result<bool, BoxError> {
    Ok(!self.is_empty())
  }
}

impl Verdict for &str {
  fn accepts(self) -> Result<bool, BoxError> {
    Ok(!self.is_empty())
  }
}

impl<V: Verdict> Verdict for Option<V> {
  fn accepts(self) -> Result<bool, BoxError> {
    match self {
      Some(verdict) => verdict.accepts(),
      None => Ok(false),
    }
  }
}

impl Verdict for Value {
  fn accepts(self) -> Result<bool, BoxError> {
    Ok(match self {
      Value::Null => false,
      Value::Bool(b) => b,
      Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
      Value::String(s) => !s.is_empty(),
      Value::Array(_) | Value::Object(_) => true,
    })
  }
}

impl<V, E> Verdict for Result<V, E>
where
  V: Verdict,
  E: Into<BoxError>,
{
  fn accepts(self) -> Result<bool, BoxError> {
    match self {
      Ok(verdict) => verdict.accepts(),
      Err(error) => Err(error.into()),
    }
  }
}

/// A predicate over chunks of type `T`.
///
/// Implemented for every `Fn(Call<'_, T>) -> impl Verdict` closure. Predicates are
/// shared between all instances of a factory, so they must be `Send + Sync`.
pub trait Predicate<T>: Send + Sync + 'static {
  /// Evaluates one chunk.
  fn evaluate(&self, call: Call<'_, T>) -> Result<bool, BoxError>;
}

impl<T, F, V> Predicate<T> for F
where
  F: Fn(Call<'_, T>) -> V + Send + Sync + 'static,
  V: Verdict,
{
  fn evaluate(&self, call: Call<'_, T>) -> Result<bool, BoxError> {
    self(call).accepts()
  }
}
