//! # Transformer Trait
//!
//! Components that sit between a producer and a consumer: they receive a chunk
//! stream on their input side and return a chunk stream for their output side.
//!
//! ```rust
//! use futures::{stream, TryStreamExt};
//! use stream_filter::{make, Call, FilterError, Transformer};
//!
//! # async fn example() -> Result<(), FilterError> {
//! let filter = make(|call: Call<'_, String>| call.text().starts_with('a'));
//! let input = Box::pin(stream::iter(vec![
//!   Ok::<_, FilterError>("apple".to_string()),
//!   Ok("banana".to_string()),
//! ]));
//!
//! let output: Vec<String> = filter.transform(input).await.try_collect().await?;
//! assert_eq!(output, vec!["apple".to_string()]);
//! # Ok(())
//! # }
//! ```

use crate::error::ComponentInfo;
use crate::options::FilterOptions;
use crate::{input::Input, output::Output};
use async_trait::async_trait;

/// Trait for components that transform chunk streams.
///
/// A transformer is consumed when it is spliced: its per-instance state moves into
/// the returned stream, so one instance serves exactly one pipeline.
#[async_trait]
pub trait Transformer: Input + Output + Send + Sized {
  /// Splices this component onto `input` and returns its output side.
  async fn transform(self, input: Self::InputStream) -> Self::OutputStream;

  /// The configuration bound to this component.
  fn options(&self) -> &FilterOptions;

  /// Name and type information for logs and error reports.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo::new(
      self.options().name().to_string(),
      std::any::type_name::<Self>().to_string(),
    )
  }
}
