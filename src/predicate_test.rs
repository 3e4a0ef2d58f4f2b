//! Tests for predicate calls, chunk views and verdict truthiness.

use crate::chunk::{Chunk, View};
use crate::options::FilterOptions;
use crate::predicate::{Call, Predicate, Verdict};
use bytes::Bytes;
use serde_json::json;
use std::borrow::Cow;

fn as_predicate<T, F, V>(predicate: F) -> F
where
  F: Fn(Call<'_, T>) -> V + Send + Sync + 'static,
  V: Verdict,
{
  predicate
}

fn accepts<V: Verdict>(verdict: V) -> bool {
  verdict.accepts().unwrap()
}

#[test]
fn test_bool_verdict() {
  assert!(accepts(true));
  assert!(!accepts(false));
}

#[test]
fn test_number_truthiness() {
  assert!(accepts(1_i32));
  assert!(accepts(-3_i64));
  assert!(!accepts(0_u8));
  assert!(accepts(0.5_f64));
  assert!(!accepts(0.0_f64));
  assert!(!accepts(f64::NAN));
}

#[test]
fn test_string_truthiness() {
  assert!(accepts("x"));
  assert!(!accepts(""));
  assert!(accepts("abc".to_string()));
  assert!(!accepts(String::new()));
}

#[test]
fn test_option_truthiness() {
  assert!(accepts(Some(true)));
  assert!(accepts(Some(3)));
  assert!(!accepts(Some(false)));
  assert!(!accepts(Some(0)));
  assert!(!accepts(Some("")));
  assert!(!accepts(None::<u32>));
  assert!(!accepts(None::<bool>));
}

#[test]
fn test_json_truthiness() {
  assert!(!accepts(json!(null)));
  assert!(!accepts(json!(false)));
  assert!(!accepts(json!(0)));
  assert!(!accepts(json!("")));
  assert!(accepts(json!(true)));
  assert!(accepts(json!(2.5)));
  assert!(accepts(json!("0")));
  assert!(accepts(json!([])));
  assert!(accepts(json!({})));
}

#[test]
fn test_result_verdict() {
  assert!(accepts(Ok::<_, std::io::Error>(1)));
  assert!(!accepts(Ok::<_, std::io::Error>(false)));

  let err = Err::<bool, _>(std::io::Error::other("boom")).accepts().unwrap_err();
  assert_eq!(err.to_string(), "boom");
}

#[test]
fn test_chunk_text_views() {
  assert_eq!("abc".to_string().text(), "abc");
  assert_eq!(vec![0x68_u8, 0x69].text(), "hi");
  assert_eq!(Bytes::from_static(b"hey").text(), "hey");
  assert_eq!(json!("quoted").text(), "quoted");
  assert_eq!(json!({"v": 1}).text(), r#"{"v":1}"#);
  assert_eq!(42_u32.text(), "42");
  assert!(matches!(vec![0xff_u8].text(), Cow::Owned(_)));
}

#[test]
fn test_call_exposes_chunk_index_and_options() {
  let options = FilterOptions::new().with("foo", "bar");
  let chunk = "hello".to_string();
  let call = Call::new(View::Chunk(&chunk), 7, &options);

  assert_eq!(call.chunk(), Some(&chunk));
  assert_eq!(call.text(), "hello");
  assert_eq!(call.index(), 7);
  assert_eq!(call.options().get("foo"), Some(&json!("bar")));
  assert!(!call.view().is_text());
}

#[test]
fn test_call_with_text_view_hides_chunk() {
  let options = FilterOptions::new();
  let call: Call<'_, Vec<u8>> = Call::new(View::Text(Cow::Borrowed("abc")), 0, &options);

  assert_eq!(call.chunk(), None);
  assert_eq!(call.text(), "abc");
  assert!(call.view().is_text());
}

#[test]
fn test_closures_are_predicates() {
  let options = FilterOptions::new();
  let chunk = 10_u32;
  let predicate = as_predicate(|call: Call<'_, u32>| call.chunk().is_some_and(|v| *v > 5));

  let verdict = predicate
    .evaluate(Call::new(View::Chunk(&chunk), 0, &options))
    .unwrap();
  assert!(verdict);
}
