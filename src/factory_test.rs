//! # Stream Factory Test Suite
//!
//! Covers factories and the `make*` entry points: option binding, per-instance
//! overrides, and isolation of sequence indices between instances.

use crate::error::FilterError;
use crate::options::FilterOptions;
use crate::predicate::Call;
use crate::stream::FilterStatus;
use crate::{
  make, make_factory, make_factory_object_mode, make_factory_with, make_object_mode, make_with,
};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn chunks<T>(items: Vec<T>) -> stream::Iter<std::vec::IntoIter<Result<T, FilterError>>> {
  stream::iter(items.into_iter().map(Ok).collect::<Vec<_>>())
}

#[test]
fn test_make_factory_uses_empty_options() {
  let factory = make_factory(|_: Call<'_, String>| true);

  assert!(factory.options().is_empty());
  assert_eq!(factory.name(), "filter");
}

#[test]
fn test_object_mode_entry_points_set_object_mode() {
  let factory = make_factory_object_mode(|_: Call<'_, Value>| true);
  let filter = make_object_mode(|_: Call<'_, Value>| true);

  assert!(factory.options().object_mode());
  assert!(filter.options().object_mode());
  assert_eq!(filter.index(), 0);
}

#[test]
fn test_make_with_rejects_invalid_options() {
  let result = make_with(
    FilterOptions::new().with("wantStrings", 1),
    |_: Call<'_, String>| true,
  );

  assert!(matches!(result, Err(FilterError::InvalidOption { .. })));
}

#[test]
fn test_make_factory_with_binds_options() {
  let options = FilterOptions::new().with_object_mode(true).with("foo", "bar");
  let factory = make_factory_with(options.clone(), |_: Call<'_, Value>| true).unwrap();

  assert_eq!(factory.options(), &options);
  assert_eq!(factory.instantiate().options(), &options);
}

#[test]
fn test_instantiate_with_merges_overrides() {
  let factory = make_factory_with(
    FilterOptions::new().with_object_mode(true).with("foo", "bar"),
    |_: Call<'_, Value>| true,
  )
  .unwrap();

  let filter = factory
    .instantiate_with(&FilterOptions::new().with("foo", "baz").with_name("second"))
    .unwrap();

  assert!(filter.options().object_mode());
  assert_eq!(filter.options().get("foo"), Some(&json!("baz")));
  assert_eq!(filter.name(), "second");
  // Factory defaults are unchanged.
  assert_eq!(factory.options().get("foo"), Some(&json!("bar")));
}

#[test]
fn test_instantiate_with_rejects_invalid_overrides() {
  let factory = make_factory(|_: Call<'_, String>| true);

  let result = factory.instantiate_with(&FilterOptions::new().with("objectMode", "yes"));
  assert!(matches!(result, Err(FilterError::InvalidOption { .. })));
}

#[tokio::test]
async fn test_make_runs_once() {
  let filter = make(|call: Call<'_, u32>| call.chunk().is_some_and(|v| v % 2 == 0));

  let result: Vec<u32> = filter
    .pipe(chunks(vec![1, 2, 3, 4, 5, 6]))
    .try_collect()
    .await
    .unwrap();

  assert_eq!(result, vec![2, 4, 6]);
}

#[tokio::test]
async fn test_instances_have_independent_indices() {
  let factory = make_factory(|call: Call<'_, String>| call.index() < 2);

  let mut first = factory.instantiate().pipe(chunks(
    ["a1", "a2", "a3", "a4"].iter().map(|s| s.to_string()).collect(),
  ));
  let mut second = factory.instantiate().pipe(chunks(
    ["b1", "b2", "b3", "b4"].iter().map(|s| s.to_string()).collect(),
  ));

  // Interleave the two instances.
  assert_eq!(first.next().await.unwrap().unwrap(), "a1");
  assert_eq!(second.next().await.unwrap().unwrap(), "b1");
  assert_eq!(first.next().await.unwrap().unwrap(), "a2");
  assert_eq!(second.next().await.unwrap().unwrap(), "b2");
  assert!(first.next().await.is_none());
  assert!(second.next().await.is_none());
  assert_eq!(first.index(), 4);
  assert_eq!(second.index(), 4);
}

#[tokio::test]
async fn test_instances_share_predicate_but_not_state() {
  let indices = Arc::new(Mutex::new(Vec::new()));
  let recorder = Arc::clone(&indices);
  let factory = make_factory(move |call: Call<'_, u32>| {
    recorder.lock().unwrap().push(call.index());
    true
  });

  let first: Vec<u32> = factory
    .instantiate()
    .pipe(chunks(vec![10, 11, 12]))
    .try_collect()
    .await
    .unwrap();
  let second: Vec<u32> = factory
    .clone()
    .instantiate()
    .pipe(chunks(vec![20, 21]))
    .try_collect()
    .await
    .unwrap();

  assert_eq!(first, vec![10, 11, 12]);
  assert_eq!(second, vec![20, 21]);
  assert_eq!(*indices.lock().unwrap(), vec![0, 1, 2, 0, 1]);
}

#[tokio::test]
async fn test_predicate_sees_instance_options() {
  let factory = make_factory_with(
    FilterOptions::new().with_object_mode(true).with("foo", "bar"),
    |call: Call<'_, Value>| {
      assert_eq!(call.options().get("foo"), Some(&json!("bar")));
      call.chunk().is_some_and(|r| r["skip"] != true)
    },
  )
  .unwrap();

  let records = vec![
    json!({"foo": "bar"}),
    json!({"foo": "baz", "skip": true}),
    json!({"foo": "bif", "skip": true}),
    json!({"foo": "blah"}),
    json!({"foo": "buzz"}),
  ];
  let result: Vec<Value> = factory
    .instantiate()
    .pipe(chunks(records))
    .try_collect()
    .await
    .unwrap();

  assert_eq!(result.len(), 3);
  assert!(result.iter().all(|r| r.get("skip").is_none()));
}

#[tokio::test]
async fn test_fault_in_one_instance_leaves_siblings_running() {
  let factory = make_factory_with(
    FilterOptions::new().with_name("siblings"),
    |call: Call<'_, String>| {
      if call.chunk().is_some_and(|c| c == "boom") {
        Err("boom chunk")
      } else {
        Ok(call.chunk().is_some_and(|c| c.starts_with('k')))
      }
    },
  )
  .unwrap();

  let mut faulting = factory.instantiate().pipe(chunks(
    ["k1", "boom", "k2"].iter().map(|s| s.to_string()).collect(),
  ));
  let mut sibling = factory.instantiate().pipe(chunks(
    ["k1", "x", "k2", "k3"].iter().map(|s| s.to_string()).collect(),
  ));

  assert_eq!(faulting.next().await.unwrap().unwrap(), "k1");
  assert_eq!(sibling.next().await.unwrap().unwrap(), "k1");
  match faulting.next().await {
    Some(Err(FilterError::Predicate {
      component, index, ..
    })) => {
      assert_eq!(component, "siblings");
      assert_eq!(index, 1);
    }
    other => panic!("Expected predicate fault, got {:?}", other),
  }
  assert!(faulting.next().await.is_none());
  assert_eq!(faulting.status(), FilterStatus::Failed);

  let rest: Vec<String> = (&mut sibling).try_collect().await.unwrap();
  assert_eq!(rest, vec!["k2".to_string(), "k3".to_string()]);
  assert_eq!(sibling.status(), FilterStatus::Completed);
  assert_eq!(sibling.index(), 4);

  let mut fresh = factory.instantiate().pipe(chunks(vec!["k0".to_string()]));
  assert_eq!(fresh.index(), 0);
  assert_eq!(fresh.next().await.unwrap().unwrap(), "k0");
  assert_eq!(fresh.index(), 1);
}
