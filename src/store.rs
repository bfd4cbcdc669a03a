//! Blob store module
//!
//! Holds the single JSON value shared by every request to the data route.
//! Writers swap the whole value under the write lock, so readers always see
//! either the previous blob or the new one, and concurrent writers resolve
//! last-writer-wins.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store for the most recently pushed JSON blob
pub struct BlobStore {
    current: RwLock<Arc<Value>>,
}

impl BlobStore {
    /// Create a store holding an empty JSON object
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Value::Object(serde_json::Map::new()))),
        }
    }

    /// Current blob
    pub async fn snapshot(&self) -> Arc<Value> {
        Arc::clone(&*self.current.read().await)
    }

    /// Replace the blob unconditionally, returning the stored value
    pub async fn replace(&self, value: Value) -> Arc<Value> {
        let stored = Arc::new(value);
        *self.current.write().await = Arc::clone(&stored);
        stored
    }

    /// Replace the blob only when `value` is truthy.
    ///
    /// Returns the stored value, or `None` (previous blob kept) for falsy input.
    pub async fn store_if_truthy(&self, value: Value) -> Option<Arc<Value>> {
        if !is_truthy(&value) {
            return None;
        }
        Some(self.replace(value).await)
    }
}

impl Default for BlobStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a JSON value counts as "data received".
///
/// `null`, `false`, zero, the empty string, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        for value in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(-0.0),
            json!(""),
            json!([]),
            json!({}),
        ] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
    }

    #[test]
    fn test_truthy_values() {
        for value in [
            json!(true),
            json!(1),
            json!(-3),
            json!(0.5),
            json!("0"),
            json!(" "),
            json!([null]),
            json!([0]),
            json!({"a": null}),
            json!({"x": 1, "y": 2}),
        ] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let store = BlobStore::new();
        assert_eq!(*store.snapshot().await, json!({}));
    }

    #[tokio::test]
    async fn test_falsy_write_keeps_previous() {
        let store = BlobStore::new();
        let stored = store.store_if_truthy(json!({"x": 1, "y": 2})).await;
        assert_eq!(stored.as_deref(), Some(&json!({"x": 1, "y": 2})));
        assert!(store.store_if_truthy(json!({})).await.is_none());
        assert!(store.store_if_truthy(json!(null)).await.is_none());
        assert_eq!(*store.snapshot().await, json!({"x": 1, "y": 2}));
    }

    #[tokio::test]
    async fn test_replace_is_whole_value() {
        let store = BlobStore::new();
        store.replace(json!({"a": 1, "b": 2})).await;
        store.replace(json!({"c": 3})).await;
        assert_eq!(*store.snapshot().await, json!({"c": 3}));
    }

    #[tokio::test]
    async fn test_snapshot_survives_later_write() {
        let store = BlobStore::new();
        store.replace(json!([1, 2, 3])).await;
        let before = store.snapshot().await;
        store.replace(json!("next")).await;
        assert_eq!(*before, json!([1, 2, 3]));
        assert_eq!(*store.snapshot().await, json!("next"));
    }

    #[tokio::test]
    async fn test_concurrent_writers_leave_one_value() {
        let store = Arc::new(BlobStore::new());
        let mut tasks = Vec::new();
        for i in 1..=16 {
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                store.replace(json!({ "writer": i })).await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let last = store.snapshot().await;
        let writer = last["writer"].as_i64().unwrap();
        assert!((1..=16).contains(&writer));
    }
}
