//! In-memory tables standing in for a datastore.
//!
//! A [`Table`] is an ordered list of records behind an async read-write lock.
//! Handles are cheap to clone and share the same rows, so one table can be
//! injected into a router with [`Router::with_state`](crate::Router::with_state)
//! and read back in every handler. Nothing is persisted.

use std::sync::Arc;

use tokio::sync::RwLock;

/// A row with a numeric identifier.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
}

/// An ordered, shared, in-memory table of `T`.
pub struct Table<T> {
    rows: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self { rows: Arc::clone(&self.rows) }
    }
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<T>) -> Self {
        Self { rows: Arc::new(RwLock::new(rows)) }
    }

    /// All rows in insertion order.
    pub async fn list(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn get(&self, id: i64) -> Option<T> {
        self.rows.read().await.iter().find(|r| r.id() == id).cloned()
    }

    /// Rows matching `pred`, in insertion order.
    pub async fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.read().await.iter().filter(|r| pred(r)).cloned().collect()
    }

    /// Appends the row `build` makes from the next identifier and returns it.
    ///
    /// Identifiers start at 1 and are one past the largest present, so they
    /// are never handed out twice while the row holding them exists.
    pub async fn insert_with(&self, build: impl FnOnce(i64) -> T) -> T {
        let mut rows = self.rows.write().await;
        let id = rows.iter().map(Record::id).max().unwrap_or(0) + 1;
        let row = build(id);
        rows.push(row.clone());
        row
    }

    /// Applies `change` to the row with `id` and returns the updated row.
    pub async fn update(&self, id: i64, change: impl FnOnce(&mut T)) -> Option<T> {
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|r| r.id() == id)?;
        change(row);
        Some(row.clone())
    }

    pub async fn remove(&self, id: i64) -> Option<T> {
        let mut rows = self.rows.write().await;
        let index = rows.iter().position(|r| r.id() == id)?;
        Some(rows.remove(index))
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.rows.write().await.clear();
    }
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
