//! The live product catalog: a single shared collection of records with
//! insert, point lookup, full scan, partial update and removal.
//!
//! One `RwLock` covers every operation, so a read overlapping a write sees a
//! record either fully before or fully after the write, never torn between
//! the two. Every method returns owned snapshots and releases the lock
//! before returning; callers never hold store access across their own work.

use std::sync::RwLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One catalog entry. Identifiers are assigned by the store on insert and
/// are unique across all records that ever lived in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub info: String,
    pub price: f64,
}

/// A record about to be inserted. The store assigns the identifier.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub info: String,
    pub price: f64,
}

/// A partial update. `None` means "leave unchanged"; clearing a field is
/// expressed by the caller as an explicit empty value.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub info: Option<String>,
    pub price: Option<f64>,
}

#[derive(Default)]
struct Inner {
    // Insertion-ordered so full scans come back in the order records were
    // created, which is the only ordering we promise.
    products: IndexMap<i64, Product>,
    last_id: i64,
}

#[derive(Default)]
pub struct ProductStore {
    inner: RwLock<Inner>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the draft under a fresh identifier and returns the record.
    ///
    /// Identifiers come from a monotonically increasing counter guarded by
    /// the write lock; ids of deleted records are never handed out again.
    pub fn insert(&self, draft: ProductDraft) -> Product {
        let mut inner = self.inner.write().unwrap();
        inner.last_id += 1;
        let product = Product {
            id: inner.last_id,
            name: draft.name,
            info: draft.info,
            price: draft.price,
        };
        inner.products.insert(product.id, product.clone());
        product
    }

    pub fn get(&self, id: i64) -> Option<Product> {
        self.inner.read().unwrap().products.get(&id).cloned()
    }

    /// All live records, in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.inner.read().unwrap().products.values().cloned().collect()
    }

    /// Applies only the fields present in `update` and returns the
    /// post-update record, or `None` when no live record matches `id`.
    pub fn update(&self, id: i64, update: ProductUpdate) -> Option<Product> {
        let mut inner = self.inner.write().unwrap();
        let product = inner.products.get_mut(&id)?;
        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(info) = update.info {
            product.info = info;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        Some(product.clone())
    }

    /// Removes the record and returns its last value, or `None` when no
    /// live record matches `id`. The remaining records keep their order.
    pub fn delete(&self, id: i64) -> Option<Product> {
        self.inner.write().unwrap().products.shift_remove(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
