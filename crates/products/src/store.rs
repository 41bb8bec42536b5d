use std::sync::{Arc, PoisonError, RwLock};

use catalog_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::{NewProduct, Product, ProductPatch};

/// Authoritative holder of product records.
///
/// Implementations preserve insertion order and never hand out references
/// into their storage; every read returns owned clones.
pub trait ProductRepository: Send + Sync {
    /// Assign a fresh identifier, append the record, and return it.
    fn insert(&self, new: NewProduct) -> Product;
    fn find_by_id(&self, id: &ProductId) -> Option<Product>;
    /// Merge `patch` into the record with `id` and return the merged record.
    fn update(&self, id: &ProductId, patch: ProductPatch) -> DomainResult<Product>;
    /// Remove the record with `id`, returning what was removed.
    fn delete(&self, id: &ProductId) -> DomainResult<Product>;
    /// Snapshot of every record in insertion order.
    fn list_all(&self) -> Vec<Product>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> ProductRepository for Arc<S>
where
    S: ProductRepository + ?Sized,
{
    fn insert(&self, new: NewProduct) -> Product {
        (**self).insert(new)
    }

    fn find_by_id(&self, id: &ProductId) -> Option<Product> {
        (**self).find_by_id(id)
    }

    fn update(&self, id: &ProductId, patch: ProductPatch) -> DomainResult<Product> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: &ProductId) -> DomainResult<Product> {
        (**self).delete(id)
    }

    fn list_all(&self) -> Vec<Product> {
        (**self).list_all()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// In-memory, process-lifetime product store.
///
/// The whole collection is one critical section: writers take the write lock,
/// readers share the read lock. Lookups are linear scans.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductRepository for InMemoryProductStore {
    fn insert(&self, new: NewProduct) -> Product {
        let product = Product::from_new(ProductId::new(), new);
        let mut records = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        records.push(product.clone());
        product
    }

    fn find_by_id(&self, id: &ProductId) -> Option<Product> {
        let records = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        records.iter().find(|p| p.id() == id).cloned()
    }

    fn update(&self, id: &ProductId, patch: ProductPatch) -> DomainResult<Product> {
        let mut records = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let product = records
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(DomainError::NotFound)?;
        product.apply(patch);
        Ok(product.clone())
    }

    fn delete(&self, id: &ProductId) -> DomainResult<Product> {
        let mut records = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let index = records
            .iter()
            .position(|p| p.id() == id)
            .ok_or(DomainError::NotFound)?;
        Ok(records.remove(index))
    }

    fn list_all(&self) -> Vec<Product> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
