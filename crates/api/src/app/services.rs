use std::sync::Arc;

use catalog_products::{InMemoryProductStore, ProductRepository};

/// Process-wide handles shared by every request handler.
#[derive(Clone)]
pub struct AppServices {
    products: Arc<dyn ProductRepository>,
}

impl AppServices {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// Fresh, empty in-memory store (the only backend; state lives as long as the process).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductStore::new()))
    }

    pub fn products(&self) -> &dyn ProductRepository {
        self.products.as_ref()
    }
}

impl core::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppServices")
            .field("products", &self.products.len())
            .finish()
    }
}
