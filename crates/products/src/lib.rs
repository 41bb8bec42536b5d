//! Products catalog core: record store, query engine, and payload validation.
//!
//! Pure, synchronous domain logic (no IO, no HTTP). The store is the only
//! stateful piece; queries and validation are free functions.

pub mod product;
pub mod query;
pub mod store;
pub mod validate;

pub use product::{NewProduct, Product, ProductPatch};
pub use query::{
    CategoryStats, Page, PageRequest, aggregate_by_category, filter_by_category, list, paginate,
    search_by_name,
};
pub use store::{InMemoryProductStore, ProductRepository};
pub use validate::{validate_create, validate_update};
