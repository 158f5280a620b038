//! Business logic layered over the [`Store`](gallery_store::Store).

pub mod catalog;
pub mod orders;

pub use catalog::CatalogService;
pub use orders::OrderService;
