//! Online gallery HTTP API service.
//!
//! This crate provides the storefront API:
//!
//! - Painting catalog CRUD
//! - Order checkout and order listings
//! - Admin order entry
//! - Static hosting of the built frontend with an `index.html` fallback
//!
//! Handlers delegate to [`services::CatalogService`] and
//! [`services::OrderService`], which hold the injected
//! [`Store`](gallery_store::Store).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Liveness handler has nothing to await

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
