//! Online gallery client SDK.
//!
//! This crate provides a typed client for the gallery storefront API, used by
//! admin tooling and integration checks.
//!
//! # Example
//!
//! ```no_run
//! use gallery_client::GalleryClient;
//! use gallery_core::{PaintingId, UserId};
//!
//! # async fn example() -> Result<(), gallery_client::ClientError> {
//! let client = GalleryClient::new("http://localhost:3000")?;
//!
//! let available: Vec<_> = client
//!     .list_paintings()
//!     .await?
//!     .into_iter()
//!     .filter(|p| p.is_available())
//!     .collect();
//!
//! let order_id = client
//!     .place_order(UserId::new(1), &[PaintingId::new(7)])
//!     .await?;
//! println!("Placed order {order_id} ({} paintings still for sale)", available.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, GalleryClient};
pub use error::ClientError;
pub use types::*;
