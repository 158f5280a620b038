//! Painting catalog.

use std::sync::Arc;

use gallery_core::{Painting, PaintingId, PaintingInput};
use gallery_store::{Store, StoreError};

use crate::error::ApiError;

/// Painting CRUD.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    /// Create a catalog service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All paintings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn list_paintings(&self) -> Result<Vec<Painting>, ApiError> {
        Ok(self.store.list_paintings().await?)
    }

    /// A single painting.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the painting doesn't exist.
    pub async fn get_painting(&self, painting_id: PaintingId) -> Result<Painting, ApiError> {
        self.store
            .get_painting(painting_id)
            .await?
            .ok_or_else(|| StoreError::painting_not_found(painting_id).into())
    }

    /// Add a painting to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the row.
    pub async fn create_painting(&self, input: &PaintingInput) -> Result<Painting, ApiError> {
        let painting = self.store.create_painting(input).await?;

        tracing::info!(
            painting_id = %painting.painting_id,
            title = %painting.title,
            "Painting created"
        );

        Ok(painting)
    }

    /// Overwrite a painting's fields.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the painting doesn't exist.
    pub async fn update_painting(
        &self,
        painting_id: PaintingId,
        input: &PaintingInput,
    ) -> Result<Painting, ApiError> {
        let painting = self.store.update_painting(painting_id, input).await?;

        tracing::info!(
            painting_id = %painting_id,
            status = %painting.status,
            "Painting updated"
        );

        Ok(painting)
    }

    /// Remove a painting.
    ///
    /// # Errors
    ///
    /// - `ApiError::NotFound` if the painting doesn't exist.
    /// - `ApiError::Internal` if an order still references it.
    pub async fn delete_painting(&self, painting_id: PaintingId) -> Result<(), ApiError> {
        self.store.delete_painting(painting_id).await?;
        tracing::info!(painting_id = %painting_id, "Painting deleted");
        Ok(())
    }
}
