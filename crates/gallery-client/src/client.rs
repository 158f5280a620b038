//! Gallery HTTP client implementation.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    AdminOrder, ApiErrorResponse, CreateOrderRequest, HealthResponse, MessageResponse,
    OrderCreated, OrderFormOptions, OrderId, OrderWithItems, Painting, PaintingId, PaintingInput,
    PlaceOrderRequest, UserId, UserOrder,
};

/// Gallery API client.
///
/// Covers the catalog, checkout and admin order endpoints.
#[derive(Debug, Clone)]
pub struct GalleryClient {
    client: Client,
    base_url: String,
}

impl GalleryClient {
    /// Create a new gallery client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the gallery service (e.g., `"http://localhost:3000"`)
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new gallery client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the URL is invalid or the HTTP
    /// client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base URL {base_url:?}: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Fetch the service health report.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.client.get(self.url("/health")).send().await?;
        Self::handle_response(response).await
    }

    // =========================================================================
    // Paintings
    // =========================================================================

    /// List every painting, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_paintings(&self) -> Result<Vec<Painting>, ClientError> {
        let response = self.client.get(self.url("/api/paintings")).send().await?;
        Self::handle_response(response).await
    }

    /// Get one painting.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the painting doesn't exist.
    pub async fn get_painting(&self, painting_id: PaintingId) -> Result<Painting, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/paintings/{painting_id}")))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Add a painting.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_painting(&self, input: &PaintingInput) -> Result<Painting, ClientError> {
        let response = self
            .client
            .post(self.url("/api/paintings"))
            .json(input)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Overwrite a painting.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the painting doesn't exist.
    pub async fn update_painting(
        &self,
        painting_id: PaintingId,
        input: &PaintingInput,
    ) -> Result<Painting, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/api/paintings/{painting_id}")))
            .json(input)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Remove a painting.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the painting doesn't exist.
    pub async fn delete_painting(&self, painting_id: PaintingId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/paintings/{painting_id}")))
            .send()
            .await?;
        let _: MessageResponse = Self::handle_response(response).await?;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Check out a list of paintings in one order.
    ///
    /// # Errors
    ///
    /// - `ClientError::PaintingUnavailable` if a painting was already sold.
    /// - `ClientError::NotFound` if a painting doesn't exist.
    pub async fn place_order(
        &self,
        user_id: UserId,
        painting_ids: &[PaintingId],
    ) -> Result<OrderId, ClientError> {
        let request = PlaceOrderRequest {
            user_id,
            painting_ids: painting_ids.to_vec(),
        };

        let response = self
            .client
            .post(self.url("/api/orders"))
            .json(&request)
            .send()
            .await?;

        let created: OrderCreated = Self::handle_response(response).await?;
        tracing::debug!(order_id = %created.order_id, "Order placed");
        Ok(created.order_id)
    }

    /// A user's order history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_orders_for_user(&self, user_id: UserId) -> Result<Vec<UserOrder>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/orders/{user_id}")))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Every order with its customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_all_orders(&self) -> Result<Vec<AdminOrder>, ClientError> {
        let response = self.client.get(self.url("/api/orders")).send().await?;
        Self::handle_response(response).await
    }

    /// Every order with nested painting summaries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_orders_with_items(&self) -> Result<Vec<OrderWithItems>, ClientError> {
        let response = self.client.get(self.url("/api/admin/orders")).send().await?;
        Self::handle_response(response).await
    }

    /// Record a single-line order without changing painting availability.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 400 if the quantity is below 1.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderId, ClientError> {
        let response = self
            .client
            .post(self.url("/api/admin/orders"))
            .json(request)
            .send()
            .await?;

        let created: OrderCreated = Self::handle_response(response).await?;
        Ok(created.order_id)
    }

    /// Dropdown data for the order form.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn order_form_options(&self) -> Result<OrderFormOptions, ClientError> {
        let response = self
            .client
            .get(self.url("/api/admin/order-form"))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            return Ok(serde_json::from_slice(&body)?);
        }

        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let unavailable_id = api_error
                    .details
                    .as_ref()
                    .and_then(|d| d.get("painting_id"))
                    .and_then(serde_json::Value::as_i64)
                    .map(PaintingId::new);

                match (api_error.code.as_str(), unavailable_id) {
                    ("not_found", _) => Err(ClientError::NotFound {
                        message: api_error.error,
                    }),
                    ("painting_unavailable", Some(painting_id)) => {
                        Err(ClientError::PaintingUnavailable { painting_id })
                    }
                    (code, _) => Err(ClientError::Api {
                        code: code.to_string(),
                        message: api_error.error,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
