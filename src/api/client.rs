use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::error::{error_message, ApiError};
use crate::config::ApiConfig;
use crate::model::{
    BorrowRecord, BorrowRequest, BorrowedItem, BorrowedItems, Item, NewItem, QtyUpdate,
    ReturnRequest, Volunteer,
};

/// Typed client for the inventory service.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    client: Client,
    base_url: Url,
}

impl InventoryClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|_| ApiError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                base_url: config.base_url.clone(),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(ApiError::Build)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /scan/volunteer/{id}`
    pub async fn scan_volunteer(&self, id: &str) -> Result<Volunteer, ApiError> {
        let url = self.endpoint(&["scan", "volunteer", id])?;
        self.get_json(url).await
    }

    /// `GET /scan/item/{code}`
    pub async fn scan_item(&self, code: &str) -> Result<Item, ApiError> {
        let url = self.endpoint(&["scan", "item", code])?;
        self.get_json(url).await
    }

    /// `GET /volunteer/{id}/borrowed-items`
    pub async fn borrowed_items(&self, volunteer_id: &str) -> Result<Vec<BorrowedItem>, ApiError> {
        let url = self.endpoint(&["volunteer", volunteer_id, "borrowed-items"])?;
        let envelope: BorrowedItems = self.get_json(url).await?;
        Ok(envelope.borrowed_items)
    }

    /// `POST /volunteer/{id}/borrow`
    pub async fn borrow(&self, volunteer_id: &str, body: &BorrowRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&["volunteer", volunteer_id, "borrow"])?;
        self.send_json(Method::POST, url, body).await
    }

    /// `POST /volunteer/{id}/return`
    pub async fn return_items(
        &self,
        volunteer_id: &str,
        body: &ReturnRequest,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["volunteer", volunteer_id, "return"])?;
        self.send_json(Method::POST, url, body).await
    }

    /// `GET /items`
    pub async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        let url = self.endpoint(&["items"])?;
        self.get_json(url).await
    }

    /// `POST /items`
    pub async fn add_item(&self, item: &NewItem) -> Result<(), ApiError> {
        let url = self.endpoint(&["items"])?;
        self.send_json(Method::POST, url, item).await
    }

    /// `PUT /items/{code}/update-qty`
    pub async fn update_item_qty(&self, code: &str, qty: i64) -> Result<(), ApiError> {
        let url = self.endpoint(&["items", code, "update-qty"])?;
        self.send_json(Method::PUT, url, &QtyUpdate { qty }).await
    }

    /// `GET /borrowed-items`
    pub async fn borrow_records(&self) -> Result<Vec<BorrowRecord>, ApiError> {
        let url = self.endpoint(&["borrowed-items"])?;
        self.get_json(url).await
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Connection {
                url: url.to_string(),
                source: e,
            })?;

        let response = check_status(response).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode {
            url: url.to_string(),
            source: e,
        })
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<(), ApiError> {
        tracing::debug!(%method, %url, "send");
        let response = self
            .client
            .request(method, url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Connection {
                url: url.to_string(),
                source: e,
            })?;

        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = status.canonical_reason().unwrap_or("request failed");
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(&body, fallback),
    })
}
