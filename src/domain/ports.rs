use crate::domain::http::{RequestDescriptor, TransportResult};
use crate::domain::model::{ProductPage, SellerCredentials};
use crate::utils::error::ClientError;
use async_trait::async_trait;

/// Sends one request and eventually yields one result. Implementations never
/// retry on their own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> TransportResult;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn credentials(&self) -> &SellerCredentials;
    fn items_per_page(&self) -> u32;
    fn timeout_seconds(&self) -> u64;
}

/// Receives listing progress pushed by a `ListingSession`.
pub trait PageObserver: Send {
    fn on_page_loaded(&mut self, page: &ProductPage);
    fn on_error(&mut self, error: &ClientError);
}
