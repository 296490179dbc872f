//! Market API façade.
//!
//! Every operation runs the same three steps: build a `RequestDescriptor`,
//! hand it to the `Transport`, decode the `TransportResult`. Request
//! descriptors and raw bodies never leave this module.

use crate::core::decoder;
use crate::core::request::{Operation, RequestBuilder};
use crate::domain::model::{
    ImagePayload, ProductDetail, ProductPage, ProductWriteRequest, SellerCredentials,
};
use crate::domain::ports::{ConfigProvider, Transport};
use crate::utils::error::ClientError;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct MarketClient<T: Transport> {
    builder: RequestBuilder,
    credentials: SellerCredentials,
    transport: Arc<T>,
}

impl<T: Transport> Clone for MarketClient<T> {
    fn clone(&self) -> Self {
        Self {
            builder: self.builder.clone(),
            credentials: self.credentials.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport + 'static> MarketClient<T> {
    pub fn new(base_url: &str, credentials: SellerCredentials, transport: T) -> Self {
        Self {
            builder: RequestBuilder::new(base_url),
            credentials,
            transport: Arc::new(transport),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C, transport: T) -> Self {
        Self::new(config.base_url(), config.credentials().clone(), transport)
    }

    pub fn base_url(&self) -> &str {
        self.builder.base_url()
    }

    pub fn credentials(&self) -> &SellerCredentials {
        &self.credentials
    }

    pub async fn health_check(&self) -> Result<String, ClientError> {
        let result = self.execute(&Operation::HealthCheck).await?;
        decoder::decode_text(result)
    }

    pub async fn list_page(
        &self,
        page_no: u32,
        items_per_page: u32,
    ) -> Result<ProductPage, ClientError> {
        let result = self
            .execute(&Operation::ListPage {
                page_no,
                items_per_page,
            })
            .await?;
        decoder::decode_json(result)
    }

    pub async fn product_detail(&self, product_id: u64) -> Result<ProductDetail, ClientError> {
        let result = self.execute(&Operation::Detail { product_id }).await?;
        decoder::decode_json(result)
    }

    /// Registers a product. Image count limits are the caller's business.
    pub async fn create_product(
        &self,
        request: &ProductWriteRequest,
        images: &[ImagePayload],
    ) -> Result<ProductDetail, ClientError> {
        let result = self
            .execute(&Operation::CreateProduct {
                seller_id: &self.credentials.identifier,
                request,
                images,
            })
            .await?;
        decoder::decode_json(result)
    }

    pub async fn update_product(
        &self,
        product_id: u64,
        request: &ProductWriteRequest,
    ) -> Result<ProductDetail, ClientError> {
        let result = self
            .execute(&Operation::UpdateProduct {
                seller_id: &self.credentials.identifier,
                product_id,
                request,
            })
            .await?;
        decoder::decode_json(result)
    }

    /// Looks up a product's secret. The server answers with a bare string,
    /// which is returned as-is.
    pub async fn fetch_secret(&self, product_id: u64, secret: &str) -> Result<String, ClientError> {
        let result = self
            .execute(&Operation::FetchSecret {
                seller_id: &self.credentials.identifier,
                secret,
                product_id,
            })
            .await?;
        decoder::decode_text(result)
    }

    pub async fn delete_product(
        &self,
        product_id: u64,
        product_secret: &str,
    ) -> Result<ProductDetail, ClientError> {
        let result = self
            .execute(&Operation::DeleteProduct {
                seller_id: &self.credentials.identifier,
                product_id,
                secret: product_secret,
            })
            .await?;
        decoder::decode_json(result)
    }

    /// Best-effort image fetch: any failure resolves to `None`.
    pub async fn download_image(&self, url: &str) -> Option<Vec<u8>> {
        let result = self.execute(&Operation::Download { url }).await.ok()?;
        decoder::decode_bytes(result).ok()
    }

    /// Runs `call` on a tokio worker and hands its output to `completion`
    /// exactly once. The completion runs on that worker, not on the caller's
    /// thread.
    pub fn dispatch<F, Fut, R, C>(&self, call: F, completion: C) -> JoinHandle<()>
    where
        F: FnOnce(MarketClient<T>) -> Fut,
        Fut: Future<Output = R> + Send + 'static,
        R: Send + 'static,
        C: FnOnce(R) + Send + 'static,
    {
        let pending = call(self.clone());
        tokio::spawn(async move {
            completion(pending.await);
        })
    }

    async fn execute(
        &self,
        operation: &Operation<'_>,
    ) -> Result<crate::domain::http::TransportResult, ClientError> {
        let request = self.builder.build(operation)?;
        tracing::debug!("Dispatching {} {}", request.method, request.url);
        Ok(self.transport.send(request).await)
    }
}
