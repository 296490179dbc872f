use crate::core::multipart::{self, MultipartBody};
use crate::domain::http::{HttpMethod, RequestDescriptor};
use crate::domain::model::{ImagePayload, ProductWriteRequest};
use crate::utils::error::ClientError;
use std::collections::BTreeMap;
use url::Url;

pub const IDENTIFIER_HEADER: &str = "identifier";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";
const PRODUCTS_PATH: &str = "/api/products";

/// One logical market API call together with its parameters.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    HealthCheck,
    ListPage {
        page_no: u32,
        items_per_page: u32,
    },
    Detail {
        product_id: u64,
    },
    CreateProduct {
        seller_id: &'a str,
        request: &'a ProductWriteRequest,
        images: &'a [ImagePayload],
    },
    UpdateProduct {
        seller_id: &'a str,
        product_id: u64,
        request: &'a ProductWriteRequest,
    },
    FetchSecret {
        seller_id: &'a str,
        secret: &'a str,
        product_id: u64,
    },
    DeleteProduct {
        seller_id: &'a str,
        product_id: u64,
        secret: &'a str,
    },
    Download {
        url: &'a str,
    },
}

impl Operation<'_> {
    pub fn method(&self) -> HttpMethod {
        match self {
            Operation::HealthCheck
            | Operation::ListPage { .. }
            | Operation::Detail { .. }
            | Operation::Download { .. } => HttpMethod::Get,
            Operation::CreateProduct { .. } | Operation::FetchSecret { .. } => HttpMethod::Post,
            Operation::UpdateProduct { .. } => HttpMethod::Patch,
            Operation::DeleteProduct { .. } => HttpMethod::Delete,
        }
    }
}

/// Turns operations into request descriptors. Holds only the base URL.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
}

impl RequestBuilder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build(&self, operation: &Operation<'_>) -> Result<RequestDescriptor, ClientError> {
        self.build_with_boundary(operation, &multipart::generate_boundary())
    }

    /// Same as `build`, with a caller-chosen multipart boundary.
    pub fn build_with_boundary(
        &self,
        operation: &Operation<'_>,
        boundary: &str,
    ) -> Result<RequestDescriptor, ClientError> {
        let url = self.url_for(operation)?;
        let mut headers = BTreeMap::new();

        let body = match *operation {
            Operation::HealthCheck
            | Operation::ListPage { .. }
            | Operation::Detail { .. }
            | Operation::Download { .. } => None,
            Operation::CreateProduct {
                seller_id,
                request,
                images,
            } => {
                headers.insert(IDENTIFIER_HEADER.to_string(), seller_id.to_string());
                headers.insert(
                    CONTENT_TYPE_HEADER.to_string(),
                    multipart::content_type(boundary),
                );
                Some(create_body(request, images, boundary)?)
            }
            Operation::UpdateProduct {
                seller_id, request, ..
            } => {
                headers.insert(IDENTIFIER_HEADER.to_string(), seller_id.to_string());
                headers.insert(CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string());
                Some(encode_json(request)?)
            }
            Operation::FetchSecret {
                seller_id, secret, ..
            } => {
                headers.insert(IDENTIFIER_HEADER.to_string(), seller_id.to_string());
                headers.insert(CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string());
                Some(encode_json(&serde_json::json!({ "secret": secret }))?)
            }
            Operation::DeleteProduct { seller_id, .. } => {
                headers.insert(IDENTIFIER_HEADER.to_string(), seller_id.to_string());
                None
            }
        };

        tracing::debug!(
            "Built {} request for {} ({} body bytes)",
            operation.method(),
            url,
            body.as_ref().map_or(0, Vec::len)
        );

        Ok(RequestDescriptor {
            method: operation.method(),
            url,
            headers,
            body,
        })
    }

    fn url_for(&self, operation: &Operation<'_>) -> Result<Url, ClientError> {
        match *operation {
            Operation::HealthCheck => self.parse("/healthChecker"),
            Operation::ListPage {
                page_no,
                items_per_page,
            } => {
                let mut url = self.parse(PRODUCTS_PATH)?;
                url.query_pairs_mut()
                    .append_pair("page_no", &page_no.to_string())
                    .append_pair("items_per_page", &items_per_page.to_string());
                Ok(url)
            }
            Operation::Detail { product_id } | Operation::UpdateProduct { product_id, .. } => {
                self.parse(&format!("{}/{}", PRODUCTS_PATH, product_id))
            }
            Operation::CreateProduct { .. } => self.parse(PRODUCTS_PATH),
            Operation::FetchSecret { product_id, .. } => {
                self.parse(&format!("{}/{}/secret", PRODUCTS_PATH, product_id))
            }
            Operation::DeleteProduct {
                product_id, secret, ..
            } => {
                let mut url = self.parse(&format!("{}/{}", PRODUCTS_PATH, product_id))?;
                url.path_segments_mut()
                    .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
                    .push(secret);
                Ok(url)
            }
            Operation::Download { url } => {
                Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))
            }
        }
    }

    fn parse(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!("{}{}", self.base_url, path);
        let url =
            Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(raw));
        }
        Ok(url)
    }
}

fn encode_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(value).map_err(|e| ClientError::InvalidRequest(e.to_string()))
}

fn create_body(
    request: &ProductWriteRequest,
    images: &[ImagePayload],
    boundary: &str,
) -> Result<Vec<u8>, ClientError> {
    let params = encode_json(request)?;
    let mut body = MultipartBody::new(boundary);
    body.field("params", JSON_CONTENT_TYPE, &params);
    for image in images {
        body.file(
            "images",
            &image.file_name,
            &image.subtype.mime_type(),
            &image.data,
        );
    }
    Ok(body.finish())
}
