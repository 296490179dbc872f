pub mod client;
pub mod decoder;
pub mod listing;
pub mod multipart;
pub mod request;
pub mod transport;

pub use crate::domain::http::{HttpMethod, HttpResponse, RequestDescriptor, TransportResult};
pub use crate::domain::model::{
    Currency, ImagePayload, ImageSubtype, Product, ProductDetail, ProductPage, ProductWriteRequest,
    SellerCredentials,
};
pub use crate::domain::ports::{ConfigProvider, PageObserver, Transport};
pub use crate::utils::error::{ClientError, TransportFailure};
