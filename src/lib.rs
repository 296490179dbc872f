pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::Cli;
pub use config::MarketConfig;

pub use adapters::HttpTransport;
#[cfg(any(test, feature = "mock"))]
pub use adapters::{MockRegistry, MockResponse, MockTransport};
pub use crate::core::client::MarketClient;
pub use crate::core::listing::{CollectingObserver, ListingSession, LoadState};
pub use crate::core::request::{Operation, RequestBuilder};
pub use domain::http::{HttpMethod, HttpResponse, RequestDescriptor, TransportResult};
pub use domain::model::{
    Currency, ImagePayload, ImageSubtype, Product, ProductDetail, ProductPage,
    ProductWriteRequest, SellerCredentials,
};
pub use domain::ports::{ConfigProvider, PageObserver, Transport};
pub use utils::error::{AppError, ClientError, Result, TransportFailure};
