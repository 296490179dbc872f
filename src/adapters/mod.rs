// Adapters layer: concrete transports behind the `Transport` port.

pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use http::HttpTransport;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockRegistry, MockResponse, MockTransport};
