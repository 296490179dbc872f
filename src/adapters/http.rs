use crate::core::transport::ResponseAssembler;
use crate::domain::http::{HttpMethod, RequestDescriptor, TransportResult};
use crate::domain::ports::Transport;
use crate::utils::error::TransportFailure;
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::collections::BTreeMap;
use std::time::Duration;

/// Transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportFailure> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()
            .map_err(map_error)?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn map_error(error: reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::Timeout
    } else {
        TransportFailure::ConnectionError(error.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RequestDescriptor) -> TransportResult {
        let mut assembler = ResponseAssembler::new();

        let mut builder = self
            .client
            .request(method(request.method), request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        tracing::debug!("Sending {} request to {}", request.method, request.url);
        let mut response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                assembler.fail(map_error(e));
                return assembler.finish();
            }
        };

        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        tracing::debug!("Response status: {}", response.status());
        assembler.receive_response(response.status().as_u16(), headers);

        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => assembler.receive_data(&chunk),
                Ok(None) => break,
                Err(e) => {
                    assembler.fail(map_error(e));
                    break;
                }
            }
        }

        assembler.finish()
    }
}
