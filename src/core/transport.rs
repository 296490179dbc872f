use crate::domain::http::{HttpResponse, TransportResult};
use crate::utils::error::TransportFailure;
use std::collections::BTreeMap;

/// Collects the staged delivery of a streaming transport: response metadata,
/// body chunks, an optional failure, then a terminal `finish`.
#[derive(Debug, Default)]
pub struct ResponseAssembler {
    status: Option<u16>,
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
    failure: Option<TransportFailure>,
}

impl ResponseAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receive_response(&mut self, status: u16, headers: BTreeMap<String, String>) {
        self.status = Some(status);
        self.headers = headers;
    }

    pub fn receive_data(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }

    /// The first failure wins.
    pub fn fail(&mut self, failure: TransportFailure) {
        if self.failure.is_none() {
            self.failure = Some(failure);
        }
    }

    pub fn finish(self) -> TransportResult {
        if let Some(failure) = self.failure {
            return TransportResult::Failure(failure);
        }
        match self.status {
            Some(status) => TransportResult::Success(HttpResponse {
                status,
                headers: self.headers,
                body: self.body,
            }),
            None => TransportResult::Failure(TransportFailure::ConnectionError(
                "finished without a response".to_string(),
            )),
        }
    }
}
