use crate::domain::http::{HttpResponse, TransportResult};
use crate::utils::error::ClientError;
use serde::de::DeserializeOwned;

/// Applies the checks shared by every decode: transport failure, then status,
/// then body presence.
fn accept(result: TransportResult) -> Result<HttpResponse, ClientError> {
    let response = match result {
        TransportResult::Failure(cause) => return Err(ClientError::Transport(cause)),
        TransportResult::Success(response) => response,
    };

    if !(200..300).contains(&response.status) {
        return Err(ClientError::UnexpectedStatus(response.status));
    }

    if response.body.is_empty() {
        return Err(ClientError::EmptyBody);
    }

    Ok(response)
}

pub fn decode_json<T: DeserializeOwned>(result: TransportResult) -> Result<T, ClientError> {
    let response = accept(result)?;
    serde_json::from_slice(&response.body).map_err(|e| ClientError::DecodeFailure(e.to_string()))
}

/// Decodes the body as an opaque UTF-8 string.
pub fn decode_text(result: TransportResult) -> Result<String, ClientError> {
    let response = accept(result)?;
    String::from_utf8(response.body).map_err(|e| ClientError::DecodeFailure(e.to_string()))
}

pub fn decode_bytes(result: TransportResult) -> Result<Vec<u8>, ClientError> {
    accept(result).map(|response| response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Product, ProductPage};
    use crate::utils::error::TransportFailure;
    use std::collections::BTreeMap;

    fn response(status: u16, body: &str) -> TransportResult {
        TransportResult::Success(HttpResponse {
            status,
            headers: BTreeMap::new(),
            body: body.as_bytes().to_vec(),
        })
    }

    const PAGE: &str = r#"{
        "page_no": 1,
        "items_per_page": 20,
        "total_count": 2,
        "has_next": true,
        "has_prev": false,
        "pages": [
            {"id": 1, "vendor_id": 3, "name": "A", "thumbnail": "https://x/1.png", "currency": "KRW",
             "price": 100.0, "bargain_price": 100.0, "discounted_price": 0.0, "stock": 1,
             "created_at": "2022-01-18T00:00:00.00", "issued_at": "2022-01-18T00:00:00.00"},
            {"id": 2, "vendor_id": 3, "name": "B", "thumbnail": "https://x/2.png", "currency": "USD",
             "price": 5.5, "bargain_price": 5.0, "discounted_price": 0.5, "stock": 0,
             "created_at": "2022-01-19T10:20:30.12", "issued_at": "2022-01-19T10:20:30.12"}
        ]
    }"#;

    #[test]
    fn test_page_item_count_matches_array() {
        let page: ProductPage = decode_json(response(200, PAGE)).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.has_next_page);
        assert_eq!(page.items[1].name, "B");
    }

    #[test]
    fn test_not_found_ignores_body() {
        for body in ["", PAGE, "not json"] {
            let err = decode_json::<ProductPage>(response(404, body)).unwrap_err();
            assert_eq!(err, ClientError::UnexpectedStatus(404));
        }
    }

    #[test]
    fn test_redirect_and_server_error_status() {
        assert_eq!(
            decode_text(response(301, "moved")).unwrap_err(),
            ClientError::UnexpectedStatus(301)
        );
        assert_eq!(
            decode_bytes(response(503, "")).unwrap_err(),
            ClientError::UnexpectedStatus(503)
        );
    }

    #[test]
    fn test_shape_mismatch_is_decode_failure() {
        let err = decode_json::<Product>(response(200, PAGE)).unwrap_err();
        assert!(matches!(err, ClientError::DecodeFailure(_)));

        let err =
            decode_json::<ProductPage>(response(200, r#"{"pages": [{"id": 1}]}"#)).unwrap_err();
        assert!(matches!(err, ClientError::DecodeFailure(_)));
    }

    #[test]
    fn test_bad_date_format_is_decode_failure() {
        let body = PAGE.replace("2022-01-18T00:00:00.00", "18/01/2022");
        let err = decode_json::<ProductPage>(response(200, &body)).unwrap_err();
        assert!(matches!(err, ClientError::DecodeFailure(_)));
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(
            decode_json::<ProductPage>(response(200, "")).unwrap_err(),
            ClientError::EmptyBody
        );
        assert_eq!(decode_text(response(204, "")).unwrap_err(), ClientError::EmptyBody);
    }

    #[test]
    fn test_transport_failure_passes_through() {
        let err = decode_text(TransportResult::Failure(TransportFailure::Timeout)).unwrap_err();
        assert_eq!(err, ClientError::Transport(TransportFailure::Timeout));
    }

    #[test]
    fn test_text_is_returned_verbatim() {
        assert_eq!(decode_text(response(200, "-7VPcqeCv=Xbu3&P")).unwrap(), "-7VPcqeCv=Xbu3&P");

        let invalid = TransportResult::Success(HttpResponse {
            status: 200,
            headers: BTreeMap::new(),
            body: vec![0xff, 0xfe],
        });
        assert!(matches!(decode_text(invalid), Err(ClientError::DecodeFailure(_))));
    }
}
