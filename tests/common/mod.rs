#![allow(dead_code)]

use open_market::{Currency, ProductWriteRequest, SellerCredentials};
use serde_json::{json, Value};

pub fn credentials() -> SellerCredentials {
    SellerCredentials {
        identifier: "cd706a3e-66db-11ec-9626-796401f2341a".to_string(),
        secret: "-7VPcqeCv=Xbu3&P".to_string(),
    }
}

pub fn product_json(id: u64) -> Value {
    json!({
        "id": id,
        "vendor_id": 6,
        "name": format!("product {}", id),
        "thumbnail": format!("https://images.test/{}/thumb.png", id),
        "currency": "KRW",
        "price": 1200.0,
        "bargain_price": 1000.0,
        "discounted_price": 200.0,
        "stock": 7,
        "created_at": "2022-01-18T00:00:00.00",
        "issued_at": "2022-01-19T09:30:15.50"
    })
}

pub fn page_json(page_no: u32, has_next: bool, ids: &[u64]) -> Value {
    json!({
        "page_no": page_no,
        "items_per_page": ids.len(),
        "total_count": 100,
        "offset": 0,
        "limit": ids.len(),
        "last_page": 5,
        "has_next": has_next,
        "has_prev": page_no > 1,
        "pages": ids.iter().map(|id| product_json(*id)).collect::<Vec<_>>()
    })
}

pub fn detail_json(id: u64) -> Value {
    let mut value = product_json(id);
    let obj = value.as_object_mut().unwrap();
    obj.insert("description".into(), json!("A sturdy product"));
    obj.insert(
        "images".into(),
        json!([
            {"id": 11, "url": "https://images.test/a.png", "thumbnail_url": "https://images.test/a_t.png", "succeed": true, "issued_at": "2022-01-18T00:00:00.00"},
            {"id": 12, "url": "https://images.test/b.png", "thumbnail_url": "https://images.test/b_t.png", "succeed": true, "issued_at": "2022-01-18T00:00:00.00"}
        ]),
    );
    obj.insert("vendors".into(), json!({"id": 6, "name": "seller"}));
    value
}

pub fn write_request() -> ProductWriteRequest {
    ProductWriteRequest {
        name: "Desk lamp".to_string(),
        description: "Warm light".to_string(),
        price: 35000.0,
        currency: Currency::KRW,
        discounted_price: 5000.0,
        stock: 3,
        secret: credentials().secret,
        thumbnail_id: None,
    }
}
