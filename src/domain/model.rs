use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    KRW,
    USD,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::KRW => write!(f, "KRW"),
            Currency::USD => write!(f, "USD"),
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "KRW" => Ok(Currency::KRW),
            "USD" => Ok(Currency::USD),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

/// A product as it appears in a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<u64>,
    pub name: String,
    pub thumbnail: String,
    pub currency: Currency,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bargain_price: Option<f64>,
    pub discounted_price: f64,
    pub stock: u64,
    #[serde(with = "market_date")]
    pub created_at: NaiveDateTime,
    #[serde(rename = "issued_at", with = "market_date")]
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: u64,
    pub url: String,
    pub thumbnail_url: String,
    #[serde(with = "market_date")]
    pub issued_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: u64,
    pub name: String,
}

/// Full product record, used to populate edit forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub description: String,
    pub images: Vec<ProductImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendors: Option<Vendor>,
}

impl ProductDetail {
    pub fn image_urls(&self) -> Vec<&str> {
        self.images.iter().map(|image| image.url.as_str()).collect()
    }
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(rename = "pages", alias = "items")]
    pub items: Vec<Product>,
    #[serde(rename = "page_no", default = "first_page")]
    pub page_number: u32,
    #[serde(rename = "has_next", default)]
    pub has_next_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_prev: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u32>,
}

/// Register/modify payload. Only ever serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductWriteRequest {
    pub name: String,
    #[serde(rename = "descriptions")]
    pub description: String,
    pub price: f64,
    pub currency: Currency,
    pub discounted_price: f64,
    pub stock: u64,
    pub secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_id: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSubtype {
    Png,
    Jpeg,
}

impl ImageSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSubtype::Png => "png",
            ImageSubtype::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(&self) -> String {
        format!("image/{}", self.as_str())
    }
}

impl fmt::Display for ImageSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSubtype {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageSubtype::Png),
            "jpg" | "jpeg" => Ok(ImageSubtype::Jpeg),
            other => Err(format!("unsupported image type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub data: Vec<u8>,
    pub file_name: String,
    pub subtype: ImageSubtype,
}

impl ImagePayload {
    /// Payload with a generated `<uuid>.<subtype>` file name.
    pub fn new(data: Vec<u8>, subtype: ImageSubtype) -> Self {
        let file_name = format!("{}.{}", uuid::Uuid::new_v4(), subtype);
        Self {
            data,
            file_name,
            subtype,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

/// Seller credentials sent with every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerCredentials {
    pub identifier: String,
    pub secret: String,
}

/// Serde adapter for the server's `yyyy-MM-dd'T'HH:mm:ss.SS` timestamps.
pub mod market_date {
    use chrono::{NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn parse(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(value, PARSE_FORMAT)
    }

    pub fn format(value: &NaiveDateTime) -> String {
        format!(
            "{}.{:02}",
            value.format("%Y-%m-%dT%H:%M:%S"),
            value.nanosecond() % 1_000_000_000 / 10_000_000
        )
    }

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
