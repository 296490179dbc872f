mod common;

use bytes::Bytes;
use futures_util::stream;
use open_market::{ImagePayload, ImageSubtype, Operation, RequestBuilder};
use std::convert::Infallible;

struct Part {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

async fn read_parts(body: Vec<u8>, boundary: &str) -> Vec<Part> {
    let stream = stream::once(async move { Ok::<Bytes, Infallible>(Bytes::from(body)) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(|mime| mime.to_string());
        let data = field.bytes().await.unwrap();
        parts.push(Part {
            name,
            file_name,
            content_type,
            data,
        });
    }
    parts
}

#[tokio::test]
async fn test_create_body_reparses_into_params_and_images() {
    let request = common::write_request();
    let images = [
        ImagePayload::new(vec![0x89, b'P', b'N', b'G', 0, 1, 2], ImageSubtype::Png)
            .with_file_name("first.png"),
        ImagePayload::new(vec![0xff, 0xd8, 0xff, 0xe0], ImageSubtype::Jpeg)
            .with_file_name("second.jpeg"),
    ];

    let descriptor = RequestBuilder::new("https://market.test")
        .build(&Operation::CreateProduct {
            seller_id: "seller",
            request: &request,
            images: &images,
        })
        .unwrap();

    let content_type = descriptor.header("Content-Type").unwrap().to_string();
    let boundary = multer::parse_boundary(&content_type).unwrap();
    let parts = read_parts(descriptor.body.unwrap(), &boundary).await;

    assert_eq!(parts.len(), 3);

    let params = &parts[0];
    assert_eq!(params.name, "params");
    assert_eq!(params.content_type.as_deref(), Some("application/json"));
    assert!(params.file_name.is_none());
    assert_eq!(params.data.as_ref(), serde_json::to_vec(&request).unwrap().as_slice());

    for (part, image) in parts[1..].iter().zip(images.iter()) {
        assert_eq!(part.name, "images");
        assert_eq!(part.file_name.as_deref(), Some(image.file_name.as_str()));
        assert_eq!(
            part.content_type.as_deref(),
            Some(image.subtype.mime_type().as_str())
        );
        assert_eq!(part.data.as_ref(), image.data.as_slice());
    }
}

#[tokio::test]
async fn test_each_request_gets_a_fresh_boundary() {
    let request = common::write_request();
    let builder = RequestBuilder::new("https://market.test");
    let operation = Operation::CreateProduct {
        seller_id: "seller",
        request: &request,
        images: &[],
    };

    let first = builder.build(&operation).unwrap();
    let second = builder.build(&operation).unwrap();
    assert_ne!(first.header("Content-Type"), second.header("Content-Type"));

    let boundary = multer::parse_boundary(first.header("Content-Type").unwrap()).unwrap();
    let parts = read_parts(first.body.unwrap(), &boundary).await;
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, "params");
}

#[tokio::test]
async fn test_quoted_file_name_stays_inside_its_part() {
    let request = common::write_request();
    let images = [ImagePayload::new(b"png".to_vec(), ImageSubtype::Png)
        .with_file_name("evil\"; name=\"params\r\n.png")];

    let descriptor = RequestBuilder::new("https://market.test")
        .build(&Operation::CreateProduct {
            seller_id: "seller",
            request: &request,
            images: &images,
        })
        .unwrap();

    let boundary = multer::parse_boundary(descriptor.header("Content-Type").unwrap()).unwrap();
    let parts = read_parts(descriptor.body.unwrap(), &boundary).await;

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[1].name, "images");
    let file_name = parts[1].file_name.as_deref().unwrap();
    assert!(file_name.starts_with("evil"));
    assert!(file_name.contains("params"));
    assert!(file_name.ends_with(".png"));
    assert_eq!(parts[1].content_type.as_deref(), Some("image/png"));
    assert_eq!(parts[1].data.as_ref(), b"png");
}
