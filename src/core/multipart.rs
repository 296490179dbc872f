//! multipart/form-data body encoding for product registration.

const CRLF: &str = "\r\n";

pub fn generate_boundary() -> String {
    format!("Boundary-{}", uuid::Uuid::new_v4())
}

pub fn content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={}", boundary)
}

/// Accumulates parts into a single body. Each part is framed as
/// `--boundary`, headers, blank line, payload, CRLF.
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    pub fn field(&mut self, name: &str, content_type: &str, data: &[u8]) -> &mut Self {
        self.open_part(&format!("form-data; name=\"{}\"", escape_param(name)), content_type);
        self.close_part(data);
        self
    }

    pub fn file(
        &mut self,
        name: &str,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> &mut Self {
        self.open_part(
            &format!(
                "form-data; name=\"{}\"; filename=\"{}\"",
                escape_param(name),
                escape_param(file_name)
            ),
            content_type,
        );
        self.close_part(data);
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.push(&format!("--{}--{}", self.boundary, CRLF));
        self.body
    }

    fn open_part(&mut self, disposition: &str, content_type: &str) {
        let head = format!(
            "--{boundary}{crlf}Content-Disposition: {disposition}{crlf}Content-Type: {content_type}{crlf}{crlf}",
            boundary = self.boundary,
            crlf = CRLF,
            disposition = disposition,
            content_type = content_type,
        );
        self.push(&head);
    }

    fn close_part(&mut self, data: &[u8]) {
        self.body.extend_from_slice(data);
        self.push(CRLF);
    }

    fn push(&mut self, text: &str) {
        self.body.extend_from_slice(text.as_bytes());
    }
}

/// Percent-encodes the characters that would end a quoted header parameter
/// or the header line, as browsers do for form-data names.
fn escape_param(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
