//! Multipart/form-data payload encoder
//!
//! Hand-rolled so the body layout is fully deterministic: fields appear in
//! insertion order with exact CRLF framing, which keeps request logs and
//! golden-body tests reproducible. The boundary is regenerated per request
//! and never reused across attempts.

use uuid::Uuid;

/// A fully framed multipart body plus its boundary token
#[derive(Debug)]
pub struct EncodedPayload {
    pub boundary: String,
    pub bytes: Vec<u8>,
}

impl EncodedPayload {
    /// Value for the request `Content-Type` header
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

/// Incremental multipart/form-data builder
#[derive(Debug)]
pub struct MultipartBody {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartBody {
    /// Start a new body with a freshly generated boundary
    pub fn new() -> Self {
        Self::with_boundary(format!("mealsnap-{}", Uuid::new_v4().simple()))
    }

    /// Start a new body with a caller-chosen boundary (tests)
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            buf: Vec::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Append a text field
    pub fn text(&mut self, name: &str, value: &str) -> &mut Self {
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// Append a file field; content bytes go in verbatim, no escaping
    pub fn file(&mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> &mut Self {
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        self.buf
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// Write the closing boundary and return the finished payload
    pub fn finish(mut self) -> EncodedPayload {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        EncodedPayload {
            boundary: self.boundary,
            bytes: self.buf,
        }
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}
