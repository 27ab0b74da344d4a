//! Remote OCR over HTTP.
//!
//! Posts the selected file as `multipart/form-data` and reads back
//! `{ "text": [..] }`.

pub mod http;

pub use http::{HttpOcrBackend, DEFAULT_ENDPOINT, DEFAULT_FIELD_NAME};
