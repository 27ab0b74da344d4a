use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file handed over by the picker or a drop, held in memory until submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Where a selection came from. Both carry the full file list of the event;
/// only the first entry is ever used.
#[derive(Debug, Clone)]
pub enum SelectionSource {
    Picker(Vec<SelectedFile>),
    Drop(Vec<SelectedFile>),
}

impl SelectionSource {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Picker(_) => "picker",
            Self::Drop(_) => "drop",
        }
    }

    pub fn into_first(self) -> Option<SelectedFile> {
        match self {
            Self::Picker(files) | Self::Drop(files) => files.into_iter().next(),
        }
    }
}

/// Ordered text fragments returned by the OCR service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedText(Vec<String>);

impl ExtractedText {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The display form: fragments joined by single spaces.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

impl From<Vec<String>> for ExtractedText {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

/// Wire shape of a successful `POST /ocr` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrResponse {
    pub text: ExtractedText,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/png", vec![1u8, 2, 3])
    }

    #[test]
    fn first_file_wins() {
        let src = SelectionSource::Drop(vec![file("a.png"), file("b.png")]);
        assert_eq!(src.kind(), "drop");
        assert_eq!(src.into_first().unwrap().name, "a.png");
        assert!(SelectionSource::Picker(vec![]).into_first().is_none());
    }

    #[test]
    fn joins_with_single_spaces() {
        let text = ExtractedText::from(vec!["Hello".to_string(), "World".to_string()]);
        assert_eq!(text.joined(), "Hello World");
        assert_eq!(ExtractedText::default().joined(), "");
    }

    #[test]
    fn response_parses_token_array() {
        let resp: OcrResponse = serde_json::from_str(r#"{"text":["a","b"]}"#).unwrap();
        assert_eq!(resp.text.tokens(), ["a", "b"]);
        assert!(serde_json::from_str::<OcrResponse>(r#"{"text":"ab"}"#).is_err());
        assert!(serde_json::from_str::<OcrResponse>(r#"{"words":[]}"#).is_err());
    }
}
