use base64::{engine::general_purpose::STANDARD, Engine as _};
use mime::Mime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataUriError {
    #[error("photo data is missing")]
    Empty,
    #[error("expected a data URI of the form data:<mimetype>;base64,<encoded_data>")]
    NotADataUri,
    #[error("unrecognized media type: {0}")]
    BadMediaType(String),
    #[error("media type {0} is not an image")]
    NotAnImage(Mime),
    #[error("payload is not valid base64")]
    BadPayload,
}

/// A photo as a self-describing inline payload: the declared image media
/// type, the decoded bytes, and the original URI string for callers that
/// forward it as-is (the captioning request embeds the URI unchanged).
#[derive(Debug, Clone)]
pub struct EncodedImage {
    mime: Mime,
    bytes: Vec<u8>,
    data_uri: String,
}

impl EncodedImage {
    pub fn parse(data_uri: &str) -> Result<Self, DataUriError> {
        if data_uri.is_empty() {
            return Err(DataUriError::Empty);
        }

        let rest = data_uri.strip_prefix("data:").ok_or(DataUriError::NotADataUri)?;
        let (media_type, payload) = rest.split_once(";base64,").ok_or(DataUriError::NotADataUri)?;

        let mime: Mime = media_type
            .parse()
            .map_err(|_| DataUriError::BadMediaType(media_type.to_string()))?;
        if mime.type_() != mime::IMAGE {
            return Err(DataUriError::NotAnImage(mime));
        }

        let bytes = STANDARD.decode(payload).map_err(|_| DataUriError::BadPayload)?;

        Ok(EncodedImage {
            mime,
            bytes,
            data_uri: data_uri.to_string(),
        })
    }

    /// Decoded size in bytes, which is what the upload limit is checked
    /// against (matches the original file size, not the base64 inflation).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime(&self) -> &Mime {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_data_uri(&self) -> &str {
        &self.data_uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg_uri(bytes: &[u8]) -> String {
        format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
    }

    #[test]
    fn parses_a_jpeg_data_uri() {
        let image = EncodedImage::parse(&jpeg_uri(b"fake jpeg bytes")).unwrap();
        assert_eq!(image.mime().essence_str(), "image/jpeg");
        assert_eq!(image.bytes(), b"fake jpeg bytes");
        assert_eq!(image.len(), 15);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(EncodedImage::parse(""), Err(DataUriError::Empty)));
    }

    #[test]
    fn rejects_plain_urls() {
        let result = EncodedImage::parse("https://example.com/photo.jpg");
        assert!(matches!(result, Err(DataUriError::NotADataUri)));
    }

    #[test]
    fn rejects_non_image_media_types() {
        let uri = format!("data:text/plain;base64,{}", STANDARD.encode(b"hello"));
        assert!(matches!(EncodedImage::parse(&uri), Err(DataUriError::NotAnImage(_))));
    }

    #[test]
    fn rejects_broken_base64() {
        let result = EncodedImage::parse("data:image/png;base64,@@not-base64@@");
        assert!(matches!(result, Err(DataUriError::BadPayload)));
    }
}
