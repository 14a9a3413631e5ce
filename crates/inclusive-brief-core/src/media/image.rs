use thiserror::Error;

/// Errors raised when attachment bytes are not a usable image
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// No bytes at all
    #[error("attachment is empty")]
    Empty,
    /// The bytes do not start with a known image signature
    #[error("unrecognized image format")]
    UnknownFormat,
    /// A known image format the model does not accept as inline data
    #[error("{0} images are not supported, use JPEG, PNG, WebP or HEIC")]
    UnsupportedFormat(&'static str),
}

/// Image bytes together with their detected MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Raw encoded bytes as downloaded
    pub bytes: Vec<u8>,
    /// MIME type detected from the magic bytes
    pub mime_type: &'static str,
}

impl DecodedImage {
    /// Recognise `bytes` as an image the vision model takes inline.
    ///
    /// Only the signature is checked; the pixel data is left to the model.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Empty` for no bytes,
    /// `DecodeError::UnknownFormat` when no signature matches and
    /// `DecodeError::UnsupportedFormat` for GIF, BMP or AVIF.
    pub fn decode(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let mime_type = detect_mime_type(&bytes).ok_or(DecodeError::UnknownFormat)?;
        if !INLINE_MIME_TYPES.contains(&mime_type) {
            return Err(DecodeError::UnsupportedFormat(mime_type));
        }
        Ok(Self { bytes, mime_type })
    }
}

/// MIME types Gemini accepts as `inline_data` for images.
const INLINE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/heic"];

fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    // ISO-BMFF: size(4) "ftyp" brand(4)
    if data.len() >= 12 && &data[4..8] == b"ftyp" {
        return match &data[8..12] {
            b"heic" | b"heix" | b"mif1" | b"msf1" => Some("image/heic"),
            b"avif" => Some("image/avif"),
            _ => None,
        };
    }
    if data.starts_with(b"BM") && data.len() >= 14 {
        return Some("image/bmp");
    }
    None
}
