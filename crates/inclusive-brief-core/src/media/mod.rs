//! Attachment handling: download over HTTP and recognise image bytes.

mod fetch;
mod image;

pub use fetch::{FetchError, HttpImageFetcher, ImageSource};
pub use image::{DecodeError, DecodedImage};

#[cfg(any(test, feature = "testing"))]
pub use fetch::MockImageSource;
