use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("JPEG encode failed: {0}")]
    Encode(#[source] image::ImageError),

    #[error("JPEG decode failed: {0}")]
    Decode(#[source] image::ImageError),

    #[error("decoded frame has zero area")]
    EmptyFrame,

    #[error("transport text decode failed: {0}")]
    Transport(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, CodecError>;
