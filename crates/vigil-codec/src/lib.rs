pub mod error;
pub mod jpeg;
pub mod transport;

pub use error::{CodecError, Result};
pub use jpeg::{decode_jpeg, encode_jpeg};
pub use transport::{from_transport_text, to_transport_text};
