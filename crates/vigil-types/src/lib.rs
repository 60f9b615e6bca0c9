pub mod envelope;
pub mod error;

pub use envelope::{BoundingBox, Detection, Envelope};
pub use error::{Result, SchemaError};
