pub mod html;
pub mod http;
pub mod stream;

pub use http::{create_router, AppState};
pub use stream::{frame_chunks, ChunkOptions};
