pub mod amqp;
pub mod client;
pub mod error;
pub mod memory;

pub use amqp::AmqpClient;
pub use client::QueueClient;
pub use error::{QueueError, Result};
pub use memory::MemoryQueue;
