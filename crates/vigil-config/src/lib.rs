pub mod global;
pub mod loader;

pub use global::{BrokerConfig, GlobalConfig, ProducerConfig, StreamConfig};
pub use loader::ConfigLoader;
