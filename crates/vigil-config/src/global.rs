use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub producer: ProducerConfig,
}

/// Broker endpoint shared by producer and viewer. The queue name is the
/// single well-known coupling point between the two processes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrokerConfig {
    pub url: String,
    pub queue: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamConfig {
    pub bind: String,
    pub boundary: String,
    pub poll_idle_ms: u64,
    pub jpeg_quality: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProducerConfig {
    pub source_dir: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            broker: BrokerConfig::default(),
            stream: StreamConfig::default(),
            producer: ProducerConfig::default(),
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            url: "amqp://127.0.0.1:5672/%2f".to_string(),
            queue: "object_detection_results".to_string(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            boundary: "frame".to_string(),
            poll_idle_ms: 5,
            jpeg_quality: 90,
        }
    }
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("./frames"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_global_config() {
        let config = GlobalConfig::default();
        assert_eq!(config.broker.queue, "object_detection_results");
        assert_eq!(config.stream.boundary, "frame");
        assert_eq!(config.stream.poll_idle_ms, 5);
        assert_eq!(config.stream.jpeg_quality, 90);
    }
}
