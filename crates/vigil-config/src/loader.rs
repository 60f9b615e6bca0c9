use anyhow::{anyhow, Result};
use config::{Config, File, FileFormat};
use std::path::{Path, PathBuf};

use crate::GlobalConfig;

/// Loads `vigil.toml` from a configuration directory. A missing file yields
/// the built-in defaults; a malformed file is an error.
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new<P: AsRef<Path>>(config_dir: P) -> Self {
        Self {
            config_dir: config_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load_global(&self) -> Result<GlobalConfig> {
        let config_path = self.config_dir.join("vigil.toml");

        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let config = Config::builder()
            .add_source(File::new(
                config_path
                    .to_str()
                    .ok_or_else(|| anyhow!("Invalid config path"))?,
                FileFormat::Toml,
            ))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = tempdir().unwrap();
        let loader = ConfigLoader::new(temp_dir.path());

        let config = loader.load_global().unwrap();
        assert_eq!(config.broker.queue, "object_detection_results");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let content = r#"
[broker]
url = "amqp://broker.internal:5672/%2f"
queue = "detections"

[stream]
bind = "127.0.0.1:8080"
boundary = "vigilframe"
poll_idle_ms = 20
jpeg_quality = 75

[producer]
source_dir = "/var/frames"
"#;
        fs::write(temp_dir.path().join("vigil.toml"), content).unwrap();

        let config = ConfigLoader::new(temp_dir.path()).load_global().unwrap();
        assert_eq!(config.broker.url, "amqp://broker.internal:5672/%2f");
        assert_eq!(config.broker.queue, "detections");
        assert_eq!(config.stream.poll_idle_ms, 20);
        assert_eq!(config.stream.jpeg_quality, 75);
        assert_eq!(config.producer.source_dir, PathBuf::from("/var/frames"));
    }

    #[test]
    fn test_omitted_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let content = r#"
[broker]
url = "amqp://10.0.0.2:5672/%2f"
queue = "detections"
"#;
        fs::write(temp_dir.path().join("vigil.toml"), content).unwrap();

        let config = ConfigLoader::new(temp_dir.path()).load_global().unwrap();
        assert_eq!(config.broker.queue, "detections");
        assert_eq!(config.stream.boundary, "frame");
        assert_eq!(config.stream.jpeg_quality, 90);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("vigil.toml"), "broker = {").unwrap();

        assert!(ConfigLoader::new(temp_dir.path()).load_global().is_err());
    }
}
