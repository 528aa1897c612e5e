use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const BUFFER_SIZE: usize = 1_048_576;

pub const ASCII_SAMPLE_SIZE: u64 = BUFFER_SIZE as u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsConfig {
    pub buffer_size: usize,
    pub ascii_sample_size: Option<u64>,
    pub report_non_ascii: bool,
    // WHATWG label such as "windows-1252"; `None` keeps strict UTF-8.
    pub encoding: Option<String>,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            buffer_size: BUFFER_SIZE,
            ascii_sample_size: Some(ASCII_SAMPLE_SIZE),
            report_non_ascii: true,
            encoding: None,
        }
    }
}

impl FsConfig {
    pub fn from_file(path: &PathBuf) -> crate::core::error::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::core::error::FsError::from_io(e, path))?;
        let config: Self = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&content)
                .map_err(|e| crate::core::error::FsError::Configuration(e.to_string()))?
        } else {
            toml::from_str(&content)
                .map_err(|e| crate::core::error::FsError::Configuration(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &PathBuf) -> crate::core::error::Result<()> {
        let content = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| crate::core::error::FsError::Configuration(e.to_string()))?
        } else {
            toml::to_string_pretty(self)
                .map_err(|e| crate::core::error::FsError::Configuration(e.to_string()))?
        };
        std::fs::write(path, content).map_err(|e| crate::core::error::FsError::from_io(e, path))?;
        Ok(())
    }

    pub fn validate(&self) -> crate::core::error::Result<()> {
        if self.buffer_size == 0 {
            return Err(crate::core::error::FsError::Configuration(
                "buffer_size must be greater than zero".to_string(),
            ));
        }
        self.text_encoding()?;
        Ok(())
    }

    pub fn text_encoding(&self) -> crate::core::error::Result<Option<&'static Encoding>> {
        match &self.encoding {
            Some(label) => Encoding::for_label(label.as_bytes()).map(Some).ok_or_else(|| {
                crate::core::error::FsError::Configuration(format!("unknown encoding: {}", label))
            }),
            None => Ok(None),
        }
    }
}

pub struct FsConfigBuilder {
    config: FsConfig,
}

impl FsConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: FsConfig::default(),
        }
    }

    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = size;
        self
    }

    pub fn ascii_sample_size(mut self, size: u64) -> Self {
        self.config.ascii_sample_size = Some(size);
        self
    }

    pub fn inspect_whole_file(mut self) -> Self {
        self.config.ascii_sample_size = None;
        self
    }

    pub fn report_non_ascii(mut self, report: bool) -> Self {
        self.config.report_non_ascii = report;
        self
    }

    pub fn encoding<S: Into<String>>(mut self, label: S) -> Self {
        self.config.encoding = Some(label.into());
        self
    }

    pub fn build(self) -> FsConfig {
        self.config
    }
}

impl Default for FsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
