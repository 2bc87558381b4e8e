//! Reader configuration

use crate::descriptor::Descriptor;
use crate::error::ConfigError;

/// Default configuration constants
pub mod defaults {
    /// Default chunk size in bytes
    pub const CHUNK_SIZE: i64 = 42;

    /// Conventional bound for a fixed-size descriptor table
    pub const MAX_DESCRIPTORS: usize = 1024;

    /// Largest chunk size accepted by the builder (64MB)
    pub const MAX_CHUNK_SIZE: i64 = 64 * 1024 * 1024;
}

/// Line reader configuration
///
/// `chunk_size` is signed on purpose: a non-positive value is a valid (if
/// useless) setting under which every read reports "no more data".
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderConfig {
    /// Bytes requested per underlying read
    pub chunk_size: i64,
    /// Descriptors at or above this bound are rejected; `None` = unbounded
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub max_descriptors: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::CHUNK_SIZE,
            max_descriptors: None,
        }
    }
}

impl ReaderConfig {
    /// Create a configuration builder
    pub fn builder() -> ReaderConfigBuilder {
        ReaderConfigBuilder::default()
    }

    /// Chunk length usable for reads, or `None` when reading is disabled
    pub fn chunk_len(&self) -> Option<usize> {
        if self.chunk_size <= 0 {
            return None;
        }
        usize::try_from(self.chunk_size).ok()
    }

    /// Whether `fd` is in the trackable range
    pub fn admits(&self, fd: Descriptor) -> bool {
        match (fd.index(), self.max_descriptors) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(index), Some(max)) => index < max,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_descriptors == Some(0) {
            return Err(ConfigError::ZeroDescriptors);
        }

        if self.chunk_size > defaults::MAX_CHUNK_SIZE {
            return Err(ConfigError::ChunkTooLarge {
                requested: self.chunk_size,
                max: defaults::MAX_CHUNK_SIZE,
            });
        }

        if self.chunk_size <= 0 {
            log::warn!(
                "chunk_size {} is not positive; every read will report end of data",
                self.chunk_size
            );
        }

        Ok(())
    }
}

/// Fluent builder for [`ReaderConfig`]
#[derive(Debug, Default)]
pub struct ReaderConfigBuilder {
    chunk_size: Option<i64>,
    max_descriptors: Option<usize>,
}

impl ReaderConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk size in bytes
    pub fn chunk_size(mut self, bytes: i64) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Bound the registry to descriptors below `max`
    pub fn max_descriptors(mut self, max: usize) -> Self {
        self.max_descriptors = Some(max);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ReaderConfig, ConfigError> {
        let mut config = ReaderConfig::default();

        if let Some(size) = self.chunk_size {
            config.chunk_size = size;
        }

        if self.max_descriptors.is_some() {
            config.max_descriptors = self.max_descriptors;
        }

        config.validate()?;
        Ok(config)
    }
}
