//! Mapper configuration.

/// Configuration shared by the serializer and deserializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    /// Namespace prefix for element fields that do not declare their own.
    pub default_namespace: String,
    /// Case-insensitive marker that identifies a fault root element.
    pub fault_marker: String,
    /// Maximum nesting depth followed during deserialization.
    pub max_depth: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            default_namespace: crate::DEFAULT_NAMESPACE.to_string(),
            fault_marker: crate::DEFAULT_FAULT_MARKER.to_string(),
            max_depth: crate::DEFAULT_MAX_DEPTH,
        }
    }
}

impl MapperConfig {
    /// Create a new mapper config builder.
    pub fn builder() -> MapperConfigBuilder {
        MapperConfigBuilder::default()
    }
}

/// Builder for MapperConfig.
#[derive(Debug, Default)]
pub struct MapperConfigBuilder {
    config: MapperConfig,
}

impl MapperConfigBuilder {
    /// Set the default element namespace prefix.
    pub fn with_default_namespace(mut self, prefix: impl Into<String>) -> Self {
        self.config.default_namespace = prefix.into();
        self
    }

    /// Set the fault marker matched against the response root name.
    pub fn with_fault_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.fault_marker = marker.into();
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Build the mapper configuration.
    pub fn build(self) -> MapperConfig {
        self.config
    }
}
