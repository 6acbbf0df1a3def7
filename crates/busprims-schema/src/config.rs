/// Controls how JSON Schema sources are compiled into the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// When true, object schemas reject properties not named in the schema.
    pub strict_mode: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { strict_mode: false }
    }
}
