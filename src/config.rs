use crate::implementations::config::GeneratorConfig;

/// Attempts per artifact when nothing else is configured
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Options for the main Didact pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DidactOptions {
    /// Generation attempts per artifact, at least 1
    pub max_attempts: u32,
}

impl DidactOptions {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self { max_attempts: config.max_attempts.max(1) }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

impl Default for DidactOptions {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS }
    }
}
