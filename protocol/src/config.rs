//! Plugin configuration.

use ironbus_broker::{ProtocolError, ProtocolResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// AMQP 1.0 plugin options.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AmqpOptions {
    /// Domain of this broker, threaded unchanged into every constructed
    /// codec and used for interconnect addressing. Empty is allowed.
    #[serde(default)]
    pub domain: String,
}

impl AmqpOptions {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// Load options from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ProtocolResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ProtocolError::Config(format!("failed to read plugin options: {e}")))?;
        toml::from_str(&contents)
            .map_err(|e| ProtocolError::Config(format!("failed to parse plugin options: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "domain = \"example.com\"").unwrap();
        let options = AmqpOptions::from_file(file.path()).unwrap();
        assert_eq!(options.domain, "example.com");
    }

    #[test]
    fn test_domain_defaults_to_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let options = AmqpOptions::from_file(file.path()).unwrap();
        assert_eq!(options, AmqpOptions::default());
        assert!(options.domain.is_empty());
    }
}
