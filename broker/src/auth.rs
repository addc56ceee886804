//! Broker-wide authentication policy.

use crate::{ProtocolError, ProtocolResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Authentication policy read from broker configuration.
///
/// Shared read-only with every connection-acceptance thread; protocol
/// plugins never mutate it, so no locking is involved.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthPolicy {
    /// Require every connection to authenticate.
    pub auth_required: bool,
    /// SASL realm handed to verifier construction.
    pub realm: String,
    /// Refuse credential exchange over unencrypted transports.
    pub require_encrypted: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::open_defaults()
    }
}

impl AuthPolicy {
    /// Defaults for an open broker: no credential checking anywhere.
    pub fn open_defaults() -> Self {
        Self {
            auth_required: false,
            realm: "ironbus".to_string(),
            require_encrypted: false,
        }
    }

    /// Defaults for a broker that mandates authentication.
    pub fn authenticated_defaults() -> Self {
        Self {
            auth_required: true,
            realm: "ironbus".to_string(),
            require_encrypted: false,
        }
    }

    /// Load policy from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ProtocolResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ProtocolError::Config(format!("failed to read auth policy: {e}")))?;
        let policy: Self = toml::from_str(&contents)
            .map_err(|e| ProtocolError::Config(format!("failed to parse auth policy: {e}")))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> ProtocolResult<()> {
        if self.auth_required && self.realm.is_empty() {
            return Err(ProtocolError::Config(
                "realm must be set when auth is required".to_string(),
            ));
        }
        Ok(())
    }
}
