//! SASL server contract.
//!
//! The cryptographic mechanisms live outside the broker; connections only
//! need the exchange surface below plus a factory able to produce a real
//! verifier. The null verifier completes the wire-level handshake without
//! checking anything and backs brokers running with authentication off.

use crate::ProtocolResult;
use ironbus_types::SecuritySettings;

/// Outcome of one step of the credential exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaslStatus {
    /// More data needed from the peer, carrying the challenge to send.
    Challenge(Vec<u8>),
    Ok,
    Failed,
}

/// Server side of the credential exchange.
///
/// Installed into exactly one security-framed codec and destroyed with it;
/// the verifier never outlives its connection.
pub trait SaslAuthenticator: Send {
    /// Mechanisms this server advertises to the peer.
    fn mechanisms(&self) -> Vec<String>;

    /// Begin the exchange for the peer's chosen mechanism.
    fn begin(&mut self, mechanism: &str, initial_response: Option<&[u8]>) -> SaslStatus;

    /// Feed the peer's next response.
    fn step(&mut self, response: &[u8]) -> SaslStatus;

    /// True once the exchange has concluded, successfully or not.
    fn is_complete(&self) -> bool;

    /// Failure diagnostic, when the exchange concluded unsuccessfully.
    fn error(&self) -> Option<&str>;
}

/// Always-succeeding verifier bound to a realm.
///
/// Lets the wire-level security handshake run to completion without
/// rejecting anyone; the peer cannot tell it apart from a permissive real
/// server.
#[derive(Debug)]
pub struct NullSaslAuthenticator {
    realm: String,
    complete: bool,
}

impl NullSaslAuthenticator {
    pub fn new(realm: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
            complete: false,
        }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }
}

impl SaslAuthenticator for NullSaslAuthenticator {
    fn mechanisms(&self) -> Vec<String> {
        vec![
            "ANONYMOUS".to_string(),
            "PLAIN".to_string(),
            "EXTERNAL".to_string(),
        ]
    }

    fn begin(&mut self, _mechanism: &str, _initial_response: Option<&[u8]>) -> SaslStatus {
        self.complete = true;
        SaslStatus::Ok
    }

    fn step(&mut self, _response: &[u8]) -> SaslStatus {
        self.complete = true;
        SaslStatus::Ok
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn error(&self) -> Option<&str> {
        None
    }
}

/// Constructor for real credential-checking verifiers.
///
/// Implemented by the external security backend. A broker that mandates
/// authentication must supply one at initialization; a matching connection
/// without a factory is a wiring bug, not a per-connection condition.
pub trait SaslAuthenticatorFactory: Send + Sync {
    fn create_authenticator(
        &self,
        realm: &str,
        require_encrypted: bool,
        external: &SecuritySettings,
    ) -> ProtocolResult<Box<dyn SaslAuthenticator>>;
}
