//! Broker-side surfaces consumed by protocol plugins.
//!
//! The broker proper (queues, store, connection acceptance) lives outside
//! this workspace. What protocol plugins see of it is collected here: the
//! capability interface they implement, the owning registries that manage
//! their lifetime, the broker-wide authentication policy, the SASL server
//! construction contract, and the addressing view used by message
//! translation.

pub mod auth;
pub mod broker;
pub mod capability;
pub mod registry;
pub mod resolver;
pub mod sasl;

pub use auth::AuthPolicy;
pub use broker::Broker;
pub use capability::{
    CodecSelection, ConnectionCodec, OutputSink, ProtocolCapability, RecoveryOutcome,
};
pub use registry::{ObjectRegistry, ProtocolRegistry};
pub use resolver::{AddressResolver, DefaultAddressResolver, RoutingAddress};
pub use sasl::{NullSaslAuthenticator, SaslAuthenticator, SaslAuthenticatorFactory, SaslStatus};

use ironbus_codec::CodecError;

/// Errors surfaced by protocol capabilities and broker wiring.
///
/// Routing signals are deliberately absent: "not my protocol" and "not my
/// record" are ordinary variants of [`CodecSelection`] and
/// [`RecoveryOutcome`], never errors.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("configuration error: {0}")]
    Config(String),

    /// A security layer is mandated but absent from the connection.
    /// Fatal to the single connection attempt.
    #[error("policy violation: {0}")]
    PolicyViolation(String),

    /// SASL verifier construction failed.
    #[error("verifier construction failed: {0}")]
    Verifier(String),

    /// A protocol name was registered twice.
    #[error("protocol already registered: {0}")]
    DuplicateProtocol(String),

    /// A persisted record claimed a format but would not decode. Fatal to
    /// the single record, never to the rest of the recovery pass.
    #[error("record decode failed: {0}")]
    Codec(#[from] CodecError),
}

/// Result type for protocol-capability operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
