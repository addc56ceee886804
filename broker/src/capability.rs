//! Stable capability interface protocol plugins register with the broker.

use crate::ProtocolResult;
use ironbus_codec::RecordBuffer;
use ironbus_types::{
    GenericMessage, MessageTransfer, ProtocolVersion, RecoverableMessage, SecuritySettings,
};
use std::sync::Arc;

/// Byte-sink handle for one connection.
///
/// Constructed codecs hold one and use it to tell the I/O driver output is
/// pending; the bytes themselves flow outside this core.
pub trait OutputSink: Send + Sync {
    /// Ask the I/O driver to give the codec a chance to produce output.
    fn activate_output(&self);
}

/// Per-connection protocol engine.
///
/// Constructed during negotiation, then owned exclusively by the
/// connection's I/O driver for the connection's lifetime.
pub trait ConnectionCodec: Send {
    /// Connection identifier, for diagnostics.
    fn identifier(&self) -> &str;

    /// True when the codec carries a security-framing layer.
    fn secured(&self) -> bool;
}

/// Result of offering a connection to one protocol capability.
pub enum CodecSelection {
    /// The capability claimed the connection and built its codec stack.
    Codec(Box<dyn ConnectionCodec>),
    /// Not this capability's protocol; offer the connection to the next
    /// registered one.
    NotApplicable,
}

impl std::fmt::Debug for CodecSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecSelection::Codec(codec) => {
                f.debug_tuple("Codec").field(&codec.identifier()).finish()
            }
            CodecSelection::NotApplicable => f.write_str("NotApplicable"),
        }
    }
}

/// Result of offering a persisted record to one protocol capability.
#[derive(Debug, Clone)]
pub enum RecoveryOutcome {
    /// The record was encoded by this capability's protocol and has been
    /// reconstructed.
    Recovered(Arc<RecoverableMessage>),
    /// Foreign format tag; the buffer is left untouched for the next
    /// recoverer in the chain.
    NotMine,
}

/// The capability a protocol plugin registers, keyed by its advertised
/// protocol name.
///
/// Implementations hold only read-only shared state, so all three
/// operations are safe to call concurrently for different connections,
/// messages and records.
pub trait ProtocolCapability: Send + Sync {
    /// Construct the codec/security stack for an inbound connection, or
    /// signal that the negotiated version belongs to another protocol.
    fn create_codec(
        &self,
        version: &ProtocolVersion,
        out: Arc<dyn OutputSink>,
        connection_id: &str,
        security: &SecuritySettings,
    ) -> ProtocolResult<CodecSelection>;

    /// Project a generic message into the legacy transfer shape. Total and
    /// side-effect free; the returned record is fresh and safely shareable.
    fn translate(&self, message: &GenericMessage) -> Arc<MessageTransfer>;

    /// Attempt to reconstruct a persisted record from its current cursor
    /// position.
    fn recover(&self, buffer: &mut RecordBuffer<'_>) -> ProtocolResult<RecoveryOutcome>;
}
