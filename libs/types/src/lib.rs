//! Core data model for the ironbus broker.
//!
//! Pure data shared between the broker core and its protocol plugins:
//! negotiation identifiers, the protocol-agnostic message representation,
//! the legacy transfer-shaped record, and the handle produced by store
//! recovery. No I/O and no wire-format logic lives here; encoding belongs
//! to `ironbus-codec`.

pub mod message;
pub mod security;
pub mod transfer;
pub mod version;

pub use message::{GenericMessage, MessageHeader, RecoverableMessage};
pub use security::SecuritySettings;
pub use transfer::{DeliveryProperties, MessageProperties, MessageTransfer};
pub use version::{ProtocolId, ProtocolVersion};
