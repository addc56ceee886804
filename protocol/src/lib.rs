//! AMQP 1.0 protocol plugin for the ironbus broker.
//!
//! Decides per inbound connection which codec/security stack to install,
//! bridges messages between the generic broker representation and the
//! legacy transfer shape, and reconstructs native-format records during
//! store recovery. Frame-level AMQP encode/decode and the SASL mechanism
//! cryptography stay outside this crate, behind the construction
//! contracts defined in `ironbus-broker`.

pub mod config;
pub mod connection;
pub mod interconnects;
pub mod plugin;
pub mod recovery;
pub mod security;
pub mod translation;
pub mod version;

pub use config::AmqpOptions;
pub use connection::{AmqpCodec, AmqpConnection, SaslCodec, Verifier};
pub use interconnects::{InterconnectLink, Interconnects};
pub use plugin::{register_amqp, AmqpDispatch, AmqpProtocol, PROTOCOL_NAME};
pub use recovery::recover_record;
pub use security::{select_security, SecuritySelection};
pub use translation::Translation;
pub use version::{version_matches, SUPPORTED_MAJOR, SUPPORTED_MINOR};
