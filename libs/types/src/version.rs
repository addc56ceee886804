//! Protocol negotiation identifiers.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

/// Protocol-id discriminant of the negotiation header.
///
/// Distinguishes a bare protocol stream from one wrapped in an additional
/// negotiation layer before normal traffic flows.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
pub enum ProtocolId {
    /// Plain protocol stream.
    Amqp = 0,
    /// TLS security layer.
    Tls = 2,
    /// SASL credential-exchange layer.
    Sasl = 3,
}

/// Version identifier negotiated at connection start.
///
/// Immutable and compared by value. The protocol id rides alongside the
/// major/minor pair per the transport negotiation convention; whether a
/// version declares a security-framing layer is a property of that id,
/// not of the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolVersion {
    pub protocol_id: ProtocolId,
    pub major: u8,
    pub minor: u8,
}

impl ProtocolVersion {
    /// Bare version without a security layer.
    pub fn new(major: u8, minor: u8) -> Self {
        Self {
            protocol_id: ProtocolId::Amqp,
            major,
            minor,
        }
    }

    /// Version wrapped in a SASL negotiation layer.
    pub fn with_sasl(major: u8, minor: u8) -> Self {
        Self {
            protocol_id: ProtocolId::Sasl,
            major,
            minor,
        }
    }

    /// Parse the raw wire triple. `None` for protocol ids this broker has
    /// no notion of; the caller treats that the same as a version mismatch.
    pub fn from_wire(protocol_id: u8, major: u8, minor: u8) -> Option<Self> {
        let protocol_id = ProtocolId::try_from(protocol_id).ok()?;
        Some(Self {
            protocol_id,
            major,
            minor,
        })
    }

    /// True when the version declares a SASL security-framing layer.
    pub fn uses_sasl_framing(&self) -> bool {
        self.protocol_id == ProtocolId::Sasl
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}.{}", u8::from(self.protocol_id), self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire() {
        let v = ProtocolVersion::from_wire(3, 1, 0).unwrap();
        assert_eq!(v.protocol_id, ProtocolId::Sasl);
        assert!(v.uses_sasl_framing());

        let v = ProtocolVersion::from_wire(0, 1, 0).unwrap();
        assert!(!v.uses_sasl_framing());

        // Unknown discriminants are not representable
        assert!(ProtocolVersion::from_wire(9, 1, 0).is_none());
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(ProtocolVersion::new(1, 0), ProtocolVersion::new(1, 0));
        assert_ne!(ProtocolVersion::new(1, 0), ProtocolVersion::with_sasl(1, 0));
        assert_ne!(ProtocolVersion::new(1, 0), ProtocolVersion::new(0, 10));
    }
}
