//! Protocol-agnostic message representation.

use bytes::Bytes;

/// Decoded native message header.
///
/// Delivery metadata carried ahead of the payload in the native persisted
/// record format. The wire encoding lives in `ironbus-codec`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageHeader {
    pub durable: bool,
    pub priority: u8,
    /// Destination address, either `exchange/key` or a bare queue name.
    pub to: String,
    pub subject: String,
    pub content_type: String,
}

/// Broker-internal message: immutable payload plus a metadata view.
///
/// The payload is reference-counted, so cloning a message never copies
/// body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericMessage {
    header: MessageHeader,
    payload: Bytes,
}

impl GenericMessage {
    pub fn new(header: MessageHeader, payload: Bytes) -> Self {
        Self { header, payload }
    }

    pub fn header(&self) -> &MessageHeader {
        &self.header
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}

/// Message reconstructed from durable storage at broker startup.
///
/// Always fully populated: both the decoded header and the reconstructible
/// message are valid, or the recovery attempt produced nothing at all.
/// Partial state is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverableMessage {
    header: MessageHeader,
    message: GenericMessage,
}

impl RecoverableMessage {
    pub fn new(header: MessageHeader, message: GenericMessage) -> Self {
        Self { header, message }
    }

    pub fn header(&self) -> &MessageHeader {
        &self.header
    }

    pub fn message(&self) -> &GenericMessage {
        &self.message
    }
}
