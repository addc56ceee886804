//! Legacy transfer-shaped message record.

use bytes::Bytes;

/// Delivery properties of a legacy transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryProperties {
    pub exchange: String,
    pub routing_key: String,
    pub durable: bool,
    pub priority: u8,
}

/// Message properties of a legacy transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageProperties {
    pub content_type: String,
    pub content_length: u64,
}

/// The transfer-shaped record used by older-protocol consumers and by some
/// storage paths.
///
/// Produced fresh per translation and shared by reference count among
/// however many subscriber paths hold it; the record lives as long as its
/// longest holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTransfer {
    pub delivery: DeliveryProperties,
    pub properties: MessageProperties,
    pub body: Bytes,
}
