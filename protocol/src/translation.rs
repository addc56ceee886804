//! Translation of generic messages into the legacy transfer shape.

use ironbus_broker::{AddressResolver, RoutingAddress};
use ironbus_types::{DeliveryProperties, GenericMessage, MessageProperties, MessageTransfer};

/// Translation context binding a message to the broker's addressing view.
///
/// The projection is total and side-effect free: any well-formed message
/// translates, the source is never touched, and the body is shared by
/// reference count rather than copied.
pub struct Translation<'a> {
    message: &'a GenericMessage,
    resolver: &'a dyn AddressResolver,
}

impl<'a> Translation<'a> {
    pub fn new(message: &'a GenericMessage, resolver: &'a dyn AddressResolver) -> Self {
        Self { message, resolver }
    }

    /// Extract the transfer-shaped record.
    pub fn into_transfer(self) -> MessageTransfer {
        let header = self.message.header();
        let RoutingAddress {
            exchange,
            routing_key,
        } = self.resolver.resolve(&header.to);

        MessageTransfer {
            delivery: DeliveryProperties {
                exchange,
                routing_key,
                durable: header.durable,
                priority: header.priority,
            },
            properties: MessageProperties {
                content_type: header.content_type.clone(),
                content_length: self.message.payload_len() as u64,
            },
            body: self.message.payload().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use ironbus_broker::DefaultAddressResolver;
    use ironbus_types::MessageHeader;

    fn sample_message() -> GenericMessage {
        GenericMessage::new(
            MessageHeader {
                durable: true,
                priority: 7,
                to: "market/ticks.eu".to_string(),
                subject: "ticks.eu".to_string(),
                content_type: "application/json".to_string(),
            },
            Bytes::from_static(b"{\"bid\":42}"),
        )
    }

    #[test]
    fn test_projection_fields() {
        let message = sample_message();
        let transfer = Translation::new(&message, &DefaultAddressResolver).into_transfer();

        assert_eq!(transfer.delivery.exchange, "market");
        assert_eq!(transfer.delivery.routing_key, "ticks.eu");
        assert!(transfer.delivery.durable);
        assert_eq!(transfer.delivery.priority, 7);
        assert_eq!(transfer.properties.content_type, "application/json");
        assert_eq!(transfer.properties.content_length, 10);
        assert_eq!(transfer.body, message.payload());
    }

    #[test]
    fn test_projection_is_pure() {
        let message = sample_message();
        let before = message.clone();

        let first = Translation::new(&message, &DefaultAddressResolver).into_transfer();
        let second = Translation::new(&message, &DefaultAddressResolver).into_transfer();

        // Semantically equal records, fresh each call, source untouched
        assert_eq!(first, second);
        assert_eq!(message, before);
        // The body is shared storage, not a copy
        assert_eq!(first.body.as_ptr(), message.payload().as_ptr());
    }
}
