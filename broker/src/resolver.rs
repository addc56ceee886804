//! Addressing metadata resolution for message translation.

/// Exchange and routing key a message address resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingAddress {
    pub exchange: String,
    pub routing_key: String,
}

/// Broker-side view a translation context uses to resolve a message's
/// destination address into legacy addressing metadata.
pub trait AddressResolver: Send + Sync {
    fn resolve(&self, address: &str) -> RoutingAddress;
}

/// Default addressing convention: `exchange/key` splits at the first
/// slash; a bare name routes through the default exchange (the empty
/// name) with the whole address as routing key.
#[derive(Debug, Clone, Default)]
pub struct DefaultAddressResolver;

impl AddressResolver for DefaultAddressResolver {
    fn resolve(&self, address: &str) -> RoutingAddress {
        match address.split_once('/') {
            Some((exchange, key)) => RoutingAddress {
                exchange: exchange.to_string(),
                routing_key: key.to_string(),
            },
            None => RoutingAddress {
                exchange: String::new(),
                routing_key: address.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_and_key() {
        let resolved = DefaultAddressResolver.resolve("market/ticks.eu");
        assert_eq!(resolved.exchange, "market");
        assert_eq!(resolved.routing_key, "ticks.eu");
    }

    #[test]
    fn test_bare_name_uses_default_exchange() {
        let resolved = DefaultAddressResolver.resolve("orders");
        assert_eq!(resolved.exchange, "");
        assert_eq!(resolved.routing_key, "orders");
    }

    #[test]
    fn test_only_first_slash_splits() {
        let resolved = DefaultAddressResolver.resolve("market/eu/ticks");
        assert_eq!(resolved.exchange, "market");
        assert_eq!(resolved.routing_key, "eu/ticks");
    }
}
