//! Outbound interconnect link table.
//!
//! Companion collaborator for federation-style outbound links. Registered
//! with the broker's object registry alongside the protocol capability and
//! shared with every codec the plugin constructs; it stays alive until the
//! registry drains at teardown and the last connection drops its handle.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// A configured outbound link to a federated peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterconnectLink {
    /// Domain the link belongs to.
    pub domain: String,
    /// Peer address the link connects out to.
    pub address: String,
}

/// Named outbound links, safe for concurrent access from connection
/// threads.
#[derive(Debug, Default)]
pub struct Interconnects {
    links: DashMap<String, InterconnectLink>,
}

impl Interconnects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a link. Returns false when the name is already taken.
    pub fn add_link(&self, name: &str, link: InterconnectLink) -> bool {
        match self.links.entry(name.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(link);
                true
            }
        }
    }

    pub fn remove_link(&self, name: &str) -> Option<InterconnectLink> {
        self.links.remove(name).map(|(_, link)| link)
    }

    pub fn lookup(&self, name: &str) -> Option<InterconnectLink> {
        self.links.get(name).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_lifecycle() {
        let interconnects = Interconnects::new();
        let link = InterconnectLink {
            domain: "example.com".to_string(),
            address: "amqp://peer.example.com:5672".to_string(),
        };

        assert!(interconnects.add_link("peer", link.clone()));
        assert!(!interconnects.add_link("peer", link.clone()));
        assert_eq!(interconnects.len(), 1);
        assert_eq!(interconnects.lookup("peer"), Some(link.clone()));

        assert_eq!(interconnects.remove_link("peer"), Some(link));
        assert!(interconnects.is_empty());
        assert_eq!(interconnects.remove_link("peer"), None);
    }
}
