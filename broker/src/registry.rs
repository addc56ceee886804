//! Owning registries for protocol capabilities and broker-lifetime objects.
//!
//! Registered entries are dropped exactly once during an explicit broker
//! teardown call. Nothing here relies on process-exit destructor order.

use crate::capability::{CodecSelection, OutputSink, ProtocolCapability, RecoveryOutcome};
use crate::{ProtocolError, ProtocolResult};
use ironbus_codec::RecordBuffer;
use ironbus_types::{ProtocolVersion, SecuritySettings};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info};

/// Protocol capabilities keyed by their advertised name.
///
/// Registration order is preserved: codec dispatch and store recovery both
/// offer work to capabilities in the order they were added, one at a time.
#[derive(Default)]
pub struct ProtocolRegistry {
    protocols: Vec<(String, Box<dyn ProtocolCapability>)>,
    shut_down: bool,
}

impl ProtocolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability under a unique protocol name.
    pub fn add(&mut self, name: &str, capability: Box<dyn ProtocolCapability>) -> ProtocolResult<()> {
        if self.protocols.iter().any(|(n, _)| n == name) {
            return Err(ProtocolError::DuplicateProtocol(name.to_string()));
        }
        debug!("registered protocol capability: {}", name);
        self.protocols.push((name.to_string(), capability));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&dyn ProtocolCapability> {
        self.protocols
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_ref())
    }

    /// Offer an inbound connection to each capability in registration
    /// order until one claims it.
    ///
    /// A policy failure from a capability that matched the version aborts
    /// the attempt; `NotApplicable` from every capability means no
    /// registered protocol speaks this version.
    pub fn create_codec(
        &self,
        version: &ProtocolVersion,
        out: Arc<dyn OutputSink>,
        connection_id: &str,
        security: &SecuritySettings,
    ) -> ProtocolResult<CodecSelection> {
        for (name, capability) in &self.protocols {
            match capability.create_codec(version, out.clone(), connection_id, security)? {
                CodecSelection::Codec(codec) => {
                    debug!("connection {} claimed by {}", connection_id, name);
                    return Ok(CodecSelection::Codec(codec));
                }
                CodecSelection::NotApplicable => continue,
            }
        }
        Ok(CodecSelection::NotApplicable)
    }

    /// Offer a persisted record to each capability until one claims it.
    ///
    /// Attempts are strictly sequential: recovery by one capability
    /// happens-before the buffer reaches the next, and a capability that
    /// declines must leave the cursor where it found it so the next one
    /// still sees the leading tag. A decode fault from a capability that
    /// claimed the record propagates; it is fatal to this record only.
    pub fn recover_any(&self, buffer: &mut RecordBuffer<'_>) -> ProtocolResult<RecoveryOutcome> {
        for (name, capability) in &self.protocols {
            match capability.recover(buffer)? {
                RecoveryOutcome::Recovered(message) => {
                    debug!("persisted record claimed by {}", name);
                    return Ok(RecoveryOutcome::Recovered(message));
                }
                RecoveryOutcome::NotMine => continue,
            }
        }
        Ok(RecoveryOutcome::NotMine)
    }

    /// Drop every registered capability. Runs at broker teardown;
    /// idempotent, so a second call finds nothing to drain.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        info!("shutting down protocol registry ({} protocols)", self.protocols.len());
        self.protocols.clear();
    }
}

/// Opaque broker-lifetime objects, e.g. a plugin's interconnects
/// collaborator, held until teardown.
#[derive(Default)]
pub struct ObjectRegistry {
    objects: Vec<Arc<dyn Any + Send + Sync>>,
    shut_down: bool,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: Arc<dyn Any + Send + Sync>) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Release every held object. Idempotent.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        debug!("releasing {} broker-lifetime objects", self.objects.len());
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironbus_types::{GenericMessage, MessageTransfer};

    struct DecliningCapability;

    impl ProtocolCapability for DecliningCapability {
        fn create_codec(
            &self,
            _version: &ProtocolVersion,
            _out: Arc<dyn OutputSink>,
            _connection_id: &str,
            _security: &SecuritySettings,
        ) -> ProtocolResult<CodecSelection> {
            Ok(CodecSelection::NotApplicable)
        }

        fn translate(&self, message: &GenericMessage) -> Arc<MessageTransfer> {
            Arc::new(MessageTransfer {
                delivery: Default::default(),
                properties: Default::default(),
                body: message.payload().clone(),
            })
        }

        fn recover(&self, _buffer: &mut RecordBuffer<'_>) -> ProtocolResult<RecoveryOutcome> {
            Ok(RecoveryOutcome::NotMine)
        }
    }

    struct NoopSink;

    impl OutputSink for NoopSink {
        fn activate_output(&self) {}
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ProtocolRegistry::new();
        registry.add("legacy", Box::new(DecliningCapability)).unwrap();
        assert!(matches!(
            registry.add("legacy", Box::new(DecliningCapability)),
            Err(ProtocolError::DuplicateProtocol(_))
        ));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("legacy").is_some());
        assert!(registry.get("other").is_none());
    }

    #[test]
    fn test_unclaimed_connection_and_record() {
        let mut registry = ProtocolRegistry::new();
        registry.add("legacy", Box::new(DecliningCapability)).unwrap();

        let selection = registry
            .create_codec(
                &ProtocolVersion::new(0, 10),
                Arc::new(NoopSink),
                "[::1]:5672",
                &SecuritySettings::default(),
            )
            .unwrap();
        assert!(matches!(selection, CodecSelection::NotApplicable));

        let data = [0x00, 0x00, 0x00, 0x07];
        let mut buffer = RecordBuffer::new(&data);
        let outcome = registry.recover_any(&mut buffer).unwrap();
        assert!(matches!(outcome, RecoveryOutcome::NotMine));
        // Declining capabilities left the cursor alone
        assert_eq!(buffer.position(), 0);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut registry = ProtocolRegistry::new();
        registry.add("legacy", Box::new(DecliningCapability)).unwrap();
        registry.shutdown();
        assert!(registry.is_empty());
        registry.shutdown();
        assert!(registry.is_empty());

        let mut objects = ObjectRegistry::new();
        objects.add(Arc::new(42u32));
        assert_eq!(objects.len(), 1);
        objects.shutdown();
        assert!(objects.is_empty());
        objects.shutdown();
    }
}
