//! Broker aggregate handed to protocol plugins at early initialization.

use crate::auth::AuthPolicy;
use crate::registry::{ObjectRegistry, ProtocolRegistry};
use crate::resolver::{AddressResolver, DefaultAddressResolver};
use crate::sasl::SaslAuthenticatorFactory;
use std::sync::Arc;
use tracing::info;

/// The pieces of the broker a protocol plugin is allowed to see.
///
/// Plugins receive `&mut Broker` during early initialization, before any
/// store-recovery pass runs. They register their capability and
/// lifecycle objects there and keep shared handles to the read-only
/// configuration; nothing is mutated after initialization, so connection
/// threads read the policy and factory without locks.
pub struct Broker {
    auth_policy: Arc<AuthPolicy>,
    sasl_factory: Arc<dyn SaslAuthenticatorFactory>,
    resolver: Arc<dyn AddressResolver>,
    protocols: ProtocolRegistry,
    objects: ObjectRegistry,
}

impl Broker {
    pub fn new(auth_policy: AuthPolicy, sasl_factory: Arc<dyn SaslAuthenticatorFactory>) -> Self {
        Self {
            auth_policy: Arc::new(auth_policy),
            sasl_factory,
            resolver: Arc::new(DefaultAddressResolver),
            protocols: ProtocolRegistry::new(),
            objects: ObjectRegistry::new(),
        }
    }

    /// Replace the default addressing convention.
    pub fn with_resolver(mut self, resolver: Arc<dyn AddressResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn auth_policy(&self) -> &Arc<AuthPolicy> {
        &self.auth_policy
    }

    pub fn sasl_factory(&self) -> &Arc<dyn SaslAuthenticatorFactory> {
        &self.sasl_factory
    }

    pub fn address_resolver(&self) -> &Arc<dyn AddressResolver> {
        &self.resolver
    }

    pub fn protocols(&self) -> &ProtocolRegistry {
        &self.protocols
    }

    pub fn protocols_mut(&mut self) -> &mut ProtocolRegistry {
        &mut self.protocols
    }

    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.objects
    }

    /// Tear down both registries exactly once: protocols first, then the
    /// lifecycle objects they registered.
    pub fn shutdown(&mut self) {
        info!("broker shutting down");
        self.protocols.shutdown();
        self.objects.shutdown();
    }
}
