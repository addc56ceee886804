//! The AMQP 1.0 protocol capability and its broker registration.

use crate::config::AmqpOptions;
use crate::connection::{AmqpCodec, AmqpConnection, SaslCodec, Verifier};
use crate::interconnects::Interconnects;
use crate::recovery::recover_record;
use crate::security::{select_security, SecuritySelection};
use crate::translation::Translation;
use crate::version::version_matches;
use ironbus_broker::{
    AddressResolver, AuthPolicy, Broker, CodecSelection, NullSaslAuthenticator, OutputSink,
    ProtocolCapability, ProtocolError, ProtocolResult, RecoveryOutcome, SaslAuthenticatorFactory,
};
use ironbus_codec::RecordBuffer;
use ironbus_types::{GenericMessage, MessageTransfer, ProtocolVersion, SecuritySettings};
use std::sync::Arc;
use tracing::info;

/// Name this plugin registers under in the protocol registry.
pub const PROTOCOL_NAME: &str = "AMQP 1.0";

/// Result of offering a connection to this plugin.
pub enum AmqpDispatch {
    /// The plugin claimed the connection and built its codec stack.
    Codec(AmqpCodec),
    /// Another registered protocol gets a chance.
    NotApplicable,
}

impl std::fmt::Debug for AmqpDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmqpDispatch::Codec(_) => f.write_str("Codec"),
            AmqpDispatch::NotApplicable => f.write_str("NotApplicable"),
        }
    }
}

/// The per-domain protocol bundle: codec dispatch, message translation and
/// store recovery behind one capability.
///
/// Holds only read-only shared state, so any number of connection and
/// recovery threads may call into it concurrently.
pub struct AmqpProtocol {
    domain: String,
    auth_policy: Arc<AuthPolicy>,
    sasl_factory: Arc<dyn SaslAuthenticatorFactory>,
    resolver: Arc<dyn AddressResolver>,
    interconnects: Arc<Interconnects>,
}

impl AmqpProtocol {
    pub fn new(
        domain: String,
        auth_policy: Arc<AuthPolicy>,
        sasl_factory: Arc<dyn SaslAuthenticatorFactory>,
        resolver: Arc<dyn AddressResolver>,
        interconnects: Arc<Interconnects>,
    ) -> Self {
        Self {
            domain,
            auth_policy,
            sasl_factory,
            resolver,
            interconnects,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn interconnects(&self) -> &Arc<Interconnects> {
        &self.interconnects
    }

    /// Construct the codec/security stack for an inbound connection.
    ///
    /// A version mismatch is a routing signal, not an error; a mandated
    /// but absent security layer is fatal to the attempt and the caller
    /// must close the connection. No I/O happens here; the returned codec
    /// owns the connection's byte stream from now on.
    pub fn create(
        &self,
        version: &ProtocolVersion,
        out: Arc<dyn OutputSink>,
        connection_id: &str,
        security: &SecuritySettings,
    ) -> ProtocolResult<AmqpDispatch> {
        if !version_matches(version) {
            return Ok(AmqpDispatch::NotApplicable);
        }

        match select_security(self.auth_policy.auth_required, version.uses_sasl_framing()) {
            SecuritySelection::RealVerifier => {
                let authenticator = self.sasl_factory.create_authenticator(
                    &self.auth_policy.realm,
                    self.auth_policy.require_encrypted,
                    security,
                )?;
                info!("using AMQP 1.0 (with SASL layer) for {}", connection_id);
                Ok(AmqpDispatch::Codec(AmqpCodec::SecurityFramed(
                    SaslCodec::new(
                        out,
                        connection_id.to_string(),
                        Verifier::Real(authenticator),
                        self.interconnects.clone(),
                        self.domain.clone(),
                    ),
                )))
            }
            SecuritySelection::NullVerifier => {
                let authenticator = NullSaslAuthenticator::new(self.auth_policy.realm.clone());
                info!("using AMQP 1.0 (with dummy SASL layer) for {}", connection_id);
                Ok(AmqpDispatch::Codec(AmqpCodec::SecurityFramed(
                    SaslCodec::new(
                        out,
                        connection_id.to_string(),
                        Verifier::Null(authenticator),
                        self.interconnects.clone(),
                        self.domain.clone(),
                    ),
                )))
            }
            SecuritySelection::Reject => Err(ProtocolError::PolicyViolation(
                "SASL layer required".to_string(),
            )),
            SecuritySelection::Plain => {
                info!("using AMQP 1.0 (no SASL layer) for {}", connection_id);
                Ok(AmqpDispatch::Codec(AmqpCodec::Plain(AmqpConnection::new(
                    out,
                    connection_id.to_string(),
                    self.interconnects.clone(),
                    self.domain.clone(),
                ))))
            }
        }
    }

    /// Project a generic message into the legacy transfer shape.
    pub fn translate(&self, message: &GenericMessage) -> Arc<MessageTransfer> {
        Arc::new(Translation::new(message, self.resolver.as_ref()).into_transfer())
    }

    /// Attempt to reconstruct a persisted record.
    pub fn recover(&self, buffer: &mut RecordBuffer<'_>) -> ProtocolResult<RecoveryOutcome> {
        recover_record(buffer)
    }
}

impl ProtocolCapability for AmqpProtocol {
    fn create_codec(
        &self,
        version: &ProtocolVersion,
        out: Arc<dyn OutputSink>,
        connection_id: &str,
        security: &SecuritySettings,
    ) -> ProtocolResult<CodecSelection> {
        match self.create(version, out, connection_id, security)? {
            AmqpDispatch::Codec(codec) => Ok(CodecSelection::Codec(Box::new(codec))),
            AmqpDispatch::NotApplicable => Ok(CodecSelection::NotApplicable),
        }
    }

    fn translate(&self, message: &GenericMessage) -> Arc<MessageTransfer> {
        AmqpProtocol::translate(self, message)
    }

    fn recover(&self, buffer: &mut RecordBuffer<'_>) -> ProtocolResult<RecoveryOutcome> {
        AmqpProtocol::recover(self, buffer)
    }
}

/// Register the AMQP 1.0 plugin with the broker.
///
/// Runs during early initialization, strictly before the store-recovery
/// pass: recovery consults the protocol registry, so the capability must
/// already be there. The interconnects collaborator goes into the object
/// registry, which keeps it alive until broker teardown. There is no
/// later initialization phase.
pub fn register_amqp(broker: &mut Broker, options: &AmqpOptions) -> ProtocolResult<()> {
    let interconnects = Arc::new(Interconnects::new());
    let protocol = AmqpProtocol::new(
        options.domain.clone(),
        broker.auth_policy().clone(),
        broker.sasl_factory().clone(),
        broker.address_resolver().clone(),
        interconnects.clone(),
    );
    broker
        .protocols_mut()
        .add(PROTOCOL_NAME, Box::new(protocol))?;
    broker.objects_mut().add(interconnects);
    Ok(())
}
