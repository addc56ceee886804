//! Per-connection codec stacks constructed at negotiation time.
//!
//! Frame-level encode/decode is owned by the connection's I/O driver; the
//! types here fix the construction contract: which verifier is installed,
//! which sink and interconnect table the codec holds, and the domain it
//! advertises. Construction schedules the initial output (protocol header
//! or SASL mechanisms) through the sink; no other I/O happens here.

use crate::interconnects::Interconnects;
use ironbus_broker::{ConnectionCodec, NullSaslAuthenticator, OutputSink, SaslAuthenticator};
use std::sync::Arc;

/// Verifier installed into a security-framed codec.
///
/// Bound to exactly one codec for that codec's lifetime.
pub enum Verifier {
    /// Credential-checking verifier from the external factory.
    Real(Box<dyn SaslAuthenticator>),
    /// Always-succeeding verifier for brokers running without auth.
    Null(NullSaslAuthenticator),
}

impl Verifier {
    pub fn is_null(&self) -> bool {
        matches!(self, Verifier::Null(_))
    }

    pub fn authenticator(&mut self) -> &mut dyn SaslAuthenticator {
        match self {
            Verifier::Real(real) => real.as_mut(),
            Verifier::Null(null) => null,
        }
    }
}

/// Security-framed codec: runs the credential exchange through its
/// verifier before normal traffic flows.
pub struct SaslCodec {
    out: Arc<dyn OutputSink>,
    id: String,
    verifier: Verifier,
    interconnects: Arc<Interconnects>,
    domain: String,
}

impl SaslCodec {
    pub(crate) fn new(
        out: Arc<dyn OutputSink>,
        id: String,
        verifier: Verifier,
        interconnects: Arc<Interconnects>,
        domain: String,
    ) -> Self {
        // The mechanisms frame is pending as soon as the stack exists
        out.activate_output();
        Self {
            out,
            id,
            verifier,
            interconnects,
            domain,
        }
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    pub fn verifier_mut(&mut self) -> &mut Verifier {
        &mut self.verifier
    }

    pub fn interconnects(&self) -> &Arc<Interconnects> {
        &self.interconnects
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn output(&self) -> &Arc<dyn OutputSink> {
        &self.out
    }
}

/// Plain codec for connections negotiated without a security layer.
pub struct AmqpConnection {
    out: Arc<dyn OutputSink>,
    id: String,
    interconnects: Arc<Interconnects>,
    domain: String,
    sasl_in_use: bool,
}

impl AmqpConnection {
    pub(crate) fn new(
        out: Arc<dyn OutputSink>,
        id: String,
        interconnects: Arc<Interconnects>,
        domain: String,
    ) -> Self {
        // The server-side protocol header is pending
        out.activate_output();
        Self {
            out,
            id,
            interconnects,
            domain,
            sasl_in_use: false,
        }
    }

    pub fn interconnects(&self) -> &Arc<Interconnects> {
        &self.interconnects
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn sasl_in_use(&self) -> bool {
        self.sasl_in_use
    }

    pub fn output(&self) -> &Arc<dyn OutputSink> {
        &self.out
    }
}

/// The closed set of codec stacks this plugin constructs.
pub enum AmqpCodec {
    SecurityFramed(SaslCodec),
    Plain(AmqpConnection),
}

impl ConnectionCodec for AmqpCodec {
    fn identifier(&self) -> &str {
        match self {
            AmqpCodec::SecurityFramed(codec) => &codec.id,
            AmqpCodec::Plain(codec) => &codec.id,
        }
    }

    fn secured(&self) -> bool {
        matches!(self, AmqpCodec::SecurityFramed(_))
    }
}
