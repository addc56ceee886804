//! Security-layer selection for inbound connections.

/// Which security stack an inbound connection gets, decided from broker
/// policy and the negotiated framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecuritySelection {
    /// Credential-checking verifier inside a security-framed codec.
    RealVerifier,
    /// Always-succeeding verifier inside the same codec shape, so the
    /// wire-level handshake still completes.
    NullVerifier,
    /// Authentication mandated but the connection negotiated no security
    /// framing; the attempt must be rejected.
    Reject,
    /// No framing and no mandate: plain codec.
    Plain,
}

/// Decision table over (authentication mandated, SASL framing negotiated).
pub fn select_security(auth_required: bool, sasl_framing: bool) -> SecuritySelection {
    match (auth_required, sasl_framing) {
        (true, true) => SecuritySelection::RealVerifier,
        (false, true) => SecuritySelection::NullVerifier,
        (true, false) => SecuritySelection::Reject,
        (false, false) => SecuritySelection::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_decision_table() {
        assert_eq!(select_security(true, true), SecuritySelection::RealVerifier);
        assert_eq!(select_security(false, true), SecuritySelection::NullVerifier);
        assert_eq!(select_security(true, false), SecuritySelection::Reject);
        assert_eq!(select_security(false, false), SecuritySelection::Plain);
    }
}
