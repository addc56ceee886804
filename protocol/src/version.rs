//! Version matching for the AMQP 1.0 plugin.

use ironbus_types::ProtocolVersion;

/// Major version this plugin implements.
pub const SUPPORTED_MAJOR: u8 = 1;
/// Minor version this plugin implements.
pub const SUPPORTED_MINOR: u8 = 0;

/// Exact major/minor match. The framing flag is not part of the match;
/// it only selects the security stack once the version has matched.
///
/// Unknown or future versions simply fail the predicate, so another
/// registered protocol gets a chance at the connection.
pub fn version_matches(version: &ProtocolVersion) -> bool {
    version.major == SUPPORTED_MAJOR && version.minor == SUPPORTED_MINOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_1_0_matches() {
        assert!(version_matches(&ProtocolVersion::new(1, 0)));
        assert!(version_matches(&ProtocolVersion::with_sasl(1, 0)));

        assert!(!version_matches(&ProtocolVersion::new(0, 10)));
        assert!(!version_matches(&ProtocolVersion::new(1, 1)));
        assert!(!version_matches(&ProtocolVersion::new(2, 0)));
        assert!(!version_matches(&ProtocolVersion::with_sasl(0, 9)));
    }
}
