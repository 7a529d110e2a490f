//! Client identity used as the rate limit key

use std::fmt;
use std::net::SocketAddr;

/// Sentinel key used when no identity is available.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Normalized client identity.
///
/// Resolution order: first hop of `X-Forwarded-For`, then `X-Real-IP`,
/// then the socket peer address, then [`UNKNOWN_CLIENT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    pub fn resolve(
        forwarded_for: Option<&str>,
        real_ip: Option<&str>,
        peer: Option<SocketAddr>,
    ) -> Self {
        let forwarded = forwarded_for
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(ip) = forwarded {
            return Self(ip.to_string());
        }

        if let Some(ip) = real_ip.map(str::trim).filter(|s| !s.is_empty()) {
            return Self(ip.to_string());
        }

        match peer {
            Some(addr) => Self(addr.ip().to_string()),
            None => Self::unknown(),
        }
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_CLIENT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_for_first_hop_wins() {
        let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();
        let key = ClientKey::resolve(Some(" 1.2.3.4 , 10.0.0.2"), Some("9.9.9.9"), Some(peer));
        assert_eq!(key.as_str(), "1.2.3.4");
    }

    #[test]
    fn test_falls_back_to_real_ip_then_peer() {
        let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();
        assert_eq!(
            ClientKey::resolve(Some(""), Some("9.9.9.9"), Some(peer)).as_str(),
            "9.9.9.9"
        );
        assert_eq!(ClientKey::resolve(None, None, Some(peer)).as_str(), "10.0.0.1");
    }

    #[test]
    fn test_unknown_sentinel() {
        assert_eq!(ClientKey::resolve(None, Some("  "), None).as_str(), UNKNOWN_CLIENT);
    }
}
