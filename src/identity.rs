use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use std::convert::Infallible;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

pub const UNKNOWN_CLIENT: &str = "unknown";

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Rate-limit identity of the caller.
///
/// `X-Forwarded-For` is only trusted when the transport peer is loopback,
/// i.e. the request came through a local reverse proxy. An empty or
/// unreadable first forwarded entry falls back to the peer address.
pub fn client_key(peer: Option<IpAddr>, headers: &HeaderMap) -> String {
    let Some(peer) = peer else {
        return UNKNOWN_CLIENT.to_string();
    };

    if is_trusted_proxy(&peer) {
        if let Some(forwarded) = first_forwarded(headers) {
            return forwarded;
        }
    }

    peer.to_string()
}

fn is_trusted_proxy(ip: &IpAddr) -> bool {
    *ip == IpAddr::V4(Ipv4Addr::LOCALHOST) || *ip == IpAddr::V6(Ipv6Addr::LOCALHOST)
}

fn first_forwarded(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(FORWARDED_FOR)?.to_str().ok()?;
    let first = value.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

// Extractor for handlers; the peer comes from `ConnectInfo` when the server was
// started with `into_make_service_with_connect_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

impl<S> FromRequestParts<S> for ClientKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(ClientKey(client_key(peer, &parts.headers)))
    }
}

const USER_ID_HEADER: &str = "x-user-id";
const USER_TIER_HEADER: &str = "x-user-tier";
const PREMIUM_TIER: &str = "premium";

/// Authenticated caller, as asserted by the upstream auth layer through
/// the `X-User-Id` and `X-User-Tier` headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
    pub premium: bool,
}

impl Caller {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let user_id = headers
            .get(USER_ID_HEADER)?
            .to_str()
            .ok()?
            .trim()
            .parse::<i64>()
            .ok()?;
        let premium = headers
            .get(USER_TIER_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|tier| tier.trim().eq_ignore_ascii_case(PREMIUM_TIER));

        Some(Caller { user_id, premium })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn forwarded(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn loopback_peer_trusts_first_forwarded_entry() {
        let headers = forwarded("203.0.113.5, 10.0.0.1");
        let peer = Some("127.0.0.1".parse().unwrap());
        assert_eq!(client_key(peer, &headers), "203.0.113.5");

        let peer = Some("::1".parse().unwrap());
        assert_eq!(client_key(peer, &headers), "203.0.113.5");
    }

    #[test]
    fn public_peer_ignores_forwarded_header() {
        let headers = forwarded("203.0.113.5, 10.0.0.1");
        let peer = Some("203.0.113.9".parse().unwrap());
        assert_eq!(client_key(peer, &headers), "203.0.113.9");
    }

    #[test]
    fn loopback_without_header_uses_peer() {
        let peer = Some("127.0.0.1".parse().unwrap());
        assert_eq!(client_key(peer, &HeaderMap::new()), "127.0.0.1");
    }

    #[test]
    fn empty_forwarded_entry_falls_back_to_peer() {
        let peer = Some("127.0.0.1".parse().unwrap());
        assert_eq!(client_key(peer, &forwarded(" , 10.0.0.1")), "127.0.0.1");
        assert_eq!(client_key(peer, &forwarded("")), "127.0.0.1");
    }

    #[test]
    fn caller_reads_user_id_and_tier() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("42"));
        assert_eq!(
            Caller::from_headers(&headers),
            Some(Caller { user_id: 42, premium: false })
        );

        headers.insert(USER_TIER_HEADER, HeaderValue::from_static("Premium"));
        assert_eq!(
            Caller::from_headers(&headers),
            Some(Caller { user_id: 42, premium: true })
        );

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("not-a-number"));
        assert_eq!(Caller::from_headers(&headers), None);
    }

    #[test]
    fn missing_peer_is_unknown() {
        let headers = forwarded("203.0.113.5");
        assert_eq!(client_key(None, &headers), UNKNOWN_CLIENT);
    }
}
