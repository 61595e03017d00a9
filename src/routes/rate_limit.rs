use axum::http::Request;
use std::net::IpAddr;
use tower_governor::{key_extractor::KeyExtractor, GovernorError};

/// Keys the login rate limiter by client IP.
///
/// The console usually sits behind a reverse proxy, so the forwarding
/// headers are consulted before the peer address. When nothing identifies
/// the client, every request lands in one shared localhost bucket; the
/// limiter throttles login attempts collectively instead of failing open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackIpKeyExtractor;

impl KeyExtractor for FallbackIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        // First hop of the proxy chain is the client
        if let Some(xff) = req.headers().get("x-forwarded-for")
            && let Ok(xff_str) = xff.to_str()
            && let Some(first_ip) = xff_str.split(',').next()
            && let Ok(ip) = first_ip.trim().parse::<IpAddr>()
        {
            return Ok(ip);
        }

        if let Some(real_ip) = req.headers().get("x-real-ip")
            && let Ok(ip_str) = real_ip.to_str()
            && let Ok(ip) = ip_str.parse::<IpAddr>()
        {
            return Ok(ip);
        }

        if let Some(connect_info) = req
            .extensions()
            .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        {
            return Ok(connect_info.0.ip());
        }

        Ok(IpAddr::V4(std::net::Ipv4Addr::LOCALHOST))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_headers(headers: &[(&str, &str)]) -> Request<()> {
        let mut builder = Request::builder();
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn forwarded_for_takes_the_first_hop() {
        let req = request_with_headers(&[("x-forwarded-for", "10.1.2.3, 192.168.0.1")]);
        assert_eq!(
            FallbackIpKeyExtractor.extract(&req).unwrap(),
            "10.1.2.3".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn real_ip_is_the_fallback_for_an_unparseable_chain() {
        let req = request_with_headers(&[
            ("x-forwarded-for", "not-an-ip"),
            ("x-real-ip", "10.9.8.7"),
        ]);
        assert_eq!(
            FallbackIpKeyExtractor.extract(&req).unwrap(),
            "10.9.8.7".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn unidentifiable_clients_share_one_bucket() {
        let req = request_with_headers(&[]);
        assert_eq!(
            FallbackIpKeyExtractor.extract(&req).unwrap(),
            IpAddr::V4(std::net::Ipv4Addr::LOCALHOST)
        );
    }
}
