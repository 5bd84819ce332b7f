//! SSRF-safe DNS resolver for reqwest.
//!
//! Implements `reqwest::dns::Resolve` by delegating to the system resolver and
//! then dropping every address that is not public. A host that resolves only
//! to internal addresses fails *before* reqwest opens a socket, so hostnames
//! pointing at loopback or RFC 1918 space (and redirects to them) are refused
//! the same way IP literals are.

use std::error::Error as StdError;
use std::io;
use std::net::{IpAddr, SocketAddr};

use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use thiserror::Error;

use super::url_validation::{is_private_ipv4, is_private_ipv6};

type BoxError = Box<dyn StdError + Send + Sync>;

/// Every address a host resolved to is internal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("all resolved addresses for '{host}' are private or reserved")]
pub struct PrivateAddressRefused {
    /// Host name that was looked up
    pub host: String,
}

/// A DNS resolver that rejects private/loopback/link-local addresses.
///
/// Installed on the client only when private hosts are not allowed.
#[derive(Debug, Clone, Default)]
pub struct SafeResolver;

impl Resolve for SafeResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            let host = name.as_str().to_string();
            let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0))
                .await
                .map_err(|e| -> BoxError { Box::new(e) })?
                .collect();

            let public: Vec<SocketAddr> = addrs
                .into_iter()
                .filter(|addr| is_public_ip(addr.ip()))
                .collect();

            if public.is_empty() {
                log::debug!("Refusing internal host '{}'", host);
                return Err(Box::new(PrivateAddressRefused { host }) as BoxError);
            }

            let addrs: Addrs = Box::new(public.into_iter());
            Ok(addrs)
        })
    }
}

fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => !is_private_ipv4(v4),
        IpAddr::V6(v6) => !is_private_ipv6(v6),
    }
}

/// Finds a resolver refusal anywhere in an error's source chain.
///
/// reqwest wraps resolver errors in its own connect errors; this digs the
/// refusal back out so it can be reported as an invalid URL.
pub fn refused_host<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a PrivateAddressRefused> {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(refused) = err.downcast_ref::<PrivateAddressRefused>() {
            return Some(refused);
        }
        if let Some(refused) = err
            .downcast_ref::<io::Error>()
            .and_then(|io_err| io_err.get_ref())
            .and_then(|inner| inner.downcast_ref::<PrivateAddressRefused>())
        {
            return Some(refused);
        }
        current = err.source();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_public_ips() {
        assert!(is_public_ip(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))));
        assert!(is_public_ip(IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34))));
        assert!(is_public_ip(IpAddr::V6("2606:4700::1111".parse().unwrap())));
    }

    #[test]
    fn test_private_ips() {
        assert!(!is_public_ip(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert!(!is_public_ip(IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3))));
        assert!(!is_public_ip(IpAddr::V4(Ipv4Addr::new(192, 168, 0, 10))));
        assert!(!is_public_ip(IpAddr::V6(Ipv6Addr::LOCALHOST)));
        assert!(!is_public_ip(IpAddr::V6("::ffff:127.0.0.1".parse().unwrap())));
    }

    #[tokio::test]
    async fn test_loopback_name_is_refused() {
        let name: Name = "localhost".parse().unwrap();
        let err = SafeResolver.resolve(name).await.err().unwrap();
        let refused = err.downcast_ref::<PrivateAddressRefused>().unwrap();
        assert_eq!(refused.host, "localhost");
    }

    #[tokio::test]
    async fn test_public_literal_passes_through() {
        let name: Name = "93.184.216.34".parse().unwrap();
        let addrs: Vec<SocketAddr> = SafeResolver.resolve(name).await.ok().unwrap().collect();
        assert_eq!(addrs.len(), 1);
        assert_eq!(addrs[0].ip(), IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)));
    }

    #[test]
    fn test_refused_host_walks_source_chain() {
        let refusal = PrivateAddressRefused {
            host: "intranet.example".into(),
        };
        let wrapped = io::Error::new(io::ErrorKind::PermissionDenied, refusal.clone());
        assert_eq!(refused_host(&wrapped), Some(&refusal));
        assert_eq!(refused_host(&refusal), Some(&refusal));

        let unrelated = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(refused_host(&unrelated), None);
    }
}
