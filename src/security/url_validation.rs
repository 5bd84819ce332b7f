//! URL validation and SSRF protection.
//!
//! This module validates target URLs before any network access and blocks
//! requests to:
//! - Non-HTTP/HTTPS schemes (file://, ftp://, etc.)
//! - Localhost names and loopback addresses
//! - Private, link-local, unique-local, multicast and reserved addresses
//!
//! Private hosts can be allowed explicitly (local testing, intranet audits).

use std::net::{Ipv4Addr, Ipv6Addr};
use url::{Host, Url};

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::AnalysisError;

/// Validates a URL submitted for analysis.
///
/// The URL must be at most [`MAX_URL_LENGTH`] bytes, parse, use `http` or
/// `https`, and have a host. Unless `allow_private_hosts` is set, the host
/// must not be internal (see [`is_internal_host`]).
///
/// # Errors
///
/// Every failure is `AnalysisError::InvalidUrl`.
///
/// # Examples
///
/// ```
/// use seo_calculator::validate_target_url;
///
/// assert!(validate_target_url("https://example.com/pricing", false).is_ok());
/// assert!(validate_target_url("ftp://example.com", false).is_err());
/// assert!(validate_target_url("http://127.0.0.1:8080", false).is_err());
/// assert!(validate_target_url("http://127.0.0.1:8080", true).is_ok());
/// ```
pub fn validate_target_url(url_str: &str, allow_private_hosts: bool) -> Result<Url, AnalysisError> {
    let trimmed = url_str.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidUrl("URL is empty".to_string()));
    }
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(AnalysisError::InvalidUrl(format!(
            "URL exceeds maximum length ({} > {})",
            trimmed.len(),
            MAX_URL_LENGTH
        )));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| AnalysisError::InvalidUrl(format!("Failed to parse URL '{trimmed}': {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AnalysisError::InvalidUrl(format!(
                "Unsupported URL scheme '{scheme}' (only http:// and https:// allowed)"
            )));
        }
    }

    if url.host().is_none() {
        return Err(AnalysisError::InvalidUrl(format!(
            "URL has no host component: {trimmed}"
        )));
    }

    if !allow_private_hosts && is_internal_host(&url) {
        return Err(AnalysisError::InvalidUrl(format!(
            "Refusing to fetch internal host '{}'",
            url.host_str().unwrap_or_default()
        )));
    }

    Ok(url)
}

/// Whether `url` points at localhost or a non-public address.
///
/// Also used on every redirect hop.
pub fn is_internal_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => is_localhost_domain(domain),
        Some(Host::Ipv4(ip)) => is_private_ipv4(ip),
        Some(Host::Ipv6(ip)) => is_private_ipv6(ip),
        None => false,
    }
}

/// Checks if an IPv4 address is private/internal.
///
/// Blocked ranges:
/// - 127.0.0.0/8 (loopback)
/// - 10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16 (RFC 1918)
/// - 169.254.0.0/16 (link-local)
/// - 0.0.0.0/8 (this network)
/// - 224.0.0.0/4 (multicast) and 240.0.0.0/4 (reserved)
pub(crate) fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    a == 127
        || a == 10
        || (a == 172 && (16..=31).contains(&b))
        || (a == 192 && b == 168)
        || (a == 169 && b == 254)
        || a == 0
        || a >= 224
}

/// Checks if an IPv6 address is private/internal.
///
/// Blocked ranges: `::1`, `::`, fc00::/7, fe80::/10, ff00::/8, and
/// IPv4-mapped addresses whose IPv4 part is private.
pub(crate) fn is_private_ipv6(ip: Ipv6Addr) -> bool {
    if ip.is_loopback() || ip.is_unspecified() {
        return true;
    }
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_private_ipv4(v4);
    }
    let first = ip.segments()[0];
    (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80 || (first & 0xff00) == 0xff00
}

/// Checks if a domain name is a localhost variant.
fn is_localhost_domain(domain: &str) -> bool {
    let domain = domain.to_ascii_lowercase();
    let domain = domain.trim_end_matches('.');
    domain == "localhost" || domain == "localhost.localdomain" || domain.ends_with(".localhost")
}
