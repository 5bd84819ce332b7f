//! Target URL validation and SSRF protection.
//!
//! Every URL submitted for analysis, and every redirect hop, passes through
//! here before any network access. When private hosts are not allowed the
//! client also resolves names through [`SafeResolver`], so hostnames that
//! point at internal addresses are refused too.

mod safe_resolver;
mod url_validation;

pub use safe_resolver::{refused_host, SafeResolver};
pub use url_validation::{is_internal_host, validate_target_url};
