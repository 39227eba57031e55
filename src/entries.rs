//! Block entry generation.
//!
//! Turns the configured domain lists into literal hosts-file override lines
//! pointing at the loopback addresses.

use crate::config::Config;

/// IPv4 loopback address used for override lines.
const IPV4_LOOPBACK: &str = "127.0.0.1";

/// IPv6 loopback address used for override lines.
const IPV6_LOOPBACK: &str = "::1";

/// Generates the body of the managed section from `config`.
///
/// Every plain domain expands to entries for both the apex and its `www.`
/// variant; subdomains are taken verbatim and appended after all domains.
/// Input order is preserved and duplicates are not collapsed — a host listed
/// twice is blocked twice, which is harmless. Lines are joined by newline
/// with no trailing newline.
#[must_use]
pub fn generate(config: &Config) -> String {
    let mut entries = Vec::with_capacity(config.domains.len() * 2 + config.subdomains.len());
    for domain in &config.domains {
        entries.push(entry(domain));
        entries.push(entry(&format!("www.{domain}")));
    }
    for subdomain in &config.subdomains {
        entries.push(entry(subdomain));
    }
    entries.join("\n")
}

/// One override entry: a loopback line per address family.
fn entry(host: &str) -> String {
    format!("{IPV4_LOOPBACK}\t{host}\n{IPV6_LOOPBACK}\t{host}")
}
