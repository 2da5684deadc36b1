//! Blocked-site input normalization and validation.
//!
//! User input is cleaned up (scheme, `www.` prefix and path stripped,
//! lowercased) and then checked against a conservative domain pattern.
//! Invalid input is rejected here and never reaches the blocked list.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::ValidationError;

fn domain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9](?:\.[a-zA-Z]{2,})+$")
            .unwrap()
    })
}

/// Strip scheme, leading `www.` and any path, and lowercase.
///
/// `"https://www.Example.com/feed"` becomes `"example.com"`.
pub fn normalize_site(input: &str) -> String {
    let s = input.trim().to_lowercase();
    let s = s.strip_prefix("https://").or_else(|| s.strip_prefix("http://")).unwrap_or(&s);
    let s = s.strip_prefix("www.").unwrap_or(s);
    s.split('/').next().unwrap_or_default().to_string()
}

/// Validate a normalized domain against the blocked list.
///
/// Rejects malformed domains and duplicates of already-blocked sites.
pub fn validate_site(site: &str, blocked_sites: &[String]) -> Result<(), ValidationError> {
    if site.is_empty() || !domain_regex().is_match(site) {
        return Err(ValidationError::InvalidDomain(site.to_string()));
    }
    if blocked_sites.iter().any(|s| s == site) {
        return Err(ValidationError::DuplicateSite(site.to_string()));
    }
    Ok(())
}
