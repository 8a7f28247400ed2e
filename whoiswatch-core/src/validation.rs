//! Domain and WHOIS server name validation

use crate::error::{CheckError, Result};

/// Normalize and validate a domain name
///
/// This function:
/// - Removes http:// and https:// prefixes
/// - Removes www. prefix
/// - Removes trailing slashes and paths
/// - Converts to lowercase
/// - Validates format (must contain dots, only alphanumeric/hyphens/dots)
pub fn normalize_domain(domain: &str) -> Result<String> {
    let domain = domain.trim().to_lowercase();

    let domain = domain
        .strip_prefix("http://")
        .or_else(|| domain.strip_prefix("https://"))
        .unwrap_or(&domain);

    let domain = domain.split('/').next().unwrap_or(domain);
    let domain = domain.strip_prefix("www.").unwrap_or(domain);

    if domain.is_empty() || !domain.contains('.') {
        return Err(CheckError::InvalidDomain(domain.to_string()));
    }

    check_hostname(domain).map_err(|_| CheckError::InvalidDomain(domain.to_string()))?;

    Ok(domain.to_string())
}

/// Validate an explicitly requested WHOIS server hostname.
///
/// Unlike [`normalize_domain`] the `www.` prefix is kept and a trailing
/// `:port` is rejected; the client always talks to port 43.
pub fn validate_server(server: &str) -> Result<String> {
    let server = server.trim().to_lowercase();

    if server.is_empty() {
        return Err(CheckError::Config("WHOIS server name is empty".to_string()));
    }

    check_hostname(&server)
        .map_err(|reason| CheckError::Config(format!("invalid WHOIS server {:?}: {}", server, reason)))?;

    Ok(server)
}

fn check_hostname(name: &str) -> std::result::Result<(), &'static str> {
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if !valid {
        return Err("unexpected character");
    }

    if name.contains("..") || name.starts_with('.') || name.ends_with('.') {
        return Err("empty label");
    }

    for label in name.split('.') {
        if label.is_empty() || label.starts_with('-') || label.ends_with('-') {
            return Err("label starts or ends with a hyphen");
        }
    }

    Ok(())
}
