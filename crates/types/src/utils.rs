//! Utility functions and helpers

/// Check that a URL is absolute, uses http or https and names a host
pub fn is_http_url(url: &str) -> bool {
    url_host(url).is_some_and(|host| !host.chars().any(char::is_whitespace))
}

/// Host part of an http(s) URL, without port
pub fn url_host(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = match authority.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    };
    (!host.is_empty()).then_some(host)
}

/// Whether a URL points at the local machine
pub fn is_local_url(url: &str) -> bool {
    matches!(url_host(url), Some("localhost" | "127.0.0.1" | "[::1]"))
}

/// Validate an IANA timezone name (`UTC`, `Europe/Berlin`, `America/Argentina/Salta`)
pub fn is_valid_timezone_name(name: &str) -> bool {
    if matches!(name, "UTC" | "GMT") {
        return true;
    }

    let parts: Vec<&str> = name.split('/').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return false;
    }

    parts.iter().all(|part| {
        part.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+'))
    })
}

/// Check that a user agent carries a reachable contact address, e.g.
/// `CompanionX/1.0 (ops@example.org)`
pub fn contains_contact_email(user_agent: &str) -> bool {
    user_agent
        .split(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>' | ',' | ';'))
        .any(is_email)
}

fn is_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((name, tld)) => {
            !name.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// Validate a video-calling application id or certificate (32 hex characters)
pub fn is_hex_app_id(value: &str) -> bool {
    value.len() == 32 && value.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_url_validation() {
        assert!(is_http_url("https://companionx.org"));
        assert!(is_http_url("http://localhost/companion/consultants_near_me"));
        assert!(!is_http_url("ftp://companionx.org"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("http://:8080"));
        assert!(!is_http_url("https://:443/companion"));
        assert!(is_http_url("http://localhost:8080/companion"));
        assert!(!is_http_url("companionx.org"));
    }

    #[test]
    fn test_local_url() {
        assert!(is_local_url("http://localhost/companion"));
        assert!(is_local_url("http://127.0.0.1:8080"));
        assert!(!is_local_url("https://companionx.org"));
        assert_eq!(url_host("https://companionx.org:8443/x"), Some("companionx.org"));
    }

    #[test]
    fn test_timezone_validation() {
        assert!(is_valid_timezone_name("UTC"));
        assert!(is_valid_timezone_name("Asia/Dhaka"));
        assert!(is_valid_timezone_name("America/Argentina/Salta"));
        assert!(is_valid_timezone_name("Etc/GMT+6"));
        assert!(!is_valid_timezone_name("utc"));
        assert!(!is_valid_timezone_name("Mars/Olympus Mons"));
        assert!(!is_valid_timezone_name(""));
    }

    #[test]
    fn test_contact_email() {
        assert!(contains_contact_email("CompanionX/1.0 (ops@companionx.org)"));
        assert!(contains_contact_email("CompanionX/1.0 <ops@companionx.org>"));
        assert!(!contains_contact_email("CompanionX/1.0"));
        assert!(!contains_contact_email("CompanionX/1.0 (ops@localhost)"));
    }

    #[test]
    fn test_hex_app_id() {
        assert!(is_hex_app_id("f713b3dd3d814d968da39ac2748b8eea"));
        assert!(!is_hex_app_id("your_agora_app_id"));
        assert!(!is_hex_app_id("f713b3dd3d814d968da39ac2748b8ee"));
    }
}
