//! Argument validators used as clap value parsers.

use regex::Regex;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::LazyLock;

/// One DNS label: 1-63 letters, digits, or hyphens, not starting or ending
/// with a hyphen.
static HOSTNAME_LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("Invalid hostname label regex")
});

/// Maximum length of a full domain name.
const MAX_HOSTNAME_LEN: usize = 255;

/// Accept an IPv4 or IPv6 address, returned as given.
pub fn parse_ip(arg: &str) -> Result<String, String> {
    arg.parse::<IpAddr>()
        .map(|_| arg.to_string())
        .map_err(|_| format!("invalid IP address: {}", arg))
}

/// Accept a domain name. One trailing dot is stripped.
pub fn parse_hostname(arg: &str) -> Result<String, String> {
    if arg.len() > MAX_HOSTNAME_LEN {
        return Err(format!(
            "domain name is longer than {} characters: {}",
            MAX_HOSTNAME_LEN, arg
        ));
    }

    let name = arg.strip_suffix('.').unwrap_or(arg);
    if !name.is_empty() && name.split('.').all(|label| HOSTNAME_LABEL_REGEX.is_match(label)) {
        Ok(name.to_string())
    } else {
        Err(format!("invalid domain name: {}", arg))
    }
}

/// Accept a path that exists, returned absolute.
pub fn parse_existing_dir(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if !path.is_dir() {
        return Err(format!("path {} does not exist or is not a directory", arg));
    }

    std::path::absolute(&path).map_err(|e| format!("cannot resolve path {}: {}", arg, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_valid_ips() {
        assert_eq!(parse_ip("10.0.0.5").unwrap(), "10.0.0.5");
        assert_eq!(parse_ip("::1").unwrap(), "::1");
        assert_eq!(parse_ip("2001:db8::7").unwrap(), "2001:db8::7");
    }

    #[test]
    fn test_invalid_ips() {
        for bad in ["", "10.0.0", "256.1.1.1", "example.com", "10.0.0.5:80"] {
            assert!(parse_ip(bad).is_err(), "{:?} should be rejected", bad);
        }
        assert_eq!(parse_ip("nope").unwrap_err(), "invalid IP address: nope");
    }

    #[test]
    fn test_valid_hostnames() {
        assert_eq!(parse_hostname("example.com").unwrap(), "example.com");
        assert_eq!(parse_hostname("shop.example.com.").unwrap(), "shop.example.com");
        assert_eq!(parse_hostname("Web-01").unwrap(), "Web-01");
        assert_eq!(parse_hostname("a").unwrap(), "a");
    }

    #[test]
    fn test_invalid_hostnames() {
        let too_long_label = format!("{}.com", "a".repeat(64));
        for bad in [
            "",
            ".",
            "-leading.com",
            "trailing-.com",
            "under_score.com",
            "double..dot",
            "space here.com",
            too_long_label.as_str(),
        ] {
            assert!(parse_hostname(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_hostname_length_limit() {
        let label = "a".repeat(63);
        let long = vec![label.as_str(); 5].join(".");
        assert!(long.len() > 255);

        let err = parse_hostname(&long).unwrap_err();
        assert!(err.contains("longer than 255"));
    }

    #[test]
    fn test_existing_dir_is_made_absolute() {
        let temp_dir = TempDir::new().unwrap();
        let parsed = parse_existing_dir(temp_dir.path().to_str().unwrap()).unwrap();
        assert!(parsed.is_absolute());
        assert_eq!(parsed, temp_dir.path());
    }

    #[test]
    fn test_missing_dir_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let err = parse_existing_dir(missing.to_str().unwrap()).unwrap_err();
        assert!(err.contains("does not exist"));
    }
}
