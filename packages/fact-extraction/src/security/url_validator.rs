//! URL validation for SSRF protection.

use std::collections::HashSet;
use std::net::IpAddr;

use ipnet::IpNet;
use url::{Host, Url};

use crate::error::{SecurityError, SecurityResult};

/// Ranges that must never be reached from a user-supplied URL.
const BLOCKED_CIDRS: &[&str] = &[
    "0.0.0.0/8",
    "10.0.0.0/8",
    "127.0.0.0/8",
    "169.254.0.0/16", // Link-local / cloud metadata
    "172.16.0.0/12",
    "192.168.0.0/16",
    "224.0.0.0/4", // Multicast
    "255.255.255.255/32",
    "::/128",
    "::1/128",   // IPv6 loopback
    "fc00::/7",  // IPv6 private
    "fe80::/10", // IPv6 link-local
    "ff00::/8",  // IPv6 multicast
];

/// Administrative ports: ssh, telnet, smtp, rdp, postgres, mysql, mongodb, redis.
const BLOCKED_PORTS: &[u16] = &[22, 23, 25, 3389, 5432, 3306, 27017, 6379];

/// URL validator for SSRF protection.
///
/// Validates URLs before fetching to prevent:
/// - Access to internal services (localhost, 127.0.0.1)
/// - Access to private IP ranges (10.x, 172.16.x, 192.168.x)
/// - Access to cloud metadata services (169.254.x)
/// - Access to administrative ports (ssh, databases)
/// - Non-HTTP(S) schemes (file://, ftp://)
#[derive(Debug, Clone)]
pub struct UrlValidator {
    allowed_schemes: HashSet<String>,
    blocked_hosts: HashSet<String>,
    blocked_cidrs: Vec<IpNet>,
    blocked_ports: HashSet<u16>,
    /// Hosts that bypass every other check
    allowed_hosts: HashSet<String>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlValidator {
    /// Create a new URL validator with default security rules.
    pub fn new() -> Self {
        Self {
            allowed_schemes: ["http", "https"].into_iter().map(String::from).collect(),
            blocked_hosts: [
                "localhost",
                "localhost.localdomain",
                "ip6-localhost",
                "ip6-loopback",
                "metadata.google.internal",
                "instance-data",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            blocked_cidrs: BLOCKED_CIDRS
                .iter()
                .filter_map(|cidr| cidr.parse().ok())
                .collect(),
            blocked_ports: BLOCKED_PORTS.iter().copied().collect(),
            allowed_hosts: HashSet::new(),
        }
    }

    /// Add an allowed host (bypasses validation).
    pub fn allow_host(mut self, host: impl Into<String>) -> Self {
        self.allowed_hosts.insert(host.into().to_ascii_lowercase());
        self
    }

    /// Block an additional host.
    pub fn block_host(mut self, host: impl Into<String>) -> Self {
        self.blocked_hosts.insert(host.into().to_ascii_lowercase());
        self
    }

    /// Block an additional CIDR range.
    pub fn block_cidr(mut self, cidr: IpNet) -> Self {
        self.blocked_cidrs.push(cidr);
        self
    }

    /// Block an additional port.
    pub fn block_port(mut self, port: u16) -> Self {
        self.blocked_ports.insert(port);
        self
    }

    /// Validate a URL string for safety.
    pub fn validate(&self, url: &str) -> SecurityResult<Url> {
        let parsed = Url::parse(url)?;
        self.validate_url(&parsed)?;
        Ok(parsed)
    }

    /// Validate an already parsed URL. No network access.
    pub fn validate_url(&self, url: &Url) -> SecurityResult<()> {
        if !self.allowed_schemes.contains(url.scheme()) {
            return Err(SecurityError::DisallowedScheme(url.scheme().to_string()));
        }

        if self.is_allowed(url) {
            return Ok(());
        }

        match url.host().ok_or(SecurityError::NoHost)? {
            Host::Domain(domain) => {
                let domain = domain.trim_end_matches('.').to_ascii_lowercase();
                if self.blocked_hosts.contains(&domain) || domain.ends_with(".localhost") {
                    return Err(SecurityError::BlockedHost(domain));
                }
            }
            Host::Ipv4(ip) => self.check_ip(IpAddr::V4(ip))?,
            Host::Ipv6(ip) => self.check_ip(IpAddr::V6(ip))?,
        }

        if let Some(port) = url.port_or_known_default() {
            if self.blocked_ports.contains(&port) {
                return Err(SecurityError::BlockedPort(port));
            }
        }

        Ok(())
    }

    /// Validate a URL and resolve DNS to check the actual IPs.
    ///
    /// This catches DNS rebinding where a public-looking hostname resolves
    /// to an internal address.
    pub async fn validate_with_dns(&self, url: &Url) -> SecurityResult<()> {
        self.validate_url(url)?;
        if self.is_allowed(url) {
            return Ok(());
        }

        let Some(Host::Domain(host)) = url.host() else {
            // Literal IPs were already checked
            return Ok(());
        };
        let port = url.port_or_known_default().unwrap_or(80);

        let addrs = tokio::net::lookup_host((host, port))
            .await
            .map_err(|e| SecurityError::DnsResolution(e.to_string()))?;

        for addr in addrs {
            self.check_ip(addr.ip()).map_err(|_| {
                SecurityError::BlockedCidr(format!(
                    "DNS for {} resolved to blocked IP {}",
                    host,
                    addr.ip()
                ))
            })?;
        }

        Ok(())
    }

    fn is_allowed(&self, url: &Url) -> bool {
        url.host_str()
            .is_some_and(|host| self.allowed_hosts.contains(&host.to_ascii_lowercase()))
    }

    fn check_ip(&self, ip: IpAddr) -> SecurityResult<()> {
        // Treat IPv4-mapped IPv6 (::ffff:10.0.0.1) as its IPv4 form
        let ip = match ip {
            IpAddr::V6(v6) => v6
                .to_ipv4_mapped()
                .map(IpAddr::V4)
                .unwrap_or(IpAddr::V6(v6)),
            v4 => v4,
        };

        if self.blocked_cidrs.iter().any(|cidr| cidr.contains(&ip)) {
            return Err(SecurityError::BlockedCidr(ip.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_localhost() {
        let validator = UrlValidator::new();
        assert!(validator.validate("http://localhost/").is_err());
        assert!(validator.validate("http://LOCALHOST:8080/").is_err());
        assert!(validator.validate("http://api.localhost/").is_err());
        assert!(validator.validate("http://127.0.0.1/").is_err());
        assert!(validator.validate("http://[::1]/").is_err());
    }

    #[test]
    fn test_blocks_private_ips() {
        let validator = UrlValidator::new();
        assert!(validator.validate("http://10.0.0.1/").is_err());
        assert!(validator.validate("http://172.16.0.1/").is_err());
        assert!(validator.validate("http://172.31.255.255/").is_err());
        assert!(validator.validate("http://192.168.1.1/").is_err());
        assert!(validator.validate("http://0.0.0.0/").is_err());
        assert!(validator.validate("http://[::ffff:10.0.0.1]/").is_err());
    }

    #[test]
    fn test_blocks_multicast_and_broadcast() {
        let validator = UrlValidator::new();
        assert!(validator.validate("http://224.0.0.1/").is_err());
        assert!(validator.validate("http://239.255.255.250/").is_err());
        assert!(validator.validate("http://255.255.255.255/").is_err());
    }

    #[test]
    fn test_blocks_metadata_services() {
        let validator = UrlValidator::new();
        assert!(matches!(
            validator.validate("http://169.254.169.254/"),
            Err(SecurityError::BlockedCidr(_))
        ));
        assert!(validator.validate("http://metadata.google.internal/").is_err());
    }

    #[test]
    fn test_blocks_admin_ports() {
        let validator = UrlValidator::new();
        for port in [22, 23, 25, 3389, 5432, 3306, 27017, 6379] {
            let url = format!("http://example.com:{}/", port);
            assert!(
                matches!(validator.validate(&url), Err(SecurityError::BlockedPort(p)) if p == port),
                "port {} should be blocked",
                port
            );
        }
        assert!(validator.validate("https://example.com:8443/").is_ok());
    }

    #[test]
    fn test_blocks_non_http() {
        let validator = UrlValidator::new();
        assert!(matches!(
            validator.validate("file:///etc/passwd"),
            Err(SecurityError::DisallowedScheme(_))
        ));
        assert!(validator.validate("ftp://example.com/").is_err());
        assert!(validator.validate("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_allows_public_urls() {
        let validator = UrlValidator::new();
        assert!(validator.validate("https://example.com/").is_ok());
        assert!(validator.validate("http://example.co.jp/ir/").is_ok());
        assert!(validator.validate("https://8.8.8.8/").is_ok());
        assert!(validator.validate("https://172.32.0.1/").is_ok());
    }

    #[test]
    fn test_custom_rules() {
        let validator = UrlValidator::new()
            .block_host("intranet.example.com")
            .block_port(8080);
        assert!(validator.validate("https://intranet.example.com/").is_err());
        assert!(validator.validate("http://example.com:8080/").is_err());
    }

    #[tokio::test]
    async fn test_allowed_host_bypasses_checks() {
        let validator = UrlValidator::new().allow_host("127.0.0.1");
        let url = validator.validate("http://127.0.0.1:8080/").unwrap();
        assert!(validator.validate_with_dns(&url).await.is_ok());

        // Only the named host is let through
        assert!(validator.validate("http://127.0.0.2/").is_err());
        assert!(validator.validate("ftp://127.0.0.1/").is_err());
    }
}
