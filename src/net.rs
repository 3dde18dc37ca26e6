//! Trusted IP range checks for webhook origins.
//!
//! Providers publish the CIDR blocks their webhook calls originate from;
//! a request from outside every block is rejected before its payload is
//! even parsed.

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// A single CIDR block, e.g. `192.30.252.0/22`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustedRange {
    net: IpAddr,
    prefix: u8,
}

impl TrustedRange {
    /// Builds an IPv4 range from octets and a prefix length.
    /// Intended for the per-provider static tables; a prefix over 32
    /// fails here (at compile time for a static table) rather than
    /// panicking later inside `contains`.
    pub const fn v4(a: u8, b: u8, c: u8, d: u8, prefix: u8) -> Self {
        assert!(prefix <= 32);
        Self {
            net: IpAddr::V4(Ipv4Addr::new(a, b, c, d)),
            prefix,
        }
    }

    /// Returns true if `ip` falls within this range.
    /// An IPv4 range never contains an IPv6 address and vice versa.
    pub fn contains(&self, ip: IpAddr) -> bool {
        match (self.net, ip) {
            (IpAddr::V4(net), IpAddr::V4(ip)) => {
                let mask = if self.prefix == 0 {
                    0
                } else {
                    u32::MAX << (32 - u32::from(self.prefix))
                };
                u32::from(net) & mask == u32::from(ip) & mask
            }
            (IpAddr::V6(net), IpAddr::V6(ip)) => {
                let mask = if self.prefix == 0 {
                    0
                } else {
                    u128::MAX << (128 - u32::from(self.prefix))
                };
                u128::from(net) & mask == u128::from(ip) & mask
            }
            _ => false,
        }
    }
}

impl FromStr for TrustedRange {
    type Err = String;

    /// Parses `address/prefix` notation, e.g. `104.192.143.0/24` or
    /// `2401:1d80:3200::/41`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = s
            .split_once('/')
            .ok_or_else(|| format!("'{}' is not in address/prefix notation", s))?;
        let net: IpAddr = addr
            .parse()
            .map_err(|e| format!("bad network address '{}': {}", addr, e))?;
        let prefix: u8 = prefix
            .parse()
            .map_err(|e| format!("bad prefix length '{}': {}", prefix, e))?;
        let max = match net {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        if prefix > max {
            return Err(format!("prefix length {} exceeds /{}", prefix, max));
        }
        Ok(Self { net, prefix })
    }
}

/// Returns true iff `ip` belongs to at least one of `ranges`.
///
/// Callers that have no published ranges skip this check entirely rather
/// than passing an empty slice; an empty slice here means nothing matches.
pub fn is_trusted(ip: IpAddr, ranges: &[TrustedRange]) -> bool {
    ranges.iter().any(|range| range.contains(ip))
}
