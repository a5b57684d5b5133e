use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::ScanError;
use crate::network::interface::LocalNetworkInfo;

pub const FIRST_HOST_OCTET: u8 = 1;
pub const LAST_HOST_OCTET: u8 = 254;

/// Ordered list of IPv4 targets for one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressRange {
    addrs: Vec<Ipv4Addr>,
}

impl AddressRange {
    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ipv4Addr> {
        self.addrs.iter()
    }

    pub fn first(&self) -> Option<Ipv4Addr> {
        self.addrs.first().copied()
    }

    pub fn last(&self) -> Option<Ipv4Addr> {
        self.addrs.last().copied()
    }
}

impl FromIterator<Ipv4Addr> for AddressRange {
    fn from_iter<I: IntoIterator<Item = Ipv4Addr>>(iter: I) -> Self {
        Self {
            addrs: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AddressRange {
    type Item = Ipv4Addr;
    type IntoIter = std::vec::IntoIter<Ipv4Addr>;

    fn into_iter(self) -> Self::IntoIter {
        self.addrs.into_iter()
    }
}

impl<'a> IntoIterator for &'a AddressRange {
    type Item = &'a Ipv4Addr;
    type IntoIter = std::slice::Iter<'a, Ipv4Addr>;

    fn into_iter(self) -> Self::IntoIter {
        self.addrs.iter()
    }
}

/// Builds the target list for `local`.
///
/// Without a `prefix` the sweep keeps the first three octets of the local
/// address and walks the host octet from 1 to 254. The interface mask is
/// ignored in that mode. With a `prefix`, every usable host of the enclosing
/// network is returned instead.
pub fn derive_range(
    local: &LocalNetworkInfo,
    prefix: Option<u8>,
) -> Result<AddressRange, ScanError> {
    match prefix {
        None => Ok(host_octet_range(local.address)),
        Some(prefix) => cidr_range(local.address, prefix),
    }
}

pub fn host_octet_range(addr: Ipv4Addr) -> AddressRange {
    let [a, b, c, _] = addr.octets();
    (FIRST_HOST_OCTET..=LAST_HOST_OCTET)
        .map(|d| Ipv4Addr::new(a, b, c, d))
        .collect()
}

/// Usable hosts of the `/prefix` network containing `addr`, network and
/// broadcast addresses excluded.
pub fn cidr_range(addr: Ipv4Addr, prefix: u8) -> Result<AddressRange, ScanError> {
    let network = Ipv4Network::new(addr, prefix)
        .map_err(|e| ScanError::InvalidConfig(e.to_string()))?;
    let start: u32 = u32::from(network.network()).saturating_add(1);
    let end: u32 = u32::from(network.broadcast()).saturating_sub(1);

    Ok((start..=end).map(Ipv4Addr::from).collect())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
