use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use tracing::debug;

use crate::error::ScanError;

/// Length of the IPv4-mapped prefix (`::ffff:0:0/96`) inside an IPv6 network.
const V4_MAPPED_PREFIX_LEN: u8 = 96;

/// Address and subnet of the interface the sweep is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalNetworkInfo {
    pub address: Ipv4Addr,
    /// The interface network as reported by the OS, host bits included
    /// (displays as `192.168.1.42/24`).
    pub network: Ipv4Network,
}

impl LocalNetworkInfo {
    pub fn new(network: Ipv4Network) -> Self {
        Self {
            address: network.ip(),
            network,
        }
    }

    pub fn mask(&self) -> Ipv4Addr {
        self.network.mask()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }
}

/// Asks the OS for its interfaces and picks the local network to sweep.
pub fn local_network() -> Result<LocalNetworkInfo, ScanError> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    debug!("Identified {} network interface(s)", interfaces.len());
    select_local_network(&interfaces)
}

/// Returns the first non-loopback IPv4 address found while walking `interfaces`
/// and their addresses in enumeration order.
///
/// IPv6 entries only qualify when they are IPv4-mapped. Interface flags are not
/// consulted.
pub fn select_local_network(
    interfaces: &[NetworkInterface],
) -> Result<LocalNetworkInfo, ScanError> {
    let selected: Option<LocalNetworkInfo> = interfaces
        .iter()
        .flat_map(|intf| intf.ips.iter().map(move |net| (intf, net)))
        .find_map(|(intf, net)| {
            let v4: Ipv4Network = as_ipv4(net)?;
            if v4.ip().is_loopback() {
                return None;
            }
            debug!("Selected {} on {}", v4, intf.name);
            Some(LocalNetworkInfo::new(v4))
        });

    selected.ok_or(ScanError::NoSuitableInterface)
}

fn as_ipv4(net: &IpNetwork) -> Option<Ipv4Network> {
    match net {
        IpNetwork::V4(v4) => Some(*v4),
        IpNetwork::V6(v6) => {
            let mapped: Ipv4Addr = v6.ip().to_ipv4_mapped()?;
            let prefix: u8 = v6.prefix().saturating_sub(V4_MAPPED_PREFIX_LEN);
            Ipv4Network::new(mapped, prefix).ok()
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
