//! # Network Discovery Service
//!
//! Implements the local sweep use case: pick the local network, derive the
//! targets from it, then probe them all.

use sweepr_common::config::Config;
use sweepr_common::error::ScanError;
use sweepr_common::network::interface::{self, LocalNetworkInfo};
use sweepr_common::network::probe::ProbeResult;
use sweepr_common::network::range::{self, AddressRange};
use tracing::info;

use crate::network::tcp::Connector;
use crate::scanner::{ScanSummary, Scanner};

/// Where the local address and mask come from.
pub trait LocalNetworkSource: Send + Sync {
    fn local_network(&self) -> Result<LocalNetworkInfo, ScanError>;
}

/// Reads the interfaces of the running machine.
pub struct SystemNetworkSource;

impl LocalNetworkSource for SystemNetworkSource {
    fn local_network(&self) -> Result<LocalNetworkInfo, ScanError> {
        interface::local_network()
    }
}

/// Receives progress of a discovery run as it happens.
pub trait DiscoveryObserver: Send + Sync {
    fn local_network(&self, local: &LocalNetworkInfo);
    /// Called once per reachable host, from the join loop as each task completes.
    fn host_found(&self, result: &ProbeResult);
}

pub struct DiscoveryService<C> {
    source: Box<dyn LocalNetworkSource>,
    scanner: Scanner<C>,
    prefix: Option<u8>,
}

impl<C> DiscoveryService<C>
where
    C: Connector + 'static,
{
    pub fn new(
        source: Box<dyn LocalNetworkSource>,
        scanner: Scanner<C>,
        cfg: &Config,
    ) -> anyhow::Result<Self> {
        cfg.validate()?;
        Ok(Self {
            source,
            scanner,
            prefix: cfg.prefix,
        })
    }

    /// Runs one full sweep.
    ///
    /// Fails before any probe is sent when the source has no usable address.
    pub async fn perform_discovery(
        &self,
        observer: &dyn DiscoveryObserver,
    ) -> anyhow::Result<ScanSummary> {
        let local: LocalNetworkInfo = self.source.local_network()?;
        observer.local_network(&local);

        let targets: AddressRange = range::derive_range(&local, self.prefix)?;
        if let (Some(first), Some(last)) = (targets.first(), targets.last()) {
            info!("Searching for hosts from {first} to {last}");
        }

        let summary: ScanSummary = self
            .scanner
            .scan(targets, |result| {
                if result.is_reachable() {
                    observer.host_found(result);
                }
            })
            .await;

        Ok(summary)
    }
}
