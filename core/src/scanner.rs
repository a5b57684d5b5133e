//! Fan-out of per-host probes over an [`AddressRange`].
//!
//! Every address becomes its own task. A semaphore caps how many of them talk
//! to the network at once, and the join set doubles as the completion barrier:
//! the scan returns only after each spawned task has been joined, whether it
//! found an open port, found nothing, or panicked.

use std::sync::Arc;
use std::time::Duration;

use sweepr_common::config::Config;
use sweepr_common::network::probe::ProbeResult;
use sweepr_common::network::range::AddressRange;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, trace};

use crate::network::tcp::{self, Connector};

/// Tally of one sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Tasks joined, faulted ones included.
    pub scanned: usize,
    pub reachable: usize,
    /// Tasks that panicked before producing a result.
    pub faulted: usize,
}

pub struct Scanner<C> {
    connector: Arc<C>,
    ports: Arc<[u16]>,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl<C> Scanner<C>
where
    C: Connector + 'static,
{
    pub fn new(connector: C, cfg: &Config) -> Self {
        Self::with_shared(Arc::new(connector), cfg)
    }

    pub fn with_shared(connector: Arc<C>, cfg: &Config) -> Self {
        Self {
            connector,
            ports: Arc::from(cfg.ports.as_slice()),
            timeout: cfg.timeout,
            permits: Arc::new(Semaphore::new(cfg.concurrency.max(1))),
        }
    }

    /// Probes every address in `targets` and hands each result to `on_result`
    /// as soon as its task is joined, in completion order.
    pub async fn scan<F>(&self, targets: AddressRange, mut on_result: F) -> ScanSummary
    where
        F: FnMut(&ProbeResult),
    {
        let mut tasks: JoinSet<ProbeResult> = JoinSet::new();

        for addr in targets {
            let connector: Arc<C> = Arc::clone(&self.connector);
            let ports: Arc<[u16]> = Arc::clone(&self.ports);
            let permits: Arc<Semaphore> = Arc::clone(&self.permits);
            let probe_timeout: Duration = self.timeout;

            tasks.spawn(async move {
                // The semaphore is never closed, so this only waits for a slot.
                let _permit = permits.acquire_owned().await.ok();
                tcp::scan_host(connector.as_ref(), addr, &ports, probe_timeout).await
            });
        }

        debug!("Launched {} probe task(s)", tasks.len());

        let mut summary = ScanSummary::default();
        while let Some(joined) = tasks.join_next().await {
            summary.scanned += 1;
            match joined {
                Ok(result) => {
                    if result.is_reachable() {
                        summary.reachable += 1;
                    } else {
                        trace!("{result}");
                    }
                    on_result(&result);
                }
                Err(e) => {
                    summary.faulted += 1;
                    error!("Probe task failed: {e}");
                }
            }
        }

        debug!(
            "Joined {} task(s), {} reachable, {} faulted",
            summary.scanned, summary.reachable, summary.faulted
        );
        summary
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
