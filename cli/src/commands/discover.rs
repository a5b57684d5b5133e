use std::io::Write;
use std::process::ExitCode;
use std::time::Instant;

use sweepr_common::config::Config;
use sweepr_common::error::ScanError;
use sweepr_core::discovery::{DiscoveryService, LocalNetworkSource, SystemNetworkSource};
use sweepr_core::network::tcp::{Connector, TcpConnector};
use sweepr_core::scanner::{ScanSummary, Scanner};
use tracing::info;

use crate::terminal::print::LineWriter;

pub async fn discover(cfg: &Config) -> anyhow::Result<ExitCode> {
    let scanner: Scanner<TcpConnector> = Scanner::new(TcpConnector, cfg);
    run(cfg, Box::new(SystemNetworkSource), scanner, &LineWriter::stdout()).await
}

/// Runs one sweep and writes its result lines to `lines`.
///
/// A missing local address is answered with the error line and
/// `ExitCode::FAILURE`; it is not returned as an error, since it has already
/// been reported.
pub async fn run<C, W>(
    cfg: &Config,
    source: Box<dyn LocalNetworkSource>,
    scanner: Scanner<C>,
    lines: &LineWriter<W>,
) -> anyhow::Result<ExitCode>
where
    C: Connector + 'static,
    W: Write + Send,
{
    let service = DiscoveryService::new(source, scanner, cfg)?;

    let start_time: Instant = Instant::now();
    let summary: ScanSummary = match service.perform_discovery(lines).await {
        Ok(summary) => summary,
        Err(e) => match e.downcast_ref::<ScanError>() {
            Some(err @ ScanError::NoSuitableInterface) => {
                lines.local_ip_error(err);
                return Ok(ExitCode::FAILURE);
            }
            _ => return Err(e),
        },
    };

    lines.scan_complete();
    info!(
        "{} of {} hosts answered in {:.2}s",
        summary.reachable,
        summary.scanned,
        start_time.elapsed().as_secs_f64()
    );
    Ok(ExitCode::SUCCESS)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
