use std::fmt::Display;
use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use sweepr_common::network::interface::LocalNetworkInfo;
use sweepr_common::network::probe::ProbeResult;
use sweepr_core::discovery::DiscoveryObserver;

/// Writes the result lines of a sweep.
///
/// Each line is written in full while the inner lock is held, so lines coming
/// from concurrent probes never tear.
pub struct LineWriter<W> {
    out: Mutex<W>,
}

impl LineWriter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn line<T: Display>(&self, msg: T) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(out, "{msg}");
        let _ = out.flush();
    }

    pub fn local_network(&self, local: &LocalNetworkInfo) {
        self.line(format_args!("Local IP: {}, Subnet: {}", local.address, local.network));
    }

    pub fn local_ip_error<E: Display>(&self, err: &E) {
        self.line(format_args!("Error getting local IP: {err}"));
    }

    pub fn scan_complete(&self) {
        self.line("Scan complete.");
    }
}

impl<W: Write + Send> DiscoveryObserver for LineWriter<W> {
    fn local_network(&self, local: &LocalNetworkInfo) {
        LineWriter::local_network(self, local);
    }

    fn host_found(&self, result: &ProbeResult) {
        self.line(result);
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
