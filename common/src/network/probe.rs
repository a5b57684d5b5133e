use std::fmt;
use std::net::Ipv4Addr;

/// What a host answered across the probed ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    /// First port, in probe order, that completed a handshake.
    Open(u16),
    /// Every port was refused, timed out or failed otherwise.
    NoneOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeResult {
    pub address: Ipv4Addr,
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    pub fn open(address: Ipv4Addr, port: u16) -> Self {
        Self {
            address,
            outcome: ProbeOutcome::Open(port),
        }
    }

    pub fn none_open(address: Ipv4Addr) -> Self {
        Self {
            address,
            outcome: ProbeOutcome::NoneOpen,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Open(_))
    }

    pub fn open_port(&self) -> Option<u16> {
        match self.outcome {
            ProbeOutcome::Open(port) => Some(port),
            ProbeOutcome::NoneOpen => None,
        }
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            ProbeOutcome::Open(port) => write!(f, "Active IP: {} (port {port} open)", self.address),
            // Diagnostics only; silent hosts never reach stdout.
            ProbeOutcome::NoneOpen => write!(f, "Silent IP: {}", self.address),
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
