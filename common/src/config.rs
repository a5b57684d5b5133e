use std::time::Duration;

use crate::error::ScanError;

pub const DEFAULT_PORTS: [u16; 3] = [22, 80, 443];
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_CONCURRENCY: usize = 256;

/// Smallest and largest prefix accepted as a subnet override.
pub const MIN_PREFIX: u8 = 16;
pub const MAX_PREFIX: u8 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Ports tried against every host, in order. The first one that accepts wins.
    pub ports: Vec<u16>,
    /// Upper bound for a single connection attempt.
    pub timeout: Duration,
    /// Maximum number of hosts probed at the same time.
    pub concurrency: usize,
    /// Derive targets from this prefix instead of the local /24.
    ///
    /// `None` keeps the host-octet sweep (`x.y.z.1` to `x.y.z.254`), regardless
    /// of the mask reported by the interface.
    pub prefix: Option<u8>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ports: DEFAULT_PORTS.to_vec(),
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            prefix: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.ports.is_empty() {
            return Err(ScanError::InvalidConfig("at least one port is required".into()));
        }
        if self.ports.contains(&0) {
            return Err(ScanError::InvalidConfig("port 0 cannot be probed".into()));
        }
        if self.timeout.is_zero() {
            return Err(ScanError::InvalidConfig("timeout must be greater than zero".into()));
        }
        if self.concurrency == 0 {
            return Err(ScanError::InvalidConfig("concurrency must be at least 1".into()));
        }
        if let Some(prefix) = self.prefix {
            if !(MIN_PREFIX..=MAX_PREFIX).contains(&prefix) {
                return Err(ScanError::InvalidConfig(format!(
                    "prefix /{prefix} is outside /{MIN_PREFIX}../{MAX_PREFIX}"
                )));
            }
        }
        Ok(())
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
