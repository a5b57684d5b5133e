pub mod discover;

use std::time::Duration;

use clap::{ArgAction, Parser};
use sweepr_common::config::{Config, DEFAULT_CONCURRENCY, DEFAULT_PORTS, MAX_PREFIX, MIN_PREFIX};

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "Finds live hosts on the local subnet with plain TCP connects.")]
pub struct CommandLine {
    /// Ports tried on every host, in order; the first open one is reported
    #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_PORTS)]
    pub ports: Vec<u16>,
    /// Timeout of a single connection attempt, in milliseconds
    #[arg(short, long = "timeout-ms", default_value_t = 1000)]
    pub timeout_ms: u64,
    /// Maximum number of hosts probed at once
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
    /// Sweep the whole /PREFIX network around the local address instead of its /24
    #[arg(long, value_parser = clap::value_parser!(u8).range(MIN_PREFIX as i64..=MAX_PREFIX as i64))]
    pub prefix: Option<u8>,
    /// Log more to stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            ports: self.ports.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            concurrency: self.concurrency,
            prefix: self.prefix,
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
