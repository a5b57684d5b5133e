use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    /// No interface carries a non-loopback IPv4 address.
    #[error("no suitable IP address found")]
    NoSuitableInterface,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
