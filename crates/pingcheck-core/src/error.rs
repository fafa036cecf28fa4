use std::fmt::{Display, Formatter};
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// A ping engine error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A ping engine error.
#[derive(Error, Debug)]
pub enum Error {
    /// The target host is neither a literal address nor a resolvable name.
    #[error("could not resolve host {0}")]
    HostUnresolvable(String),
    /// The raw transport endpoint could not be created.
    ///
    /// Typically insufficient privilege (`CAP_NET_RAW` on Linux) or resource
    /// exhaustion.
    #[error("transport unavailable: {0}")]
    TransportUnavailable(IoError),
    /// A background task or timer could not be spawned.
    #[error("failed to spawn background task: {0}")]
    SpawnFailed(io::Error),
    #[error("invalid packet: {0}")]
    PacketError(#[from] pingcheck_packet::error::Error),
}

/// Custom IO error result.
pub type IoResult<T> = std::result::Result<T, IoError>;

/// Custom IO error.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Sendto error for {1}: {0}")]
    SendTo(io::Error, SocketAddr),
    #[error("Failed to {1}: {0}")]
    Other(io::Error, IoOperation),
}

/// Io operation.
#[derive(Debug)]
pub enum IoOperation {
    NewSocket,
    SetNonBlocking,
    Select,
    RecvFrom,
    Shutdown,
}

impl Display for IoOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewSocket => write!(f, "create new socket"),
            Self::SetNonBlocking => write!(f, "set non-blocking"),
            Self::Select => write!(f, "select"),
            Self::RecvFrom => write!(f, "recv from"),
            Self::Shutdown => write!(f, "shutdown"),
        }
    }
}
