//! Error types for the labelink library.

use thiserror::Error;

/// The main error type for labelink operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Serial port error.
    #[error("serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The port selection prompt was rejected or cancelled by the user.
    ///
    /// This is the one failure `SerialLink::open` surfaces to the caller;
    /// capability and acquisition problems degrade to `false` instead.
    #[error("port selection cancelled")]
    SelectionCancelled,

    /// A selector ran with no ports to choose from.
    #[error("no serial ports available")]
    NoPortsFound,
}

/// Result type alias for labelink operations.
pub type Result<T> = std::result::Result<T, Error>;
