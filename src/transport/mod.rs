//! Transport layer for printer communication.
//!
//! The serial session itself lives in [`serial`]; this module carries the
//! collaborator seam for resolving which port a session should use.

pub mod serial;

use futures::future::BoxFuture;
use tokio_serial::SerialPortInfo;

use crate::error::{Error, Result};

/// Collaborator that resolves which port a session should use.
///
/// The application layer typically prompts the operator; headless
/// deployments pick programmatically. Declining the prompt maps to
/// [`Error::SelectionCancelled`], which [`serial::SerialLink::open`]
/// surfaces to its caller.
pub trait PortSelector: Send + Sync {
    /// Picks a port name from the enumerated candidates.
    fn select<'a>(&'a self, candidates: &'a [SerialPortInfo]) -> BoxFuture<'a, Result<String>>;
}

/// Selector that takes the first enumerated port.
pub struct FirstAvailable;

impl PortSelector for FirstAvailable {
    fn select<'a>(&'a self, candidates: &'a [SerialPortInfo]) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            candidates
                .first()
                .map(|p| p.port_name.clone())
                .ok_or(Error::NoPortsFound)
        })
    }
}

pub use serial::SerialLink;

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_serial::SerialPortType;

    fn port(name: &str) -> SerialPortInfo {
        SerialPortInfo {
            port_name: name.to_owned(),
            port_type: SerialPortType::Unknown,
        }
    }

    #[tokio::test]
    async fn test_first_available_picks_head() {
        let candidates = vec![port("/dev/ttyACM0"), port("/dev/ttyUSB1")];
        let name = FirstAvailable.select(&candidates).await.unwrap();
        assert_eq!(name, "/dev/ttyACM0");
    }

    #[tokio::test]
    async fn test_first_available_errors_on_empty() {
        let err = FirstAvailable.select(&[]).await.unwrap_err();
        assert!(matches!(err, Error::NoPortsFound));
    }
}
