//! # labelink
//!
//! Device-protocol layer for thermal label printers connected over serial.
//!
//! This library covers the three pieces between an application and the
//! printer hardware: the serial session, the printer's status telemetry,
//! and the raster preprocessing that makes images printable on a thermal
//! head.
//!
//! ## Features
//!
//! - Async session lifecycle built on Tokio, one exclusive session per link
//! - Fixed-layout status frame decoding with forward-compatible enums
//! - Greyscale reduction and Atkinson error-diffusion halftoning
//!
//! ## Quick Start
//!
//! ```no_run
//! use labelink::{FirstAvailable, PixelBuffer, SerialLink, decode_status};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), labelink::Error> {
//!     let mut link = SerialLink::new(Box::new(FirstAvailable), |chunk| {
//!         if let Some(status) = decode_status(&chunk) {
//!             println!("printer: {:?}", status.printer_status);
//!         }
//!     });
//!
//!     if link.open(None).await? {
//!         // Halftone an RGBA image and push it out
//!         let mut image = PixelBuffer::new(vec![128; 64 * 64 * 4], 64);
//!         image.to_greyscale_by_luminance().dither_atkinson(false);
//!         link.write_bytes(image.samples()).await?;
//!
//!         link.close().await;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`transport`] - Serial session ownership and the port-selection seam
//! - [`protocol`] - Status frame wire format and decoding
//! - [`dither`] - Raster halftoning pipeline
//! - [`event`] - Connectivity event stream
//! - [`error`] - Error taxonomy

pub mod dither;
pub mod error;
pub mod event;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use dither::PixelBuffer;
pub use error::{Error, Result};
pub use event::{EventDispatcher, LinkEvent, Subscription};
pub use protocol::{
    LabelColor, PaperType, PrinterReadyStatus, STATUS_FRAME_LEN, StatusFrame, decode_status,
};
pub use transport::{FirstAvailable, PortSelector, SerialLink};
pub use transport::serial::{BAUD_RATE, ChunkHandler, list_ports};
