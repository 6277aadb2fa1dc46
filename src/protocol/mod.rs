//! Wire-level protocol definitions.
//!
//! The printer's only structured inbound record is the fixed-layout status
//! frame; everything else on the wire is opaque to this crate.

pub mod status;

pub use status::{
    LabelColor, PaperType, PrinterReadyStatus, STATUS_FRAME_LEN, StatusFrame,
    decode as decode_status,
};
