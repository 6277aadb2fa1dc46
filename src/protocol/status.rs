//! Status frame decoding.
//!
//! The printer reports its mechanical and consumable state as a fixed
//! 15-byte record:
//!
//! ```text
//! [ready:1] [data_len:1] [rsvd:2] [color:1] [radius:1] [rsvd:1]
//! [paper:1] [rsvd:3] [label_len:1] [max_width:1] [width:1] [rsvd:1]
//! ```
//!
//! There is no checksum and no terminator; the transport consumer decides
//! where one frame ends before handing the bytes here.

use bytes::Buf;

/// Size of the status record on the wire.
pub const STATUS_FRAME_LEN: usize = 15;

/// Printer readiness reported in byte 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterReadyStatus {
    /// Idle and ready to print.
    Ready,
    /// The lid is open.
    LidOpen,
    /// No paper loaded.
    NoPaper,
    /// A job is in progress.
    Busy,
    /// Unrecognized code, raw byte retained.
    Unknown(u8),
}

impl PrinterReadyStatus {
    /// Maps a wire code to a readiness state.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Ready,
            1 => Self::LidOpen,
            4 => Self::NoPaper,
            32 => Self::Busy,
            other => Self::Unknown(other),
        }
    }
}

/// Label stock color reported in byte 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelColor {
    Transparent,
    White,
    Pink,
    Blue,
    Yellow,
    /// Unrecognized code, raw byte retained.
    Unknown(u8),
}

impl LabelColor {
    /// Maps a wire code to a stock color.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            2 => Self::Transparent,
            3 => Self::White,
            4 => Self::Pink,
            5 => Self::Blue,
            6 => Self::Yellow,
            other => Self::Unknown(other),
        }
    }
}

/// Paper feed type reported in byte 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperType {
    /// Continuous roll.
    Continuous,
    /// Die-cut labels separated by gaps.
    Gapped,
    /// Stock indexed by black marks.
    BlackMark,
    /// Unrecognized code, raw byte retained.
    Unknown(u8),
}

impl PaperType {
    /// Maps a wire code to a paper type.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Continuous,
            1 => Self::Gapped,
            2 => Self::BlackMark,
            other => Self::Unknown(other),
        }
    }
}

/// Decoded printer status record.
///
/// Bytes with no identified meaning are kept verbatim so firmware revisions
/// that start using them stay observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFrame {
    /// Printer readiness (byte 0).
    pub printer_status: PrinterReadyStatus,
    /// Payload length advertised by the printer (byte 1).
    pub data_length: u8,
    /// Bytes 2-3, meaning not yet identified.
    pub reserved_head: [u8; 2],
    /// Label stock color (byte 4).
    pub label_color: LabelColor,
    /// Possibly the die-cut corner radius (byte 5).
    pub border_radius: u8,
    /// Byte 6, meaning not yet identified.
    pub reserved_mid: u8,
    /// Paper feed type (byte 7).
    pub paper_type: PaperType,
    /// Bytes 8-10, meaning not yet identified.
    pub reserved_tail: [u8; 3],
    /// Label length in device units (byte 11).
    pub label_length: u8,
    /// Maximum printable label width (byte 12).
    pub max_label_width: u8,
    /// Loaded label width (byte 13).
    pub label_width: u8,
    /// Byte 14, meaning not yet identified.
    pub reserved_end: u8,
}

/// Decodes a status frame from a raw buffer.
///
/// Returns `None` when the buffer is shorter than [`STATUS_FRAME_LEN`]
/// (truncated telemetry is the caller's call to handle). For any longer
/// buffer the decode is total: unrecognized codes map to `Unknown`, extra
/// trailing bytes are ignored.
#[must_use]
pub fn decode(data: &[u8]) -> Option<StatusFrame> {
    if data.len() < STATUS_FRAME_LEN {
        return None;
    }

    let mut cursor = std::io::Cursor::new(data);

    let printer_status = PrinterReadyStatus::from_byte(cursor.get_u8());
    let data_length = cursor.get_u8();

    let mut reserved_head = [0u8; 2];
    cursor.copy_to_slice(&mut reserved_head);

    let label_color = LabelColor::from_byte(cursor.get_u8());
    let border_radius = cursor.get_u8();
    let reserved_mid = cursor.get_u8();
    let paper_type = PaperType::from_byte(cursor.get_u8());

    let mut reserved_tail = [0u8; 3];
    cursor.copy_to_slice(&mut reserved_tail);

    let label_length = cursor.get_u8();
    let max_label_width = cursor.get_u8();
    let label_width = cursor.get_u8();
    let reserved_end = cursor.get_u8();

    Some(StatusFrame {
        printer_status,
        data_length,
        reserved_head,
        label_color,
        border_radius,
        reserved_mid,
        paper_type,
        reserved_tail,
        label_length,
        max_label_width,
        label_width,
        reserved_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_short_buffers() {
        let buf = [0u8; STATUS_FRAME_LEN];
        for len in 0..STATUS_FRAME_LEN {
            assert_eq!(decode(&buf[..len]), None, "length {len} should not decode");
        }
    }

    #[test]
    fn test_decode_full_record() {
        let data = [0, 10, 1, 34, 3, 0, 3, 0, 6, 18, 21, 40, 60, 30, 45];
        let frame = decode(&data).unwrap();

        assert_eq!(frame.printer_status, PrinterReadyStatus::Ready);
        assert_eq!(frame.data_length, 10);
        assert_eq!(frame.reserved_head, [1, 34]);
        assert_eq!(frame.label_color, LabelColor::White);
        assert_eq!(frame.border_radius, 0);
        assert_eq!(frame.reserved_mid, 3);
        assert_eq!(frame.paper_type, PaperType::Continuous);
        assert_eq!(frame.reserved_tail, [6, 18, 21]);
        assert_eq!(frame.label_length, 40);
        assert_eq!(frame.max_label_width, 60);
        assert_eq!(frame.label_width, 30);
        assert_eq!(frame.reserved_end, 45);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut data = vec![32, 0, 0, 0, 6, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0];
        data.extend_from_slice(&[0xAA; 16]);

        let frame = decode(&data).unwrap();
        assert_eq!(frame.printer_status, PrinterReadyStatus::Busy);
        assert_eq!(frame.label_color, LabelColor::Yellow);
        assert_eq!(frame.paper_type, PaperType::BlackMark);
    }

    #[test]
    fn test_ready_status_codes() {
        assert_eq!(PrinterReadyStatus::from_byte(0), PrinterReadyStatus::Ready);
        assert_eq!(
            PrinterReadyStatus::from_byte(1),
            PrinterReadyStatus::LidOpen
        );
        assert_eq!(
            PrinterReadyStatus::from_byte(4),
            PrinterReadyStatus::NoPaper
        );
        assert_eq!(PrinterReadyStatus::from_byte(32), PrinterReadyStatus::Busy);
        assert_eq!(
            PrinterReadyStatus::from_byte(2),
            PrinterReadyStatus::Unknown(2)
        );
        assert_eq!(
            PrinterReadyStatus::from_byte(255),
            PrinterReadyStatus::Unknown(255)
        );
    }

    #[test]
    fn test_label_color_codes() {
        assert_eq!(LabelColor::from_byte(2), LabelColor::Transparent);
        assert_eq!(LabelColor::from_byte(3), LabelColor::White);
        assert_eq!(LabelColor::from_byte(4), LabelColor::Pink);
        assert_eq!(LabelColor::from_byte(5), LabelColor::Blue);
        assert_eq!(LabelColor::from_byte(6), LabelColor::Yellow);
        assert_eq!(LabelColor::from_byte(0), LabelColor::Unknown(0));
        assert_eq!(LabelColor::from_byte(7), LabelColor::Unknown(7));
    }

    #[test]
    fn test_paper_type_codes() {
        assert_eq!(PaperType::from_byte(0), PaperType::Continuous);
        assert_eq!(PaperType::from_byte(1), PaperType::Gapped);
        assert_eq!(PaperType::from_byte(2), PaperType::BlackMark);
        assert_eq!(PaperType::from_byte(3), PaperType::Unknown(3));
    }

    #[test]
    fn test_unknown_codes_do_not_fail_decode() {
        // Every coded field set to an undocumented value still decodes.
        let data = [99, 0, 0, 0, 200, 0, 0, 77, 0, 0, 0, 0, 0, 0, 0];
        let frame = decode(&data).unwrap();

        assert_eq!(frame.printer_status, PrinterReadyStatus::Unknown(99));
        assert_eq!(frame.label_color, LabelColor::Unknown(200));
        assert_eq!(frame.paper_type, PaperType::Unknown(77));
    }
}
