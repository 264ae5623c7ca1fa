//! Direction and message-type tags for the wire protocol (spec §3 [MODULE B]).
//!
//! Binding a structured payload shape to its `(MessageType, Direction)` pair
//! is handled by the size table in [`structured_payload_size`] rather than by
//! a trait per payload type — the source's compile-time specialization has
//! no clean analogue without duplicating a type per opcode, and the table is
//! exactly the "opcode -> (size, is_variable)" shape the design notes call
//! for.

use std::convert::TryFrom;

use crate::error::Error;

/// `TX` is host-to-device, `RX` is device-to-host. Any other byte on the wire
/// is a malformed frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Tx = 0x09,
    Rx = 0x01,
}

impl TryFrom<u8> for Direction {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x09 => Ok(Direction::Tx),
            0x01 => Ok(Direction::Rx),
            other => Err(Error::MalformedFrame {
                reason: format!("unknown direction byte 0x{other:02X}"),
            }),
        }
    }
}

/// The closed set of protocol opcodes (spec §3). Request opcode equals
/// response opcode for every operation except file-read, where the request
/// is `ReadFileDataRequest` (0x07) and the response is `ReadFileDataResponse`
/// (0x09).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MessageType {
    OpenFileWrite = 0x02,
    DeleteFile = 0x03,
    WriteFileData = 0x04,
    GetFileSize = 0x05,
    OpenFileRead = 0x06,
    ReadFileDataRequest = 0x07,
    ReadFileDataResponse = 0x09,
    CloseFile = 0x0C,
    FormatWatch = 0x0E,
    ResetDevice = 0x10,
    FindFirstFile = 0x11,
    FindNextFile = 0x12,
    GetWatchTime = 0x14,
    ResetGpsProcessor = 0x1D,
    GetProductId = 0x20,
    GetFirmwareVersion = 0x21,
    GetBleVersion = 0x28,
}

impl TryFrom<u8> for MessageType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use MessageType::*;
        Ok(match value {
            0x02 => OpenFileWrite,
            0x03 => DeleteFile,
            0x04 => WriteFileData,
            0x05 => GetFileSize,
            0x06 => OpenFileRead,
            0x07 => ReadFileDataRequest,
            0x09 => ReadFileDataResponse,
            0x0C => CloseFile,
            0x0E => FormatWatch,
            0x10 => ResetDevice,
            0x11 => FindFirstFile,
            0x12 => FindNextFile,
            0x14 => GetWatchTime,
            0x1D => ResetGpsProcessor,
            0x20 => GetProductId,
            0x21 => GetFirmwareVersion,
            0x28 => GetBleVersion,
            other => {
                return Err(Error::MalformedFrame {
                    reason: format!("unknown message type opcode 0x{other:02X}"),
                })
            }
        })
    }
}

/// Size, in bytes, of the fixed structured payload for `(direction,
/// message_type)`. Anything beyond this size in a frame's body is trailer.
///
/// This is the table the design notes describe: it lets the framer and the
/// transaction engine partition a response body into structured fields and
/// variable trailing data without any payload type knowing its own size.
pub fn structured_payload_size(direction: Direction, message_type: MessageType) -> usize {
    use Direction::*;
    use MessageType::*;
    match (direction, message_type) {
        (Tx, OpenFileRead) | (Tx, OpenFileWrite) | (Tx, CloseFile) | (Tx, DeleteFile) | (Tx, GetFileSize) => 4,
        (Tx, ReadFileDataRequest) => 8,
        (Tx, WriteFileData) => 4,
        (Tx, FindFirstFile) => 8,
        (Tx, FindNextFile)
        | (Tx, GetWatchTime)
        | (Tx, GetFirmwareVersion)
        | (Tx, GetBleVersion)
        | (Tx, GetProductId)
        | (Tx, FormatWatch)
        | (Tx, ResetDevice)
        | (Tx, ResetGpsProcessor) => 0,

        (Rx, OpenFileRead) | (Rx, OpenFileWrite) | (Rx, CloseFile) | (Rx, DeleteFile) => 20,
        (Rx, GetFileSize) => 20,
        (Rx, FindFirstFile) | (Rx, FindNextFile) => 20,
        (Rx, ReadFileDataResponse) => 8,
        (Rx, WriteFileData) => 20,
        (Rx, GetWatchTime) => 20,
        (Rx, GetFirmwareVersion) | (Rx, GetBleVersion) => 0,
        (Rx, GetProductId) => 4,
        (Rx, FormatWatch) => 20,
        (Rx, ResetGpsProcessor) => 0,

        // ResetDevice solicits no response; any other pairing is unreachable
        // through the public API but defaults to "no structured payload"
        // rather than panicking.
        _ => 0,
    }
}
