//! Structured payload encoding/decoding for each opcode (spec §6).
//!
//! Multi-byte fields are little-endian on the wire except file identifiers,
//! `time`, `file_size`, and `product_id`, which are big-endian (spec §3, §9
//! "Endian handling"). Every field below names its own endianness context at
//! the call site rather than relying on a blanket rule.

use scroll::{Pread, Pwrite, BE, LE};

use crate::error::Error;
use crate::file_id::FileId;

fn encode_u32(value: u32, ctx: scroll::Endian) -> [u8; 4] {
    let mut buf = [0u8; 4];
    buf.pwrite_with(value, 0, ctx).expect("4-byte buffer always fits a u32");
    buf
}

fn decode_u32(bytes: &[u8], offset: usize, ctx: scroll::Endian) -> Result<u32, Error> {
    Ok(bytes.pread_with::<u32>(offset, ctx)?)
}

// ---------------------------------------------------------------------
// Request (TX) payload builders
// ---------------------------------------------------------------------

/// `OpenFileRead`/`OpenFileWrite`/`CloseFile`/`DeleteFile`/`GetFileSize`
/// requests: a single big-endian `file_id`.
pub fn file_id_request(file_id: FileId) -> Vec<u8> {
    encode_u32(file_id.value(), BE).to_vec()
}

/// `ReadFileDataRequest`: big-endian `file_id` then little-endian requested
/// `length`.
pub fn read_file_data_request(file_id: FileId, length: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8);
    buf.extend_from_slice(&encode_u32(file_id.value(), BE));
    buf.extend_from_slice(&encode_u32(length, LE));
    buf
}

/// `WriteFileData` request: big-endian `file_id`; the data itself travels as
/// the frame's trailer, not as part of this structured payload.
pub fn write_file_data_request(file_id: FileId) -> Vec<u8> {
    encode_u32(file_id.value(), BE).to_vec()
}

/// `FindFirstFile` request: two reserved little-endian `u32` fields, always
/// zero.
pub fn find_first_file_request() -> Vec<u8> {
    vec![0u8; 8]
}

// ---------------------------------------------------------------------
// Response (RX) structured payloads
// ---------------------------------------------------------------------

/// Response shape shared by `OpenFileRead`, `OpenFileWrite`, `CloseFile`, and
/// `DeleteFile`: `reserved(4) file_id(4) reserved(4) reserved(4) error(4)`.
#[derive(Debug, Clone, Copy)]
pub struct FileOpResponse {
    pub file_id: FileId,
    pub error: u32,
}

impl FileOpResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Ok(FileOpResponse {
            file_id: FileId(decode_u32(bytes, 4, BE)?),
            error: decode_u32(bytes, 16, LE)?,
        })
    }
}

/// `GetFileSize` response: `reserved(4) file_id(4) reserved(4) file_size(4,
/// BE) error(4, LE)`.
#[derive(Debug, Clone, Copy)]
pub struct GetFileSizeResponse {
    pub file_id: FileId,
    pub file_size: u32,
    pub error: u32,
}

impl GetFileSizeResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Ok(GetFileSizeResponse {
            file_id: FileId(decode_u32(bytes, 4, BE)?),
            file_size: decode_u32(bytes, 12, BE)?,
            error: decode_u32(bytes, 16, LE)?,
        })
    }
}

/// `FindFirstFile`/`FindNextFile` response: `reserved(4) file_id(4, BE)
/// reserved(4) file_size(4, BE) end_of_list(4, LE)`.
#[derive(Debug, Clone, Copy)]
pub struct FindEntryResponse {
    pub file_id: FileId,
    pub file_size: u32,
    pub end_of_list: bool,
}

impl FindEntryResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Ok(FindEntryResponse {
            file_id: FileId(decode_u32(bytes, 4, BE)?),
            file_size: decode_u32(bytes, 12, BE)?,
            end_of_list: decode_u32(bytes, 16, LE)? != 0,
        })
    }
}

/// `ReadFileDataResponse` structured payload: `file_id(4, BE) read_length(4,
/// LE)`. The file data itself is the frame's trailer.
#[derive(Debug, Clone, Copy)]
pub struct ReadFileDataResponse {
    pub file_id: FileId,
    pub read_length: u32,
}

impl ReadFileDataResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Ok(ReadFileDataResponse {
            file_id: FileId(decode_u32(bytes, 0, BE)?),
            read_length: decode_u32(bytes, 4, LE)?,
        })
    }
}

/// `GetWatchTime` response: `time(4, BE)` then 16 reserved bytes.
#[derive(Debug, Clone, Copy)]
pub struct GetWatchTimeResponse {
    pub time: u32,
}

impl GetWatchTimeResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Ok(GetWatchTimeResponse {
            time: decode_u32(bytes, 0, BE)?,
        })
    }
}

/// `GetProductId` response: a single big-endian `product_id`.
#[derive(Debug, Clone, Copy)]
pub struct GetProductIdResponse {
    pub product_id: u32,
}

impl GetProductIdResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Ok(GetProductIdResponse {
            product_id: decode_u32(bytes, 0, BE)?,
        })
    }
}

/// `FormatWatch` response: 16 reserved bytes then `error(4, LE)`.
#[derive(Debug, Clone, Copy)]
pub struct FormatWatchResponse {
    pub error: u32,
}

impl FormatWatchResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Ok(FormatWatchResponse {
            error: decode_u32(bytes, 16, LE)?,
        })
    }
}
