//! Wire framer (spec §4.C [MODULE C]). Translates between typed
//! `(message_type, direction, counter, structured_payload, trailer)` tuples
//! and byte frames. Performs no I/O.

use std::convert::TryFrom;

use crate::error::Error;
use crate::packet::{structured_payload_size, Direction, MessageType};

/// A frame parsed off the wire: the 4-byte header plus the body split into
/// its fixed structured portion and any variable trailing data.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub direction: Direction,
    pub counter: u8,
    pub message_type: MessageType,
    pub structured_payload: Vec<u8>,
    pub trailer: Vec<u8>,
}

/// Serialize a request into a single frame.
///
/// `payload` and `trailer` must already be in their wire representation
/// (little-endian for general fields, big-endian for the fields spec §3
/// singles out) — the framer never reorders bytes, it only concatenates.
pub fn serialize(
    message_type: MessageType,
    counter: u8,
    payload: &[u8],
    trailer: &[u8],
) -> Result<Vec<u8>, Error> {
    let length = 2 + payload.len() + trailer.len();
    if length > u8::MAX as usize {
        return Err(Error::FrameTooLarge { len: length + 2 });
    }

    let mut buf = Vec::with_capacity(4 + payload.len() + trailer.len());
    buf.push(Direction::Tx as u8);
    buf.push(length as u8);
    buf.push(counter);
    buf.push(message_type as u8);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(trailer);
    Ok(buf)
}

/// Parse a complete frame (header + body) read from the transport.
///
/// Requires at least 2 bytes (`direction`, `length`). If the body is shorter
/// than the opcode's structured-payload size, the missing bytes are treated
/// as zero-filled, per spec §4.C — some devices legitimately return short
/// fixed payloads.
pub fn parse(bytes: &[u8]) -> Result<ParsedResponse, Error> {
    if bytes.len() < 2 {
        return Err(Error::MalformedFrame {
            reason: format!("frame too short to contain a header: {} bytes", bytes.len()),
        });
    }

    let direction = Direction::try_from(bytes[0])?;
    if direction != Direction::Rx {
        return Err(Error::MalformedFrame {
            reason: format!("expected inbound direction 0x01, got 0x{:02X}", bytes[0]),
        });
    }

    let length = bytes[1] as usize;
    if bytes.len() < 2 + length {
        return Err(Error::MalformedFrame {
            reason: format!(
                "length byte declares {} body bytes but only {} are available",
                length,
                bytes.len() - 2
            ),
        });
    }
    if length < 2 {
        return Err(Error::MalformedFrame {
            reason: format!("length byte {length} is too small to hold counter and type"),
        });
    }

    let body = &bytes[2..2 + length];
    let counter = body[0];
    let message_type = MessageType::try_from(body[1])?;
    let rest = &body[2..];

    let structured_size = structured_payload_size(Direction::Rx, message_type);
    let (structured_payload, trailer) = if rest.len() >= structured_size {
        (rest[..structured_size].to_vec(), rest[structured_size..].to_vec())
    } else {
        let mut padded = rest.to_vec();
        padded.resize(structured_size, 0);
        (padded, Vec::new())
    };

    Ok(ParsedResponse {
        direction,
        counter,
        message_type,
        structured_payload,
        trailer,
    })
}
