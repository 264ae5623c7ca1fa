//! Scripted [`Transport`] double for the crate's black-box end-to-end
//! tests, built from raw byte logs the way spec scenarios describe them.

use std::collections::VecDeque;

use tomtom_proto::{Transport, TransportInfo};

pub struct ScriptedTransport {
    pending: VecDeque<Vec<u8>>,
    read_buffer: Vec<u8>,
    pub writes: Vec<Vec<u8>>,
}

#[derive(Debug, thiserror::Error)]
#[error("scripted transport error")]
pub struct ScriptedTransportError;

impl ScriptedTransport {
    pub fn new() -> Self {
        ScriptedTransport {
            pending: VecDeque::new(),
            read_buffer: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Queue a full reply frame (header + body), exactly as it would appear
    /// on the wire.
    pub fn reply(mut self, frame: Vec<u8>) -> Self {
        self.pending.push_back(frame);
        self
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ScriptedTransport {
    type Error = ScriptedTransportError;

    fn open(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn close(&mut self) {}

    fn is_open(&self) -> bool {
        true
    }

    fn write(&mut self, bytes: &[u8], _timeout_ms: u32) -> Result<usize, Self::Error> {
        self.writes.push(bytes.to_vec());
        Ok(bytes.len())
    }

    fn read(&mut self, buf: &mut [u8], _timeout_ms: u32) -> Result<usize, Self::Error> {
        if self.read_buffer.is_empty() {
            match self.pending.pop_front() {
                Some(frame) => self.read_buffer = frame,
                None => return Ok(0),
            }
        }

        let n = buf.len().min(self.read_buffer.len());
        buf[..n].copy_from_slice(&self.read_buffer[..n]);
        self.read_buffer.drain(..n);
        Ok(n)
    }

    fn info(&self) -> TransportInfo {
        TransportInfo {
            product_id: 0,
            serial: None,
            report_in_size: 256,
            report_out_size: 256,
        }
    }
}

/// Build a complete response frame: `01 length counter type structured... trailer...`.
pub fn response_frame(counter: u8, message_type: u8, structured: &[u8], trailer: &[u8]) -> Vec<u8> {
    let length = 2 + structured.len() + trailer.len();
    let mut buf = vec![0x01u8, length as u8, counter, message_type];
    buf.extend_from_slice(structured);
    buf.extend_from_slice(trailer);
    buf
}

/// `reserved(4) file_id(4) reserved(4) reserved(4) error(4, LE)` — the shape
/// shared by Open/Close/Delete responses.
pub fn file_op_structured(error: u32) -> Vec<u8> {
    let mut buf = vec![0u8; 16];
    buf.extend_from_slice(&error.to_le_bytes());
    buf
}

pub fn file_size_structured(size: u32, error: u32) -> Vec<u8> {
    let mut buf = vec![0u8; 12];
    buf.extend_from_slice(&size.to_be_bytes());
    buf.extend_from_slice(&error.to_le_bytes());
    buf
}

pub fn find_entry_structured(file_id: u32, file_size: u32, end_of_list: bool) -> Vec<u8> {
    let mut buf = vec![0u8; 4];
    buf.extend_from_slice(&file_id.to_be_bytes());
    buf.extend_from_slice(&[0u8; 4]);
    buf.extend_from_slice(&file_size.to_be_bytes());
    buf.extend_from_slice(&(end_of_list as u32).to_le_bytes());
    buf
}

pub fn read_data_structured(read_length: u32) -> Vec<u8> {
    let mut buf = vec![0u8; 4];
    buf.extend_from_slice(&read_length.to_le_bytes());
    buf
}
