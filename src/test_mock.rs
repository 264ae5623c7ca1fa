//! Scripted [`Transport`] double used by this crate's own unit tests.
//! Queues canned device responses and replays them, stamping each with the
//! counter from the request that was just written — it never inspects the
//! request's opcode, so tests are responsible for queuing responses in the
//! order their calls will consume them.

use std::collections::VecDeque;

use crate::packet::MessageType;
use crate::transport::{Transport, TransportInfo};

type ResponseFactory = Box<dyn FnMut(u8) -> Vec<u8>>;

pub struct MockTransport {
    pending: VecDeque<ResponseFactory>,
    read_buffer: Vec<u8>,
    last_counter: u8,
    writes_seen: usize,
}

#[derive(Debug, thiserror::Error)]
#[error("mock transport error")]
pub struct MockTransportError;

impl MockTransport {
    pub fn new() -> Self {
        MockTransport {
            pending: VecDeque::new(),
            read_buffer: Vec::new(),
            last_counter: 0,
            writes_seen: 0,
        }
    }

    pub fn writes_seen(&self) -> usize {
        self.writes_seen
    }

    pub fn push_raw(&mut self, message_type: MessageType, structured: Vec<u8>, trailer: Vec<u8>) {
        self.pending.push_back(Box::new(move |counter| {
            build_rx_frame(counter, message_type as u8, &structured, &trailer)
        }));
    }

    pub fn push_file_op_response(&mut self, message_type: MessageType, error: u32) {
        let mut structured = vec![0u8; 16];
        structured.extend_from_slice(&error.to_le_bytes());
        self.push_raw(message_type, structured, Vec::new());
    }

    pub fn push_file_size_response(&mut self, size: u32) {
        let mut structured = vec![0u8; 12];
        structured.extend_from_slice(&size.to_be_bytes());
        structured.extend_from_slice(&0u32.to_le_bytes());
        self.push_raw(MessageType::GetFileSize, structured, Vec::new());
    }

    pub fn push_read_response(&mut self, read_length: u32, data: &[u8]) {
        let mut structured = vec![0u8; 4];
        structured.extend_from_slice(&read_length.to_le_bytes());
        self.push_raw(MessageType::ReadFileDataResponse, structured, data.to_vec());
    }

    pub fn push_find_entry_response(&mut self, file_id: u32, file_size: u32, end_of_list: bool, first: bool) {
        let mut structured = vec![0u8; 4];
        structured.extend_from_slice(&file_id.to_be_bytes());
        structured.extend_from_slice(&[0u8; 4]);
        structured.extend_from_slice(&file_size.to_be_bytes());
        structured.extend_from_slice(&(end_of_list as u32).to_le_bytes());
        let message_type = if first {
            MessageType::FindFirstFile
        } else {
            MessageType::FindNextFile
        };
        self.push_raw(message_type, structured, Vec::new());
    }

    pub fn push_counter_override(&mut self, message_type: MessageType, structured: Vec<u8>, trailer: Vec<u8>, counter: u8) {
        self.pending
            .push_back(Box::new(move |_actual_counter| build_rx_frame(counter, message_type as u8, &structured, &trailer)));
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn build_rx_frame(counter: u8, message_type: u8, structured: &[u8], trailer: &[u8]) -> Vec<u8> {
    let length = 2 + structured.len() + trailer.len();
    let mut buf = vec![0x01u8, length as u8, counter, message_type];
    buf.extend_from_slice(structured);
    buf.extend_from_slice(trailer);
    buf
}

impl Transport for MockTransport {
    type Error = MockTransportError;

    fn open(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn close(&mut self) {}

    fn is_open(&self) -> bool {
        true
    }

    fn write(&mut self, bytes: &[u8], _timeout_ms: u32) -> Result<usize, Self::Error> {
        self.writes_seen += 1;
        if bytes.len() >= 3 {
            self.last_counter = bytes[2];
        }
        Ok(bytes.len())
    }

    fn read(&mut self, buf: &mut [u8], _timeout_ms: u32) -> Result<usize, Self::Error> {
        if self.read_buffer.is_empty() {
            match self.pending.pop_front() {
                Some(mut factory) => self.read_buffer.extend(factory(self.last_counter)),
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
