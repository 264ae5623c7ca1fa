//! Transaction engine (spec §4.E [MODULE E]).
//!
//! Owns the transport and the rolling counter, and executes one
//! request/response exchange at a time. Not reentrant: spec §5 requires at
//! most one transaction per device in flight, and this type has no internal
//! locking — wrapping whole transactions in a mutex is left to a caller that
//! shares an engine across threads.

use log::{debug, trace};

use crate::error::Error;
use crate::frame;
use crate::packet::MessageType;
use crate::transport::Transport;

/// Per-call timeouts and the zero-byte-read retry budget (spec §4.E).
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Timeout, in milliseconds, for codec-level reads and writes.
    pub codec_timeout_ms: u32,
    /// Timeout, in milliseconds, higher layers may use for file-transfer
    /// reads/writes. Not applied by the engine itself; exposed so callers
    /// can size their own retry loops consistently.
    pub file_timeout_ms: u32,
    /// Number of consecutive zero-byte reads tolerated before raising
    /// `Timeout`.
    pub zero_read_retries: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            codec_timeout_ms: 2000,
            file_timeout_ms: 5000,
            zero_read_retries: 3,
        }
    }
}

/// Owns a [`Transport`] and the rolling counter, and serializes
/// request/response transactions over it (spec §4.E).
pub struct TransactionEngine<T: Transport> {
    transport: T,
    counter: u8,
    config: EngineConfig,
}

impl<T: Transport> TransactionEngine<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, EngineConfig::default())
    }

    pub fn with_config(transport: T, config: EngineConfig) -> Self {
        TransactionEngine {
            transport,
            counter: 0,
            config,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn next_counter(&mut self) -> u8 {
        let current = self.counter;
        self.counter = self.counter.wrapping_add(1);
        current
    }

    /// Fire-and-forget: stamp, serialize, and write a request, without
    /// waiting for a response. Used only for operations that solicit no
    /// response (`ResetDevice`).
    pub fn send(&mut self, message_type: MessageType, payload: &[u8], trailer: &[u8]) -> Result<u8, Error> {
        let counter = self.next_counter();
        let frame = frame::serialize(message_type, counter, payload, trailer)?;
        trace!("-> {:02X?}", frame);

        let written = self
            .transport
            .write(&frame, self.config.codec_timeout_ms)
            .map_err(|e| Error::Connection(Box::new(e)))?;
        if written != frame.len() {
            return Err(Error::Connection(Box::new(PartialWrite {
                expected: frame.len(),
                actual: written,
            })));
        }
        Ok(counter)
    }

    /// Blocking read of one response, validating direction, expected type,
    /// and counter match.
    pub fn receive(&mut self, expected_counter: u8, expected_type: MessageType) -> Result<frame::ParsedResponse, Error> {
        let prefix = self.read_exact_with_retry(2)?;
        let length = prefix[1] as usize;
        let body = self.read_exact_with_retry(length)?;

        let mut full = Vec::with_capacity(2 + length);
        full.extend_from_slice(&prefix);
        full.extend_from_slice(&body);

        let parsed = frame::parse(&full)?;
        debug!(
            "<- type={:?} counter={} structured={} trailer={}",
            parsed.message_type,
            parsed.counter,
            parsed.structured_payload.len(),
            parsed.trailer.len()
        );

        if parsed.message_type != expected_type {
            return Err(Error::UnexpectedPacket {
                expected: expected_type,
                actual: parsed.message_type,
            });
        }
        if parsed.counter != expected_counter {
            return Err(Error::OutOfSyncResponse {
                expected: expected_counter,
                actual: parsed.counter,
            });
        }

        Ok(parsed)
    }

    /// `send` followed by `receive`. The caller supplies the response type
    /// it expects for this opcode, which is how the file-read asymmetry
    /// (request `0x07` / response `0x09`) is represented — there is no
    /// special-cased check inside the engine.
    pub fn transaction(
        &mut self,
        request_type: MessageType,
        expected_response_type: MessageType,
        payload: &[u8],
        trailer: &[u8],
    ) -> Result<frame::ParsedResponse, Error> {
        let counter = self.send(request_type, payload, trailer)?;
        self.receive(counter, expected_response_type)
    }

    fn read_exact_with_retry(&mut self, n: usize) -> Result<Vec<u8>, Error> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut out = vec![0u8; n];
        let mut filled = 0;
        let mut consecutive_zero_reads = 0u8;

        while filled < n {
            let read = self
                .transport
                .read(&mut out[filled..], self.config.codec_timeout_ms)
                .map_err(|e| Error::Connection(Box::new(e)))?;

            if read == 0 {
                consecutive_zero_reads += 1;
                if consecutive_zero_reads >= self.config.zero_read_retries {
                    return Err(Error::Timeout);
                }
                continue;
            }

            consecutive_zero_reads = 0;
            filled += read;
        }

        Ok(out)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("short write: wrote {actual} of {expected} bytes")]
struct PartialWrite {
    expected: usize,
    actual: usize,
}
