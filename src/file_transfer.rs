//! File transfer sub-protocol (spec §4.F [MODULE F]).
//!
//! Implements open -> size -> chunked read/write -> close sequences atop the
//! transaction engine. `file_id` is converted to its big-endian wire form at
//! the payload-construction sites in this module — the framer and the
//! transaction engine never interpret endianness themselves (spec §9).

use log::warn;

use crate::engine::TransactionEngine;
use crate::error::Error;
use crate::file_id::FileId;
use crate::packet::MessageType;
use crate::payload;
use crate::profile::DeviceProfile;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOpenMode {
    Read,
    Write,
}

/// Scoped handle over an opened `FileId`. Closes the file on `Drop` unless
/// [`FileGuard::close`] already did so, matching the "every open must be
/// closed" invariant of spec §3/§5 with a guard instead of `Open`/`Close`
/// pairing left to the caller's discipline.
pub struct FileGuard<'a, T: Transport> {
    engine: &'a mut TransactionEngine<T>,
    file_id: FileId,
    closed: bool,
}

impl<'a, T: Transport> FileGuard<'a, T> {
    /// Open the file and wrap it in a guard. On a non-zero device error no
    /// guard is constructed and no `Close` is attempted, per spec §4.F step
    /// 1 ("non-zero ⇒ fail FileOpenError without attempting close").
    pub fn open(engine: &'a mut TransactionEngine<T>, file_id: FileId, mode: FileOpenMode) -> Result<Self, Error> {
        let request_type = match mode {
            FileOpenMode::Read => MessageType::OpenFileRead,
            FileOpenMode::Write => MessageType::OpenFileWrite,
        };
        let payload = payload::file_id_request(file_id);
        let resp = engine.transaction(request_type, request_type, &payload, &[])?;
        let parsed = payload::FileOpResponse::decode(&resp.structured_payload)?;
        if parsed.error != 0 {
            return Err(Error::DeviceOperationFailed { code: parsed.error });
        }
        Ok(FileGuard {
            engine,
            file_id,
            closed: false,
        })
    }

    pub fn engine_mut(&mut self) -> &mut TransactionEngine<T> {
        self.engine
    }

    /// Explicitly close the file. A non-zero device error is surfaced to
    /// the caller (unlike the best-effort close performed on `Drop`).
    pub fn close(mut self) -> Result<(), Error> {
        self.closed = true;
        close_file(self.engine, self.file_id)
    }
}

impl<'a, T: Transport> Drop for FileGuard<'a, T> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = close_file(self.engine, self.file_id) {
            warn!("best-effort close of file {} failed: {e}", self.file_id);
        }
    }
}

fn close_file<T: Transport>(engine: &mut TransactionEngine<T>, file_id: FileId) -> Result<(), Error> {
    let payload = payload::file_id_request(file_id);
    let resp = engine.transaction(MessageType::CloseFile, MessageType::CloseFile, &payload, &[])?;
    let parsed = payload::FileOpResponse::decode(&resp.structured_payload)?;
    if parsed.error != 0 {
        return Err(Error::DeviceOperationFailed { code: parsed.error });
    }
    Ok(())
}

/// Single-transaction `DeleteFile`.
pub fn delete_file<T: Transport>(engine: &mut TransactionEngine<T>, file_id: FileId) -> Result<(), Error> {
    let payload = payload::file_id_request(file_id);
    let resp = engine.transaction(MessageType::DeleteFile, MessageType::DeleteFile, &payload, &[])?;
    let parsed = payload::FileOpResponse::decode(&resp.structured_payload)?;
    if parsed.error != 0 {
        return Err(Error::DeviceOperationFailed { code: parsed.error });
    }
    Ok(())
}

/// Single-transaction `GetFileSize`. The returned size is a reservation hint
/// only — read termination is driven by short-read, not by this value (spec
/// §4.F).
pub fn get_file_size<T: Transport>(engine: &mut TransactionEngine<T>, file_id: FileId) -> Result<u32, Error> {
    let payload = payload::file_id_request(file_id);
    let resp = engine.transaction(MessageType::GetFileSize, MessageType::GetFileSize, &payload, &[])?;
    let parsed = payload::GetFileSizeResponse::decode(&resp.structured_payload)?;
    if parsed.error != 0 {
        return Err(Error::DeviceOperationFailed { code: parsed.error });
    }
    Ok(parsed.file_size)
}

/// Read a whole file: open, size (as a capacity hint), chunked read until a
/// short read or a zero-length read, close.
pub fn read_file<T: Transport>(
    engine: &mut TransactionEngine<T>,
    profile: &DeviceProfile,
    file_id: FileId,
) -> Result<Vec<u8>, Error> {
    let mut guard = FileGuard::open(engine, file_id, FileOpenMode::Read)?;

    let size_hint = get_file_size(guard.engine_mut(), file_id)?;
    let chunk_size = profile.read_chunk as u32;

    let mut data = Vec::with_capacity(size_hint as usize);
    loop {
        let request_payload = payload::read_file_data_request(file_id, chunk_size);
        let resp = guard.engine_mut().transaction(
            MessageType::ReadFileDataRequest,
            MessageType::ReadFileDataResponse,
            &request_payload,
            &[],
        )?;
        let parsed = payload::ReadFileDataResponse::decode(&resp.structured_payload)?;

        // The trailer's actually-delivered length is authoritative for the
        // data appended; `read_length` is inspected only to decide whether
        // to keep looping (spec §9 open question 2).
        data.extend_from_slice(&resp.trailer);

        let short_read = parsed.read_length < chunk_size;
        let empty_read = parsed.read_length == 0 && resp.trailer.is_empty();
        if short_read || empty_read {
            break;
        }
    }

    guard.close()?;
    Ok(data)
}

/// Write a whole file: open, chunked write of caller-supplied bytes, close.
pub fn write_file<T: Transport>(
    engine: &mut TransactionEngine<T>,
    profile: &DeviceProfile,
    file_id: FileId,
    data: &[u8],
) -> Result<(), Error> {
    let mut guard = FileGuard::open(engine, file_id, FileOpenMode::Write)?;

    let chunk_size = profile.write_chunk;
    let mut written = 0;
    while written < data.len() {
        let end = (written + chunk_size).min(data.len());
        let chunk = &data[written..end];

        let request_payload = payload::write_file_data_request(file_id);
        guard
            .engine_mut()
            .transaction(MessageType::WriteFileData, MessageType::WriteFileData, &request_payload, chunk)?;

        written = end;
    }

    guard.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_mock::MockTransport;

    #[test]
    fn open_failure_does_not_attempt_close() {
        let mut transport = MockTransport::new();
        transport.push_file_op_response(MessageType::OpenFileRead, 2); // file not found
        let mut engine = TransactionEngine::new(transport);

        let err = FileGuard::open(&mut engine, FileId(0x0083_0001), FileOpenMode::Read).unwrap_err();
        assert!(matches!(err, Error::DeviceOperationFailed { code: 2 }));
        assert_eq!(engine.transport().writes_seen(), 1); // only the Open attempt, no Close
    }

    #[test]
    fn read_short_file_in_one_chunk() {
        let mut transport = MockTransport::new();
        transport.push_file_op_response(MessageType::OpenFileRead, 0);
        transport.push_file_size_response(500);
        transport.push_read_response(16, &[0xAB; 16]);
        transport.push_file_op_response(MessageType::CloseFile, 0);

        let mut engine = TransactionEngine::new(transport);
        let profile = DeviceProfile {
            report_size: 256,
            read_chunk: 242,
            write_chunk: 246,
        };
        let data = read_file(&mut engine, &profile, FileId(0x0083_0001)).unwrap();
        assert_eq!(data, vec![0xAB; 16]);
    }
}
