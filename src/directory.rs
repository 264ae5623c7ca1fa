//! Directory enumerator (spec §4.G [MODULE G]).
//!
//! `FindFirstFile`/`FindNextFile` walked as a plain Rust [`Iterator`] — the
//! idiomatic shape for spec.md's "lazy sequence... finite, not restartable
//! without a new enumeration."

use crate::engine::TransactionEngine;
use crate::error::Error;
use crate::file_id::FileId;
use crate::packet::MessageType;
use crate::payload;
use crate::transport::Transport;

/// Walks the device's file directory one `find-first`/`find-next`
/// transaction at a time. Stops the first time a response's `end_of_list`
/// flag is set — that response's entry is not yielded. A transaction
/// failure mid-enumeration ends the iterator with that error as the final
/// item; the device implicitly closes its iterator on the next
/// non-enumeration command, so there is no explicit find-close here.
pub struct FileListing<'a, T: Transport> {
    engine: &'a mut TransactionEngine<T>,
    started: bool,
    done: bool,
}

impl<'a, T: Transport> FileListing<'a, T> {
    pub fn new(engine: &'a mut TransactionEngine<T>) -> Self {
        FileListing {
            engine,
            started: false,
            done: false,
        }
    }
}

impl<'a, T: Transport> Iterator for FileListing<'a, T> {
    type Item = Result<(FileId, u32), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = if !self.started {
            self.started = true;
            let payload = payload::find_first_file_request();
            self.engine
                .transaction(MessageType::FindFirstFile, MessageType::FindFirstFile, &payload, &[])
        } else {
            self.engine
                .transaction(MessageType::FindNextFile, MessageType::FindNextFile, &[], &[])
        };

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        let entry = match payload::FindEntryResponse::decode(&response.structured_payload) {
            Ok(e) => e,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        if entry.end_of_list {
            self.done = true;
            return None;
        }

        Some(Ok((entry.file_id, entry.file_size)))
    }
}

/// Collect the whole directory listing, stopping at the first failure.
pub fn list_files<T: Transport>(engine: &mut TransactionEngine<T>) -> Result<Vec<(FileId, u32)>, Error> {
    FileListing::new(engine).collect()
}
