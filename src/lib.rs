//! Host-side protocol core for TomTom fitness watch USB HID devices.
//!
//! This crate implements the framed, request/response binary protocol the
//! device speaks over HID interrupt transfers: a typed codec ([`frame`],
//! [`packet`], [`payload`]), a synchronous transaction engine ([`engine`]),
//! and a file-transfer state machine built on top of it ([`file_transfer`],
//! [`directory`], [`commands`]). [`Watch`] ties all of it together behind a
//! single façade.
//!
//! OS-specific HID transports, the CLI front end, activity-file parsing and
//! export, and GPS ephemeris download are all out of scope — this crate
//! consumes a narrow [`Transport`] capability and produces bytes for those
//! downstream consumers.

pub mod commands;
pub mod directory;
pub mod engine;
pub mod error;
pub mod file_id;
pub mod file_transfer;
pub mod frame;
pub mod packet;
pub mod payload;
pub mod profile;
pub mod transport;
mod watch;

#[cfg(test)]
mod test_mock;

pub use engine::{EngineConfig, TransactionEngine};
pub use error::{Error, Result};
pub use file_id::FileId;
pub use file_transfer::{FileGuard, FileOpenMode};
pub use packet::{Direction, MessageType};
pub use profile::DeviceProfile;
pub use transport::{Transport, TransportInfo};
pub use watch::Watch;
