//! Transport capability (spec §4/§6 [MODULE D]).
//!
//! The core never talks to libusb, hidraw, IOKit, or SetupAPI directly — it
//! consumes this narrow trait and leaves OS-specific HID backends to an
//! external collaborator. A report-driven mock implementing this trait
//! stands in for a real device in this crate's own tests.

use std::error::Error as StdError;

/// Static information about the attached device's HID endpoints, queried
/// once at connect time and used to build a [`crate::profile::DeviceProfile`].
#[derive(Debug, Clone)]
pub struct TransportInfo {
    pub product_id: u16,
    pub serial: Option<String>,
    pub report_in_size: usize,
    pub report_out_size: usize,
}

/// A single-duplex HID interrupt channel. One frame occupies one HID report;
/// the transport never presents bytes as a continuous stream, and at most
/// one transaction may be outstanding at a time (spec §5).
pub trait Transport {
    type Error: StdError + Send + Sync + 'static;

    fn open(&mut self) -> Result<(), Self::Error>;
    fn close(&mut self);
    fn is_open(&self) -> bool;

    /// Write one HID report containing `bytes`, bounded by `timeout_ms`.
    /// Returns the number of bytes actually written.
    fn write(&mut self, bytes: &[u8], timeout_ms: u32) -> Result<usize, Self::Error>;

    /// Read into `buf`, bounded by `timeout_ms`. Returns the number of bytes
    /// actually delivered, which may be fewer than `buf.len()` or zero.
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error>;

    fn info(&self) -> TransportInfo;
}
