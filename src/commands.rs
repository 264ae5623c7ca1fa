//! Device query & control commands (spec §4.H [MODULE H]).
//!
//! Each of these is a single transaction over the transaction engine; none
//! of them requires an open file handle.

use log::{debug, info, warn};

use crate::engine::TransactionEngine;
use crate::error::Error;
use crate::packet::MessageType;
use crate::payload;
use crate::transport::Transport;

fn ascii_trailer(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Seconds since the UNIX epoch, as reported by the watch.
pub fn get_watch_time<T: Transport>(engine: &mut TransactionEngine<T>) -> Result<u32, Error> {
    debug!("requesting watch time");
    let resp = engine.transaction(MessageType::GetWatchTime, MessageType::GetWatchTime, &[], &[])?;
    let parsed = payload::GetWatchTimeResponse::decode(&resp.structured_payload)?;
    Ok(parsed.time)
}

pub fn get_firmware_version<T: Transport>(engine: &mut TransactionEngine<T>) -> Result<String, Error> {
    debug!("requesting firmware version");
    let resp = engine.transaction(MessageType::GetFirmwareVersion, MessageType::GetFirmwareVersion, &[], &[])?;
    let version = ascii_trailer(&resp.trailer);
    debug!("firmware version: {version}");
    Ok(version)
}

pub fn get_ble_version<T: Transport>(engine: &mut TransactionEngine<T>) -> Result<String, Error> {
    debug!("requesting BLE version");
    let resp = engine.transaction(MessageType::GetBleVersion, MessageType::GetBleVersion, &[], &[])?;
    let version = ascii_trailer(&resp.trailer);
    debug!("BLE version: {version}");
    Ok(version)
}

pub fn get_product_id<T: Transport>(engine: &mut TransactionEngine<T>) -> Result<u32, Error> {
    debug!("requesting product id");
    let resp = engine.transaction(MessageType::GetProductId, MessageType::GetProductId, &[], &[])?;
    let parsed = payload::GetProductIdResponse::decode(&resp.structured_payload)?;
    debug!("product id: 0x{:08X}", parsed.product_id);
    Ok(parsed.product_id)
}

/// Erase all user data on the device. Destructive — callers must gate this
/// with their own confirmation step; this function performs none.
pub fn format_watch<T: Transport>(engine: &mut TransactionEngine<T>) -> Result<(), Error> {
    warn!("formatting watch - this will erase all user data");
    let resp = engine.transaction(MessageType::FormatWatch, MessageType::FormatWatch, &[], &[])?;
    let parsed = payload::FormatWatchResponse::decode(&resp.structured_payload)?;
    if parsed.error != 0 {
        return Err(Error::DeviceOperationFailed { code: parsed.error });
    }
    info!("watch formatted successfully");
    Ok(())
}

/// Send-only: the device reboots without sending a response (spec §9 open
/// question 3 — matches source behavior, no response awaited).
pub fn reset_device<T: Transport>(engine: &mut TransactionEngine<T>) -> Result<(), Error> {
    info!("sending device reset command");
    engine.send(MessageType::ResetDevice, &[], &[])?;
    Ok(())
}

pub fn reset_gps_processor<T: Transport>(engine: &mut TransactionEngine<T>) -> Result<String, Error> {
    info!("resetting GPS processor");
    let resp = engine.transaction(MessageType::ResetGpsProcessor, MessageType::ResetGpsProcessor, &[], &[])?;
    let message = ascii_trailer(&resp.trailer);
    info!("GPS processor reset complete: {message}");
    Ok(message)
}
