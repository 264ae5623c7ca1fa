//! `Watch` — the crate's top-level entry point (spec §9 "Product-specific
//! parameters"; grounded on `original_source`'s `Watch`/`Manager` types,
//! which wrap a `PacketHandler` the same way).
//!
//! Owns a [`TransactionEngine`] plus the [`DeviceProfile`] resolved from the
//! device's product id at connect time, and exposes every command-façade
//! operation (spec §4.F, §4.G, §4.H) as an inherent method so a caller never
//! touches the transaction engine directly.

use crate::commands;
use crate::directory::{self, FileListing};
use crate::engine::{EngineConfig, TransactionEngine};
use crate::error::Error;
use crate::file_id::FileId;
use crate::file_transfer;
use crate::profile::DeviceProfile;
use crate::transport::Transport;

pub struct Watch<T: Transport> {
    engine: TransactionEngine<T>,
    profile: DeviceProfile,
}

impl<T: Transport> Watch<T> {
    /// Connect to an already-open transport, query its product id, and
    /// resolve the matching [`DeviceProfile`].
    pub fn connect(transport: T) -> Result<Self, Error> {
        Self::connect_with_config(transport, EngineConfig::default())
    }

    pub fn connect_with_config(transport: T, config: EngineConfig) -> Result<Self, Error> {
        let mut engine = TransactionEngine::with_config(transport, config);
        let product_id = commands::get_product_id(&mut engine)?;
        let profile = DeviceProfile::for_product_id(product_id);
        Ok(Watch { engine, profile })
    }

    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    pub fn engine_mut(&mut self) -> &mut TransactionEngine<T> {
        &mut self.engine
    }

    // -- Device query & control (spec §4.H) --------------------------------

    pub fn get_watch_time(&mut self) -> Result<u32, Error> {
        commands::get_watch_time(&mut self.engine)
    }

    pub fn get_firmware_version(&mut self) -> Result<String, Error> {
        commands::get_firmware_version(&mut self.engine)
    }

    pub fn get_ble_version(&mut self) -> Result<String, Error> {
        commands::get_ble_version(&mut self.engine)
    }

    pub fn get_product_id(&mut self) -> Result<u32, Error> {
        commands::get_product_id(&mut self.engine)
    }

    /// Erase all user data. `confirmed` must be `true`, or this returns
    /// `Error::InvalidArgument` without contacting the device — the core's
    /// way of making the caller gate this destructive operation explicitly
    /// (spec §4.H).
    pub fn format_watch(&mut self, confirmed: bool) -> Result<(), Error> {
        if !confirmed {
            return Err(Error::InvalidArgument(
                "format_watch erases all user data; call with confirmed = true".into(),
            ));
        }
        commands::format_watch(&mut self.engine)
    }

    pub fn reset_device(&mut self) -> Result<(), Error> {
        commands::reset_device(&mut self.engine)
    }

    pub fn reset_gps_processor(&mut self) -> Result<String, Error> {
        commands::reset_gps_processor(&mut self.engine)
    }

    // -- Directory enumeration (spec §4.G) ---------------------------------

    pub fn file_listing(&mut self) -> FileListing<'_, T> {
        FileListing::new(&mut self.engine)
    }

    pub fn list_files(&mut self) -> Result<Vec<(FileId, u32)>, Error> {
        directory::list_files(&mut self.engine)
    }

    // -- File transfer (spec §4.F) ------------------------------------------

    pub fn read_file(&mut self, file_id: FileId) -> Result<Vec<u8>, Error> {
        let profile = self.profile;
        file_transfer::read_file(&mut self.engine, &profile, file_id)
    }

    pub fn write_file(&mut self, file_id: FileId, data: &[u8]) -> Result<(), Error> {
        let profile = self.profile;
        file_transfer::write_file(&mut self.engine, &profile, file_id, data)
    }

    pub fn delete_file(&mut self, file_id: FileId) -> Result<(), Error> {
        file_transfer::delete_file(&mut self.engine, file_id)
    }

    pub fn get_file_size(&mut self, file_id: FileId) -> Result<u32, Error> {
        file_transfer::get_file_size(&mut self.engine, file_id)
    }
}
