//! Product-dependent wire-framing and chunking parameters (spec §4.F, §9
//! "Product-specific parameters").
//!
//! Grouping these into a single value selected once at connect time avoids
//! branching on the product id through the rest of the file-transfer code.

/// The product code of the `0x7474` variant, which uses a smaller HID report
/// and correspondingly smaller file-transfer chunks than every other known
/// variant.
pub const COMPACT_REPORT_PRODUCT_ID: u32 = 0x7474;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Size in bytes of one HID report on this device.
    pub report_size: usize,
    /// Maximum file-data bytes the device accepts in a single
    /// `ReadFileDataResponse` trailer.
    pub read_chunk: usize,
    /// Maximum file-data bytes the device accepts in a single
    /// `WriteFileData` request trailer.
    pub write_chunk: usize,
}

impl DeviceProfile {
    const COMPACT: DeviceProfile = DeviceProfile {
        report_size: 64,
        read_chunk: 50,
        write_chunk: 54,
    };

    const STANDARD: DeviceProfile = DeviceProfile {
        report_size: 256,
        read_chunk: 242,
        write_chunk: 246,
    };

    /// Select the profile for a device by its product id.
    pub fn for_product_id(product_id: u32) -> DeviceProfile {
        if product_id == COMPACT_REPORT_PRODUCT_ID {
            DeviceProfile::COMPACT
        } else {
            DeviceProfile::STANDARD
        }
    }
}

impl Default for DeviceProfile {
    /// The standard (non-`0x7474`) profile, used until a product id has been
    /// queried from the device.
    fn default() -> Self {
        DeviceProfile::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_variant_selected_by_product_id() {
        let profile = DeviceProfile::for_product_id(0x7474);
        assert_eq!(profile.read_chunk, 50);
        assert_eq!(profile.write_chunk, 54);
        assert_eq!(profile.report_size, 64);
    }

    #[test]
    fn other_product_ids_get_standard_profile() {
        let profile = DeviceProfile::for_product_id(0x1234);
        assert_eq!(profile.read_chunk, 242);
        assert_eq!(profile.write_chunk, 246);
    }
}
