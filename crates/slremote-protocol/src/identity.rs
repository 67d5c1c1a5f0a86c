//! Universal SysEx device inquiry, used to confirm the SL MkIII sits
//! behind a detected port pair.

/// Identity request to all devices.
pub const IDENTITY_REQUEST: [u8; 6] = [0xF0, 0x7E, 0x7F, 0x06, 0x01, 0xF7];

pub const MANUFACTURER_ID: [u8; 3] = [0x00, 0x20, 0x29];
pub const FAMILY_CODE: [u8; 2] = [0x01, 0x01];
pub const MODEL_CODE: [u8; 2] = [0x00, 0x00];

/// Parsed identity reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub manufacturer: [u8; 3],
    pub family: [u8; 2],
    pub model: [u8; 2],
    pub version: [u8; 4],
}

impl Identity {
    /// Parse `F0 7E <device> 06 02 <mfr:3> <family:2> <model:2> <version:4> F7`.
    ///
    /// Only three-byte manufacturer ids are accepted.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 17 || bytes[16] != 0xF7 {
            return None;
        }
        if bytes[0] != 0xF0 || bytes[1] != 0x7E || bytes[3] != 0x06 || bytes[4] != 0x02 {
            return None;
        }
        if bytes[5] != 0x00 {
            return None;
        }
        Some(Self {
            manufacturer: [bytes[5], bytes[6], bytes[7]],
            family: [bytes[8], bytes[9]],
            model: [bytes[10], bytes[11]],
            version: [bytes[12], bytes[13], bytes[14], bytes[15]],
        })
    }

    pub fn is_sl_mk3(&self) -> bool {
        self.manufacturer == MANUFACTURER_ID && self.family == FAMILY_CODE && self.model == MODEL_CODE
    }
}
