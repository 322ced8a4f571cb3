use super::error::{Error, ErrorKind};

/// Data zone slots of the secure element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    /// Slots 0 through 7 contain 36 bytes each.
    Slot00 = 0x00,
    Slot01 = 0x01,
    Slot02 = 0x02,
    Slot03 = 0x03,
    Slot04 = 0x04,
    Slot05 = 0x05,
    Slot06 = 0x06,
    Slot07 = 0x07,
    /// Slot 8 contains 416 bytes.
    Slot08 = 0x08,
    /// Slots 9 through 15 contain 72 bytes each.
    Slot09 = 0x09,
    Slot10 = 0x0a,
    Slot11 = 0x0b,
    Slot12 = 0x0c,
    Slot13 = 0x0d,
    Slot14 = 0x0e,
    Slot15 = 0x0f,
}

impl Slot {
    /// Largest slot capacity in bytes.
    pub const MAX_CAPACITY: usize = 416;

    const ALL: [Slot; 16] = [
        Slot::Slot00,
        Slot::Slot01,
        Slot::Slot02,
        Slot::Slot03,
        Slot::Slot04,
        Slot::Slot05,
        Slot::Slot06,
        Slot::Slot07,
        Slot::Slot08,
        Slot::Slot09,
        Slot::Slot10,
        Slot::Slot11,
        Slot::Slot12,
        Slot::Slot13,
        Slot::Slot14,
        Slot::Slot15,
    ];

    pub fn from_index(index: u8) -> Result<Self, Error> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| ErrorKind::BadParam.into())
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Check if a slot can contain private keys.
    pub fn is_private_key(&self) -> bool {
        *self as u16 <= Self::Slot07 as u16
    }

    /// Number of bytes the slot holds.
    pub fn capacity(&self) -> usize {
        match self {
            slot if slot.is_private_key() => 36,
            Slot::Slot08 => 416,
            _ => 72,
        }
    }
}

/// Where each piece of provisioned data lives on the secure element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotMap {
    pub device_private_key: Slot,
    pub pan_key: Slot,
    pub mac_address: Slot,
    /// Manufacturer and top-level public keys.
    pub top_level_public_keys: Slot,
    pub signer_public_key: Slot,
    pub signer_compressed_cert: Slot,
    pub device_compressed_cert: Slot,
    pub application_data: Slot,
}

impl SlotMap {
    /// Slot assignment of production devices.
    pub const fn production() -> Self {
        Self {
            device_private_key: Slot::Slot00,
            pan_key: Slot::Slot01,
            mac_address: Slot::Slot04,
            top_level_public_keys: Slot::Slot08,
            signer_public_key: Slot::Slot09,
            signer_compressed_cert: Slot::Slot10,
            device_compressed_cert: Slot::Slot11,
            application_data: Slot::Slot15,
        }
    }

    /// Slot assignment of parts provisioned with the earlier configuration,
    /// which keeps certificates and identity data in the upper 72 byte slots.
    pub const fn alternate() -> Self {
        Self {
            device_private_key: Slot::Slot00,
            pan_key: Slot::Slot14,
            mac_address: Slot::Slot13,
            top_level_public_keys: Slot::Slot08,
            signer_public_key: Slot::Slot11,
            signer_compressed_cert: Slot::Slot12,
            device_compressed_cert: Slot::Slot10,
            application_data: Slot::Slot15,
        }
    }
}

impl Default for SlotMap {
    fn default() -> Self {
        Self::production()
    }
}
