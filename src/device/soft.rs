use p256::SecretKey;

use super::SecureElement;
use crate::error::{Error, ErrorKind, Status};
use crate::key::PublicKey;
use crate::memory::Slot;

const SLOT_COUNT: usize = 16;
const KEY_SLOT_COUNT: usize = 8;

/// In-memory secure element with the ATECC508A data zone geometry.
///
/// Key slots hold only the public half of their key pair. Reads of selected
/// slots can be made to fail the way a locked or unreadable slot would.
#[derive(Clone, Debug)]
pub struct SoftDevice {
    slots: [[u8; Slot::MAX_CAPACITY]; SLOT_COUNT],
    keys: [Option<PublicKey>; KEY_SLOT_COUNT],
    read_faults: u16,
}

impl SoftDevice {
    pub fn new() -> Self {
        Self {
            slots: [[0u8; Slot::MAX_CAPACITY]; SLOT_COUNT],
            keys: [None; KEY_SLOT_COUNT],
            read_faults: 0,
        }
    }

    /// Load a P-256 private key, given as a 32 byte big endian scalar, into a
    /// key slot.
    pub fn set_private_key(&mut self, slot: Slot, scalar: &[u8]) -> Result<(), Error> {
        let secret = SecretKey::from_slice(scalar).map_err(|_| ErrorKind::BadParam)?;
        self.set_public_key(slot, PublicKey::from(&secret.public_key()))
    }

    /// Pretend a key slot holds the key pair of `key`.
    pub fn set_public_key(&mut self, slot: Slot, key: PublicKey) -> Result<(), Error> {
        if !slot.is_private_key() {
            return Err(ErrorKind::BadParam.into());
        }
        self.keys[slot.index()] = Some(key);
        Ok(())
    }

    /// Fail every following read of `slot` with an execution error.
    pub fn fail_reads(&mut self, slot: Slot) {
        self.read_faults |= 1 << slot.index();
    }

    /// Raw contents of `slot`.
    pub fn slot(&self, slot: Slot) -> &[u8] {
        &self.slots[slot.index()][..slot.capacity()]
    }
}

impl Default for SoftDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureElement for SoftDevice {
    fn read_slot(&mut self, slot: Slot, buf: &mut [u8]) -> Result<(), Error> {
        if self.read_faults & (1 << slot.index()) != 0 {
            return Err(Status::Execution.into());
        }
        let data = self
            .slot(slot)
            .get(..buf.len())
            .ok_or(ErrorKind::BadParam)?;
        buf.copy_from_slice(data);
        Ok(())
    }

    fn write_slot(&mut self, slot: Slot, data: &[u8]) -> Result<(), Error> {
        if data.len() > slot.capacity() {
            return Err(ErrorKind::BadParam.into());
        }
        self.slots[slot.index()][..data.len()].copy_from_slice(data);
        Ok(())
    }

    fn generate_pubkey(&mut self, slot: Slot) -> Result<PublicKey, Error> {
        if !slot.is_private_key() {
            return Err(ErrorKind::BadParam.into());
        }
        self.keys[slot.index()].ok_or_else(|| Status::Execution.into())
    }
}
