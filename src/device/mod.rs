//! Secure element access.
//!
//! [`SecureElement`] is the contract a transport driver fulfils. [`Memory`]
//! layers the provisioned data layout of a [`SlotMap`] on top of it.

mod soft;

pub use soft::SoftDevice;

use crate::cert::compressed::CompressedCertificate;
use crate::cert::CertRole;
use crate::error::{Error, ErrorKind};
use crate::key::{KeyLayout, PublicKey};
use crate::memory::{Slot, SlotMap};

/// Blocking slot access to a secure element.
///
/// Timeouts and retries belong to the implementation. Failures reported by
/// the device itself are returned as [`Status`](crate::error::Status) errors.
pub trait SecureElement {
    /// Fill `buf` from the start of `slot`.
    fn read_slot(&mut self, slot: Slot, buf: &mut [u8]) -> Result<(), Error>;

    /// Write `data` to the start of `slot`.
    fn write_slot(&mut self, slot: Slot, data: &[u8]) -> Result<(), Error>;

    /// Public key of the private key held in `slot`.
    fn generate_pubkey(&mut self, slot: Slot) -> Result<PublicKey, Error>;
}

impl<T: SecureElement + ?Sized> SecureElement for &mut T {
    fn read_slot(&mut self, slot: Slot, buf: &mut [u8]) -> Result<(), Error> {
        (**self).read_slot(slot, buf)
    }

    fn write_slot(&mut self, slot: Slot, data: &[u8]) -> Result<(), Error> {
        (**self).write_slot(slot, data)
    }

    fn generate_pubkey(&mut self, slot: Slot) -> Result<PublicKey, Error> {
        (**self).generate_pubkey(slot)
    }
}

/// Longest MAC address string read from its slot.
pub const MAX_MAC_ADDRESS_LEN: usize = 32;

/// MAC address as provisioned, typically 12 upper case hex digits.
pub type MacAddress = heapless::String<MAX_MAC_ADDRESS_LEN>;

/// Slot contents staged for reads and writes.
pub type SlotData = heapless::Vec<u8, { Slot::MAX_CAPACITY }>;

/// Offset of the manufacturer key among the top-level public keys.
const MANUFACTURER_KEY_OFFSET: usize = 192;

/// Two P-384 keys and the P-256 manufacturer key.
const TOP_LEVEL_KEYS_LEN: usize = 256;

/// Version of the top-level key set, stored right after the keys.
pub type KeyVersion = [u8; 4];

/// Provisioned data of a secure element.
pub struct Memory<'a, D> {
    pub(crate) device: &'a mut D,
    pub(crate) slots: SlotMap,
}

impl<'a, D> Memory<'a, D>
where
    D: SecureElement,
{
    pub fn new(device: &'a mut D, slots: SlotMap) -> Self {
        Self { device, slots }
    }

    pub fn slots(&self) -> &SlotMap {
        &self.slots
    }

    fn compressed_slot(&self, role: CertRole) -> Slot {
        match role {
            CertRole::Device => self.slots.device_compressed_cert,
            CertRole::Signer => self.slots.signer_compressed_cert,
        }
    }

    pub fn compressed_cert(&mut self, role: CertRole) -> Result<CompressedCertificate, Error> {
        let slot = self.compressed_slot(role);
        let mut cert = CompressedCertificate::zeroed();
        self.device.read_slot(slot, cert.as_mut())?;
        Ok(cert)
    }

    pub fn write_compressed_cert(
        &mut self,
        role: CertRole,
        cert: &CompressedCertificate,
    ) -> Result<(), Error> {
        let slot = self.compressed_slot(role);
        self.device.write_slot(slot, cert.as_ref())
    }

    /// MAC address string, up to the first NUL byte.
    pub fn mac_address(&mut self) -> Result<MacAddress, Error> {
        let slot = self.slots.mac_address;
        let mut buf = [0u8; MAX_MAC_ADDRESS_LEN];
        let len = slot.capacity().min(MAX_MAC_ADDRESS_LEN);
        self.device.read_slot(slot, &mut buf[..len])?;

        let end = buf[..len].iter().position(|b| *b == 0).unwrap_or(len);
        let text = core::str::from_utf8(&buf[..end]).map_err(|_| ErrorKind::BadParam)?;
        let mut mac = MacAddress::new();
        mac.push_str(text).map_err(|()| ErrorKind::SmallBuffer)?;
        Ok(mac)
    }

    pub fn device_public_key(&mut self) -> Result<PublicKey, Error> {
        self.device.generate_pubkey(self.slots.device_private_key)
    }

    pub fn signer_public_key(&mut self, layout: KeyLayout) -> Result<PublicKey, Error> {
        let mut buf = [0u8; 72];
        let stored = buf.get_mut(..layout.len()).ok_or(ErrorKind::SmallBuffer)?;
        self.device.read_slot(self.slots.signer_public_key, stored)?;
        layout.unpack(stored)
    }

    pub fn write_signer_public_key(
        &mut self,
        layout: KeyLayout,
        key: &PublicKey,
    ) -> Result<(), Error> {
        let mut buf = [0u8; 72];
        let len = layout.pack(key, &mut buf)?;
        self.device
            .write_slot(self.slots.signer_public_key, &buf[..len])
    }

    /// Public key of the manufacturer, stored among the top-level keys.
    pub fn manufacturer_public_key(&mut self) -> Result<PublicKey, Error> {
        let mut buf = [0u8; TOP_LEVEL_KEYS_LEN];
        self.device
            .read_slot(self.slots.top_level_public_keys, &mut buf)?;
        PublicKey::try_from(&buf[MANUFACTURER_KEY_OFFSET..])
    }

    /// Version of the provisioned top-level public keys.
    pub fn public_key_version(&mut self) -> Result<KeyVersion, Error> {
        let mut buf = [0u8; TOP_LEVEL_KEYS_LEN + 4];
        self.device
            .read_slot(self.slots.top_level_public_keys, &mut buf)?;
        let mut version = KeyVersion::default();
        version.copy_from_slice(&buf[TOP_LEVEL_KEYS_LEN..]);
        Ok(version)
    }

    fn read_clamped(&mut self, slot: Slot, len: usize) -> Result<SlotData, Error> {
        let mut data = SlotData::new();
        data.resize(len.min(slot.capacity()), 0)
            .map_err(|()| ErrorKind::SmallBuffer)?;
        self.device.read_slot(slot, &mut data)?;
        Ok(data)
    }

    fn write_clamped(&mut self, slot: Slot, data: &[u8]) -> Result<usize, Error> {
        let len = data.len().min(slot.capacity());
        self.device.write_slot(slot, &data[..len])?;
        Ok(len)
    }

    /// Read up to `len` bytes of the PAN key slot.
    pub fn pan_key(&mut self, len: usize) -> Result<SlotData, Error> {
        self.read_clamped(self.slots.pan_key, len)
    }

    /// Store a PAN key, truncated to the slot capacity. Returns the number of
    /// bytes written.
    pub fn store_pan_key(&mut self, key: &[u8]) -> Result<usize, Error> {
        self.write_clamped(self.slots.pan_key, key)
    }

    /// Read up to `len` bytes of application data.
    pub fn application_data(&mut self, len: usize) -> Result<SlotData, Error> {
        self.read_clamped(self.slots.application_data, len)
    }

    /// Store application data, truncated to the slot capacity. Returns the
    /// number of bytes written.
    pub fn store_application_data(&mut self, data: &[u8]) -> Result<usize, Error> {
        self.write_clamped(self.slots.application_data, data)
    }
}
