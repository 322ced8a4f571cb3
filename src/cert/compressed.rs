//! Compressed certificate format for ATECC devices
//!
//! This module implements the 72-byte compressed certificate format as
//! defined in Microchip's Application Note (Atmel-8974).
//!
//! The compressed format stores only the dynamic parts of a certificate:
//! - Signature (64 bytes: R + S)
//! - Encoded date (3 bytes)
//! - Signer ID (2 bytes)
//! - Template ID and chain ID (1 byte)
//! - Serial number source and format version (1 byte)
//! - Reserved (1 byte)

use bitfield_struct::bitfield;
use der::DateTime;
use p256::ecdsa::{DerSignature, Signature};

use super::integer::COMPONENT_LEN;
use super::time::Validity;
use crate::error::{Error, ErrorKind};

/// 3-byte date encoding per Microchip format
///
/// Layout (24 bits total, big-endian, most significant field first):
/// - Year (5 bits, years since 2000)
/// - Month (4 bits)
/// - Day (5 bits)
/// - Hour (5 bits)
/// - Expire years (5 bits, 0 for no expiration)
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct CompressedDate {
    #[bits(5)]
    pub expire_years: u8,
    #[bits(5)]
    pub hour: u8,
    #[bits(5)]
    pub day: u8,
    #[bits(4)]
    pub month: u8,
    #[bits(5)]
    pub year: u8,
    #[bits(8)]
    __: u8,
}

impl CompressedDate {
    /// Base year for compressed date encoding
    pub const BASE_YEAR: u16 = 2000;

    /// Maximum year offset and validity period (5 bits)
    pub const MAX_YEARS: u8 = 31;

    /// Create from the 3 stored bytes
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_bits(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Convert to the 3 stored bytes
    pub fn to_bytes(&self) -> [u8; 3] {
        let raw = self.into_bits().to_be_bytes();
        [raw[1], raw[2], raw[3]]
    }

    /// Compress an issue date. Minutes and seconds are dropped.
    pub fn from_issue_date(issue: &DateTime, expire_years: u8) -> Result<Self, Error> {
        let year = issue
            .year()
            .checked_sub(Self::BASE_YEAR)
            .filter(|offset| *offset <= Self::MAX_YEARS as u16)
            .ok_or(ErrorKind::InvalidDate)?;

        if expire_years > Self::MAX_YEARS {
            return Err(ErrorKind::InvalidDate.into());
        }

        Ok(Self::new()
            .with_year(year as u8)
            .with_month(issue.month())
            .with_day(issue.day())
            .with_hour(issue.hour())
            .with_expire_years(expire_years))
    }

    /// Expand into the certificate validity period.
    ///
    /// The expiry shares month, day and hour with the issue date, with the
    /// day clamped to the end of the expiry month (Feb 29 expires on Feb 28
    /// in a common year). A zero
    /// validity period means the certificate never expires, which RFC 5280
    /// spells as 9999-12-31 23:59:59.
    pub fn validity(&self) -> Result<Validity, Error> {
        let issue_year = Self::BASE_YEAR + self.year() as u16;
        let not_before = DateTime::new(issue_year, self.month(), self.day(), self.hour(), 0, 0)
            .map_err(|_| ErrorKind::InvalidDate)?;

        let not_after = match self.expire_years() {
            0 => DateTime::new(9999, 12, 31, 23, 59, 59),
            years => {
                let expire_year = issue_year + years as u16;
                let day = self.day().min(days_in_month(expire_year, self.month()));
                DateTime::new(expire_year, self.month(), day, self.hour(), 0, 0)
            }
        }
        .map_err(|_| ErrorKind::InvalidDate)?;

        Ok(Validity {
            not_before,
            not_after,
        })
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
    match month {
        2 if leap => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Template and chain selector byte.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct TemplateChain {
    #[bits(4)]
    pub chain_id: u8,
    #[bits(4)]
    pub template_id: u8,
}

/// Serial number source and compressed format version byte.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct SerialFormat {
    #[bits(4)]
    pub format_version: u8,
    #[bits(4)]
    pub serial_source: u8,
}

/// Source of certificate serial number
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SerialSource {
    /// Serial is stored in a slot on the device
    Stored = 0x0,
    /// Serial is stored in a slot, with dynamic length
    StoredDynamic = 0x1,
    /// Serial is 0x40 | device_sn[0..9] (device certificates only)
    DeviceSerial = 0x8,
    /// Serial is 0x40 | signer_id[0..2] (signer certificates only)
    SignerId = 0x9,
    /// Serial is SHA256(subject public key + encoded dates) with upper 2 bits = 01
    PubKeyHash = 0xA,
    /// Serial is SHA256(device SN + encoded dates) with upper 2 bits = 01
    DeviceSerialHash = 0xB,
}

impl SerialSource {
    pub fn from_u8(source: u8) -> Option<Self> {
        use SerialSource::*;
        [Stored, StoredDynamic, DeviceSerial, SignerId, PubKeyHash, DeviceSerialHash]
            .into_iter()
            .find(|candidate| *candidate as u8 == source)
    }
}

/// 72-byte compressed certificate stored on device
///
/// Layout:
/// - Bytes 0-31: Signature R component
/// - Bytes 32-63: Signature S component
/// - Bytes 64-66: Compressed date (3 bytes)
/// - Bytes 67-68: Signer ID (2 bytes)
/// - Byte 69: Template ID (high nibble) and chain ID (low nibble)
/// - Byte 70: Serial number source (high nibble) and format version (low nibble)
/// - Byte 71: Reserved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressedCertificate {
    data: [u8; Self::SIZE],
}

impl CompressedCertificate {
    /// Total size of compressed certificate in bytes
    pub const SIZE: usize = 72;

    const SIG_R_OFFSET: usize = 0;
    const SIG_S_OFFSET: usize = 32;
    const DATE_OFFSET: usize = 64;
    const SIGNER_ID_OFFSET: usize = 67;
    const TEMPLATE_CHAIN_OFFSET: usize = 69;
    const SERIAL_FORMAT_OFFSET: usize = 70;

    /// Create a new compressed certificate from raw data
    pub fn new(data: [u8; Self::SIZE]) -> Self {
        Self { data }
    }

    /// Create a zeroed compressed certificate
    pub fn zeroed() -> Self {
        Self {
            data: [0u8; Self::SIZE],
        }
    }

    /// Get the signature R component (32 bytes)
    pub fn signature_r(&self) -> &[u8] {
        &self.data[Self::SIG_R_OFFSET..Self::SIG_S_OFFSET]
    }

    /// Get the signature S component (32 bytes)
    pub fn signature_s(&self) -> &[u8] {
        &self.data[Self::SIG_S_OFFSET..Self::DATE_OFFSET]
    }

    /// Set the signature from R and S components
    pub fn set_signature(&mut self, r: &[u8; COMPONENT_LEN], s: &[u8; COMPONENT_LEN]) {
        self.data[Self::SIG_R_OFFSET..Self::SIG_S_OFFSET].copy_from_slice(r);
        self.data[Self::SIG_S_OFFSET..Self::DATE_OFFSET].copy_from_slice(s);
    }

    /// Convert the stored components into a signature
    pub fn signature(&self) -> Result<Signature, Error> {
        Signature::from_slice(&self.data[Self::SIG_R_OFFSET..Self::DATE_OFFSET])
            .map_err(|_| ErrorKind::BadParam.into())
    }

    /// Convert the stored signature to a DER-encoded signature
    pub fn to_der_signature(&self) -> Result<DerSignature, Error> {
        Ok(self.signature()?.to_der())
    }

    /// Set the signature from a DER-encoded signature
    pub fn set_signature_from_der(&mut self, sig: &DerSignature) -> Result<(), Error> {
        let signature =
            Signature::from_der(sig.as_bytes()).map_err(|_| ErrorKind::BadParam)?;
        self.data[Self::SIG_R_OFFSET..Self::DATE_OFFSET].copy_from_slice(&signature.to_bytes());
        Ok(())
    }

    /// Get the encoded date
    pub fn encoded_date(&self) -> CompressedDate {
        let d = &self.data[Self::DATE_OFFSET..Self::SIGNER_ID_OFFSET];
        CompressedDate::from_bytes([d[0], d[1], d[2]])
    }

    /// Set the encoded date
    pub fn set_encoded_date(&mut self, date: CompressedDate) {
        self.data[Self::DATE_OFFSET..Self::SIGNER_ID_OFFSET].copy_from_slice(&date.to_bytes());
    }

    /// Get the signer ID bytes, in the order they are printed
    pub fn signer_id(&self) -> [u8; 2] {
        [
            self.data[Self::SIGNER_ID_OFFSET],
            self.data[Self::SIGNER_ID_OFFSET + 1],
        ]
    }

    /// Set the signer ID
    pub fn set_signer_id(&mut self, id: [u8; 2]) {
        self.data[Self::SIGNER_ID_OFFSET..Self::TEMPLATE_CHAIN_OFFSET].copy_from_slice(&id);
    }

    pub fn template_chain(&self) -> TemplateChain {
        TemplateChain::from_bits(self.data[Self::TEMPLATE_CHAIN_OFFSET])
    }

    pub fn set_template_chain(&mut self, selector: TemplateChain) {
        self.data[Self::TEMPLATE_CHAIN_OFFSET] = selector.into_bits();
    }

    /// Get the template ID
    pub fn template_id(&self) -> u8 {
        self.template_chain().template_id()
    }

    /// Get the chain ID
    pub fn chain_id(&self) -> u8 {
        self.template_chain().chain_id()
    }

    pub fn serial_format(&self) -> SerialFormat {
        SerialFormat::from_bits(self.data[Self::SERIAL_FORMAT_OFFSET])
    }

    pub fn set_serial_format(&mut self, format: SerialFormat) {
        self.data[Self::SERIAL_FORMAT_OFFSET] = format.into_bits();
    }

    /// Get the serial number source, if it is a known one
    pub fn serial_source(&self) -> Option<SerialSource> {
        SerialSource::from_u8(self.serial_format().serial_source())
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.data
    }
}

impl Default for CompressedCertificate {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl AsRef<[u8]> for CompressedCertificate {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for CompressedCertificate {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl TryFrom<&[u8]> for CompressedCertificate {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != Self::SIZE {
            return Err(ErrorKind::InvalidSize.into());
        }
        let mut data = [0u8; Self::SIZE];
        data.copy_from_slice(bytes);
        Ok(Self { data })
    }
}
