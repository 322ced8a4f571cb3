use crate::error::{Error, ErrorKind};
use core::convert::TryFrom;
use generic_array::typenum::U64;
use generic_array::GenericArray;
use p256::elliptic_curve::sec1::ToEncodedPoint;

/// Uncompressed point prefix of SEC1 encoded public keys.
pub const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

// Encapsulates a raw P-256 public key, X followed by Y with no point prefix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PublicKey {
    value: GenericArray<u8, U64>,
}

impl PublicKey {
    pub const LEN: usize = 64;

    pub fn x(&self) -> &[u8] {
        &self.value[..32]
    }

    pub fn y(&self) -> &[u8] {
        &self.value[32..]
    }
}

/// How a public key is laid out when stored in a data slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyLayout {
    /// X then Y, 64 bytes.
    #[default]
    Packed,
    /// Each coordinate behind 4 pad bytes, 72 bytes. Matches the public key
    /// format the device uses for 32 byte block writes.
    Padded,
}

impl KeyLayout {
    const PAD_LEN: usize = 4;

    /// Stored size of a key in this layout.
    pub const fn len(&self) -> usize {
        match self {
            KeyLayout::Packed => PublicKey::LEN,
            KeyLayout::Padded => PublicKey::LEN + 2 * Self::PAD_LEN,
        }
    }

    /// Extract a key from its stored form.
    pub fn unpack(&self, stored: &[u8]) -> Result<PublicKey, Error> {
        let stored = stored.get(..self.len()).ok_or(ErrorKind::InvalidSize)?;
        match self {
            KeyLayout::Packed => PublicKey::try_from(stored),
            KeyLayout::Padded => {
                let mut key = PublicKey::default();
                let (x, y) = stored.split_at(Self::PAD_LEN + 32);
                key.as_mut()[..32].copy_from_slice(&x[Self::PAD_LEN..]);
                key.as_mut()[32..].copy_from_slice(&y[Self::PAD_LEN..]);
                Ok(key)
            }
        }
    }

    /// Write `key` in this layout, pad bytes zeroed. Returns the stored size.
    pub fn pack(&self, key: &PublicKey, stored: &mut [u8]) -> Result<usize, Error> {
        let len = self.len();
        let stored = stored.get_mut(..len).ok_or(ErrorKind::SmallBuffer)?;
        match self {
            KeyLayout::Packed => stored.copy_from_slice(key.as_ref()),
            KeyLayout::Padded => {
                stored.fill(0);
                let (x, y) = stored.split_at_mut(Self::PAD_LEN + 32);
                x[Self::PAD_LEN..].copy_from_slice(key.x());
                y[Self::PAD_LEN..].copy_from_slice(key.y());
            }
        }
        Ok(len)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;
    fn try_from(buffer: &[u8]) -> Result<Self, Self::Error> {
        if buffer.len() != Self::LEN {
            return Err(ErrorKind::BadParam.into());
        }

        let mut value = Self::default();
        value.as_mut().copy_from_slice(buffer);
        Ok(value)
    }
}

impl From<&p256::PublicKey> for PublicKey {
    fn from(key: &p256::PublicKey) -> Self {
        let point = key.to_encoded_point(false);
        let mut value = Self::default();
        // `to_encoded_point(false)` always yields the 65 byte uncompressed form.
        value.as_mut().copy_from_slice(&point.as_bytes()[1..]);
        value
    }
}

impl TryFrom<&PublicKey> for p256::PublicKey {
    type Error = Error;
    fn try_from(key: &PublicKey) -> Result<Self, Self::Error> {
        let mut sec1 = [0u8; 1 + PublicKey::LEN];
        sec1[0] = UNCOMPRESSED_POINT_TAG;
        sec1[1..].copy_from_slice(key.as_ref());
        p256::PublicKey::from_sec1_bytes(&sec1).map_err(|_| ErrorKind::BadParam.into())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.value.as_ref()
    }
}

impl AsMut<[u8]> for PublicKey {
    fn as_mut(&mut self) -> &mut [u8] {
        self.value.as_mut()
    }
}
