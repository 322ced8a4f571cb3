//! X.509 serial number

use core::fmt::Display;

use sha2::{Digest, Sha256};

use super::compressed::CompressedDate;
use crate::key::PublicKey;

/// [RFC 5280 Section 4.1.2.2.]  Serial Number
///
/// Derived from the subject public key and the compressed issue date, so a
/// device reproduces the same serial on every reconstruction. The two most
/// significant bits are forced to `01`, which keeps the INTEGER positive
/// without a sign pad and makes the derivation recognizable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SerialNumber([u8; Self::LEN]);

impl SerialNumber {
    /// Length in bytes of a derived [`SerialNumber`]
    pub const LEN: usize = 16;

    /// SHA-256 over the raw public key followed by the 3 compressed date bytes,
    /// truncated to [`SerialNumber::LEN`].
    pub fn from_public_key(public_key: &PublicKey, date: &CompressedDate) -> Self {
        let digest = Sha256::new()
            .chain_update(public_key)
            .chain_update(date.to_bytes())
            .finalize();

        let mut bytes = [0u8; Self::LEN];
        bytes.copy_from_slice(&digest[..Self::LEN]);
        bytes[0] = (bytes[0] & 0x7F) | 0x40;
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Display for SerialNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut iter = self.as_bytes().iter().peekable();

        while let Some(byte) = iter.next() {
            match iter.peek() {
                Some(_) => write!(f, "{:02X}:", byte)?,
                None => write!(f, "{:02X}", byte)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use hex_literal::hex;
    use p256::SecretKey;

    // Subject key of the development signer certificate.
    const SIGNER_KEY: [u8; 64] = hex!(
        "B724 DA49 7B97 19D1 B2A6 830C 1F32 A8DE 0608 2446 0BF6 469F 41EB 0FAC F60E AA9F"
        "5F09 1915 6602 A64B 2604 6796 C200 778B 921B DAF3 D747 2E18 FDF2 2C78 2EAF EF65"
    );

    #[test]
    fn matches_issued_serial() {
        let key = PublicKey::try_from(&SIGNER_KEY[..]).unwrap();
        let serial = SerialNumber::from_public_key(&key, &CompressedDate::from_bytes(hex!("85E1E0")));
        assert_eq!(
            serial.as_bytes(),
            &hex!("7FEA C675 C0BA 3338 B9A6 B78D F4D1 1806")
        );
    }

    #[test]
    fn top_bits_are_01() {
        for seed in 1u8..=16 {
            let secret = SecretKey::from_slice(&[seed; 32]).unwrap();
            let key = PublicKey::from(&secret.public_key());
            let date = CompressedDate::from_bytes([seed, seed.wrapping_mul(7), seed ^ 0x5A]);
            let serial = SerialNumber::from_public_key(&key, &date);
            assert_eq!(serial.as_bytes()[0] & 0xC0, 0x40);
        }
    }

    #[test]
    fn depends_on_key_and_date() {
        let key = PublicKey::try_from(&SIGNER_KEY[..]).unwrap();
        let a = SerialNumber::from_public_key(&key, &CompressedDate::from_bytes(hex!("85E1E0")));
        let b = SerialNumber::from_public_key(&key, &CompressedDate::from_bytes(hex!("85E1E1")));
        assert_ne!(a, b);
        assert_eq!(
            a,
            SerialNumber::from_public_key(&key, &CompressedDate::from_bytes(hex!("85E1E0")))
        );
    }

    #[test]
    fn display_colon_separated() {
        let serial = SerialNumber(hex!("40 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E FF"));
        let mut text = heapless::String::<64>::new();
        write!(text, "{}", serial).unwrap();
        assert_eq!(
            text.as_str(),
            "40:01:02:03:04:05:06:07:08:09:0A:0B:0C:0D:0E:FF"
        );
    }
}
