//! Common name values derived from device data.

use core::fmt::Write;

use crate::error::{Error, ErrorKind};

/// Longest common name any template carries.
pub const MAX_COMMON_NAME_LEN: usize = 64;

/// Staging copy of a common name field.
pub type CommonName = heapless::Vec<u8, MAX_COMMON_NAME_LEN>;

/// Suffix appended to the MAC address to form a device subject name.
pub const DEVICE_NAME_SUFFIX: &str = ".local";

/// Replace the hex signer id that ends `name` with `signer_id`.
///
/// Trailing non-hex characters are skipped, then the run of hex digits in
/// front of them is taken as the id. The id is rewritten in upper case, two
/// digits per byte, starting where the run starts.
pub fn patch_signer_id(name: &mut [u8], signer_id: [u8; 2]) -> Result<(), Error> {
    let mut index = name.len().checked_sub(1).ok_or(ErrorKind::SignerIdNotFound)?;

    while index > 0 && !name[index].is_ascii_hexdigit() {
        index -= 1;
    }
    if index == 0 {
        return Err(ErrorKind::SignerIdNotFound.into());
    }

    while index > 0 && name[index].is_ascii_hexdigit() {
        index -= 1;
    }
    if index == 0 {
        return Err(ErrorKind::SignerIdNotFound.into());
    }

    let mut digits = heapless::String::<4>::new();
    write!(digits, "{:02X}{:02X}", signer_id[0], signer_id[1])
        .map_err(|_| ErrorKind::SmallBuffer)?;

    let start = index + 1;
    let field = name
        .get_mut(start..start + digits.len())
        .ok_or(ErrorKind::SignerIdNotFound)?;
    field.copy_from_slice(digits.as_bytes());
    Ok(())
}

/// Stage the common name found at `field` of a template and patch in the
/// signer id.
pub fn signer_common_name(template_field: &[u8], signer_id: [u8; 2]) -> Result<CommonName, Error> {
    let mut name = CommonName::from_slice(template_field).map_err(|_| ErrorKind::InvalidSize)?;
    patch_signer_id(&mut name, signer_id)?;
    Ok(name)
}

/// Device subject name, the MAC address string followed by `.local`.
pub fn device_common_name(mac_address: &str) -> Result<CommonName, Error> {
    let mut name = CommonName::new();
    name.extend_from_slice(mac_address.as_bytes())
        .and_then(|_| name.extend_from_slice(DEVICE_NAME_SUFFIX.as_bytes()))
        .map_err(|_| ErrorKind::InvalidSize)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patched(name: &str, id: [u8; 2]) -> Result<CommonName, Error> {
        signer_common_name(name.as_bytes(), id)
    }

    #[test]
    fn replaces_trailing_id() {
        let name = patched("Legrand Factory Signer MC A078", [0x12, 0xEF]).unwrap();
        assert_eq!(&name[..], b"Legrand Factory Signer MC 12EF");
    }

    #[test]
    fn id_before_padding() {
        let name = patched("WSLNA Development CA1 Signer 1 0509  ", [0x00, 0x03]).unwrap();
        assert_eq!(&name[..], b"WSLNA Development CA1 Signer 1 0003  ");
    }

    #[test]
    fn same_id_is_identity() {
        let name = patched("WSLNA Development CA 1 Signer 2 0003", [0x00, 0x03]).unwrap();
        assert_eq!(&name[..], b"WSLNA Development CA 1 Signer 2 0003");
    }

    #[test]
    fn hex_letters_in_words_count_as_digits() {
        // "CA" belongs to the run when nothing separates it from the id.
        let name = patched("Signer CA0509", [0xAB, 0xCD]).unwrap();
        assert_eq!(&name[..], b"Signer ABCD09");
    }

    #[test]
    fn id_must_fit_field() {
        assert_eq!(
            patched("Signer 5", [0x00, 0x01]),
            Err(ErrorKind::SignerIdNotFound.into())
        );
    }

    #[test]
    fn scan_walks_off_start() {
        assert_eq!(patched("", [0, 1]), Err(ErrorKind::SignerIdNotFound.into()));
        assert_eq!(
            patched("    ", [0, 1]),
            Err(ErrorKind::SignerIdNotFound.into())
        );
        assert_eq!(
            patched("0509", [0, 1]),
            Err(ErrorKind::SignerIdNotFound.into())
        );
    }

    #[test]
    fn device_name() {
        let name = device_common_name("88A3CC01E110").unwrap();
        assert_eq!(&name[..], b"88A3CC01E110.local");
        assert_eq!(name.len(), 18);
    }

    #[test]
    fn device_name_too_long() {
        let mac = core::str::from_utf8(&[b'A'; MAX_COMMON_NAME_LEN]).unwrap();
        assert_eq!(
            device_common_name(mac),
            Err(ErrorKind::InvalidSize.into())
        );
    }
}
