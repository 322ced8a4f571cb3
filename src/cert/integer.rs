//! Minimal DER INTEGER encoding of ECDSA signature components.

use crate::error::{Error, ErrorKind};

/// Width of a raw P-256 signature component.
pub const COMPONENT_LEN: usize = 32;

/// Longest value encoding of a component: one sign pad byte plus the component.
pub const MAX_ENCODED_LEN: usize = COMPONENT_LEN + 1;

/// Encode a 32 byte unsigned big-endian integer as the value octets of a DER
/// INTEGER, returning the number of bytes written to `out`.
///
/// Leading zero bytes are stripped, keeping one when the first remaining byte
/// has its high bit set. A component whose own high bit is set gains a zero
/// byte so it is not read back as negative. Zero is rejected, it is never a
/// valid ECDSA scalar.
pub fn encode_unsigned(
    value: &[u8; COMPONENT_LEN],
    out: &mut [u8; MAX_ENCODED_LEN],
) -> Result<usize, Error> {
    if value[0] & 0x80 != 0 {
        out[0] = 0x00;
        out[1..].copy_from_slice(value);
        return Ok(MAX_ENCODED_LEN);
    }

    let zeros = value.iter().take_while(|&&byte| byte == 0).count();
    if zeros == COMPONENT_LEN {
        return Err(ErrorKind::ZeroInteger.into());
    }

    // `zeros > 0` whenever the first significant byte is negative-looking,
    // since a set high bit on value[0] was handled above.
    let start = if value[zeros] & 0x80 != 0 {
        zeros - 1
    } else {
        zeros
    };

    let len = COMPONENT_LEN - start;
    out[..len].copy_from_slice(&value[start..]);
    Ok(len)
}
