//! Signature block assembly and the length fields that depend on it.
//!
//! The template ends with
//!
//! ```text
//! BIT STRING {
//!     unused bits (0)
//!     SEQUENCE { INTEGER r, INTEGER s }
//! }
//! ```
//!
//! R and S are re-encoded as minimal DER INTEGERs, so the signature block
//! changes size with every signature. The BIT STRING length, the inner
//! SEQUENCE length and the outer certificate length are rewritten to match.

use der::Tag;

use super::element::{ElementId, ElementTable};
use super::integer::{encode_unsigned, COMPONENT_LEN, MAX_ENCODED_LEN};
use crate::error::{Error, ErrorKind};

/// Tag and single byte length octets.
const HEADER_LEN: usize = 2;

/// Long form length marker for a two byte length.
const LONG_LENGTH_2: u8 = 0x82;

/// Size of the outer certificate tag and length octets.
pub const OUTER_HEADER_LEN: usize = 4;

/// Length of an INTEGER TLV whose value is `value_len` bytes.
pub const fn encoded_integer_len(value_len: usize) -> usize {
    HEADER_LEN + value_len
}

/// Content length of `SEQUENCE { INTEGER r, INTEGER s }`.
pub const fn signature_sequence_len(r_len: usize, s_len: usize) -> usize {
    encoded_integer_len(r_len) + encoded_integer_len(s_len)
}

/// Content length of the signature BIT STRING: the unused-bits byte followed
/// by the SEQUENCE TLV.
pub const fn bit_string_len(sequence_len: usize) -> usize {
    1 + HEADER_LEN + sequence_len
}

/// Total certificate size when the signature BIT STRING starts at
/// `bit_string_offset` and ends the certificate.
pub const fn certificate_len(bit_string_offset: usize, bit_string_len: usize) -> usize {
    bit_string_offset + HEADER_LEN + bit_string_len
}

/// Content length of the outer certificate SEQUENCE.
pub const fn certificate_content_len(certificate_len: usize) -> usize {
    certificate_len - OUTER_HEADER_LEN
}

fn component<'a>(
    table: &ElementTable<'a>,
    id: ElementId,
) -> Result<&'a [u8; COMPONENT_LEN], Error> {
    table
        .value(id)
        .ok_or(ErrorKind::BadParam)?
        .try_into()
        .map_err(|_| ErrorKind::InvalidSize.into())
}

/// Write the raw R and S components held by `table` into `cert` and fix up
/// the BIT STRING and SEQUENCE lengths around them.
///
/// Returns the total length of the certificate, which ends with the
/// signature. The outer length is left for [`set_certificate_length`].
pub fn store_signature(cert: &mut [u8], table: &ElementTable<'_>) -> Result<usize, Error> {
    let bit_string = table.get(ElementId::SignatureBitString).location.start();
    let r_offset = table.get(ElementId::SignatureR).location.start();

    let mut r = [0u8; MAX_ENCODED_LEN];
    let r_len = encode_unsigned(component(table, ElementId::SignatureR)?, &mut r)?;
    let mut s = [0u8; MAX_ENCODED_LEN];
    let s_len = encode_unsigned(component(table, ElementId::SignatureS)?, &mut s)?;

    let sequence_len = signature_sequence_len(r_len, s_len);
    let bit_string_len = bit_string_len(sequence_len);
    let total = certificate_len(bit_string, bit_string_len);

    if r_offset != bit_string + HEADER_LEN + 1 + HEADER_LEN + HEADER_LEN {
        return Err(ErrorKind::TagMismatch.into());
    }
    if cert.len() < total {
        return Err(ErrorKind::SmallBuffer.into());
    }
    if cert[bit_string] != Tag::BitString.octet() {
        error!("no BIT STRING at signature offset {}", bit_string);
        return Err(ErrorKind::TagMismatch.into());
    }
    let sequence = bit_string + HEADER_LEN + 1;
    if cert[sequence] != Tag::Sequence.octet() {
        error!("no SEQUENCE at signature offset {}", sequence);
        return Err(ErrorKind::TagMismatch.into());
    }

    cert[r_offset - 1] = r_len as u8;
    cert[r_offset..r_offset + r_len].copy_from_slice(&r[..r_len]);

    let s_header = r_offset + r_len;
    cert[s_header] = Tag::Integer.octet();
    cert[s_header + 1] = s_len as u8;
    let s_offset = s_header + HEADER_LEN;
    cert[s_offset..s_offset + s_len].copy_from_slice(&s[..s_len]);

    cert[bit_string + 1] = bit_string_len as u8;
    cert[sequence + 1] = sequence_len as u8;

    debug!(
        "signature block r {} s {} bytes, certificate {} bytes",
        r_len, s_len, total
    );
    Ok(total)
}

/// Rewrite the outer certificate length for a certificate of `total` bytes.
pub fn set_certificate_length(cert: &mut [u8], total: usize) -> Result<(), Error> {
    if cert.len() < OUTER_HEADER_LEN || total < OUTER_HEADER_LEN {
        return Err(ErrorKind::SmallBuffer.into());
    }
    if cert[0] != Tag::Sequence.octet() {
        error!("certificate does not start with a SEQUENCE");
        return Err(ErrorKind::TagMismatch.into());
    }
    let content_len =
        u16::try_from(certificate_content_len(total)).map_err(|_| ErrorKind::BadParam)?;

    cert[1] = LONG_LENGTH_2;
    cert[2..OUTER_HEADER_LEN].copy_from_slice(&content_len.to_be_bytes());
    Ok(())
}
