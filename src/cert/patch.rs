//! Field patching of a certificate buffer.

use super::element::ElementTable;
use crate::error::{Error, ErrorKind};

/// Copy every resolved non-signature element into `cert` at its template
/// offset.
///
/// The table is validated as a whole before the first byte is written: a
/// value whose length differs from its field, or a field reaching past
/// `template_len`, fails the call with `cert` untouched. Elements the
/// template does not carry are skipped.
pub fn patch_fields(
    cert: &mut [u8],
    template_len: usize,
    table: &ElementTable<'_>,
) -> Result<(), Error> {
    if cert.len() < template_len {
        return Err(ErrorKind::SmallBuffer.into());
    }

    for element in table.iter().filter(|element| !element.id.is_signature()) {
        if element.location.len() != element.value_len() {
            error!(
                "element {} holds {} bytes, template reserves {}",
                element.id as u8,
                element.value_len(),
                element.location.len()
            );
            return Err(ErrorKind::InvalidSize.into());
        }
        if !element.location.is_absent() && element.location.end() > template_len {
            return Err(ErrorKind::OutOfBounds.into());
        }
    }

    for element in table.iter().filter(|element| !element.id.is_signature()) {
        if let (false, Some(value)) = (element.location.is_absent(), element.value) {
            trace!(
                "patch element {} at {}..{}",
                element.id as u8,
                element.location.start(),
                element.location.end()
            );
            cert[element.location.range()].copy_from_slice(value);
        }
    }

    Ok(())
}
