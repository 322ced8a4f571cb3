//! Dynamic certificate elements and their places in a DER template.

use core::ops::Range;

use const_oid::db::rfc5912::{ECDSA_WITH_SHA_256, ID_EC_PUBLIC_KEY, SECP_256_R_1};
use const_oid::ObjectIdentifier;
use der::{Tag, TagNumber};

use super::integer::MAX_ENCODED_LEN;
use super::time::DateFormat;
use crate::error::{Error, ErrorKind};
use crate::key::{PublicKey, UNCOMPRESSED_POINT_TAG};

/// Fields a certificate build may patch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ElementId {
    SerialNumber = 0,
    SignerCommonName,
    NotBefore,
    ExpireDate,
    SubjectCommonName,
    PublicKey,
    AuthorityKeyId,
    SubjectKeyId,
    /// Start of the signature BIT STRING. Marks a position, carries no value.
    SignatureBitString,
    SignatureR,
    SignatureS,
}

impl ElementId {
    pub const COUNT: usize = 11;

    pub const ALL: [ElementId; Self::COUNT] = [
        ElementId::SerialNumber,
        ElementId::SignerCommonName,
        ElementId::NotBefore,
        ElementId::ExpireDate,
        ElementId::SubjectCommonName,
        ElementId::PublicKey,
        ElementId::AuthorityKeyId,
        ElementId::SubjectKeyId,
        ElementId::SignatureBitString,
        ElementId::SignatureR,
        ElementId::SignatureS,
    ];

    /// Signature elements are written by the signature block assembler,
    /// never by plain patching.
    pub const fn is_signature(&self) -> bool {
        matches!(
            self,
            ElementId::SignatureBitString | ElementId::SignatureR | ElementId::SignatureS
        )
    }
}

/// Location of a dynamic element in the DER template
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CertElement {
    /// Offset from start of template
    pub offset: u16,
    /// Number of bytes to copy
    pub count: u8,
}

impl CertElement {
    /// Marks an element the template does not carry.
    pub const ABSENT: Self = Self::new(0, 0);

    /// Create a new certificate element location
    pub const fn new(offset: u16, count: u8) -> Self {
        Self { offset, count }
    }

    pub const fn is_absent(&self) -> bool {
        self.offset == 0 && self.count == 0
    }

    pub fn start(&self) -> usize {
        self.offset as usize
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn end(&self) -> usize {
        self.start() + self.len()
    }

    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

/// Element locations of one certificate template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CertificateLayout {
    pub serial_number: CertElement,
    pub signer_common_name: CertElement,
    pub not_before: CertElement,
    pub expire_date: CertElement,
    pub subject_common_name: CertElement,
    pub public_key: CertElement,
    pub authority_key_id: CertElement,
    pub subject_key_id: CertElement,
    pub signature_bit_string: CertElement,
    pub signature_r: CertElement,
    pub signature_s: CertElement,
}

impl CertificateLayout {
    pub fn get(&self, id: ElementId) -> CertElement {
        match id {
            ElementId::SerialNumber => self.serial_number,
            ElementId::SignerCommonName => self.signer_common_name,
            ElementId::NotBefore => self.not_before,
            ElementId::ExpireDate => self.expire_date,
            ElementId::SubjectCommonName => self.subject_common_name,
            ElementId::PublicKey => self.public_key,
            ElementId::AuthorityKeyId => self.authority_key_id,
            ElementId::SubjectKeyId => self.subject_key_id,
            ElementId::SignatureBitString => self.signature_bit_string,
            ElementId::SignatureR => self.signature_r,
            ElementId::SignatureS => self.signature_s,
        }
    }

    /// Check that every element sits behind the ASN.1 header its field type
    /// calls for, and that the template is a single certificate ending with
    /// the signature.
    pub fn verify(&self, template: &[u8]) -> Result<(), Error> {
        let der = Template(template);

        der.outer_header()?;

        if !self.serial_number.is_absent() {
            der.integer(self.serial_number)?;
        }
        for name in [self.signer_common_name, self.subject_common_name] {
            if !name.is_absent() {
                der.string(name)?;
            }
        }
        for date in [self.not_before, self.expire_date] {
            if !date.is_absent() {
                der.date(date)?;
            }
        }
        if !self.public_key.is_absent() {
            der.public_key(self.public_key)?;
        }
        if !self.authority_key_id.is_absent() {
            let tag = Tag::ContextSpecific {
                constructed: false,
                number: TagNumber::N0,
            };
            der.key_id(self.authority_key_id, tag)?;
        }
        if !self.subject_key_id.is_absent() {
            der.key_id(self.subject_key_id, Tag::OctetString)?;
        }

        der.signature(
            self.signature_bit_string,
            self.signature_r,
            self.signature_s,
        )
    }
}

struct Template<'a>(&'a [u8]);

impl Template<'_> {
    fn bytes_at(&self, offset: usize, expected: &[u8]) -> Result<(), Error> {
        match self.0.get(offset..offset + expected.len()) {
            Some(found) if found == expected => Ok(()),
            Some(_) => {
                error!("template self-check failed at offset {}", offset);
                Err(ErrorKind::TagMismatch.into())
            }
            None => Err(ErrorKind::OutOfBounds.into()),
        }
    }

    /// Check the bytes immediately in front of `element`.
    fn preceded_by(&self, element: CertElement, expected: &[u8]) -> Result<(), Error> {
        let start = element
            .start()
            .checked_sub(expected.len())
            .ok_or(ErrorKind::OutOfBounds)?;
        self.bytes_at(start, expected)
    }

    fn contains(&self, element: CertElement) -> Result<(), Error> {
        if element.end() > self.0.len() {
            return Err(ErrorKind::OutOfBounds.into());
        }
        Ok(())
    }

    fn byte(&self, offset: usize) -> Result<u8, Error> {
        self.0
            .get(offset)
            .copied()
            .ok_or_else(|| ErrorKind::OutOfBounds.into())
    }

    fn outer_header(&self) -> Result<(), Error> {
        self.bytes_at(0, &[Tag::Sequence.octet(), 0x82])?;
        let content_len = u16::from_be_bytes([self.byte(2)?, self.byte(3)?]) as usize;
        if content_len + 4 != self.0.len() {
            error!("template length {} disagrees with its header", self.0.len());
            return Err(ErrorKind::TagMismatch.into());
        }
        Ok(())
    }

    /// The serial may be wider than the patched field, the remainder stays
    /// as baked into the template.
    fn integer(&self, element: CertElement) -> Result<(), Error> {
        self.contains(element)?;
        let start = element
            .start()
            .checked_sub(2)
            .ok_or(ErrorKind::OutOfBounds)?;
        self.bytes_at(start, &[Tag::Integer.octet()])?;
        if (self.byte(start + 1)? as usize) < element.len() {
            return Err(ErrorKind::TagMismatch.into());
        }
        Ok(())
    }

    fn string(&self, element: CertElement) -> Result<(), Error> {
        self.contains(element)?;
        let tag = self.byte(element.start().checked_sub(2).ok_or(ErrorKind::OutOfBounds)?)?;
        if tag != Tag::Utf8String.octet() && tag != Tag::PrintableString.octet() {
            return Err(ErrorKind::TagMismatch.into());
        }
        self.preceded_by(element, &[tag, element.count])
    }

    fn date(&self, element: CertElement) -> Result<(), Error> {
        self.contains(element)?;
        let tag = if element.len() == DateFormat::Utc.len() {
            Tag::UtcTime
        } else if element.len() == DateFormat::Generalized.len() {
            Tag::GeneralizedTime
        } else {
            return Err(ErrorKind::InvalidSize.into());
        };
        self.preceded_by(element, &[tag.octet(), element.count])
    }

    fn public_key(&self, element: CertElement) -> Result<(), Error> {
        self.contains(element)?;
        if element.len() != PublicKey::LEN {
            return Err(ErrorKind::InvalidSize.into());
        }

        let key_len = 2 + PublicKey::LEN as u8;
        let algorithm_len = oid_len(&ID_EC_PUBLIC_KEY) + oid_len(&SECP_256_R_1);

        let mut prefix = heapless::Vec::<u8, 32>::new();
        let mut push = |bytes: &[u8]| {
            prefix
                .extend_from_slice(bytes)
                .map_err(|_| Error::from(ErrorKind::SmallBuffer))
        };
        push(&[Tag::Sequence.octet(), 2 + algorithm_len + 2 + key_len])?;
        push(&[Tag::Sequence.octet(), algorithm_len])?;
        push(&[Tag::ObjectIdentifier.octet(), ID_EC_PUBLIC_KEY.as_bytes().len() as u8])?;
        push(ID_EC_PUBLIC_KEY.as_bytes())?;
        push(&[Tag::ObjectIdentifier.octet(), SECP_256_R_1.as_bytes().len() as u8])?;
        push(SECP_256_R_1.as_bytes())?;
        push(&[Tag::BitString.octet(), key_len, 0x00, UNCOMPRESSED_POINT_TAG])?;

        self.preceded_by(element, &prefix)
    }

    fn key_id(&self, element: CertElement, tag: Tag) -> Result<(), Error> {
        self.contains(element)?;
        self.preceded_by(element, &[tag.octet(), element.count])
    }

    /// AlgorithmIdentifier, then BIT STRING { 0 unused bits, SEQUENCE { INTEGER r, INTEGER s } }
    /// running to the end of the template.
    fn signature(
        &self,
        bit_string: CertElement,
        r: CertElement,
        s: CertElement,
    ) -> Result<(), Error> {
        if bit_string.count != 0 || r.is_absent() || s.is_absent() {
            return Err(ErrorKind::BadParam.into());
        }
        for component in [r, s] {
            if component.len() == 0 || component.len() > MAX_ENCODED_LEN {
                return Err(ErrorKind::InvalidSize.into());
            }
            self.contains(component)?;
            self.preceded_by(component, &[Tag::Integer.octet(), component.count])?;
        }

        let marker = bit_string.start();
        let algorithm_len = oid_len(&ECDSA_WITH_SHA_256);
        let start = marker
            .checked_sub(2 + algorithm_len as usize)
            .ok_or(ErrorKind::OutOfBounds)?;
        self.bytes_at(start, &[Tag::Sequence.octet(), algorithm_len])?;
        self.bytes_at(
            start + 2,
            &[
                Tag::ObjectIdentifier.octet(),
                ECDSA_WITH_SHA_256.as_bytes().len() as u8,
            ],
        )?;
        self.bytes_at(start + 4, ECDSA_WITH_SHA_256.as_bytes())?;

        self.bytes_at(marker, &[Tag::BitString.octet()])?;
        self.bytes_at(marker + 2, &[0x00, Tag::Sequence.octet()])?;

        // R opens the inner SEQUENCE and S directly follows it.
        if r.start() != marker + 7 || s.start() != r.end() + 2 {
            error!("signature components misplaced behind offset {}", marker);
            return Err(ErrorKind::TagMismatch.into());
        }

        if marker + 2 + self.byte(marker + 1)? as usize != self.0.len() || s.end() != self.0.len()
        {
            error!("signature does not end the template");
            return Err(ErrorKind::TagMismatch.into());
        }
        Ok(())
    }
}

/// Encoded length of an OBJECT IDENTIFIER including tag and length octets.
fn oid_len(oid: &ObjectIdentifier) -> u8 {
    2 + oid.as_bytes().len() as u8
}

/// A dynamic element and, once resolved, the bytes to place there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element<'a> {
    pub id: ElementId,
    pub location: CertElement,
    pub value: Option<&'a [u8]>,
}

impl Element<'_> {
    pub fn value_len(&self) -> usize {
        self.value.map_or(0, <[u8]>::len)
    }
}

/// Resolved values of a single certificate build.
///
/// A table starts out with every value cleared and borrows the values it is
/// given, so it cannot outlive the build that filled it.
#[derive(Clone, Debug)]
pub struct ElementTable<'a> {
    elements: [Element<'a>; ElementId::COUNT],
}

impl<'a> ElementTable<'a> {
    pub fn new(layout: &CertificateLayout) -> Self {
        Self {
            elements: ElementId::ALL.map(|id| Element {
                id,
                location: layout.get(id),
                value: None,
            }),
        }
    }

    pub fn set(&mut self, id: ElementId, value: &'a [u8]) {
        self.elements[id as usize].value = Some(value);
    }

    pub fn get(&self, id: ElementId) -> &Element<'a> {
        &self.elements[id as usize]
    }

    pub fn value(&self, id: ElementId) -> Option<&'a [u8]> {
        self.get(id).value
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element<'a>> {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::template::TrustChain;

    #[test]
    fn ids_index_their_table_position() {
        for (i, id) in ElementId::ALL.iter().enumerate() {
            assert_eq!(*id as usize, i);
        }
    }

    #[test]
    fn absent_element() {
        assert!(CertElement::ABSENT.is_absent());
        assert!(!CertElement::new(0, 4).is_absent());
        assert!(!CertElement::new(328, 0).is_absent());
    }

    #[test]
    fn new_table_is_cleared() {
        let template = TrustChain::Development.device_template();
        let table = ElementTable::new(&template.layout);
        for element in table.iter() {
            assert_eq!(element.value, None);
            assert_eq!(element.value_len(), 0);
            assert_eq!(element.location, template.layout.get(element.id));
        }
        assert!(table.get(ElementId::SubjectKeyId).location.is_absent());
    }

    #[test]
    fn shipped_layouts_verify() {
        for chain in [TrustChain::Production, TrustChain::Development] {
            for template in [chain.device_template(), chain.signer_template()] {
                assert_eq!(template.layout.verify(template.der), Ok(()));
            }
        }
    }

    #[test]
    fn shifted_offset_detected() {
        let template = TrustChain::Production.device_template();

        let mut layout = template.layout;
        layout.subject_common_name.offset += 1;
        assert_eq!(
            layout.verify(template.der),
            Err(ErrorKind::TagMismatch.into())
        );

        let mut layout = template.layout;
        layout.public_key.offset -= 1;
        assert_eq!(
            layout.verify(template.der),
            Err(ErrorKind::TagMismatch.into())
        );

        let mut layout = template.layout;
        layout.signature_bit_string.offset += 2;
        assert!(layout.verify(template.der).is_err());
    }

    #[test]
    fn wrong_date_length_detected() {
        let template = TrustChain::Development.device_template();
        let mut layout = template.layout;
        layout.expire_date.count = DateFormat::Utc.len() as u8;
        assert_eq!(
            layout.verify(template.der),
            Err(ErrorKind::TagMismatch.into())
        );
    }

    #[test]
    fn element_past_end_detected() {
        let template = TrustChain::Development.signer_template();
        let mut layout = template.layout;
        layout.subject_key_id.offset = template.der.len() as u16;
        assert_eq!(
            layout.verify(template.der),
            Err(ErrorKind::OutOfBounds.into())
        );
    }

    #[test]
    fn truncated_template_detected() {
        let template = TrustChain::Production.signer_template();
        let truncated = &template.der[..template.der.len() - 1];
        assert!(template.layout.verify(truncated).is_err());
    }
}
