//! X509 Certificate builder
//!
//! Rebuilds the device and signer certificates of a trust chain from the
//! compressed certificates held by a secure element. Each build runs the
//! same pipeline over a fresh element table:
//!
//! 1. check the caller buffer against the template and self-check the layout
//! 2. copy the template
//! 3. read the compressed certificate and keys from the device
//! 4. resolve dates, names, serial number and key identifiers
//! 5. patch the fields, assemble the signature block, fix the outer length
//!
//! On failure the buffer contents are unspecified and must not be used.

use super::compressed::{CompressedCertificate, SerialSource};
use super::element::{ElementId, ElementTable};
use super::key_id::KeyId;
use super::name::{device_common_name, signer_common_name, CommonName};
use super::patch::patch_fields;
use super::serial_number::SerialNumber;
use super::signature::{set_certificate_length, store_signature};
use super::template::{CertTemplate, TrustChain};
use super::time::{encode_date, DateFormat, EncodedDate};
use super::CertRole;
use crate::device::{Memory, SecureElement};
use crate::error::{Error, ErrorKind};
use crate::key::PublicKey;
use crate::memory::SlotMap;

/// Values resolved for one build. `None` keeps the template bytes.
struct Fields {
    serial_number: SerialNumber,
    not_before: EncodedDate,
    expire_date: Option<EncodedDate>,
    signer_common_name: Option<CommonName>,
    subject_common_name: Option<CommonName>,
    public_key: PublicKey,
    authority_key_id: Option<KeyId>,
    subject_key_id: Option<KeyId>,
}

/// Certificate builder for one secure element.
///
/// # Example
///
/// ```ignore
/// let mut builder = CertificateBuilder::new(device, TrustChain::Production);
/// let mut buf = [0u8; 800];
/// let len = builder.build_device_certificate(&mut buf)?;
/// let cert_der = &buf[..len];
/// ```
pub struct CertificateBuilder<D> {
    device: D,
    chain: TrustChain,
    slots: SlotMap,
}

impl<D> CertificateBuilder<D>
where
    D: SecureElement,
{
    /// Creates a builder for a device provisioned with the production slot map.
    pub fn new(device: D, chain: TrustChain) -> Self {
        Self {
            device,
            chain,
            slots: SlotMap::production(),
        }
    }

    pub fn with_slots(mut self, slots: SlotMap) -> Self {
        self.slots = slots;
        self
    }

    pub fn chain(&self) -> TrustChain {
        self.chain
    }

    pub fn memory(&mut self) -> Memory<'_, D> {
        Memory::new(&mut self.device, self.slots)
    }

    /// PEM root and intermediate certificates the rebuilt certificates chain to.
    pub fn trust_chain_pem(&self) -> &'static str {
        self.chain.chain_pem()
    }

    pub fn into_inner(self) -> D {
        self.device
    }

    /// Build the device certificate into `cert`.
    ///
    /// Returns the certificate length, which may differ from the template
    /// length by the size change of the signature.
    pub fn build_device_certificate(&mut self, cert: &mut [u8]) -> Result<usize, Error> {
        self.build(CertRole::Device, cert)
    }

    /// Build the signer certificate into `cert`.
    pub fn build_signer_certificate(&mut self, cert: &mut [u8]) -> Result<usize, Error> {
        self.build(CertRole::Signer, cert)
    }

    pub fn build(&mut self, role: CertRole, cert: &mut [u8]) -> Result<usize, Error> {
        let template = self.chain.template(role);
        if cert.len() < template.len() {
            return Err(ErrorKind::SmallBuffer.into());
        }
        template.verify()?;
        cert[..template.len()].copy_from_slice(template.der);

        let compressed = self.memory().compressed_cert(role)?;
        if compressed.serial_source() != Some(SerialSource::PubKeyHash) {
            warn!(
                "compressed certificate names serial source {}, deriving from public key",
                compressed.serial_format().serial_source()
            );
        }

        let fields = match role {
            CertRole::Device => self.device_fields(template, &compressed)?,
            CertRole::Signer => self.signer_fields(template, &compressed)?,
        };
        let total = assemble(template, cert, &fields, &compressed)?;
        debug!(
            "rebuilt {} byte certificate from {} byte template",
            total,
            template.len()
        );
        Ok(total)
    }

    fn device_fields(
        &mut self,
        template: &CertTemplate,
        compressed: &CompressedCertificate,
    ) -> Result<Fields, Error> {
        let layout = &template.layout;
        let policy = self.chain.policy();

        let mut memory = self.memory();
        let public_key = memory.device_public_key()?;
        let signer_key = memory.signer_public_key(policy.signer_key_layout)?;
        let mac_address = memory.mac_address()?;

        let signer_common_name = match layout.signer_common_name.is_absent() {
            true => None,
            false => Some(signer_common_name(
                template.field(layout.signer_common_name)?,
                compressed.signer_id(),
            )?),
        };

        let (not_before, expire_date) = dates(template, compressed, policy.device_expiry)?;
        Ok(Fields {
            serial_number: SerialNumber::from_public_key(&public_key, &compressed.encoded_date()),
            not_before,
            expire_date,
            signer_common_name,
            subject_common_name: Some(device_common_name(&mac_address)?),
            public_key,
            authority_key_id: Some(KeyId::from_public_key(&signer_key, policy.key_id)),
            subject_key_id: Some(KeyId::from_public_key(&public_key, policy.key_id)),
        })
    }

    fn signer_fields(
        &mut self,
        template: &CertTemplate,
        compressed: &CompressedCertificate,
    ) -> Result<Fields, Error> {
        let layout = &template.layout;
        let policy = self.chain.policy();

        let public_key = self.memory().signer_public_key(policy.signer_key_layout)?;

        let subject_common_name = match layout.subject_common_name.is_absent() {
            true => None,
            false => Some(signer_common_name(
                template.field(layout.subject_common_name)?,
                compressed.signer_id(),
            )?),
        };

        let (not_before, expire_date) = dates(template, compressed, policy.signer_expiry)?;
        Ok(Fields {
            serial_number: SerialNumber::from_public_key(&public_key, &compressed.encoded_date()),
            not_before,
            expire_date,
            // Issued by a fixed root, the issuer name and key id stay as is.
            signer_common_name: None,
            subject_common_name,
            public_key,
            authority_key_id: None,
            subject_key_id: Some(KeyId::from_public_key(&public_key, policy.key_id)),
        })
    }
}

/// Not-before and, when the template does not fix it, expiry date text.
fn dates(
    template: &CertTemplate,
    compressed: &CompressedCertificate,
    expiry: DateFormat,
) -> Result<(EncodedDate, Option<EncodedDate>), Error> {
    let validity = compressed.encoded_date().validity()?;
    let not_before = encode_date(DateFormat::Utc, &validity.not_before)?;
    let expire_date = match template.layout.expire_date.is_absent() {
        true => None,
        false => Some(encode_date(expiry, &validity.not_after)?),
    };
    Ok((not_before, expire_date))
}

/// Patch `fields` and the signature of `compressed` into the template copy
/// in `cert`. Returns the certificate length.
fn assemble(
    template: &CertTemplate,
    cert: &mut [u8],
    fields: &Fields,
    compressed: &CompressedCertificate,
) -> Result<usize, Error> {
    let layout = &template.layout;
    let serial_len = layout.serial_number.len().min(SerialNumber::LEN);

    let values: [(ElementId, Option<&[u8]>); 8] = [
        (
            ElementId::SerialNumber,
            Some(&fields.serial_number.as_bytes()[..serial_len]),
        ),
        (ElementId::SignerCommonName, fields.signer_common_name.as_deref()),
        (ElementId::NotBefore, Some(&fields.not_before[..])),
        (ElementId::ExpireDate, fields.expire_date.as_deref()),
        (ElementId::SubjectCommonName, fields.subject_common_name.as_deref()),
        (ElementId::PublicKey, Some(fields.public_key.as_ref())),
        (
            ElementId::AuthorityKeyId,
            fields.authority_key_id.as_ref().map(KeyId::as_bytes),
        ),
        (
            ElementId::SubjectKeyId,
            fields.subject_key_id.as_ref().map(KeyId::as_bytes),
        ),
    ];

    let mut table = ElementTable::new(layout);
    for (id, value) in values {
        let location = layout.get(id);
        if location.is_absent() {
            continue;
        }
        match value {
            Some(value) => table.set(id, value),
            None => table.set(id, template.field(location)?),
        }
    }
    table.set(ElementId::SignatureR, compressed.signature_r());
    table.set(ElementId::SignatureS, compressed.signature_s());

    patch_fields(cert, template.len(), &table)?;
    let total = store_signature(cert, &table)?;
    set_certificate_length(cert, total)?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::compressed::{CompressedDate, SerialFormat};
    use crate::cert::element::CertElement;
    use crate::device::SoftDevice;
    use crate::error::Status;
    use crate::key::KeyLayout;
    use crate::memory::Slot;
    use der::asn1::{AnyRef, BitStringRef};
    use der::{Decode, Reader, SliceReader};
    use hex_literal::hex;
    use p256::ecdsa::signature::{Signer, Verifier};
    use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
    use p256::pkcs8::DecodePublicKey;

    const SPKI_PREFIX_LEN: usize = 27;

    fn compressed(r: &[u8], s: &[u8], date: [u8; 3], signer_id: [u8; 2]) -> CompressedCertificate {
        let mut cert = CompressedCertificate::zeroed();
        cert.set_signature(r.try_into().unwrap(), s.try_into().unwrap());
        cert.set_encoded_date(CompressedDate::from_bytes(date));
        cert.set_signer_id(signer_id);
        cert.set_serial_format(
            SerialFormat::new().with_serial_source(SerialSource::PubKeyHash as u8),
        );
        cert
    }

    fn field(template: &CertTemplate, element: CertElement) -> &'static [u8] {
        template.field(element).unwrap()
    }

    /// Device provisioned the way the shipped production templates were issued.
    fn production_device() -> SoftDevice {
        let chain = TrustChain::Production;
        let device_template = chain.device_template();
        let signer_template = chain.signer_template();

        let mut device = SoftDevice::new();
        let public_key =
            PublicKey::try_from(field(device_template, device_template.layout.public_key)).unwrap();
        device.set_public_key(Slot::Slot00, public_key).unwrap();

        let mut memory = Memory::new(&mut device, SlotMap::production());
        memory
            .write_signer_public_key(
                KeyLayout::Packed,
                &PublicKey::try_from(field(signer_template, signer_template.layout.public_key))
                    .unwrap(),
            )
            .unwrap();
        memory.device.write_slot(Slot::Slot04, b"88A3CC01E110\0").unwrap();

        let der = device_template.der;
        memory
            .write_compressed_cert(
                CertRole::Device,
                &compressed(&der[664..696], &der[699..731], hex!("8B5941"), hex!("A078")),
            )
            .unwrap();
        let der = signer_template.der;
        memory
            .write_compressed_cert(
                CertRole::Signer,
                &compressed(&der[713..745], &der[748..780], hex!("8B5941"), hex!("A078")),
            )
            .unwrap();
        device
    }

    fn development_device() -> SoftDevice {
        let chain = TrustChain::Development;
        let device_template = chain.device_template();
        let signer_template = chain.signer_template();

        let mut device = SoftDevice::new();
        let public_key =
            PublicKey::try_from(field(device_template, device_template.layout.public_key)).unwrap();
        device.set_public_key(Slot::Slot00, public_key).unwrap();

        let mut memory = Memory::new(&mut device, SlotMap::production());
        memory
            .write_signer_public_key(
                KeyLayout::Padded,
                &PublicKey::try_from(field(signer_template, signer_template.layout.public_key))
                    .unwrap(),
            )
            .unwrap();
        memory.device.write_slot(Slot::Slot04, b"88A3CC0F3110\0").unwrap();

        let der = device_template.der;
        memory
            .write_compressed_cert(
                CertRole::Device,
                &compressed(&der[335..367], &der[369..401], hex!("89AAC0"), hex!("0509")),
            )
            .unwrap();
        let der = signer_template.der;
        memory
            .write_compressed_cert(
                CertRole::Signer,
                &compressed(&der[414..446], &der[448..480], hex!("85E1E0"), hex!("0003")),
            )
            .unwrap();
        device
    }

    /// TBS certificate of a rebuilt certificate, tag and length included.
    fn tbs(cert: &[u8]) -> &[u8] {
        assert_eq!(&cert[4..6], &[0x30, 0x82]);
        let len = 4 + u16::from_be_bytes([cert[6], cert[7]]) as usize;
        &cert[4..4 + len]
    }

    /// Walk the certificate with a DER decoder and return its signature.
    fn decode_signature(cert: &[u8]) -> Signature {
        let outer = AnyRef::from_der(cert).unwrap();
        let mut reader = SliceReader::new(outer.value()).unwrap();
        AnyRef::decode(&mut reader).unwrap();
        AnyRef::decode(&mut reader).unwrap();
        let bits = BitStringRef::decode(&mut reader).unwrap();
        assert!(reader.is_finished());
        Signature::from_der(bits.raw_bytes()).unwrap()
    }

    #[test]
    fn production_device_matches_template() {
        let mut builder = CertificateBuilder::new(production_device(), TrustChain::Production);
        let mut buf = [0u8; 800];
        let len = builder.build_device_certificate(&mut buf).unwrap();
        assert_eq!(len, 731);
        assert_eq!(&buf[..len], TrustChain::Production.device_template().der);
    }

    #[test]
    fn production_signer_matches_template() {
        let mut builder = CertificateBuilder::new(production_device(), TrustChain::Production);
        let mut buf = [0u8; 800];
        let len = builder.build_signer_certificate(&mut buf).unwrap();
        assert_eq!(len, 780);
        assert_eq!(&buf[..len], TrustChain::Production.signer_template().der);
    }

    #[test]
    fn development_signer_matches_template() {
        let mut builder = CertificateBuilder::new(development_device(), TrustChain::Development);
        let mut buf = [0u8; 512];
        let len = builder.build_signer_certificate(&mut buf).unwrap();
        assert_eq!(len, 480);
        assert_eq!(&buf[..len], TrustChain::Development.signer_template().der);
    }

    #[test]
    fn development_device_links_to_signer_key() {
        let template = TrustChain::Development.device_template();
        let mut builder = CertificateBuilder::new(development_device(), TrustChain::Development);
        let mut buf = [0u8; 512];
        let len = builder.build_device_certificate(&mut buf).unwrap();
        assert_eq!(len, 401);

        // The shipped template names a different signer key.
        let akid = template.layout.authority_key_id.range();
        assert_eq!(
            &buf[akid.clone()],
            &hex!("C517 5564 129E 0B77 4EB3 C488 11AF 557A 3A4D E865")
        );
        assert_eq!(&buf[..akid.start], &template.der[..akid.start]);
        assert_eq!(&buf[akid.end..len], &template.der[akid.end..]);
    }

    #[test]
    fn signed_certificate_verifies() {
        let signing_key = SigningKey::from_slice(&[0x5Cu8; 32]).unwrap();
        let verifying_key = VerifyingKey::from(&signing_key);

        let mut device = production_device();
        // The signer certificate carries the key the device certificate is signed with.
        let mut memory = Memory::new(&mut device, SlotMap::production());
        memory
            .write_signer_public_key(
                KeyLayout::Packed,
                &PublicKey::from(&p256::PublicKey::from(&verifying_key)),
            )
            .unwrap();

        let mut builder = CertificateBuilder::new(device, TrustChain::Production);
        let mut buf = [0u8; 800];
        let len = builder.build_device_certificate(&mut buf).unwrap();
        let signature: Signature = signing_key.sign(tbs(&buf[..len]));

        let mut cert = builder.memory().compressed_cert(CertRole::Device).unwrap();
        cert.set_signature_from_der(&signature.to_der()).unwrap();
        builder
            .memory()
            .write_compressed_cert(CertRole::Device, &cert)
            .unwrap();

        let mut buf = [0u8; 800];
        let len = builder.build_device_certificate(&mut buf).unwrap();
        let cert = &buf[..len];

        // Outer length covers exactly the populated bytes.
        assert_eq!(u16::from_be_bytes([cert[2], cert[3]]) as usize, len - 4);
        let decoded = decode_signature(cert);
        assert_eq!(decoded, signature);
        assert!(verifying_key.verify(tbs(cert), &decoded).is_ok());

        let layout = TrustChain::Production.device_template().layout;
        let name = &cert[layout.signer_common_name.range()];
        assert!(name.ends_with(b"A078"));
    }

    #[test]
    fn public_key_embedded_verbatim() {
        let scalar = [0x29u8; 32];
        let mut device = production_device();
        device.set_private_key(Slot::Slot00, &scalar).unwrap();
        let expected = device.generate_pubkey(Slot::Slot00).unwrap();

        let mut builder = CertificateBuilder::new(device, TrustChain::Production);
        let mut buf = [0u8; 800];
        let len = builder.build_device_certificate(&mut buf).unwrap();

        let layout = TrustChain::Production.device_template().layout;
        assert_eq!(&buf[layout.public_key.range()], expected.as_ref());

        let spki_der = &buf[layout.public_key.start() - SPKI_PREFIX_LEN..layout.public_key.end()];
        let info = spki::SubjectPublicKeyInfoRef::from_der(spki_der).unwrap();
        assert_eq!(
            info.algorithm.oid,
            const_oid::db::rfc5912::ID_EC_PUBLIC_KEY
        );
        let key = p256::PublicKey::from_public_key_der(spki_der).unwrap();
        assert_eq!(PublicKey::from(&key), expected);

        let serial = SerialNumber::from_public_key(&expected, &CompressedDate::from_bytes(hex!("8B5941")));
        assert_eq!(&buf[layout.serial_number.range()], serial.as_bytes());
        assert!(len <= TrustChain::Production.device_template().max_len());
    }

    #[test]
    fn signer_id_patched_into_names() {
        let mut device = production_device();
        let mut memory = Memory::new(&mut device, SlotMap::production());
        for role in [CertRole::Device, CertRole::Signer] {
            let mut cert = memory.compressed_cert(role).unwrap();
            cert.set_signer_id(hex!("12EF"));
            memory.write_compressed_cert(role, &cert).unwrap();
        }

        let mut builder = CertificateBuilder::new(device, TrustChain::Production);
        let chain = TrustChain::Production;
        let mut buf = [0u8; 800];

        builder.build_device_certificate(&mut buf).unwrap();
        let issuer = chain.device_template().layout.signer_common_name;
        assert_eq!(&buf[issuer.range()], b"Legrand Factory Signer MC 12EF");

        builder.build_signer_certificate(&mut buf).unwrap();
        let subject = chain.signer_template().layout.subject_common_name;
        assert_eq!(&buf[subject.range()], b"Legrand Factory Signer MC 12EF");
    }

    #[test]
    fn buffer_smaller_than_template() {
        let mut builder = CertificateBuilder::new(production_device(), TrustChain::Production);
        let mut buf = [0u8; 730];
        assert_eq!(
            builder.build_device_certificate(&mut buf),
            Err(ErrorKind::SmallBuffer.into())
        );
    }

    #[test]
    fn signature_growth_needs_room() {
        let mut device = development_device();
        let mut memory = Memory::new(&mut device, SlotMap::production());
        let mut cert = memory.compressed_cert(CertRole::Device).unwrap();
        cert.set_signature(&[0x9C; 32], &[0x9C; 32]);
        memory.write_compressed_cert(CertRole::Device, &cert).unwrap();

        let template = TrustChain::Development.device_template();
        let mut builder = CertificateBuilder::new(device, TrustChain::Development);

        let mut buf = [0u8; 401];
        assert_eq!(
            builder.build_device_certificate(&mut buf),
            Err(ErrorKind::SmallBuffer.into())
        );

        let mut buf = [0u8; 512];
        let len = builder.build_device_certificate(&mut buf).unwrap();
        assert_eq!(len, template.max_len());
        let (r, s) = decode_signature(&buf[..len]).split_bytes();
        assert_eq!(r.as_slice(), &[0x9C; 32]);
        assert_eq!(s.as_slice(), &[0x9C; 32]);
    }

    #[test]
    fn zero_signature_component_fails() {
        let mut device = production_device();
        let mut memory = Memory::new(&mut device, SlotMap::production());
        let mut cert = memory.compressed_cert(CertRole::Signer).unwrap();
        cert.set_signature(&[0x11; 32], &[0; 32]);
        memory.write_compressed_cert(CertRole::Signer, &cert).unwrap();

        let mut builder = CertificateBuilder::new(device, TrustChain::Production);
        let mut buf = [0u8; 800];
        assert_eq!(
            builder.build_signer_certificate(&mut buf),
            Err(ErrorKind::ZeroInteger.into())
        );
    }

    #[test]
    fn device_errors_propagate() {
        let mut device = production_device();
        device.fail_reads(Slot::Slot11);
        let mut builder = CertificateBuilder::new(device, TrustChain::Production);
        let mut buf = [0u8; 800];
        assert_eq!(
            builder.build_device_certificate(&mut buf),
            Err(Status::Execution.into())
        );
        assert!(builder.build_signer_certificate(&mut buf).is_ok());

        let mut device = builder.into_inner();
        device.fail_reads(Slot::Slot09);
        let mut builder = CertificateBuilder::new(device, TrustChain::Production);
        assert_eq!(
            builder.build_signer_certificate(&mut buf),
            Err(Status::Execution.into())
        );
    }

    #[test]
    fn missing_device_key() {
        let mut builder = CertificateBuilder::new(SoftDevice::new(), TrustChain::Production);
        let mut buf = [0u8; 800];
        assert_eq!(
            builder.build_device_certificate(&mut buf),
            Err(Status::Execution.into())
        );
    }

    #[test]
    fn mac_address_must_fit_subject() {
        let mut device = production_device();
        device.write_slot(Slot::Slot04, b"88A3CC01E1\0").unwrap();
        let mut builder = CertificateBuilder::new(device, TrustChain::Production);
        let mut buf = [0u8; 800];
        assert_eq!(
            builder.build_device_certificate(&mut buf),
            Err(ErrorKind::InvalidSize.into())
        );
    }

    #[test]
    fn undecodable_date_fails() {
        let mut device = production_device();
        let mut memory = Memory::new(&mut device, SlotMap::production());
        let mut cert = memory.compressed_cert(CertRole::Device).unwrap();
        cert.set_encoded_date(CompressedDate::from_bytes(hex!("800000")));
        memory.write_compressed_cert(CertRole::Device, &cert).unwrap();

        let mut builder = CertificateBuilder::new(device, TrustChain::Production);
        let mut buf = [0u8; 800];
        assert_eq!(
            builder.build_device_certificate(&mut buf),
            Err(ErrorKind::InvalidDate.into())
        );
    }

    #[test]
    fn leap_day_issue_builds() {
        let mut device = production_device();
        let mut memory = Memory::new(&mut device, SlotMap::production());
        let mut cert = memory.compressed_cert(CertRole::Device).unwrap();
        cert.set_encoded_date(CompressedDate::from_bytes(hex!("817401")));
        memory.write_compressed_cert(CertRole::Device, &cert).unwrap();

        let mut builder = CertificateBuilder::new(device, TrustChain::Production);
        let mut buf = [0u8; 800];
        builder.build_device_certificate(&mut buf).unwrap();

        let layout = &TrustChain::Production.device_template().layout;
        let text = |element: CertElement| {
            &buf[element.offset as usize..][..element.count as usize]
        };
        assert_eq!(text(layout.not_before), b"160229000000Z");
        assert_eq!(text(layout.expire_date), b"170228000000Z");
    }

    #[test]
    fn alternate_slot_map() {
        let mut device = production_device();
        let mut cert = [0u8; 72];
        device.read_slot(Slot::Slot11, &mut cert).unwrap();
        device.write_slot(Slot::Slot10, &cert).unwrap();
        let mut key = [0u8; 64];
        device.read_slot(Slot::Slot09, &mut key).unwrap();
        device.write_slot(Slot::Slot11, &key).unwrap();
        device.write_slot(Slot::Slot13, b"88A3CC01E110\0").unwrap();

        let mut builder = CertificateBuilder::new(device, TrustChain::Production)
            .with_slots(SlotMap::alternate());
        let mut buf = [0u8; 800];
        let len = builder.build_device_certificate(&mut buf).unwrap();
        assert_eq!(&buf[..len], TrustChain::Production.device_template().der);
    }

    #[test]
    fn borrowed_device() {
        let mut device = development_device();
        let mut builder = CertificateBuilder::new(&mut device, TrustChain::Development);
        let mut buf = [0u8; 512];
        assert_eq!(builder.build_signer_certificate(&mut buf), Ok(480));
        assert!(builder
            .trust_chain_pem()
            .starts_with("-----BEGIN CERTIFICATE-----"));
    }
}
