//! Certificate templates and the trust chains they belong to.

mod development;
mod production;

use super::element::{CertElement, CertificateLayout};
use super::integer::MAX_ENCODED_LEN;
use super::key_id::KeyIdMethod;
use super::time::DateFormat;
use super::CertRole;
use crate::error::{Error, ErrorKind};
use crate::key::KeyLayout;

/// A complete DER certificate whose dynamic fields are overwritten on every
/// build, together with where those fields sit.
#[derive(Debug)]
pub struct CertTemplate {
    pub der: &'static [u8],
    pub layout: CertificateLayout,
}

impl CertTemplate {
    pub fn len(&self) -> usize {
        self.der.len()
    }

    /// Buffer size that fits any certificate built from this template.
    ///
    /// Signature components take up to one sign pad byte more than a raw
    /// component, so the signature block can outgrow the template.
    pub fn max_len(&self) -> usize {
        let r = self.layout.signature_r.len();
        let s = self.layout.signature_s.len();
        self.der.len() + 2 * MAX_ENCODED_LEN - r.min(MAX_ENCODED_LEN) - s.min(MAX_ENCODED_LEN)
    }

    pub fn verify(&self) -> Result<(), Error> {
        self.layout.verify(self.der)
    }

    /// Template bytes of `element`.
    pub fn field(&self, element: CertElement) -> Result<&'static [u8], Error> {
        self.der
            .get(element.range())
            .ok_or_else(|| ErrorKind::OutOfBounds.into())
    }
}

/// Per chain choices that are not captured by the template layouts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    /// Format of the device certificate expiry.
    pub device_expiry: DateFormat,
    /// Format of the signer certificate expiry, when its template does not
    /// fix the expiry.
    pub signer_expiry: DateFormat,
    /// How the signer public key is stored in its slot.
    pub signer_key_layout: KeyLayout,
    pub key_id: KeyIdMethod,
}

/// Root of trust a device was provisioned under.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrustChain {
    #[default]
    Production,
    Development,
}

impl TrustChain {
    pub fn device_template(&self) -> &'static CertTemplate {
        match self {
            TrustChain::Production => &production::DEVICE,
            TrustChain::Development => &development::DEVICE,
        }
    }

    pub fn signer_template(&self) -> &'static CertTemplate {
        match self {
            TrustChain::Production => &production::SIGNER,
            TrustChain::Development => &development::SIGNER,
        }
    }

    pub fn template(&self, role: CertRole) -> &'static CertTemplate {
        match role {
            CertRole::Device => self.device_template(),
            CertRole::Signer => self.signer_template(),
        }
    }

    pub fn policy(&self) -> Policy {
        match self {
            TrustChain::Production => Policy {
                device_expiry: DateFormat::Utc,
                signer_expiry: DateFormat::Generalized,
                signer_key_layout: KeyLayout::Packed,
                key_id: KeyIdMethod::Sha1,
            },
            TrustChain::Development => Policy {
                device_expiry: DateFormat::Generalized,
                signer_expiry: DateFormat::Generalized,
                signer_key_layout: KeyLayout::Padded,
                key_id: KeyIdMethod::Sha1,
            },
        }
    }

    /// PEM encoded root and intermediate certificates of this chain, root
    /// first.
    pub fn chain_pem(&self) -> &'static str {
        match self {
            TrustChain::Production => production::CHAIN_PEM,
            TrustChain::Development => development::CHAIN_PEM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_sizes() {
        assert_eq!(TrustChain::Development.device_template().len(), 401);
        assert_eq!(TrustChain::Development.signer_template().len(), 480);
        assert_eq!(TrustChain::Production.device_template().len(), 731);
        assert_eq!(TrustChain::Production.signer_template().len(), 780);
    }

    #[test]
    fn max_len_covers_padded_signature() {
        // 32 byte R and S in the template, both may gain a pad byte.
        assert_eq!(TrustChain::Development.device_template().max_len(), 403);
        // R and S are already padded.
        assert_eq!(TrustChain::Production.signer_template().max_len(), 780);
    }

    #[test]
    fn expiry_policy() {
        let device = TrustChain::Production.device_template();
        assert_eq!(
            device.layout.expire_date.len(),
            TrustChain::Production.policy().device_expiry.len()
        );
        assert!(TrustChain::Production
            .signer_template()
            .layout
            .expire_date
            .is_absent());

        let chain = TrustChain::Development;
        assert_eq!(
            chain.device_template().layout.expire_date.len(),
            chain.policy().device_expiry.len()
        );
        assert_eq!(
            chain.signer_template().layout.expire_date.len(),
            chain.policy().signer_expiry.len()
        );
    }

    #[test]
    fn field_reads_template_bytes() {
        let template = TrustChain::Production.device_template();
        assert_eq!(
            template.field(template.layout.subject_common_name),
            Ok(&b"88A3CC01E110.local"[..])
        );
        assert_eq!(
            template.field(CertElement::new(730, 2)),
            Err(ErrorKind::OutOfBounds.into())
        );
    }
}
