//! X.509 certificate reconstruction from ATECC compressed certificates.
//!
//! A certificate is rebuilt by copying a fixed DER template and splicing the
//! per device values into it at offsets recorded in the template layout.
//!
//! ## Modules
//!
//! - [`builder`]: Device and signer certificate assembly
//! - [`compressed`]: ATECC compressed certificate format (72 bytes)
//! - [`element`]: Template layouts and the per build element table
//! - [`integer`]: DER INTEGER encoding of signature components
//! - [`signature`]: Signature block assembly and length fixups
//! - [`patch`]: Splicing element values into a certificate
//! - [`template`]: Shipped templates and trust chains
//! - [`time`]: Validity period and date encoding
//! - [`name`]: Common name values
//! - [`serial_number`]: Certificate serial number derivation
//! - [`key_id`]: Subject and authority key identifiers
//! - [`pem`]: PEM encoding/decoding utilities

pub mod builder;
pub mod compressed;
pub mod element;
pub mod integer;
pub mod key_id;
pub mod name;
pub mod patch;
#[cfg(feature = "pem")]
pub mod pem;
pub mod serial_number;
pub mod signature;
pub mod template;
pub mod time;

/// Which certificate of the chain a device carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CertRole {
    /// End entity certificate of the device key.
    Device,
    /// Intermediate that issued the device certificate.
    Signer,
}
