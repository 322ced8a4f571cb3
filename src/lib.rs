#![no_std]
mod fmt;

pub mod cert;
pub mod device;
pub mod error;
pub mod key;
pub mod memory;

pub use cert::builder::CertificateBuilder;
pub use cert::template::TrustChain;
pub use cert::CertRole;
pub use device::{Memory, SecureElement, SoftDevice};
pub use key::PublicKey;
pub use p256::ecdsa::Signature;
