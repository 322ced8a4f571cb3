//! PEM encoding of rebuilt certificates and decoding of the trust chain.
use der::Writer;
use pem_rfc7468::{Encoder, LineEnding};

use crate::error::{Error, ErrorKind};

/// Encapsulation label of X.509 certificates.
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";

const BEGIN_CERTIFICATE: &str = "-----BEGIN CERTIFICATE-----";
const END_CERTIFICATE: &str = "-----END CERTIFICATE-----";

/// `Writer` type which outputs PEM-encoded data.
pub struct PemWriter<'w>(Encoder<'static, 'w>);

impl<'w> PemWriter<'w> {
    /// Create a new PEM writer which outputs into the provided buffer.
    ///
    /// Uses the default 64-character line wrapping.
    pub fn new(
        type_label: &'static str,
        line_ending: LineEnding,
        out: &'w mut [u8],
    ) -> Result<Self, Error> {
        Encoder::new(type_label, line_ending, out)
            .map(Self)
            .map_err(|_| ErrorKind::SmallBuffer.into())
    }

    /// Get the PEM label which will be used in the encapsulation boundaries
    /// for this document.
    pub fn type_label(&self) -> &'static str {
        self.0.type_label()
    }

    /// Finish encoding PEM, writing the post-encapsulation boundary.
    ///
    /// On success, returns the total number of bytes written to the output buffer.
    pub fn finish(self) -> Result<usize, Error> {
        self.0.finish().map_err(|_| ErrorKind::SmallBuffer.into())
    }
}

impl Writer for PemWriter<'_> {
    fn write(&mut self, slice: &[u8]) -> der::Result<()> {
        self.0.encode(slice).map_err(|_| der::ErrorKind::Failed)?;
        Ok(())
    }
}

/// PEM encode a DER certificate into `out`.
pub fn encode_certificate<'o>(
    der: &[u8],
    line_ending: LineEnding,
    out: &'o mut [u8],
) -> Result<&'o str, Error> {
    let len = {
        let mut writer = PemWriter::new(CERTIFICATE_LABEL, line_ending, out)?;
        writer.write(der).map_err(|_| ErrorKind::SmallBuffer)?;
        writer.finish()?
    };
    core::str::from_utf8(&out[..len]).map_err(|_| ErrorKind::BadPem.into())
}

/// Decode one PEM certificate block into `out`, returning the DER bytes.
pub fn decode_certificate<'o>(pem: &str, out: &'o mut [u8]) -> Result<&'o [u8], Error> {
    let (label, der) =
        pem_rfc7468::decode(pem.as_bytes(), out).map_err(|_| ErrorKind::BadPem)?;
    if label != CERTIFICATE_LABEL {
        warn!("unexpected PEM label in certificate block");
        return Err(ErrorKind::BadPem.into());
    }
    Ok(der)
}

/// Certificate blocks of a concatenated PEM chain, in the order they appear.
#[derive(Clone, Debug)]
pub struct PemBlocks<'a> {
    remaining: &'a str,
}

impl<'a> PemBlocks<'a> {
    pub fn new(chain: &'a str) -> Self {
        Self { remaining: chain }
    }
}

impl<'a> Iterator for PemBlocks<'a> {
    type Item = Result<&'a str, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.remaining.find(BEGIN_CERTIFICATE)?;
        let block = &self.remaining[start..];
        let Some(end) = block.find(END_CERTIFICATE) else {
            self.remaining = "";
            return Some(Err(ErrorKind::BadPem.into()));
        };
        let mut end = end + END_CERTIFICATE.len();
        let tail = &block[end..];
        if let Some(rest) = tail.strip_prefix("\r\n").or_else(|| tail.strip_prefix('\n')) {
            end += tail.len() - rest.len();
        }
        self.remaining = &block[end..];
        Some(Ok(&block[..end]))
    }
}
