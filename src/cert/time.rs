//! Validity period and RFC 5280 date text.

use der::asn1::{GeneralizedTime, UtcTime};
use der::{DateTime, EncodeValue, SliceWriter};

use crate::error::{Error, ErrorKind};

/// Longest encoded date, `YYYYMMDDhhmmssZ`.
pub const MAX_DATE_LEN: usize = 15;

/// Encoded date text, without ASN.1 tag and length.
pub type EncodedDate = heapless::Vec<u8, MAX_DATE_LEN>;

/// Text form of a certificate date.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateFormat {
    /// `YYMMDDhhmmssZ`, years 1950 through 2049.
    Utc,
    /// `YYYYMMDDhhmmssZ`.
    Generalized,
}

impl DateFormat {
    pub const fn len(&self) -> usize {
        match self {
            DateFormat::Utc => 13,
            DateFormat::Generalized => 15,
        }
    }
}

/// Certificate validity period.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: DateTime,
    pub not_after: DateTime,
}

/// Encode `date` as RFC 5280 text.
pub fn encode_date(format: DateFormat, date: &DateTime) -> Result<EncodedDate, Error> {
    let mut buf = [0u8; MAX_DATE_LEN];
    let mut writer = SliceWriter::new(&mut buf);

    match format {
        DateFormat::Utc => UtcTime::from_date_time(*date)
            .map_err(|_| ErrorKind::InvalidDate)?
            .encode_value(&mut writer),
        DateFormat::Generalized => GeneralizedTime::from_date_time(*date).encode_value(&mut writer),
    }
    .map_err(|_| ErrorKind::InvalidDate)?;

    let encoded = writer.finish().map_err(|_| ErrorKind::InvalidDate)?;
    EncodedDate::from_slice(encoded).map_err(|_| ErrorKind::SmallBuffer.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc() {
        let date = DateTime::new(2017, 6, 22, 10, 0, 0).unwrap();
        let encoded = encode_date(DateFormat::Utc, &date).unwrap();
        assert_eq!(&encoded[..], b"170622100000Z");
        assert_eq!(encoded.len(), DateFormat::Utc.len());
    }

    #[test]
    fn generalized() {
        let date = DateTime::new(9999, 12, 31, 23, 59, 59).unwrap();
        let encoded = encode_date(DateFormat::Generalized, &date).unwrap();
        assert_eq!(&encoded[..], b"99991231235959Z");
        assert_eq!(encoded.len(), DateFormat::Generalized.len());
    }

    #[test]
    fn utc_rejects_2050_and_later() {
        let date = DateTime::new(2050, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            encode_date(DateFormat::Utc, &date),
            Err(ErrorKind::InvalidDate.into())
        );
        assert!(encode_date(DateFormat::Generalized, &date).is_ok());
    }
}
