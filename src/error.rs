use core::fmt;

/// An error type representing a failed certificate reconstruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Error {
    repr: Repr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Repr {
    Device(Status),
    Simple(ErrorKind),
}

impl Error {
    /// The local failure cause, if the error did not come from the secure element.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self.repr {
            Repr::Simple(kind) => Some(kind),
            Repr::Device(_) => None,
        }
    }

    /// The status reported by the secure element, if it failed the request.
    pub fn status(&self) -> Option<Status> {
        match self.repr {
            Repr::Device(status) => Some(status),
            Repr::Simple(_) => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            repr: Repr::Simple(kind),
        }
    }
}

impl From<Status> for Error {
    fn from(status: Status) -> Error {
        Error {
            repr: Repr::Device(status),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Device(status) => write!(fmt, "{}", status.as_str()),
            Repr::Simple(kind) => write!(fmt, "{}", kind.as_str()),
        }
    }
}

/// Response status of a secure element request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// response status byte indicates CheckMac failure (status byte = 0x01)
    CheckmacVerifyFailed = 0x01,
    /// response status byte indicates parsing error (status byte = 0x03)
    Parse = 0x03,
    /// response status byte is Ecc fault (status byte = 0x05)
    Ecc = 0x05,
    /// slot is not readable or writable in its current configuration, or
    /// holds no key (status byte = 0x0F)
    Execution = 0x0F,
    /// response status byte is unknown
    Unknown = 0xD5,
    /// Device did not receive data properly (status byte = 0xFF)
    Crc = 0xFF,
}

impl Status {
    pub fn from_u8(status: u8) -> Option<Self> {
        use Status::*;
        match status {
            0x00 => None,
            x if x == CheckmacVerifyFailed as u8 => CheckmacVerifyFailed.into(),
            x if x == Parse as u8 => Parse.into(),
            x if x == Ecc as u8 => Ecc.into(),
            x if x == Execution as u8 => Execution.into(),
            x if x == Crc as u8 => Crc.into(),
            _ => Unknown.into(),
        }
    }

    fn as_str(&self) -> &'static str {
        use Status::*;
        match self {
            CheckmacVerifyFailed => "checkmac or verify failed",
            Crc => "bad crc found (command not properly received by device) or other comm error",
            Ecc => "computation error during ECC processing causing invalid results",
            Execution => "chip can't execute the command",
            Parse => "command received byte length, opcode or parameter was illegal",
            Unknown => "response contains unknown non-zero status byte",
        }
    }
}

/// A list of specific error causes. Each kind is converted into `Error` type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// bad argument (out of range slot, unsupported length, etc.)
    BadParam = 0xE2,
    /// Communication with device failed.
    CommFail = 0xF0,
    /// Timed out while waiting for response.
    Timeout = 0xF1,
    /// Value length differs from the length reserved for it in the template
    InvalidSize = 0xE4,
    /// Supplied buffer is too small for data required
    SmallBuffer = 0xED,
    /// Template offset points outside of the template
    OutOfBounds = 0xC0,
    /// Expected ASN.1 tag or header byte not found at the recorded offset
    TagMismatch = 0xC1,
    /// A signature component is zero
    ZeroInteger = 0xC2,
    /// Common name carries no hex signer id suffix
    SignerIdNotFound = 0xC3,
    /// Compressed date or date value cannot be represented
    InvalidDate = 0xC4,
    /// PEM block is malformed or not a certificate
    BadPem = 0xC5,
}

impl ErrorKind {
    fn as_str(&self) -> &'static str {
        use ErrorKind::*;
        match self {
            BadParam => "bad argument (out of range, unsupported length, etc.)",
            CommFail => "communication with device failed",
            Timeout => "timed out while waiting for response",
            InvalidSize => "value length does not match the template field",
            SmallBuffer => "supplied buffer is too small for data required",
            OutOfBounds => "template element lies outside of the template",
            TagMismatch => "unexpected ASN.1 tag at template offset",
            ZeroInteger => "signature component is zero",
            SignerIdNotFound => "signer id suffix not found in common name",
            InvalidDate => "date cannot be represented",
            BadPem => "malformed PEM certificate",
        }
    }
}
