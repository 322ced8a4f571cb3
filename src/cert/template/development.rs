//! Development root of trust.
//!
//! Device certificates are issued by "WSLNA Development CA1 Signer 1 <id>",
//! which chains to "WSLNA Development Root CA 1". Neither certificate expires.

use hex_literal::hex;

use super::CertTemplate;
use crate::cert::element::{CertElement, CertificateLayout};

static DEVICE_DER: [u8; 401] = hex!(
    "30 82 01 8D 30 82 01 34 A0 03 02 01 02 02 10 65"
    "C9 49 0E E7 78 74 E2 64 AD F5 A0 45 6D 1C 50 30"
    "0A 06 08 2A 86 48 CE 3D 04 03 02 30 3E 31 0E 30"
    "0C 06 03 55 04 0A 0C 05 57 53 4C 4E 41 31 2C 30"
    "2A 06 03 55 04 03 0C 23 57 53 4C 4E 41 20 44 65"
    "76 65 6C 6F 70 6D 65 6E 74 20 43 41 31 20 53 69"
    "67 6E 65 72 20 31 20 30 35 30 39 30 20 17 0D 31"
    "37 30 33 31 30 32 32 30 30 30 30 5A 18 0F 39 39"
    "39 39 31 32 33 31 32 33 35 39 35 39 5A 30 2D 31"
    "0E 30 0C 06 03 55 04 0A 0C 05 57 53 4C 4E 41 31"
    "1B 30 19 06 03 55 04 03 0C 12 38 38 41 33 43 43"
    "30 46 33 31 31 30 2E 6C 6F 63 61 6C 30 59 30 13"
    "06 07 2A 86 48 CE 3D 02 01 06 08 2A 86 48 CE 3D"
    "03 01 07 03 42 00 04 A9 0E 35 4B 65 8E 41 0C 9F"
    "E6 5F CB 4A 7F 84 31 14 71 6A 6E 4F 59 77 0E 62"
    "97 2D A5 43 B3 58 54 7A 4A BB 94 76 82 33 51 C5"
    "53 85 BE F2 33 C3 75 9A 02 7D 8A D4 6E 6B DA 71"
    "3F BE C0 A9 95 BE F3 A3 23 30 21 30 1F 06 03 55"
    "1D 23 04 18 30 16 80 14 6C F5 87 1E 22 5C EF 53"
    "5F DE 72 E4 FC AA 16 B4 74 68 44 54 30 0A 06 08"
    "2A 86 48 CE 3D 04 03 02 03 47 00 30 44 02 20 6A"
    "8A 00 01 18 A0 62 1C 2B 9C 59 9A 91 47 1B 89 BF"
    "98 71 27 6D 84 CC 91 CB 6C B9 B3 F2 B9 BC 2B 02"
    "20 3C 2B C0 08 7A 9C A7 C0 1E 41 7B 15 1D FC A5"
    "3E C0 33 E0 C5 4C 80 0B BD 9B AA 35 A3 49 3F 81"
    "2D"
);

pub(super) static DEVICE: CertTemplate = CertTemplate {
    der: &DEVICE_DER,
    layout: CertificateLayout {
        serial_number: CertElement::new(15, 16),
        signer_common_name: CertElement::new(72, 35),
        not_before: CertElement::new(111, 13),
        expire_date: CertElement::new(126, 15),
        subject_common_name: CertElement::new(170, 18),
        public_key: CertElement::new(215, 64),
        authority_key_id: CertElement::new(296, 20),
        subject_key_id: CertElement::ABSENT,
        signature_bit_string: CertElement::new(328, 0),
        signature_r: CertElement::new(335, 32),
        signature_s: CertElement::new(369, 32),
    },
};

static SIGNER_DER: [u8; 480] = hex!(
    "30 82 01 DC 30 82 01 82 A0 03 02 01 02 02 11 7F"
    "EA C6 75 C0 BA 33 38 B9 A6 B7 8D F4 D1 18 06 01"
    "30 0A 06 08 2A 86 48 CE 3D 04 03 02 30 36 31 0E"
    "30 0C 06 03 55 04 0A 0C 05 57 53 4C 4E 41 31 24"
    "30 22 06 03 55 04 03 0C 1B 57 53 4C 4E 41 20 44"
    "65 76 65 6C 6F 70 6D 65 6E 74 20 52 6F 6F 74 20"
    "43 41 20 31 30 20 17 0D 31 36 31 31 32 34 31 35"
    "30 30 30 30 5A 18 0F 39 39 39 39 31 32 33 31 32"
    "33 35 39 35 39 5A 30 3F 31 0E 30 0C 06 03 55 04"
    "0A 0C 05 57 53 4C 4E 41 31 2D 30 2B 06 03 55 04"
    "03 0C 24 57 53 4C 4E 41 20 44 65 76 65 6C 6F 70"
    "6D 65 6E 74 20 43 41 20 31 20 53 69 67 6E 65 72"
    "20 32 20 30 30 30 33 30 59 30 13 06 07 2A 86 48"
    "CE 3D 02 01 06 08 2A 86 48 CE 3D 03 01 07 03 42"
    "00 04 B7 24 DA 49 7B 97 19 D1 B2 A6 83 0C 1F 32"
    "A8 DE 06 08 24 46 0B F6 46 9F 41 EB 0F AC F6 0E"
    "AA 9F 5F 09 19 15 66 02 A6 4B 26 04 67 96 C2 00"
    "77 8B 92 1B DA F3 D7 47 2E 18 FD F2 2C 78 2E AF"
    "EF 65 A3 66 30 64 30 12 06 03 55 1D 13 01 01 FF"
    "04 08 30 06 01 01 FF 02 01 00 30 0E 06 03 55 1D"
    "0F 01 01 FF 04 04 03 02 02 84 30 1D 06 03 55 1D"
    "0E 04 16 04 14 C5 17 55 64 12 9E 0B 77 4E B3 C4"
    "88 11 AF 55 7A 3A 4D E8 65 30 1F 06 03 55 1D 23"
    "04 18 30 16 80 14 D7 5C EE 23 8C E0 06 D8 79 12"
    "CA DA 26 20 34 E8 23 81 A0 D7 30 0A 06 08 2A 86"
    "48 CE 3D 04 03 02 03 48 00 30 45 02 21 00 FA 5B"
    "98 F3 BB D2 4A 0F 61 6D 38 F6 B9 23 A6 4B 92 64"
    "4C 00 02 9B A1 F2 2F 6A 33 9A BF 10 22 70 02 20"
    "33 49 7A FE 6A C9 B6 65 0D CE EC C0 E3 35 D1 62"
    "5B 10 8B 8F 23 10 92 FB F4 54 AB 65 AE BB 04 13"
);

pub(super) static SIGNER: CertTemplate = CertTemplate {
    der: &SIGNER_DER,
    layout: CertificateLayout {
        serial_number: CertElement::new(15, 16),
        signer_common_name: CertElement::ABSENT,
        not_before: CertElement::new(104, 13),
        expire_date: CertElement::new(119, 15),
        subject_common_name: CertElement::new(163, 36),
        public_key: CertElement::new(226, 64),
        authority_key_id: CertElement::ABSENT,
        subject_key_id: CertElement::new(341, 20),
        signature_bit_string: CertElement::new(406, 0),
        signature_r: CertElement::new(413, 33),
        signature_s: CertElement::new(448, 32),
    },
};

/// Root and intermediate certificates above the signer.
pub(super) const CHAIN_PEM: &str = concat!(
    "-----BEGIN CERTIFICATE-----\n",
    "MIIBuzCCAWKgAwIBAgIQf1uFhAtybMUbhDnY+QDnQjAKBggqhkjOPQQDAjA2MQ4w\n",
    "DAYDVQQKDAVXU0xOQTEkMCIGA1UEAwwbV1NMTkEgRGV2ZWxvcG1lbnQgUm9vdCBD\n",
    "QSAxMCAXDTE2MTEyMzAwMDgxNVoYDzk5OTkxMjMxMjM1OTU5WjA2MQ4wDAYDVQQK\n",
    "DAVXU0xOQTEkMCIGA1UEAwwbV1NMTkEgRGV2ZWxvcG1lbnQgUm9vdCBDQSAxMFkw\n",
    "EwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAEGFcxboPwmxNlllujuWWy8rCXcvd5tNgt\n",
    "Tuf2QSRKFzvv5cOqGZb2u9VvJZ+gooc/H/hBnxBBxmoYeKFdLu7kjKNQME4wHQYD\n",
    "VR0OBBYEFNdc7iOM4AbYeRLK2iYgNOgjgaDXMB8GA1UdIwQYMBaAFNdc7iOM4AbY\n",
    "eRLK2iYgNOgjgaDXMAwGA1UdEwQFMAMBAf8wCgYIKoZIzj0EAwIDRwAwRAIgdD9P\n",
    "ZDSI0UKcC9iivO4bJa2aJXPCzL3uTr2de9mg7OUCIESRWzukUPzOFjgl0oI8DwPf\n",
    "/F8Zqs1uAspKDLUtQ245\n",
    "-----END CERTIFICATE-----\n",
);
