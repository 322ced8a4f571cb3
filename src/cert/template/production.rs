//! Production root of trust.
//!
//! Device certificates are issued by "Legrand Factory Signer MC <id>", which
//! chains through "Legrand Manufacturer MC" and "Legrand BCS" to
//! "Legrand Root R1". The signer expiry is fixed in its template.

use hex_literal::hex;

use super::CertTemplate;
use crate::cert::element::{CertElement, CertificateLayout};

static DEVICE_DER: [u8; 731] = hex!(
    "30 82 02 D7 30 82 02 7D A0 03 02 01 02 02 10 4D"
    "54 7F A0 90 04 AE 86 8B 4C 71 EB C4 22 1B 01 30"
    "0A 06 08 2A 86 48 CE 3D 04 03 02 30 81 87 31 0B"
    "30 09 06 03 55 04 06 13 02 55 53 31 13 30 11 06"
    "03 55 04 08 0C 0A 43 61 6C 69 66 6F 72 6E 69 61"
    "31 12 30 10 06 03 55 04 07 0C 09 53 61 6E 20 44"
    "69 65 67 6F 31 10 30 0E 06 03 55 04 0A 0C 07 4C"
    "65 67 72 61 6E 64 31 14 30 12 06 03 55 04 0B 0C"
    "0B 4C 65 67 72 61 6E 64 20 42 43 53 31 27 30 25"
    "06 03 55 04 03 0C 1E 4C 65 67 72 61 6E 64 20 46"
    "61 63 74 6F 72 79 20 53 69 67 6E 65 72 20 4D 43"
    "20 41 30 37 38 30 1E 17 0D 31 37 30 36 32 32 31"
    "30 30 30 30 30 5A 17 0D 31 38 30 36 32 32 31 30"
    "30 30 30 30 5A 30 7B 31 0B 30 09 06 03 55 04 06"
    "13 02 55 53 31 13 30 11 06 03 55 04 08 0C 0A 43"
    "61 6C 69 66 6F 72 6E 69 61 31 12 30 10 06 03 55"
    "04 07 0C 09 53 61 6E 20 44 69 65 67 6F 31 10 30"
    "0E 06 03 55 04 0A 0C 07 4C 65 67 72 61 6E 64 31"
    "14 30 12 06 03 55 04 0B 0C 0B 4C 65 67 72 61 6E"
    "64 20 42 43 53 31 1B 30 19 06 03 55 04 03 0C 12"
    "38 38 41 33 43 43 30 31 45 31 31 30 2E 6C 6F 63"
    "61 6C 30 59 30 13 06 07 2A 86 48 CE 3D 02 01 06"
    "08 2A 86 48 CE 3D 03 01 07 03 42 00 04 A6 E3 02"
    "2C FD 29 4D 98 DC 68 A2 60 8E 15 5D 38 45 69 08"
    "FF C2 01 08 0D AF 4D 18 6F 33 2F A5 05 DF 0E 15"
    "B0 32 87 1A C7 D4 9E C1 36 A9 FF 91 53 79 FB 77"
    "FE 81 10 3A 8B A9 9F DB 51 72 D6 F6 DB A3 81 D5"
    "30 81 D2 30 09 06 03 55 1D 13 04 02 30 00 30 1F"
    "06 03 55 1D 23 04 18 30 16 80 14 A1 1F 24 86 80"
    "34 13 31 D9 01 7D DE D3 43 52 29 F7 32 B7 F6 30"
    "0E 06 03 55 1D 0F 01 01 FF 04 04 03 02 07 80 30"
    "81 93 06 03 55 1D 1F 04 81 8B 30 81 88 30 81 85"
    "A0 32 A0 30 86 2E 68 74 74 70 73 3A 2F 2F 70 6B"
    "69 2E 6C 65 67 72 61 6E 64 2E 75 73 2F 6C 65 67"
    "72 61 6E 64 2D 62 63 73 2F 64 65 76 69 63 65 73"
    "2E 63 72 6C A2 4F A4 4D 30 4B 31 14 30 12 06 03"
    "55 04 03 0C 0B 4C 65 67 72 61 6E 64 20 42 43 53"
    "31 14 30 12 06 03 55 04 0B 0C 0B 4C 65 67 72 61"
    "6E 64 20 42 43 53 31 10 30 0E 06 03 55 04 0A 0C"
    "07 4C 65 67 72 61 6E 64 31 0B 30 09 06 03 55 04"
    "06 13 02 55 53 30 0A 06 08 2A 86 48 CE 3D 04 03"
    "02 03 48 00 30 45 02 20 56 E9 0E 4C A2 B1 66 5D"
    "43 18 82 D1 E7 7F D3 F7 EB 58 F0 21 65 B2 C8 3C"
    "8C 57 D2 64 37 F9 50 C5 02 21 00 89 F6 2B 70 5A"
    "82 D8 94 10 70 61 A7 17 75 2E E4 90 6B BA 12 F3"
    "7B 19 2F 4D 7D 7C 3D DC BA 75 D0"
);

pub(super) static DEVICE: CertTemplate = CertTemplate {
    der: &DEVICE_DER,
    layout: CertificateLayout {
        serial_number: CertElement::new(15, 16),
        signer_common_name: CertElement::new(151, 30),
        not_before: CertElement::new(185, 13),
        expire_date: CertElement::new(200, 13),
        subject_common_name: CertElement::new(320, 18),
        public_key: CertElement::new(365, 64),
        authority_key_id: CertElement::new(459, 20),
        subject_key_id: CertElement::ABSENT,
        signature_bit_string: CertElement::new(657, 0),
        signature_r: CertElement::new(664, 32),
        signature_s: CertElement::new(698, 33),
    },
};

static SIGNER_DER: [u8; 780] = hex!(
    "30 82 03 08 30 82 02 AD A0 03 02 01 02 02 10 4E"
    "B9 6A B7 A9 D0 38 94 29 05 2A 21 87 11 EB 48 30"
    "0A 06 08 2A 86 48 CE 3D 04 03 02 30 81 80 31 0B"
    "30 09 06 03 55 04 06 13 02 55 53 31 13 30 11 06"
    "03 55 04 08 0C 0A 43 61 6C 69 66 6F 72 6E 69 61"
    "31 12 30 10 06 03 55 04 07 0C 09 53 61 6E 20 44"
    "69 65 67 6F 31 10 30 0E 06 03 55 04 0A 0C 07 4C"
    "65 67 72 61 6E 64 31 14 30 12 06 03 55 04 0B 0C"
    "0B 4C 65 67 72 61 6E 64 20 42 43 53 31 20 30 1E"
    "06 03 55 04 03 0C 17 4C 65 67 72 61 6E 64 20 4D"
    "61 6E 75 66 61 63 74 75 72 65 72 20 4D 43 30 20"
    "17 0D 31 37 30 36 32 32 31 30 30 30 30 30 5A 18"
    "0F 32 30 35 32 30 38 31 38 32 33 34 34 34 30 5A"
    "30 81 87 31 0B 30 09 06 03 55 04 06 13 02 55 53"
    "31 13 30 11 06 03 55 04 08 0C 0A 43 61 6C 69 66"
    "6F 72 6E 69 61 31 12 30 10 06 03 55 04 07 0C 09"
    "53 61 6E 20 44 69 65 67 6F 31 10 30 0E 06 03 55"
    "04 0A 0C 07 4C 65 67 72 61 6E 64 31 14 30 12 06"
    "03 55 04 0B 0C 0B 4C 65 67 72 61 6E 64 20 42 43"
    "53 31 27 30 25 06 03 55 04 03 0C 1E 4C 65 67 72"
    "61 6E 64 20 46 61 63 74 6F 72 79 20 53 69 67 6E"
    "65 72 20 4D 43 20 41 30 37 38 30 59 30 13 06 07"
    "2A 86 48 CE 3D 02 01 06 08 2A 86 48 CE 3D 03 01"
    "07 03 42 00 04 BF 65 61 86 91 E2 53 CB 16 40 7F"
    "8A 01 3D 42 13 02 75 94 73 46 05 C5 05 F1 9B FE"
    "14 28 52 4B 4F B9 CA 9B 08 8D B7 58 08 D4 5B 12"
    "74 5E 17 A7 D4 DD B4 69 0E A0 F6 A6 AB E1 A5 44"
    "01 10 4B C3 D9 A3 81 FD 30 81 FA 30 1D 06 03 55"
    "1D 0E 04 16 04 14 A1 1F 24 86 80 34 13 31 D9 01"
    "7D DE D3 43 52 29 F7 32 B7 F6 30 1F 06 03 55 1D"
    "23 04 18 30 16 80 14 12 5D D8 18 B3 E9 29 3B 4D"
    "34 7B 84 36 15 4D F7 CD 4D D1 D1 30 12 06 03 55"
    "1D 13 01 01 FF 04 08 30 06 01 01 FF 02 01 00 30"
    "0E 06 03 55 1D 0F 01 01 FF 04 04 03 02 01 06 30"
    "81 93 06 03 55 1D 1F 04 81 8B 30 81 88 30 81 85"
    "A0 32 A0 30 86 2E 68 74 74 70 73 3A 2F 2F 70 6B"
    "69 2E 6C 65 67 72 61 6E 64 2E 75 73 2F 6C 65 67"
    "72 61 6E 64 2D 62 63 73 2F 64 65 76 69 63 65 73"
    "2E 63 72 6C A2 4F A4 4D 30 4B 31 0B 30 09 06 03"
    "55 04 06 13 02 55 53 31 10 30 0E 06 03 55 04 0A"
    "0C 07 4C 65 67 72 61 6E 64 31 14 30 12 06 03 55"
    "04 0B 0C 0B 4C 65 67 72 61 6E 64 20 42 43 53 31"
    "14 30 12 06 03 55 04 03 0C 0B 4C 65 67 72 61 6E"
    "64 20 42 43 53 30 0A 06 08 2A 86 48 CE 3D 04 03"
    "02 03 49 00 30 46 02 21 00 F6 D8 E1 A8 48 B7 61"
    "E0 42 D8 C8 6A 2F C3 A7 20 3E 9E 2C 58 9B 67 0F"
    "35 6E FB 70 05 85 41 AA 9D 02 21 00 CE 72 7B B8"
    "22 9E 91 1C 54 3B E1 B5 BE 78 14 DC DF 34 DA E6"
    "09 8D 1A 10 8E DD 18 43 E6 AB 57 22"
);

pub(super) static SIGNER: CertTemplate = CertTemplate {
    der: &SIGNER_DER,
    layout: CertificateLayout {
        serial_number: CertElement::new(15, 16),
        signer_common_name: CertElement::ABSENT,
        not_before: CertElement::new(178, 13),
        expire_date: CertElement::ABSENT,
        subject_common_name: CertElement::new(316, 30),
        public_key: CertElement::new(373, 64),
        authority_key_id: CertElement::ABSENT,
        subject_key_id: CertElement::new(454, 20),
        signature_bit_string: CertElement::new(705, 0),
        signature_r: CertElement::new(712, 33),
        signature_s: CertElement::new(747, 33),
    },
};

/// Root and intermediate certificates above the signer.
pub(super) const CHAIN_PEM: &str = concat!(
    "-----BEGIN CERTIFICATE-----\n",
    "MIICZzCCAe2gAwIBAgIQdR6Q91uZXKY+UiyIuYvDnDAKBggqhkjOPQQDAjB0MQsw\n",
    "CQYDVQQGEwJVUzETMBEGA1UECBMKQ2FsaWZvcm5pYTESMBAGA1UEBxMJU2FuIERp\n",
    "ZWdvMRAwDgYDVQQKEwdMZWdyYW5kMRAwDgYDVQQLEwdMZWdyYW5kMRgwFgYDVQQD\n",
    "Ew9MZWdyYW5kIFJvb3QgUjEwIBcNMTcwNzI2MTc0NTAwWhgPMjA1NzA3MjYxNzQ1\n",
    "MDBaMHQxCzAJBgNVBAYTAlVTMRMwEQYDVQQIEwpDYWxpZm9ybmlhMRIwEAYDVQQH\n",
    "EwlTYW4gRGllZ28xEDAOBgNVBAoTB0xlZ3JhbmQxEDAOBgNVBAsTB0xlZ3JhbmQx\n",
    "GDAWBgNVBAMTD0xlZ3JhbmQgUm9vdCBSMTB2MBAGByqGSM49AgEGBSuBBAAiA2IA\n",
    "BC8QIHtda3z+hsZawGzpH4wMQ0xcnr6wthIbDJOFtqcSAoYXsKDsJUaDLPni3/c5\n",
    "MtJQjXshZRMWRHlXU8MZzPGYGLK4l+KpFpQ/Y/BneS1cVE0x/sQW7oKJuU/jYgGJ\n",
    "kKNCMEAwDgYDVR0PAQH/BAQDAgEGMA8GA1UdEwEB/wQFMAMBAf8wHQYDVR0OBBYE\n",
    "FLcTVv0kzK4sjSD61/yZ13HcP8DwMAoGCCqGSM49BAMCA2gAMGUCMBZbGRvK3V/8\n",
    "wIgffObFEOaL0H1caHBK0VCbKdLtFaEXKo5JCcFCaY1gJOaA/SG/9wIxAPzkB3Wt\n",
    "LSLEJBmlMUtRmfaGKRLCliOTBnRxIsa/3h/PUePvcvfKughDqMFdQIgLTQ==\n",
    "-----END CERTIFICATE-----\n",
    "-----BEGIN CERTIFICATE-----\n",
    "MIICiTCCAg6gAwIBAgIQcIjMnZH1OpvZ/nwY+G+nizAKBggqhkjOPQQDAjB0MQsw\n",
    "CQYDVQQGEwJVUzETMBEGA1UECBMKQ2FsaWZvcm5pYTESMBAGA1UEBxMJU2FuIERp\n",
    "ZWdvMRAwDgYDVQQKEwdMZWdyYW5kMRAwDgYDVQQLEwdMZWdyYW5kMRgwFgYDVQQD\n",
    "Ew9MZWdyYW5kIFJvb3QgUjEwIBcNMTcwNzI2MTc1OTAwWhgPMjA1NzA3MjYxNzU5\n",
    "MDBaMHQxCzAJBgNVBAYTAlVTMRMwEQYDVQQIEwpDYWxpZm9ybmlhMRIwEAYDVQQH\n",
    "EwlTYW4gRGllZ28xEDAOBgNVBAoTB0xlZ3JhbmQxFDASBgNVBAsTC0xlZ3JhbmQg\n",
    "QkNTMRQwEgYDVQQDEwtMZWdyYW5kIEJDUzB2MBAGByqGSM49AgEGBSuBBAAiA2IA\n",
    "BPe3Bf5wFcluHFEKnv4NuAu2OhFeKsXKrbKyAk0YdAs5pfaJhVUnLA5yRSCJVKoc\n",
    "kjKu95XuhY+yvy/RAF/VdGbDt/zoQfcdrbUGj3V861vKQFbgmI/He5msd59cPZXb\n",
    "eqNjMGEwDgYDVR0PAQH/BAQDAgEGMA8GA1UdEwEB/wQFMAMBAf8wHQYDVR0OBBYE\n",
    "FJn+106aHaKT5F+5drVj7Nv74t3tMB8GA1UdIwQYMBaAFLcTVv0kzK4sjSD61/yZ\n",
    "13HcP8DwMAoGCCqGSM49BAMCA2kAMGYCMQDwtb0QmOLAilbFFQDHJ87Sff7PhWxs\n",
    "6LF7ObFHGdw/8i1XEFGZxADdVtdbmtNr9EMCMQDvHrfiUkwk5uRfMii+MduYuy1M\n",
    "lGztLDwN9cK0JyIENQDNaPJ6jBfzY/jrMxKlA/s=\n",
    "-----END CERTIFICATE-----\n",
    "-----BEGIN CERTIFICATE-----\n",
    "MIICezCCAgGgAwIBAgIQY9ey8Vwb0QrGjzTKcfHaqTAKBggqhkjOPQQDAjB0MQsw\n",
    "CQYDVQQGEwJVUzETMBEGA1UECBMKQ2FsaWZvcm5pYTESMBAGA1UEBxMJU2FuIERp\n",
    "ZWdvMRAwDgYDVQQKEwdMZWdyYW5kMRQwEgYDVQQLEwtMZWdyYW5kIEJDUzEUMBIG\n",
    "A1UEAxMLTGVncmFuZCBCQ1MwIBcNMTcwNzI2MTgwNzAwWhgPMjA1MjA3MjYxODA3\n",
    "MDBaMIGAMQswCQYDVQQGEwJVUzETMBEGA1UECBMKQ2FsaWZvcm5pYTESMBAGA1UE\n",
    "BxMJU2FuIERpZWdvMRAwDgYDVQQKEwdMZWdyYW5kMRQwEgYDVQQLEwtMZWdyYW5k\n",
    "IEJDUzEgMB4GA1UEAxMXTGVncmFuZCBNYW51ZmFjdHVyZXIgTUMwWTATBgcqhkjO\n",
    "PQIBBggqhkjOPQMBBwNCAATZb5zbq/0iO7ofMlW2CIy5jBgkFnG/zaz389/RFnbH\n",
    "XgtzS99jJ64FjVZ6GNa67NSUKHwuZRp1lV7V1OwsHxTso2YwZDAOBgNVHQ8BAf8E\n",
    "BAMCAQYwEgYDVR0TAQH/BAgwBgEB/wIBATAdBgNVHQ4EFgQU/TE6AYza0GUzcgNv\n",
    "HbpvauCXQ5IwHwYDVR0jBBgwFoAUmf7XTpodopPkX7l2tWPs2/vi3e0wCgYIKoZI\n",
    "zj0EAwIDaAAwZQIwSRJ3fX25sdFxsg0ZL9Lvyf536ApaEtM+KdPcfxjqjcjqgwDz\n",
    "GbTW8C/t6PTuoNXnAjEAlmeSHVfkwgLiEAg8k61u5da6ax1VlKVrw4hrbLLSYIx/\n",
    "/lbEscXKtn6dy2FOxOHY\n",
    "-----END CERTIFICATE-----\n",
);
