// ============================================================
// UPLOAD DECODING
// ============================================================
// Turn uploaded bytes into text before CSV parsing

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::domain::error::{AppError, Result};

/// Decode an upload, honouring a UTF-8 or UTF-16 byte order mark.
///
/// Without a BOM the bytes must be strict UTF-8. Malformed input is a
/// `ParseError`; nothing is replaced with U+FFFD.
pub fn decode_upload(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let (encoding, bom_len) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));

    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .ok_or_else(|| {
            AppError::ParseError(format!(
                "Upload is not valid {} text",
                encoding.name()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        assert_eq!(decode_upload(b"a,b\n1,2").unwrap(), "a,b\n1,2");
    }

    #[test]
    fn test_utf8_bom_stripped() {
        assert_eq!(decode_upload(b"\xEF\xBB\xBFname\nAda").unwrap(), "name\nAda");
    }

    #[test]
    fn test_utf16le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "id\n7".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_upload(&bytes).unwrap(), "id\n7");
    }

    #[test]
    fn test_binary_rejected() {
        let png_header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0xC3, 0x28];
        let err = decode_upload(&png_header).unwrap_err();
        assert!(matches!(err, AppError::ParseError(msg) if msg.contains("UTF-8")));
    }
}
