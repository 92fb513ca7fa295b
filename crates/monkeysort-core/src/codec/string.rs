//! Module: codec::string
//! Responsibility: length-prefixed UTF-8 strings and little-endian i32 fields.
//! Boundary: the length prefix is a 7-bit varint (LEB128) of the byte length,
//! at most five bytes, the same framing the .NET binary writer uses.

use crate::codec::error::{
    ERR_INVALID_UTF8, ERR_LENGTH_OVERFLOW, ERR_OVERLONG_LENGTH, ERR_TRUNCATED_INT,
    ERR_TRUNCATED_STRING,
};

pub(super) const I32_SIZE: usize = 4;
pub(super) const MAX_VARINT_BYTES: usize = 5;

// Smallest possible encoded string: a one-byte zero length prefix.
pub(super) const MIN_STRING_SIZE: usize = 1;

pub(super) fn push_i32(bytes: &mut Vec<u8>, value: i32) {
    bytes.extend_from_slice(&value.to_le_bytes());
}

/// Append a length-prefixed string. Callers guarantee `text.len() <= i32::MAX`.
pub(super) fn push_string(bytes: &mut Vec<u8>, text: &str) {
    debug_assert!(i32::try_from(text.len()).is_ok());

    let mut remaining = text.len();
    while remaining >= 0x80 {
        // Truncation keeps the low seven bits plus the continuation flag.
        #[expect(clippy::cast_possible_truncation)]
        bytes.push((remaining as u8) | 0x80);
        remaining >>= 7;
    }
    #[expect(clippy::cast_possible_truncation)]
    bytes.push(remaining as u8);

    bytes.extend_from_slice(text.as_bytes());
}

pub(super) fn read_i32(bytes: &[u8], offset: &mut usize) -> Result<i32, &'static str> {
    let end = offset.checked_add(I32_SIZE).ok_or(ERR_TRUNCATED_INT)?;
    if end > bytes.len() {
        return Err(ERR_TRUNCATED_INT);
    }

    let mut buf = [0u8; I32_SIZE];
    buf.copy_from_slice(&bytes[*offset..end]);
    *offset = end;

    Ok(i32::from_le_bytes(buf))
}

pub(super) fn read_string(bytes: &[u8], offset: &mut usize) -> Result<String, &'static str> {
    let len = read_length_prefix(bytes, offset)?;

    let end = offset.checked_add(len).ok_or(ERR_LENGTH_OVERFLOW)?;
    if end > bytes.len() {
        return Err(ERR_TRUNCATED_STRING);
    }

    let text = std::str::from_utf8(&bytes[*offset..end]).map_err(|_| ERR_INVALID_UTF8)?;
    *offset = end;

    Ok(text.to_string())
}

fn read_length_prefix(bytes: &[u8], offset: &mut usize) -> Result<usize, &'static str> {
    let mut value: u32 = 0;

    for index in 0..MAX_VARINT_BYTES {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(ERR_TRUNCATED_STRING);
        };
        *offset += 1;

        // The fifth byte may only carry the top four bits of a u32.
        if index == MAX_VARINT_BYTES - 1 && byte > 0x0F {
            return Err(ERR_OVERLONG_LENGTH);
        }

        value |= u32::from(byte & 0x7F) << (7 * index);
        if byte & 0x80 == 0 {
            let len = i32::try_from(value).map_err(|_| ERR_LENGTH_OVERFLOW)?;

            return usize::try_from(len).map_err(|_| ERR_LENGTH_OVERFLOW);
        }
    }

    Err(ERR_OVERLONG_LENGTH)
}

///
/// TESTS
///
