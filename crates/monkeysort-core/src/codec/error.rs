//! Module: codec::error
//! Responsibility: stable corruption reason strings for session-file decode.

pub(super) const ERR_TRUNCATED_INT: &str = "corrupted session: truncated i32 field";
pub(super) const ERR_TRUNCATED_STRING: &str = "corrupted session: truncated string";
pub(super) const ERR_OVERLONG_LENGTH: &str = "corrupted session: overlong string length prefix";
pub(super) const ERR_LENGTH_OVERFLOW: &str = "corrupted session: string length overflow";
pub(super) const ERR_INVALID_UTF8: &str = "corrupted session: string is not valid UTF-8";
pub(super) const ERR_NEGATIVE_COUNT: &str = "corrupted session: negative count";
pub(super) const ERR_COUNT_EXCEEDS_DATA: &str = "corrupted session: count exceeds remaining data";
pub(super) const ERR_ZERO_VALUE: &str = "corrupted session: comparison value is zero";
