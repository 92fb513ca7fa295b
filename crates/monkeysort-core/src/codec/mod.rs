//! Module: codec
//! Responsibility: byte layout of the persisted session file.
//! Does not own: where the bytes live (see `session::storage`).
//!
//! Layout (little-endian, no header or version field):
//!
//! ```text
//! i32 element_count
//! element_count x string element
//! i32 comparison_count
//! comparison_count x (string first, string second, i32 value)
//! ```

mod error;
mod string;

use crate::{
    element::Element,
    error::InternalError,
    store::{ComparisonKey, ComparisonStore},
};
use error::{ERR_COUNT_EXCEEDS_DATA, ERR_NEGATIVE_COUNT, ERR_ZERO_VALUE};
use log::debug;
use string::{I32_SIZE, MIN_STRING_SIZE, push_i32, push_string, read_i32, read_string};

const MIN_ELEMENT_SIZE: usize = MIN_STRING_SIZE;
const MIN_COMPARISON_SIZE: usize = MIN_STRING_SIZE * 2 + I32_SIZE;

///
/// SessionSnapshot
///
/// Decoded contents of one session file.
///

#[derive(Clone, Debug)]
pub struct SessionSnapshot<E: Element> {
    pub elements: Vec<E>,
    pub store: ComparisonStore<E>,
}

/// Encode the working list and every stored answer.
pub fn encode_session<E: Element>(
    elements: &[E],
    store: &ComparisonStore<E>,
) -> Result<Vec<u8>, InternalError> {
    let mut bytes = Vec::new();

    // Phase 1: working list.
    push_i32(&mut bytes, encode_count(elements.len(), "element")?);
    for element in elements {
        push_string(&mut bytes, &element_text(element)?);
    }

    // Phase 2: answers in insertion order.
    push_i32(&mut bytes, encode_count(store.len(), "comparison")?);
    for (key, value) in store.iter() {
        push_string(&mut bytes, &element_text(&key.first)?);
        push_string(&mut bytes, &element_text(&key.second)?);
        push_i32(&mut bytes, value);
    }

    Ok(bytes)
}

/// Decode a session file into a fresh snapshot.
///
/// Any framing failure is corruption; nothing partial is returned.
/// Bytes after the last comparison are ignored.
pub fn decode_session<E: Element>(bytes: &[u8]) -> Result<SessionSnapshot<E>, InternalError> {
    decode_frames(bytes).map_err(InternalError::codec_corruption)
}

fn decode_frames<E: Element>(bytes: &[u8]) -> Result<SessionSnapshot<E>, &'static str> {
    let mut offset = 0;

    // Phase 1: working list.
    let element_count = read_count(bytes, &mut offset, MIN_ELEMENT_SIZE)?;
    let mut elements = Vec::with_capacity(element_count);
    for _ in 0..element_count {
        elements.push(E::from_text(read_string(bytes, &mut offset)?));
    }

    // Phase 2: answers.
    let comparison_count = read_count(bytes, &mut offset, MIN_COMPARISON_SIZE)?;
    let mut store = ComparisonStore::new();
    for _ in 0..comparison_count {
        let first = E::from_text(read_string(bytes, &mut offset)?);
        let second = E::from_text(read_string(bytes, &mut offset)?);
        let value = read_i32(bytes, &mut offset)?;
        if value == 0 {
            return Err(ERR_ZERO_VALUE);
        }

        store.put(ComparisonKey::new(first, second), value);
    }

    if offset != bytes.len() {
        debug!(
            "session decode ignored {} trailing bytes",
            bytes.len() - offset
        );
    }

    Ok(SessionSnapshot { elements, store })
}

// Read a count and reject values the remaining bytes cannot possibly hold.
fn read_count(
    bytes: &[u8],
    offset: &mut usize,
    min_record_size: usize,
) -> Result<usize, &'static str> {
    let count = read_i32(bytes, offset)?;
    let count = usize::try_from(count).map_err(|_| ERR_NEGATIVE_COUNT)?;

    let remaining = bytes.len() - *offset;
    if count.saturating_mul(min_record_size) > remaining {
        return Err(ERR_COUNT_EXCEEDS_DATA);
    }

    Ok(count)
}

fn encode_count(len: usize, label: &str) -> Result<i32, InternalError> {
    i32::try_from(len)
        .map_err(|_| InternalError::codec_invalid(format!("{label} count {len} exceeds i32 range")))
}

fn element_text<E: Element>(element: &E) -> Result<String, InternalError> {
    let text = element.to_text().ok_or_else(|| {
        InternalError::codec_invalid(format!("element {element:?} has no text form"))
    })?;
    if i32::try_from(text.len()).is_err() {
        return Err(InternalError::codec_invalid(format!(
            "element text of {} bytes exceeds i32 range",
            text.len()
        )));
    }

    Ok(text.into_owned())
}
