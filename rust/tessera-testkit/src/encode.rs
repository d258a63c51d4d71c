//! Minimal substream encoders for building test inputs.
//!
//! The encoders emit only literal groups (and, on request, run groups), which is
//! enough to produce valid byte run-length streams of any content.

/// Largest number of bytes a single literal group can hold.
const MAX_LITERAL_SIZE: usize = 128;

/// Encodes `values` as a sequence of literal groups.
pub fn encode_literal_bytes(values: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() + values.len() / MAX_LITERAL_SIZE + 1);
    for chunk in values.chunks(MAX_LITERAL_SIZE) {
        out.push((-(chunk.len() as i16)) as u8);
        out.extend_from_slice(chunk);
    }
    out
}

/// Encodes a single run group of `len` copies of `value`.
///
/// # Panics
///
/// Panics if `len` is not within `3..=130`.
pub fn encode_run(value: u8, len: usize) -> Vec<u8> {
    assert!((3..=130).contains(&len));
    vec![(len - 3) as u8, value]
}

/// Packs bits most-significant-bit first; the last byte is padded with zeros.
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &bit)| acc | (u8::from(bit) << (7 - i)))
        })
        .collect()
}

/// Encodes a bit sequence as a presence/boolean substream.
pub fn encode_bits(bits: &[bool]) -> Vec<u8> {
    encode_literal_bytes(&pack_bits(bits))
}

/// Encodes presence bits given as `0`/`1` integers, as they are usually written
/// in test tables.
pub fn encode_bit_digits(bits: &[u8]) -> Vec<u8> {
    let bits: Vec<bool> = bits.iter().map(|&b| b != 0).collect();
    encode_bits(&bits)
}
