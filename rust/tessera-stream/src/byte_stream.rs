//! Single-byte data substreams.

use std::sync::Arc;

use tessera_common::{Result, verify_arg};
use tessera_sequence::value_sequence::ValueSequenceBuilder;

use crate::byte_rle::ByteRleDecoder;

/// A forward-only decoder of single-byte values, one per non-null row.
pub trait ByteStream: Send {
    /// Advances the stream by `count` values.
    fn skip(&mut self, count: usize) -> Result<()>;

    /// Decodes exactly `dst.len()` values into `dst`.
    fn read_values(&mut self, dst: &mut [u8]) -> Result<()>;

    /// Appends the next `count` values to `builder`.
    fn next_vector(&mut self, count: usize, builder: &mut ValueSequenceBuilder) -> Result<()> {
        builder.append_values(count, |dst| self.read_values(dst))
    }

    /// Appends `count` rows to `builder`: a null where `null_mask[i]` is `true`,
    /// otherwise the next value from the stream.
    fn next_vector_with_nulls(
        &mut self,
        count: usize,
        builder: &mut ValueSequenceBuilder,
        null_mask: &[bool],
    ) -> Result<()> {
        verify_arg!(null_mask, null_mask.len() >= count);
        builder.append_masked(&null_mask[..count], |dst| self.read_values(dst))
    }
}

/// Run-length encoded byte stream.
#[derive(Debug, Clone)]
pub struct ByteRleStream {
    decoder: ByteRleDecoder,
}

impl ByteRleStream {
    pub fn new(data: Arc<[u8]>) -> ByteRleStream {
        ByteRleStream {
            decoder: ByteRleDecoder::new(data),
        }
    }
}

impl ByteStream for ByteRleStream {
    fn skip(&mut self, count: usize) -> Result<()> {
        self.decoder.skip(count)
    }

    fn read_values(&mut self, dst: &mut [u8]) -> Result<()> {
        self.decoder.read_into(dst)
    }
}
