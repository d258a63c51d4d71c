//! Bit substreams: presence bits and boolean values.
//!
//! Bits are packed most-significant-bit first into bytes, and the packed bytes are
//! byte run-length encoded (see [`crate::byte_rle`]). A presence bit is set when the
//! corresponding logical row is non-null.

use std::sync::Arc;

use tessera_common::{Result, verify_arg};
use tessera_sequence::value_sequence::ValueSequenceBuilder;

use crate::byte_rle::ByteRleDecoder;

/// A forward-only decoder of a sequence of bits.
///
/// Every operation advances the stream by exactly the requested number of bits.
pub trait BitStream: Send {
    /// Advances the stream by `count` bits.
    fn skip(&mut self, count: usize) -> Result<()>;

    /// Advances the stream by `count` bits and returns how many of them were set.
    fn count_bits_set(&mut self, count: usize) -> Result<usize>;

    /// Reads the next `count` bits, writing `null_mask[i] = true` iff bit `i` is
    /// unset, and returns the number of unset bits.
    ///
    /// `null_mask` must hold at least `count` entries; entries past `count` are
    /// left untouched.
    fn get_unset_bits(&mut self, count: usize, null_mask: &mut [bool]) -> Result<usize>;

    /// Reads `dst.len()` bits, writing `0` or `1` per bit.
    fn read_bits(&mut self, dst: &mut [u8]) -> Result<()>;

    /// Appends the next `count` bits to `builder` as non-null boolean values.
    fn next_vector(&mut self, count: usize, builder: &mut ValueSequenceBuilder) -> Result<()> {
        builder.append_values(count, |dst| self.read_bits(dst))
    }

    /// Appends `count` rows to `builder`: a null where `null_mask[i]` is `true`,
    /// otherwise the next bit as a boolean value.
    fn next_vector_with_nulls(
        &mut self,
        count: usize,
        builder: &mut ValueSequenceBuilder,
        null_mask: &[bool],
    ) -> Result<()> {
        verify_arg!(null_mask, null_mask.len() >= count);
        builder.append_masked(&null_mask[..count], |dst| self.read_bits(dst))
    }
}

/// Run-length encoded bit stream.
#[derive(Debug, Clone)]
pub struct BooleanRleStream {
    decoder: ByteRleDecoder,
    /// Byte holding the next unread bits in its low `bits_left` positions.
    current: u8,
    bits_left: u32,
}

impl BooleanRleStream {
    pub fn new(data: Arc<[u8]>) -> BooleanRleStream {
        BooleanRleStream {
            decoder: ByteRleDecoder::new(data),
            current: 0,
            bits_left: 0,
        }
    }

    #[inline]
    fn next_bit(&mut self) -> Result<bool> {
        if self.bits_left == 0 {
            self.current = self.decoder.next_value()?;
            self.bits_left = 8;
        }
        self.bits_left -= 1;
        Ok((self.current >> self.bits_left) & 1 == 1)
    }

    /// Consumes up to `count` bits from the current byte, returning the number of
    /// bits consumed and how many of them were set.
    #[inline]
    fn take_buffered(&mut self, count: usize) -> (usize, usize) {
        let take = (self.bits_left as usize).min(count) as u32;
        if take == 0 {
            return (0, 0);
        }
        let shifted = u32::from(self.current) >> (self.bits_left - take);
        let set = (shifted & ((1u32 << take) - 1)).count_ones() as usize;
        self.bits_left -= take;
        (take as usize, set)
    }
}

impl BitStream for BooleanRleStream {
    fn skip(&mut self, count: usize) -> Result<()> {
        let (taken, _) = self.take_buffered(count);
        let rest = count - taken;
        if rest == 0 {
            return Ok(());
        }
        self.decoder.skip(rest / 8)?;
        let tail = (rest % 8) as u32;
        if tail > 0 {
            self.current = self.decoder.next_value()?;
            self.bits_left = 8 - tail;
        }
        Ok(())
    }

    fn count_bits_set(&mut self, count: usize) -> Result<usize> {
        let (taken, mut set) = self.take_buffered(count);
        let rest = count - taken;
        if rest == 0 {
            return Ok(set);
        }

        let mut chunk = [0u8; 256];
        let mut whole_bytes = rest / 8;
        while whole_bytes > 0 {
            let n = whole_bytes.min(chunk.len());
            self.decoder.read_into(&mut chunk[..n])?;
            set += chunk[..n]
                .iter()
                .map(|b| b.count_ones() as usize)
                .sum::<usize>();
            whole_bytes -= n;
        }

        let tail = (rest % 8) as u32;
        if tail > 0 {
            self.current = self.decoder.next_value()?;
            self.bits_left = 8;
            let (_, tail_set) = self.take_buffered(tail as usize);
            set += tail_set;
        }
        Ok(set)
    }

    fn get_unset_bits(&mut self, count: usize, null_mask: &mut [bool]) -> Result<usize> {
        verify_arg!(null_mask, null_mask.len() >= count);
        let mut unset = 0;
        for slot in &mut null_mask[..count] {
            let is_null = !self.next_bit()?;
            *slot = is_null;
            unset += usize::from(is_null);
        }
        Ok(unset)
    }

    fn read_bits(&mut self, dst: &mut [u8]) -> Result<()> {
        for slot in dst.iter_mut() {
            *slot = u8::from(self.next_bit()?);
        }
        Ok(())
    }
}
