//! Byte run-length decoding.
//!
//! The encoded stream is a sequence of groups, each starting with a signed control
//! byte `h`:
//! - `0 <= h <= 127`: a run; the next byte is repeated `h + 3` times.
//! - `h < 0`: a literal group; the next `-h` bytes are emitted as is.
//!
//! Both the single-byte data substream and the bit-packed presence substream are
//! stored in this form. Reading past the end of the input, or a literal group
//! that overruns it, is reported as corrupted column data.

use std::sync::Arc;

use tessera_common::{Result, error::Error};

/// Smallest run length a run group can encode.
const MIN_REPEAT_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Repeat(u8),
    Literal,
}

/// Forward-only decoder over a byte run-length encoded buffer.
#[derive(Debug, Clone)]
pub struct ByteRleDecoder {
    data: Arc<[u8]>,
    /// Read position of the next undecoded input byte.
    offset: usize,
    group: Group,
    /// Values left in the current group.
    remaining: usize,
}

impl ByteRleDecoder {
    pub fn new(data: Arc<[u8]>) -> ByteRleDecoder {
        ByteRleDecoder {
            data,
            offset: 0,
            group: Group::Literal,
            remaining: 0,
        }
    }

    /// Returns `true` if every encoded value has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0 && self.offset >= self.data.len()
    }

    /// Decodes the next value.
    pub fn next_value(&mut self) -> Result<u8> {
        self.ensure_group()?;
        self.remaining -= 1;
        match self.group {
            Group::Repeat(value) => Ok(value),
            Group::Literal => {
                let value = self.data[self.offset];
                self.offset += 1;
                Ok(value)
            }
        }
    }

    /// Skips `count` values.
    pub fn skip(&mut self, mut count: usize) -> Result<()> {
        while count > 0 {
            self.ensure_group()?;
            let step = count.min(self.remaining);
            if self.group == Group::Literal {
                self.offset += step;
            }
            self.remaining -= step;
            count -= step;
        }
        Ok(())
    }

    /// Decodes exactly `dst.len()` values into `dst`.
    pub fn read_into(&mut self, dst: &mut [u8]) -> Result<()> {
        let mut pos = 0;
        while pos < dst.len() {
            self.ensure_group()?;
            let step = (dst.len() - pos).min(self.remaining);
            let target = &mut dst[pos..pos + step];
            match self.group {
                Group::Repeat(value) => target.fill(value),
                Group::Literal => {
                    target.copy_from_slice(&self.data[self.offset..self.offset + step]);
                    self.offset += step;
                }
            }
            self.remaining -= step;
            pos += step;
        }
        Ok(())
    }

    /// Makes sure the current group has at least one value left, reading the next
    /// group header if needed.
    #[inline]
    fn ensure_group(&mut self) -> Result<()> {
        if self.remaining == 0 {
            self.read_group_header()?;
        }
        Ok(())
    }

    fn read_group_header(&mut self) -> Result<()> {
        let control = self.next_input_byte()? as i8;
        if control >= 0 {
            let value = self.next_input_byte()?;
            self.group = Group::Repeat(value);
            self.remaining = control as usize + MIN_REPEAT_SIZE;
        } else {
            let len = control.unsigned_abs() as usize;
            if self.offset + len > self.data.len() {
                return Err(Error::corruption(
                    "byte run-length stream",
                    format!(
                        "literal group of {len} bytes at offset {} exceeds stream length {}",
                        self.offset,
                        self.data.len()
                    ),
                ));
            }
            self.group = Group::Literal;
            self.remaining = len;
        }
        Ok(())
    }

    fn next_input_byte(&mut self) -> Result<u8> {
        let byte = *self.data.get(self.offset).ok_or_else(|| {
            Error::corruption("byte run-length stream", "unexpected end of stream")
        })?;
        self.offset += 1;
        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_testkit::encode::encode_literal_bytes;

    fn decoder(bytes: &[u8]) -> ByteRleDecoder {
        ByteRleDecoder::new(Arc::from(bytes))
    }

    #[test]
    fn test_decode_run() {
        // control 2 => 5 copies of 7
        let mut dec = decoder(&[2, 7]);
        let mut out = [0u8; 5];
        dec.read_into(&mut out).unwrap();
        assert_eq!(out, [7; 5]);
        assert!(dec.is_exhausted());
    }

    #[test]
    fn test_decode_literals_and_runs() {
        // literal [1, 2], run of 3 x 9, literal [4]
        let mut dec = decoder(&[0xfe, 1, 2, 0, 9, 0xff, 4]);
        let values: Vec<u8> = (0..6).map(|_| dec.next_value().unwrap()).collect();
        assert_eq!(values, vec![1, 2, 9, 9, 9, 4]);
        assert!(dec.is_exhausted());
    }

    #[test]
    fn test_skip_across_groups() {
        let mut dec = decoder(&[0xfe, 1, 2, 1, 9, 0xfd, 4, 5, 6]);
        dec.skip(3).unwrap();
        assert_eq!(dec.next_value().unwrap(), 9);
        dec.skip(3).unwrap();
        assert_eq!(dec.next_value().unwrap(), 5);
        dec.skip(1).unwrap();
        assert!(dec.is_exhausted());
    }

    #[test]
    fn test_read_past_end() {
        let mut dec = decoder(&[0xff, 1]);
        assert_eq!(dec.next_value().unwrap(), 1);
        let err = dec.next_value().unwrap_err();
        assert!(err.is_corruption());
        assert!(err.to_string().contains("unexpected end of stream"));
    }

    #[test]
    fn test_truncated_literal_group() {
        let mut dec = decoder(&[0xfc, 1, 2]);
        assert!(dec.skip(1).unwrap_err().is_corruption());
    }

    #[test]
    fn test_truncated_run_group() {
        let mut dec = decoder(&[5]);
        assert!(dec.next_value().is_err());
    }

    #[test]
    fn test_random_chunked_reads() {
        fastrand::seed(8812731);
        let values: Vec<u8> = (0..1000).map(|_| fastrand::u8(..)).collect();
        let mut dec = decoder(&encode_literal_bytes(&values));
        let mut pos = 0;
        while pos < values.len() {
            let n = fastrand::usize(1..40).min(values.len() - pos);
            if fastrand::bool() {
                dec.skip(n).unwrap();
            } else {
                let mut out = vec![0u8; n];
                dec.read_into(&mut out).unwrap();
                assert_eq!(out, &values[pos..pos + n]);
            }
            pos += n;
        }
        assert!(dec.is_exhausted());
    }
}
