//! A materialized block of values and the builder that assembles it.

use tessera_common::{Result, verify_arg};
use tessera_format::schema::BasicTypeDescriptor;

use crate::{presence::Presence, values::Values};

/// An immutable batch of single-byte values with presence information.
///
/// Every logical row occupies one slot in `values`; null rows hold a zero byte.
/// Boolean sequences store `0` or `1` per row.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSequence {
    pub values: Values,
    pub presence: Presence,
    pub type_desc: BasicTypeDescriptor,
}

impl ValueSequence {
    /// Creates an empty sequence for a given basic type.
    pub fn empty(type_desc: BasicTypeDescriptor) -> ValueSequence {
        ValueSequence {
            values: Values::new(),
            presence: Presence::Trivial(0),
            type_desc,
        }
    }

    /// Creates a sequence with a specified number of nulls.
    pub fn nulls(type_desc: BasicTypeDescriptor, len: usize) -> ValueSequence {
        let mut values = Values::with_capacity(len);
        values.push_zeroed(len);
        ValueSequence {
            values,
            presence: Presence::Nulls(len),
            type_desc,
        }
    }

    /// Returns the number of logical rows, including nulls.
    #[inline]
    pub fn len(&self) -> usize {
        self.presence.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_null(&self, index: usize) -> bool {
        self.presence.is_null(index)
    }

    pub fn count_nulls(&self) -> usize {
        self.presence.count_nulls()
    }

    /// Returns the values viewed as one-byte elements of type `T`. Null slots read as zero.
    pub fn as_slice<T>(&self) -> &[T]
    where
        T: bytemuck::AnyBitPattern,
    {
        self.values.as_slice::<T>()
    }

    /// Returns the value at `index`, or `None` for a null row.
    pub fn get<T>(&self, index: usize) -> Option<T>
    where
        T: bytemuck::AnyBitPattern,
    {
        if self.is_null(index) {
            None
        } else {
            Some(self.as_slice::<T>()[index])
        }
    }

    /// Collects the rows as optional values, `None` for nulls.
    pub fn to_options<T>(&self) -> Vec<Option<T>>
    where
        T: bytemuck::AnyBitPattern,
    {
        (0..self.len()).map(|i| self.get::<T>(i)).collect()
    }
}

/// Appendable output buffer for a single batch.
///
/// Accepts typed appends and explicit nulls; [`ValueSequenceBuilder::build`]
/// consumes the builder and yields the immutable [`ValueSequence`].
#[derive(Debug)]
pub struct ValueSequenceBuilder {
    values: Values,
    presence: Presence,
    type_desc: BasicTypeDescriptor,
}

impl ValueSequenceBuilder {
    /// Creates a builder for single-byte elements with room for `capacity` rows.
    pub fn with_capacity(
        type_desc: BasicTypeDescriptor,
        capacity: usize,
    ) -> Result<ValueSequenceBuilder> {
        verify_arg!(type_desc, type_desc.value_width() == Some(1));
        Ok(ValueSequenceBuilder {
            values: Values::with_capacity(capacity),
            presence: Presence::Trivial(0),
            type_desc,
        })
    }

    pub fn type_desc(&self) -> BasicTypeDescriptor {
        self.type_desc
    }

    /// Number of rows appended so far.
    pub fn len(&self) -> usize {
        self.presence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push_value<T>(&mut self, value: T)
    where
        T: bytemuck::NoUninit,
    {
        debug_assert_eq!(std::mem::size_of::<T>(), 1);
        self.values.push(value);
        self.presence.extend_with_non_nulls(1);
    }

    pub fn push_null(&mut self) {
        self.push_nulls(1);
    }

    pub fn push_nulls(&mut self, count: usize) {
        self.values.push_zeroed(count);
        self.presence.extend_with_nulls(count);
    }

    /// Appends non-null values.
    pub fn extend_from_slice(&mut self, values: &[u8]) {
        self.values.extend_from_slice(values);
        self.presence.extend_with_non_nulls(values.len());
    }

    /// Appends `count` non-null rows, letting `fill` decode directly into the
    /// value slots.
    pub fn append_values(
        &mut self,
        count: usize,
        fill: impl FnOnce(&mut [u8]) -> Result<()>,
    ) -> Result<()> {
        self.values.append(count, fill)?;
        self.presence.extend_with_non_nulls(count);
        Ok(())
    }

    /// Appends one row per entry of `null_mask` (`true` marks a null).
    ///
    /// `fill` receives a slice sized to the number of non-null rows and must
    /// write their values in order; they are then spread over the non-null
    /// slots in place.
    pub fn append_masked(
        &mut self,
        null_mask: &[bool],
        fill: impl FnOnce(&mut [u8]) -> Result<()>,
    ) -> Result<()> {
        let count = null_mask.len();
        let non_nulls = null_mask.iter().filter(|&&is_null| !is_null).count();
        self.values.append(count, |slots| -> Result<()> {
            fill(&mut slots[..non_nulls])?;
            spread_non_nulls(slots, null_mask, non_nulls);
            Ok(())
        })?;
        self.presence.extend_with_null_mask(null_mask);
        Ok(())
    }

    /// Consumes the builder and returns the finished sequence.
    pub fn build(self) -> ValueSequence {
        debug_assert_eq!(self.values.len(), self.presence.len());
        ValueSequence {
            values: self.values,
            presence: self.presence,
            type_desc: self.type_desc,
        }
    }
}

/// Moves the first `non_nulls` packed values of `slots` to their row positions,
/// zeroing the null rows. Walks from the back so no value is overwritten before
/// it is moved.
fn spread_non_nulls(slots: &mut [u8], null_mask: &[bool], non_nulls: usize) {
    let mut src = non_nulls;
    for dst in (0..slots.len()).rev() {
        if null_mask[dst] {
            slots[dst] = 0;
        } else {
            src -= 1;
            slots[dst] = slots[src];
        }
    }
    debug_assert_eq!(src, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_format::schema::{BasicType, BasicTypeDescriptor};

    #[test]
    fn test_builder_rejects_wide_types() {
        let desc = BasicTypeDescriptor::new(BasicType::Int32, true);
        assert!(ValueSequenceBuilder::with_capacity(desc, 4).is_err());
        assert!(ValueSequenceBuilder::with_capacity(BasicTypeDescriptor::BOOLEAN, 4).is_ok());
    }

    #[test]
    fn test_builder_mixed_appends() {
        let mut builder = ValueSequenceBuilder::with_capacity(BasicTypeDescriptor::INT8, 6).unwrap();
        builder.push_value(-3i8);
        builder.push_null();
        builder.extend_from_slice(&[1, 2]);
        builder.push_nulls(2);
        let seq = builder.build();
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.count_nulls(), 3);
        assert_eq!(
            seq.to_options::<i8>(),
            vec![Some(-3), None, Some(1), Some(2), None, None]
        );
        assert_eq!(seq.as_slice::<u8>(), &[253, 0, 1, 2, 0, 0]);
    }

    #[test]
    fn test_append_masked_spreads_values() {
        let mut builder = ValueSequenceBuilder::with_capacity(BasicTypeDescriptor::UINT8, 5).unwrap();
        let mask = [false, true, false, false, true];
        builder
            .append_masked(&mask, |dst| {
                assert_eq!(dst.len(), 3);
                dst.copy_from_slice(&[10, 20, 30]);
                Ok(())
            })
            .unwrap();
        let seq = builder.build();
        assert_eq!(seq.as_slice::<u8>(), &[10, 0, 20, 30, 0]);
        assert_eq!(
            seq.to_options::<u8>(),
            vec![Some(10), None, Some(20), Some(30), None]
        );
    }

    #[test]
    fn test_blocks_with_same_rows_are_equal() {
        let mut masked = ValueSequenceBuilder::with_capacity(BasicTypeDescriptor::UINT8, 2).unwrap();
        masked
            .append_masked(&[false, false], |dst| {
                dst.copy_from_slice(&[7, 8]);
                Ok(())
            })
            .unwrap();
        let mut dense = ValueSequenceBuilder::with_capacity(BasicTypeDescriptor::UINT8, 2).unwrap();
        dense.extend_from_slice(&[7, 8]);
        assert_eq!(masked.build(), dense.build());
    }

    #[test]
    fn test_append_values_error_propagates() {
        let mut builder = ValueSequenceBuilder::with_capacity(BasicTypeDescriptor::UINT8, 2).unwrap();
        let result = builder.append_values(2, |_| {
            Err(tessera_common::error::Error::invalid_format("stream"))
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_nulls_sequence() {
        let seq = ValueSequence::nulls(BasicTypeDescriptor::INT8, 3);
        assert_eq!(seq.len(), 3);
        assert!(seq.presence.is_trivial_all_null());
        assert_eq!(seq.get::<i8>(1), None);
        assert!(ValueSequence::empty(BasicTypeDescriptor::INT8).is_empty());
    }
}
