//! Reader for boolean columns.

use tessera_common::Result;
use tessera_format::{
    encoding::ColumnEncoding, schema::BasicTypeDescriptor, stream::StreamDescriptor,
};
use tessera_sequence::value_sequence::ValueSequence;
use tessera_stream::{bit_stream::BitStream, sources::StreamSources};

use super::{ReaderState, StreamReader, nullable::NullableColumnCursor};
use crate::options::ReaderOptions;

/// Reads a boolean column: a presence bit stream plus a data bit stream holding
/// one bit per non-null row.
///
/// Values materialize as one byte per row, `0` or `1`.
#[derive(Debug)]
pub struct BooleanColumnReader {
    cursor: NullableColumnCursor<dyn BitStream>,
}

impl BooleanColumnReader {
    pub fn new(descriptor: StreamDescriptor) -> Result<BooleanColumnReader> {
        BooleanColumnReader::with_options(descriptor, ReaderOptions::default())
    }

    pub fn with_options(
        descriptor: StreamDescriptor,
        options: ReaderOptions,
    ) -> Result<BooleanColumnReader> {
        Ok(BooleanColumnReader {
            cursor: NullableColumnCursor::new(descriptor, options)?,
        })
    }

    pub fn options(&self) -> &ReaderOptions {
        self.cursor.options()
    }

    pub fn read_offset(&self) -> usize {
        self.cursor.read_offset()
    }

    pub fn next_batch_size(&self) -> usize {
        self.cursor.next_batch_size()
    }

    pub fn null_scratch_len(&self) -> usize {
        self.cursor.null_scratch_len()
    }
}

impl StreamReader for BooleanColumnReader {
    fn prepare_next_read(&mut self, batch_size: usize) {
        self.cursor.prepare_next_read(batch_size);
    }

    fn read_block(&mut self, type_desc: &BasicTypeDescriptor) -> Result<ValueSequence> {
        self.cursor.read_block(type_desc)
    }

    fn start_stripe(
        &mut self,
        _dictionary_sources: &StreamSources,
        _encodings: &[ColumnEncoding],
    ) -> Result<()> {
        self.cursor.start_stripe();
        Ok(())
    }

    fn start_row_group(&mut self, data_sources: &StreamSources) -> Result<()> {
        self.cursor.start_row_group(data_sources)
    }

    fn descriptor(&self) -> &StreamDescriptor {
        self.cursor.descriptor()
    }

    fn state(&self) -> ReaderState {
        self.cursor.state()
    }
}
