//! Reader for single-byte integer columns.

use tessera_common::Result;
use tessera_format::{
    encoding::ColumnEncoding, schema::BasicTypeDescriptor, stream::StreamDescriptor,
};
use tessera_sequence::value_sequence::ValueSequence;
use tessera_stream::{byte_stream::ByteStream, sources::StreamSources};

use super::{ReaderState, StreamReader, nullable::NullableColumnCursor};
use crate::options::ReaderOptions;

/// Reads a column of single-byte integers stored as a presence bit stream and a
/// byte data stream holding one value per non-null row.
///
/// Either substream may be absent in a row group: no presence stream means the
/// row group has no nulls, no data stream means it has only nulls. A non-null
/// row without a data stream is reported as corruption.
#[derive(Debug)]
pub struct ByteColumnReader {
    cursor: NullableColumnCursor<dyn ByteStream>,
}

impl ByteColumnReader {
    /// Creates a reader with default options.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if the column is not a single-byte
    /// integer column.
    pub fn new(descriptor: StreamDescriptor) -> Result<ByteColumnReader> {
        ByteColumnReader::with_options(descriptor, ReaderOptions::default())
    }

    pub fn with_options(
        descriptor: StreamDescriptor,
        options: ReaderOptions,
    ) -> Result<ByteColumnReader> {
        Ok(ByteColumnReader {
            cursor: NullableColumnCursor::new(descriptor, options)?,
        })
    }

    pub fn options(&self) -> &ReaderOptions {
        self.cursor.options()
    }

    /// Rows queued for skipping before the next batch.
    pub fn read_offset(&self) -> usize {
        self.cursor.read_offset()
    }

    /// Rows the next `read_block` materializes.
    pub fn next_batch_size(&self) -> usize {
        self.cursor.next_batch_size()
    }

    /// Current length of the reusable null mask buffer.
    pub fn null_scratch_len(&self) -> usize {
        self.cursor.null_scratch_len()
    }
}

impl StreamReader for ByteColumnReader {
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
