//! Column reader trait and implementations.

use tessera_common::{Result, error::Error};
use tessera_format::{
    encoding::ColumnEncoding,
    schema::{BasicType, BasicTypeDescriptor},
    stream::StreamDescriptor,
};
use tessera_sequence::value_sequence::ValueSequence;
use tessera_stream::sources::StreamSources;

use crate::options::ReaderOptions;

use boolean::BooleanColumnReader;
use byte::ByteColumnReader;

pub mod boolean;
pub mod byte;

mod nullable;

/// Lifecycle position of a column reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Created; no stripe has been started.
    Fresh,
    /// A stripe has been started; no row group sources are bound.
    StripeBound,
    /// Row group sources are bound but their substreams are not opened yet.
    RowGroupBound,
    /// The row group substreams have been opened by a `read_block`.
    RowGroupOpen,
}

/// A reader that materializes batches of a single column, one row group at a
/// time.
///
/// Rows are consumed strictly forward. `prepare_next_read` only queues work;
/// rows declared by a previous `prepare_next_read` that were never read are
/// skipped by the next `read_block`.
pub trait StreamReader: Send {
    /// Declares the size of the next batch.
    ///
    /// The previously declared batch, if not read, is queued for skipping.
    fn prepare_next_read(&mut self, batch_size: usize);

    /// Materializes the declared batch as a sequence of `type_desc` elements.
    ///
    /// # Errors
    ///
    /// Returns a corruption error when a non-null row has no value in the data
    /// substream or a substream ends early, and propagates any substream I/O or format error. A failed
    /// batch leaves the reader unusable until the next `start_row_group` or
    /// `start_stripe`.
    fn read_block(&mut self, type_desc: &BasicTypeDescriptor) -> Result<ValueSequence>;

    /// Resets the reader for a new stripe. Row group sources are unbound.
    fn start_stripe(
        &mut self,
        dictionary_sources: &StreamSources,
        encodings: &[ColumnEncoding],
    ) -> Result<()>;

    /// Binds the presence and data substreams of a new row group. Opening them
    /// is deferred to the next `read_block`.
    fn start_row_group(&mut self, data_sources: &StreamSources) -> Result<()>;

    /// The column this reader decodes.
    fn descriptor(&self) -> &StreamDescriptor;

    fn state(&self) -> ReaderState;
}

/// Column reader for one of the supported column types.
#[derive(Debug)]
pub enum ColumnReader {
    /// Single-byte integer columns.
    Byte(ByteColumnReader),
    /// Boolean columns.
    Boolean(BooleanColumnReader),
}

impl ColumnReader {
    /// Creates a reader for the column described by `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns a `NotImplemented` error for column types without a reader.
    pub fn new(descriptor: StreamDescriptor, options: ReaderOptions) -> Result<ColumnReader> {
        let type_desc = descriptor.type_desc();
        match type_desc.basic_type {
            BasicType::Int8 => Ok(ColumnReader::Byte(ByteColumnReader::with_options(
                descriptor, options,
            )?)),
            BasicType::Boolean => Ok(ColumnReader::Boolean(BooleanColumnReader::with_options(
                descriptor, options,
            )?)),
            other => Err(Error::not_implemented(format!(
                "column reader for {other:?} column '{descriptor}'"
            ))),
        }
    }
}

impl StreamReader for ColumnReader {
    fn prepare_next_read(&mut self, batch_size: usize) {
        match self {
            ColumnReader::Byte(reader) => reader.prepare_next_read(batch_size),
            ColumnReader::Boolean(reader) => reader.prepare_next_read(batch_size),
        }
    }

    fn read_block(&mut self, type_desc: &BasicTypeDescriptor) -> Result<ValueSequence> {
        match self {
            ColumnReader::Byte(reader) => reader.read_block(type_desc),
            ColumnReader::Boolean(reader) => reader.read_block(type_desc),
        }
    }

    fn start_stripe(
        &mut self,
        dictionary_sources: &StreamSources,
        encodings: &[ColumnEncoding],
    ) -> Result<()> {
        match self {
            ColumnReader::Byte(reader) => reader.start_stripe(dictionary_sources, encodings),
            ColumnReader::Boolean(reader) => reader.start_stripe(dictionary_sources, encodings),
        }
    }

    fn start_row_group(&mut self, data_sources: &StreamSources) -> Result<()> {
        match self {
            ColumnReader::Byte(reader) => reader.start_row_group(data_sources),
            ColumnReader::Boolean(reader) => reader.start_row_group(data_sources),
        }
    }

    fn descriptor(&self) -> &StreamDescriptor {
        match self {
            ColumnReader::Byte(reader) => reader.descriptor(),
            ColumnReader::Boolean(reader) => reader.descriptor(),
        }
    }

    fn state(&self) -> ReaderState {
        match self {
            ColumnReader::Byte(reader) => reader.state(),
            ColumnReader::Boolean(reader) => reader.state(),
        }
    }
}
