//! Batch orchestration over a presence substream and a data substream.

use std::fmt;

use log::{debug, trace};
use tessera_common::{Result, error::Error};
use tessera_format::{
    schema::{BasicType, BasicTypeDescriptor},
    stream::{StreamDescriptor, StreamKind},
};
use tessera_sequence::value_sequence::{ValueSequence, ValueSequenceBuilder};
use tessera_stream::{
    bit_stream::BitStream,
    byte_stream::ByteStream,
    source::{SharedStreamSource, missing_stream_source},
    sources::StreamSources,
};

use crate::{column_reader::ReaderState, options::ReaderOptions};

/// The data substream of a nullable column: one entry per non-null row.
pub(crate) trait DataStream: Send {
    /// Returns `true` if rows of this stream materialize as `type_desc`.
    fn accepts(type_desc: &BasicTypeDescriptor) -> bool;

    fn skip_values(&mut self, count: usize) -> Result<()>;

    fn next_values(&mut self, count: usize, builder: &mut ValueSequenceBuilder) -> Result<()>;

    fn next_values_with_nulls(
        &mut self,
        count: usize,
        builder: &mut ValueSequenceBuilder,
        null_mask: &[bool],
    ) -> Result<()>;
}

impl DataStream for dyn ByteStream {
    fn accepts(type_desc: &BasicTypeDescriptor) -> bool {
        type_desc.is_single_byte()
    }

    fn skip_values(&mut self, count: usize) -> Result<()> {
        self.skip(count)
    }

    fn next_values(&mut self, count: usize, builder: &mut ValueSequenceBuilder) -> Result<()> {
        self.next_vector(count, builder)
    }

    fn next_values_with_nulls(
        &mut self,
        count: usize,
        builder: &mut ValueSequenceBuilder,
        null_mask: &[bool],
    ) -> Result<()> {
        self.next_vector_with_nulls(count, builder, null_mask)
    }
}

impl DataStream for dyn BitStream {
    fn accepts(type_desc: &BasicTypeDescriptor) -> bool {
        type_desc.basic_type == BasicType::Boolean
    }

    fn skip_values(&mut self, count: usize) -> Result<()> {
        self.skip(count)
    }

    fn next_values(&mut self, count: usize, builder: &mut ValueSequenceBuilder) -> Result<()> {
        self.next_vector(count, builder)
    }

    fn next_values_with_nulls(
        &mut self,
        count: usize,
        builder: &mut ValueSequenceBuilder,
        null_mask: &[bool],
    ) -> Result<()> {
        self.next_vector_with_nulls(count, builder, null_mask)
    }
}

/// Reader state shared by the column readers whose rows are a presence bit
/// plus, for non-null rows, one entry of a data substream `D`.
pub(crate) struct NullableColumnCursor<D: ?Sized> {
    descriptor: StreamDescriptor,
    options: ReaderOptions,
    state: ReaderState,
    /// Logical rows queued for skipping before the next batch.
    read_offset: usize,
    next_batch_size: usize,
    presence_source: SharedStreamSource<dyn BitStream>,
    data_source: SharedStreamSource<D>,
    /// `None` once opened means the row group has no nulls.
    presence_stream: Option<Box<dyn BitStream>>,
    /// `None` once opened means the row group has no non-null values.
    data_stream: Option<Box<D>>,
    /// `true` marks a null row; never shorter than the last batch unless a
    /// retain limit applies.
    null_scratch: Vec<bool>,
    row_group_opened: bool,
}

impl<D> NullableColumnCursor<D>
where
    D: DataStream + ?Sized + 'static,
{
    pub fn new(descriptor: StreamDescriptor, options: ReaderOptions) -> Result<Self> {
        let type_desc = descriptor.type_desc();
        if !D::accepts(&type_desc) {
            return Err(Error::invalid_arg(
                "descriptor",
                format!("column '{descriptor}' of type {type_desc:?} is not supported"),
            ));
        }
        Ok(NullableColumnCursor {
            descriptor,
            options,
            state: ReaderState::Fresh,
            read_offset: 0,
            next_batch_size: 0,
            presence_source: missing_stream_source(),
            data_source: missing_stream_source(),
            presence_stream: None,
            data_stream: None,
            null_scratch: Vec::new(),
            row_group_opened: false,
        })
    }

    pub fn descriptor(&self) -> &StreamDescriptor {
        &self.descriptor
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn read_offset(&self) -> usize {
        self.read_offset
    }

    pub fn next_batch_size(&self) -> usize {
        self.next_batch_size
    }

    pub fn null_scratch_len(&self) -> usize {
        self.null_scratch.len()
    }

    pub fn prepare_next_read(&mut self, batch_size: usize) {
        self.read_offset += self.next_batch_size;
        self.next_batch_size = batch_size;
    }

    pub fn start_stripe(&mut self) {
        self.presence_source = missing_stream_source();
        self.data_source = missing_stream_source();
        self.reset_row_group();
        self.state = ReaderState::StripeBound;
        debug!("column '{}': stripe started", self.descriptor);
    }

    pub fn start_row_group(&mut self, data_sources: &StreamSources) -> Result<()> {
        let presence_source = data_sources
            .get_stream_source::<dyn BitStream>(&self.descriptor, StreamKind::Present)?;
        let data_source = data_sources.get_stream_source::<D>(&self.descriptor, StreamKind::Data)?;
        self.presence_source = presence_source;
        self.data_source = data_source;
        self.reset_row_group();
        self.state = ReaderState::RowGroupBound;
        debug!(
            "column '{}': row group bound (present: {}, data: {})",
            self.descriptor,
            data_sources.contains(&self.descriptor, StreamKind::Present),
            data_sources.contains(&self.descriptor, StreamKind::Data),
        );
        Ok(())
    }

    pub fn read_block(&mut self, type_desc: &BasicTypeDescriptor) -> Result<ValueSequence> {
        self.check_element_type(type_desc)?;

        if matches!(self.state, ReaderState::Fresh | ReaderState::StripeBound) {
            if self.next_batch_size > 0 {
                return Err(Error::invalid_operation(format!(
                    "read_block on column '{}' before start_row_group",
                    self.descriptor
                )));
            }
            self.read_offset = 0;
            return Ok(ValueSequence::empty(*type_desc));
        }

        self.open_row_group()?;
        self.skip_pending()?;

        let batch_size = self.next_batch_size;
        let mut builder = ValueSequenceBuilder::with_capacity(*type_desc, batch_size)?;
        if batch_size > 0 {
            self.materialize(batch_size, &mut builder)?;
        }

        self.read_offset = 0;
        self.next_batch_size = 0;
        self.release_null_scratch();
        Ok(builder.build())
    }

    fn check_element_type(&self, type_desc: &BasicTypeDescriptor) -> Result<()> {
        if !D::accepts(type_desc) {
            return Err(Error::invalid_arg(
                "type_desc",
                format!(
                    "{type_desc:?} is not a valid element type for column '{}'",
                    self.descriptor
                ),
            ));
        }
        if self.options.is_strict() && *type_desc != self.descriptor.type_desc() {
            return Err(Error::invalid_arg(
                "type_desc",
                format!(
                    "{type_desc:?} does not match column '{}' of type {:?}",
                    self.descriptor,
                    self.descriptor.type_desc()
                ),
            ));
        }
        Ok(())
    }

    fn reset_row_group(&mut self) {
        self.read_offset = 0;
        self.next_batch_size = 0;
        self.presence_stream = None;
        self.data_stream = None;
        self.row_group_opened = false;
    }

    fn open_row_group(&mut self) -> Result<()> {
        if self.row_group_opened {
            return Ok(());
        }
        self.presence_stream = self.presence_source.open_stream()?;
        self.data_stream = self.data_source.open_stream()?;
        self.row_group_opened = true;
        self.state = ReaderState::RowGroupOpen;
        trace!(
            "column '{}': row group opened (present: {}, data: {})",
            self.descriptor,
            self.presence_stream.is_some(),
            self.data_stream.is_some(),
        );
        Ok(())
    }

    /// Advances both substreams past the queued rows. The presence bits decide
    /// how many data entries the queued rows occupy.
    fn skip_pending(&mut self) -> Result<()> {
        let rows = self.read_offset;
        if rows == 0 {
            return Ok(());
        }
        let values = match self.presence_stream.as_mut() {
            Some(presence) => presence.count_bits_set(rows)?,
            None => rows,
        };
        if values > 0 {
            let data = self
                .data_stream
                .as_mut()
                .ok_or_else(|| missing_data_stream(&self.descriptor))?;
            data.skip_values(values)?;
        }
        self.read_offset = 0;
        trace!(
            "column '{}': skipped {rows} rows ({values} values)",
            self.descriptor
        );
        Ok(())
    }

    fn materialize(&mut self, batch_size: usize, builder: &mut ValueSequenceBuilder) -> Result<()> {
        let Some(presence) = self.presence_stream.as_mut() else {
            let data = self
                .data_stream
                .as_mut()
                .ok_or_else(|| missing_data_stream(&self.descriptor))?;
            data.next_values(batch_size, builder)?;
            trace!(
                "column '{}': read {batch_size} non-null rows",
                self.descriptor
            );
            return Ok(());
        };

        if self.null_scratch.len() < batch_size {
            self.null_scratch.resize(batch_size, false);
        }
        let nulls = presence.get_unset_bits(batch_size, &mut self.null_scratch)?;
        if nulls < batch_size {
            let data = self
                .data_stream
                .as_mut()
                .ok_or_else(|| missing_data_stream(&self.descriptor))?;
            data.next_values_with_nulls(batch_size, builder, &self.null_scratch[..batch_size])?;
        } else {
            builder.push_nulls(batch_size);
        }
        trace!(
            "column '{}': read {batch_size} rows ({nulls} nulls)",
            self.descriptor
        );
        Ok(())
    }

    fn release_null_scratch(&mut self) {
        if let Some(limit) = self.options.retain_limit()
            && self.null_scratch.len() > limit
        {
            self.null_scratch.truncate(limit);
            self.null_scratch.shrink_to(limit);
        }
    }
}

impl<D: ?Sized> fmt::Debug for NullableColumnCursor<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullableColumnCursor")
            .field("descriptor", &self.descriptor)
            .field("state", &self.state)
            .field("read_offset", &self.read_offset)
            .field("next_batch_size", &self.next_batch_size)
            .field("has_presence_stream", &self.presence_stream.is_some())
            .field("has_data_stream", &self.data_stream.is_some())
            .field("row_group_opened", &self.row_group_opened)
            .finish()
    }
}

#[cold]
fn missing_data_stream(descriptor: &StreamDescriptor) -> Error {
    Error::corruption(
        descriptor.to_string(),
        "value is not null but data stream is not present",
    )
}
