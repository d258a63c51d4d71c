use tessera_format::{
    schema::BasicTypeDescriptor,
    stream::{StreamDescriptor, StreamKind},
};
use tessera_sequence::value_sequence::ValueSequence;
use tessera_stream::sources::StreamSources;
use tessera_testkit::encode::{encode_bit_digits, encode_bits, encode_literal_bytes};

use crate::column_reader::{StreamReader, byte::ByteColumnReader};




#[cfg(test)]
mod lifecycle;


pub const COLUMN: u32 = 1;

pub fn tinyint_column() -> StreamDescriptor {
    StreamDescriptor::new(COLUMN, "tinyint_col", BasicTypeDescriptor::INT8)
}

/// Row group sources for [`COLUMN`]. An empty `presence` or `data` leaves that
/// substream unregistered.
pub fn row_group(presence: &[u8], data: &[u8]) -> StreamSources {
    let mut builder = StreamSources::builder();
    if !presence.is_empty() {
        builder = builder.add_bit_stream(COLUMN, StreamKind::Present, encode_bit_digits(presence));
    }
    if !data.is_empty() {
        builder = builder.add_byte_stream(COLUMN, StreamKind::Data, encode_literal_bytes(data));
    }
    builder.build()
}

/// Row group sources built from generated presence bits and values.
pub fn generated_row_group(presence: Option<&[bool]>, values: &[u8]) -> StreamSources {
    let mut builder = StreamSources::builder();
    if let Some(presence) = presence {
        builder = builder.add_bit_stream(COLUMN, StreamKind::Present, encode_bits(presence));
    }
    if !values.is_empty() {
        builder = builder.add_byte_stream(COLUMN, StreamKind::Data, encode_literal_bytes(values));
    }
    builder.build()
}

/// A byte reader positioned at the start of a row group bound to `sources`.
pub fn reader_at(sources: &StreamSources) -> ByteColumnReader {
    let mut reader = ByteColumnReader::new(tinyint_column()).unwrap();
    reader.start_stripe(&StreamSources::empty(), &[]).unwrap();
    reader.start_row_group(sources).unwrap();
    reader
}

pub fn read(reader: &mut impl StreamReader, batch_size: usize) -> ValueSequence {
    reader.prepare_next_read(batch_size);
    reader.read_block(&BasicTypeDescriptor::INT8).unwrap()
}
