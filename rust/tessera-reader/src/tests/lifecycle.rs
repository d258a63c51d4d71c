use std::sync::Arc;

use tessera_common::error::ErrorKind;
use tessera_format::{
    encoding::ColumnEncoding,
    schema::{BasicType, BasicTypeDescriptor},
    stream::{StreamDescriptor, StreamKind},
};
use tessera_stream::{byte_stream::ByteStream, source::SharedStreamSource, sources::StreamSources};
use tessera_testkit::encode::{encode_bit_digits, encode_literal_bytes};

use super::{
    COLUMN, read, reader_at, row_group,
    test_streams::{FailingDataSource, UnreachableDataSource},
    tinyint_column,
};
use crate::{
    column_reader::{ColumnReader, ReaderState, StreamReader, byte::ByteColumnReader},
    options::ReaderOptions,
};

#[test]
fn test_zero_size_batch_is_empty() {
    let mut reader = reader_at(&row_group(&[], &[]));
    let block = read(&mut reader, 0);
    assert!(block.is_empty());
    assert_eq!(reader.state(), ReaderState::RowGroupOpen);
}

#[test]
fn test_zero_size_batch_applies_pending_skip() {
    let mut reader = reader_at(&row_group(&[1, 0, 1, 1], &[5, 6, 7]));
    reader.prepare_next_read(2);
    reader.prepare_next_read(0);
    assert!(reader.read_block(&BasicTypeDescriptor::INT8).unwrap().is_empty());
    assert_eq!(reader.read_offset(), 0);
    let block = read(&mut reader, 2);
    assert_eq!(block.to_options::<u8>(), vec![Some(6), Some(7)]);
}

#[test]
fn test_read_before_row_group() {
    let mut reader = ByteColumnReader::new(tinyint_column()).unwrap();
    assert!(read(&mut reader, 0).is_empty());

    reader.prepare_next_read(3);
    let err = reader.read_block(&BasicTypeDescriptor::INT8).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidOperation { .. }));

    reader.start_stripe(&StreamSources::empty(), &[]).unwrap();
    reader.prepare_next_read(1);
    assert!(reader.read_block(&BasicTypeDescriptor::INT8).is_err());
}

#[test]
fn test_repeated_start_row_group_rebinds() {
    let first = row_group(&[], &[1, 2, 3]);
    let second = row_group(&[0, 1], &[42]);
    let mut reader = reader_at(&first);
    reader.prepare_next_read(2);
    reader.start_row_group(&first).unwrap();
    reader.start_row_group(&second).unwrap();
    assert_eq!(reader.read_offset(), 0);
    assert_eq!(reader.next_batch_size(), 0);
    assert_eq!(reader.state(), ReaderState::RowGroupBound);
    let block = read(&mut reader, 2);
    assert_eq!(block.to_options::<u8>(), vec![None, Some(42)]);
}

#[test]
fn test_start_stripe_discards_pending_rows() {
    let mut reader = reader_at(&row_group(&[], &[1, 2, 3]));
    reader.prepare_next_read(2);
    reader.prepare_next_read(1);
    reader
        .start_stripe(&StreamSources::empty(), &[ColumnEncoding::DIRECT])
        .unwrap();
    assert_eq!(reader.state(), ReaderState::StripeBound);
    assert_eq!(reader.read_offset(), 0);
    assert_eq!(reader.next_batch_size(), 0);

    reader.start_row_group(&row_group(&[], &[8, 9])).unwrap();
    let block = read(&mut reader, 2);
    assert_eq!(block.as_slice::<u8>(), &[8, 9]);
}

#[test]
fn test_dictionary_sources_are_ignored() {
    let dictionary = StreamSources::builder()
        .add_byte_stream(COLUMN, StreamKind::DictionaryData, encode_literal_bytes(&[1]))
        .build();
    let mut reader = ByteColumnReader::new(tinyint_column()).unwrap();
    reader
        .start_stripe(&dictionary, &[ColumnEncoding::dictionary(1)])
        .unwrap();
    reader.start_row_group(&row_group(&[], &[4])).unwrap();
    assert_eq!(read(&mut reader, 1).as_slice::<u8>(), &[4]);
}

#[test]
fn test_open_error_propagates() {
    let source: SharedStreamSource<dyn ByteStream> = Arc::new(UnreachableDataSource);
    let sources = StreamSources::builder()
        .add_source(COLUMN, StreamKind::Data, source)
        .build();
    let mut reader = reader_at(&sources);
    reader.prepare_next_read(1);
    let err = reader.read_block(&BasicTypeDescriptor::INT8).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Io { .. }));
}

#[test]
fn test_read_error_propagates() {
    let source: SharedStreamSource<dyn ByteStream> = Arc::new(FailingDataSource);
    let sources = StreamSources::builder()
        .add_bit_stream(COLUMN, StreamKind::Present, encode_bit_digits(&[1, 1, 0]))
        .add_source(COLUMN, StreamKind::Data, source)
        .build();

    let mut reader = reader_at(&sources);
    reader.prepare_next_read(3);
    let err = reader.read_block(&BasicTypeDescriptor::INT8).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Io { .. }));

    let mut reader = reader_at(&sources);
    reader.prepare_next_read(2);
    reader.prepare_next_read(1);
    let err = reader.read_block(&BasicTypeDescriptor::INT8).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Io { .. }));
}

#[test]
fn test_truncated_data_stream() {
    let mut reader = reader_at(&row_group(&[1, 1, 1], &[1, 2]));
    reader.prepare_next_read(3);
    let err = reader.read_block(&BasicTypeDescriptor::INT8).unwrap_err();
    assert!(err.is_corruption());
}

#[test]
fn test_data_stream_exhausted_while_skipping() {
    let mut reader = reader_at(&row_group(&[1, 1, 1, 0], &[1, 2]));
    reader.prepare_next_read(3);
    reader.prepare_next_read(1);
    let err = reader.read_block(&BasicTypeDescriptor::INT8).unwrap_err();
    assert!(err.is_corruption());
    assert!(err.to_string().contains("unexpected end of stream"));
}

#[test]
fn test_null_scratch_grows_and_is_retained() {
    let presence = [1, 0].repeat(50);
    let values: Vec<u8> = (0..50).collect();
    let mut reader = reader_at(&row_group(&presence, &values));
    assert_eq!(reader.null_scratch_len(), 0);
    read(&mut reader, 10);
    assert_eq!(reader.null_scratch_len(), 10);
    read(&mut reader, 40);
    assert_eq!(reader.null_scratch_len(), 40);
    read(&mut reader, 5);
    assert_eq!(reader.null_scratch_len(), 40);

    reader.start_row_group(&row_group(&presence, &values)).unwrap();
    assert_eq!(reader.null_scratch_len(), 40);
}

#[test]
fn test_null_scratch_retain_limit() {
    let presence = [0, 1].repeat(50);
    let values: Vec<u8> = (0..50).collect();
    let options = ReaderOptions::default().null_scratch_retain_limit(16);
    let mut reader = ByteColumnReader::with_options(tinyint_column(), options).unwrap();
    reader.start_stripe(&StreamSources::empty(), &[]).unwrap();
    reader.start_row_group(&row_group(&presence, &values)).unwrap();

    let block = read(&mut reader, 8);
    assert_eq!(reader.null_scratch_len(), 8);
    assert_eq!(block.count_nulls(), 4);

    let block = read(&mut reader, 60);
    assert_eq!(reader.null_scratch_len(), 16);
    assert_eq!(block.count_nulls(), 30);
    assert_eq!(block.get::<u8>(1), Some(4));
}

#[test]
fn test_strict_type_check() {
    let mut reader = reader_at(&row_group(&[], &[1, 2]));
    reader.prepare_next_read(1);
    let err = reader.read_block(&BasicTypeDescriptor::UINT8).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));

    let wide = BasicTypeDescriptor::new(BasicType::Int16, true);
    assert!(reader.read_block(&wide).is_err());
    assert!(reader.read_block(&BasicTypeDescriptor::BOOLEAN).is_err());
    // Rejected requests leave the batch pending.
    assert_eq!(reader.next_batch_size(), 1);
    assert_eq!(read(&mut reader, 1).as_slice::<u8>(), &[2]);
}

#[test]
fn test_relaxed_type_check() {
    let options = ReaderOptions::default().strict_type_check(false);
    let mut reader = ByteColumnReader::with_options(tinyint_column(), options).unwrap();
    reader.start_stripe(&StreamSources::empty(), &[]).unwrap();
    reader.start_row_group(&row_group(&[], &[0xfe])).unwrap();
    reader.prepare_next_read(1);
    let block = reader.read_block(&BasicTypeDescriptor::UINT8).unwrap();
    assert_eq!(block.type_desc, BasicTypeDescriptor::UINT8);
    assert_eq!(block.as_slice::<u8>(), &[0xfe]);

    let wide = BasicTypeDescriptor::new(BasicType::Int64, false);
    reader.prepare_next_read(0);
    assert!(reader.read_block(&wide).is_err());
}

#[test]
fn test_mismatched_source_type_fails_binding() {
    let sources = StreamSources::builder()
        .add_byte_stream(COLUMN, StreamKind::Present, encode_literal_bytes(&[1]))
        .build();
    let mut reader = ByteColumnReader::new(tinyint_column()).unwrap();
    let err = reader.start_row_group(&sources).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));
}

#[test]
fn test_column_reader_dispatch() {
    let reader = ColumnReader::new(tinyint_column(), ReaderOptions::default()).unwrap();
    assert!(matches!(reader, ColumnReader::Byte(_)));

    let flags = StreamDescriptor::new(2, "flag", BasicTypeDescriptor::BOOLEAN);
    let reader = ColumnReader::new(flags, ReaderOptions::default()).unwrap();
    assert!(matches!(reader, ColumnReader::Boolean(_)));
    assert_eq!(reader.descriptor().column(), 2);
    assert_eq!(reader.state(), ReaderState::Fresh);

    let wide = StreamDescriptor::new(
        3,
        "amount",
        BasicTypeDescriptor::new(BasicType::Int32, true),
    );
    let err = ColumnReader::new(wide, ReaderOptions::default()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NotImplemented { .. }));
}

#[test]
fn test_column_reader_reads_through_variant() {
    let mut reader = ColumnReader::new(tinyint_column(), ReaderOptions::default()).unwrap();
    reader.start_stripe(&StreamSources::empty(), &[]).unwrap();
    reader
        .start_row_group(&row_group(&[1, 0, 1], &[3, 4]))
        .unwrap();
    let block = read(&mut reader, 3);
    assert_eq!(block.to_options::<i8>(), vec![Some(3), None, Some(4)]);
}
