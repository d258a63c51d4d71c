//! Row-group column readers.
//!
//! A column reader is driven through `start_stripe`, `start_row_group` and
//! repeated `prepare_next_read` / `read_block` cycles. Each `read_block`
//! materializes one [`tessera_sequence::value_sequence::ValueSequence`] from
//! the column's presence and data substreams.

pub mod column_reader;
pub mod options;

pub use column_reader::{
    ColumnReader, ReaderState, StreamReader, boolean::BooleanColumnReader, byte::ByteColumnReader,
};
pub use options::ReaderOptions;

#[cfg(test)]
mod tests;
