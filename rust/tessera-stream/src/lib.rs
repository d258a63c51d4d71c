//! Substream decoding for tessera column readers.
//!
//! A column's values within a row group are spread over substreams, each identified
//! by a [`tessera_format::stream::StreamKind`]. This crate provides:
//!
//! - [`mod@byte_rle`]: the byte run-length decoder shared by all substreams.
//! - [`mod@bit_stream`]: the [`bit_stream::BitStream`] interface for presence (and
//!   boolean data) substreams, and its run-length implementation.
//! - [`mod@byte_stream`]: the [`byte_stream::ByteStream`] interface for single-byte
//!   data substreams, and its run-length implementation.
//! - [`mod@source`]: deferred [`source::StreamSource`] handles that open a decoder on
//!   demand, or report the substream as absent.
//! - [`mod@sources`]: the [`sources::StreamSources`] registry keyed by column and
//!   stream kind.

pub mod bit_stream;
pub mod byte_rle;
pub mod byte_stream;
pub mod source;
pub mod sources;
