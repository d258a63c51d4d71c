//! Value sequences produced by the tessera column readers.
//!
//! A [`crate::value_sequence::ValueSequence`] is the immutable block handed to the
//! consumer after a batch is materialized. It stores:
//! - **Values**: raw single-byte values in a contiguous buffer
//! - **Presence**: null/non-null information
//! - **Type descriptor**: the element type the batch was read as
//!
//! Sequences are assembled with [`crate::value_sequence::ValueSequenceBuilder`],
//! which accepts typed appends and explicit nulls and is consumed by `build()`.
//!
//! Null slots occupy a zeroed value slot, so the value buffer always holds exactly
//! one entry per logical row.

pub mod presence;
pub mod value_sequence;
pub mod values;
