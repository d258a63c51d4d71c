//! Metadata definitions of the tessera columnar format: value types, stream kinds,
//! stream descriptors and column encodings.
//!
//! Nothing here touches file bytes. These are the identities and tags the stripe
//! metadata reader hands to the column readers.

pub mod encoding;
pub mod schema;
pub mod stream;
