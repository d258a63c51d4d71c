//! Deferred substream handles.
//!
//! A [`StreamSource`] knows where a substream lives but does not decode anything
//! until [`StreamSource::open_stream`] is called. Opening yields either a decoder
//! or `None`, meaning the substream is absent for the current row group.

use std::{fmt, sync::Arc};

use tessera_common::Result;

use crate::{
    bit_stream::{BitStream, BooleanRleStream},
    byte_stream::{ByteRleStream, ByteStream},
};

/// A deferred handle that opens a decoder of type `S` on demand.
pub trait StreamSource<S: ?Sized>: Send + Sync {
    /// Opens the substream. Returns `Ok(None)` if the substream is absent.
    fn open_stream(&self) -> Result<Option<Box<S>>>;
}

/// Shared handle to a stream source.
pub type SharedStreamSource<S> = Arc<dyn StreamSource<S>>;

/// The sentinel source: always opens as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingStreamSource;

impl<S: ?Sized> StreamSource<S> for MissingStreamSource {
    fn open_stream(&self) -> Result<Option<Box<S>>> {
        Ok(None)
    }
}

/// Returns the shared missing-source sentinel for decoders of type `S`.
pub fn missing_stream_source<S: ?Sized + 'static>() -> SharedStreamSource<S> {
    Arc::new(MissingStreamSource)
}

/// Source of a run-length encoded byte substream held in memory.
///
/// A declared substream with no bytes opens as absent.
#[derive(Clone)]
pub struct ByteRleStreamSource {
    data: Arc<[u8]>,
}

impl ByteRleStreamSource {
    pub fn new(data: impl Into<Arc<[u8]>>) -> ByteRleStreamSource {
        ByteRleStreamSource { data: data.into() }
    }
}

impl StreamSource<dyn ByteStream> for ByteRleStreamSource {
    fn open_stream(&self) -> Result<Option<Box<dyn ByteStream>>> {
        if self.data.is_empty() {
            return Ok(None);
        }
        Ok(Some(Box::new(ByteRleStream::new(self.data.clone()))))
    }
}

impl fmt::Debug for ByteRleStreamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteRleStreamSource")
            .field("len", &self.data.len())
            .finish()
    }
}

/// Source of a run-length encoded bit substream held in memory.
///
/// A declared substream with no bytes opens as absent.
#[derive(Clone)]
pub struct BooleanRleStreamSource {
    data: Arc<[u8]>,
}

impl BooleanRleStreamSource {
    pub fn new(data: impl Into<Arc<[u8]>>) -> BooleanRleStreamSource {
        BooleanRleStreamSource { data: data.into() }
    }
}

impl StreamSource<dyn BitStream> for BooleanRleStreamSource {
    fn open_stream(&self) -> Result<Option<Box<dyn BitStream>>> {
        if self.data.is_empty() {
            return Ok(None);
        }
        Ok(Some(Box::new(BooleanRleStream::new(self.data.clone()))))
    }
}

impl fmt::Debug for BooleanRleStreamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BooleanRleStreamSource")
            .field("len", &self.data.len())
            .finish()
    }
}
