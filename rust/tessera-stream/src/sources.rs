//! Registry of the substream sources of a stripe or row group.

use std::{any::Any, collections::HashMap, sync::Arc};

use tessera_common::{Result, error::Error};
use tessera_format::stream::{StreamDescriptor, StreamId, StreamKind};

use crate::{
    bit_stream::BitStream,
    byte_stream::ByteStream,
    source::{
        BooleanRleStreamSource, ByteRleStreamSource, SharedStreamSource, missing_stream_source,
    },
};

/// A directory of stream sources keyed by (column, stream kind).
///
/// Each entry remembers the decoder type it opens. Looking up a key with the
/// wrong decoder type is a format error; looking up an unregistered key yields
/// the missing-source sentinel.
#[derive(Clone, Default)]
pub struct StreamSources {
    sources: HashMap<StreamId, Arc<dyn Any + Send + Sync>>,
}

impl StreamSources {
    /// A registry with no sources: every lookup yields the missing sentinel.
    pub fn empty() -> StreamSources {
        StreamSources::default()
    }

    pub fn builder() -> StreamSourcesBuilder {
        StreamSourcesBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn contains(&self, descriptor: &StreamDescriptor, kind: StreamKind) -> bool {
        self.sources.contains_key(&descriptor.stream_id(kind))
    }

    /// Returns the source of the `kind` substream of the described column.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidFormat` error if a source is registered under this key
    /// but opens a different decoder type than `S`.
    pub fn get_stream_source<S>(
        &self,
        descriptor: &StreamDescriptor,
        kind: StreamKind,
    ) -> Result<SharedStreamSource<S>>
    where
        S: ?Sized + 'static,
    {
        let Some(entry) = self.sources.get(&descriptor.stream_id(kind)) else {
            return Ok(missing_stream_source());
        };
        entry
            .downcast_ref::<SharedStreamSource<S>>()
            .cloned()
            .ok_or_else(|| {
                Error::invalid_format_msg(
                    descriptor.to_string(),
                    format!(
                        "{kind:?} stream does not decode as {}",
                        std::any::type_name::<S>()
                    ),
                )
            })
    }
}

impl std::fmt::Debug for StreamSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.sources.keys().collect();
        keys.sort_by_key(|id| (id.column, id.kind as i32));
        f.debug_struct("StreamSources")
            .field("streams", &keys)
            .finish()
    }
}

/// Builder for [`StreamSources`].
#[derive(Default)]
pub struct StreamSourcesBuilder {
    sources: HashMap<StreamId, Arc<dyn Any + Send + Sync>>,
}

impl StreamSourcesBuilder {
    /// Registers a source for decoders of type `S`, replacing any previous entry
    /// under the same key.
    pub fn add_source<S>(
        mut self,
        column: u32,
        kind: StreamKind,
        source: SharedStreamSource<S>,
    ) -> StreamSourcesBuilder
    where
        S: ?Sized + 'static,
    {
        self.sources
            .insert(StreamId { column, kind }, Arc::new(source));
        self
    }

    /// Registers an in-memory run-length encoded bit substream.
    pub fn add_bit_stream(
        self,
        column: u32,
        kind: StreamKind,
        data: impl Into<Arc<[u8]>>,
    ) -> StreamSourcesBuilder {
        let source: SharedStreamSource<dyn BitStream> =
            Arc::new(BooleanRleStreamSource::new(data));
        self.add_source(column, kind, source)
    }

    /// Registers an in-memory run-length encoded byte substream.
    pub fn add_byte_stream(
        self,
        column: u32,
        kind: StreamKind,
        data: impl Into<Arc<[u8]>>,
    ) -> StreamSourcesBuilder {
        let source: SharedStreamSource<dyn ByteStream> =
            Arc::new(ByteRleStreamSource::new(data));
        self.add_source(column, kind, source)
    }

    /// Registers an explicitly absent substream of either decoder type.
    pub fn add_missing<S>(self, column: u32, kind: StreamKind) -> StreamSourcesBuilder
    where
        S: ?Sized + 'static,
    {
        self.add_source(column, kind, missing_stream_source::<S>())
    }

    pub fn build(self) -> StreamSources {
        StreamSources {
            sources: self.sources,
        }
    }
}
