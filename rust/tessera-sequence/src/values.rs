//! A collection of single-byte values.

/// A collection of single-byte values stored contiguously.
///
/// Values are kept as raw bytes and can be viewed as any one-byte plain type
/// (`u8`, `i8`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values(Vec<u8>);

impl Values {
    pub fn new() -> Values {
        Values(Vec::new())
    }

    /// Creates a new `Values` instance with capacity for at least `capacity` values.
    pub fn with_capacity(capacity: usize) -> Values {
        Values(Vec::with_capacity(capacity))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Interprets the underlying bytes as a slice of one-byte elements of type `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not exactly one byte wide.
    #[inline]
    pub fn as_slice<T>(&self) -> &[T]
    where
        T: bytemuck::AnyBitPattern,
    {
        assert_eq!(std::mem::size_of::<T>(), 1);
        bytemuck::cast_slice(&self.0)
    }

    #[inline]
    pub fn push<T>(&mut self, value: T)
    where
        T: bytemuck::NoUninit,
    {
        self.0.extend_from_slice(bytemuck::bytes_of(&value));
    }

    #[inline]
    pub fn extend_from_slice<T>(&mut self, values: &[T])
    where
        T: bytemuck::NoUninit,
    {
        self.0.extend_from_slice(bytemuck::cast_slice(values));
    }

    /// Appends `count` zero bytes, used as the value slots of nulls.
    pub fn push_zeroed(&mut self, count: usize) {
        self.0.resize(self.0.len() + count, 0);
    }

    /// Appends space for `count` values and provides a callback to write into it.
    ///
    /// The appended space is zero-initialized before the callback runs.
    pub fn append<R>(&mut self, count: usize, writer: impl FnOnce(&mut [u8]) -> R) -> R {
        let prev_len = self.0.len();
        self.0.resize(prev_len + count, 0);
        writer(&mut self.0[prev_len..])
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
