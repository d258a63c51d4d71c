//! Column reader configuration.

/// Options shared by the column readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    null_scratch_retain_limit: Option<usize>,
    strict_type_check: bool,
}

impl ReaderOptions {
    /// Creates the default options: the null scratch buffer is never shrunk and
    /// the requested element type must match the column type.
    pub fn new() -> ReaderOptions {
        ReaderOptions {
            null_scratch_retain_limit: None,
            strict_type_check: true,
        }
    }

    /// Caps the length the null scratch buffer keeps between batches.
    ///
    /// A batch larger than the limit still grows the buffer as needed; it is
    /// shrunk back to `limit` once the batch is materialized.
    pub fn null_scratch_retain_limit(mut self, limit: usize) -> Self {
        self.null_scratch_retain_limit = Some(limit);
        self
    }

    /// When disabled, `read_block` accepts any element type of the right width
    /// instead of requiring the column's declared type.
    pub fn strict_type_check(mut self, strict: bool) -> Self {
        self.strict_type_check = strict;
        self
    }

    pub fn retain_limit(&self) -> Option<usize> {
        self.null_scratch_retain_limit
    }

    pub fn is_strict(&self) -> bool {
        self.strict_type_check
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions::new()
    }
}
