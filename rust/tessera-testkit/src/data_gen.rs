//! Synthetic data generation for reader tests.
//!
//! All generators draw from the thread-local `fastrand` generator, so a test that
//! calls `fastrand::seed` first gets reproducible data.

/// A generated column chunk: presence bits plus the values of the non-null rows.
#[derive(Debug, Clone)]
pub struct ColumnChunk {
    /// One entry per logical row, `true` if the row is non-null.
    pub presence: Vec<bool>,
    /// One value per non-null row.
    pub values: Vec<u8>,
}

impl ColumnChunk {
    /// Returns the logical rows, `None` for nulls.
    pub fn rows(&self) -> Vec<Option<u8>> {
        let mut values = self.values.iter();
        self.presence
            .iter()
            .map(|&present| if present { values.next().copied() } else { None })
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.presence.len()
    }
}

/// Generates `len` presence bits where each row is null with probability
/// `null_ratio` (0.0..=1.0).
pub fn generate_presence(len: usize, null_ratio: f64) -> Vec<bool> {
    (0..len).map(|_| fastrand::f64() >= null_ratio).collect()
}

/// Generates a column chunk of `len` rows with the given null ratio.
pub fn generate_column_chunk(len: usize, null_ratio: f64) -> ColumnChunk {
    let presence = generate_presence(len, null_ratio);
    let values = presence
        .iter()
        .filter(|&&present| present)
        .map(|_| fastrand::u8(..))
        .collect();
    ColumnChunk { presence, values }
}

/// Splits `total` rows into random batch sizes in `0..=max_batch`, summing to
/// `total`.
pub fn generate_batch_sizes(total: usize, max_batch: usize) -> Vec<usize> {
    assert_ne!(max_batch, 0);
    let mut sizes = Vec::new();
    let mut left = total;
    while left > 0 {
        let size = fastrand::usize(0..=max_batch).min(left);
        sizes.push(size);
        left -= size;
    }
    sizes
}
