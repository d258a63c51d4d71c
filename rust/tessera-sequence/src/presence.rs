//! Null information of a materialized batch.

/// Per-row nullness of a value sequence.
///
/// Uniform batches keep only their length; a batch mixing nulls and values
/// keeps one byte per row. Equality is logical: two presences are equal when
/// they have the same length and the same null rows, whatever their variant.
#[derive(Debug, Clone)]
pub enum Presence {
    /// No row is null.
    Trivial(usize),

    /// Every row is null.
    Nulls(usize),

    /// One byte per row, `1` for a value and `0` for a null.
    Bytes(Vec<u8>),
}

impl Presence {
    /// Returns the number of values in this presence, null or not.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Trivial(len) => *len,
            Self::Nulls(len) => *len,
            Self::Bytes(presence) => presence.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of null values in this `Presence`.
    pub fn count_nulls(&self) -> usize {
        match self {
            Self::Trivial(_) => 0,
            Self::Nulls(len) => *len,
            Self::Bytes(presence) => presence.iter().filter(|&&b| b == 0).count(),
        }
    }

    /// Returns the number of non-null values in this `Presence`.
    pub fn count_non_nulls(&self) -> usize {
        self.len() - self.count_nulls()
    }

    /// Returns `true` if all values are present (non-null).
    #[inline]
    pub fn is_trivial_non_null(&self) -> bool {
        matches!(self, Self::Trivial(_))
    }

    /// Returns `true` if all values are null.
    #[inline]
    pub fn is_trivial_all_null(&self) -> bool {
        matches!(self, Self::Nulls(_))
    }

    /// Returns `true` if the value at the specified index is null.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for the `Bytes` representation.
    #[inline]
    pub fn is_null(&self, index: usize) -> bool {
        match self {
            Self::Trivial(_) => false,
            Self::Nulls(_) => true,
            Self::Bytes(presence) => presence[index] == 0,
        }
    }

    #[inline]
    pub fn is_valid(&self, index: usize) -> bool {
        !self.is_null(index)
    }

    /// Extends this presence with `count` null values.
    ///
    /// An empty presence becomes `Nulls`; a `Trivial` presence converts to `Bytes`.
    pub fn extend_with_nulls(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        if self.is_empty() {
            *self = Self::Nulls(count);
            return;
        }
        match self {
            Self::Nulls(len) => *len += count,
            _ => {
                let presence = self.bytes_mut(count);
                presence.resize(presence.len() + count, 0);
            }
        }
    }

    /// Extends this presence with `count` non-null values.
    ///
    /// An empty presence becomes `Trivial`; a `Nulls` presence converts to `Bytes`.
    pub fn extend_with_non_nulls(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        if self.is_empty() {
            *self = Self::Trivial(count);
            return;
        }
        match self {
            Self::Trivial(len) => *len += count,
            _ => {
                let presence = self.bytes_mut(count);
                presence.resize(presence.len() + count, 1);
            }
        }
    }

    /// Extends this presence from a null mask, where `true` marks a null slot.
    ///
    /// Stays in the compact representation when the mask is uniform and matches it.
    pub fn extend_with_null_mask(&mut self, null_mask: &[bool]) {
        if null_mask.is_empty() {
            return;
        }
        if null_mask.iter().all(|&is_null| !is_null) {
            self.extend_with_non_nulls(null_mask.len());
        } else if null_mask.iter().all(|&is_null| is_null) {
            self.extend_with_nulls(null_mask.len());
        } else {
            let presence = self.bytes_mut(null_mask.len());
            presence.extend(null_mask.iter().map(|&is_null| u8::from(!is_null)));
        }
    }

    /// Returns the presence as a per-value null mask (`true` for null).
    pub fn to_null_mask(&self) -> Vec<bool> {
        match self {
            Self::Trivial(len) => vec![false; *len],
            Self::Nulls(len) => vec![true; *len],
            Self::Bytes(presence) => presence.iter().map(|&b| b == 0).collect(),
        }
    }

    /// Converts this presence to the `Bytes` representation, reserving room for
    /// `additional` more entries, and returns the byte vector.
    fn bytes_mut(&mut self, additional: usize) -> &mut Vec<u8> {
        let converted = match self {
            Self::Trivial(len) => Some((*len, 1u8)),
            Self::Nulls(len) => Some((*len, 0u8)),
            Self::Bytes(_) => None,
        };
        if let Some((len, fill)) = converted {
            let mut presence = Vec::with_capacity(len + additional);
            presence.resize(len, fill);
            *self = Self::Bytes(presence);
        }
        match self {
            Self::Bytes(presence) => {
                presence.reserve(additional);
                presence
            }
            _ => unreachable!("presence converted to bytes"),
        }
    }
}

impl PartialEq for Presence {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        match (self, other) {
            (Self::Trivial(_), Self::Trivial(_)) | (Self::Nulls(_), Self::Nulls(_)) => true,
            (Self::Bytes(left), Self::Bytes(right)) => left == right,
            _ => (0..self.len()).all(|i| self.is_null(i) == other.is_null(i)),
        }
    }
}

impl Eq for Presence {}

impl Default for Presence {
    fn default() -> Self {
        Presence::Trivial(0)
    }
}
