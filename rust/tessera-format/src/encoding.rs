//! Per-column encoding declarations carried in the stripe footer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnEncodingKind {
    Direct,
    Dictionary,
    DirectV2,
    DictionaryV2,
}

/// Encoding of a single column within a stripe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnEncoding {
    pub kind: ColumnEncodingKind,
    /// Number of dictionary entries; zero for direct encodings.
    pub dictionary_size: u32,
}

impl ColumnEncoding {
    pub const DIRECT: ColumnEncoding = ColumnEncoding {
        kind: ColumnEncodingKind::Direct,
        dictionary_size: 0,
    };

    pub fn dictionary(dictionary_size: u32) -> ColumnEncoding {
        ColumnEncoding {
            kind: ColumnEncodingKind::Dictionary,
            dictionary_size,
        }
    }
}

impl Default for ColumnEncoding {
    fn default() -> Self {
        ColumnEncoding::DIRECT
    }
}
