//! Stream identities within a stripe.

use std::fmt;

use serde::{Deserialize, Serialize};
use tessera_common::{Result, error::Error};

use crate::schema::BasicTypeDescriptor;

/// The role of a substream within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamKind {
    /// One bit per logical row, set when the value is non-null.
    Present = 0,
    /// The column values, one entry per non-null logical row.
    Data = 1,
    Length = 2,
    DictionaryData = 3,
    Secondary = 5,
    RowIndex = 6,
}

impl TryFrom<i32> for StreamKind {
    type Error = Error;

    fn try_from(value: i32) -> Result<StreamKind> {
        match value {
            0 => Ok(StreamKind::Present),
            1 => Ok(StreamKind::Data),
            2 => Ok(StreamKind::Length),
            3 => Ok(StreamKind::DictionaryData),
            5 => Ok(StreamKind::Secondary),
            6 => Ok(StreamKind::RowIndex),
            _ => Err(Error::invalid_format_msg(
                "StreamKind",
                format!("unknown stream kind {value}"),
            )),
        }
    }
}

/// Identity of a column within the file, as seen by a column reader.
///
/// The descriptor is fixed when the reader is created and is used as the lookup
/// key for the reader's substreams in every row group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamDescriptor {
    column: u32,
    name: String,
    type_desc: BasicTypeDescriptor,
}

impl StreamDescriptor {
    pub fn new(
        column: u32,
        name: impl Into<String>,
        type_desc: BasicTypeDescriptor,
    ) -> StreamDescriptor {
        StreamDescriptor {
            column,
            name: name.into(),
            type_desc,
        }
    }

    /// Column ordinal within the file schema.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Declared value type of the column.
    pub fn type_desc(&self) -> BasicTypeDescriptor {
        self.type_desc
    }

    /// Key of the substream of the given kind for this column.
    pub fn stream_id(&self, kind: StreamKind) -> StreamId {
        StreamId {
            column: self.column,
            kind,
        }
    }
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.column)
    }
}

/// Key of a substream within a stripe or row group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamId {
    pub column: u32,
    pub kind: StreamKind,
}
