//! Basic value types of the format.

use serde::{Deserialize, Serialize};

/// The physical type of a column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicType {
    Unit,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Binary,
    String,
    List,
    Struct,
    Map,
}

impl BasicType {
    /// Returns `true` if this is one of the integer types (i8, i16, i32, or i64).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            BasicType::Int8 | BasicType::Int16 | BasicType::Int32 | BasicType::Int64
        )
    }
}

/// Describes a basic data type, including its size and signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasicTypeDescriptor {
    /// The underlying physical type of the value.
    pub basic_type: BasicType,
    /// Indicates whether the type is signed.
    /// This can be `true` only for `Int8`, `Int16`, `Int32`, and `Int64`.
    pub signed: bool,
}

impl BasicTypeDescriptor {
    /// Signed single-byte integer (`tinyint`).
    pub const INT8: BasicTypeDescriptor = BasicTypeDescriptor {
        basic_type: BasicType::Int8,
        signed: true,
    };

    /// Unsigned single-byte integer.
    pub const UINT8: BasicTypeDescriptor = BasicTypeDescriptor {
        basic_type: BasicType::Int8,
        signed: false,
    };

    pub const BOOLEAN: BasicTypeDescriptor = BasicTypeDescriptor {
        basic_type: BasicType::Boolean,
        signed: false,
    };

    pub fn new(basic_type: BasicType, signed: bool) -> BasicTypeDescriptor {
        BasicTypeDescriptor {
            basic_type,
            signed: signed && basic_type.is_integer(),
        }
    }

    /// Returns the fixed size of the primitive basic type in bytes, or `None`
    /// if the type is variable-length or composite.
    pub fn primitive_size(&self) -> Option<usize> {
        match self.basic_type {
            BasicType::Unit | BasicType::Boolean => None,
            BasicType::Int8 => Some(1),
            BasicType::Int16 => Some(2),
            BasicType::Int32 => Some(4),
            BasicType::Int64 => Some(8),
            BasicType::Float32 => Some(4),
            BasicType::Float64 => Some(8),
            BasicType::Binary | BasicType::String => None,
            BasicType::List | BasicType::Struct | BasicType::Map => None,
        }
    }

    /// Returns the number of bytes a single materialized value occupies in a
    /// value sequence. Booleans are materialized as one byte per value.
    pub fn value_width(&self) -> Option<usize> {
        match self.basic_type {
            BasicType::Boolean => Some(1),
            _ => self.primitive_size(),
        }
    }

    /// Returns `true` if values of this type are stored as single bytes.
    pub fn is_single_byte(&self) -> bool {
        self.primitive_size() == Some(1)
    }
}

impl Default for BasicTypeDescriptor {
    fn default() -> Self {
        Self {
            basic_type: BasicType::Unit,
            signed: false,
        }
    }
}
