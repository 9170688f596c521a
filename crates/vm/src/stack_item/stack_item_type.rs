//! Stack item type discriminants.
//!
//! These values match the Neo VM's `CONVERT`/`ISTYPE` opcode encoding so a
//! type byte read off the wire or off an evaluation stack operand can be
//! turned directly into a [`StackItemType`] without a side table.

use std::fmt;

/// Runtime type tag for a [`super::StackItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackItemType {
    /// `Null`. Also used as the catch-all "any" type for `ISTYPE`/`CONVERT`.
    Any = 0x00,
    /// `Pointer`, produced by `NEWARRAY`-adjacent jump targets.
    Pointer = 0x10,
    /// `Boolean`.
    Boolean = 0x20,
    /// `Integer`, an arbitrary-precision signed integer.
    Integer = 0x21,
    /// `ByteString`, an immutable byte sequence.
    ByteString = 0x28,
    /// `Buffer`, a mutable byte sequence.
    Buffer = 0x30,
    /// `Array`.
    Array = 0x40,
    /// `Struct`, an `Array` with value semantics under `CONVERT`.
    Struct = 0x41,
    /// `Map`.
    Map = 0x48,
    /// `InteropInterface`, a handle to a native object.
    InteropInterface = 0x60,
}

impl StackItemType {
    /// Decodes a type byte as produced by `size`/`from_byte` round trips in
    /// the wire format and by the `CONVERT` opcode's operand.
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Any),
            0x10 => Some(Self::Pointer),
            0x20 => Some(Self::Boolean),
            0x21 => Some(Self::Integer),
            0x28 => Some(Self::ByteString),
            0x30 => Some(Self::Buffer),
            0x40 => Some(Self::Array),
            0x41 => Some(Self::Struct),
            0x48 => Some(Self::Map),
            0x60 => Some(Self::InteropInterface),
            _ => None,
        }
    }

    /// Encodes the type as its wire byte.
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// True for `Array`/`Struct`/`Map`, the compound types the reference
    /// counter tracks child edges for.
    pub fn is_compound(self) -> bool {
        matches!(self, Self::Array | Self::Struct | Self::Map)
    }

    /// True for `Boolean`/`Integer`/`ByteString`/`Buffer`, the types
    /// `CONVERT` can freely coerce between.
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Boolean | Self::Integer | Self::ByteString | Self::Buffer
        )
    }
}

impl fmt::Display for StackItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "Any",
            Self::Pointer => "Pointer",
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::ByteString => "ByteString",
            Self::Buffer => "Buffer",
            Self::Array => "Array",
            Self::Struct => "Struct",
            Self::Map => "Map",
            Self::InteropInterface => "InteropInterface",
        };
        f.write_str(name)
    }
}
