//! Generic SAI attribute values and attribute metadata.
//!
//! [`AttributeValue`] mirrors the members of `sai_attribute_value_t` that the
//! router interface API uses. Object-specific attribute enums convert to and
//! from it when crossing the C boundary or when carrying vendor extensions.

use crate::net::MacAddress;
use crate::types::RawSaiObjectId;
use serde::Serialize;
use std::fmt;

/// A single value of the `sai_attribute_value_t` union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Bool(bool),
    U16(u16),
    U32(u32),
    S32(i32),
    U64(u64),
    Mac(MacAddress),
    Oid(RawSaiObjectId),
}

impl AttributeValue {
    /// Returns the union member this value occupies.
    pub fn value_type(&self) -> AttrValueType {
        match self {
            AttributeValue::Bool(_) => AttrValueType::Bool,
            AttributeValue::U16(_) => AttrValueType::U16,
            AttributeValue::U32(_) => AttrValueType::U32,
            AttributeValue::S32(_) => AttrValueType::S32,
            AttributeValue::U64(_) => AttrValueType::U64,
            AttributeValue::Mac(_) => AttrValueType::Mac,
            AttributeValue::Oid(_) => AttrValueType::Oid,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(v) => write!(f, "{}", v),
            AttributeValue::U16(v) => write!(f, "{}", v),
            AttributeValue::U32(v) => write!(f, "{}", v),
            AttributeValue::S32(v) => write!(f, "{}", v),
            AttributeValue::U64(v) => write!(f, "{}", v),
            AttributeValue::Mac(v) => write!(f, "{}", v),
            AttributeValue::Oid(v) => write!(f, "0x{:016x}", v),
        }
    }
}

/// Union member an attribute's value is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrValueType {
    Bool,
    U16,
    U32,
    S32,
    U64,
    Mac,
    Oid,
}

impl AttrValueType {
    /// Name of the C type the member holds, as written in the SAI headers.
    pub fn c_type(&self) -> &'static str {
        match self {
            AttrValueType::Bool => "bool",
            AttrValueType::U16 => "sai_uint16_t",
            AttrValueType::U32 => "sai_uint32_t",
            AttrValueType::S32 => "sai_int32_t",
            AttrValueType::U64 => "sai_uint64_t",
            AttrValueType::Mac => "sai_mac_t",
            AttrValueType::Oid => "sai_object_id_t",
        }
    }
}

/// How an attribute may be used across an object's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttrAccess {
    /// Supplied at create, immutable afterwards.
    CreateOnly,
    /// Supplied at create or changed later through set.
    CreateAndSet,
}

/// When an attribute must be present in a create request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Always required.
    Mandatory,
    /// Required only when the object's type discriminator has this raw value.
    MandatoryWhen(i32),
    /// Optional; a default applies when absent.
    Optional,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_type() {
        assert_eq!(AttributeValue::Bool(true).value_type(), AttrValueType::Bool);
        assert_eq!(AttributeValue::Oid(1).value_type(), AttrValueType::Oid);
        assert_eq!(
            AttributeValue::Mac(MacAddress::ZERO).value_type(),
            AttrValueType::Mac
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(AttributeValue::U32(1514).to_string(), "1514");
        assert_eq!(AttributeValue::Oid(0x6000000000001).to_string(), "0x0006000000000001");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&AttributeValue::U16(100)).unwrap();
        assert_eq!(json, r#"{"type":"u16","value":100}"#);
        assert_eq!(AttrValueType::Mac.c_type(), "sai_mac_t");
    }
}
