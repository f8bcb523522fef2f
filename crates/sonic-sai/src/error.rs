//! SAI error types and status handling.
//!
//! This module converts between raw `sai_status_t` codes and Rust's `Result`
//! type. Every [`SaiError`] maps to exactly one [`SaiStatus`], and
//! [`SaiError::from_status`] inverts that mapping, so an error that crosses
//! the C boundary comes back with the same status code.

use std::fmt;
use thiserror::Error;

/// Base of the `SAI_STATUS_INVALID_ATTRIBUTE_<n>` range.
const INVALID_ATTRIBUTE_BASE: i32 = 0x0001_0000;
/// Base of the `SAI_STATUS_INVALID_ATTR_VALUE_<n>` range.
const INVALID_ATTR_VALUE_BASE: i32 = 0x0002_0000;
/// Base of the `SAI_STATUS_ATTR_NOT_IMPLEMENTED_<n>` range.
const ATTR_NOT_IMPLEMENTED_BASE: i32 = 0x0003_0000;
/// Base of the `SAI_STATUS_UNKNOWN_ATTRIBUTE_<n>` range.
const UNKNOWN_ATTRIBUTE_BASE: i32 = 0x0004_0000;
/// Width of each attribute-indexed range.
const ATTR_RANGE_SIZE: i32 = 0x1_0000;

/// SAI status codes matching the SAI C API.
///
/// Generic failures are small negative numbers. Attribute failures carry the
/// index of the offending attribute in the caller's list, encoded as
/// `-(base + index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaiStatus {
    Success,
    Failure,
    NotSupported,
    NoMemory,
    InsufficientResources,
    InvalidParameter,
    ItemAlreadyExists,
    ItemNotFound,
    BufferOverflow,
    InvalidPortNumber,
    InvalidPortMember,
    InvalidVlanId,
    Uninitialized,
    TableFull,
    MandatoryAttributeMissing,
    NotImplemented,
    AddrNotFound,
    ObjectInUse,
    InvalidObjectType,
    InvalidObjectId,
    InvalidNvStorage,
    NvStorageFull,
    SwUpgradeVersionMismatch,
    NotExecuted,
    /// Attribute at the given index is not valid for this operation.
    InvalidAttribute(u32),
    /// Attribute at the given index has a value outside its domain.
    InvalidAttrValue(u32),
    /// Attribute at the given index is recognized but not implemented.
    AttrNotImplemented(u32),
    /// Attribute id at the given index is not recognized.
    UnknownAttribute(u32),
}

impl SaiStatus {
    /// Creates a SaiStatus from a raw `sai_status_t` value.
    ///
    /// Codes outside the known set collapse to [`SaiStatus::Failure`].
    pub fn from_raw(status: i32) -> Self {
        match status {
            0 => SaiStatus::Success,
            -1 => SaiStatus::Failure,
            -2 => SaiStatus::NotSupported,
            -3 => SaiStatus::NoMemory,
            -4 => SaiStatus::InsufficientResources,
            -5 => SaiStatus::InvalidParameter,
            -6 => SaiStatus::ItemAlreadyExists,
            -7 => SaiStatus::ItemNotFound,
            -8 => SaiStatus::BufferOverflow,
            -9 => SaiStatus::InvalidPortNumber,
            -10 => SaiStatus::InvalidPortMember,
            -11 => SaiStatus::InvalidVlanId,
            -12 => SaiStatus::Uninitialized,
            -13 => SaiStatus::TableFull,
            -14 => SaiStatus::MandatoryAttributeMissing,
            -15 => SaiStatus::NotImplemented,
            -16 => SaiStatus::AddrNotFound,
            -17 => SaiStatus::ObjectInUse,
            -18 => SaiStatus::InvalidObjectType,
            -19 => SaiStatus::InvalidObjectId,
            -20 => SaiStatus::InvalidNvStorage,
            -21 => SaiStatus::NvStorageFull,
            -22 => SaiStatus::SwUpgradeVersionMismatch,
            -23 => SaiStatus::NotExecuted,
            _ => Self::from_attr_range(status).unwrap_or(SaiStatus::Failure),
        }
    }

    fn from_attr_range(status: i32) -> Option<Self> {
        let code = status.checked_neg()?;
        let index = (code % ATTR_RANGE_SIZE) as u32;
        match code - code % ATTR_RANGE_SIZE {
            INVALID_ATTRIBUTE_BASE => Some(SaiStatus::InvalidAttribute(index)),
            INVALID_ATTR_VALUE_BASE => Some(SaiStatus::InvalidAttrValue(index)),
            ATTR_NOT_IMPLEMENTED_BASE => Some(SaiStatus::AttrNotImplemented(index)),
            UNKNOWN_ATTRIBUTE_BASE => Some(SaiStatus::UnknownAttribute(index)),
            _ => None,
        }
    }

    /// Returns the raw `sai_status_t` value.
    ///
    /// Attribute indices beyond the width of a range are clamped to its last
    /// slot.
    pub fn to_raw(self) -> i32 {
        let indexed = |base: i32, index: u32| {
            let index = index.min((ATTR_RANGE_SIZE - 1) as u32) as i32;
            -(base + index)
        };
        match self {
            SaiStatus::Success => 0,
            SaiStatus::Failure => -1,
            SaiStatus::NotSupported => -2,
            SaiStatus::NoMemory => -3,
            SaiStatus::InsufficientResources => -4,
            SaiStatus::InvalidParameter => -5,
            SaiStatus::ItemAlreadyExists => -6,
            SaiStatus::ItemNotFound => -7,
            SaiStatus::BufferOverflow => -8,
            SaiStatus::InvalidPortNumber => -9,
            SaiStatus::InvalidPortMember => -10,
            SaiStatus::InvalidVlanId => -11,
            SaiStatus::Uninitialized => -12,
            SaiStatus::TableFull => -13,
            SaiStatus::MandatoryAttributeMissing => -14,
            SaiStatus::NotImplemented => -15,
            SaiStatus::AddrNotFound => -16,
            SaiStatus::ObjectInUse => -17,
            SaiStatus::InvalidObjectType => -18,
            SaiStatus::InvalidObjectId => -19,
            SaiStatus::InvalidNvStorage => -20,
            SaiStatus::NvStorageFull => -21,
            SaiStatus::SwUpgradeVersionMismatch => -22,
            SaiStatus::NotExecuted => -23,
            SaiStatus::InvalidAttribute(i) => indexed(INVALID_ATTRIBUTE_BASE, i),
            SaiStatus::InvalidAttrValue(i) => indexed(INVALID_ATTR_VALUE_BASE, i),
            SaiStatus::AttrNotImplemented(i) => indexed(ATTR_NOT_IMPLEMENTED_BASE, i),
            SaiStatus::UnknownAttribute(i) => indexed(UNKNOWN_ATTRIBUTE_BASE, i),
        }
    }

    /// Returns true if the status indicates success.
    pub fn is_success(&self) -> bool {
        *self == SaiStatus::Success
    }

    /// Returns true if the status indicates an error.
    pub fn is_error(&self) -> bool {
        *self != SaiStatus::Success
    }

    /// Returns the attribute index carried by attribute-indexed statuses.
    pub fn attr_index(&self) -> Option<u32> {
        match self {
            SaiStatus::InvalidAttribute(i)
            | SaiStatus::InvalidAttrValue(i)
            | SaiStatus::AttrNotImplemented(i)
            | SaiStatus::UnknownAttribute(i) => Some(*i),
            _ => None,
        }
    }

    /// Converts to a Result, returning Ok(()) for success.
    pub fn into_result(self) -> SaiResult<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(SaiError::from_status(self))
        }
    }
}

impl fmt::Display for SaiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SaiStatus::Success => "SAI_STATUS_SUCCESS",
            SaiStatus::Failure => "SAI_STATUS_FAILURE",
            SaiStatus::NotSupported => "SAI_STATUS_NOT_SUPPORTED",
            SaiStatus::NoMemory => "SAI_STATUS_NO_MEMORY",
            SaiStatus::InsufficientResources => "SAI_STATUS_INSUFFICIENT_RESOURCES",
            SaiStatus::InvalidParameter => "SAI_STATUS_INVALID_PARAMETER",
            SaiStatus::ItemAlreadyExists => "SAI_STATUS_ITEM_ALREADY_EXISTS",
            SaiStatus::ItemNotFound => "SAI_STATUS_ITEM_NOT_FOUND",
            SaiStatus::BufferOverflow => "SAI_STATUS_BUFFER_OVERFLOW",
            SaiStatus::InvalidPortNumber => "SAI_STATUS_INVALID_PORT_NUMBER",
            SaiStatus::InvalidPortMember => "SAI_STATUS_INVALID_PORT_MEMBER",
            SaiStatus::InvalidVlanId => "SAI_STATUS_INVALID_VLAN_ID",
            SaiStatus::Uninitialized => "SAI_STATUS_UNINITIALIZED",
            SaiStatus::TableFull => "SAI_STATUS_TABLE_FULL",
            SaiStatus::MandatoryAttributeMissing => "SAI_STATUS_MANDATORY_ATTRIBUTE_MISSING",
            SaiStatus::NotImplemented => "SAI_STATUS_NOT_IMPLEMENTED",
            SaiStatus::AddrNotFound => "SAI_STATUS_ADDR_NOT_FOUND",
            SaiStatus::ObjectInUse => "SAI_STATUS_OBJECT_IN_USE",
            SaiStatus::InvalidObjectType => "SAI_STATUS_INVALID_OBJECT_TYPE",
            SaiStatus::InvalidObjectId => "SAI_STATUS_INVALID_OBJECT_ID",
            SaiStatus::InvalidNvStorage => "SAI_STATUS_INVALID_NV_STORAGE",
            SaiStatus::NvStorageFull => "SAI_STATUS_NV_STORAGE_FULL",
            SaiStatus::SwUpgradeVersionMismatch => "SAI_STATUS_SW_UPGRADE_VERSION_MISMATCH",
            SaiStatus::NotExecuted => "SAI_STATUS_NOT_EXECUTED",
            SaiStatus::InvalidAttribute(i) => return write!(f, "SAI_STATUS_INVALID_ATTRIBUTE_{}", i),
            SaiStatus::InvalidAttrValue(i) => {
                return write!(f, "SAI_STATUS_INVALID_ATTR_VALUE_{}", i)
            }
            SaiStatus::AttrNotImplemented(i) => {
                return write!(f, "SAI_STATUS_ATTR_NOT_IMPLEMENTED_{}", i)
            }
            SaiStatus::UnknownAttribute(i) => return write!(f, "SAI_STATUS_UNKNOWN_ATTRIBUTE_{}", i),
        };
        write!(f, "{}", s)
    }
}

/// Error type for SAI operations.
#[derive(Debug, Clone, Error)]
pub enum SaiError {
    /// SAI API returned an error status with no richer mapping.
    #[error("SAI operation failed: {status}")]
    Status { status: SaiStatus },

    /// The requested feature is not supported by the SAI implementation.
    #[error("Feature not supported: {feature}")]
    NotSupported { feature: String },

    /// The provider recognizes the operation but does not implement it.
    #[error("Not implemented: {feature}")]
    NotImplemented { feature: String },

    /// Invalid parameter passed to SAI API.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// The requested item was not found.
    #[error("Item not found: {item}")]
    NotFound { item: String },

    /// The item already exists.
    #[error("Item already exists: {item}")]
    AlreadyExists { item: String },

    /// Hardware table is full.
    #[error("Table full: {table}")]
    TableFull { table: String },

    /// Object is in use and cannot be removed.
    #[error("Object in use: {object}")]
    ObjectInUse { object: String },

    /// An object id of the wrong kind was supplied.
    #[error("Invalid object type: {message}")]
    InvalidObjectType { message: String },

    /// A mandatory attribute was absent from a create request.
    #[error("Mandatory attribute missing: {attr}")]
    MandatoryAttributeMissing { attr: String },

    /// Attribute is not valid for this operation (read-only, not applicable).
    #[error("Invalid attribute #{index} ({attr}): {reason}")]
    InvalidAttribute {
        index: u32,
        attr: String,
        reason: String,
    },

    /// Attribute value is outside the attribute's domain.
    #[error("Invalid value for attribute #{index} ({attr}): {reason}")]
    InvalidAttrValue {
        index: u32,
        attr: String,
        reason: String,
    },

    /// Attribute is recognized but the provider does not implement it.
    #[error("Attribute #{index} not implemented: {attr}")]
    AttrNotImplemented { index: u32, attr: String },

    /// Attribute id is not recognized at all.
    #[error("Unknown attribute #{index}: id {id:#x}")]
    UnknownAttribute { index: u32, id: u32 },

    /// SAI context is not initialized.
    #[error("SAI not initialized")]
    Uninitialized,

    /// Internal error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SaiError {
    /// Creates an error from a SAI status code.
    ///
    /// The context strings are unknown at this point, so they are filled
    /// with placeholders; `status()` of the result equals `status`.
    pub fn from_status(status: SaiStatus) -> Self {
        const UNKNOWN: &str = "unknown";
        match status {
            SaiStatus::Success => SaiError::Internal {
                message: "from_status called with success status".to_string(),
            },
            SaiStatus::NotSupported => SaiError::not_supported(UNKNOWN),
            SaiStatus::NotImplemented => SaiError::not_implemented(UNKNOWN),
            SaiStatus::InvalidParameter => SaiError::invalid_parameter(format!("SAI returned {}", status)),
            SaiStatus::ItemNotFound => SaiError::not_found(UNKNOWN),
            SaiStatus::ItemAlreadyExists => SaiError::already_exists(UNKNOWN),
            SaiStatus::TableFull => SaiError::table_full(UNKNOWN),
            SaiStatus::ObjectInUse => SaiError::object_in_use(UNKNOWN),
            SaiStatus::InvalidObjectType => SaiError::InvalidObjectType {
                message: UNKNOWN.to_string(),
            },
            SaiStatus::MandatoryAttributeMissing => SaiError::mandatory_missing(UNKNOWN),
            SaiStatus::Uninitialized => SaiError::Uninitialized,
            SaiStatus::Failure => SaiError::internal(format!("SAI returned {}", status)),
            SaiStatus::InvalidAttribute(index) => {
                SaiError::invalid_attribute(index, UNKNOWN, format!("SAI returned {}", status))
            }
            SaiStatus::InvalidAttrValue(index) => {
                SaiError::invalid_attr_value(index, UNKNOWN, format!("SAI returned {}", status))
            }
            SaiStatus::AttrNotImplemented(index) => SaiError::AttrNotImplemented {
                index,
                attr: UNKNOWN.to_string(),
            },
            SaiStatus::UnknownAttribute(index) => SaiError::UnknownAttribute { index, id: 0 },
            _ => SaiError::Status { status },
        }
    }

    /// Creates a not supported error with a feature description.
    pub fn not_supported(feature: impl Into<String>) -> Self {
        SaiError::NotSupported {
            feature: feature.into(),
        }
    }

    /// Creates a not implemented error with a feature description.
    pub fn not_implemented(feature: impl Into<String>) -> Self {
        SaiError::NotImplemented {
            feature: feature.into(),
        }
    }

    /// Creates an invalid parameter error with a message.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        SaiError::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a not found error with an item description.
    pub fn not_found(item: impl Into<String>) -> Self {
        SaiError::NotFound { item: item.into() }
    }

    /// Creates an already exists error.
    pub fn already_exists(item: impl Into<String>) -> Self {
        SaiError::AlreadyExists { item: item.into() }
    }

    /// Creates a table full error.
    pub fn table_full(table: impl Into<String>) -> Self {
        SaiError::TableFull {
            table: table.into(),
        }
    }

    /// Creates an object in use error.
    pub fn object_in_use(object: impl Into<String>) -> Self {
        SaiError::ObjectInUse {
            object: object.into(),
        }
    }

    /// Creates a mandatory attribute missing error.
    pub fn mandatory_missing(attr: impl Into<String>) -> Self {
        SaiError::MandatoryAttributeMissing { attr: attr.into() }
    }

    /// Creates an invalid attribute error for the attribute at `index`.
    pub fn invalid_attribute(index: u32, attr: impl Into<String>, reason: impl Into<String>) -> Self {
        SaiError::InvalidAttribute {
            index,
            attr: attr.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid attribute value error for the attribute at `index`.
    pub fn invalid_attr_value(
        index: u32,
        attr: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SaiError::InvalidAttrValue {
            index,
            attr: attr.into(),
            reason: reason.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        SaiError::Internal {
            message: message.into(),
        }
    }

    /// Returns the SAI status this error reports across the C boundary.
    pub fn status(&self) -> SaiStatus {
        match self {
            SaiError::Status { status } => *status,
            SaiError::NotSupported { .. } => SaiStatus::NotSupported,
            SaiError::NotImplemented { .. } => SaiStatus::NotImplemented,
            SaiError::InvalidParameter { .. } => SaiStatus::InvalidParameter,
            SaiError::NotFound { .. } => SaiStatus::ItemNotFound,
            SaiError::AlreadyExists { .. } => SaiStatus::ItemAlreadyExists,
            SaiError::TableFull { .. } => SaiStatus::TableFull,
            SaiError::ObjectInUse { .. } => SaiStatus::ObjectInUse,
            SaiError::InvalidObjectType { .. } => SaiStatus::InvalidObjectType,
            SaiError::MandatoryAttributeMissing { .. } => SaiStatus::MandatoryAttributeMissing,
            SaiError::InvalidAttribute { index, .. } => SaiStatus::InvalidAttribute(*index),
            SaiError::InvalidAttrValue { index, .. } => SaiStatus::InvalidAttrValue(*index),
            SaiError::AttrNotImplemented { index, .. } => SaiStatus::AttrNotImplemented(*index),
            SaiError::UnknownAttribute { index, .. } => SaiStatus::UnknownAttribute(*index),
            SaiError::Uninitialized => SaiStatus::Uninitialized,
            SaiError::Internal { .. } => SaiStatus::Failure,
        }
    }
}

/// Result type for SAI operations.
pub type SaiResult<T> = Result<T, SaiError>;

/// Extension trait for converting raw SAI status codes.
pub trait SaiStatusExt {
    /// Converts a raw status code to a Result.
    fn to_result(self) -> SaiResult<()>;
}

impl SaiStatusExt for i32 {
    fn to_result(self) -> SaiResult<()> {
        SaiStatus::from_raw(self).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_success() {
        assert!(SaiStatus::Success.is_success());
        assert!(!SaiStatus::Success.is_error());
        assert!(SaiStatus::Success.into_result().is_ok());
    }

    #[test]
    fn test_status_failure() {
        assert!(!SaiStatus::Failure.is_success());
        assert!(SaiStatus::Failure.is_error());
        assert!(SaiStatus::Failure.into_result().is_err());
    }

    #[test]
    fn test_status_from_raw() {
        assert_eq!(SaiStatus::from_raw(0), SaiStatus::Success);
        assert_eq!(SaiStatus::from_raw(-7), SaiStatus::ItemNotFound);
        assert_eq!(SaiStatus::from_raw(-14), SaiStatus::MandatoryAttributeMissing);
        assert_eq!(SaiStatus::from_raw(-999), SaiStatus::Failure);
        assert_eq!(SaiStatus::from_raw(i32::MIN), SaiStatus::Failure);
    }

    #[test]
    fn test_attribute_indexed_codes() {
        assert_eq!(SaiStatus::InvalidAttribute(0).to_raw(), -0x10000);
        assert_eq!(SaiStatus::InvalidAttrValue(3).to_raw(), -0x20003);
        assert_eq!(SaiStatus::AttrNotImplemented(1).to_raw(), -0x30001);
        assert_eq!(SaiStatus::UnknownAttribute(2).to_raw(), -0x40002);

        assert_eq!(SaiStatus::from_raw(-0x10000), SaiStatus::InvalidAttribute(0));
        assert_eq!(SaiStatus::from_raw(-0x2ffff), SaiStatus::InvalidAttrValue(0xffff));
        assert_eq!(SaiStatus::from_raw(-0x50000), SaiStatus::Failure);
        assert_eq!(SaiStatus::InvalidAttrValue(3).attr_index(), Some(3));
        assert_eq!(SaiStatus::TableFull.attr_index(), None);
    }

    #[test]
    fn test_index_clamped_to_range() {
        assert_eq!(SaiStatus::InvalidAttribute(0x2_0000).to_raw(), -0x1ffff);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(SaiStatus::ObjectInUse.to_string(), "SAI_STATUS_OBJECT_IN_USE");
        assert_eq!(
            SaiStatus::InvalidAttrValue(2).to_string(),
            "SAI_STATUS_INVALID_ATTR_VALUE_2"
        );
    }

    #[test]
    fn test_error_from_status() {
        let err = SaiError::from_status(SaiStatus::ItemNotFound);
        assert!(matches!(err, SaiError::NotFound { .. }));

        let err = SaiError::from_status(SaiStatus::TableFull);
        assert!(matches!(err, SaiError::TableFull { .. }));

        let err = SaiError::from_status(SaiStatus::InvalidAttribute(4));
        assert!(matches!(err, SaiError::InvalidAttribute { index: 4, .. }));
    }

    #[test]
    fn test_status_survives_error_conversion() {
        let statuses = [
            SaiStatus::Failure,
            SaiStatus::NotSupported,
            SaiStatus::NoMemory,
            SaiStatus::InvalidParameter,
            SaiStatus::ItemAlreadyExists,
            SaiStatus::ItemNotFound,
            SaiStatus::InvalidVlanId,
            SaiStatus::Uninitialized,
            SaiStatus::TableFull,
            SaiStatus::MandatoryAttributeMissing,
            SaiStatus::NotImplemented,
            SaiStatus::ObjectInUse,
            SaiStatus::InvalidObjectType,
            SaiStatus::InvalidObjectId,
            SaiStatus::NotExecuted,
            SaiStatus::InvalidAttribute(1),
            SaiStatus::InvalidAttrValue(2),
            SaiStatus::AttrNotImplemented(3),
            SaiStatus::UnknownAttribute(4),
        ];
        for status in statuses {
            assert_eq!(SaiError::from_status(status).status(), status);
            assert_eq!(SaiStatus::from_raw(status.to_raw()), status);
        }
    }

    #[test]
    fn test_raw_status_to_result() {
        assert!(0_i32.to_result().is_ok());
        assert!((-7_i32).to_result().is_err());
        let err = (-0x20001_i32).to_result().unwrap_err();
        assert_eq!(err.status(), SaiStatus::InvalidAttrValue(1));
    }
}
