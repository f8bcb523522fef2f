//! Type-safe SAI object ID wrappers.
//!
//! This module provides strongly-typed wrappers for SAI object IDs, preventing
//! accidental mixing of different object types (e.g., passing a port OID where
//! a router interface OID is expected).
//!
//! Providers encode the SAI object type in bits 48..56 of every id they hand
//! out. [`SaiObjectId::object_type`] reads it back, which lets a provider
//! reject a handle of the wrong kind that arrived through the C boundary.

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Raw SAI object ID type (matches sai_object_id_t in C).
pub type RawSaiObjectId = u64;

const OBJECT_TYPE_SHIFT: u32 = 48;
const OBJECT_TYPE_MASK: RawSaiObjectId = 0xff;
const OBJECT_INDEX_MASK: RawSaiObjectId = (1 << OBJECT_TYPE_SHIFT) - 1;

/// SAI object type codes (`sai_object_type_t`).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaiObjectType {
    Null = 0,
    Port = 1,
    Lag = 2,
    VirtualRouter = 3,
    NextHop = 4,
    NextHopGroup = 5,
    RouterInterface = 6,
    Switch = 33,
}

impl SaiObjectType {
    /// Decodes an object type code, returning `None` for codes this crate
    /// does not model.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Null),
            1 => Some(Self::Port),
            2 => Some(Self::Lag),
            3 => Some(Self::VirtualRouter),
            4 => Some(Self::NextHop),
            5 => Some(Self::NextHopGroup),
            6 => Some(Self::RouterInterface),
            33 => Some(Self::Switch),
            _ => None,
        }
    }

    /// Returns the numeric code.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Marker trait for SAI object kinds.
///
/// Each SAI object type implements this trait to enable compile-time
/// type checking of object IDs.
pub trait SaiObjectKind: Send + Sync + 'static {
    /// SAI object type encoded in ids of this kind.
    const OBJECT_TYPE: SaiObjectType;

    /// Returns the SAI object type name for debugging.
    fn type_name() -> &'static str;
}

/// A type-safe SAI object ID.
///
/// The phantom type parameter `T` indicates what kind of SAI object this ID
/// refers to.
///
/// # Examples
///
/// ```
/// use sonic_sai::{PortOid, RouterInterfaceOid};
///
/// let port = PortOid::compose(7);
/// let rif = RouterInterfaceOid::compose(7);
/// assert_ne!(port.as_raw(), rif.as_raw());
///
/// // This would fail to compile:
/// // fn takes_port(p: PortOid) {}
/// // takes_port(rif);  // Error: expected PortOid, found RouterInterfaceOid
/// ```
#[derive(Clone, Copy)]
pub struct SaiObjectId<T: SaiObjectKind> {
    raw: RawSaiObjectId,
    _marker: PhantomData<T>,
}

impl<T: SaiObjectKind> SaiObjectId<T> {
    /// The null object ID (SAI_NULL_OBJECT_ID).
    pub const NULL: Self = Self {
        raw: 0,
        _marker: PhantomData,
    };

    /// Creates a new object ID from a raw value.
    ///
    /// Returns `None` if the raw value is 0 (null object ID).
    pub fn from_raw(raw: RawSaiObjectId) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self::from_raw_unchecked(raw))
        }
    }

    /// Creates a new object ID from a raw value, including null.
    ///
    /// No check is made that the encoded object type matches `T`.
    pub const fn from_raw_unchecked(raw: RawSaiObjectId) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Builds an id of kind `T` from a provider-local index.
    pub const fn compose(index: u64) -> Self {
        let object_type = T::OBJECT_TYPE as u8 as RawSaiObjectId;
        Self::from_raw_unchecked(
            (object_type << OBJECT_TYPE_SHIFT) | (index & OBJECT_INDEX_MASK),
        )
    }

    /// Returns the raw object ID value.
    pub const fn as_raw(&self) -> RawSaiObjectId {
        self.raw
    }

    /// Returns the provider-local index (bits below the type field).
    pub const fn index(&self) -> u64 {
        self.raw & OBJECT_INDEX_MASK
    }

    /// Returns the object type encoded in the id, if recognized.
    pub fn object_type(&self) -> Option<SaiObjectType> {
        SaiObjectType::from_code(((self.raw >> OBJECT_TYPE_SHIFT) & OBJECT_TYPE_MASK) as u8)
    }

    /// Returns true if the encoded object type is the one `T` expects.
    pub fn has_expected_type(&self) -> bool {
        self.object_type() == Some(T::OBJECT_TYPE)
    }

    /// Returns true if this is a null object ID.
    pub const fn is_null(&self) -> bool {
        self.raw == 0
    }

    /// Returns true if this is a valid (non-null) object ID.
    pub const fn is_valid(&self) -> bool {
        self.raw != 0
    }
}

impl<T: SaiObjectKind> fmt::Debug for SaiObjectId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:016x})", T::type_name(), self.raw)
    }
}

impl<T: SaiObjectKind> fmt::Display for SaiObjectId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.raw)
    }
}

impl<T: SaiObjectKind> PartialEq for SaiObjectId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: SaiObjectKind> Eq for SaiObjectId<T> {}

impl<T: SaiObjectKind> Hash for SaiObjectId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T: SaiObjectKind> Default for SaiObjectId<T> {
    fn default() -> Self {
        Self::NULL
    }
}

impl<T: SaiObjectKind> Serialize for SaiObjectId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

macro_rules! define_object_kind {
    ($name:ident, $object_type:ident, $type_name:literal, $oid_alias:ident) => {
        #[doc = concat!("Marker type for SAI ", $type_name, " objects.")]
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl SaiObjectKind for $name {
            const OBJECT_TYPE: SaiObjectType = SaiObjectType::$object_type;

            fn type_name() -> &'static str {
                $type_name
            }
        }

        #[doc = concat!("Type alias for ", $type_name, " object IDs.")]
        pub type $oid_alias = SaiObjectId<$name>;
    };
}

define_object_kind!(SwitchKind, Switch, "Switch", SwitchOid);
define_object_kind!(PortKind, Port, "Port", PortOid);
define_object_kind!(VirtualRouterKind, VirtualRouter, "VirtualRouter", VirtualRouterOid);
define_object_kind!(RouterInterfaceKind, RouterInterface, "RouterInterface", RouterInterfaceOid);
