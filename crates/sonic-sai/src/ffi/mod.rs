//! C ABI surface of the router interface API.
//!
//! The `repr(C)` types here follow `saitypes.h` and `sairouterintf.h`. The
//! attribute value union carries only the members router interface
//! attributes use.
//!
//! Two bridges sit on top:
//!
//! - [`consumer`]: wraps a C method table as a [`RouterInterfaceApi`]
//! - [`exports`]: publishes a Rust provider through `sai_api_query()`
//!
//! [`RouterInterfaceApi`]: crate::api::router_interface::RouterInterfaceApi

#![allow(non_camel_case_types)]

pub mod consumer;
pub mod exports;

use crate::api::router_interface::{RouterInterfaceAttrId, RouterInterfaceAttribute};
use crate::attribute::{AttrValueType, AttributeValue};
use crate::error::{SaiError, SaiResult};
use crate::net::MacAddress;

pub use consumer::RawRouterInterfaceApi;
pub use exports::{
    exported_router_interface_api, register_context, sai_api_query, unregister_context,
    ROUTER_INTERFACE_API,
};

pub type sai_status_t = i32;
pub type sai_api_t = i32;
pub type sai_object_id_t = u64;
pub type sai_attr_id_t = u32;
pub type sai_mac_t = [u8; 6];
pub type sai_vlan_id_t = u16;
pub type sai_router_interface_type_t = i32;

pub const SAI_STATUS_SUCCESS: sai_status_t = 0;
pub const SAI_NULL_OBJECT_ID: sai_object_id_t = 0;
pub const SAI_API_ROUTER_INTERFACE: sai_api_t = 9;

pub const SAI_ROUTER_INTERFACE_TYPE_PORT: sai_router_interface_type_t = 0;
pub const SAI_ROUTER_INTERFACE_TYPE_VLAN: sai_router_interface_type_t = 1;

pub const SAI_ROUTER_INTERFACE_ATTR_START: sai_attr_id_t = 0;
pub const SAI_ROUTER_INTERFACE_ATTR_VIRTUAL_ROUTER_ID: sai_attr_id_t = 0;
pub const SAI_ROUTER_INTERFACE_ATTR_TYPE: sai_attr_id_t = 1;
pub const SAI_ROUTER_INTERFACE_ATTR_PORT_ID: sai_attr_id_t = 2;
pub const SAI_ROUTER_INTERFACE_ATTR_VLAN_ID: sai_attr_id_t = 3;
pub const SAI_ROUTER_INTERFACE_ATTR_SRC_MAC_ADDRESS: sai_attr_id_t = 4;
pub const SAI_ROUTER_INTERFACE_ATTR_ADMIN_V4_STATE: sai_attr_id_t = 5;
pub const SAI_ROUTER_INTERFACE_ATTR_ADMIN_V6_STATE: sai_attr_id_t = 6;
pub const SAI_ROUTER_INTERFACE_ATTR_MTU: sai_attr_id_t = 7;
pub const SAI_ROUTER_INTERFACE_ATTR_END: sai_attr_id_t = 8;
pub const SAI_ROUTER_INTERFACE_ATTR_CUSTOM_RANGE_BASE: sai_attr_id_t = 0x1000_0000;

/// `sai_attribute_value_t`, restricted to the members used here.
#[repr(C)]
#[derive(Clone, Copy)]
pub union sai_attribute_value_t {
    pub booldata: bool,
    pub u8: u8,
    pub u16: u16,
    pub u32: u32,
    pub s32: i32,
    pub u64: u64,
    pub mac: sai_mac_t,
    pub oid: sai_object_id_t,
}

impl Default for sai_attribute_value_t {
    fn default() -> Self {
        sai_attribute_value_t { u64: 0 }
    }
}

/// `sai_attribute_t`.
#[repr(C)]
#[derive(Clone, Copy, Default)]
pub struct sai_attribute_t {
    pub id: sai_attr_id_t,
    pub value: sai_attribute_value_t,
}

impl std::fmt::Debug for sai_attribute_t {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // SAFETY: every member is plain data and the union is at most 8 bytes,
        // so the u64 view covers it.
        let raw = unsafe { self.value.u64 };
        f.debug_struct("sai_attribute_t")
            .field("id", &self.id)
            .field("value", &format_args!("{:#018x}", raw))
            .finish()
    }
}

pub type sai_create_router_interface_fn = Option<
    unsafe extern "C" fn(
        router_interface_id: *mut sai_object_id_t,
        attr_count: u32,
        attr_list: *const sai_attribute_t,
    ) -> sai_status_t,
>;

pub type sai_remove_router_interface_fn =
    Option<unsafe extern "C" fn(router_interface_id: sai_object_id_t) -> sai_status_t>;

pub type sai_set_router_interface_attribute_fn = Option<
    unsafe extern "C" fn(
        router_interface_id: sai_object_id_t,
        attr: *const sai_attribute_t,
    ) -> sai_status_t,
>;

pub type sai_get_router_interface_attribute_fn = Option<
    unsafe extern "C" fn(
        router_interface_id: sai_object_id_t,
        attr_count: u32,
        attr_list: *mut sai_attribute_t,
    ) -> sai_status_t,
>;

/// `sai_router_interface_api_t`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct sai_router_interface_api_t {
    pub create_router_interface: sai_create_router_interface_fn,
    pub remove_router_interface: sai_remove_router_interface_fn,
    pub set_router_interface_attribute: sai_set_router_interface_attribute_fn,
    pub get_router_interface_attribute: sai_get_router_interface_attribute_fn,
}

/// Stores a value in its union member. Unused bytes are zero.
pub fn encode_value(value: AttributeValue) -> sai_attribute_value_t {
    let mut raw = sai_attribute_value_t::default();
    match value {
        AttributeValue::Bool(v) => raw.booldata = v,
        AttributeValue::U16(v) => raw.u16 = v,
        AttributeValue::U32(v) => raw.u32 = v,
        AttributeValue::S32(v) => raw.s32 = v,
        AttributeValue::U64(v) => raw.u64 = v,
        AttributeValue::Mac(mac) => raw.mac = *mac.as_bytes(),
        AttributeValue::Oid(oid) => raw.oid = oid,
    }
    raw
}

/// Reads the union member of type `ty`.
///
/// Returns `None` for a boolean byte other than 0 or 1.
pub fn decode_value(raw: &sai_attribute_value_t, ty: AttrValueType) -> Option<AttributeValue> {
    // SAFETY: the members read are integers or byte arrays, valid for any bit
    // pattern; bool is read through its byte.
    let value = unsafe {
        match ty {
            AttrValueType::Bool => match raw.u8 {
                0 => AttributeValue::Bool(false),
                1 => AttributeValue::Bool(true),
                _ => return None,
            },
            AttrValueType::U16 => AttributeValue::U16(raw.u16),
            AttrValueType::U32 => AttributeValue::U32(raw.u32),
            AttrValueType::S32 => AttributeValue::S32(raw.s32),
            AttrValueType::U64 => AttributeValue::U64(raw.u64),
            AttrValueType::Mac => AttributeValue::Mac(MacAddress::new(raw.mac)),
            AttrValueType::Oid => AttributeValue::Oid(raw.oid),
        }
    };
    Some(value)
}

/// Converts a typed attribute to its C form.
pub fn encode_attribute(attr: &RouterInterfaceAttribute) -> sai_attribute_t {
    sai_attribute_t {
        id: attr.id().as_raw(),
        value: encode_value(attr.value()),
    }
}

/// Decodes the id of the attribute at `index` of a C list.
///
/// Vendor ids are rejected: their value type is not known at the boundary.
pub fn decode_attr_id(index: u32, id: sai_attr_id_t) -> SaiResult<RouterInterfaceAttrId> {
    let attr_id = RouterInterfaceAttrId::from_raw(id).ok_or(SaiError::UnknownAttribute { index, id })?;
    if attr_id.is_custom() {
        return Err(SaiError::AttrNotImplemented {
            index,
            attr: attr_id.name(),
        });
    }
    Ok(attr_id)
}

/// Converts the attribute at `index` of a C list to its typed form.
pub fn decode_attribute(index: u32, raw: &sai_attribute_t) -> SaiResult<RouterInterfaceAttribute> {
    let id = decode_attr_id(index, raw.id)?;
    let invalid = || SaiError::invalid_attr_value(index, id.name(), "malformed value");
    let ty = id.value_type().ok_or_else(invalid)?;
    let value = decode_value(&raw.value, ty).ok_or_else(invalid)?;
    RouterInterfaceAttribute::from_parts(id, value).ok_or_else(|| {
        SaiError::invalid_attr_value(index, id.name(), format!("{} out of range", value))
    })
}
