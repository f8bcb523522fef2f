//! Rust providers exported to C callers.
//!
//! A provider is published by registering a [`SaiContext`]; C code then
//! finds the router interface table with `sai_api_query()` and calls through
//! [`ROUTER_INTERFACE_API`]. Every entry point converts the C arguments,
//! forwards to the registered provider and maps the outcome back to a
//! `sai_status_t`.

use super::{
    decode_attr_id, decode_attribute, encode_value, sai_api_t, sai_attribute_t,
    sai_object_id_t, sai_router_interface_api_t, sai_status_t, RawRouterInterfaceApi,
    SAI_STATUS_SUCCESS,
};
use crate::api::router_interface::{RouterInterfaceApi, RouterInterfaceAttrId};
use crate::api::{SaiApi, SaiContext};
use crate::error::{SaiError, SaiResult, SaiStatus, SaiStatusExt};
use crate::types::RouterInterfaceOid;
use log::{debug, info};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::ffi::c_void;
use std::sync::Arc;

static CONTEXT: Lazy<RwLock<Option<SaiContext>>> = Lazy::new(|| RwLock::new(None));

/// Publishes `ctx` to C callers, replacing any earlier registration.
pub fn register_context(ctx: SaiContext) {
    info!("registered SAI context for C callers: {:?}", ctx);
    *CONTEXT.write() = Some(ctx);
}

/// Withdraws the registered context. Later C calls fail with
/// `SAI_STATUS_UNINITIALIZED`.
pub fn unregister_context() {
    if CONTEXT.write().take().is_some() {
        info!("unregistered SAI context");
    }
}

fn router_interface_api() -> SaiResult<Arc<dyn RouterInterfaceApi>> {
    CONTEXT
        .read()
        .as_ref()
        .ok_or(SaiError::Uninitialized)?
        .router_interface_api()
}

fn to_status(op: &str, result: SaiResult<()>) -> sai_status_t {
    match result {
        Ok(()) => SAI_STATUS_SUCCESS,
        Err(e) => {
            debug!("{} failed: {}", op, e);
            e.status().to_raw()
        }
    }
}

/// Borrows a C attribute list.
///
/// # Safety
///
/// A non-null `list` must point to `count` initialized attributes.
unsafe fn attr_slice<'a>(list: *const sai_attribute_t, count: u32) -> SaiResult<&'a [sai_attribute_t]> {
    if count == 0 {
        return Ok(&[]);
    }
    if list.is_null() {
        return Err(SaiError::invalid_parameter("null attribute list"));
    }
    Ok(std::slice::from_raw_parts(list, count as usize))
}

unsafe extern "C" fn create_router_interface(
    router_interface_id: *mut sai_object_id_t,
    attr_count: u32,
    attr_list: *const sai_attribute_t,
) -> sai_status_t {
    let result = (|| -> SaiResult<()> {
        if router_interface_id.is_null() {
            return Err(SaiError::invalid_parameter("null router_interface_id"));
        }
        let attrs = attr_slice(attr_list, attr_count)?
            .iter()
            .enumerate()
            .map(|(index, attr)| decode_attribute(index as u32, attr))
            .collect::<SaiResult<Vec<_>>>()?;
        let rif = router_interface_api()?.create_router_interface(&attrs)?;
        *router_interface_id = rif.as_raw();
        Ok(())
    })();
    to_status("create_router_interface", result)
}

unsafe extern "C" fn remove_router_interface(router_interface_id: sai_object_id_t) -> sai_status_t {
    let result = router_interface_api().and_then(|api| {
        api.remove_router_interface(RouterInterfaceOid::from_raw_unchecked(router_interface_id))
    });
    to_status("remove_router_interface", result)
}

unsafe extern "C" fn set_router_interface_attribute(
    router_interface_id: sai_object_id_t,
    attr: *const sai_attribute_t,
) -> sai_status_t {
    let result = (|| -> SaiResult<()> {
        let raw = attr
            .as_ref()
            .ok_or_else(|| SaiError::invalid_parameter("null attribute"))?;
        let attr = decode_attribute(0, raw)?;
        router_interface_api()?.set_router_interface_attribute(
            RouterInterfaceOid::from_raw_unchecked(router_interface_id),
            &attr,
        )
    })();
    to_status("set_router_interface_attribute", result)
}

unsafe extern "C" fn get_router_interface_attribute(
    router_interface_id: sai_object_id_t,
    attr_count: u32,
    attr_list: *mut sai_attribute_t,
) -> sai_status_t {
    let result = (|| -> SaiResult<()> {
        let ids = attr_slice(attr_list, attr_count)?
            .iter()
            .enumerate()
            .map(|(index, attr)| decode_attr_id(index as u32, attr.id))
            .collect::<SaiResult<Vec<RouterInterfaceAttrId>>>()?;
        let values = router_interface_api()?.get_router_interface_attribute(
            RouterInterfaceOid::from_raw_unchecked(router_interface_id),
            &ids,
        )?;
        if values.len() != ids.len() {
            return Err(SaiError::internal(format!(
                "provider returned {} values for {} attributes",
                values.len(),
                ids.len()
            )));
        }
        if !ids.is_empty() {
            let out = std::slice::from_raw_parts_mut(attr_list, ids.len());
            for (slot, value) in out.iter_mut().zip(&values) {
                slot.value = encode_value(value.value());
            }
        }
        Ok(())
    })();
    to_status("get_router_interface_attribute", result)
}

/// The router interface table handed out by [`sai_api_query`].
pub static ROUTER_INTERFACE_API: sai_router_interface_api_t = sai_router_interface_api_t {
    create_router_interface: Some(create_router_interface),
    remove_router_interface: Some(remove_router_interface),
    set_router_interface_attribute: Some(set_router_interface_attribute),
    get_router_interface_attribute: Some(get_router_interface_attribute),
};

/// Returns the method table for `api` (`sai_api_query()`).
///
/// # Safety
///
/// `api_method_table` must be null or valid for a pointer-sized write.
#[no_mangle]
pub unsafe extern "C" fn sai_api_query(
    api: sai_api_t,
    api_method_table: *mut *const c_void,
) -> sai_status_t {
    if api_method_table.is_null() {
        return SaiStatus::InvalidParameter.to_raw();
    }

    let guard = CONTEXT.read();
    let Some(ctx) = guard.as_ref() else {
        return SaiStatus::Uninitialized.to_raw();
    };

    match SaiApi::from_raw(api) {
        Some(SaiApi::RouterInterface) if ctx.is_api_available(SaiApi::RouterInterface) => {
            *api_method_table = (&ROUTER_INTERFACE_API as *const sai_router_interface_api_t).cast();
            SAI_STATUS_SUCCESS
        }
        _ => {
            debug!("sai_api_query: API {} not available", api);
            SaiStatus::NotSupported.to_raw()
        }
    }
}

/// Looks up the exported router interface table the way a C caller would and
/// wraps it for Rust use.
pub fn exported_router_interface_api() -> SaiResult<RawRouterInterfaceApi> {
    let mut table: *const c_void = std::ptr::null();
    // SAFETY: table is a valid out-pointer.
    unsafe { sai_api_query(SaiApi::RouterInterface as sai_api_t, &mut table) }.to_result()?;
    // SAFETY: on success table points at the static ROUTER_INTERFACE_API.
    unsafe { RawRouterInterfaceApi::from_raw(table.cast()) }
}
