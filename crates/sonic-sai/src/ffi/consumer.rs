//! Calls into a C router interface method table.
//!
//! [`RawRouterInterfaceApi`] lets Rust code drive a method table built against
//! this crate's [`sai_attribute_t`] layout, such as the one [`exports`] hands
//! out through `sai_api_query()`, with the same [`RouterInterfaceApi`] trait
//! the native providers implement. The value union here is narrower than the
//! full `saitypes.h` one, so tables from other SAI builds do not qualify.
//!
//! [`exports`]: super::exports

use super::{
    decode_attribute, encode_attribute, sai_attribute_t, sai_object_id_t,
    sai_router_interface_api_t, SAI_NULL_OBJECT_ID,
};
use crate::api::router_interface::{RouterInterfaceApi, RouterInterfaceAttrId, RouterInterfaceAttribute};
use crate::error::{SaiError, SaiResult, SaiStatusExt};
use crate::types::RouterInterfaceOid;
use log::debug;
use std::ptr::NonNull;

/// A C method table viewed as a [`RouterInterfaceApi`].
pub struct RawRouterInterfaceApi {
    table: NonNull<sai_router_interface_api_t>,
}

// SAFETY: SAI method tables are immutable after `sai_api_query()` returns and
// SAI entry points may be called from any thread.
unsafe impl Send for RawRouterInterfaceApi {}
unsafe impl Sync for RawRouterInterfaceApi {}

impl std::fmt::Debug for RawRouterInterfaceApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawRouterInterfaceApi")
            .field("table", &self.table)
            .finish()
    }
}

fn count(len: usize) -> SaiResult<u32> {
    u32::try_from(len).map_err(|_| SaiError::invalid_parameter(format!("{} attributes", len)))
}

impl RawRouterInterfaceApi {
    /// Wraps a method table.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `table` is null.
    ///
    /// # Safety
    ///
    /// A non-null `table` must point to a valid `sai_router_interface_api_t`
    /// that outlives the returned value, and its function pointers must honor
    /// the SAI calling contract.
    pub unsafe fn from_raw(table: *const sai_router_interface_api_t) -> SaiResult<Self> {
        let table = NonNull::new(table.cast_mut())
            .ok_or_else(|| SaiError::invalid_parameter("null router interface API table"))?;
        Ok(Self { table })
    }

    fn table(&self) -> &sai_router_interface_api_t {
        // SAFETY: validity and lifetime are guaranteed by the from_raw caller.
        unsafe { self.table.as_ref() }
    }
}

impl RouterInterfaceApi for RawRouterInterfaceApi {
    fn create_router_interface(
        &self,
        attrs: &[RouterInterfaceAttribute],
    ) -> SaiResult<RouterInterfaceOid> {
        let create = self
            .table()
            .create_router_interface
            .ok_or_else(|| SaiError::not_implemented("create_router_interface"))?;
        let raw: Vec<sai_attribute_t> = attrs.iter().map(encode_attribute).collect();
        let attr_count = count(raw.len())?;

        let mut rif = SAI_NULL_OBJECT_ID;
        // SAFETY: rif and raw are live for the duration of the call.
        unsafe { create(&mut rif, attr_count, raw.as_ptr()) }.to_result()?;
        debug!("C provider created router interface {:#018x}", rif);

        RouterInterfaceOid::from_raw(rif)
            .ok_or_else(|| SaiError::internal("provider reported success with a null id"))
    }

    fn remove_router_interface(&self, rif: RouterInterfaceOid) -> SaiResult<()> {
        let remove = self
            .table()
            .remove_router_interface
            .ok_or_else(|| SaiError::not_implemented("remove_router_interface"))?;
        // SAFETY: plain value argument.
        unsafe { remove(rif.as_raw()) }.to_result()
    }

    fn set_router_interface_attribute(
        &self,
        rif: RouterInterfaceOid,
        attr: &RouterInterfaceAttribute,
    ) -> SaiResult<()> {
        let set = self
            .table()
            .set_router_interface_attribute
            .ok_or_else(|| SaiError::not_implemented("set_router_interface_attribute"))?;
        let raw = encode_attribute(attr);
        // SAFETY: raw is live for the duration of the call.
        unsafe { set(rif.as_raw(), &raw) }.to_result()
    }

    fn get_router_interface_attribute(
        &self,
        rif: RouterInterfaceOid,
        ids: &[RouterInterfaceAttrId],
    ) -> SaiResult<Vec<RouterInterfaceAttribute>> {
        let get = self
            .table()
            .get_router_interface_attribute
            .ok_or_else(|| SaiError::not_implemented("get_router_interface_attribute"))?;
        let mut raw: Vec<sai_attribute_t> = ids
            .iter()
            .map(|id| sai_attribute_t {
                id: id.as_raw(),
                value: Default::default(),
            })
            .collect();
        let attr_count = count(raw.len())?;

        // SAFETY: raw holds attr_count initialized entries for the provider to fill.
        unsafe { get(rif.as_raw(), attr_count, raw.as_mut_ptr()) }.to_result()?;

        raw.iter()
            .enumerate()
            .map(|(index, attr)| decode_attribute(index as u32, attr))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::router_interface::RouterInterfaceType;
    use crate::error::SaiStatus;
    use crate::ffi::{sai_status_t, SAI_ROUTER_INTERFACE_ATTR_MTU, SAI_STATUS_SUCCESS};
    use crate::types::{PortOid, VirtualRouterOid};
    use pretty_assertions::assert_eq;

    const FIXED_RIF: sai_object_id_t = 0x0006_0000_0000_0042;

    unsafe extern "C" fn create_counting(
        rif: *mut sai_object_id_t,
        attr_count: u32,
        attr_list: *const sai_attribute_t,
    ) -> sai_status_t {
        if attr_count != 3 || attr_list.is_null() {
            return SaiStatus::MandatoryAttributeMissing.to_raw();
        }
        *rif = FIXED_RIF;
        SAI_STATUS_SUCCESS
    }

    unsafe extern "C" fn create_null_id(
        _rif: *mut sai_object_id_t,
        _attr_count: u32,
        _attr_list: *const sai_attribute_t,
    ) -> sai_status_t {
        SAI_STATUS_SUCCESS
    }

    unsafe extern "C" fn remove_in_use(_rif: sai_object_id_t) -> sai_status_t {
        SaiStatus::ObjectInUse.to_raw()
    }

    unsafe extern "C" fn get_mtu_only(
        _rif: sai_object_id_t,
        attr_count: u32,
        attr_list: *mut sai_attribute_t,
    ) -> sai_status_t {
        let attrs = std::slice::from_raw_parts_mut(attr_list, attr_count as usize);
        for (index, attr) in attrs.iter_mut().enumerate() {
            if attr.id != SAI_ROUTER_INTERFACE_ATTR_MTU {
                return SaiStatus::InvalidAttribute(index as u32).to_raw();
            }
            attr.value.u32 = 9100;
        }
        SAI_STATUS_SUCCESS
    }

    fn table(api: &sai_router_interface_api_t) -> RawRouterInterfaceApi {
        unsafe { RawRouterInterfaceApi::from_raw(api) }.unwrap()
    }

    #[test]
    fn test_null_table() {
        let err = unsafe { RawRouterInterfaceApi::from_raw(std::ptr::null()) }.unwrap_err();
        assert_eq!(err.status(), SaiStatus::InvalidParameter);
    }

    #[test]
    fn test_missing_entry_points() {
        let empty = sai_router_interface_api_t::default();
        let api = table(&empty);
        let rif = RouterInterfaceOid::compose(1);

        assert_eq!(
            api.create_router_interface(&[]).unwrap_err().status(),
            SaiStatus::NotImplemented
        );
        assert_eq!(
            api.remove_router_interface(rif).unwrap_err().status(),
            SaiStatus::NotImplemented
        );
        assert_eq!(
            api.set_router_interface_attribute(rif, &RouterInterfaceAttribute::Mtu(1500))
                .unwrap_err()
                .status(),
            SaiStatus::NotImplemented
        );
        assert_eq!(
            api.get_router_interface_attribute(rif, &[RouterInterfaceAttrId::Mtu])
                .unwrap_err()
                .status(),
            SaiStatus::NotImplemented
        );
    }

    #[test]
    fn test_calls_through_table() {
        let raw = sai_router_interface_api_t {
            create_router_interface: Some(create_counting),
            remove_router_interface: Some(remove_in_use),
            set_router_interface_attribute: None,
            get_router_interface_attribute: Some(get_mtu_only),
        };
        let api = table(&raw);

        let attrs = [
            RouterInterfaceAttribute::VirtualRouterId(VirtualRouterOid::compose(1)),
            RouterInterfaceAttribute::Type(RouterInterfaceType::Port),
            RouterInterfaceAttribute::PortId(PortOid::compose(2)),
        ];
        let rif = api.create_router_interface(&attrs).unwrap();
        assert_eq!(rif.as_raw(), FIXED_RIF);
        assert_eq!(
            api.create_router_interface(&attrs[..2]).unwrap_err().status(),
            SaiStatus::MandatoryAttributeMissing
        );

        assert_eq!(
            api.remove_router_interface(rif).unwrap_err().status(),
            SaiStatus::ObjectInUse
        );

        assert_eq!(
            api.get_router_interface_attribute(rif, &[RouterInterfaceAttrId::Mtu])
                .unwrap(),
            vec![RouterInterfaceAttribute::Mtu(9100)]
        );
        assert_eq!(
            api.get_router_interface_attribute(
                rif,
                &[RouterInterfaceAttrId::Mtu, RouterInterfaceAttrId::Type]
            )
            .unwrap_err()
            .status(),
            SaiStatus::InvalidAttribute(1)
        );
    }

    #[test]
    fn test_null_id_on_success_is_an_error() {
        let raw = sai_router_interface_api_t {
            create_router_interface: Some(create_null_id),
            ..Default::default()
        };
        let err = table(&raw).create_router_interface(&[]).unwrap_err();
        assert_eq!(err.status(), SaiStatus::Failure);
    }
}
