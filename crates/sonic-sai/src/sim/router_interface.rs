//! Router interface table of the virtual switch.

use super::{RouterInterfaceEntry, SwitchState, VirtualSwitch};
use crate::api::router_interface::{
    RifBinding, RouterInterfaceApi, RouterInterfaceAttrId, RouterInterfaceAttribute,
    RouterInterfaceType, DEFAULT_MTU,
};
use crate::error::{SaiError, SaiResult};
use crate::net::MacAddress;
use crate::types::{RouterInterfaceOid, VirtualRouterOid};
use log::{debug, info};
use std::collections::HashSet;

/// A create request that passed validation.
struct CreateRequest {
    virtual_router: VirtualRouterOid,
    binding: RifBinding,
    src_mac: MacAddress,
    admin_v4: bool,
    admin_v6: bool,
    mtu: u32,
}

fn find(
    attrs: &[RouterInterfaceAttribute],
    id: RouterInterfaceAttrId,
) -> Option<(u32, RouterInterfaceAttribute)> {
    attrs
        .iter()
        .position(|attr| attr.id() == id)
        .map(|index| (index as u32, attrs[index]))
}

fn check_rif_id(rif: RouterInterfaceOid) -> SaiResult<()> {
    if rif.is_null() {
        return Err(SaiError::invalid_parameter("null router interface id"));
    }
    if !rif.has_expected_type() {
        return Err(SaiError::InvalidObjectType {
            message: format!("{} is not a router interface", rif),
        });
    }
    Ok(())
}

fn reject(state: &mut SwitchState, op: &str, err: SaiError) -> SaiError {
    state.stats.rejected += 1;
    debug!("{} rejected: {}", op, err);
    err
}

impl VirtualSwitch {
    fn check_mtu(&self, index: u32, mtu: u32) -> SaiResult<()> {
        if (self.config.min_mtu..=self.config.max_mtu).contains(&mtu) {
            Ok(())
        } else {
            Err(SaiError::invalid_attr_value(
                index,
                RouterInterfaceAttrId::Mtu.name(),
                format!(
                    "{} outside {}..={}",
                    mtu, self.config.min_mtu, self.config.max_mtu
                ),
            ))
        }
    }

    fn validate_create(
        &self,
        state: &SwitchState,
        attrs: &[RouterInterfaceAttribute],
    ) -> SaiResult<CreateRequest> {
        let mut seen = HashSet::new();
        for attr in attrs {
            if !seen.insert(attr.id()) {
                return Err(SaiError::invalid_parameter(format!(
                    "{} listed more than once",
                    attr.id()
                )));
            }
        }

        if let Some(index) = attrs.iter().position(|attr| !attr.id().is_known()) {
            return Err(SaiError::UnknownAttribute {
                index: index as u32,
                id: attrs[index].id().as_raw(),
            });
        }
        if let Some(index) = attrs.iter().position(|attr| attr.id().is_custom()) {
            return Err(SaiError::AttrNotImplemented {
                index: index as u32,
                attr: attrs[index].id().name(),
            });
        }

        let (vr_index, virtual_router) = match find(attrs, RouterInterfaceAttrId::VirtualRouterId) {
            Some((index, RouterInterfaceAttribute::VirtualRouterId(vr))) => (index, vr),
            _ => {
                return Err(SaiError::mandatory_missing(
                    RouterInterfaceAttrId::VirtualRouterId.name(),
                ))
            }
        };
        let rif_type = match find(attrs, RouterInterfaceAttrId::Type) {
            Some((_, RouterInterfaceAttribute::Type(t))) => t,
            _ => return Err(SaiError::mandatory_missing(RouterInterfaceAttrId::Type.name())),
        };

        let port = find(attrs, RouterInterfaceAttrId::PortId);
        let vlan = find(attrs, RouterInterfaceAttrId::VlanId);
        let (binding_index, binding) = match (rif_type, port, vlan) {
            (RouterInterfaceType::Port, _, Some((index, _))) => {
                return Err(SaiError::invalid_attribute(
                    index,
                    RouterInterfaceAttrId::VlanId.name(),
                    format!("not valid for {}", rif_type),
                ))
            }
            (RouterInterfaceType::Vlan, Some((index, _)), _) => {
                return Err(SaiError::invalid_attribute(
                    index,
                    RouterInterfaceAttrId::PortId.name(),
                    format!("not valid for {}", rif_type),
                ))
            }
            (RouterInterfaceType::Port, Some((index, RouterInterfaceAttribute::PortId(p))), None) => {
                (index, RifBinding::Port(p))
            }
            (RouterInterfaceType::Vlan, None, Some((index, RouterInterfaceAttribute::VlanId(v)))) => {
                (index, RifBinding::Vlan(v))
            }
            _ => return Err(SaiError::mandatory_missing(rif_type.binding_attr().name())),
        };

        let vr_entry = if virtual_router.is_null() {
            None
        } else {
            state.virtual_routers.get(&virtual_router)
        };
        let vr_entry = vr_entry.ok_or_else(|| {
            SaiError::invalid_attr_value(
                vr_index,
                RouterInterfaceAttrId::VirtualRouterId.name(),
                format!("no virtual router {}", virtual_router),
            )
        })?;

        let bound_rif = match binding {
            RifBinding::Port(port) => state
                .ports
                .get(&port)
                .filter(|_| port.is_valid())
                .map(|entry| entry.bound_rif),
            RifBinding::Vlan(vlan) => state.vlans.get(&vlan).map(|entry| entry.bound_rif),
        };
        let bound_rif = bound_rif.ok_or_else(|| {
            SaiError::invalid_attr_value(
                binding_index,
                rif_type.binding_attr().name(),
                format!("no such {}", binding),
            )
        })?;
        if let Some(rif) = bound_rif {
            return Err(SaiError::already_exists(format!(
                "{} already has router interface {}",
                binding, rif
            )));
        }

        let mtu = match find(attrs, RouterInterfaceAttrId::Mtu) {
            Some((index, RouterInterfaceAttribute::Mtu(mtu))) => {
                self.check_mtu(index, mtu)?;
                mtu
            }
            _ => DEFAULT_MTU,
        };
        let src_mac = match find(attrs, RouterInterfaceAttrId::SrcMacAddress) {
            Some((index, RouterInterfaceAttribute::SrcMacAddress(mac))) => {
                if !mac.is_assignable() {
                    return Err(SaiError::invalid_attr_value(
                        index,
                        RouterInterfaceAttrId::SrcMacAddress.name(),
                        format!("{} is not a unicast address", mac),
                    ));
                }
                mac
            }
            _ => vr_entry.src_mac,
        };
        let admin_v4 = match find(attrs, RouterInterfaceAttrId::AdminV4State) {
            Some((_, RouterInterfaceAttribute::AdminV4State(v))) => v,
            _ => true,
        };
        let admin_v6 = match find(attrs, RouterInterfaceAttrId::AdminV6State) {
            Some((_, RouterInterfaceAttribute::AdminV6State(v))) => v,
            _ => true,
        };

        if state.router_interfaces.len() >= self.config.max_router_interfaces {
            return Err(SaiError::table_full(format!(
                "router interfaces ({})",
                self.config.max_router_interfaces
            )));
        }

        Ok(CreateRequest {
            virtual_router,
            binding,
            src_mac,
            admin_v4,
            admin_v6,
            mtu,
        })
    }
}

impl RouterInterfaceApi for VirtualSwitch {
    fn create_router_interface(
        &self,
        attrs: &[RouterInterfaceAttribute],
    ) -> SaiResult<RouterInterfaceOid> {
        debug!("create router interface with {} attributes", attrs.len());

        let mut state = self.state.lock();
        let request = match self.validate_create(&state, attrs) {
            Ok(request) => request,
            Err(e) => return Err(reject(&mut state, "create router interface", e)),
        };

        let rif = RouterInterfaceOid::compose(state.allocate_index());
        if let Some(vr) = state.virtual_routers.get_mut(&request.virtual_router) {
            vr.rif_count += 1;
        }
        match request.binding {
            RifBinding::Port(port) => {
                if let Some(entry) = state.ports.get_mut(&port) {
                    entry.bound_rif = Some(rif);
                }
            }
            RifBinding::Vlan(vlan) => {
                if let Some(entry) = state.vlans.get_mut(&vlan) {
                    entry.bound_rif = Some(rif);
                }
            }
        }
        state.router_interfaces.insert(
            rif,
            RouterInterfaceEntry {
                virtual_router: request.virtual_router,
                binding: request.binding,
                src_mac: request.src_mac,
                admin_v4: request.admin_v4,
                admin_v6: request.admin_v6,
                mtu: request.mtu,
                ref_count: 0,
            },
        );
        state.stats.rifs_created += 1;

        info!(
            "created router interface {} on {} in virtual router {} (mtu {}, mac {})",
            rif, request.binding, request.virtual_router, request.mtu, request.src_mac
        );
        Ok(rif)
    }

    fn remove_router_interface(&self, rif: RouterInterfaceOid) -> SaiResult<()> {
        debug!("remove router interface {}", rif);

        let mut state = self.state.lock();
        let checked = check_rif_id(rif).and_then(|()| {
            let entry = state
                .router_interfaces
                .get(&rif)
                .ok_or_else(|| SaiError::not_found(format!("router interface {}", rif)))?;
            if entry.ref_count > 0 {
                return Err(SaiError::object_in_use(format!(
                    "router interface {} ({} references)",
                    rif, entry.ref_count
                )));
            }
            Ok(())
        });
        if let Err(e) = checked {
            return Err(reject(&mut state, "remove router interface", e));
        }

        let Some(entry) = state.router_interfaces.remove(&rif) else {
            return Err(SaiError::internal(format!("router interface {} vanished", rif)));
        };
        if let Some(vr) = state.virtual_routers.get_mut(&entry.virtual_router) {
            vr.rif_count = vr.rif_count.saturating_sub(1);
        }
        match entry.binding {
            RifBinding::Port(port) => {
                if let Some(p) = state.ports.get_mut(&port) {
                    p.bound_rif = None;
                }
            }
            RifBinding::Vlan(vlan) => {
                if let Some(v) = state.vlans.get_mut(&vlan) {
                    v.bound_rif = None;
                }
            }
        }
        state.stats.rifs_removed += 1;

        info!("removed router interface {} from {}", rif, entry.binding);
        Ok(())
    }

    fn set_router_interface_attribute(
        &self,
        rif: RouterInterfaceOid,
        attr: &RouterInterfaceAttribute,
    ) -> SaiResult<()> {
        debug!("set {} on router interface {}", attr, rif);

        let mut state = self.state.lock();
        if let Err(e) = check_rif_id(rif) {
            return Err(reject(&mut state, "set router interface attribute", e));
        }
        if !state.router_interfaces.contains_key(&rif) {
            let e = SaiError::not_found(format!("router interface {}", rif));
            return Err(reject(&mut state, "set router interface attribute", e));
        }

        let checked = match *attr {
            RouterInterfaceAttribute::VirtualRouterId(_)
            | RouterInterfaceAttribute::Type(_)
            | RouterInterfaceAttribute::PortId(_)
            | RouterInterfaceAttribute::VlanId(_) => Err(SaiError::invalid_attribute(
                0,
                attr.id().name(),
                "attribute is create-only",
            )),
            RouterInterfaceAttribute::Custom { id, .. } if !attr.id().is_known() => {
                Err(SaiError::UnknownAttribute { index: 0, id })
            }
            RouterInterfaceAttribute::Custom { id, .. } => Err(SaiError::AttrNotImplemented {
                index: 0,
                attr: RouterInterfaceAttrId::Custom(id).name(),
            }),
            RouterInterfaceAttribute::SrcMacAddress(mac) if !mac.is_assignable() => {
                Err(SaiError::invalid_attr_value(
                    0,
                    attr.id().name(),
                    format!("{} is not a unicast address", mac),
                ))
            }
            RouterInterfaceAttribute::Mtu(mtu) => self.check_mtu(0, mtu),
            _ => Ok(()),
        };
        if let Err(e) = checked {
            return Err(reject(&mut state, "set router interface attribute", e));
        }

        let Some(entry) = state.router_interfaces.get_mut(&rif) else {
            return Err(SaiError::internal(format!("router interface {} vanished", rif)));
        };
        match *attr {
            RouterInterfaceAttribute::SrcMacAddress(mac) => entry.src_mac = mac,
            RouterInterfaceAttribute::AdminV4State(v) => entry.admin_v4 = v,
            RouterInterfaceAttribute::AdminV6State(v) => entry.admin_v6 = v,
            RouterInterfaceAttribute::Mtu(mtu) => entry.mtu = mtu,
            _ => {}
        }
        state.stats.attrs_set += 1;
        Ok(())
    }

    fn get_router_interface_attribute(
        &self,
        rif: RouterInterfaceOid,
        ids: &[RouterInterfaceAttrId],
    ) -> SaiResult<Vec<RouterInterfaceAttribute>> {
        debug!("get {} attributes of router interface {}", ids.len(), rif);

        let mut state = self.state.lock();
        if let Err(e) = check_rif_id(rif) {
            return Err(reject(&mut state, "get router interface attribute", e));
        }
        if ids.is_empty() {
            let e = SaiError::invalid_parameter("empty attribute list");
            return Err(reject(&mut state, "get router interface attribute", e));
        }

        let result = match state.router_interfaces.get(&rif) {
            Some(entry) => ids
                .iter()
                .enumerate()
                .map(|(index, id)| read_attribute(entry, index as u32, *id))
                .collect::<SaiResult<Vec<_>>>(),
            None => Err(SaiError::not_found(format!("router interface {}", rif))),
        };
        result.map_err(|e| reject(&mut state, "get router interface attribute", e))
    }
}

fn read_attribute(
    entry: &RouterInterfaceEntry,
    index: u32,
    id: RouterInterfaceAttrId,
) -> SaiResult<RouterInterfaceAttribute> {
    let not_applicable = || {
        SaiError::invalid_attribute(
            index,
            id.name(),
            format!("not applicable to {}", entry.binding.rif_type()),
        )
    };

    let attr = match id {
        RouterInterfaceAttrId::VirtualRouterId => {
            RouterInterfaceAttribute::VirtualRouterId(entry.virtual_router)
        }
        RouterInterfaceAttrId::Type => RouterInterfaceAttribute::Type(entry.binding.rif_type()),
        RouterInterfaceAttrId::PortId => match entry.binding {
            RifBinding::Port(port) => RouterInterfaceAttribute::PortId(port),
            RifBinding::Vlan(_) => return Err(not_applicable()),
        },
        RouterInterfaceAttrId::VlanId => match entry.binding {
            RifBinding::Vlan(vlan) => RouterInterfaceAttribute::VlanId(vlan),
            RifBinding::Port(_) => return Err(not_applicable()),
        },
        RouterInterfaceAttrId::SrcMacAddress => RouterInterfaceAttribute::SrcMacAddress(entry.src_mac),
        RouterInterfaceAttrId::AdminV4State => RouterInterfaceAttribute::AdminV4State(entry.admin_v4),
        RouterInterfaceAttrId::AdminV6State => RouterInterfaceAttribute::AdminV6State(entry.admin_v6),
        RouterInterfaceAttrId::Mtu => RouterInterfaceAttribute::Mtu(entry.mtu),
        RouterInterfaceAttrId::Custom(raw) if !id.is_known() => {
            return Err(SaiError::UnknownAttribute { index, id: raw })
        }
        RouterInterfaceAttrId::Custom(_) => {
            return Err(SaiError::AttrNotImplemented {
                index,
                attr: id.name(),
            })
        }
    };
    Ok(attr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::router_interface::{RouterInterfaceApiExt, RouterInterfaceConfig};
    use crate::attribute::AttributeValue;
    use crate::error::SaiStatus;
    use crate::net::VlanId;
    use crate::sim::SimSwitchConfig;
    use crate::types::PortOid;
    use pretty_assertions::assert_eq;

    fn switch() -> VirtualSwitch {
        VirtualSwitch::new(SimSwitchConfig::default()).unwrap()
    }

    fn vlan(id: u16) -> VlanId {
        VlanId::new(id).unwrap()
    }

    fn status_of<T: std::fmt::Debug>(result: SaiResult<T>) -> SaiStatus {
        result.unwrap_err().status()
    }

    #[test]
    fn test_create_port_rif_defaults() {
        let sw = switch();
        let port = sw.create_port();
        let vr = sw.default_virtual_router();
        let rif = sw.create_from_config(&RouterInterfaceConfig::port(vr, port)).unwrap();

        assert!(rif.has_expected_type());
        let snapshot = sw.get_all(rif).unwrap();
        assert_eq!(snapshot.rif_type, RouterInterfaceType::Port);
        assert_eq!(snapshot.binding, RifBinding::Port(port));
        assert_eq!(snapshot.virtual_router, vr);
        assert_eq!(snapshot.mtu, DEFAULT_MTU);
        assert_eq!(snapshot.src_mac, sw.config().switch_mac);
        assert!(snapshot.admin_v4);
        assert!(snapshot.admin_v6);
        assert_eq!(sw.router_interface_count(), 1);
        assert_eq!(sw.stats().rifs_created, 1);
    }

    #[test]
    fn test_create_vlan_rif_with_overrides() {
        let sw = switch();
        sw.create_vlan(vlan(100)).unwrap();
        let mac: MacAddress = "00:11:22:33:44:55".parse().unwrap();
        let config = RouterInterfaceConfig::vlan(sw.default_virtual_router(), vlan(100))
            .with_src_mac(mac)
            .with_admin_v6(false)
            .with_mtu(9100);
        let rif = sw.create_from_config(&config).unwrap();

        assert_eq!(sw.get_binding(rif).unwrap(), RifBinding::Vlan(vlan(100)));
        assert_eq!(sw.get_src_mac(rif).unwrap(), mac);
        assert_eq!(sw.get_admin_state(rif).unwrap(), (true, false));
        assert_eq!(sw.get_mtu(rif).unwrap(), 9100);
    }

    #[test]
    fn test_src_mac_default_follows_virtual_router() {
        let sw = switch();
        let mac: MacAddress = "00:aa:00:bb:00:cc".parse().unwrap();
        let vr = sw.create_virtual_router(Some(mac)).unwrap();
        let port = sw.create_port();
        let rif = sw.create_from_config(&RouterInterfaceConfig::port(vr, port)).unwrap();
        assert_eq!(sw.get_src_mac(rif).unwrap(), mac);
    }

    #[test]
    fn test_create_rejects_duplicate_attribute() {
        let sw = switch();
        let port = sw.create_port();
        let mut attrs =
            RouterInterfaceConfig::port(sw.default_virtual_router(), port).to_attributes();
        attrs.push(RouterInterfaceAttribute::Mtu(1500));
        attrs.push(RouterInterfaceAttribute::Mtu(9000));
        assert_eq!(status_of(sw.create_router_interface(&attrs)), SaiStatus::InvalidParameter);
    }

    #[test]
    fn test_create_rejects_vendor_attribute() {
        let sw = switch();
        let port = sw.create_port();
        let mut attrs =
            RouterInterfaceConfig::port(sw.default_virtual_router(), port).to_attributes();
        attrs.push(RouterInterfaceAttribute::Custom {
            id: 0x1000_0001,
            value: AttributeValue::U32(1),
        });
        assert_eq!(
            status_of(sw.create_router_interface(&attrs)),
            SaiStatus::AttrNotImplemented(3)
        );
    }

    #[test]
    fn test_stray_custom_id_is_unknown_attribute() {
        let sw = switch();
        let port = sw.create_port();
        let vr = sw.default_virtual_router();
        let stray = RouterInterfaceAttribute::Custom {
            id: 7,
            value: AttributeValue::U32(9000),
        };

        let mut attrs = RouterInterfaceConfig::port(vr, port).to_attributes();
        attrs.push(stray);
        assert_eq!(
            status_of(sw.create_router_interface(&attrs)),
            SaiStatus::UnknownAttribute(3)
        );
        assert_eq!(sw.router_interface_count(), 0);

        let rif = sw.create_from_config(&RouterInterfaceConfig::port(vr, port)).unwrap();
        assert_eq!(
            status_of(sw.set_router_interface_attribute(rif, &stray)),
            SaiStatus::UnknownAttribute(0)
        );
        assert_eq!(
            status_of(sw.get_router_interface_attribute(
                rif,
                &[RouterInterfaceAttrId::Mtu, RouterInterfaceAttrId::Custom(3)]
            )),
            SaiStatus::UnknownAttribute(1)
        );
        assert_eq!(sw.get_mtu(rif).unwrap(), DEFAULT_MTU);
    }

    #[test]
    fn test_create_rejects_missing_mandatory() {
        let sw = switch();
        let port = sw.create_port();
        let vr = sw.default_virtual_router();

        let no_vr = [
            RouterInterfaceAttribute::Type(RouterInterfaceType::Port),
            RouterInterfaceAttribute::PortId(port),
        ];
        let no_type = [
            RouterInterfaceAttribute::VirtualRouterId(vr),
            RouterInterfaceAttribute::PortId(port),
        ];
        let no_port = [
            RouterInterfaceAttribute::VirtualRouterId(vr),
            RouterInterfaceAttribute::Type(RouterInterfaceType::Port),
        ];
        let no_vlan = [
            RouterInterfaceAttribute::VirtualRouterId(vr),
            RouterInterfaceAttribute::Type(RouterInterfaceType::Vlan),
        ];
        for attrs in [&no_vr[..], &no_type[..], &no_port[..], &no_vlan[..]] {
            assert_eq!(
                status_of(sw.create_router_interface(attrs)),
                SaiStatus::MandatoryAttributeMissing
            );
        }
        assert_eq!(sw.router_interface_count(), 0);
        assert_eq!(sw.stats().rejected, 4);
    }

    #[test]
    fn test_create_rejects_mismatched_binding() {
        let sw = switch();
        let port = sw.create_port();
        sw.create_vlan(vlan(10)).unwrap();
        let attrs = [
            RouterInterfaceAttribute::VirtualRouterId(sw.default_virtual_router()),
            RouterInterfaceAttribute::Type(RouterInterfaceType::Vlan),
            RouterInterfaceAttribute::VlanId(vlan(10)),
            RouterInterfaceAttribute::PortId(port),
        ];
        assert_eq!(
            status_of(sw.create_router_interface(&attrs)),
            SaiStatus::InvalidAttribute(3)
        );
    }

    #[test]
    fn test_create_rejects_dangling_references() {
        let sw = switch();
        let port = sw.create_port();
        let vr = sw.default_virtual_router();

        let bad_vr = RouterInterfaceConfig::port(VirtualRouterOid::compose(999), port);
        assert_eq!(
            status_of(sw.create_from_config(&bad_vr)),
            SaiStatus::InvalidAttrValue(0)
        );
        let null_vr = RouterInterfaceConfig::port(VirtualRouterOid::NULL, port);
        assert_eq!(
            status_of(sw.create_from_config(&null_vr)),
            SaiStatus::InvalidAttrValue(0)
        );
        let bad_port = RouterInterfaceConfig::port(vr, PortOid::compose(999));
        assert_eq!(
            status_of(sw.create_from_config(&bad_port)),
            SaiStatus::InvalidAttrValue(2)
        );
        let missing_vlan = RouterInterfaceConfig::vlan(vr, vlan(200));
        assert_eq!(
            status_of(sw.create_from_config(&missing_vlan)),
            SaiStatus::InvalidAttrValue(2)
        );
    }

    #[test]
    fn test_create_rejects_second_binding() {
        let sw = switch();
        let port = sw.create_port();
        let config = RouterInterfaceConfig::port(sw.default_virtual_router(), port);
        sw.create_from_config(&config).unwrap();
        assert_eq!(
            status_of(sw.create_from_config(&config)),
            SaiStatus::ItemAlreadyExists
        );
        assert_eq!(status_of(sw.remove_port(port)), SaiStatus::ObjectInUse);
    }

    #[test]
    fn test_create_rejects_bad_values() {
        let sw = switch();
        let port = sw.create_port();
        let vr = sw.default_virtual_router();

        let small = RouterInterfaceConfig::port(vr, port).with_mtu(10);
        assert_eq!(status_of(sw.create_from_config(&small)), SaiStatus::InvalidAttrValue(3));

        let multicast: MacAddress = "01:00:5e:00:00:01".parse().unwrap();
        let mcast = RouterInterfaceConfig::port(vr, port).with_src_mac(multicast);
        assert_eq!(status_of(sw.create_from_config(&mcast)), SaiStatus::InvalidAttrValue(3));

        let zero = RouterInterfaceConfig::port(vr, port).with_src_mac(MacAddress::ZERO);
        assert_eq!(status_of(sw.create_from_config(&zero)), SaiStatus::InvalidAttrValue(3));
    }

    #[test]
    fn test_create_table_full() {
        let sw = VirtualSwitch::new(SimSwitchConfig {
            max_router_interfaces: 1,
            ..Default::default()
        })
        .unwrap();
        let vr = sw.default_virtual_router();
        let p1 = sw.create_port();
        let p2 = sw.create_port();
        sw.create_from_config(&RouterInterfaceConfig::port(vr, p1)).unwrap();
        assert_eq!(
            status_of(sw.create_from_config(&RouterInterfaceConfig::port(vr, p2))),
            SaiStatus::TableFull
        );
    }

    #[test]
    fn test_failed_create_has_no_side_effects() {
        let sw = switch();
        let port = sw.create_port();
        let vr = sw.default_virtual_router();
        let bad = RouterInterfaceConfig::port(vr, port).with_mtu(100_000);
        assert!(sw.create_from_config(&bad).is_err());

        assert_eq!(sw.router_interface_count(), 0);
        sw.remove_port(port).unwrap();
        let vr2 = sw.create_virtual_router(None).unwrap();
        sw.remove_virtual_router(vr2).unwrap();
    }

    #[test]
    fn test_remove() {
        let sw = switch();
        sw.create_vlan(vlan(30)).unwrap();
        let vr = sw.create_virtual_router(None).unwrap();
        let rif = sw
            .create_from_config(&RouterInterfaceConfig::vlan(vr, vlan(30)))
            .unwrap();

        assert_eq!(status_of(sw.remove_virtual_router(vr)), SaiStatus::ObjectInUse);
        assert_eq!(status_of(sw.remove_vlan(vlan(30))), SaiStatus::ObjectInUse);

        sw.remove_router_interface(rif).unwrap();
        assert_eq!(sw.router_interface_count(), 0);
        assert_eq!(status_of(sw.remove_router_interface(rif)), SaiStatus::ItemNotFound);
        assert_eq!(status_of(sw.get_mtu(rif)), SaiStatus::ItemNotFound);
        assert_eq!(status_of(sw.set_mtu(rif, 1500)), SaiStatus::ItemNotFound);

        // binding and virtual router are free again
        sw.remove_vlan(vlan(30)).unwrap();
        sw.remove_virtual_router(vr).unwrap();
    }

    struct Recorder;

    static RECORDS: parking_lot::Mutex<Vec<(log::Level, String)>> =
        parking_lot::const_mutex(Vec::new());

    impl log::Log for Recorder {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            RECORDS.lock().push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static RECORDER: Recorder = Recorder;

    #[test]
    fn test_rejections_log_at_debug() {
        let _ = log::set_logger(&RECORDER);
        log::set_max_level(log::LevelFilter::Trace);

        let sw = switch();
        let missing = RouterInterfaceOid::compose(0xbeef);
        assert_eq!(status_of(sw.remove_router_interface(missing)), SaiStatus::ItemNotFound);
        assert_eq!(status_of(sw.set_mtu(missing, 1500)), SaiStatus::ItemNotFound);
        assert_eq!(sw.stats().rejected, 2);

        let needle = missing.to_string();
        let rejections: Vec<log::Level> = RECORDS
            .lock()
            .iter()
            .filter(|(_, msg)| msg.contains("rejected") && msg.contains(&needle))
            .map(|(level, _)| *level)
            .collect();
        assert_eq!(rejections, vec![log::Level::Debug, log::Level::Debug]);
    }

    #[test]
    fn test_remove_rejects_referenced_interface() {
        let sw = switch();
        let port = sw.create_port();
        let rif = sw
            .create_from_config(&RouterInterfaceConfig::port(sw.default_virtual_router(), port))
            .unwrap();

        assert_eq!(sw.retain_router_interface(rif).unwrap(), 1);
        assert_eq!(sw.retain_router_interface(rif).unwrap(), 2);
        assert_eq!(status_of(sw.remove_router_interface(rif)), SaiStatus::ObjectInUse);

        assert_eq!(sw.release_router_interface(rif).unwrap(), 1);
        assert_eq!(sw.release_router_interface(rif).unwrap(), 0);
        assert_eq!(status_of(sw.release_router_interface(rif)), SaiStatus::Failure);
        sw.remove_router_interface(rif).unwrap();
    }

    #[test]
    fn test_bad_ids() {
        let sw = switch();
        assert_eq!(
            status_of(sw.remove_router_interface(RouterInterfaceOid::NULL)),
            SaiStatus::InvalidParameter
        );

        let port = sw.create_port();
        let wrong_kind = RouterInterfaceOid::from_raw_unchecked(port.as_raw());
        assert_eq!(
            status_of(sw.remove_router_interface(wrong_kind)),
            SaiStatus::InvalidObjectType
        );
        assert_eq!(status_of(sw.get_mtu(wrong_kind)), SaiStatus::InvalidObjectType);
        assert_eq!(
            status_of(sw.get_mtu(RouterInterfaceOid::compose(12345))),
            SaiStatus::ItemNotFound
        );
    }

    #[test]
    fn test_set_attributes() {
        let sw = switch();
        let port = sw.create_port();
        let rif = sw
            .create_from_config(&RouterInterfaceConfig::port(sw.default_virtual_router(), port))
            .unwrap();

        sw.set_mtu(rif, 9100).unwrap();
        assert_eq!(sw.get_mtu(rif).unwrap(), 9100);
        sw.set_admin_state(rif, false, true).unwrap();
        assert_eq!(sw.get_admin_state(rif).unwrap(), (false, true));
        let mac: MacAddress = "00:de:ad:be:ef:00".parse().unwrap();
        sw.set_src_mac(rif, mac).unwrap();
        assert_eq!(sw.get_src_mac(rif).unwrap(), mac);
        assert_eq!(sw.stats().attrs_set, 4);

        assert_eq!(status_of(sw.set_mtu(rif, 20_000)), SaiStatus::InvalidAttrValue(0));
        assert_eq!(
            status_of(sw.set_src_mac(rif, MacAddress::ZERO)),
            SaiStatus::InvalidAttrValue(0)
        );
        assert_eq!(sw.get_mtu(rif).unwrap(), 9100);
    }

    #[test]
    fn test_set_rejects_create_only() {
        let sw = switch();
        let port = sw.create_port();
        let other = sw.create_port();
        let rif = sw
            .create_from_config(&RouterInterfaceConfig::port(sw.default_virtual_router(), port))
            .unwrap();

        let attempts = [
            RouterInterfaceAttribute::Type(RouterInterfaceType::Vlan),
            RouterInterfaceAttribute::PortId(other),
            RouterInterfaceAttribute::VlanId(vlan(5)),
            RouterInterfaceAttribute::VirtualRouterId(sw.default_virtual_router()),
        ];
        for attr in &attempts {
            assert_eq!(
                status_of(sw.set_router_interface_attribute(rif, attr)),
                SaiStatus::InvalidAttribute(0)
            );
        }
        assert_eq!(sw.get_type(rif).unwrap(), RouterInterfaceType::Port);
        assert_eq!(sw.get_binding(rif).unwrap(), RifBinding::Port(port));

        let vendor = RouterInterfaceAttribute::Custom {
            id: 0x1000_0000,
            value: AttributeValue::Bool(true),
        };
        assert_eq!(
            status_of(sw.set_router_interface_attribute(rif, &vendor)),
            SaiStatus::AttrNotImplemented(0)
        );
    }

    #[test]
    fn test_get_in_request_order() {
        let sw = switch();
        let port = sw.create_port();
        let rif = sw
            .create_from_config(
                &RouterInterfaceConfig::port(sw.default_virtual_router(), port).with_mtu(1500),
            )
            .unwrap();

        let values = sw
            .get_router_interface_attribute(
                rif,
                &[
                    RouterInterfaceAttrId::Mtu,
                    RouterInterfaceAttrId::Type,
                    RouterInterfaceAttrId::PortId,
                ],
            )
            .unwrap();
        assert_eq!(
            values,
            vec![
                RouterInterfaceAttribute::Mtu(1500),
                RouterInterfaceAttribute::Type(RouterInterfaceType::Port),
                RouterInterfaceAttribute::PortId(port),
            ]
        );
    }

    #[test]
    fn test_get_inapplicable_binding_fails_whole_call() {
        let sw = switch();
        sw.create_vlan(vlan(7)).unwrap();
        let rif = sw
            .create_from_config(&RouterInterfaceConfig::vlan(sw.default_virtual_router(), vlan(7)))
            .unwrap();

        assert_eq!(
            status_of(sw.get_router_interface_attribute(
                rif,
                &[RouterInterfaceAttrId::Mtu, RouterInterfaceAttrId::PortId]
            )),
            SaiStatus::InvalidAttribute(1)
        );
        assert_eq!(
            status_of(sw.get_router_interface_attribute(rif, &[])),
            SaiStatus::InvalidParameter
        );
        assert_eq!(
            status_of(sw.get_router_interface_attribute(
                rif,
                &[RouterInterfaceAttrId::Custom(0x1000_0002)]
            )),
            SaiStatus::AttrNotImplemented(0)
        );
    }

    #[test]
    fn test_router_interfaces_listed_in_allocation_order() {
        let sw = switch();
        let vr = sw.default_virtual_router();
        let rifs: Vec<_> = (0..3)
            .map(|_| {
                let port = sw.create_port();
                sw.create_from_config(&RouterInterfaceConfig::port(vr, port)).unwrap()
            })
            .collect();
        assert_eq!(sw.router_interfaces(), rifs);
    }
}
