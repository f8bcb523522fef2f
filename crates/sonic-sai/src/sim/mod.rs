//! In-memory reference provider.
//!
//! [`VirtualSwitch`] keeps the objects a router interface can reference
//! (virtual routers, ports, VLANs) and the router interfaces themselves, and
//! implements [`RouterInterfaceApi`](crate::api::router_interface::RouterInterfaceApi)
//! on top of them. Nothing is programmed into hardware.
//!
//! All state sits behind one mutex, so each API call is atomic with respect
//! to every other call on the same switch.

mod router_interface;

use crate::api::router_interface::{RifBinding, DEFAULT_MTU};
use crate::error::{SaiError, SaiResult};
use crate::net::{MacAddress, VlanId};
use crate::types::{PortOid, RouterInterfaceOid, SwitchOid, VirtualRouterOid};
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for a [`VirtualSwitch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimSwitchConfig {
    /// Switch MAC, also the source MAC of the default virtual router.
    pub switch_mac: MacAddress,
    /// Router interface table size.
    pub max_router_interfaces: usize,
    /// Smallest MTU accepted on a router interface.
    pub min_mtu: u32,
    /// Largest MTU accepted on a router interface.
    pub max_mtu: u32,
}

impl Default for SimSwitchConfig {
    fn default() -> Self {
        Self {
            switch_mac: MacAddress::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]),
            max_router_interfaces: 1024,
            min_mtu: 68,
            max_mtu: 9216,
        }
    }
}

impl SimSwitchConfig {
    /// Checks the configuration for internal consistency.
    ///
    /// The MTU bounds must contain [`DEFAULT_MTU`] so that an interface
    /// created without an MTU can still have its MTU set back to the default.
    pub fn validate(&self) -> SaiResult<()> {
        if !self.switch_mac.is_assignable() {
            return Err(SaiError::invalid_parameter(format!(
                "switch_mac {} is not a unicast address",
                self.switch_mac
            )));
        }
        if self.max_router_interfaces == 0 {
            return Err(SaiError::invalid_parameter("max_router_interfaces must be > 0"));
        }
        if !(self.min_mtu..=self.max_mtu).contains(&DEFAULT_MTU) {
            return Err(SaiError::invalid_parameter(format!(
                "MTU bounds {}..={} exclude the default MTU {}",
                self.min_mtu, self.max_mtu, DEFAULT_MTU
            )));
        }
        Ok(())
    }
}

/// Counters for router interface operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimSwitchStats {
    /// Router interfaces created.
    pub rifs_created: u64,
    /// Router interfaces removed.
    pub rifs_removed: u64,
    /// Successful attribute updates.
    pub attrs_set: u64,
    /// Requests rejected with an error.
    pub rejected: u64,
}

#[derive(Debug, Clone)]
struct VirtualRouterEntry {
    src_mac: MacAddress,
    rif_count: u32,
}

#[derive(Debug, Clone, Default)]
struct PortEntry {
    bound_rif: Option<RouterInterfaceOid>,
}

#[derive(Debug, Clone, Default)]
struct VlanEntry {
    bound_rif: Option<RouterInterfaceOid>,
}

/// Router interface record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouterInterfaceEntry {
    pub(crate) virtual_router: VirtualRouterOid,
    pub(crate) binding: RifBinding,
    pub(crate) src_mac: MacAddress,
    pub(crate) admin_v4: bool,
    pub(crate) admin_v6: bool,
    pub(crate) mtu: u32,
    /// Dependent objects (neighbors, next hops, routes) using this interface.
    pub(crate) ref_count: u32,
}

#[derive(Debug, Default)]
struct SwitchState {
    next_index: u64,
    virtual_routers: HashMap<VirtualRouterOid, VirtualRouterEntry>,
    ports: HashMap<PortOid, PortEntry>,
    vlans: HashMap<VlanId, VlanEntry>,
    router_interfaces: HashMap<RouterInterfaceOid, RouterInterfaceEntry>,
    stats: SimSwitchStats,
}

impl SwitchState {
    fn allocate_index(&mut self) -> u64 {
        self.next_index += 1;
        self.next_index
    }
}

/// A simulated switch implementing the router interface API.
///
/// # Example
///
/// ```
/// use sonic_sai::api::{RouterInterfaceApiExt, RouterInterfaceConfig};
/// use sonic_sai::sim::{SimSwitchConfig, VirtualSwitch};
///
/// let switch = VirtualSwitch::new(SimSwitchConfig::default()).unwrap();
/// let port = switch.create_port();
/// let rif = switch
///     .create_from_config(&RouterInterfaceConfig::port(switch.default_virtual_router(), port))
///     .unwrap();
/// assert_eq!(switch.get_mtu(rif).unwrap(), 1514);
/// ```
pub struct VirtualSwitch {
    config: SimSwitchConfig,
    switch_id: SwitchOid,
    default_virtual_router: VirtualRouterOid,
    state: Mutex<SwitchState>,
}

impl std::fmt::Debug for VirtualSwitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("VirtualSwitch")
            .field("switch_id", &self.switch_id)
            .field("virtual_routers", &state.virtual_routers.len())
            .field("ports", &state.ports.len())
            .field("vlans", &state.vlans.len())
            .field("router_interfaces", &state.router_interfaces.len())
            .finish()
    }
}

impl VirtualSwitch {
    /// Creates a switch with its default virtual router.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when [`SimSwitchConfig::validate`] rejects
    /// `config`.
    pub fn new(config: SimSwitchConfig) -> SaiResult<Self> {
        config.validate()?;

        let mut state = SwitchState::default();
        let switch_id = SwitchOid::compose(state.allocate_index());
        let default_virtual_router = VirtualRouterOid::compose(state.allocate_index());
        state.virtual_routers.insert(
            default_virtual_router,
            VirtualRouterEntry {
                src_mac: config.switch_mac,
                rif_count: 0,
            },
        );

        info!(
            "virtual switch {} up, default virtual router {} ({})",
            switch_id, default_virtual_router, config.switch_mac
        );

        Ok(Self {
            config,
            switch_id,
            default_virtual_router,
            state: Mutex::new(state),
        })
    }

    /// Returns the switch configuration.
    pub fn config(&self) -> &SimSwitchConfig {
        &self.config
    }

    /// Returns the switch id.
    pub fn switch_id(&self) -> SwitchOid {
        self.switch_id
    }

    /// Returns the virtual router created with the switch.
    pub fn default_virtual_router(&self) -> VirtualRouterOid {
        self.default_virtual_router
    }

    /// Returns a copy of the operation counters.
    pub fn stats(&self) -> SimSwitchStats {
        self.state.lock().stats.clone()
    }

    /// Creates a virtual router. Without an explicit MAC it inherits the
    /// switch MAC.
    pub fn create_virtual_router(&self, src_mac: Option<MacAddress>) -> SaiResult<VirtualRouterOid> {
        let src_mac = src_mac.unwrap_or(self.config.switch_mac);
        if !src_mac.is_assignable() {
            return Err(SaiError::invalid_parameter(format!(
                "virtual router MAC {} is not a unicast address",
                src_mac
            )));
        }

        let mut state = self.state.lock();
        let vr = VirtualRouterOid::compose(state.allocate_index());
        state.virtual_routers.insert(
            vr,
            VirtualRouterEntry {
                src_mac,
                rif_count: 0,
            },
        );
        info!("created virtual router {} ({})", vr, src_mac);
        Ok(vr)
    }

    /// Removes a virtual router that no router interface belongs to.
    pub fn remove_virtual_router(&self, vr: VirtualRouterOid) -> SaiResult<()> {
        if vr == self.default_virtual_router {
            return Err(SaiError::invalid_parameter(
                "the default virtual router cannot be removed",
            ));
        }

        let mut state = self.state.lock();
        let entry = state
            .virtual_routers
            .get(&vr)
            .ok_or_else(|| SaiError::not_found(format!("virtual router {}", vr)))?;
        if entry.rif_count > 0 {
            warn!(
                "refusing to remove virtual router {}: {} router interfaces",
                vr, entry.rif_count
            );
            return Err(SaiError::object_in_use(format!(
                "virtual router {} ({} router interfaces)",
                vr, entry.rif_count
            )));
        }
        state.virtual_routers.remove(&vr);
        info!("removed virtual router {}", vr);
        Ok(())
    }

    /// Returns the source MAC of a virtual router.
    pub fn virtual_router_mac(&self, vr: VirtualRouterOid) -> Option<MacAddress> {
        self.state.lock().virtual_routers.get(&vr).map(|e| e.src_mac)
    }

    /// Creates a front-panel port.
    pub fn create_port(&self) -> PortOid {
        let mut state = self.state.lock();
        let port = PortOid::compose(state.allocate_index());
        state.ports.insert(port, PortEntry::default());
        debug!("created port {}", port);
        port
    }

    /// Removes a port that no router interface is bound to.
    pub fn remove_port(&self, port: PortOid) -> SaiResult<()> {
        let mut state = self.state.lock();
        let entry = state
            .ports
            .get(&port)
            .ok_or_else(|| SaiError::not_found(format!("port {}", port)))?;
        if let Some(rif) = entry.bound_rif {
            return Err(SaiError::object_in_use(format!(
                "port {} (router interface {})",
                port, rif
            )));
        }
        state.ports.remove(&port);
        debug!("removed port {}", port);
        Ok(())
    }

    /// Creates a VLAN.
    pub fn create_vlan(&self, vlan: VlanId) -> SaiResult<()> {
        let mut state = self.state.lock();
        if state.vlans.contains_key(&vlan) {
            return Err(SaiError::already_exists(format!("Vlan{}", vlan)));
        }
        state.vlans.insert(vlan, VlanEntry::default());
        debug!("created Vlan{}", vlan);
        Ok(())
    }

    /// Removes a VLAN that no router interface is bound to.
    pub fn remove_vlan(&self, vlan: VlanId) -> SaiResult<()> {
        let mut state = self.state.lock();
        let entry = state
            .vlans
            .get(&vlan)
            .ok_or_else(|| SaiError::not_found(format!("Vlan{}", vlan)))?;
        if let Some(rif) = entry.bound_rif {
            return Err(SaiError::object_in_use(format!(
                "Vlan{} (router interface {})",
                vlan, rif
            )));
        }
        state.vlans.remove(&vlan);
        debug!("removed Vlan{}", vlan);
        Ok(())
    }

    /// Records a dependent object (neighbor, next hop, route) that uses the
    /// router interface. Returns the new reference count.
    pub fn retain_router_interface(&self, rif: RouterInterfaceOid) -> SaiResult<u32> {
        let mut state = self.state.lock();
        let entry = state
            .router_interfaces
            .get_mut(&rif)
            .ok_or_else(|| SaiError::not_found(format!("router interface {}", rif)))?;
        entry.ref_count = entry.ref_count.saturating_add(1);
        Ok(entry.ref_count)
    }

    /// Drops a dependent-object reference. Returns the new reference count.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the count is already zero.
    pub fn release_router_interface(&self, rif: RouterInterfaceOid) -> SaiResult<u32> {
        let mut state = self.state.lock();
        let entry = state
            .router_interfaces
            .get_mut(&rif)
            .ok_or_else(|| SaiError::not_found(format!("router interface {}", rif)))?;
        if entry.ref_count == 0 {
            return Err(SaiError::internal(format!(
                "router interface {} reference count underflow",
                rif
            )));
        }
        entry.ref_count -= 1;
        Ok(entry.ref_count)
    }

    /// Returns the number of router interfaces.
    pub fn router_interface_count(&self) -> usize {
        self.state.lock().router_interfaces.len()
    }

    /// Returns every router interface id, in allocation order.
    pub fn router_interfaces(&self) -> Vec<RouterInterfaceOid> {
        let state = self.state.lock();
        let mut rifs: Vec<_> = state.router_interfaces.keys().copied().collect();
        rifs.sort_by_key(|rif| rif.index());
        rifs
    }
}
