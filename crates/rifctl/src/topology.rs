//! Topology files for `rifctl apply`.
//!
//! A topology names the objects of a virtual switch and the router
//! interfaces bound to them:
//!
//! ```yaml
//! switch:
//!   switch_mac: "00:11:22:33:44:55"
//! virtual_routers:
//!   - name: Vrf-red
//!     src_mac: "00:aa:bb:cc:dd:ee"
//! ports: [Ethernet0, Ethernet4]
//! vlans: [100]
//! router_interfaces:
//!   - name: Ethernet0
//!     port: Ethernet0
//!     mtu: 9100
//!   - name: Vlan100
//!     virtual_router: Vrf-red
//!     vlan: 100
//!     admin_v6: false
//! ```
//!
//! Interfaces without `virtual_router` belong to the default virtual router.

use serde::{Deserialize, Serialize};
use sonic_sai::api::{RifBinding, RouterInterfaceApiExt, RouterInterfaceConfig, RouterInterfaceSnapshot};
use sonic_sai::sim::{SimSwitchConfig, VirtualSwitch};
use sonic_sai::{MacAddress, PortOid, SaiError, VirtualRouterOid, VlanId};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Name under which the switch's own virtual router is referenced.
pub const DEFAULT_VIRTUAL_ROUTER: &str = "default";

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse topology: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid switch configuration: {0}")]
    SwitchConfig(#[source] SaiError),

    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    #[error("router interface '{rif}' references unknown {kind} '{name}'")]
    UnknownName {
        rif: String,
        kind: &'static str,
        name: String,
    },

    #[error("router interface '{rif}' must name exactly one of 'port' or 'vlan'")]
    Binding { rif: String },

    #[error("{what}: {source}")]
    Sai {
        what: String,
        #[source]
        source: SaiError,
    },
}

pub type TopologyResult<T> = Result<T, TopologyError>;

fn sai_context(what: impl Into<String>) -> impl FnOnce(SaiError) -> TopologyError {
    let what = what.into();
    move |source| TopologyError::Sai { what, source }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VirtualRouterDef {
    pub name: String,
    /// Defaults to the switch MAC.
    #[serde(default)]
    pub src_mac: Option<MacAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterInterfaceDef {
    pub name: String,
    #[serde(default)]
    pub virtual_router: Option<String>,
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub vlan: Option<VlanId>,
    #[serde(default)]
    pub src_mac: Option<MacAddress>,
    #[serde(default)]
    pub admin_v4: Option<bool>,
    #[serde(default)]
    pub admin_v6: Option<bool>,
    #[serde(default)]
    pub mtu: Option<u32>,
}

/// A parsed topology file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Topology {
    #[serde(default)]
    pub switch: SimSwitchConfig,
    #[serde(default)]
    pub virtual_routers: Vec<VirtualRouterDef>,
    #[serde(default)]
    pub ports: Vec<String>,
    #[serde(default)]
    pub vlans: Vec<VlanId>,
    #[serde(default)]
    pub router_interfaces: Vec<RouterInterfaceDef>,
}

/// A router interface created from a topology, read back through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedInterface {
    pub name: String,
    #[serde(flatten)]
    pub snapshot: RouterInterfaceSnapshot,
}

/// The switch built by [`Topology::apply`].
#[derive(Debug)]
pub struct AppliedTopology {
    pub switch: VirtualSwitch,
    pub interfaces: Vec<AppliedInterface>,
}

fn check_unique<'a>(
    kind: &'static str,
    names: impl IntoIterator<Item = &'a str>,
) -> TopologyResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(TopologyError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

impl Topology {
    /// Parses a topology from YAML text.
    pub fn from_yaml(text: &str) -> TopologyResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads and parses a topology file.
    pub fn load(path: &Path) -> TopologyResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| TopologyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let topology = Self::from_yaml(&text)?;
        debug!(
            "loaded topology {}: {} virtual routers, {} ports, {} VLANs, {} router interfaces",
            path.display(),
            topology.virtual_routers.len(),
            topology.ports.len(),
            topology.vlans.len(),
            topology.router_interfaces.len()
        );
        Ok(topology)
    }

    /// Checks names and references without touching a switch.
    pub fn validate(&self) -> TopologyResult<()> {
        self.switch.validate().map_err(TopologyError::SwitchConfig)?;

        check_unique(
            "virtual router",
            std::iter::once(DEFAULT_VIRTUAL_ROUTER)
                .chain(self.virtual_routers.iter().map(|vr| vr.name.as_str())),
        )?;
        check_unique("port", self.ports.iter().map(String::as_str))?;
        check_unique(
            "router interface",
            self.router_interfaces.iter().map(|rif| rif.name.as_str()),
        )?;
        let mut vlans = HashSet::new();
        for vlan in &self.vlans {
            if !vlans.insert(*vlan) {
                return Err(TopologyError::DuplicateName {
                    kind: "VLAN",
                    name: vlan.to_string(),
                });
            }
        }

        for rif in &self.router_interfaces {
            let unknown = |kind: &'static str, name: String| TopologyError::UnknownName {
                rif: rif.name.clone(),
                kind,
                name,
            };
            if let Some(vr) = &rif.virtual_router {
                if vr != DEFAULT_VIRTUAL_ROUTER && !self.virtual_routers.iter().any(|v| &v.name == vr) {
                    return Err(unknown("virtual router", vr.clone()));
                }
            }
            match (&rif.port, &rif.vlan) {
                (Some(port), None) => {
                    if !self.ports.contains(port) {
                        return Err(unknown("port", port.clone()));
                    }
                }
                (None, Some(vlan)) => {
                    if !vlans.contains(vlan) {
                        return Err(unknown("VLAN", vlan.to_string()));
                    }
                }
                _ => {
                    return Err(TopologyError::Binding {
                        rif: rif.name.clone(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Builds a virtual switch holding every object of the topology and
    /// reads each router interface back.
    pub fn apply(&self) -> TopologyResult<AppliedTopology> {
        self.validate()?;

        let switch =
            VirtualSwitch::new(self.switch.clone()).map_err(TopologyError::SwitchConfig)?;

        let mut virtual_routers: HashMap<&str, VirtualRouterOid> = HashMap::new();
        virtual_routers.insert(DEFAULT_VIRTUAL_ROUTER, switch.default_virtual_router());
        for vr in &self.virtual_routers {
            let oid = switch
                .create_virtual_router(vr.src_mac)
                .map_err(sai_context(format!("virtual router '{}'", vr.name)))?;
            virtual_routers.insert(&vr.name, oid);
        }

        let ports: HashMap<&str, PortOid> = self
            .ports
            .iter()
            .map(|name| (name.as_str(), switch.create_port()))
            .collect();

        for vlan in &self.vlans {
            switch
                .create_vlan(*vlan)
                .map_err(sai_context(format!("Vlan{}", vlan)))?;
        }

        let mut interfaces = Vec::with_capacity(self.router_interfaces.len());
        for def in &self.router_interfaces {
            let vr_name = def.virtual_router.as_deref().unwrap_or(DEFAULT_VIRTUAL_ROUTER);
            let unknown = |kind: &'static str, name: String| TopologyError::UnknownName {
                rif: def.name.clone(),
                kind,
                name,
            };
            let vr = *virtual_routers
                .get(vr_name)
                .ok_or_else(|| unknown("virtual router", vr_name.to_string()))?;
            let binding = match (&def.port, def.vlan) {
                (Some(port), None) => RifBinding::Port(
                    *ports
                        .get(port.as_str())
                        .ok_or_else(|| unknown("port", port.clone()))?,
                ),
                (None, Some(vlan)) => RifBinding::Vlan(vlan),
                _ => {
                    return Err(TopologyError::Binding {
                        rif: def.name.clone(),
                    })
                }
            };

            let mut config = RouterInterfaceConfig::new(vr, binding);
            config.src_mac = def.src_mac;
            config.admin_v4 = def.admin_v4;
            config.admin_v6 = def.admin_v6;
            config.mtu = def.mtu;

            let what = format!("router interface '{}'", def.name);
            let rif = switch
                .create_from_config(&config)
                .map_err(sai_context(what.clone()))?;
            let snapshot = switch.get_all(rif).map_err(sai_context(what))?;
            info!("{} -> {} on {}", def.name, rif, binding);

            interfaces.push(AppliedInterface {
                name: def.name.clone(),
                snapshot,
            });
        }

        Ok(AppliedTopology { switch, interfaces })
    }
}
