//! SAI router interface API.
//!
//! A router interface (RIF) is a layer-3 attachment point bound either to a
//! port or to a VLAN, scoped to exactly one virtual router. This module holds
//! the typed form of the contract:
//!
//! - [`RouterInterfaceAttrId`] / [`RouterInterfaceAttribute`]: the closed set
//!   of attribute ids and the enum-tagged attribute union
//! - [`RouterInterfaceApi`]: the four-operation method table a provider
//!   implements (create, remove, set, get)
//! - [`RouterInterfaceApiExt`]: typed helpers layered over any provider
//! - [`RouterInterfaceConfig`]: builder for create requests
//!
//! `TYPE` and the `PORT_ID`/`VLAN_ID` binding are fixed at creation. Only the
//! source MAC, admin states and MTU change afterwards.

use crate::attribute::{AttrAccess, AttrValueType, AttributeValue, Presence};
use crate::error::{SaiError, SaiResult};
use crate::net::{MacAddress, VlanId};
use crate::types::{PortOid, RouterInterfaceOid, VirtualRouterOid};
use serde::{Deserialize, Serialize};
use std::fmt;

/// First attribute id of the vendor extension range.
pub const CUSTOM_RANGE_BASE: u32 = 0x1000_0000;

/// MTU applied when a create request does not carry one.
pub const DEFAULT_MTU: u32 = 1514;

/// Router interface type (`sai_router_interface_type_t`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterInterfaceType {
    /// Bound to a port (`SAI_ROUTER_INTERFACE_TYPE_PORT`).
    Port = 0,
    /// Bound to a VLAN (`SAI_ROUTER_INTERFACE_TYPE_VLAN`).
    Vlan = 1,
}

impl RouterInterfaceType {
    /// Decodes the raw enum value.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Port),
            1 => Some(Self::Vlan),
            _ => None,
        }
    }

    /// Returns the raw enum value.
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    /// The binding attribute that is mandatory for this type.
    pub fn binding_attr(self) -> RouterInterfaceAttrId {
        match self {
            Self::Port => RouterInterfaceAttrId::PortId,
            Self::Vlan => RouterInterfaceAttrId::VlanId,
        }
    }
}

impl fmt::Display for RouterInterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Port => write!(f, "SAI_ROUTER_INTERFACE_TYPE_PORT"),
            Self::Vlan => write!(f, "SAI_ROUTER_INTERFACE_TYPE_VLAN"),
        }
    }
}

/// Router interface attribute ids (`sai_router_interface_attr_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterInterfaceAttrId {
    VirtualRouterId,
    Type,
    PortId,
    VlanId,
    SrcMacAddress,
    AdminV4State,
    AdminV6State,
    Mtu,
    /// Vendor extension id, always `>= CUSTOM_RANGE_BASE`.
    Custom(u32),
}

impl RouterInterfaceAttrId {
    /// Every standard attribute, in id order.
    pub const STANDARD: [Self; 8] = [
        Self::VirtualRouterId,
        Self::Type,
        Self::PortId,
        Self::VlanId,
        Self::SrcMacAddress,
        Self::AdminV4State,
        Self::AdminV6State,
        Self::Mtu,
    ];

    /// Decodes a raw attribute id.
    ///
    /// Returns `None` for ids between the last standard id and
    /// [`CUSTOM_RANGE_BASE`], which name no attribute.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::VirtualRouterId),
            1 => Some(Self::Type),
            2 => Some(Self::PortId),
            3 => Some(Self::VlanId),
            4 => Some(Self::SrcMacAddress),
            5 => Some(Self::AdminV4State),
            6 => Some(Self::AdminV6State),
            7 => Some(Self::Mtu),
            id if id >= CUSTOM_RANGE_BASE => Some(Self::Custom(id)),
            _ => None,
        }
    }

    /// Returns the raw attribute id.
    pub fn as_raw(&self) -> u32 {
        match self {
            Self::VirtualRouterId => 0,
            Self::Type => 1,
            Self::PortId => 2,
            Self::VlanId => 3,
            Self::SrcMacAddress => 4,
            Self::AdminV4State => 5,
            Self::AdminV6State => 6,
            Self::Mtu => 7,
            Self::Custom(id) => *id,
        }
    }

    /// Returns true for vendor extension ids.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Returns false for a `Custom` id below [`CUSTOM_RANGE_BASE`], which
    /// names no attribute.
    pub fn is_known(&self) -> bool {
        match self {
            Self::Custom(id) => *id >= CUSTOM_RANGE_BASE,
            _ => true,
        }
    }

    /// The header name of the attribute.
    pub fn name(&self) -> String {
        let suffix = match self {
            Self::VirtualRouterId => "VIRTUAL_ROUTER_ID",
            Self::Type => "TYPE",
            Self::PortId => "PORT_ID",
            Self::VlanId => "VLAN_ID",
            Self::SrcMacAddress => "SRC_MAC_ADDRESS",
            Self::AdminV4State => "ADMIN_V4_STATE",
            Self::AdminV6State => "ADMIN_V6_STATE",
            Self::Mtu => "MTU",
            Self::Custom(id) => {
                return match id.checked_sub(CUSTOM_RANGE_BASE) {
                    Some(offset) => {
                        format!("SAI_ROUTER_INTERFACE_ATTR_CUSTOM_RANGE_BASE+{:#x}", offset)
                    }
                    None => format!("SAI_ROUTER_INTERFACE_ATTR_UNKNOWN_{:#x}", id),
                }
            }
        };
        format!("SAI_ROUTER_INTERFACE_ATTR_{}", suffix)
    }

    /// Union member the attribute's value lives in.
    ///
    /// Vendor extensions have no fixed type and return `None`.
    pub fn value_type(&self) -> Option<AttrValueType> {
        match self {
            Self::VirtualRouterId | Self::PortId => Some(AttrValueType::Oid),
            Self::Type => Some(AttrValueType::S32),
            Self::VlanId => Some(AttrValueType::U16),
            Self::SrcMacAddress => Some(AttrValueType::Mac),
            Self::AdminV4State | Self::AdminV6State => Some(AttrValueType::Bool),
            Self::Mtu => Some(AttrValueType::U32),
            Self::Custom(_) => None,
        }
    }

    /// Whether the attribute may be changed after creation.
    pub fn access(&self) -> AttrAccess {
        match self {
            Self::VirtualRouterId | Self::Type | Self::PortId | Self::VlanId => {
                AttrAccess::CreateOnly
            }
            _ => AttrAccess::CreateAndSet,
        }
    }

    /// Whether the attribute must be present in a create request.
    pub fn presence(&self) -> Presence {
        match self {
            Self::VirtualRouterId | Self::Type => Presence::Mandatory,
            Self::PortId => Presence::MandatoryWhen(RouterInterfaceType::Port.as_raw()),
            Self::VlanId => Presence::MandatoryWhen(RouterInterfaceType::Vlan.as_raw()),
            _ => Presence::Optional,
        }
    }

    /// Returns false for the binding attribute of the other interface type.
    pub fn applies_to(&self, rif_type: RouterInterfaceType) -> bool {
        match self {
            Self::PortId => rif_type == RouterInterfaceType::Port,
            Self::VlanId => rif_type == RouterInterfaceType::Vlan,
            _ => true,
        }
    }

    /// Human-readable description of the default applied when absent.
    pub fn default_description(&self) -> Option<&'static str> {
        match self {
            Self::SrcMacAddress => Some("virtual router SRC_MAC_ADDRESS"),
            Self::AdminV4State | Self::AdminV6State => Some("true"),
            Self::Mtu => Some("1514"),
            _ => None,
        }
    }
}

impl fmt::Display for RouterInterfaceAttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A router interface attribute: id and value together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterInterfaceAttribute {
    VirtualRouterId(VirtualRouterOid),
    Type(RouterInterfaceType),
    PortId(PortOid),
    VlanId(VlanId),
    SrcMacAddress(MacAddress),
    AdminV4State(bool),
    AdminV6State(bool),
    Mtu(u32),
    /// Vendor extension attribute.
    Custom { id: u32, value: AttributeValue },
}

impl RouterInterfaceAttribute {
    /// Returns the attribute's id.
    pub fn id(&self) -> RouterInterfaceAttrId {
        match self {
            Self::VirtualRouterId(_) => RouterInterfaceAttrId::VirtualRouterId,
            Self::Type(_) => RouterInterfaceAttrId::Type,
            Self::PortId(_) => RouterInterfaceAttrId::PortId,
            Self::VlanId(_) => RouterInterfaceAttrId::VlanId,
            Self::SrcMacAddress(_) => RouterInterfaceAttrId::SrcMacAddress,
            Self::AdminV4State(_) => RouterInterfaceAttrId::AdminV4State,
            Self::AdminV6State(_) => RouterInterfaceAttrId::AdminV6State,
            Self::Mtu(_) => RouterInterfaceAttrId::Mtu,
            Self::Custom { id, .. } => RouterInterfaceAttrId::Custom(*id),
        }
    }

    /// Returns the value in its generic union form.
    pub fn value(&self) -> AttributeValue {
        match self {
            Self::VirtualRouterId(oid) => AttributeValue::Oid(oid.as_raw()),
            Self::Type(t) => AttributeValue::S32(t.as_raw()),
            Self::PortId(oid) => AttributeValue::Oid(oid.as_raw()),
            Self::VlanId(vlan) => AttributeValue::U16(vlan.as_u16()),
            Self::SrcMacAddress(mac) => AttributeValue::Mac(*mac),
            Self::AdminV4State(v) | Self::AdminV6State(v) => AttributeValue::Bool(*v),
            Self::Mtu(mtu) => AttributeValue::U32(*mtu),
            Self::Custom { value, .. } => *value,
        }
    }

    /// Rebuilds a typed attribute from an id and a generic value.
    ///
    /// Returns `None` when the value sits in the wrong union member, is
    /// outside the type's encoding (unknown interface type, VLAN 0 or 4095),
    /// or a vendor id lies below [`CUSTOM_RANGE_BASE`].
    pub fn from_parts(id: RouterInterfaceAttrId, value: AttributeValue) -> Option<Self> {
        use AttributeValue as V;
        use RouterInterfaceAttrId as Id;

        let attr = match (id, value) {
            (Id::VirtualRouterId, V::Oid(raw)) => {
                Self::VirtualRouterId(VirtualRouterOid::from_raw_unchecked(raw))
            }
            (Id::Type, V::S32(raw)) => Self::Type(RouterInterfaceType::from_raw(raw)?),
            (Id::PortId, V::Oid(raw)) => Self::PortId(PortOid::from_raw_unchecked(raw)),
            (Id::VlanId, V::U16(raw)) => Self::VlanId(VlanId::new(raw).ok()?),
            (Id::SrcMacAddress, V::Mac(mac)) => Self::SrcMacAddress(mac),
            (Id::AdminV4State, V::Bool(v)) => Self::AdminV4State(v),
            (Id::AdminV6State, V::Bool(v)) => Self::AdminV6State(v),
            (Id::Mtu, V::U32(mtu)) => Self::Mtu(mtu),
            (Id::Custom(id), value) if id >= CUSTOM_RANGE_BASE => Self::Custom { id, value },
            _ => return None,
        };
        Some(attr)
    }
}

impl fmt::Display for RouterInterfaceAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(t) => write!(f, "{}={}", self.id(), t),
            _ => write!(f, "{}={}", self.id(), self.value()),
        }
    }
}

/// What a router interface is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RifBinding {
    Port(PortOid),
    Vlan(VlanId),
}

impl RifBinding {
    /// The interface type implied by the binding.
    pub fn rif_type(&self) -> RouterInterfaceType {
        match self {
            RifBinding::Port(_) => RouterInterfaceType::Port,
            RifBinding::Vlan(_) => RouterInterfaceType::Vlan,
        }
    }

    /// The binding as a create attribute.
    pub fn to_attribute(&self) -> RouterInterfaceAttribute {
        match self {
            RifBinding::Port(port) => RouterInterfaceAttribute::PortId(*port),
            RifBinding::Vlan(vlan) => RouterInterfaceAttribute::VlanId(*vlan),
        }
    }
}

impl fmt::Display for RifBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RifBinding::Port(port) => write!(f, "port {}", port),
            RifBinding::Vlan(vlan) => write!(f, "Vlan{}", vlan),
        }
    }
}

/// The router interface method table (`sai_router_interface_api_t`).
///
/// Each method is a synchronous call that either fully succeeds or fully
/// fails; a failed create allocates nothing. Thread safety across calls is
/// up to the provider, but every provider must be shareable behind an `Arc`.
pub trait RouterInterfaceApi: Send + Sync {
    /// Creates a router interface from a list of attributes.
    ///
    /// The list must carry `VIRTUAL_ROUTER_ID`, `TYPE` and the binding
    /// attribute matching `TYPE`. Omitted read-write attributes take their
    /// defaults.
    fn create_router_interface(
        &self,
        attrs: &[RouterInterfaceAttribute],
    ) -> SaiResult<RouterInterfaceOid>;

    /// Removes a router interface, invalidating its id.
    fn remove_router_interface(&self, rif: RouterInterfaceOid) -> SaiResult<()>;

    /// Updates exactly one read-write attribute.
    fn set_router_interface_attribute(
        &self,
        rif: RouterInterfaceOid,
        attr: &RouterInterfaceAttribute,
    ) -> SaiResult<()>;

    /// Returns the current value of each requested attribute, in request
    /// order. The call fails as a whole if any id cannot be served.
    fn get_router_interface_attribute(
        &self,
        rif: RouterInterfaceOid,
        ids: &[RouterInterfaceAttrId],
    ) -> SaiResult<Vec<RouterInterfaceAttribute>>;
}

/// Create request for a router interface.
///
/// # Example
///
/// ```
/// use sonic_sai::api::router_interface::RouterInterfaceConfig;
/// use sonic_sai::{VirtualRouterOid, VlanId};
///
/// let config = RouterInterfaceConfig::vlan(VirtualRouterOid::compose(1), VlanId::new(100).unwrap())
///     .with_mtu(9100);
/// assert_eq!(config.to_attributes().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterInterfaceConfig {
    /// Owning virtual router.
    pub virtual_router: VirtualRouterOid,
    /// Port or VLAN the interface attaches to.
    pub binding: RifBinding,
    /// Source MAC override.
    pub src_mac: Option<MacAddress>,
    /// IPv4 admin state override.
    pub admin_v4: Option<bool>,
    /// IPv6 admin state override.
    pub admin_v6: Option<bool>,
    /// MTU override.
    pub mtu: Option<u32>,
}

impl RouterInterfaceConfig {
    /// Creates a request for a port-based interface.
    pub fn port(virtual_router: VirtualRouterOid, port: PortOid) -> Self {
        Self::new(virtual_router, RifBinding::Port(port))
    }

    /// Creates a request for a VLAN-based interface.
    pub fn vlan(virtual_router: VirtualRouterOid, vlan: VlanId) -> Self {
        Self::new(virtual_router, RifBinding::Vlan(vlan))
    }

    /// Creates a request from an explicit binding.
    pub fn new(virtual_router: VirtualRouterOid, binding: RifBinding) -> Self {
        Self {
            virtual_router,
            binding,
            src_mac: None,
            admin_v4: None,
            admin_v6: None,
            mtu: None,
        }
    }

    pub fn with_src_mac(mut self, mac: MacAddress) -> Self {
        self.src_mac = Some(mac);
        self
    }

    pub fn with_admin_v4(mut self, enabled: bool) -> Self {
        self.admin_v4 = Some(enabled);
        self
    }

    pub fn with_admin_v6(mut self, enabled: bool) -> Self {
        self.admin_v6 = Some(enabled);
        self
    }

    pub fn with_mtu(mut self, mtu: u32) -> Self {
        self.mtu = Some(mtu);
        self
    }

    /// Flattens the request into the attribute list a provider consumes.
    pub fn to_attributes(&self) -> Vec<RouterInterfaceAttribute> {
        let mut attrs = vec![
            RouterInterfaceAttribute::VirtualRouterId(self.virtual_router),
            RouterInterfaceAttribute::Type(self.binding.rif_type()),
            self.binding.to_attribute(),
        ];
        if let Some(mac) = self.src_mac {
            attrs.push(RouterInterfaceAttribute::SrcMacAddress(mac));
        }
        if let Some(v4) = self.admin_v4 {
            attrs.push(RouterInterfaceAttribute::AdminV4State(v4));
        }
        if let Some(v6) = self.admin_v6 {
            attrs.push(RouterInterfaceAttribute::AdminV6State(v6));
        }
        if let Some(mtu) = self.mtu {
            attrs.push(RouterInterfaceAttribute::Mtu(mtu));
        }
        attrs
    }
}

/// Every standard attribute of one router interface, read back together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouterInterfaceSnapshot {
    pub rif: RouterInterfaceOid,
    pub virtual_router: VirtualRouterOid,
    #[serde(rename = "type")]
    pub rif_type: RouterInterfaceType,
    pub binding: RifBinding,
    pub src_mac: MacAddress,
    pub admin_v4: bool,
    pub admin_v6: bool,
    pub mtu: u32,
}

fn unexpected(expected: RouterInterfaceAttrId, got: &RouterInterfaceAttribute) -> SaiError {
    SaiError::internal(format!("provider answered {} with {}", expected, got))
}

/// Typed helpers over any [`RouterInterfaceApi`].
pub trait RouterInterfaceApiExt: RouterInterfaceApi {
    /// Creates a router interface from a typed request.
    fn create_from_config(&self, config: &RouterInterfaceConfig) -> SaiResult<RouterInterfaceOid> {
        self.create_router_interface(&config.to_attributes())
    }

    /// Reads a single attribute.
    fn get_one(
        &self,
        rif: RouterInterfaceOid,
        id: RouterInterfaceAttrId,
    ) -> SaiResult<RouterInterfaceAttribute> {
        let mut values = self.get_router_interface_attribute(rif, &[id])?;
        match values.pop() {
            Some(attr) if values.is_empty() && attr.id() == id => Ok(attr),
            Some(attr) => Err(unexpected(id, &attr)),
            None => Err(SaiError::internal(format!("provider returned no value for {}", id))),
        }
    }

    fn get_type(&self, rif: RouterInterfaceOid) -> SaiResult<RouterInterfaceType> {
        match self.get_one(rif, RouterInterfaceAttrId::Type)? {
            RouterInterfaceAttribute::Type(t) => Ok(t),
            other => Err(unexpected(RouterInterfaceAttrId::Type, &other)),
        }
    }

    fn get_virtual_router(&self, rif: RouterInterfaceOid) -> SaiResult<VirtualRouterOid> {
        match self.get_one(rif, RouterInterfaceAttrId::VirtualRouterId)? {
            RouterInterfaceAttribute::VirtualRouterId(vr) => Ok(vr),
            other => Err(unexpected(RouterInterfaceAttrId::VirtualRouterId, &other)),
        }
    }

    /// Reads the type and then the matching binding attribute.
    fn get_binding(&self, rif: RouterInterfaceOid) -> SaiResult<RifBinding> {
        let id = self.get_type(rif)?.binding_attr();
        match self.get_one(rif, id)? {
            RouterInterfaceAttribute::PortId(port) => Ok(RifBinding::Port(port)),
            RouterInterfaceAttribute::VlanId(vlan) => Ok(RifBinding::Vlan(vlan)),
            other => Err(unexpected(id, &other)),
        }
    }

    fn get_src_mac(&self, rif: RouterInterfaceOid) -> SaiResult<MacAddress> {
        match self.get_one(rif, RouterInterfaceAttrId::SrcMacAddress)? {
            RouterInterfaceAttribute::SrcMacAddress(mac) => Ok(mac),
            other => Err(unexpected(RouterInterfaceAttrId::SrcMacAddress, &other)),
        }
    }

    fn set_src_mac(&self, rif: RouterInterfaceOid, mac: MacAddress) -> SaiResult<()> {
        self.set_router_interface_attribute(rif, &RouterInterfaceAttribute::SrcMacAddress(mac))
    }

    fn get_mtu(&self, rif: RouterInterfaceOid) -> SaiResult<u32> {
        match self.get_one(rif, RouterInterfaceAttrId::Mtu)? {
            RouterInterfaceAttribute::Mtu(mtu) => Ok(mtu),
            other => Err(unexpected(RouterInterfaceAttrId::Mtu, &other)),
        }
    }

    fn set_mtu(&self, rif: RouterInterfaceOid, mtu: u32) -> SaiResult<()> {
        self.set_router_interface_attribute(rif, &RouterInterfaceAttribute::Mtu(mtu))
    }

    /// Returns the (IPv4, IPv6) admin states.
    fn get_admin_state(&self, rif: RouterInterfaceOid) -> SaiResult<(bool, bool)> {
        let values = self.get_router_interface_attribute(
            rif,
            &[
                RouterInterfaceAttrId::AdminV4State,
                RouterInterfaceAttrId::AdminV6State,
            ],
        )?;
        match values.as_slice() {
            [RouterInterfaceAttribute::AdminV4State(v4), RouterInterfaceAttribute::AdminV6State(v6)] => {
                Ok((*v4, *v6))
            }
            _ => Err(SaiError::internal(format!(
                "provider returned {:?} for admin states",
                values
            ))),
        }
    }

    /// Sets both admin states; stops at the first failure.
    fn set_admin_state(&self, rif: RouterInterfaceOid, v4: bool, v6: bool) -> SaiResult<()> {
        self.set_router_interface_attribute(rif, &RouterInterfaceAttribute::AdminV4State(v4))?;
        self.set_router_interface_attribute(rif, &RouterInterfaceAttribute::AdminV6State(v6))
    }

    /// Reads every standard attribute applicable to the interface's type.
    fn get_all(&self, rif: RouterInterfaceOid) -> SaiResult<RouterInterfaceSnapshot> {
        let rif_type = self.get_type(rif)?;
        let ids: Vec<RouterInterfaceAttrId> = RouterInterfaceAttrId::STANDARD
            .into_iter()
            .filter(|id| id.applies_to(rif_type))
            .collect();
        let values = self.get_router_interface_attribute(rif, &ids)?;
        if values.len() != ids.len() {
            return Err(SaiError::internal(format!(
                "provider returned {} values for {} attributes",
                values.len(),
                ids.len()
            )));
        }

        let mut virtual_router = None;
        let mut binding = None;
        let mut src_mac = None;
        let mut admin_v4 = None;
        let mut admin_v6 = None;
        let mut mtu = None;
        for value in values {
            match value {
                RouterInterfaceAttribute::VirtualRouterId(vr) => virtual_router = Some(vr),
                RouterInterfaceAttribute::PortId(port) => binding = Some(RifBinding::Port(port)),
                RouterInterfaceAttribute::VlanId(vlan) => binding = Some(RifBinding::Vlan(vlan)),
                RouterInterfaceAttribute::SrcMacAddress(mac) => src_mac = Some(mac),
                RouterInterfaceAttribute::AdminV4State(v) => admin_v4 = Some(v),
                RouterInterfaceAttribute::AdminV6State(v) => admin_v6 = Some(v),
                RouterInterfaceAttribute::Mtu(v) => mtu = Some(v),
                RouterInterfaceAttribute::Type(_) | RouterInterfaceAttribute::Custom { .. } => {}
            }
        }

        let missing = |name: &str| SaiError::internal(format!("provider omitted {} for {}", name, rif));
        Ok(RouterInterfaceSnapshot {
            rif,
            virtual_router: virtual_router.ok_or_else(|| missing("VIRTUAL_ROUTER_ID"))?,
            rif_type,
            binding: binding.ok_or_else(|| missing("binding"))?,
            src_mac: src_mac.ok_or_else(|| missing("SRC_MAC_ADDRESS"))?,
            admin_v4: admin_v4.ok_or_else(|| missing("ADMIN_V4_STATE"))?,
            admin_v6: admin_v6.ok_or_else(|| missing("ADMIN_V6_STATE"))?,
            mtu: mtu.ok_or_else(|| missing("MTU"))?,
        })
    }
}

impl<T: RouterInterfaceApi + ?Sized> RouterInterfaceApiExt for T {}
