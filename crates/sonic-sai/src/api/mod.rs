//! Safe wrappers for SAI API method tables.
//!
//! A SAI implementation hands out one method table per API family through
//! `sai_api_query()`. [`SaiContext`] is the Rust-side equivalent: providers
//! register their tables once at start-up and callers look them up by
//! [`SaiApi`].
//!
//! # Available API Modules
//!
//! - [`router_interface`]: Router interface (RIF) management

pub mod router_interface;

use crate::error::{SaiError, SaiResult};
use router_interface::RouterInterfaceApi;
use std::fmt;
use std::sync::Arc;

// Re-export commonly used items
pub use router_interface::{
    RifBinding, RouterInterfaceApiExt, RouterInterfaceAttrId, RouterInterfaceAttribute,
    RouterInterfaceConfig, RouterInterfaceSnapshot, RouterInterfaceType, CUSTOM_RANGE_BASE,
    DEFAULT_MTU,
};

/// SAI API families (`sai_api_t`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaiApi {
    Unspecified = 0,
    Switch = 1,
    Port = 2,
    Fdb = 3,
    Vlan = 4,
    VirtualRouter = 5,
    Route = 6,
    NextHop = 7,
    NextHopGroup = 8,
    RouterInterface = 9,
    Neighbor = 10,
    Acl = 11,
    HostInterface = 12,
}

impl SaiApi {
    /// Decodes a raw `sai_api_t` value.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Unspecified),
            1 => Some(Self::Switch),
            2 => Some(Self::Port),
            3 => Some(Self::Fdb),
            4 => Some(Self::Vlan),
            5 => Some(Self::VirtualRouter),
            6 => Some(Self::Route),
            7 => Some(Self::NextHop),
            8 => Some(Self::NextHopGroup),
            9 => Some(Self::RouterInterface),
            10 => Some(Self::Neighbor),
            11 => Some(Self::Acl),
            12 => Some(Self::HostInterface),
            _ => None,
        }
    }
}

impl fmt::Display for SaiApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SaiApi::Unspecified => "SAI_API_UNSPECIFIED",
            SaiApi::Switch => "SAI_API_SWITCH",
            SaiApi::Port => "SAI_API_PORT",
            SaiApi::Fdb => "SAI_API_FDB",
            SaiApi::Vlan => "SAI_API_VLAN",
            SaiApi::VirtualRouter => "SAI_API_VIRTUAL_ROUTER",
            SaiApi::Route => "SAI_API_ROUTE",
            SaiApi::NextHop => "SAI_API_NEXT_HOP",
            SaiApi::NextHopGroup => "SAI_API_NEXT_HOP_GROUP",
            SaiApi::RouterInterface => "SAI_API_ROUTER_INTERFACE",
            SaiApi::Neighbor => "SAI_API_NEIGHBOR",
            SaiApi::Acl => "SAI_API_ACL",
            SaiApi::HostInterface => "SAI_API_HOST_INTERFACE",
        };
        write!(f, "{}", name)
    }
}

/// Registry of the method tables a SAI implementation provides.
///
/// ```
/// use sonic_sai::api::{SaiApi, SaiContext};
/// use sonic_sai::sim::{SimSwitchConfig, VirtualSwitch};
/// use std::sync::Arc;
///
/// let switch = Arc::new(VirtualSwitch::new(SimSwitchConfig::default()).unwrap());
/// let ctx = SaiContext::new().with_router_interface_api(switch);
/// assert!(ctx.is_api_available(SaiApi::RouterInterface));
/// assert!(ctx.router_interface_api().is_ok());
/// ```
#[derive(Clone, Default)]
pub struct SaiContext {
    router_interface: Option<Arc<dyn RouterInterfaceApi>>,
}

impl SaiContext {
    /// Creates an empty context with no tables registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the router interface table.
    pub fn with_router_interface_api(mut self, api: Arc<dyn RouterInterfaceApi>) -> Self {
        self.router_interface = Some(api);
        self
    }

    /// Returns true if a table for `api` is registered.
    pub fn is_api_available(&self, api: SaiApi) -> bool {
        match api {
            SaiApi::RouterInterface => self.router_interface.is_some(),
            _ => false,
        }
    }

    /// Looks up the router interface table.
    ///
    /// # Errors
    ///
    /// Returns `NotSupported` if no provider registered one.
    pub fn router_interface_api(&self) -> SaiResult<Arc<dyn RouterInterfaceApi>> {
        self.router_interface
            .clone()
            .ok_or_else(|| SaiError::not_supported(SaiApi::RouterInterface.to_string()))
    }
}

impl fmt::Debug for SaiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaiContext")
            .field("router_interface", &self.router_interface.is_some())
            .finish()
    }
}
