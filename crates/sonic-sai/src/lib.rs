//! Safe Rust bindings for the SAI (Switch Abstraction Interface) router
//! interface API.
//!
//! This crate provides a type-safe rendition of `sairouterintf.h`,
//! preventing common errors like mixing object IDs of different types and
//! ensuring proper error handling.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Core SAI types including type-safe object IDs
//! - [`error`]: Error types and status handling
//! - [`net`]: MAC address and VLAN id primitives
//! - [`attribute`]: Generic attribute values and metadata
//! - [`api`]: The router interface method table and the API registry
//! - [`sim`]: In-memory reference provider
//! - [`ffi`]: `repr(C)` surface, plus the bridge in both directions
//! - [`conformance`]: Behavioral checks runnable against any provider
//!
//! # Example
//!
//! ```
//! use sonic_sai::api::{RouterInterfaceApiExt, RouterInterfaceConfig};
//! use sonic_sai::sim::{SimSwitchConfig, VirtualSwitch};
//! use sonic_sai::{SaiResult, VlanId};
//!
//! fn vlan_interface(switch: &VirtualSwitch, vlan: VlanId) -> SaiResult<u32> {
//!     switch.create_vlan(vlan)?;
//!     let config = RouterInterfaceConfig::vlan(switch.default_virtual_router(), vlan);
//!     let rif = switch.create_from_config(&config)?;
//!     switch.get_mtu(rif)
//! }
//!
//! let switch = VirtualSwitch::new(SimSwitchConfig::default()).unwrap();
//! assert_eq!(vlan_interface(&switch, VlanId::new(100).unwrap()).unwrap(), 1514);
//! ```

pub mod api;
pub mod attribute;
pub mod conformance;
pub mod error;
pub mod ffi;
pub mod net;
pub mod sim;
pub mod types;

// Re-export commonly used types
pub use types::{
    PortKind, PortOid, RawSaiObjectId, RouterInterfaceKind, RouterInterfaceOid, SaiObjectId,
    SaiObjectKind, SaiObjectType, SwitchKind, SwitchOid, VirtualRouterKind, VirtualRouterOid,
};

pub use error::{SaiError, SaiResult, SaiStatus, SaiStatusExt};
pub use net::{MacAddress, ParseError, VlanId};
