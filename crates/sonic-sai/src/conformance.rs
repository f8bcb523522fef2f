//! Behavioral checks for router interface providers.
//!
//! [`run`] drives any [`RouterInterfaceApi`] through a fixed list of named
//! checks and collects the outcome in a [`ConformanceReport`]. Each check
//! removes the interfaces it creates, so checks are independent of each
//! other and a provider can be checked more than once.
//!
//! # Example
//!
//! ```
//! use sonic_sai::conformance::{self, ConformanceFixture};
//! use sonic_sai::sim::{SimSwitchConfig, VirtualSwitch};
//!
//! let switch = VirtualSwitch::new(SimSwitchConfig::default()).unwrap();
//! let fixture = ConformanceFixture::provision(&switch).unwrap();
//! let report = conformance::run(&switch, &fixture);
//! assert!(report.is_success(), "{}", report);
//! ```

use crate::api::router_interface::{
    RouterInterfaceApi, RouterInterfaceApiExt, RouterInterfaceAttribute, RouterInterfaceConfig,
    RouterInterfaceType, DEFAULT_MTU,
};
use crate::error::{SaiError, SaiResult};
use crate::net::{MacAddress, VlanId};
use crate::sim::VirtualSwitch;
use crate::types::{PortOid, RouterInterfaceOid, VirtualRouterOid};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// MAC given to the fixture's virtual router, distinct from any switch MAC
/// default.
const FIXTURE_MAC: MacAddress = MacAddress::new([0x02, 0x5a, 0x1c, 0x00, 0x00, 0x01]);

/// VLAN created for VLAN-type interfaces.
const FIXTURE_VLAN: u16 = 100;

/// MTU written by the set/get check; inside every common MTU range.
const PROBE_MTU: u32 = 9000;

/// Objects the checks bind their router interfaces to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConformanceFixture {
    pub virtual_router: VirtualRouterOid,
    /// Source MAC of `virtual_router`.
    pub virtual_router_mac: MacAddress,
    /// Port with no router interface.
    pub port: PortOid,
    /// Existing VLAN with no router interface.
    pub vlan: VlanId,
}

impl ConformanceFixture {
    /// Creates a virtual router, a port and a VLAN on a virtual switch.
    pub fn provision(switch: &VirtualSwitch) -> SaiResult<Self> {
        let virtual_router = switch.create_virtual_router(Some(FIXTURE_MAC))?;
        let port = switch.create_port();
        let vlan = VlanId::new(FIXTURE_VLAN).map_err(|e| SaiError::internal(e.to_string()))?;
        switch.create_vlan(vlan)?;

        debug!(
            "conformance fixture: virtual router {}, port {}, Vlan{}",
            virtual_router, port, vlan
        );
        Ok(Self {
            virtual_router,
            virtual_router_mac: FIXTURE_MAC,
            port,
            vlan,
        })
    }

    fn port_config(&self) -> RouterInterfaceConfig {
        RouterInterfaceConfig::port(self.virtual_router, self.port)
    }

    fn vlan_config(&self) -> RouterInterfaceConfig {
        RouterInterfaceConfig::vlan(self.virtual_router, self.vlan)
    }
}

/// Why a check failed.
#[derive(Debug, Clone, Error)]
pub enum ConformanceError {
    #[error("{op} failed: {source}")]
    Sai {
        op: &'static str,
        #[source]
        source: SaiError,
    },

    #[error("{op} succeeded but must fail")]
    UnexpectedSuccess { op: &'static str },

    #[error("{what}: expected {expected}, got {actual}")]
    Mismatch {
        what: &'static str,
        expected: String,
        actual: String,
    },
}

type CheckOutcome = Result<(), ConformanceError>;

trait Context<T> {
    fn during(self, op: &'static str) -> Result<T, ConformanceError>;
}

impl<T> Context<T> for SaiResult<T> {
    fn during(self, op: &'static str) -> Result<T, ConformanceError> {
        self.map_err(|source| ConformanceError::Sai { op, source })
    }
}

fn expect_eq<T: PartialEq + fmt::Display>(what: &'static str, expected: T, actual: T) -> CheckOutcome {
    if expected == actual {
        Ok(())
    } else {
        Err(ConformanceError::Mismatch {
            what,
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

fn expect_failure<T>(op: &'static str, result: SaiResult<T>) -> CheckOutcome {
    match result {
        Ok(_) => Err(ConformanceError::UnexpectedSuccess { op }),
        Err(e) => {
            debug!("{} rejected as required: {}", op, e);
            Ok(())
        }
    }
}

fn expect_create_rejected(
    api: &dyn RouterInterfaceApi,
    op: &'static str,
    attrs: &[RouterInterfaceAttribute],
) -> CheckOutcome {
    match api.create_router_interface(attrs) {
        Ok(rif) => {
            if let Err(e) = api.remove_router_interface(rif) {
                warn!("could not remove {} after {}: {}", rif, op, e);
            }
            Err(ConformanceError::UnexpectedSuccess { op })
        }
        Err(e) => {
            debug!("{} rejected as required: {}", op, e);
            Ok(())
        }
    }
}

/// Creates an interface, runs `body` on it and removes it again.
fn with_interface(
    api: &dyn RouterInterfaceApi,
    config: &RouterInterfaceConfig,
    body: impl FnOnce(RouterInterfaceOid) -> CheckOutcome,
) -> CheckOutcome {
    let rif = api.create_from_config(config).during("create")?;
    let outcome = body(rif);
    let removed = api.remove_router_interface(rif).during("remove");
    outcome.and(removed)
}

fn type_round_trip(api: &dyn RouterInterfaceApi, fixture: &ConformanceFixture) -> CheckOutcome {
    with_interface(api, &fixture.port_config(), |rif| {
        expect_eq("TYPE", RouterInterfaceType::Port, api.get_type(rif).during("get TYPE")?)
    })?;
    with_interface(api, &fixture.vlan_config(), |rif| {
        expect_eq("TYPE", RouterInterfaceType::Vlan, api.get_type(rif).during("get TYPE")?)
    })
}

fn missing_virtual_router_rejected(
    api: &dyn RouterInterfaceApi,
    fixture: &ConformanceFixture,
) -> CheckOutcome {
    expect_create_rejected(
        api,
        "create without VIRTUAL_ROUTER_ID",
        &[
            RouterInterfaceAttribute::Type(RouterInterfaceType::Port),
            RouterInterfaceAttribute::PortId(fixture.port),
        ],
    )
}

fn missing_type_rejected(api: &dyn RouterInterfaceApi, fixture: &ConformanceFixture) -> CheckOutcome {
    expect_create_rejected(
        api,
        "create without TYPE",
        &[
            RouterInterfaceAttribute::VirtualRouterId(fixture.virtual_router),
            RouterInterfaceAttribute::PortId(fixture.port),
        ],
    )
}

fn port_type_requires_port_id(
    api: &dyn RouterInterfaceApi,
    fixture: &ConformanceFixture,
) -> CheckOutcome {
    expect_create_rejected(
        api,
        "create TYPE_PORT without PORT_ID",
        &[
            RouterInterfaceAttribute::VirtualRouterId(fixture.virtual_router),
            RouterInterfaceAttribute::Type(RouterInterfaceType::Port),
        ],
    )
}

fn vlan_type_requires_vlan_id(
    api: &dyn RouterInterfaceApi,
    fixture: &ConformanceFixture,
) -> CheckOutcome {
    expect_create_rejected(
        api,
        "create TYPE_VLAN without VLAN_ID",
        &[
            RouterInterfaceAttribute::VirtualRouterId(fixture.virtual_router),
            RouterInterfaceAttribute::Type(RouterInterfaceType::Vlan),
        ],
    )
}

fn default_mtu(api: &dyn RouterInterfaceApi, fixture: &ConformanceFixture) -> CheckOutcome {
    with_interface(api, &fixture.port_config(), |rif| {
        expect_eq("MTU", DEFAULT_MTU, api.get_mtu(rif).during("get MTU")?)
    })
}

fn default_admin_states(api: &dyn RouterInterfaceApi, fixture: &ConformanceFixture) -> CheckOutcome {
    with_interface(api, &fixture.port_config(), |rif| {
        let (v4, v6) = api.get_admin_state(rif).during("get admin states")?;
        expect_eq("ADMIN_V4_STATE", true, v4)?;
        expect_eq("ADMIN_V6_STATE", true, v6)
    })
}

fn default_src_mac(api: &dyn RouterInterfaceApi, fixture: &ConformanceFixture) -> CheckOutcome {
    with_interface(api, &fixture.vlan_config(), |rif| {
        expect_eq(
            "SRC_MAC_ADDRESS",
            fixture.virtual_router_mac,
            api.get_src_mac(rif).during("get SRC_MAC_ADDRESS")?,
        )
    })
}

fn type_is_read_only(api: &dyn RouterInterfaceApi, fixture: &ConformanceFixture) -> CheckOutcome {
    with_interface(api, &fixture.port_config(), |rif| {
        expect_failure(
            "set TYPE",
            api.set_router_interface_attribute(
                rif,
                &RouterInterfaceAttribute::Type(RouterInterfaceType::Vlan),
            ),
        )?;
        expect_eq("TYPE", RouterInterfaceType::Port, api.get_type(rif).during("get TYPE")?)
    })
}

fn binding_is_read_only(api: &dyn RouterInterfaceApi, fixture: &ConformanceFixture) -> CheckOutcome {
    with_interface(api, &fixture.vlan_config(), |rif| {
        expect_failure(
            "set PORT_ID",
            api.set_router_interface_attribute(rif, &RouterInterfaceAttribute::PortId(fixture.port)),
        )?;
        expect_failure(
            "set VLAN_ID",
            api.set_router_interface_attribute(rif, &RouterInterfaceAttribute::VlanId(fixture.vlan)),
        )
    })
}

fn remove_invalidates_id(api: &dyn RouterInterfaceApi, fixture: &ConformanceFixture) -> CheckOutcome {
    let rif = api.create_from_config(&fixture.port_config()).during("create")?;
    api.remove_router_interface(rif).during("remove")?;

    expect_failure("get MTU after remove", api.get_mtu(rif))?;
    expect_failure("set MTU after remove", api.set_mtu(rif, DEFAULT_MTU))?;
    expect_failure("second remove", api.remove_router_interface(rif))
}

fn mtu_round_trip(api: &dyn RouterInterfaceApi, fixture: &ConformanceFixture) -> CheckOutcome {
    with_interface(api, &fixture.port_config(), |rif| {
        api.set_mtu(rif, PROBE_MTU).during("set MTU")?;
        expect_eq("MTU", PROBE_MTU, api.get_mtu(rif).during("get MTU")?)
    })
}

type CheckFn = fn(&dyn RouterInterfaceApi, &ConformanceFixture) -> CheckOutcome;

const CHECKS: &[(&str, CheckFn)] = &[
    ("type_round_trip", type_round_trip),
    ("missing_virtual_router_rejected", missing_virtual_router_rejected),
    ("missing_type_rejected", missing_type_rejected),
    ("port_type_requires_port_id", port_type_requires_port_id),
    ("vlan_type_requires_vlan_id", vlan_type_requires_vlan_id),
    ("default_mtu", default_mtu),
    ("default_admin_states", default_admin_states),
    ("default_src_mac", default_src_mac),
    ("type_is_read_only", type_is_read_only),
    ("binding_is_read_only", binding_is_read_only),
    ("remove_invalidates_id", remove_invalidates_id),
    ("mtu_round_trip", mtu_round_trip),
];

/// Names of every check, in run order.
pub fn check_names() -> impl Iterator<Item = &'static str> {
    CHECKS.iter().map(|(name, _)| *name)
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Outcome of a full run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConformanceReport {
    pub checks: Vec<CheckResult>,
}

impl ConformanceReport {
    /// Number of checks that passed.
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Checks that failed.
    pub fn failures(&self) -> Vec<&CheckResult> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    pub fn is_success(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.checks {
            match &check.detail {
                None => writeln!(f, "PASS  {}", check.name)?,
                Some(detail) => writeln!(f, "FAIL  {}: {}", check.name, detail)?,
            }
        }
        write!(f, "{}/{} checks passed", self.passed(), self.checks.len())
    }
}

/// Runs every check against `api`.
pub fn run(api: &dyn RouterInterfaceApi, fixture: &ConformanceFixture) -> ConformanceReport {
    let checks = CHECKS
        .iter()
        .map(|&(name, check)| match check(api, fixture) {
            Ok(()) => {
                debug!("conformance check {} passed", name);
                CheckResult {
                    name,
                    passed: true,
                    detail: None,
                }
            }
            Err(e) => {
                warn!("conformance check {} failed: {}", name, e);
                CheckResult {
                    name,
                    passed: false,
                    detail: Some(e.to_string()),
                }
            }
        })
        .collect();

    let report = ConformanceReport { checks };
    info!(
        "conformance: {}/{} checks passed",
        report.passed(),
        report.checks.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::router_interface::RouterInterfaceAttrId;
    use crate::sim::SimSwitchConfig;
    use pretty_assertions::assert_eq;

    /// Accepts any create and never lets anything be read back.
    struct Permissive;

    impl RouterInterfaceApi for Permissive {
        fn create_router_interface(
            &self,
            _attrs: &[RouterInterfaceAttribute],
        ) -> SaiResult<RouterInterfaceOid> {
            Ok(RouterInterfaceOid::compose(1))
        }

        fn remove_router_interface(&self, _rif: RouterInterfaceOid) -> SaiResult<()> {
            Ok(())
        }

        fn set_router_interface_attribute(
            &self,
            _rif: RouterInterfaceOid,
            _attr: &RouterInterfaceAttribute,
        ) -> SaiResult<()> {
            Ok(())
        }

        fn get_router_interface_attribute(
            &self,
            _rif: RouterInterfaceOid,
            _ids: &[RouterInterfaceAttrId],
        ) -> SaiResult<Vec<RouterInterfaceAttribute>> {
            Err(SaiError::not_implemented("get"))
        }
    }

    #[test]
    fn test_virtual_switch_passes_everything() {
        let switch = VirtualSwitch::new(SimSwitchConfig::default()).unwrap();
        let fixture = ConformanceFixture::provision(&switch).unwrap();
        let report = run(&switch, &fixture);

        assert_eq!(report.checks.len(), 12);
        assert!(report.is_success(), "{}", report);
        assert_eq!(switch.router_interface_count(), 0);
        assert_eq!(report.to_string().lines().last(), Some("12/12 checks passed"));
    }

    #[test]
    fn test_checks_are_repeatable() {
        let switch = VirtualSwitch::new(SimSwitchConfig::default()).unwrap();
        let fixture = ConformanceFixture::provision(&switch).unwrap();
        assert!(run(&switch, &fixture).is_success());
        assert!(run(&switch, &fixture).is_success());
    }

    #[test]
    fn test_permissive_provider_fails_checks() {
        let switch = VirtualSwitch::new(SimSwitchConfig::default()).unwrap();
        let fixture = ConformanceFixture::provision(&switch).unwrap();
        let report = run(&Permissive, &fixture);

        assert!(!report.is_success());
        let failed: Vec<&str> = report.failures().iter().map(|c| c.name).collect();
        assert_eq!(failed, check_names().collect::<Vec<_>>());
        assert_eq!(
            report.get("missing_type_rejected").unwrap().detail.as_deref(),
            Some("create without TYPE succeeded but must fail")
        );
    }

    #[test]
    fn test_report_json() {
        let report = ConformanceReport {
            checks: vec![
                CheckResult {
                    name: "default_mtu",
                    passed: true,
                    detail: None,
                },
                CheckResult {
                    name: "mtu_round_trip",
                    passed: false,
                    detail: Some("MTU: expected 9000, got 1514".to_string()),
                },
            ],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "checks": [
                    {"name": "default_mtu", "passed": true},
                    {"name": "mtu_round_trip", "passed": false, "detail": "MTU: expected 9000, got 1514"}
                ]
            })
        );
        assert_eq!(report.passed(), 1);
    }
}
