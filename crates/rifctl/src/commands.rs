//! Command implementations, kept free of argument parsing and printing.

use serde::Serialize;
use sonic_sai::api::{RouterInterfaceAttrId, RouterInterfaceType, SaiContext};
use sonic_sai::attribute::{AttrAccess, Presence};
use sonic_sai::conformance::{self, ConformanceFixture, ConformanceReport};
use sonic_sai::ffi::{exported_router_interface_api, register_context, unregister_context};
use sonic_sai::sim::{SimSwitchConfig, VirtualSwitch};
use sonic_sai::SaiResult;
use std::sync::Arc;
use tracing::{debug, info};

/// One row of the attribute catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttrInfo {
    pub id: u32,
    pub name: String,
    pub value_type: &'static str,
    pub access: AttrAccess,
    pub presence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

fn describe_presence(presence: Presence) -> String {
    match presence {
        Presence::Mandatory => "mandatory".to_string(),
        Presence::MandatoryWhen(raw) => match RouterInterfaceType::from_raw(raw) {
            Some(t) => format!("mandatory when TYPE == {}", t),
            None => format!("mandatory when TYPE == {}", raw),
        },
        Presence::Optional => "optional".to_string(),
    }
}

/// Metadata for every standard router interface attribute, in id order.
pub fn attribute_table() -> Vec<AttrInfo> {
    RouterInterfaceAttrId::STANDARD
        .iter()
        .map(|id| AttrInfo {
            id: id.as_raw(),
            name: id.name(),
            value_type: id.value_type().map_or("", |t| t.c_type()),
            access: id.access(),
            presence: describe_presence(id.presence()),
            default: id.default_description(),
        })
        .collect()
}

/// Runs the conformance suite against a fresh virtual switch.
///
/// With `via_ffi` the switch is published through `sai_api_query()` and the
/// suite drives the exported C method table instead of the Rust trait.
pub fn run_check(config: SimSwitchConfig, via_ffi: bool) -> SaiResult<ConformanceReport> {
    let switch = Arc::new(VirtualSwitch::new(config)?);
    let fixture = ConformanceFixture::provision(&switch)?;
    debug!("conformance fixture: {:?}", fixture);

    let report = if via_ffi {
        register_context(SaiContext::new().with_router_interface_api(switch.clone()));
        let result = exported_router_interface_api().map(|api| conformance::run(&api, &fixture));
        unregister_context();
        result?
    } else {
        conformance::run(switch.as_ref(), &fixture)
    };

    info!(
        "conformance: {}/{} checks passed{}",
        report.passed(),
        report.checks.len(),
        if via_ffi { " (C ABI)" } else { "" }
    );
    Ok(report)
}
