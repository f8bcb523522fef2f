//! Conformance suite against the virtual switch, used directly and through
//! the shared `SaiContext` registry.

use pretty_assertions::assert_eq;
use sonic_sai::api::{
    RifBinding, RouterInterfaceApiExt, RouterInterfaceConfig, RouterInterfaceType, SaiApi,
    SaiContext,
};
use sonic_sai::api::router_interface::RouterInterfaceApi;
use sonic_sai::conformance::{self, check_names, ConformanceFixture};
use sonic_sai::sim::{SimSwitchConfig, VirtualSwitch};
use sonic_sai::{MacAddress, SaiStatus, VlanId};
use std::sync::Arc;
use std::thread;

#[test]
fn test_suite_names_every_property() {
    let names: Vec<&str> = check_names().collect();
    assert_eq!(
        names,
        vec![
            "type_round_trip",
            "missing_virtual_router_rejected",
            "missing_type_rejected",
            "port_type_requires_port_id",
            "vlan_type_requires_vlan_id",
            "default_mtu",
            "default_admin_states",
            "default_src_mac",
            "type_is_read_only",
            "binding_is_read_only",
            "remove_invalidates_id",
            "mtu_round_trip",
        ]
    );
}

#[test]
fn test_suite_through_context() {
    let switch = Arc::new(VirtualSwitch::new(SimSwitchConfig::default()).unwrap());
    let fixture = ConformanceFixture::provision(&switch).unwrap();
    let ctx = SaiContext::new().with_router_interface_api(switch.clone());
    assert!(ctx.is_api_available(SaiApi::RouterInterface));

    let api = ctx.router_interface_api().unwrap();
    let report = conformance::run(api.as_ref(), &fixture);
    assert!(report.is_success(), "{}", report);
    assert_eq!(report.passed(), 12);
    assert!(report.failures().is_empty());
}

#[test]
fn test_suite_with_narrow_mtu_bounds() {
    // 9000 is outside this provider's range, so only the MTU round trip fails.
    let switch = VirtualSwitch::new(SimSwitchConfig {
        max_mtu: 1600,
        ..Default::default()
    })
    .unwrap();
    let fixture = ConformanceFixture::provision(&switch).unwrap();
    let report = conformance::run(&switch, &fixture);

    let failed: Vec<&str> = report.failures().iter().map(|c| c.name).collect();
    assert_eq!(failed, vec!["mtu_round_trip"]);
    assert_eq!(switch.router_interface_count(), 0);
}

#[test]
fn test_typical_layer3_setup() {
    let switch = VirtualSwitch::new(SimSwitchConfig::default()).unwrap();
    let vr = switch.default_virtual_router();
    let ethernet0 = switch.create_port();
    let ethernet4 = switch.create_port();
    let vlan10 = VlanId::new(10).unwrap();
    switch.create_vlan(vlan10).unwrap();

    let rif0 = switch
        .create_from_config(&RouterInterfaceConfig::port(vr, ethernet0).with_mtu(9100))
        .unwrap();
    let rif4 = switch
        .create_from_config(&RouterInterfaceConfig::port(vr, ethernet4).with_admin_v6(false))
        .unwrap();
    let svi = switch
        .create_from_config(&RouterInterfaceConfig::vlan(vr, vlan10))
        .unwrap();

    assert_eq!(switch.router_interfaces(), vec![rif0, rif4, svi]);
    assert_eq!(switch.get_binding(svi).unwrap(), RifBinding::Vlan(vlan10));
    assert_eq!(switch.get_type(rif4).unwrap(), RouterInterfaceType::Port);
    assert_eq!(switch.get_admin_state(rif4).unwrap(), (true, false));

    // a neighbor resolves over rif0, so it must stay until released
    switch.retain_router_interface(rif0).unwrap();
    assert_eq!(
        switch.remove_router_interface(rif0).unwrap_err().status(),
        SaiStatus::ObjectInUse
    );
    switch.release_router_interface(rif0).unwrap();

    for rif in [rif0, rif4, svi] {
        switch.remove_router_interface(rif).unwrap();
    }
    assert_eq!(switch.router_interface_count(), 0);
    let stats = switch.stats();
    assert_eq!(stats.rifs_created, 3);
    assert_eq!(stats.rifs_removed, 3);
    assert_eq!(stats.rejected, 1);
}

#[test]
fn test_concurrent_creates_get_distinct_ids() {
    let switch = Arc::new(VirtualSwitch::new(SimSwitchConfig::default()).unwrap());
    let vr = switch.default_virtual_router();
    let ports: Vec<_> = (0..8).map(|_| switch.create_port()).collect();

    let handles: Vec<_> = ports
        .into_iter()
        .map(|port| {
            let switch = Arc::clone(&switch);
            thread::spawn(move || {
                let rif = switch
                    .create_from_config(&RouterInterfaceConfig::port(vr, port))
                    .unwrap();
                switch.set_mtu(rif, 9000).unwrap();
                rif
            })
        })
        .collect();

    let mut rifs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    rifs.sort_by_key(|rif| rif.index());
    rifs.dedup();
    assert_eq!(rifs.len(), 8);
    assert_eq!(switch.router_interfaces(), rifs);
    for rif in rifs {
        assert_eq!(switch.get_mtu(rif).unwrap(), 9000);
    }
}

#[test]
fn test_snapshot_serializes() {
    let switch = VirtualSwitch::new(SimSwitchConfig {
        switch_mac: "00:11:22:33:44:55".parse::<MacAddress>().unwrap(),
        ..Default::default()
    })
    .unwrap();
    let vlan = VlanId::new(20).unwrap();
    switch.create_vlan(vlan).unwrap();
    let rif = switch
        .create_from_config(&RouterInterfaceConfig::vlan(switch.default_virtual_router(), vlan))
        .unwrap();

    let json = serde_json::to_value(switch.get_all(rif).unwrap()).unwrap();
    assert_eq!(json["type"], "vlan");
    assert_eq!(json["binding"]["vlan"], 20);
    assert_eq!(json["src_mac"], "00:11:22:33:44:55");
    assert_eq!(json["mtu"], 1514);
    assert_eq!(json["rif"], rif.to_string());
}
