//! Built-in list defaults for the VXLAN EVPN fabric data model.

use super::{PathRule, RuleTable};
use crate::error::RuleTableError;

/// Rule table for the `vxlan` data model.
///
/// `vxlan.global` has no group rule: its list fields are defaulted only when the operator
/// declared a `global` section.
pub fn vxlan_rule_table() -> Result<RuleTable, RuleTableError> {
    let global = ["vxlan", "global"];
    let topology = ["vxlan", "topology"];
    let overlay = ["vxlan", "overlay_services"];

    RuleTable::new(vec![
        PathRule::list(global, "dns_servers"),
        PathRule::list(global, "ntp_servers"),
        PathRule::group(
            topology,
            ["edge_connections", "fabric_links", "switches", "vpc_peers"],
        ),
        PathRule::for_each(["vxlan", "topology", "switches"], ["freeforms"]),
        PathRule::for_each(["vxlan", "topology", "switches"], ["interfaces"]),
        PathRule::group(
            overlay,
            ["vrfs", "vrf_attach_groups", "networks", "network_attach_groups"],
        ),
        PathRule::for_each(["vxlan", "overlay_services", "vrf_attach_groups"], ["switches"]),
        PathRule::for_each(
            ["vxlan", "overlay_services", "network_attach_groups"],
            ["switches"],
        ),
        PathRule::group(["vxlan", "policy"], ["policies", "groups", "switches"]),
    ])
}
