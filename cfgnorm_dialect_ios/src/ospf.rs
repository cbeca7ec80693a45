//! OSPF and OSPFv3 process handlers, including the passive-interface
//! state machine.
//!
//! Passive-interface state per scope is `{default: bool, no-interface:
//! Set}`, absent until first touched. OSPF keeps it on the process node;
//! OSPFv3 keeps one per address-family. Process-level passive-interface
//! commands in OSPFv3 fan out to every address-family declared at that
//! instant; a family declared later starts absent and does not inherit
//! retroactively, and per-family commands never write back to any other
//! scope.

use cfgnorm_ir::{Document, Key, Node, Step, Value};

use crate::Scope;
use crate::normalize;

fn process_node<'a>(doc: &'a mut Document, protocol: &str, process: i64) -> &'a mut Node {
    doc.root_mut().child("router").child(protocol).child(process)
}

pub(crate) fn process_command(doc: &mut Document, process: i64, tokens: &[&str]) -> Step<Scope> {
    let node = process_node(doc, "ospf", process);

    match tokens {
        ["router-id", id] => node.set("id", Value::str(*id)),
        ["area", area, "nssa", options @ ..] => area_nssa(node, area, options),
        ["passive-interface", "default"] => passive_default(node),
        ["no", "passive-interface", "default"] => passive_reset(node),
        ["no", "passive-interface", interface] => passive_no_interface(node, interface),
        _ => return Step::Skip,
    }

    Step::Leaf
}

pub(crate) fn v3_process_command(
    doc: &mut Document,
    process: i64,
    tokens: &[&str],
) -> Step<Scope> {
    match tokens {
        ["router-id", id] => {
            process_node(doc, "ospfv3", process).set("id", Value::str(*id));
        }
        ["area", area, "nssa", options @ ..] => {
            area_nssa(process_node(doc, "ospfv3", process), area, options);
        }
        ["address-family", args @ ..] => {
            let Some(family) = normalize::ospfv3_family(args) else {
                // Unknown family: swallow the block so its lines cannot
                // leak into process scope.
                return Step::Open(Scope::Unknown);
            };
            process_node(doc, "ospfv3", process)
                .child("address-family")
                .child(family.as_str());
            return Step::Open(Scope::Ospfv3AddressFamily { process, family });
        }
        // Already popped by the dedent preceding this line.
        ["exit-address-family"] => {}
        ["passive-interface", "default"] => {
            fan_out(doc, process, passive_default);
        }
        ["no", "passive-interface", "default"] => {
            fan_out(doc, process, passive_reset);
        }
        ["no", "passive-interface", interface] => {
            fan_out(doc, process, |family| passive_no_interface(family, interface));
        }
        _ => return Step::Skip,
    }

    Step::Leaf
}

pub(crate) fn v3_family_command(
    doc: &mut Document,
    process: i64,
    family: &str,
    tokens: &[&str],
) -> Step<Scope> {
    let node = process_node(doc, "ospfv3", process)
        .child("address-family")
        .child(family);

    match tokens {
        ["passive-interface", "default"] => passive_default(node),
        ["no", "passive-interface", "default"] => passive_reset(node),
        ["no", "passive-interface", interface] => passive_no_interface(node, interface),
        ["exit-address-family"] => return Step::Close,
        _ => return Step::Skip,
    }

    Step::Leaf
}

fn area_nssa(node: &mut Node, area: &str, options: &[&str]) {
    node.child("area")
        .child(area)
        .union("nssa", options.iter().copied());
}

/// Apply one mutation to every address-family declared at this instant.
fn fan_out(doc: &mut Document, process: i64, mutate: impl Fn(&mut Node)) {
    let Some(families) = process_node(doc, "ospfv3", process).child_mut("address-family") else {
        return;
    };

    let declared: Vec<Key> = families.keys().cloned().collect();
    for family in declared {
        if let Some(node) = families.child_mut(family) {
            mutate(node);
        }
    }
}

fn passive_default(scope: &mut Node) {
    scope.child("passive-interface").flag("default");
}

/// A no-op unless `default` is currently true at this scope.
fn passive_no_interface(scope: &mut Node, interface: &str) {
    let Some(state) = scope.child_mut("passive-interface") else {
        return;
    };
    if state.get("default") == Some(&Value::Bool(true)) {
        state.union("no-interface", [normalize::interface_name(interface)]);
    }
}

/// Clears the entire attribute back to absent, discarding accumulated
/// exceptions along with the default toggle.
fn passive_reset(scope: &mut Node) {
    scope.remove("passive-interface");
}
