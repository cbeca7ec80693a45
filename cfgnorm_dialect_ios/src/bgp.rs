//! BGP process and address-family handlers.
//!
//! Bare `neighbor` statements attach under the process node; statements
//! inside an `address-family` block attach under the VRF/family node. The
//! two live in parallel parts of the tree and are never merged. One
//! attribute handler serves both levels, since the dialect allows most
//! neighbor options at either.

use cfgnorm_ir::{Document, Key, Node, Step, Value};

use crate::Scope;
use crate::normalize;

fn process_node<'a>(doc: &'a mut Document, asn: &str) -> &'a mut Node {
    doc.root_mut().child("router").child("bgp").child(asn)
}

fn family_node<'a>(doc: &'a mut Document, asn: &str, vrf: &Key, family: &str) -> &'a mut Node {
    process_node(doc, asn)
        .child("vrf")
        .child(vrf.clone())
        .child("address-family")
        .child(family)
}

pub(crate) fn process_command(doc: &mut Document, asn: &str, tokens: &[&str]) -> Step<Scope> {
    match tokens {
        ["bgp", "router-id", id] => {
            process_node(doc, asn).set("router-id", Value::str(*id));
            Step::Leaf
        }
        ["neighbor", peer, attr @ ..] => {
            let neighbor = process_node(doc, asn).child("neighbor").child(*peer);
            neighbor_attribute(neighbor, attr);
            Step::Leaf
        }
        ["no", "neighbor", peer, attr @ ..] => {
            negate_neighbor(process_node(doc, asn), peer, attr);
            Step::Leaf
        }
        ["address-family", args @ ..] => {
            let (family, vrf) = normalize::bgp_family(args);
            family_node(doc, asn, &vrf, &family);
            Step::Open(Scope::BgpAddressFamily {
                asn: asn.to_string(),
                vrf,
                family,
            })
        }
        // The address-family frame it would close was already popped by the
        // dedent; nothing left to do.
        ["exit-address-family"] => Step::Leaf,
        _ => Step::Skip,
    }
}

pub(crate) fn family_command(
    doc: &mut Document,
    asn: &str,
    vrf: &Key,
    family: &str,
    tokens: &[&str],
) -> Step<Scope> {
    match tokens {
        ["neighbor", peer, attr @ ..] => {
            let neighbor = family_node(doc, asn, vrf, family)
                .child("neighbor")
                .child(*peer);
            neighbor_attribute(neighbor, attr);
            Step::Leaf
        }
        ["no", "neighbor", peer, attr @ ..] => {
            negate_neighbor(family_node(doc, asn, vrf, family), peer, attr);
            Step::Leaf
        }
        ["exit-address-family"] => Step::Close,
        _ => Step::Skip,
    }
}

/// Apply one neighbor attribute line. Unrecognized attributes are ignored.
fn neighbor_attribute(neighbor: &mut Node, attr: &[&str]) {
    match attr {
        ["remote-as", asn] => neighbor.set("remote-as", Value::str(*asn)),
        ["peer-group"] => neighbor.set("type", Value::str("peer-group")),
        ["peer-group", group] => neighbor.set("peer-group", Value::str(*group)),
        ["password", encryption, password] if encryption.parse::<i64>().is_ok() => {
            let encryption: i64 = encryption.parse().unwrap_or(0);
            neighbor.set(
                "password",
                Value::node([
                    ("encryption", Value::Int(encryption)),
                    ("password", Value::str(*password)),
                ]),
            );
        }
        ["password", password] => {
            neighbor.set("password", Value::node([("password", Value::str(*password))]));
        }
        ["update-source", interface] => {
            neighbor.set(
                "update-source",
                Value::Str(normalize::interface_name(interface)),
            );
        }
        // Bare fall-over tracks the route to the peer; bfd and route-map
        // options are independent and must coexist under the same node.
        ["fall-over"] => {
            neighbor.child("fall-over").child("route");
        }
        ["fall-over", "bfd"] => {
            neighbor.child("fall-over").set("bfd", Value::Null);
        }
        ["fall-over", "bfd", session] => {
            neighbor.child("fall-over").set("bfd", Value::str(*session));
        }
        ["fall-over", "route-map", map] => {
            neighbor
                .child("fall-over")
                .child("route")
                .set("route-map", Value::str(*map));
        }
        ["activate"] => neighbor.flag("activate"),
        ["additional-paths", kinds @ ..] => {
            neighbor.replace_set("additional-paths", kinds.iter().copied());
        }
        ["advertise", "additional-paths", options @ ..] => {
            let advertise = neighbor.child("advertise-additional-paths");
            let mut iter = options.iter();
            while let Some(option) = iter.next() {
                match *option {
                    "best" => {
                        if let Some(count) = iter.next().and_then(|n| n.parse::<i64>().ok()) {
                            advertise.set("best", Value::Int(count));
                        }
                    }
                    "group-best" => advertise.flag("group-best"),
                    "all" => advertise.flag("all"),
                    _ => {}
                }
            }
        }
        ["allowas-in"] => {
            neighbor.child("allowas-in");
        }
        ["allowas-in", max] => {
            if let Ok(max) = max.parse::<i64>() {
                neighbor.child("allowas-in").set("max", Value::Int(max));
            }
        }
        ["filter-list", list, direction @ ("in" | "out")] => {
            if let Ok(list) = list.parse::<i64>() {
                neighbor.child("filter-list").set(*direction, Value::Int(list));
            }
        }
        ["maximum-prefix", max] => {
            if let Ok(max) = max.parse::<i64>() {
                neighbor.set("maximum-prefix", Value::node([("max", Value::Int(max))]));
            }
        }
        ["maximum-prefix", max, threshold] => {
            if let (Ok(max), Ok(threshold)) = (max.parse::<i64>(), threshold.parse::<i64>()) {
                neighbor.set(
                    "maximum-prefix",
                    Value::node([
                        ("max", Value::Int(max)),
                        ("threshold", Value::Int(threshold)),
                    ]),
                );
            }
        }
        ["next-hop-self"] => {
            neighbor.child("next-hop-self");
        }
        ["next-hop-self", "all"] => neighbor.child("next-hop-self").flag("all"),
        ["prefix-list", list, direction @ ("in" | "out")] => {
            neighbor.child("prefix-list").set(*direction, Value::str(*list));
        }
        ["remove-private-as"] => {
            neighbor.child("remove-private-as");
        }
        ["remove-private-as", "all"] => neighbor.child("remove-private-as").flag("all"),
        ["route-map", map, direction @ ("in" | "out")] => {
            neighbor.child("route-map").set(*direction, Value::str(*map));
        }
        // Bare send-community means standard; "both" covers standard and
        // extended. Kinds are additive across lines.
        ["send-community"] => neighbor.union("send-community", ["standard"]),
        ["send-community", "both"] => {
            neighbor.union("send-community", ["standard", "extended"]);
        }
        ["send-community", kind @ ("standard" | "extended")] => {
            neighbor.union("send-community", [*kind]);
        }
        ["soft-reconfiguration", "inbound"] => {
            neighbor.set("soft-reconfiguration", Value::str("inbound"));
        }
        _ => {}
    }
}

/// Remove a neighbor, or one attribute of it. Negating an absent target is
/// a no-op and must not materialize any intermediate node.
fn negate_neighbor(container: &mut Node, peer: &str, attr: &[&str]) {
    let Some(neighbors) = container.child_mut("neighbor") else {
        return;
    };

    match attr {
        [] => {
            neighbors.remove(peer);
        }
        [head, ..] => {
            if let Some(neighbor) = neighbors.child_mut(peer) {
                neighbor.remove(*head);
            }
        }
    }
}
