//! Route-map entry match/set handlers.
//!
//! Match clauses of one kind union into a set across repeated lines; the
//! `exact-match` / `additive` qualifier tokens flag beside the set instead
//! of joining it. Next-hop set clauses append to an ordered list because
//! the dialect's own semantics are order-sensitive there.

use cfgnorm_ir::{Document, Node, Step, Value};

use crate::Scope;

pub(crate) fn entry_command(
    doc: &mut Document,
    name: &str,
    seq: i64,
    tokens: &[&str],
) -> Step<Scope> {
    let entry = doc.root_mut().child("route-map").child(name).child(seq);

    match tokens {
        ["match", "community", members @ ..] => {
            let community = entry.child("match").child("community");
            union_with_qualifier(community, "communities", members, "exact-match");
        }
        ["match", "ip", "address", "prefix-list", members @ ..] => {
            entry
                .child("match")
                .union("ip-prefix-list", members.iter().copied());
        }
        ["match", "ip", "address", members @ ..] => {
            entry
                .child("match")
                .union("ip-address", members.iter().copied());
        }
        ["match", "ipv6", "address", "prefix-list", members @ ..] => {
            entry
                .child("match")
                .union("ipv6-prefix-list", members.iter().copied());
        }
        ["match", "ipv6", "address", members @ ..] => {
            entry
                .child("match")
                .union("ipv6-address", members.iter().copied());
        }
        ["match", "tag", members @ ..] => {
            let tags: Vec<i64> = members
                .iter()
                .filter_map(|member| member.parse().ok())
                .collect();
            entry.child("match").union("tag", tags);
        }
        ["set", "community", members @ ..] => {
            let community = entry.child("set").child("community");
            union_with_qualifier(community, "communities", members, "additive");
        }
        ["set", "ip", "next-hop", "verify-availability"] => {
            entry.child("set").flag("ip-next-hop-verify-availability");
        }
        ["set", "ip", "next-hop", "verify-availability", addr, seq, "track", track] => {
            let (Ok(seq), Ok(track)) = (seq.parse::<i64>(), track.parse::<i64>()) else {
                return Step::Skip;
            };
            let slot = entry
                .child("set")
                .child("ip-next-hop-verify-availability-track")
                .child(seq);
            slot.set("addr", Value::str(*addr));
            slot.set("track-obj", Value::Int(track));
        }
        ["set", "ip", "next-hop", addrs @ ..] => {
            for addr in addrs {
                entry
                    .child("set")
                    .append("ip-next-hop", Value::node([("addr", Value::str(*addr))]));
            }
        }
        ["set", "ip", "vrf", vrf, "next-hop", addrs @ ..] => {
            for addr in addrs {
                entry.child("set").append(
                    "ip-next-hop",
                    Value::node([
                        ("addr", Value::str(*addr)),
                        ("vrf", Value::str(*vrf)),
                    ]),
                );
            }
        }
        ["set", "ipv6", "next-hop", addrs @ ..] => {
            for addr in addrs {
                entry
                    .child("set")
                    .append("ipv6-next-hop", Value::node([("addr", Value::str(*addr))]));
            }
        }
        ["set", "local-preference", value] => {
            let Ok(value) = value.parse::<i64>() else {
                return Step::Skip;
            };
            entry.child("set").set("local-preference", Value::Int(value));
        }
        ["set", "vrf", vrf] => {
            entry.child("set").set("vrf", Value::str(*vrf));
        }
        ["set", "global"] => {
            entry.child("set").set("vrf", Value::str(""));
        }
        _ => return Step::Skip,
    }

    Step::Leaf
}

/// Union members into `set_key`, treating `qualifier` as a flag beside the
/// set rather than a member. The flag is only ever raised, never cleared by
/// a later line that omits the qualifier.
fn union_with_qualifier(node: &mut Node, set_key: &str, members: &[&str], qualifier: &str) {
    let mut plain = Vec::new();
    let mut qualified = false;

    for member in members {
        if *member == qualifier {
            qualified = true;
        } else {
            plain.push(*member);
        }
    }

    node.union(set_key, plain);
    if qualified {
        node.flag(qualifier);
    }
}
