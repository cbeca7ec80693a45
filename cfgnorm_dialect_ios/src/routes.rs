//! `ip route` / `ipv6 route` handlers.
//!
//! Routes file under `ip-route` / `ipv6-route`, keyed VRF (global sentinel
//! when the command carries no `vrf` clause), then CIDR prefix, then a
//! composite identity built from the interface and next-hop router with a
//! `-` placeholder for an absent component. Two routes to the same prefix
//! via different next-hop identities therefore never collide.

use cfgnorm_ir::{Document, Key, Step, Value};

use crate::Scope;
use crate::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RouteFamily {
    V4,
    V6,
}

pub(crate) fn route_command(
    doc: &mut Document,
    family: RouteFamily,
    args: &[&str],
) -> Step<Scope> {
    let (vrf, args) = match args {
        ["vrf", name, rest @ ..] => (Key::Str((*name).to_string()), rest),
        _ => (Key::Global, args),
    };

    let (prefix, args) = match family {
        RouteFamily::V4 => match args {
            [addr, mask, rest @ ..] => match normalize::v4_cidr(addr, mask) {
                Some(prefix) => (prefix, rest),
                None => return Step::Skip,
            },
            _ => return Step::Skip,
        },
        RouteFamily::V6 => match args {
            [cidr, rest @ ..] => ((*cidr).to_string(), rest),
            _ => return Step::Skip,
        },
    };

    let mut interface: Option<String> = None;
    let mut router: Option<String> = None;
    let mut metric: Option<i64> = None;
    let mut tag: Option<i64> = None;

    let mut iter = args.iter();
    while let Some(token) = iter.next() {
        match *token {
            "tag" => match iter.next().and_then(|value| value.parse::<i64>().ok()) {
                Some(value) => tag = Some(value),
                None => return Step::Skip,
            },
            // "name" carries a free-form label; consume it so it cannot be
            // mistaken for an interface.
            "name" => {
                iter.next();
            }
            "permanent" => {}
            token if normalize::looks_like_address(token) => {
                if router.is_none() {
                    router = Some(token.to_string());
                }
            }
            token if token.chars().all(|ch| ch.is_ascii_digit()) => {
                metric = token.parse().ok();
            }
            token => {
                if interface.is_none() {
                    interface = Some(normalize::interface_name(token));
                }
            }
        }
    }

    if interface.is_none() && router.is_none() {
        return Step::Skip;
    }

    let identity = format!(
        "{} {}",
        interface.as_deref().unwrap_or("-"),
        router.as_deref().unwrap_or("-")
    );

    let section = match family {
        RouteFamily::V4 => "ip-route",
        RouteFamily::V6 => "ipv6-route",
    };
    let entry = doc
        .root_mut()
        .child(section)
        .child(vrf)
        .child(prefix)
        .child(identity);

    if let Some(interface) = interface {
        entry.set("interface", Value::Str(interface));
    }
    if let Some(router) = router {
        entry.set("router", Value::Str(router));
    }
    if let Some(metric) = metric {
        entry.set("metric", Value::Int(metric));
    }
    if let Some(tag) = tag {
        entry.set("tag", Value::Int(tag));
    }

    Step::Leaf
}
