//! Cisco IOS-style dialect for `cfgnorm_ir`.
//!
//! This crate turns raw IOS-style configuration text into a single
//! normalized document covering:
//! - static routes (`ip route` / `ipv6 route`, VRF-aware, composite
//!   next-hop identities)
//! - route-maps (sequence-numbered match/set clauses)
//! - BGP (process, VRFs, address-families, neighbors)
//! - OSPF and OSPFv3 (areas, address-families, passive-interface control)
//!
//! Dispatch is a static match over `(innermost scope, keyword path)`.
//! Unrecognized commands are ignored silently at every level; only
//! indentation that fits no open block aborts a parse.
//!
//! # Example
//!
//! ```rust
//! use cfgnorm_dialect_ios::parse_ios;
//!
//! let cfg = "router ospf 100\n router-id 10.0.0.1\n";
//! let doc = parse_ios(cfg).unwrap();
//! assert!(doc.root().get("router").is_some());
//! ```

use cfgnorm_ir::{
    Dialect, Document, Key, ParseError, Step, TriviaKind, Value, apply_with_dialect,
    parse_with_dialect,
};

mod bgp;
mod normalize;
mod ospf;
mod route_map;
mod routes;

/// Open-block kinds tracked on the scope stack.
///
/// Each variant carries the identifying keys needed to re-locate its node
/// in the document; frames hold no node references, so re-entering a block
/// with the same keys reaches the same node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    RouteMapEntry { name: String, seq: i64 },
    BgpProcess { asn: String },
    BgpAddressFamily { asn: String, vrf: Key, family: String },
    OspfProcess { process: i64 },
    Ospfv3Process { process: i64 },
    Ospfv3AddressFamily { process: i64, family: String },
    /// Unrecognized top-level block; swallows its nested lines so unknown
    /// commands stay forward-compatible instead of tripping the
    /// indentation check.
    Unknown,
}

/// Dialect implementation for IOS-style configuration text.
#[derive(Debug, Default, Clone, Copy)]
pub struct IosDialect;

/// Parse text using [`IosDialect`] into a fresh document.
pub fn parse_ios(input: &str) -> Result<Document, ParseError> {
    parse_with_dialect(input, &IosDialect)
}

/// Apply further text onto an existing document (incremental loading).
pub fn apply_ios(doc: &mut Document, input: &str) -> Result<(), ParseError> {
    apply_with_dialect(doc, input, &IosDialect)
}

impl Dialect for IosDialect {
    type Scope = Scope;

    fn classify(&self, raw: &str) -> TriviaKind {
        if raw.trim().is_empty() {
            return TriviaKind::Blank;
        }
        if raw.trim_start().starts_with('!') {
            return TriviaKind::Comment;
        }
        TriviaKind::Content
    }

    fn apply(&self, doc: &mut Document, scopes: &[Scope], tokens: &[String]) -> Step<Scope> {
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();

        match scopes.last() {
            None => top_level(doc, &tokens),
            Some(Scope::Unknown) => Step::Skip,
            Some(Scope::RouteMapEntry { name, seq }) => {
                route_map::entry_command(doc, name, *seq, &tokens)
            }
            Some(Scope::BgpProcess { asn }) => bgp::process_command(doc, asn, &tokens),
            Some(Scope::BgpAddressFamily { asn, vrf, family }) => {
                bgp::family_command(doc, asn, vrf, family, &tokens)
            }
            Some(Scope::OspfProcess { process }) => ospf::process_command(doc, *process, &tokens),
            Some(Scope::Ospfv3Process { process }) => {
                ospf::v3_process_command(doc, *process, &tokens)
            }
            Some(Scope::Ospfv3AddressFamily { process, family }) => {
                ospf::v3_family_command(doc, *process, family, &tokens)
            }
        }
    }
}

fn top_level(doc: &mut Document, tokens: &[&str]) -> Step<Scope> {
    match tokens {
        ["ip", "route", args @ ..] => routes::route_command(doc, routes::RouteFamily::V4, args),
        ["ipv6", "route", args @ ..] => routes::route_command(doc, routes::RouteFamily::V6, args),
        ["route-map", name, action, seq] => {
            let Ok(seq) = seq.parse::<i64>() else {
                return Step::Open(Scope::Unknown);
            };
            doc.root_mut()
                .child("route-map")
                .child(*name)
                .child(seq)
                .set("action", Value::str(*action));
            Step::Open(Scope::RouteMapEntry {
                name: (*name).to_string(),
                seq,
            })
        }
        ["router", "bgp", asn] => {
            doc.root_mut().child("router").child("bgp").child(*asn);
            Step::Open(Scope::BgpProcess {
                asn: (*asn).to_string(),
            })
        }
        ["router", "ospf", process] => match process.parse::<i64>() {
            Ok(process) => {
                doc.root_mut().child("router").child("ospf").child(process);
                Step::Open(Scope::OspfProcess { process })
            }
            Err(_) => Step::Open(Scope::Unknown),
        },
        ["router", "ospfv3", process] => match process.parse::<i64>() {
            Ok(process) => {
                doc.root_mut()
                    .child("router")
                    .child("ospfv3")
                    .child(process);
                Step::Open(Scope::Ospfv3Process { process })
            }
            Err(_) => Step::Open(Scope::Unknown),
        },
        // Anything else may be a block we do not model; give it a frame so
        // its nested lines are swallowed rather than reported as orphans.
        _ => Step::Open(Scope::Unknown),
    }
}
